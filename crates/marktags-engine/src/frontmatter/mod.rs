//! Frontmatter block handling: splitting a document into YAML block + body,
//! loading the block into an order-preserving mapping, and rendering the
//! mapping back into the canonical fenced form.
//!
//! The canonical form written by [`assemble`] uses `---` fence lines, one
//! top-level field per line, block-style lists with two-space-indented
//! items, and never emits a `...` document-end marker.

use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("frontmatter is not a mapping (found {0})")]
    NotAMapping(&'static str),
    #[error("invalid YAML in frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A document split into its frontmatter block (without the fence lines),
/// the remaining body, and the detected line-ending style.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitDocument<'a> {
    /// Raw YAML between the fences. `Some("")` for an empty block,
    /// `None` when the document has no frontmatter at all.
    pub frontmatter: Option<&'a str>,
    pub body: &'a str,
    pub newline: &'static str,
}

/// Split a document into frontmatter and body.
///
/// The block must start at the very beginning of the text (a single leading
/// BOM is tolerated) with a line consisting of `---` plus optional trailing
/// spaces or tabs, and runs to the first subsequent such fence line. An
/// opening fence without a closing fence means no block. The body is
/// returned verbatim.
pub fn split(text: &str) -> SplitDocument<'_> {
    static FENCE_REGEX: OnceLock<Regex> = OnceLock::new();
    let fence_regex = FENCE_REGEX.get_or_init(|| {
        Regex::new(r"(?s)\A\x{FEFF}?---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")
            .expect("Invalid frontmatter regex")
    });

    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };

    match fence_regex.captures(text) {
        Some(captures) => {
            let raw = captures.get(1).map_or("", |m| m.as_str());
            let end = captures
                .get(0)
                .map_or(0, |m| m.end());
            SplitDocument {
                frontmatter: Some(raw),
                body: &text[end..],
                newline,
            }
        }
        None => SplitDocument {
            frontmatter: None,
            body: text,
            newline,
        },
    }
}

/// Parse a raw frontmatter block into an order-preserving mapping.
///
/// An absent, empty, or whitespace-only block yields an empty mapping. A
/// block whose top level is not a mapping is surfaced as
/// [`FrontmatterError::NotAMapping`] rather than coerced, so no data is
/// silently dropped.
pub fn load(raw: Option<&str>) -> Result<Mapping, FrontmatterError> {
    let Some(raw) = raw else {
        return Ok(Mapping::new());
    };
    if raw.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml::from_str(raw)?;
    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        other => Err(FrontmatterError::NotAMapping(value_kind(&other))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Render a mapping into the canonical block form, one line per entry.
pub fn render(meta: &Mapping) -> Result<Vec<String>, FrontmatterError> {
    let mut lines = Vec::new();
    render_mapping(meta, 0, &mut lines)?;
    Ok(lines)
}

fn render_mapping(
    map: &Mapping,
    indent: usize,
    out: &mut Vec<String>,
) -> Result<(), FrontmatterError> {
    let pad = " ".repeat(indent);
    for (key, value) in map {
        let key = scalar_text(key)?;
        match value {
            Value::Sequence(items) if !items.is_empty() => {
                out.push(format!("{pad}{key}:"));
                render_sequence(items, indent + 2, out)?;
            }
            Value::Mapping(nested) if !nested.is_empty() => {
                out.push(format!("{pad}{key}:"));
                render_mapping(nested, indent + 2, out)?;
            }
            scalar => splice_scalar(&format!("{pad}{key}: "), scalar, indent + 2, out)?,
        }
    }
    Ok(())
}

fn render_sequence(
    items: &[Value],
    indent: usize,
    out: &mut Vec<String>,
) -> Result<(), FrontmatterError> {
    let pad = " ".repeat(indent);
    for item in items {
        match item {
            Value::Sequence(inner) if !inner.is_empty() => {
                out.push(format!("{pad}-"));
                render_sequence(inner, indent + 2, out)?;
            }
            Value::Mapping(nested) if !nested.is_empty() => {
                out.push(format!("{pad}-"));
                render_mapping(nested, indent + 2, out)?;
            }
            scalar => splice_scalar(&format!("{pad}- "), scalar, indent + 2, out)?,
        }
    }
    Ok(())
}

/// Render one scalar (or empty collection) after `prefix`, indenting any
/// continuation lines (block or wrapped quoted scalars) under it.
fn splice_scalar(
    prefix: &str,
    value: &Value,
    indent: usize,
    out: &mut Vec<String>,
) -> Result<(), FrontmatterError> {
    let rendered = serde_yaml::to_string(value)?;
    let rendered = rendered.trim_end_matches('\n');
    let mut lines = rendered.lines();
    let first = lines.next().unwrap_or("");
    out.push(format!("{prefix}{first}"));
    let pad = " ".repeat(indent);
    for rest in lines {
        out.push(format!("{pad}{rest}"));
    }
    Ok(())
}

fn scalar_text(value: &Value) -> Result<String, FrontmatterError> {
    let rendered = serde_yaml::to_string(value)?;
    Ok(rendered.trim_end_matches('\n').to_string())
}

/// Reassemble a document from its mapping and body, writing every line the
/// engine produces with the detected line-ending style.
pub fn assemble(meta: &Mapping, body: &str, newline: &str) -> Result<String, FrontmatterError> {
    let mut out = String::from("---");
    out.push_str(newline);
    for line in render(meta)? {
        out.push_str(&line);
        out.push_str(newline);
    }
    out.push_str("---");
    out.push_str(newline);
    out.push_str(body);
    Ok(out)
}
