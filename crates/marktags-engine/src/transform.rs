//! The core entry point: apply one add/remove operation to a document's
//! frontmatter and return the complete replacement text.

use crate::frontmatter::{self, FrontmatterError};
use crate::ordering::{self, Order};
use crate::tags;
use std::str::FromStr;
use thiserror::Error;

/// The mutation to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Add,
    Remove,
}

#[derive(Debug, Error)]
#[error("invalid mode '{0}', expected 'add' or 'remove'")]
pub struct ModeParseError(pub String);

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Mode::Add),
            "remove" => Ok(Mode::Remove),
            other => Err(ModeParseError(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
}

/// Apply an add or remove of `requested` tags to `text` and return the new
/// document text.
///
/// When the operation produces no semantic change the input is returned
/// byte-for-byte, so callers can skip writes by comparing strings. A change
/// is any of: a normalization rewrite of `tags`/`aliases`, a tag actually
/// added or removed, or the alpha order policy moving a key or list entry.
/// A removal that empties the whole mapping discards the block and returns
/// the bare body with leading newlines stripped.
pub fn transform(
    text: &str,
    requested: &[String],
    mode: Mode,
    order: Order,
) -> Result<String, TransformError> {
    let doc = frontmatter::split(text);
    let mut meta = frontmatter::load(doc.frontmatter)?;

    match mode {
        Mode::Add => {
            let delta = tags::add_tags(&mut meta, requested);
            let reordered = ordering::apply(&mut meta, order);
            if !delta.changed() && !reordered && doc.frontmatter.is_some() {
                return Ok(text.to_string());
            }
            Ok(frontmatter::assemble(&meta, doc.body, doc.newline)?)
        }
        Mode::Remove => {
            let delta = tags::remove_tags(&mut meta, requested);
            let reordered = ordering::apply(&mut meta, order);
            if !delta.changed() && !reordered {
                return Ok(text.to_string());
            }
            if delta.emptied {
                return Ok(doc.body.trim_start_matches(['\r', '\n']).to_string());
            }
            Ok(frontmatter::assemble(&meta, doc.body, doc.newline)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn add(text: &str, tag: &str) -> String {
        transform(text, &[tag.to_string()], Mode::Add, Order::Preserve).unwrap()
    }

    fn remove(text: &str, tag: &str) -> String {
        transform(text, &[tag.to_string()], Mode::Remove, Order::Preserve).unwrap()
    }

    #[test]
    fn add_tag_to_existing_list() {
        let input = "---\ntags:\n  - a\n---\nbody\n";
        assert_eq!(add(input, "b"), "---\ntags:\n  - a\n  - b\n---\nbody\n");
    }

    #[test]
    fn add_tag_creates_block_when_absent() {
        let input = "# Title\nbody\n";
        assert_eq!(add(input, "new"), "---\ntags:\n  - new\n---\n# Title\nbody\n");
    }

    #[test]
    fn add_existing_tag_returns_input_unchanged() {
        let input = "---\ntags:\n  - a\n---\nbody\n";
        assert_eq!(add(input, "a"), input);
    }

    #[test]
    fn add_marker_prefixed_duplicate_returns_input_unchanged() {
        let input = "---\ntags:\n  - alpha\n---\nbody\n";
        assert_eq!(add(input, "#alpha"), input);
    }

    #[test]
    fn add_coerces_scalar_tags_to_block_list() {
        let input = "---\ntags: alpha\n---\nbody\n";
        assert_eq!(
            add(input, "beta"),
            "---\ntags:\n  - alpha\n  - beta\n---\nbody\n"
        );
    }

    #[test]
    fn add_existing_tag_to_scalar_field_rewrites_shape() {
        // Normalization alone is a change even though no tag was appended.
        let input = "---\ntags: alpha\n---\nbody\n";
        assert_eq!(add(input, "alpha"), "---\ntags:\n  - alpha\n---\nbody\n");
    }

    #[test]
    fn remove_sole_tag_deletes_block_entirely() {
        let input = "---\ntags:\n  - solo\n---\nbody\n";
        assert_eq!(remove(input, "solo"), "body\n");
    }

    #[test]
    fn remove_keeps_block_when_other_keys_remain() {
        let input = "---\ntags:\n  - solo\ntitle: x\n---\nbody\n";
        assert_eq!(remove(input, "solo"), "---\ntitle: x\n---\nbody\n");
    }

    #[test]
    fn remove_missing_tag_returns_input_unchanged() {
        let input = "---\ntags:\n  - a\n---\nbody\n";
        assert_eq!(remove(input, "zzz"), input);
    }

    #[test]
    fn remove_from_document_without_block_returns_input() {
        let input = "# Title\nbody\n";
        assert_eq!(remove(input, "a"), input);
    }

    #[test]
    fn crlf_documents_keep_crlf_in_written_lines() {
        let input = "---\r\ntags:\r\n  - a\r\n---\r\nbody\r\n";
        assert_eq!(
            add(input, "b"),
            "---\r\ntags:\r\n  - a\r\n  - b\r\n---\r\nbody\r\n"
        );
    }

    #[test]
    fn malformed_block_surfaces_typed_error() {
        let input = "---\n- not\n- a\n- mapping\n---\nbody\n";
        let result = transform(input, &["a".to_string()], Mode::Add, Order::Preserve);
        assert!(matches!(
            result,
            Err(TransformError::Frontmatter(FrontmatterError::NotAMapping(_)))
        ));
    }

    #[test]
    fn mode_parses_from_str() {
        assert_eq!("add".parse::<Mode>().unwrap(), Mode::Add);
        assert_eq!("remove".parse::<Mode>().unwrap(), Mode::Remove);
        assert!("rename".parse::<Mode>().is_err());
    }
}
