//! Normalization and mutation of the `tags` and `aliases` frontmatter
//! fields. Tags are stored as bare strings (no leading `#`), deduplicated
//! in first-occurrence order; removal that empties the list deletes the
//! `tags` key rather than leaving an empty list behind.

use serde_yaml::{Mapping, Value};

const TAGS_KEY: &str = "tags";
const ALIASES_KEY: &str = "aliases";

/// What a mutation pass did to the mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagDelta {
    /// Normalization rewrote the shape or content of `tags`/`aliases`.
    pub normalized: bool,
    /// At least one tag was appended or removed.
    pub mutated: bool,
    /// The mapping has no keys left, so the whole block should go.
    pub emptied: bool,
}

impl TagDelta {
    /// Whether the mapping differs semantically from its loaded state.
    pub fn changed(&self) -> bool {
        self.normalized || self.mutated
    }
}

/// The string form used for tag comparison and key sorting.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn ensure_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Sequence(items) => items.clone(),
        other => vec![other.clone()],
    }
}

fn strip_marker(tag: &str) -> &str {
    tag.strip_prefix('#').unwrap_or(tag)
}

/// Wrap a present non-list `aliases` value in a one-element list.
/// Lists pass through untouched. Returns true if the value was rewritten.
pub fn normalize_aliases(meta: &mut Mapping) -> bool {
    let Some(value) = meta.get(ALIASES_KEY) else {
        return false;
    };
    if matches!(value, Value::Sequence(_)) {
        return false;
    }
    let wrapped = Value::Sequence(ensure_list(value));
    meta.insert(Value::from(ALIASES_KEY), wrapped);
    true
}

/// Coerce a present `tags` value into a list of bare strings: scalar
/// becomes a one-element list, a leading `#` is stripped once, null and
/// empty entries are dropped, and duplicates keep their first occurrence.
///
/// Returns true iff the stored representation differs from the cleaned
/// result in shape (scalar vs list) or content (length or any positional
/// value).
pub fn normalize_tags(meta: &mut Mapping) -> bool {
    let Some(original) = meta.get(TAGS_KEY) else {
        return false;
    };

    let mut cleaned: Vec<String> = Vec::new();
    for item in ensure_list(original) {
        if item.is_null() {
            continue;
        }
        let text = value_text(&item);
        let text = strip_marker(&text);
        if text.is_empty() {
            continue;
        }
        if !cleaned.iter().any(|seen| seen == text) {
            cleaned.push(text.to_string());
        }
    }

    let changed = match original {
        Value::Sequence(existing) => {
            existing.len() != cleaned.len()
                || existing
                    .iter()
                    .zip(&cleaned)
                    .any(|(before, after)| value_text(before) != *after)
        }
        _ => true,
    };

    let rebuilt = cleaned.into_iter().map(Value::String).collect();
    meta.insert(Value::from(TAGS_KEY), Value::Sequence(rebuilt));
    changed
}

/// Add tags to the mapping, normalizing `tags`/`aliases` first.
///
/// A missing `tags` key is created as an empty list (reported as a
/// normalization-level change). Each requested tag is marker-stripped and
/// appended only if not already present; existing tags keep their order and
/// new tags append after them in request order.
pub fn add_tags(meta: &mut Mapping, requested: &[String]) -> TagDelta {
    let mut delta = TagDelta {
        normalized: normalize_aliases(meta),
        ..TagDelta::default()
    };
    delta.normalized |= normalize_tags(meta);

    if !meta.contains_key(TAGS_KEY) {
        meta.insert(Value::from(TAGS_KEY), Value::Sequence(Vec::new()));
        delta.normalized = true;
    }

    if let Some(Value::Sequence(items)) = meta.get_mut(TAGS_KEY) {
        for tag in requested {
            let tag = strip_marker(tag);
            if tag.is_empty() {
                continue;
            }
            if !items.iter().any(|existing| value_text(existing) == tag) {
                items.push(Value::String(tag.to_string()));
                delta.mutated = true;
            }
        }
    }

    delta
}

/// Remove tags from the mapping, normalizing `tags`/`aliases` first.
///
/// Every list entry equal to any requested (marker-stripped) tag is
/// dropped. A list left empty deletes the `tags` key entirely; `emptied`
/// reports whether the whole mapping is now key-less, meaning the caller
/// should discard the frontmatter block.
pub fn remove_tags(meta: &mut Mapping, requested: &[String]) -> TagDelta {
    let mut delta = TagDelta {
        normalized: normalize_aliases(meta),
        ..TagDelta::default()
    };
    delta.normalized |= normalize_tags(meta);

    let requested: Vec<&str> = requested.iter().map(|t| strip_marker(t)).collect();

    if let Some(Value::Sequence(items)) = meta.get(TAGS_KEY) {
        let kept: Vec<Value> = items
            .iter()
            .filter(|item| !requested.contains(&value_text(item).as_str()))
            .cloned()
            .collect();
        if kept.len() != items.len() {
            delta.mutated = true;
        }
        if kept.is_empty() {
            meta.shift_remove(TAGS_KEY);
        } else {
            meta.insert(Value::from(TAGS_KEY), Value::Sequence(kept));
        }
    }

    delta.emptied = meta.is_empty();
    delta
}
