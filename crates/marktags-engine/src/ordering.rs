//! The preserve/alpha order policy applied to a mapping after mutation.

use crate::tags::value_text;
use serde_yaml::{Mapping, Value};
use std::str::FromStr;
use thiserror::Error;

/// Key and list ordering applied on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Keep insertion order untouched.
    Preserve,
    /// Case-insensitive alphabetical order for `tags`/`aliases` lists and
    /// for the top-level key set.
    Alpha,
}

#[derive(Debug, Error)]
#[error("invalid order '{0}', expected 'preserve' or 'alpha'")]
pub struct OrderParseError(pub String);

impl FromStr for Order {
    type Err = OrderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preserve" => Ok(Order::Preserve),
            "alpha" => Ok(Order::Alpha),
            other => Err(OrderParseError(other.to_string())),
        }
    }
}

/// Apply the order policy to the mapping, returning whether anything moved.
///
/// Under [`Order::Alpha`] the `tags` and `aliases` lists are stable-sorted
/// by case-insensitive string form (ties keep their relative order), then
/// the top-level keys are stable-sorted the same way and the mapping is
/// rebuilt in that order. Already-sorted input is a fixed point.
pub fn apply(meta: &mut Mapping, order: Order) -> bool {
    if order == Order::Preserve {
        return false;
    }

    let mut changed = false;

    for key in ["tags", "aliases"] {
        if let Some(Value::Sequence(items)) = meta.get(key) {
            let mut sorted = items.clone();
            sorted.sort_by_key(|item| value_text(item).to_lowercase());
            if sorted != *items {
                meta.insert(Value::from(key), Value::Sequence(sorted));
                changed = true;
            }
        }
    }

    let keys: Vec<Value> = meta.keys().cloned().collect();
    let mut sorted_keys = keys.clone();
    sorted_keys.sort_by_key(|key| value_text(key).to_lowercase());
    if sorted_keys != keys {
        let mut rebuilt = Mapping::new();
        for key in sorted_keys {
            if let Some(value) = meta.get(&key) {
                rebuilt.insert(key.clone(), value.clone());
            }
        }
        *meta = rebuilt;
        changed = true;
    }

    changed
}
