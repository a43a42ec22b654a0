//! Recursive removal of empty optional content.
//!
//! The receiving schema rejects optional elements that are present but empty,
//! so after normalization the payload is swept bottom-up: nulls, empty
//! strings, and objects with nothing left inside are dropped. Numbers and
//! booleans always survive, `0` and `false` included, and a sequence that
//! already arrived empty is kept as stated intent. A sequence that only
//! becomes empty because every element was pruned is removed along with
//! everything else.

use serde_json::Value;

/// Prunes `value` in place. The root itself is never replaced, only its
/// descendants are removed.
pub fn prune(value: &mut Value) {
    prune_value(value);
}

/// Walks one node; returns true when the parent should drop it.
fn prune_value(value: &mut Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
        Value::Array(items) => {
            let arrived_empty = items.is_empty();
            items.retain_mut(|item| !prune_value(item));
            items.is_empty() && !arrived_empty
        }
        Value::Object(fields) => {
            fields.retain(|_, child| !prune_value(child));
            fields.is_empty()
        }
    }
}
