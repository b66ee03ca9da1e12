//! Shared test utilities for the polman workspace.
//!
//! Lives in its own crate so both the CLI integration tests and `xtask` can use it.

use serde_json::Value;

/// Placeholder written over every timestamp by [`normalize_nondeterministic`].
pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";

const TIMESTAMP_KEYS: &[&str] = &["created_at", "recorded_at", "last_reviewed_at"];

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// Timestamp keys are replaced at any depth, so a store document written "now" compares equal
/// to a checked-in fixture. Keys holding `null` are left alone.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in TIMESTAMP_KEYS {
                if let Some(slot) = map.get_mut(*key)
                    && !slot.is_null()
                {
                    *slot = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replaces_timestamps_at_any_depth() {
        let doc = json!({
            "schema": "polman.store.v1",
            "policies": {
                "1": {
                    "created_at": "2024-01-01T00:00:00Z",
                    "versions": [
                        {"content": "a", "created_at": "2024-01-01T00:00:00Z", "recorded_at": "2024-01-02T00:00:00Z"}
                    ]
                }
            }
        });
        let normalized = normalize_nondeterministic(doc);
        assert_eq!(normalized["policies"]["1"]["created_at"], "__TIMESTAMP__");
        let version = &normalized["policies"]["1"]["versions"][0];
        assert_eq!(version["created_at"], "__TIMESTAMP__");
        assert_eq!(version["recorded_at"], "__TIMESTAMP__");
        assert_eq!(version["content"], "a");
    }

    #[test]
    fn leaves_other_fields_and_nulls_alone() {
        let doc = json!({"last_reviewed_at": null, "title": "created_at"});
        assert_eq!(normalize_nondeterministic(doc.clone()), doc);
    }
}
