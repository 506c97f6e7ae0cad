//! Common types used throughout tap-stella
//!
//! Records are kept as dynamic JSON values; the only fields the tap
//! interprets are `sequence_id` and the two QA fields it normalizes.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One business entity returned by the API (a QA evaluation or a feedback item)
pub type Record = JsonValue;

/// One batch of records returned by a single GET
pub type Page = Vec<Record>;

/// Last observed `sequence_id` for a stream; `None` means "from the beginning"
pub type Bookmark = Option<i64>;

/// Field every record carries and the API paginates on
pub const SEQUENCE_ID: &str = "sequence_id";

// ============================================================================
// Replication
// ============================================================================

/// Replication method advertised in catalog metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReplicationMethod {
    /// Resume from the last bookmark
    #[default]
    Incremental,
    /// Fetch everything every time
    FullTable,
}

// ============================================================================
// Utilities
// ============================================================================

/// Look up a dotted path (`"scorecard.archived_at"`) inside a JSON value.
///
/// Returns `None` as soon as a key is missing or an intermediate value is not
/// an object. Never fails.
pub fn lookup_path<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    path.split('.')
        .try_fold(value, |current, key| current.as_object()?.get(key))
}

/// Read the `sequence_id` of a record as an integer
pub fn sequence_id(record: &Record) -> Option<i64> {
    record.get(SEQUENCE_ID).and_then(JsonValue::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_path_nested() {
        let value = json!({"scorecard": {"archived_at": {"utc": {"^t": 1_700_000_000}}}});
        assert_eq!(
            lookup_path(&value, "scorecard.archived_at.utc.^t"),
            Some(&json!(1_700_000_000))
        );
    }

    #[test]
    fn test_lookup_path_missing_key() {
        let value = json!({"scorecard": {}});
        assert!(lookup_path(&value, "scorecard.archived_at.utc").is_none());
    }

    #[test]
    fn test_lookup_path_through_non_object() {
        let value = json!({"scorecard": {"archived_at": "2023-11-14T22:13:20Z"}});
        assert!(lookup_path(&value, "scorecard.archived_at.utc.^t").is_none());

        let value = json!({"scorecard": [1, 2, 3]});
        assert!(lookup_path(&value, "scorecard.archived_at").is_none());
    }

    #[test]
    fn test_lookup_path_null_leaf() {
        let value = json!({"score": null});
        assert_eq!(lookup_path(&value, "score"), Some(&JsonValue::Null));
    }

    #[test]
    fn test_sequence_id() {
        assert_eq!(sequence_id(&json!({"sequence_id": 42})), Some(42));
        assert_eq!(sequence_id(&json!({"sequence_id": "42"})), None);
        assert_eq!(sequence_id(&json!({"id": 1})), None);
    }

    #[test]
    fn test_replication_method_serde() {
        let json = serde_json::to_string(&ReplicationMethod::Incremental).unwrap();
        assert_eq!(json, "\"INCREMENTAL\"");
        let method: ReplicationMethod = serde_json::from_str("\"FULL_TABLE\"").unwrap();
        assert_eq!(method, ReplicationMethod::FullTable);
    }
}
