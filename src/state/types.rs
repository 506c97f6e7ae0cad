//! State types for tracking sync progress

use crate::error::{Error, Result};
use crate::types::{Bookmark, JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Stream id to bookmark mapping persisted between runs.
///
/// Keys the tap does not know about are kept as-is so that state written by
/// other tooling survives a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    values: JsonObject,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Load state from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::state(format!("Failed to read state file {}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    /// Parse state JSON; an empty document or `null` is an empty state
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::new());
        }
        let value: JsonValue = serde_json::from_str(json)
            .map_err(|e| Error::state(format!("Failed to parse state JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Build state from an already parsed JSON value
    pub fn from_value(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Null => Ok(Self::new()),
            JsonValue::Object(values) => Ok(Self { values }),
            other => Err(Error::state(format!(
                "State must be a JSON object, got {other}"
            ))),
        }
    }

    /// Bookmark recorded for a stream, if any
    pub fn bookmark(&self, stream: &str) -> Bookmark {
        match self.values.get(stream)? {
            JsonValue::Number(n) => n.as_i64(),
            JsonValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Record a stream's bookmark
    pub fn set_bookmark(&mut self, stream: impl Into<String>, bookmark: Bookmark) {
        self.values.insert(stream.into(), bookmark.into());
    }

    /// Overlay another state on this one; entries in `other` win
    pub fn merge(&mut self, other: &State) {
        for (stream, value) in &other.values {
            self.values.insert(stream.clone(), value.clone());
        }
    }

    /// Check whether any stream has an entry
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of streams with an entry
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Stream ids with an entry
    pub fn streams(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// JSON form of the state, as written to the output
    pub fn to_value(&self) -> JsonValue {
        JsonValue::Object(self.values.clone())
    }
}

impl FromIterator<(String, Bookmark)> for State {
    fn from_iter<I: IntoIterator<Item = (String, Bookmark)>>(iter: I) -> Self {
        let mut state = Self::new();
        for (stream, bookmark) in iter {
            state.set_bookmark(stream, bookmark);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_state_default() {
        let state = State::new();
        assert!(state.is_empty());
        assert_eq!(state.bookmark("qa"), None);
    }

    #[test]
    fn test_bookmarks() {
        let mut state = State::new();
        state.set_bookmark("qa", Some(500));
        state.set_bookmark("feedback", None);

        assert_eq!(state.bookmark("qa"), Some(500));
        assert_eq!(state.bookmark("feedback"), None);
        assert_eq!(state.len(), 2);
        assert_eq!(state.to_value(), json!({"qa": 500, "feedback": null}));
    }

    #[test]
    fn test_from_json() {
        let state = State::from_json(r#"{"qa": 500, "feedback": "42", "other": {"x": 1}}"#).unwrap();
        assert_eq!(state.bookmark("qa"), Some(500));
        assert_eq!(state.bookmark("feedback"), Some(42));
        assert_eq!(state.bookmark("other"), None);
        assert_eq!(state.streams().collect::<Vec<_>>(), vec!["qa", "feedback", "other"]);
    }

    #[test]
    fn test_from_json_empty_and_null() {
        assert!(State::from_json("").unwrap().is_empty());
        assert!(State::from_json("null").unwrap().is_empty());
        assert!(State::from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = State::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::State { .. }));
        assert!(State::from_json("{broken").is_err());
    }

    #[test]
    fn test_merge_overrides() {
        let mut state = State::from_json(r#"{"qa": 1, "feedback": 7}"#).unwrap();
        let update: State = [("qa".to_string(), Some(9))].into_iter().collect();
        state.merge(&update);

        assert_eq!(state.to_value(), json!({"qa": 9, "feedback": 7}));
    }

    #[test]
    fn test_state_serialization() {
        let state: State = [("qa".to_string(), Some(502))].into_iter().collect();
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"qa":502}"#);

        let restored: State = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"qa": 123}}"#).unwrap();

        let state = State::from_file(file.path()).unwrap();
        assert_eq!(state.bookmark("qa"), Some(123));

        let err = State::from_file("/nonexistent/state.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read state file"));
    }
}
