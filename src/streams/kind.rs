//! Supported streams

use crate::error::Result;
use crate::types::{JsonValue, Record, SEQUENCE_ID};
use serde::{Deserialize, Serialize};

/// A stream the tap knows how to sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    /// QA evaluations
    Qa,
    /// Customer feedback
    Feedback,
}

impl StreamKind {
    /// Every supported stream, in discovery order
    pub const ALL: [StreamKind; 2] = [StreamKind::Qa, StreamKind::Feedback];

    /// Look a stream up by its `tap_stream_id`
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// `tap_stream_id` of the stream
    pub fn id(self) -> &'static str {
        match self {
            Self::Qa => "qa",
            Self::Feedback => "feedback",
        }
    }

    /// API path, relative to the base URL
    pub fn path(self) -> &'static str {
        match self {
            Self::Qa => "v2/qa",
            Self::Feedback => "v2/data",
        }
    }

    /// Fields that identify a record
    pub fn key_properties(self) -> &'static [&'static str] {
        &["id"]
    }

    /// Field the stream is replicated on
    pub fn replication_key(self) -> &'static str {
        SEQUENCE_ID
    }

    /// JSON schema shipped with the tap
    pub fn schema(self) -> Result<JsonValue> {
        let raw = match self {
            Self::Qa => include_str!("../../schemas/qa.json"),
            Self::Feedback => include_str!("../../schemas/feedback.json"),
        };
        Ok(serde_json::from_str(raw)?)
    }

    /// Apply the stream's record normalization in place
    pub fn normalize(self, record: &mut Record) {
        match self {
            Self::Qa => super::normalize::normalize_qa_record(record),
            Self::Feedback => {}
        }
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
