//! Singer message types

use crate::types::{JsonValue, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message on the output stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Describes the records that follow for a stream
    Schema {
        /// Stream name
        stream: String,
        /// JSON schema of the stream's records
        schema: JsonValue,
        /// Fields that uniquely identify a record
        key_properties: Vec<String>,
    },
    /// One extracted record
    Record {
        /// Stream name
        stream: String,
        /// The record
        record: Record,
        /// When the record was extracted
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_extracted: Option<DateTime<Utc>>,
    },
    /// Bookmarks to resume from on the next run
    State {
        /// Stream id to bookmark mapping
        value: JsonValue,
    },
}

impl Message {
    /// Create a schema message
    pub fn schema(
        stream: impl Into<String>,
        schema: JsonValue,
        key_properties: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::Schema {
            stream: stream.into(),
            schema,
            key_properties: key_properties.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a record message stamped with the extraction time
    pub fn record(
        stream: impl Into<String>,
        record: Record,
        time_extracted: DateTime<Utc>,
    ) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
            time_extracted: Some(time_extracted),
        }
    }

    /// Create a state message
    pub fn state(value: JsonValue) -> Self {
        Self::State { value }
    }

    /// Stream this message belongs to, if any
    pub fn stream(&self) -> Option<&str> {
        match self {
            Self::Schema { stream, .. } | Self::Record { stream, .. } => Some(stream),
            Self::State { .. } => None,
        }
    }

    /// Check if this is a schema message
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// Check if this is a state message
    pub fn is_state(&self) -> bool {
        matches!(self, Self::State { .. })
    }
}
