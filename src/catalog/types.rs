//! Singer catalog types

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, ReplicationMethod};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Singer catalog: the streams a run may sync
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Streams, in the order they are synced
    #[serde(default)]
    pub streams: Vec<CatalogEntry>,
}

impl Catalog {
    /// Load a catalog file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::catalog(format!(
                "Failed to read catalog file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parse catalog JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::catalog(format!("Invalid catalog: {e}")))
    }

    /// Selected streams, in catalog order
    pub fn selected_streams(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.streams.iter().filter(|entry| entry.is_selected())
    }

    /// Find a stream by `tap_stream_id`
    pub fn get_stream(&self, tap_stream_id: &str) -> Option<&CatalogEntry> {
        self.streams
            .iter()
            .find(|entry| entry.tap_stream_id == tap_stream_id)
    }

    /// Mark every stream as selected
    #[must_use]
    pub fn select_all(mut self) -> Self {
        self.streams.iter_mut().for_each(CatalogEntry::select);
        self
    }
}

/// One stream in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Identifier the tap dispatches on
    pub tap_stream_id: String,

    /// Stream name used in emitted messages' metadata
    #[serde(default)]
    pub stream: String,

    /// JSON schema of the stream's records
    #[serde(default)]
    pub schema: JsonValue,

    /// Primary key fields
    #[serde(default)]
    pub key_properties: Vec<String>,

    /// Field the stream is bookmarked on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_key: Option<String>,

    /// How the stream is replicated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_method: Option<ReplicationMethod>,

    /// Singer metadata, keyed by breadcrumb
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

/// Metadata attached to a breadcrumb (`[]` is the stream itself)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Path to the schema node this metadata describes
    #[serde(default)]
    pub breadcrumb: Vec<String>,

    /// Metadata values
    #[serde(default)]
    pub metadata: JsonObject,
}

impl MetadataEntry {
    /// Metadata for the stream as a whole
    pub fn stream(metadata: JsonObject) -> Self {
        Self {
            breadcrumb: Vec::new(),
            metadata,
        }
    }

    /// Metadata for one top-level property
    pub fn property(name: &str, metadata: JsonObject) -> Self {
        Self {
            breadcrumb: vec!["properties".to_string(), name.to_string()],
            metadata,
        }
    }
}

impl CatalogEntry {
    /// Stream-level metadata (the entry with an empty breadcrumb)
    pub fn stream_metadata(&self) -> Option<&JsonObject> {
        self.metadata
            .iter()
            .find(|entry| entry.breadcrumb.is_empty())
            .map(|entry| &entry.metadata)
    }

    /// Whether the stream is selected for sync.
    ///
    /// Reads `selected` from the stream-level metadata, falling back to the
    /// legacy `schema.selected` flag.
    pub fn is_selected(&self) -> bool {
        let flag = self
            .stream_metadata()
            .and_then(|metadata| metadata.get("selected"))
            .or_else(|| self.schema.get("selected"));
        matches!(flag, Some(JsonValue::Bool(true)))
    }

    /// Mark the stream as selected
    pub fn select(&mut self) {
        let position = self.metadata.iter().position(|e| e.breadcrumb.is_empty());
        let index = position.unwrap_or_else(|| {
            self.metadata.push(MetadataEntry::stream(JsonObject::new()));
            self.metadata.len() - 1
        });
        self.metadata[index]
            .metadata
            .insert("selected".to_string(), JsonValue::Bool(true));
    }

    /// Primary key: `key_properties`, or `table-key-properties` metadata
    pub fn primary_key(&self) -> Vec<String> {
        if !self.key_properties.is_empty() {
            return self.key_properties.clone();
        }
        self.stream_metadata()
            .and_then(|metadata| metadata.get("table-key-properties"))
            .and_then(JsonValue::as_array)
            .map(|keys| {
                keys.iter()
                    .filter_map(JsonValue::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
