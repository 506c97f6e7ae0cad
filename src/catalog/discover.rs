//! Catalog discovery

use super::types::{Catalog, CatalogEntry, MetadataEntry};
use crate::error::Result;
use crate::streams::StreamKind;
use crate::types::{JsonObject, JsonValue, ReplicationMethod};
use serde_json::json;

/// Build the catalog of every stream the tap supports.
///
/// Nothing is selected; callers select streams themselves or use
/// [`Catalog::select_all`].
pub fn discover() -> Result<Catalog> {
    let streams = StreamKind::ALL
        .into_iter()
        .map(discover_stream)
        .collect::<Result<Vec<_>>>()?;
    Ok(Catalog { streams })
}

/// Catalog entry for one stream
pub fn discover_stream(kind: StreamKind) -> Result<CatalogEntry> {
    let schema = kind.schema()?;
    let key_properties: Vec<String> = kind
        .key_properties()
        .iter()
        .map(|key| (*key).to_string())
        .collect();

    let mut metadata = vec![MetadataEntry::stream(stream_metadata(kind))];
    if let Some(properties) = schema.get("properties").and_then(JsonValue::as_object) {
        metadata.extend(properties.keys().map(|name| {
            let automatic =
                kind.key_properties().contains(&name.as_str()) || name == kind.replication_key();
            let inclusion = if automatic { "automatic" } else { "available" };
            MetadataEntry::property(name, into_object(json!({ "inclusion": inclusion })))
        }));
    }

    Ok(CatalogEntry {
        tap_stream_id: kind.id().to_string(),
        stream: kind.id().to_string(),
        schema,
        key_properties,
        replication_key: Some(kind.replication_key().to_string()),
        replication_method: Some(ReplicationMethod::Incremental),
        metadata,
    })
}

fn stream_metadata(kind: StreamKind) -> JsonObject {
    into_object(json!({
        "inclusion": "available",
        "forced-replication-method": ReplicationMethod::Incremental,
        "valid-replication-keys": [kind.replication_key()],
        "table-key-properties": kind.key_properties(),
    }))
}

fn into_object(value: JsonValue) -> JsonObject {
    match value {
        JsonValue::Object(object) => object,
        _ => JsonObject::new(),
    }
}
