//! Tests for engine module

use super::*;
use crate::auth::Credentials;
use crate::catalog::{discover, CatalogEntry};
use crate::http::ClientConfig;
use crate::output::MemoryWriter;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine_for(server: &MockServer) -> SyncEngine {
    let config = ClientConfig::builder()
        .base_url(server.uri())
        .retry_delay(Duration::ZERO)
        .build();
    let client = StellaClient::new(&Credentials::new("key", "secret"), config).unwrap();
    SyncEngine::new(client, TapConfig::new("key", "secret"))
}

fn selected(ids: &[&str]) -> Catalog {
    let known = discover().unwrap();
    let streams = ids
        .iter()
        .map(|id| {
            known.get_stream(id).cloned().unwrap_or_else(|| {
                serde_json::from_value::<CatalogEntry>(json!({
                    "tap_stream_id": id,
                    "schema": {"type": "object"}
                }))
                .unwrap()
            })
        })
        .collect();
    Catalog { streams }.select_all()
}

async fn mount(server: &MockServer, api_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(api_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// SyncStats Tests
// ============================================================================

#[test]
fn test_sync_stats_default() {
    let stats = SyncStats::default();
    assert_eq!(stats.records_synced, 0);
    assert_eq!(stats.pages_fetched, 0);
    assert_eq!(stats.streams_synced, 0);
    assert_eq!(stats.streams_skipped, 0);
}

#[test]
fn test_sync_stats_tracking() {
    let mut stats = SyncStats::new();
    stats.add_stream(&StreamSummary {
        stream: "qa".to_string(),
        bookmark: Some(10),
        records: 10,
        pages: 1,
    });
    stats.add_stream(&StreamSummary {
        stream: "feedback".to_string(),
        bookmark: None,
        records: 0,
        pages: 1,
    });
    stats.add_skipped();
    stats.set_duration(1500);

    assert_eq!(stats.records_synced, 10);
    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.streams_synced, 2);
    assert_eq!(stats.streams_skipped, 1);
    assert_eq!(stats.duration_ms, 1500);
}

// ============================================================================
// Orchestration Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_stream_is_skipped() {
    let server = MockServer::start().await;
    mount(&server, "/v2/qa", json!([{"id": "a", "sequence_id": 7}])).await;

    let mut engine = engine_for(&server);
    let mut writer = MemoryWriter::new();
    let state = engine
        .run(&selected(&["agents", "qa"]), &State::new(), &mut writer)
        .await
        .unwrap();

    assert_eq!(state.to_value(), json!({"qa": 7}));
    assert_eq!(writer.schema_streams(), vec!["qa"]);
    assert_eq!(writer.states(), vec![&json!({"qa": 7})]);
    assert_eq!(engine.stats().streams_synced, 1);
    assert_eq!(engine.stats().streams_skipped, 1);
}

#[tokio::test]
async fn test_streams_run_in_catalog_order() {
    let server = MockServer::start().await;
    mount(&server, "/v2/qa", json!([{"id": "a", "sequence_id": 7}])).await;
    mount(&server, "/v2/data", json!([{"id": "b", "sequence_id": 3}])).await;

    let mut engine = engine_for(&server);
    let mut writer = MemoryWriter::new();
    engine
        .run(&selected(&["feedback", "qa"]), &State::new(), &mut writer)
        .await
        .unwrap();

    let order: Vec<&str> = writer
        .messages
        .iter()
        .map(|m| m.stream().unwrap_or("<state>"))
        .collect();
    assert_eq!(order, vec!["feedback", "feedback", "qa", "qa", "<state>"]);
}

#[tokio::test]
async fn test_no_known_streams_writes_no_state() {
    let server = MockServer::start().await;

    let mut engine = engine_for(&server);
    let mut writer = MemoryWriter::new();
    let prior = State::from_json(r#"{"qa": 5}"#).unwrap();
    let state = engine
        .run(&selected(&["agents"]), &prior, &mut writer)
        .await
        .unwrap();

    assert_eq!(state, prior);
    assert!(writer.messages.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unselected_streams_are_not_synced() {
    let server = MockServer::start().await;

    let mut engine = engine_for(&server);
    let mut writer = MemoryWriter::new();
    engine
        .run(&discover().unwrap(), &State::new(), &mut writer)
        .await
        .unwrap();

    assert!(writer.messages.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_prior_bookmarks_are_carried_forward() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/data"))
        .and(query_param("after", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut engine = engine_for(&server);
    let mut writer = MemoryWriter::new();
    let prior = State::from_json(r#"{"qa": 500, "feedback": 10, "legacy": "x"}"#).unwrap();
    let state = engine
        .run(&selected(&["feedback"]), &prior, &mut writer)
        .await
        .unwrap();

    assert_eq!(
        state.to_value(),
        json!({"qa": 500, "feedback": 10, "legacy": "x"})
    );
    assert_eq!(writer.states().len(), 1);
}

#[tokio::test]
async fn test_end_to_end_resume_from_bookmark() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/qa"))
        .and(query_param("after", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "sequence_id": 501},
            {"id": "b", "sequence_id": 502}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = TapConfig::new("key", "secret");
    config.base_url = Some(server.uri());
    let mut writer = MemoryWriter::new();
    let prior = State::from_json(r#"{"qa": 500}"#).unwrap();

    let state = sync(&config, &prior, &selected(&["qa"]), &mut writer)
        .await
        .unwrap();

    assert_eq!(writer.records("qa").len(), 2);
    assert_eq!(state.to_value(), json!({"qa": 502}));
    assert_eq!(writer.states(), vec![&json!({"qa": 502})]);
}

#[tokio::test]
async fn test_fatal_error_writes_no_state() {
    let server = MockServer::start().await;
    mount(&server, "/v2/qa", json!([{"id": "a", "sequence_id": 7}])).await;
    Mock::given(method("GET"))
        .and(path("/v2/data"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut engine = engine_for(&server);
    let mut writer = MemoryWriter::new();
    let err = engine
        .run(&selected(&["qa", "feedback"]), &State::new(), &mut writer)
        .await
        .unwrap_err();

    assert!(matches!(err, crate::Error::HttpStatus { status: 401, .. }));
    assert_eq!(writer.records("qa").len(), 1);
    assert!(writer.states().is_empty());
}
