//! Execution engine module
//!
//! Runs every selected stream in catalog order and persists the combined
//! state once at the end.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - Orchestrates a run over one shared client
//! - `SyncStats` - Counters for the finished run
//! - `sync` - One-call entry point used by the CLI

mod types;

pub use types::SyncStats;

use crate::catalog::Catalog;
use crate::config::TapConfig;
use crate::error::Result;
use crate::http::StellaClient;
use crate::output::MessageWriter;
use crate::state::State;
use crate::streams::{sync_feedback, sync_qa, StreamKind, StreamSummary, SyncContext};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sync engine for orchestrating data extraction
#[derive(Debug)]
pub struct SyncEngine {
    /// HTTP client shared by every stream
    client: StellaClient,
    /// Run configuration
    config: TapConfig,
    /// Statistics
    stats: SyncStats,
}

impl SyncEngine {
    /// Create an engine over an existing client
    pub fn new(client: StellaClient, config: TapConfig) -> Self {
        Self {
            client,
            config,
            stats: SyncStats::default(),
        }
    }

    /// Create an engine, building the client from the config
    pub fn from_config(config: TapConfig) -> Result<Self> {
        let client = StellaClient::new(&config.credentials(), config.client_config())?;
        Ok(Self::new(client, config))
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Sync every selected stream and write the resulting state.
    ///
    /// Streams run one after another in catalog order. Selected streams the
    /// tap does not know are skipped. The returned state is `prior` overlaid
    /// with this run's bookmarks; it is written exactly once, and not at all
    /// when no stream ran.
    pub async fn run(
        &mut self,
        catalog: &Catalog,
        prior: &State,
        writer: &mut dyn MessageWriter,
    ) -> Result<State> {
        let start = Instant::now();
        let ctx = SyncContext {
            client: &self.client,
            config: &self.config,
            state: prior,
        };

        let mut bookmarks = State::new();
        for entry in catalog.selected_streams() {
            let summary = match StreamKind::from_id(&entry.tap_stream_id) {
                Some(StreamKind::Qa) => sync_qa(ctx, entry, writer).await?,
                Some(StreamKind::Feedback) => sync_feedback(ctx, entry, writer).await?,
                None => {
                    debug!(stream = %entry.tap_stream_id, "Skipping unknown stream");
                    self.stats.add_skipped();
                    continue;
                }
            };
            self.stats.add_stream(&summary);
            let StreamSummary {
                stream, bookmark, ..
            } = summary;
            bookmarks.set_bookmark(stream, bookmark);
        }

        self.stats.set_duration(start.elapsed().as_millis() as u64);

        if bookmarks.is_empty() {
            warn!("No streams were synced, state not written");
            return Ok(prior.clone());
        }

        let mut state = prior.clone();
        state.merge(&bookmarks);
        writer.write_state(&state.to_value())?;

        info!(
            streams = self.stats.streams_synced,
            records = self.stats.records_synced,
            pages = self.stats.pages_fetched,
            duration_ms = self.stats.duration_ms,
            "Sync complete"
        );

        Ok(state)
    }
}

/// Run a full sync with a fresh client built from `config`
pub async fn sync(
    config: &TapConfig,
    prior: &State,
    catalog: &Catalog,
    writer: &mut dyn MessageWriter,
) -> Result<State> {
    let mut engine = SyncEngine::from_config(config.clone())?;
    engine.run(catalog, prior, writer).await
}

#[cfg(test)]
mod tests;
