//! Engine types
//!
//! Run statistics for the sync engine.

use crate::streams::StreamSummary;

/// Statistics from a sync operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Total records synced
    pub records_synced: usize,
    /// Total pages fetched
    pub pages_fetched: usize,
    /// Streams synced to completion
    pub streams_synced: usize,
    /// Selected streams the tap does not know
    pub streams_skipped: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finished stream
    pub fn add_stream(&mut self, summary: &StreamSummary) {
        self.streams_synced += 1;
        self.records_synced += summary.records;
        self.pages_fetched += summary.pages;
    }

    /// Add a skipped stream
    pub fn add_skipped(&mut self) {
        self.streams_skipped += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
