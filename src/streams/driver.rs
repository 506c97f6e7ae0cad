//! Stream sync drivers

use super::kind::StreamKind;
use crate::catalog::CatalogEntry;
use crate::config::TapConfig;
use crate::error::Result;
use crate::http::StellaClient;
use crate::output::MessageWriter;
use crate::pagination::{Paginator, AFTER_PARAM};
use crate::state::State;
use crate::types::Bookmark;
use futures::TryStreamExt;
use std::pin::pin;
use tracing::info;

/// Everything a driver needs besides the stream itself
#[derive(Debug, Clone, Copy)]
pub struct SyncContext<'a> {
    /// Shared API client
    pub client: &'a StellaClient,
    /// Run configuration (date filters)
    pub config: &'a TapConfig,
    /// State from the previous run
    pub state: &'a State,
}

/// Outcome of syncing one stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSummary {
    /// `tap_stream_id` of the stream
    pub stream: String,
    /// Bookmark to resume from next run
    pub bookmark: Bookmark,
    /// Records emitted
    pub records: usize,
    /// Pages fetched
    pub pages: usize,
}

/// Sync the QA stream
pub async fn sync_qa(
    ctx: SyncContext<'_>,
    entry: &CatalogEntry,
    writer: &mut dyn MessageWriter,
) -> Result<StreamSummary> {
    sync_stream(StreamKind::Qa, ctx, entry, writer).await
}

/// Sync the feedback stream
pub async fn sync_feedback(
    ctx: SyncContext<'_>,
    entry: &CatalogEntry,
    writer: &mut dyn MessageWriter,
) -> Result<StreamSummary> {
    sync_stream(StreamKind::Feedback, ctx, entry, writer).await
}

/// Sync one stream: schema first, then every page from the last bookmark on.
///
/// The schema is written even when the stream turns out to be empty. The
/// returned bookmark only moves when a non-empty page was seen, so an empty
/// run hands back the bookmark it started from.
pub async fn sync_stream(
    kind: StreamKind,
    ctx: SyncContext<'_>,
    entry: &CatalogEntry,
    writer: &mut dyn MessageWriter,
) -> Result<StreamSummary> {
    let stream = entry.tap_stream_id.as_str();
    writer.write_schema(stream, &entry.schema, &entry.primary_key())?;

    let start = ctx.state.bookmark(stream);
    info!(stream, bookmark = ?start, "Syncing stream");

    let mut params = vec![(AFTER_PARAM, start.map(|b| b.to_string()))];
    params.extend(ctx.config.date_filters());

    let mut pages = pin!(Paginator::new(ctx.client, kind.path(), &params)?.into_stream());

    let mut summary = StreamSummary {
        stream: stream.to_string(),
        bookmark: start,
        records: 0,
        pages: 0,
    };

    while let Some((cursor, mut page)) = pages.try_next().await? {
        summary.pages += 1;
        if page.is_empty() {
            continue;
        }

        page.iter_mut().for_each(|record| kind.normalize(record));
        summary.records += page.len();
        summary.bookmark = Some(cursor);
        writer.write_records(stream, page)?;
    }

    info!(
        stream,
        records = summary.records,
        pages = summary.pages,
        bookmark = ?summary.bookmark,
        "Finished syncing stream"
    );

    Ok(summary)
}
