//! Sequence-id paginator

use crate::error::{Error, Result};
use crate::http::StellaClient;
use crate::query::set_query_parameters;
use crate::types::{sequence_id, JsonValue, Page, SEQUENCE_ID};
use futures::Stream;
use std::collections::HashSet;
use tracing::{debug, info};

/// A page with this many records may have a successor
pub const MAX_PAGE_SIZE: usize = 1000;

/// Query parameter carrying the exclusive lower bound on `sequence_id`
pub const AFTER_PARAM: &str = "after";

/// Walks a Stella Connect collection page by page.
///
/// Each call to [`next_page`](Self::next_page) yields the page together with
/// the highest `sequence_id` observed so far. The cursor starts at the
/// initial `after` value (or 0) and never decreases.
#[derive(Debug)]
pub struct Paginator<'a> {
    client: &'a StellaClient,
    next_url: Option<String>,
    requested: HashSet<String>,
    cursor: i64,
}

impl<'a> Paginator<'a> {
    /// Start paginating `path` with the given extra query parameters.
    ///
    /// Parameters with a `None` value are dropped.
    pub fn new(
        client: &'a StellaClient,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<Self> {
        let url = set_query_parameters(&client.build_url(path), params.iter().cloned())?;
        let cursor = params
            .iter()
            .find(|(key, _)| *key == AFTER_PARAM)
            .and_then(|(_, value)| value.as_deref())
            .and_then(|value| value.parse().ok())
            .unwrap_or(0);

        Ok(Self {
            client,
            next_url: Some(url),
            requested: HashSet::new(),
            cursor,
        })
    }

    /// Highest `sequence_id` seen so far
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Number of pages requested so far
    pub fn pages_requested(&self) -> usize {
        self.requested.len()
    }

    /// Fetch the next page, or `None` once pagination is finished
    pub async fn next_page(&mut self) -> Result<Option<(i64, Page)>> {
        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };

        if !self.requested.insert(url.clone()) {
            debug!(url = %url, "Cursor did not advance, stopping pagination");
            return Ok(None);
        }

        let page = into_page(&url, self.client.get(&url).await?)?;

        info!(
            url = %url,
            total_size = page.len(),
            page = self.requested.len(),
            "Stella Connect paging GET finished"
        );

        for record in &page {
            let id = sequence_id(record).ok_or_else(|| {
                Error::unexpected_response(&url, format!("record without integer {SEQUENCE_ID}"))
            })?;
            self.cursor = self.cursor.max(id);
        }

        if page.len() >= MAX_PAGE_SIZE {
            self.next_url = Some(set_query_parameters(
                &url,
                [(AFTER_PARAM, Some(self.cursor))],
            )?);
        }

        Ok(Some((self.cursor, page)))
    }

    /// Turn the paginator into a stream of `(cursor, page)` pairs
    pub fn into_stream(self) -> impl Stream<Item = Result<(i64, Page)>> + 'a {
        futures::stream::try_unfold(self, |mut pages| async move {
            Ok::<_, Error>(pages.next_page().await?.map(|item| (item, pages)))
        })
    }
}

fn into_page(url: &str, body: JsonValue) -> Result<Page> {
    match body {
        JsonValue::Array(records) => Ok(records),
        other => Err(Error::unexpected_response(
            url,
            format!("expected a JSON array, got {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
