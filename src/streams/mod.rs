//! Stream sync drivers
//!
//! One driver per supported stream. A driver announces the stream's schema,
//! walks the API with the [`Paginator`](crate::pagination::Paginator),
//! normalizes each page, emits the records and reports the bookmark to
//! resume from next time.
//!
//! | stream     | path      | normalization                         |
//! |------------|-----------|---------------------------------------|
//! | `qa`       | `v2/qa`   | `score`, `scorecard.archived_at`      |
//! | `feedback` | `v2/data` | none                                  |

mod driver;
mod kind;
mod normalize;

pub use driver::{sync_feedback, sync_qa, sync_stream, StreamSummary, SyncContext};
pub use kind::StreamKind;
pub use normalize::{normalize_archived_at, normalize_qa_record, normalize_score};
