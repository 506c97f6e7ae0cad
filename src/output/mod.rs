//! Output module
//!
//! Emits the Singer message stream on stdout.
//!
//! # Overview
//!
//! - [`Message`] - `SCHEMA`, `RECORD` and `STATE` messages
//! - [`MessageWriter`] - the emission interface the sync drivers call
//! - [`JsonLinesWriter`] - one JSON message per line to any `io::Write`
//! - [`MemoryWriter`] - collects messages in memory

mod messages;
mod writer;

pub use messages::Message;
pub use writer::{JsonLinesWriter, MemoryWriter, MessageWriter};
