//! Pagination module
//!
//! Stella Connect pages by `sequence_id`: each request asks for records
//! `after` the highest id seen so far, and a page shorter than
//! [`MAX_PAGE_SIZE`] is the last one.
//!
//! # Overview
//!
//! [`Paginator`] pulls one page per call, so nothing is fetched until the
//! caller asks for it. It guards against an API that stops advancing the
//! cursor by never requesting the same URL twice.

mod paginator;

pub use paginator::{Paginator, AFTER_PARAM, MAX_PAGE_SIZE};
