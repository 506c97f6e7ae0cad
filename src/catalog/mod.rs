//! Catalog module
//!
//! Singer catalogs describe which streams exist and which of them a run
//! should sync. `--discover` prints the catalog built by [`discover`];
//! `--catalog` hands one back with the wanted streams marked `selected`.

mod discover;
mod types;

pub use discover::{discover, discover_stream};
pub use types::{Catalog, CatalogEntry, MetadataEntry};
