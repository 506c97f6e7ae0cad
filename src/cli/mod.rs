//! CLI module
//!
//! Command-line interface of the tap.
//!
//! # Modes
//!
//! - `--discover` - Print the catalog of available streams
//! - default - Sync the selected streams, emitting Singer messages on stdout

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
