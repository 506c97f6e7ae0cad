//! CLI arguments

use clap::Parser;
use std::path::PathBuf;

/// Singer tap for the Stella Connect API
#[derive(Parser, Debug)]
#[command(name = "tap-stella")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long)]
    pub config: PathBuf,

    /// State file from a previous run (JSON)
    #[arg(short, long)]
    pub state: Option<PathBuf>,

    /// Catalog file selecting the streams to sync
    #[arg(long, visible_alias = "properties")]
    pub catalog: Option<PathBuf>,

    /// Print the catalog of available streams and exit
    #[arg(short, long)]
    pub discover: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
