//! tap-stella CLI
//!
//! Singer tap entry point

use clap::Parser;
use tap_stella::cli::{Cli, Runner};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // stdout carries the Singer stream, so logs go to stderr
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        tracing::error!(error = %e, "Sync failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
