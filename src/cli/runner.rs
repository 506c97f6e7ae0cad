//! CLI runner - executes commands

use crate::catalog::{discover, Catalog};
use crate::cli::commands::Cli;
use crate::config::TapConfig;
use crate::engine;
use crate::error::Result;
use crate::output::{JsonLinesWriter, MessageWriter};
use crate::state::State;
use std::io::Write;
use tracing::info;

/// CLI runner
#[derive(Debug)]
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the command, writing to stdout
    pub async fn run(&self) -> Result<()> {
        self.run_with(std::io::BufWriter::new(std::io::stdout())).await
    }

    /// Run the command, writing Singer output to `out`
    pub async fn run_with<W: Write>(&self, out: W) -> Result<()> {
        let config = TapConfig::from_file(&self.cli.config)?;
        if self.cli.discover {
            self.print_catalog(out)
        } else {
            self.sync(&config, out).await
        }
    }

    /// Print the catalog
    fn print_catalog<W: Write>(&self, mut out: W) -> Result<()> {
        let catalog = discover()?;
        serde_json::to_writer_pretty(&mut out, &catalog)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    /// Sync the selected streams
    async fn sync<W: Write>(&self, config: &TapConfig, out: W) -> Result<()> {
        let state = match &self.cli.state {
            Some(path) => State::from_file(path)?,
            None => State::new(),
        };
        let catalog = match &self.cli.catalog {
            Some(path) => Catalog::from_file(path)?,
            None => {
                info!("No catalog given, syncing every stream");
                discover()?.select_all()
            }
        };

        let mut writer = JsonLinesWriter::new(out);
        engine::sync(config, &state, &catalog, &mut writer).await?;
        writer.flush()
    }
}
