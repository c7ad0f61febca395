//! CLI for the VCrawl batch runner.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use vcrawl_core::config;

use commands::{run_batch, run_check, run_completions, run_man};

/// Top-level CLI for the VCrawl batch runner.
#[derive(Debug, Parser)]
#[command(name = "vcrawl")]
#[command(about = "VCrawl: batch front-end for the vision-crawl worker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Process a URL manifest: one worker invocation per row, in file order.
    Run {
        /// CSV manifest; the first column of every row is a URL.
        #[arg(default_value = "homepages.csv")]
        file: PathBuf,

        /// Worker program override. Replaces the configured command and
        /// its arguments; combine with --worker-arg as needed.
        #[arg(long, value_name = "PROGRAM")]
        worker: Option<String>,

        /// Worker argument placed before the URL (repeatable).
        #[arg(long = "worker-arg", value_name = "ARG", allow_hyphen_values = true)]
        worker_args: Vec<String>,

        /// Kill a worker that runs longer than N seconds (default: wait forever).
        #[arg(long, value_name = "N")]
        timeout_secs: Option<u64>,

        /// Abort the whole batch if a worker fails to launch or times out.
        #[arg(long)]
        fail_fast: bool,
    },

    /// Validate a manifest without invoking any worker.
    Check {
        /// CSV manifest to inspect.
        #[arg(default_value = "homepages.csv")]
        file: PathBuf,
    },

    /// Generate shell completions on stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page (roff) on stdout.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                file,
                worker,
                worker_args,
                timeout_secs,
                fail_fast,
            } => run_batch(&cfg, &file, worker, worker_args, timeout_secs, fail_fast).await?,
            CliCommand::Check { file } => run_check(&file)?,
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
