//! `vcrawl run` – process a URL manifest through the worker.

use anyhow::Result;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use vcrawl_core::config::{SpawnPolicy, VcrawlConfig};
use vcrawl_core::manifest;
use vcrawl_core::runner;
use vcrawl_core::worker::WorkerCommand;

pub async fn run_batch(
    cfg: &VcrawlConfig,
    file: &Path,
    worker: Option<String>,
    worker_args: Vec<String>,
    timeout_secs: Option<u64>,
    fail_fast: bool,
) -> Result<()> {
    let urls = manifest::load(file, cfg.on_malformed_row)?;
    tracing::info!("loaded {} url(s) from {}", urls.len(), file.display());

    // --worker replaces the configured command outright; --worker-arg
    // alone swaps only the argument list.
    let command = match (worker, worker_args.is_empty()) {
        (Some(program), _) => WorkerCommand::new(program, worker_args),
        (None, false) => WorkerCommand::new(cfg.worker_command.clone(), worker_args),
        (None, true) => WorkerCommand::from_config(cfg),
    };
    let timeout = timeout_secs.or(cfg.timeout_secs).map(Duration::from_secs);
    let command = command.with_timeout(timeout);

    let policy = if fail_fast {
        SpawnPolicy::Abort
    } else {
        cfg.on_spawn_error
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = runner::process(&command, &urls, policy, &mut out).await?;
    out.flush()?;

    tracing::info!(
        processed = report.processed,
        spawn_failures = report.spawn_failures,
        nonzero_exits = report.nonzero_exits,
        "batch finished"
    );
    Ok(())
}
