//! Sequential batch loop: one worker invocation per manifest URL.
//!
//! Strictly ordered: URL N+1's worker is not started until URL N's has
//! terminated and its output has been emitted. One worker at a time,
//! no retries.

use anyhow::{Context, Result};
use std::io::Write;

use crate::config::SpawnPolicy;
use crate::worker::WorkerCommand;

/// Counters for one batch run. Logged at the end of a run, never
/// printed: the stdout surface stays progress notices + worker stdout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Workers that ran to completion (any exit status).
    pub processed: usize,
    /// Workers that could not be launched, or timed out.
    pub spawn_failures: usize,
    /// Completed workers that exited non-zero.
    pub nonzero_exits: usize,
}

/// Processes `urls` in order through `worker`, writing one progress
/// notice per URL followed by the worker's captured stdout to `out`.
///
/// A completed worker never stops the batch, whatever its exit status.
/// Launch failures and timeouts are governed by `on_spawn_error`:
/// warn-and-continue, or abort the remainder of the batch.
pub async fn process<W: Write>(
    worker: &WorkerCommand,
    urls: &[String],
    on_spawn_error: SpawnPolicy,
    out: &mut W,
) -> Result<RunReport> {
    let mut report = RunReport::default();

    for url in urls {
        writeln!(out, "Processing {url}").context("write progress notice")?;
        tracing::debug!(url = %url, "invoking worker");

        match worker.invoke(url).await {
            Ok(output) => {
                report.processed += 1;
                if !output.success() {
                    report.nonzero_exits += 1;
                    tracing::warn!(url = %url, status = ?output.status, "worker exited non-zero");
                }
                if !output.stderr.is_empty() {
                    tracing::debug!(url = %url, "worker stderr: {}", output.stderr.trim_end());
                }
                writeln!(out, "{}", output.stdout).context("write worker output")?;
            }
            Err(err) => {
                report.spawn_failures += 1;
                match on_spawn_error {
                    SpawnPolicy::Continue => {
                        tracing::warn!(url = %url, "worker invocation failed: {err:#}");
                    }
                    SpawnPolicy::Abort => {
                        return Err(anyhow::Error::new(err)
                            .context(format!("worker invocation failed for {url}")));
                    }
                }
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_worker() -> WorkerCommand {
        WorkerCommand::new("/bin/sh", vec!["-c".into(), "echo \"$0\"".into()])
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn emits_progress_and_output_in_order() {
        let batch = urls(&["http://a.example", "http://b.example", "http://c.example"]);
        let mut out = Vec::new();
        let report = process(&echo_worker(), &batch, SpawnPolicy::Continue, &mut out)
            .await
            .unwrap();

        let expected = "Processing http://a.example\nhttp://a.example\n\n\
                        Processing http://b.example\nhttp://b.example\n\n\
                        Processing http://c.example\nhttp://c.example\n\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert_eq!(report.processed, 3);
        assert_eq!(report.spawn_failures, 0);
        assert_eq!(report.nonzero_exits, 0);
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn progress_notice_keeps_url_unmodified() {
        let batch = urls(&["  HTTP://Mixed.Case/Path "]);
        let mut out = Vec::new();
        process(&echo_worker(), &batch, SpawnPolicy::Continue, &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Processing   HTTP://Mixed.Case/Path \n"));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn nonzero_exit_does_not_stop_the_batch() {
        let worker = WorkerCommand::new(
            "/bin/sh",
            vec!["-c".into(), "echo \"$0\"; exit 7".into()],
        );
        let batch = urls(&["http://a.example", "http://b.example"]);
        let mut out = Vec::new();
        let report = process(&worker, &batch, SpawnPolicy::Continue, &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Processing http://b.example"));
        assert!(text.contains("http://a.example\n"));
        assert_eq!(report.processed, 2);
        assert_eq!(report.nonzero_exits, 2);
    }

    #[tokio::test]
    async fn spawn_failure_continues_by_default() {
        let worker = WorkerCommand::new("/nonexistent/vision-crawl-worker", vec![]);
        let batch = urls(&["http://a.example", "http://b.example"]);
        let mut out = Vec::new();
        let report = process(&worker, &batch, SpawnPolicy::Continue, &mut out)
            .await
            .unwrap();

        // Progress notices still cover every URL; no output follows them.
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Processing http://a.example\nProcessing http://b.example\n"
        );
        assert_eq!(report.processed, 0);
        assert_eq!(report.spawn_failures, 2);
    }

    #[tokio::test]
    async fn spawn_failure_aborts_under_fail_fast() {
        let worker = WorkerCommand::new("/nonexistent/vision-crawl-worker", vec![]);
        let batch = urls(&["http://a.example", "http://b.example"]);
        let mut out = Vec::new();
        let err = process(&worker, &batch, SpawnPolicy::Abort, &mut out)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("http://a.example"));

        // The batch stopped at the first URL.
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Processing http://a.example\n");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn identical_runs_produce_identical_output() {
        let batch = urls(&["http://a.example", "http://b.example"]);
        let mut first = Vec::new();
        let mut second = Vec::new();
        process(&echo_worker(), &batch, SpawnPolicy::Continue, &mut first)
            .await
            .unwrap();
        process(&echo_worker(), &batch, SpawnPolicy::Continue, &mut second)
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let mut out = Vec::new();
        let report = process(&echo_worker(), &[], SpawnPolicy::Continue, &mut out)
            .await
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(report, RunReport::default());
    }
}
