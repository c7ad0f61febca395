//! Worker invocation: one external vision-crawl process per URL.
//!
//! The worker is an opaque collaborator invoked as
//! `<program> <args...> <url>`; it prints its result on stdout and
//! exits. Stdout/stderr are captured in full, the environment is
//! inherited, and there is no working-directory override.

use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

use crate::config::VcrawlConfig;

/// Errors from launching or collecting a single worker.
///
/// A non-zero worker exit is deliberately NOT an error here; the exit
/// status is surfaced in [`WorkerOutput`] and the batch keeps going.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// Worker executable missing, not executable, or otherwise unspawnable.
    #[error("cannot launch worker {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// Worker exceeded the configured time limit and was killed.
    #[error("worker timed out after {secs}s")]
    Timeout { secs: u64 },
    /// Failed while collecting the worker's output streams.
    #[error("cannot collect worker output: {0}")]
    Collect(#[from] std::io::Error),
}

/// Captured result of one worker invocation. Transient; lives for the
/// loop iteration that produced it.
#[derive(Debug, Clone)]
pub struct WorkerOutput {
    /// Captured stdout, lossy UTF-8. Emitted verbatim by the runner.
    pub stdout: String,
    /// Captured stderr, lossy UTF-8. Logged at debug level, never printed.
    pub stderr: String,
    /// Exit code; `None` when the worker was killed by a signal.
    pub status: Option<i32>,
}

impl WorkerOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// The external worker command: program, fixed arguments, and an
/// optional per-invocation time limit (default: wait forever).
#[derive(Debug, Clone)]
pub struct WorkerCommand {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl WorkerCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    pub fn from_config(cfg: &VcrawlConfig) -> Self {
        Self::new(cfg.worker_command.clone(), cfg.worker_args.clone())
            .with_timeout(cfg.timeout_secs.map(Duration::from_secs))
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Spawns the worker for `url` and blocks until it exits, capturing
    /// stdout, stderr, and the exit status.
    pub async fn invoke(&self, url: &str) -> Result<WorkerOutput, WorkerError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // When a timeout fires the collect future is dropped; this
            // kills the abandoned child instead of leaking it.
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| WorkerError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let collected = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| WorkerError::Timeout {
                    secs: limit.as_secs(),
                })??,
            None => child.wait_with_output().await?,
        };

        Ok(WorkerOutput {
            stdout: String::from_utf8_lossy(&collected.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&collected.stderr).into_owned(),
            status: collected.status.code(),
        })
    }
}
