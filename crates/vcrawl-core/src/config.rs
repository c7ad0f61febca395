use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// What to do with a manifest row that has no first column (a blank line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Log a warning and move on to the next row.
    #[default]
    Skip,
    /// Fail the whole run before any worker is invoked.
    Abort,
}

/// What to do when the worker cannot be launched (missing binary, timeout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnPolicy {
    /// Log a warning and move on to the next URL.
    #[default]
    Continue,
    /// Abort the remainder of the batch.
    Abort,
}

/// Global configuration loaded from `~/.config/vcrawl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VcrawlConfig {
    /// Worker program invoked once per URL.
    pub worker_command: String,
    /// Arguments placed before the URL (the URL is always the last argument).
    pub worker_args: Vec<String>,
    /// Optional per-worker time limit in seconds. Absent = wait forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Policy for manifest rows with no first column.
    #[serde(default)]
    pub on_malformed_row: RowPolicy,
    /// Policy for worker launch failures.
    #[serde(default)]
    pub on_spawn_error: SpawnPolicy,
}

impl Default for VcrawlConfig {
    fn default() -> Self {
        Self {
            worker_command: "node".to_string(),
            worker_args: vec!["vision_crawl.js".to_string()],
            timeout_secs: None,
            on_malformed_row: RowPolicy::Skip,
            on_spawn_error: SpawnPolicy::Continue,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vcrawl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VcrawlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VcrawlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: VcrawlConfig = toml::from_str(&data)?;
    Ok(cfg)
}
