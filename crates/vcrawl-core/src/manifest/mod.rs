//! Manifest loading: ordered URL list from the first column of a CSV file.
//!
//! Every row is a data row (no header detection), only field 0 is read,
//! and file order is preserved. The URL string itself is never validated
//! on the load path; `inspect` offers advisory diagnostics only.

mod parse;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::RowPolicy;

/// Errors raised while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file missing or unreadable. Fatal; raised before any
    /// worker is invoked.
    #[error("cannot read manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A row with no first column, under [`RowPolicy::Abort`].
    #[error("manifest row {line} has no first column")]
    EmptyRow { line: usize },
}

/// Loads the ordered URL list from `path`.
///
/// Rows with no first column (blank lines) are handled per `row_policy`:
/// skipped with a warning, or the whole load fails with
/// [`ManifestError::EmptyRow`] carrying the 1-based line number.
pub fn load(path: &Path, row_policy: RowPolicy) -> Result<Vec<String>, ManifestError> {
    let data = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut urls = Vec::new();
    for (idx, line) in data.lines().enumerate() {
        match parse::first_field(line) {
            Some(url) => urls.push(url),
            None => match row_policy {
                RowPolicy::Skip => {
                    tracing::warn!("manifest row {} has no first column, skipping", idx + 1);
                }
                RowPolicy::Abort => return Err(ManifestError::EmptyRow { line: idx + 1 }),
            },
        }
    }
    Ok(urls)
}

/// Check-only view of a manifest, produced by [`inspect`].
#[derive(Debug, Clone, Default)]
pub struct ManifestReport {
    /// Usable URL entries, in file order.
    pub urls: Vec<String>,
    /// 1-based line numbers of rows with no first column.
    pub blank_rows: Vec<usize>,
    /// 1-based line numbers of entries that do not parse as absolute URLs.
    pub suspect_rows: Vec<usize>,
}

/// Parses a manifest without invoking anything, collecting diagnostics.
///
/// The run path never validates URLs; "not an absolute URL" here is
/// advisory, for `vcrawl check` output only.
pub fn inspect(path: &Path) -> Result<ManifestReport, ManifestError> {
    let data = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut report = ManifestReport::default();
    for (idx, line) in data.lines().enumerate() {
        match parse::first_field(line) {
            Some(url) => {
                if url::Url::parse(&url).is_err() {
                    report.suspect_rows.push(idx + 1);
                }
                report.urls.push(url);
            }
            None => report.blank_rows.push(idx + 1),
        }
    }
    Ok(report)
}
