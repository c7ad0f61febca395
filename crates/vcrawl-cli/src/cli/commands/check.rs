//! `vcrawl check` – validate a manifest without running any worker.

use anyhow::Result;
use std::path::Path;
use vcrawl_core::manifest;

pub fn run_check(file: &Path) -> Result<()> {
    let report = manifest::inspect(file)?;
    println!("{}: {} url row(s)", file.display(), report.urls.len());
    if !report.blank_rows.is_empty() {
        println!(
            "  {} row(s) with no first column (skipped on run): lines {}",
            report.blank_rows.len(),
            join_lines(&report.blank_rows)
        );
    }
    if !report.suspect_rows.is_empty() {
        println!(
            "  {} entr(ies) not parseable as absolute URLs (still run as-is): lines {}",
            report.suspect_rows.len(),
            join_lines(&report.suspect_rows)
        );
    }
    Ok(())
}

fn join_lines(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
