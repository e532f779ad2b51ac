//! Running index of written reports.
//!
//! `index.md` in the output directory gets one entry per run, appended so
//! that several runs a week accumulate. The file is created with a heading
//! the first time.

use super::period;
use crate::models::TrendReport;
use chrono::{DateTime, Local};
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

pub const INDEX_FILE: &str = "index.md";
const HEADING: &str = "# SkillRadar Reports\n\n";

/// One index line linking the written report files by name.
pub fn entry(report: &TrendReport, generated_at: DateTime<Local>, files: &[PathBuf]) -> String {
    let links: Vec<String> = files
        .iter()
        .filter_map(|p| p.file_name())
        .map(|name| {
            let name = name.to_string_lossy();
            format!("[{name}](./{name})")
        })
        .collect();

    let mut line = format!(
        "- {} ({}, {} trends, {} must-reads)",
        generated_at.format("%Y-%m-%d %H:%M"),
        period(report.week_start, report.week_end),
        report.top_trends.len(),
        report.must_read_articles.len()
    );
    if !links.is_empty() {
        line.push_str(": ");
        line.push_str(&links.join(" · "));
    }
    line.push('\n');
    line
}

/// Append the entry for this run to `{output_dir}/index.md`.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn update_index(
    output_dir: &Path,
    report: &TrendReport,
    generated_at: DateTime<Local>,
    files: &[PathBuf],
) -> Result<PathBuf, Box<dyn Error>> {
    let index_path = output_dir.join(INDEX_FILE);
    let mut content = String::new();
    if fs::metadata(&index_path).await.is_err() {
        content.push_str(HEADING);
    }
    content.push_str(&entry(report, generated_at, files));

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&index_path)
        .await?;
    file.write_all(content.as_bytes()).await?;
    info!(path = %index_path.display(), "Updated report index");
    Ok(index_path)
}
