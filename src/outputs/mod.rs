//! Report renderers and writers.
//!
//! # Submodules
//!
//! - [`console`]: Plain-text report printed to stdout
//! - [`markdown`]: Markdown report file
//! - [`html`]: Standalone HTML page
//! - [`json`]: Pretty-printed `TrendReport` for API consumption
//! - [`index`]: Running `index.md` of every report written
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── index.md
//! ├── skill_radar_report_20250614_080000.md
//! ├── skill_radar_report_20250614_080000.html
//! └── skill_radar_report_20250614_080000.json
//! ```

pub mod console;
pub mod html;
pub mod index;
pub mod json;
pub mod markdown;

use crate::models::{Article, TrendReport};
use crate::translate::Translations;
use chrono::{DateTime, Local, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Number of keywords shown in the buzz-word sections.
pub const BUZZ_WORDS: usize = 10;
/// Tags shown per must-read article.
pub const TAGS_PER_ARTICLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Console,
    Markdown,
    Html,
    Json,
}

impl ReportFormat {
    /// File extension, `None` for formats that are not written to disk.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            ReportFormat::Console => None,
            ReportFormat::Markdown => Some("md"),
            ReportFormat::Html => Some("html"),
            ReportFormat::Json => Some("json"),
        }
    }
}

/// Everything a renderer needs besides the report itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub generated_at: DateTime<Local>,
    pub translations: Option<&'a Translations>,
}

impl<'a> RenderContext<'a> {
    pub fn new(generated_at: DateTime<Local>) -> Self {
        Self {
            generated_at,
            translations: None,
        }
    }

    pub fn with_translations(mut self, translations: &'a Translations) -> Self {
        self.translations = Some(translations);
        self
    }

    fn generated_on(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// `Jun 8 - Jun 14, 2025`
pub fn period(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
}

/// Relevance as a whole percentage.
pub fn relevance_percent(article: &Article) -> String {
    format!("{:.0}", (article.relevance_score * 100.0).round())
}

/// File name without extension, e.g. `skill_radar_report_20250614_080000`.
pub fn report_stem(generated_at: DateTime<Local>) -> String {
    format!("skill_radar_report_{}", generated_at.format("%Y%m%d_%H%M%S"))
}

/// Render `report` in a file format; `None` for [`ReportFormat::Console`].
pub fn render(
    format: ReportFormat,
    report: &TrendReport,
    ctx: &RenderContext<'_>,
) -> Result<Option<String>, Box<dyn Error>> {
    let content = match format {
        ReportFormat::Console => return Ok(None),
        ReportFormat::Markdown => markdown::render(report, ctx),
        ReportFormat::Html => html::render(report, ctx).into_string(),
        ReportFormat::Json => json::render(report)?,
    };
    Ok(Some(content))
}

/// Write every file format in `formats` to `output_dir`.
///
/// Returns the written paths in the order of `formats`. Console output is
/// handled by the caller.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_reports(
    report: &TrendReport,
    formats: &[ReportFormat],
    output_dir: &Path,
    ctx: &RenderContext<'_>,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let stem = report_stem(ctx.generated_at);
    let mut written = Vec::new();

    for &format in formats {
        let (Some(ext), Some(content)) = (format.extension(), render(format, report, ctx)?) else {
            continue;
        };
        let path = output_dir.join(format!("{stem}.{ext}"));
        fs::write(&path, content).await?;
        info!(path = %path.display(), ?format, "Wrote report");
        written.push(path);
    }

    Ok(written)
}


#[cfg(test)]
mod tests {
    use super::sample::{generated_at, report};
    use super::*;

    #[test]
    fn test_period_format() {
        let r = report();
        assert_eq!(period(r.week_start, r.week_end), "Jun 8 - Jun 14, 2025");
    }

    #[test]
    fn test_report_stem() {
        assert_eq!(report_stem(generated_at()), "skill_radar_report_20250614_083000");
    }

    #[test]
    fn test_relevance_percent_rounds() {
        let mut a = report().must_read_articles.remove(0);
        assert_eq!(relevance_percent(&a), "85");
        a.relevance_score = 0.456;
        assert_eq!(relevance_percent(&a), "46");
    }

    #[test]
    fn test_console_has_no_file() {
        let ctx = RenderContext::new(generated_at());
        assert!(render(ReportFormat::Console, &report(), &ctx).unwrap().is_none());
        assert_eq!(ReportFormat::Console.extension(), None);
    }

    #[tokio::test]
    async fn test_write_reports_writes_file_formats() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RenderContext::new(generated_at());
        let formats = [
            ReportFormat::Console,
            ReportFormat::Markdown,
            ReportFormat::Json,
        ];

        let written = write_reports(&report(), &formats, dir.path(), &ctx)
            .await
            .unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "skill_radar_report_20250614_083000.md",
                "skill_radar_report_20250614_083000.json"
            ]
        );
        let md = std::fs::read_to_string(&written[0]).unwrap();
        assert!(md.starts_with("# Weekly Tech Trend Report"));
    }
}
