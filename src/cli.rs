//! Command-line interface definitions for SkillRadar.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Secrets and the LLM config path can also come from environment variables
//! (or a `.env` file).

use crate::outputs::ReportFormat;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the SkillRadar weekly trend report.
///
/// Values given here override the YAML application config.
///
/// # Examples
///
/// ```sh
/// # Weekly report with the default config and an LLM from ~/.config/aj
/// skill_radar
///
/// # Markdown and HTML only, without an LLM
/// skill_radar --format markdown --format html --offline
///
/// # Inspect what the sources return without analyzing
/// skill_radar --debug-sources
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML application config (defaults to ./skill_radar.yaml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory that report files and the index are written to
    #[arg(short, long, default_value = "reports")]
    pub output_dir: PathBuf,

    /// Output format; repeat for several. Defaults to the config's formats
    #[arg(short, long = "format", value_enum)]
    pub formats: Vec<ReportFormat>,

    /// Number of must-read articles
    #[arg(long)]
    pub must_read: Option<usize>,

    /// Path to the awful_aj LLM config.yaml
    #[arg(long, env = "AJ_CONFIG")]
    pub aj_config: Option<PathBuf>,

    /// awful_aj template used for every prompt
    #[arg(long, default_value = "skill_radar")]
    pub template: String,

    /// Skip the LLM and use deterministic fallback text
    #[arg(long)]
    pub offline: bool,

    /// Translate must-read titles and summaries (JA, ES, FR, DE, IT, PT, RU, KO, ZH, AR)
    #[arg(long, default_value = "None")]
    pub translate_to: String,

    /// NewsAPI key; NewsAPI is skipped without one
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,

    /// Overall budget in seconds for text generation
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,

    /// Print what each source returns and exit without analyzing
    #[arg(long)]
    pub debug_sources: bool,
}
