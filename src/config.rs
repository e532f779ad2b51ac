//! Application configuration loaded from YAML.
//!
//! Every section is optional; anything missing falls back to the built-in
//! defaults, which describe a senior cloud/AI engineer and enable all sources.
//!
//! ```yaml
//! user_profile:
//!   skills: [Rust, Kubernetes]
//!   interests: [Distributed Systems]
//!   career_stage: Senior
//!   learning_goals: [System Design]
//! data_sources:
//!   reddit:
//!     subreddits: [rust, programming]
//!   news_api:
//!     enabled: false
//! report_settings:
//!   must_read_count: 5
//!   output_formats: [console, markdown]
//! ```

use crate::analysis::AnalysisSettings;
use crate::analysis::trends::{MAX_TOPICS, TrendSettings};
use crate::models::UserProfile;
use crate::outputs::ReportFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "skill_radar.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub user_profile: UserProfile,
    pub data_sources: DataSources,
    pub report_settings: ReportSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    pub hacker_news: HackerNewsSource,
    pub reddit: RedditSource,
    pub news_api: NewsApiSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HackerNewsSource {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditSource {
    pub enabled: bool,
    pub subreddits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsApiSource {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub max_articles_per_source: usize,
    /// Clamped to 1..=5 when the analysis settings are built.
    pub top_trends_count: usize,
    pub must_read_count: usize,
    pub output_formats: Vec<ReportFormat>,
    /// Text-generation calls in flight at once.
    pub generation_concurrency: usize,
    /// Upper bound for one text-generation call.
    pub generation_timeout_secs: u64,
    /// Retries of a failed text-generation call.
    pub max_retries: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_profile: UserProfile {
                skills: strings(&[
                    "C#",
                    ".NET",
                    "Azure",
                    "Cloud Architecture",
                    "Machine Learning",
                    "DevOps",
                    "System Design",
                ]),
                interests: strings(&[
                    "AI/ML",
                    "LLM",
                    "Generative AI",
                    "Agentic AI",
                    "AI Agents",
                    "Cloud Engineering",
                    "Software Architecture",
                    "Platform Engineering",
                    "Distributed Systems",
                    "Backend Development",
                ]),
                career_stage: "Senior".to_string(),
                learning_goals: strings(&[
                    "Advanced System Design",
                    "AI Engineering",
                    "Cloud-Native Architecture",
                    "Leadership",
                    "Platform Engineering",
                ]),
            },
            data_sources: DataSources::default(),
            report_settings: ReportSettings::default(),
        }
    }
}

impl Default for HackerNewsSource {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for RedditSource {
    fn default() -> Self {
        Self {
            enabled: true,
            subreddits: strings(&[
                "programming",
                "MachineLearning",
                "dotnet",
                "azure",
                "devops",
                "softwarearchitecture",
                "artificial",
                "ChatGPT",
                "OpenAI",
                "LocalLLaMA",
                "singularity",
            ]),
        }
    }
}

impl Default for NewsApiSource {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            max_articles_per_source: 30,
            top_trends_count: 5,
            must_read_count: 10,
            output_formats: vec![
                ReportFormat::Console,
                ReportFormat::Markdown,
                ReportFormat::Html,
                ReportFormat::Json,
            ],
            generation_concurrency: 4,
            generation_timeout_secs: 60,
            max_retries: 2,
        }
    }
}

impl AppConfig {
    /// Load `path`, or [`DEFAULT_CONFIG_FILE`] when it exists, or the defaults.
    ///
    /// An explicitly given path must be readable.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    info!("No config file found; using built-in defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty map.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    pub fn analysis_settings(&self) -> AnalysisSettings {
        let report = &self.report_settings;
        AnalysisSettings {
            trends: TrendSettings {
                max_topics: report.top_trends_count.clamp(1, MAX_TOPICS),
                ..TrendSettings::default()
            },
            must_read_count: report.must_read_count,
            generation_concurrency: report.generation_concurrency.max(1),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
