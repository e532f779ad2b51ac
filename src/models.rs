//! Data models for collected articles, the reader profile and the weekly report.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawArticle`]: Provider-shaped record as returned by a source collector
//! - [`Article`]: Normalized, tagged article that the analysis works on
//! - [`UserProfile`]: The reader's skills, interests and learning goals
//! - [`TrendingTopic`]: A ranked keyword or compound trend with supporting articles
//! - [`TrendReport`]: The aggregate produced by one analysis run
//!
//! Serialized field names are camelCase so the JSON report keeps the stable
//! names downstream renderers and uploads expect (`weekStart`, `topTrends`, ...).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An article as returned by a source collector, before normalization.
///
/// Nothing is validated yet: title and url may be blank, and no tech tags
/// have been extracted.
#[derive(Debug, Clone)]
pub struct RawArticle {
    /// Source-qualified identifier, e.g. `hn_4242` or `reddit_abc123`.
    pub id: String,
    /// Headline as published.
    pub title: String,
    /// Description, self text or story text. Empty when the platform has none.
    pub summary: String,
    /// Link to the article (or the discussion when there is no outbound link).
    pub url: String,
    /// Human readable source label, e.g. `HackerNews` or `Reddit-rust`.
    pub source: String,
    /// Publication time.
    pub published_at: DateTime<Utc>,
    /// Upvotes/points on the origin platform; 0 when unavailable.
    pub score: u32,
}

/// A normalized article.
///
/// Invariant: `title` and `url` are non-empty. `tech_tags` holds vocabulary
/// terms without duplicates. `relevance_score` stays `0.0` unless the article
/// was picked as a must-read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub tech_tags: Vec<String>,
    pub score: u32,
    pub relevance_score: f64,
}

impl Article {
    /// Title and summary joined by a space, the text every matcher looks at.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }

    /// Host of the article url without a leading `www.`,
    /// e.g. `https://www.wired.com/story` -> `wired.com`.
    pub fn domain(&self) -> Option<String> {
        let parsed = url::Url::parse(&self.url).ok()?;
        let host = parsed.host_str()?;
        Some(host.strip_prefix("www.").unwrap_or(host).to_string())
    }
}

/// The reader the report is tailored to. Read-only input to the analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub career_stage: String,
    #[serde(default)]
    pub learning_goals: Vec<String>,
}

/// A trending keyword or compound trend.
///
/// `mention_count` is at least the minimum signal threshold (3 by default),
/// and `related_articles` holds 1 to 5 supporting articles, highest origin
/// score first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingTopic {
    pub name: String,
    pub mention_count: u32,
    pub key_insight: String,
    pub learning_recommendation: String,
    pub related_articles: Vec<Article>,
}

/// The weekly report. Built once by the analysis and only read afterwards.
///
/// `week_start`/`week_end` are the earliest and latest publication dates found
/// in the corpus, which can differ from the week that was requested from the
/// sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub top_trends: Vec<TrendingTopic>,
    pub must_read_articles: Vec<Article>,
    pub learning_recommendations: Vec<String>,
    pub tech_keyword_frequency: BTreeMap<String, u32>,
    pub weekly_summary: String,
}

impl TrendReport {
    /// Keyword frequencies sorted by count (descending), then keyword.
    pub fn top_keywords(&self, n: usize) -> Vec<(&str, u32)> {
        let mut keywords: Vec<(&str, u32)> = self
            .tech_keyword_frequency
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        keywords.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        keywords.truncate(n);
        keywords
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Builders shared by the unit tests of several modules.

    use super::*;
    use chrono::TimeZone;

    pub fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap()
    }

    pub fn article(id: &str, title: &str, summary: &str, score: u32) -> Article {
        Article {
            id: id.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            url: format!("https://example.com/{id}"),
            source: "test".to_string(),
            published_at: at(10),
            tech_tags: vec![],
            score,
            relevance_score: 0.0,
        }
    }

    pub fn tagged(id: &str, title: &str, summary: &str, score: u32, tags: &[&str]) -> Article {
        Article {
            tech_tags: tags.iter().map(|t| t.to_string()).collect(),
            ..article(id, title, summary, score)
        }
    }

    pub fn profile(skills: &[&str], interests: &[&str], goals: &[&str]) -> UserProfile {
        UserProfile {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            career_stage: "Senior".to_string(),
            learning_goals: goals.iter().map(|s| s.to_string()).collect(),
        }
    }
}
