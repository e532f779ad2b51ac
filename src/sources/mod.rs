//! Article collectors for the supported news sources.
//!
//! Each collector turns one upstream API into [`RawArticle`]s:
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Hacker News | [`hackernews`] | Firebase API | Top 50 stories, window-filtered |
//! | Reddit | [`reddit`] | `hot.json` listings | One listing per configured subreddit |
//! | NewsAPI | [`newsapi`] | `/v2/everything` | Requires an API key; capped at 30 |
//!
//! [`SourceCollector::collect_weekly`] runs the three concurrently and joins
//! them. A failing source is logged and contributes nothing; it never aborts
//! the collection.

pub mod hackernews;
pub mod newsapi;
pub mod reddit;

use crate::config::DataSources;
use crate::models::RawArticle;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use reqwest::Client;
use std::error::Error;
use std::time::Duration as StdDuration;
use tracing::{error, info, instrument};

pub const USER_AGENT: &str = "SkillRadar/1.0 (Technology Trend Analyzer)";

/// Build the shared HTTP client.
pub fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(StdDuration::from_secs(30))
        .build()
}

/// Sunday-to-Saturday week that articles are collected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CollectionWindow {
    /// The week (Sunday through Saturday) containing `day`.
    pub fn week_containing(day: NaiveDate) -> Self {
        let since_sunday = day.weekday().num_days_from_sunday();
        let start = day - Duration::days(i64::from(since_sunday));
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// Whether `ts` falls on any day of the window (UTC).
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        let day = ts.date_naive();
        day >= self.start && day <= self.end
    }

    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }
}

/// Unix seconds to UTC; `None` for out-of-range values.
pub(crate) fn from_unix(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Negative upstream scores count as zero.
pub(crate) fn clamp_score(score: Option<i64>) -> u32 {
    score
        .unwrap_or(0)
        .clamp(0, i64::from(u32::MAX))
        .try_into()
        .unwrap_or(0)
}

pub struct SourceCollector {
    client: Client,
    sources: DataSources,
    news_api_key: Option<String>,
    max_per_source: usize,
}

impl SourceCollector {
    pub fn new(
        client: Client,
        sources: DataSources,
        news_api_key: Option<String>,
        max_per_source: usize,
    ) -> Self {
        Self {
            client,
            sources,
            news_api_key,
            max_per_source,
        }
    }

    /// Collect from all enabled sources concurrently.
    #[instrument(level = "info", skip_all, fields(start = %window.start, end = %window.end))]
    pub async fn collect_weekly(&self, window: &CollectionWindow) -> Vec<RawArticle> {
        let (hn, reddit, news) = tokio::join!(
            self.hacker_news(Some(window)),
            self.reddit(Some(window)),
            self.news_api(),
        );

        info!(
            hacker_news = hn.len(),
            reddit = reddit.len(),
            news_api = news.len(),
            "Collected articles from sources"
        );
        [hn, reddit, news].into_iter().flatten().collect()
    }

    /// Hacker News stories, filtered to `window` when given.
    pub async fn hacker_news(&self, window: Option<&CollectionWindow>) -> Vec<RawArticle> {
        if !self.sources.hacker_news.enabled {
            return Vec::new();
        }
        let result = hackernews::collect(&self.client, window).await;
        self.capped("HackerNews", result)
    }

    /// Reddit posts from the configured subreddits, filtered to `window` when given.
    pub async fn reddit(&self, window: Option<&CollectionWindow>) -> Vec<RawArticle> {
        if !self.sources.reddit.enabled {
            return Vec::new();
        }
        let posts = reddit::collect(&self.client, &self.sources.reddit.subreddits, window).await;
        self.capped("Reddit", Ok(posts))
    }

    /// NewsAPI articles; nothing without an API key.
    pub async fn news_api(&self) -> Vec<RawArticle> {
        if !self.sources.news_api.enabled {
            return Vec::new();
        }
        let Some(key) = self.news_api_key.as_deref() else {
            info!("NewsAPI key not provided; skipping NewsAPI collection");
            return Vec::new();
        };
        let result = newsapi::collect(&self.client, key, Utc::now()).await;
        self.capped("NewsAPI", result)
    }

    fn capped(
        &self,
        source: &str,
        result: Result<Vec<RawArticle>, Box<dyn Error>>,
    ) -> Vec<RawArticle> {
        match result {
            Ok(mut articles) => {
                articles.truncate(self.max_per_source);
                articles
            }
            Err(e) => {
                error!(source, error = %e, "Source collection failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2025-06-11 is a Wednesday.
        let window = CollectionWindow::week_containing(date(2025, 6, 11));
        assert_eq!(window.start, date(2025, 6, 8));
        assert_eq!(window.end, date(2025, 6, 14));
    }

    #[test]
    fn test_sunday_is_its_own_week_start() {
        let window = CollectionWindow::week_containing(date(2025, 6, 8));
        assert_eq!(window.bounds(), (date(2025, 6, 8), date(2025, 6, 14)));
    }

    #[test]
    fn test_window_contains_whole_days() {
        let window = CollectionWindow::week_containing(date(2025, 6, 11));
        assert!(window.contains(Utc.with_ymd_and_hms(2025, 6, 8, 0, 0, 0).unwrap()));
        assert!(window.contains(Utc.with_ymd_and_hms(2025, 6, 14, 23, 59, 59).unwrap()));
        assert!(!window.contains(Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap()));
        assert!(!window.contains(Utc.with_ymd_and_hms(2025, 6, 7, 23, 59, 59).unwrap()));
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(None), 0);
        assert_eq!(clamp_score(Some(-4)), 0);
        assert_eq!(clamp_score(Some(120)), 120);
    }

    #[tokio::test]
    async fn test_disabled_sources_collect_nothing() {
        let mut sources = DataSources::default();
        sources.hacker_news.enabled = false;
        sources.reddit.enabled = false;
        sources.news_api.enabled = false;
        let collector = SourceCollector::new(Client::new(), sources, None, 30);

        let window = CollectionWindow::week_containing(date(2025, 6, 11));
        assert!(collector.collect_weekly(&window).await.is_empty());
    }

    #[tokio::test]
    async fn test_news_api_without_key_is_skipped() {
        let collector = SourceCollector::new(Client::new(), DataSources::default(), None, 30);
        assert!(collector.news_api().await.is_empty());
    }
}
