//! The trend-analysis pipeline.
//!
//! [`TrendAnalyzer::analyze`] turns a collected corpus into a [`TrendReport`]:
//!
//! ```text
//! raw articles ─▶ normalize ─▶ deduplicate ─┬─▶ must-read selection ─┐
//!                                           └─▶ trend aggregation ───┴─▶ report prose ─▶ TrendReport
//! ```
//!
//! Normalization and deduplication are exposed separately so that collectors
//! can hand over provider records; `analyze` itself deduplicates again, which
//! is a no-op for an already clean corpus.

pub mod dedup;
pub mod normalize;
pub mod relevance;
pub mod report;
pub mod tagger;
pub mod trends;
pub mod vocabulary;

use crate::api::AskAsync;
use crate::generate::TextGenerator;
use crate::models::{Article, TrendReport, UserProfile};
use chrono::NaiveDate;
use relevance::RelevanceScorer;
use report::ReportAssembler;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, instrument, warn};
use trends::{TrendAggregator, TrendSettings};
use vocabulary::Vocabulary;

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("no articles to analyze: the corpus is empty")]
    EmptyCorpus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub trends: TrendSettings,
    /// Number of must-read articles.
    pub must_read_count: usize,
    /// Text-generation calls in flight at once.
    pub generation_concurrency: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            trends: TrendSettings::default(),
            must_read_count: 10,
            generation_concurrency: 4,
        }
    }
}

pub struct TrendAnalyzer<T> {
    vocabulary: Vocabulary,
    settings: AnalysisSettings,
    generator: TextGenerator<T>,
}

impl<T> TrendAnalyzer<T>
where
    T: AskAsync<Response = String>,
{
    pub fn new(vocabulary: Vocabulary, settings: AnalysisSettings, generator: TextGenerator<T>) -> Self {
        Self {
            vocabulary,
            settings,
            generator,
        }
    }

    pub fn generator(&self) -> &TextGenerator<T> {
        &self.generator
    }

    /// Build the weekly report.
    ///
    /// Fails only for an empty corpus. Text-generation problems end in
    /// fallback text.
    #[instrument(level = "info", skip_all, fields(articles = articles.len()))]
    pub async fn analyze(
        &self,
        articles: Vec<Article>,
        profile: &UserProfile,
    ) -> Result<TrendReport, AnalysisError> {
        let mut corpus = dedup::deduplicate(articles);
        let (week_start, week_end) = week_bounds(&corpus).ok_or(AnalysisError::EmptyCorpus)?;

        let must_read_articles = RelevanceScorer::new(profile)
            .select_must_read(&mut corpus, self.settings.must_read_count);

        let aggregator = TrendAggregator::new(self.vocabulary, self.settings.trends.clone());
        let (frequency, ranked) = aggregator.aggregate(&corpus);

        let assembler = ReportAssembler::new(
            &self.generator,
            &self.vocabulary,
            profile,
            self.settings.generation_concurrency,
        );
        let top_trends = assembler.describe_topics(ranked).await;
        let learning_recommendations = assembler.detailed_recommendations(&top_trends).await;
        let weekly_summary = assembler.weekly_summary(&top_trends, corpus.len()).await;

        info!(
            %week_start,
            %week_end,
            trends = top_trends.len(),
            must_read = must_read_articles.len(),
            keywords = frequency.len(),
            "Analysis complete"
        );

        Ok(TrendReport {
            week_start,
            week_end,
            top_trends,
            must_read_articles,
            learning_recommendations,
            tech_keyword_frequency: frequency.into_iter().collect::<BTreeMap<_, _>>(),
            weekly_summary,
        })
    }
}

/// Earliest and latest publication date (UTC) in the corpus.
pub fn week_bounds(articles: &[Article]) -> Option<(NaiveDate, NaiveDate)> {
    let start = articles.iter().map(|a| a.published_at).min()?;
    let end = articles.iter().map(|a| a.published_at).max()?;
    Some((start.date_naive(), end.date_naive()))
}

/// Log when the report bounds differ from the requested collection window.
pub fn note_window_mismatch(report: &TrendReport, requested: (NaiveDate, NaiveDate)) {
    if (report.week_start, report.week_end) != requested {
        warn!(
            requested_start = %requested.0,
            requested_end = %requested.1,
            report_start = %report.week_start,
            report_end = %report.week_end,
            "Report week bounds follow article dates, not the requested window"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::stubs::{Canned, Echo, Failing, Slow};
    use crate::models::fixtures::{article, at, profile};
    use std::time::Duration;
    use tagger::KeywordTagger;

    fn corpus() -> Vec<Article> {
        let tagger = KeywordTagger::default();
        let mut articles: Vec<Article> = (0..5)
            .map(|i| article(&format!("k{i}"), &format!("Kubernetes operators part {i}"), "", 10 * i))
            .collect();
        articles.push(article("r1", "Rust on Azure", "serverless functions", 3));
        articles.push(article("ai1", "Agentic AI patterns", "", 40));
        articles.push(article("ai2", "Agentic AI at work", "", 2));
        articles.push(article("ai3", "More agentic ai", "", 1));
        for (i, a) in articles.iter_mut().enumerate() {
            a.published_at = at(8 + (i as u32 % 5));
            a.tech_tags = tagger.tag(&a.full_text());
        }
        articles
    }

    fn reader() -> UserProfile {
        profile(&["Kubernetes"], &["AI Agents"], &["Rust"])
    }

    fn analyzer<T: AskAsync<Response = String>>(generator: TextGenerator<T>) -> TrendAnalyzer<T> {
        TrendAnalyzer::new(Vocabulary::default(), AnalysisSettings::default(), generator)
    }

    #[tokio::test]
    async fn test_empty_corpus_fails_fast() {
        let result = analyzer(TextGenerator::<Echo>::offline())
            .analyze(vec![], &reader())
            .await;
        assert_eq!(result, Err(AnalysisError::EmptyCorpus));
    }

    #[tokio::test]
    async fn test_offline_report_is_complete() {
        let report = analyzer(TextGenerator::<Echo>::offline())
            .analyze(corpus(), &reader())
            .await
            .unwrap();

        assert_eq!(report.week_start, at(8).date_naive());
        assert_eq!(report.week_end, at(12).date_naive());
        assert_eq!(report.must_read_articles.len(), 9);

        let k8s = report.top_trends.iter().find(|t| t.name == "kubernetes").unwrap();
        assert!(k8s.mention_count >= 5);
        assert!(k8s.key_insight.starts_with("Growing interest in kubernetes"));

        let agents = report.top_trends.iter().find(|t| t.name == "AI Agents");
        assert!(agents.is_none(), "variants never contain the label text literally");

        assert!(report.top_trends.len() <= 5);
        assert_eq!(report.learning_recommendations.len(), report.top_trends.len().min(3));
        assert!(report.weekly_summary.contains("Total 9 articles"));
        assert!(report.tech_keyword_frequency.values().all(|c| *c >= 3));
    }

    #[tokio::test]
    async fn test_must_reads_carry_relevance_into_topics() {
        let report = analyzer(TextGenerator::<Echo>::offline())
            .analyze(corpus(), &reader())
            .await
            .unwrap();

        let k8s = report.top_trends.iter().find(|t| t.name == "kubernetes").unwrap();
        assert!(k8s.related_articles.iter().all(|a| a.relevance_score > 0.0));
    }

    #[tokio::test]
    async fn test_analyze_is_idempotent() {
        let analyzer = analyzer(TextGenerator::new(Echo));
        let first = analyzer.analyze(corpus(), &reader()).await.unwrap();
        let second = analyzer.analyze(corpus(), &reader()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failing_generator_degrades_to_fallbacks() {
        let offline = analyzer(TextGenerator::<Failing>::offline())
            .analyze(corpus(), &reader())
            .await
            .unwrap();
        let failing = analyzer(TextGenerator::new(Failing))
            .analyze(corpus(), &reader())
            .await
            .unwrap();
        assert_eq!(offline, failing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_deadline_falls_back() {
        let generator = TextGenerator::new(Slow(Duration::from_secs(600)))
            .with_deadline(tokio::time::Instant::now() + Duration::from_secs(5));
        let report = analyzer(generator).analyze(corpus(), &reader()).await.unwrap();

        assert!(!report.top_trends.is_empty());
        for topic in &report.top_trends {
            assert!(topic.key_insight.starts_with("Growing interest in"));
        }
        assert!(report.weekly_summary.starts_with("This week's technology landscape"));
    }

    #[tokio::test]
    async fn test_generated_text_is_used() {
        let report = analyzer(TextGenerator::new(Canned("Generated.")))
            .analyze(corpus(), &reader())
            .await
            .unwrap();
        assert_eq!(report.weekly_summary, "Generated.");
        assert!(report.top_trends.iter().all(|t| t.key_insight == "Generated."));
    }

    #[tokio::test]
    async fn test_duplicates_are_collapsed_before_analysis() {
        let mut articles = corpus();
        let mut dup = articles[0].clone();
        dup.id = "dup".into();
        dup.score = 1000;
        articles.push(dup);

        let report = analyzer(TextGenerator::<Echo>::offline())
            .analyze(articles, &reader())
            .await
            .unwrap();
        assert!(report.weekly_summary.contains("Total 9 articles"));
        assert!(report.must_read_articles.iter().any(|a| a.id == "dup"));
        assert!(report.must_read_articles.iter().all(|a| a.id != "k0"));
    }

    #[test]
    fn test_week_bounds() {
        assert_eq!(week_bounds(&[]), None);
        let mut a = article("a", "A", "", 1);
        a.published_at = at(14);
        let mut b = article("b", "B", "", 1);
        b.published_at = at(9);
        assert_eq!(
            week_bounds(&[a, b]),
            Some((at(9).date_naive(), at(14).date_naive()))
        );
    }
}
