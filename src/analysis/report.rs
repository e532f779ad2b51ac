//! Prose for the report: insights, recommendations and the weekly summary.
//!
//! Every text goes through [`TextGenerator::generate_or`] with a fixed local
//! fallback, so the report is complete even when no model is reachable.
//! Curated recommendations for known compound labels take precedence over
//! the model.

use super::trends::RankedTopic;
use super::vocabulary::Vocabulary;
use crate::api::AskAsync;
use crate::generate::TextGenerator;
use crate::models::{Article, TrendingTopic, UserProfile};
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use tracing::{info, instrument};

/// Recommendations generated for the strongest topics.
pub const DETAILED_RECOMMENDATIONS: usize = 3;

pub fn insight_fallback(label: &str, related: usize) -> String {
    format!("Growing interest in {label} with {related} related articles this week")
}

pub fn recommendation_fallback(label: &str) -> String {
    format!("Explore {label} through hands-on projects and real-world implementation")
}

pub fn detailed_recommendation_fallback(label: &str) -> String {
    format!("Deep dive: {label} (estimated 4-6 hours) - Focus on practical implementation")
}

pub fn summary_fallback(topics: &[TrendingTopic], article_count: usize) -> String {
    if topics.is_empty() {
        return format!(
            "This week's technology landscape showed no dominant trends. Total {article_count} articles analyzed from various sources."
        );
    }
    let names = topics.iter().take(3).map(|t| t.name.as_str()).join(", ");
    format!(
        "This week's technology landscape focused on {names}. Total {article_count} articles analyzed from various sources."
    )
}

pub struct ReportAssembler<'a, T> {
    generator: &'a TextGenerator<T>,
    vocabulary: &'a Vocabulary,
    profile: &'a UserProfile,
    concurrency: usize,
}

impl<'a, T> ReportAssembler<'a, T>
where
    T: AskAsync<Response = String>,
{
    pub fn new(
        generator: &'a TextGenerator<T>,
        vocabulary: &'a Vocabulary,
        profile: &'a UserProfile,
        concurrency: usize,
    ) -> Self {
        Self {
            generator,
            vocabulary,
            profile,
            concurrency: concurrency.max(1),
        }
    }

    /// Attach insight and recommendation to every ranked topic.
    ///
    /// At most `concurrency` prompts are in flight; topics come back in
    /// ranking order.
    #[instrument(level = "info", skip_all, fields(topics = ranked.len()))]
    pub async fn describe_topics(&self, ranked: Vec<RankedTopic>) -> Vec<TrendingTopic> {
        let topics: Vec<TrendingTopic> = stream::iter(ranked)
            .map(|topic| async move {
                let key_insight = self.key_insight(&topic.name, &topic.related_articles).await;
                let learning_recommendation = self.learning_recommendation(&topic.name).await;
                TrendingTopic {
                    name: topic.name,
                    mention_count: topic.mention_count,
                    key_insight,
                    learning_recommendation,
                    related_articles: topic.related_articles,
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        info!(count = topics.len(), "Described trending topics");
        topics
    }

    pub async fn key_insight(&self, label: &str, related: &[Article]) -> String {
        let articles = related
            .iter()
            .take(3)
            .map(|a| format!("- {}: {}", a.title, a.summary))
            .join("\n");
        let prompt = format!(
            "Based on these recent articles about {label}:\n{articles}\n\n\
             Generate a concise key insight (1-2 sentences) about the current trend or \
             development in {label}. Focus on what's happening now and why it matters."
        );
        self.generator
            .generate_or(&prompt, insight_fallback(label, related.len()))
            .await
    }

    pub async fn learning_recommendation(&self, label: &str) -> String {
        if let Some(curated) = self.vocabulary.curated_recommendation(label) {
            return curated.to_string();
        }

        let prompt = format!(
            "Given a user profile: Skills: {}, Interests: {}, Career Stage: {}\n\
             And trending technology: {label}\n\n\
             Suggest a specific, actionable weekend project or learning path (1 sentence) \
             for this engineer to skill up in {label}. Focus on hands-on implementation, \
             not theory.",
            self.profile.skills.join(", "),
            self.profile.interests.join(", "),
            self.profile.career_stage,
        );
        self.generator
            .generate_or(&prompt, recommendation_fallback(label))
            .await
    }

    /// One time-boxed recommendation for each of the first three topics.
    pub async fn detailed_recommendations(&self, topics: &[TrendingTopic]) -> Vec<String> {
        stream::iter(topics.iter().take(DETAILED_RECOMMENDATIONS))
            .map(|topic| self.detailed_recommendation(topic))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    async fn detailed_recommendation(&self, topic: &TrendingTopic) -> String {
        let prompt = format!(
            "User profile: Skills: {}, Learning Goals: {}, Career Stage: {}\n\
             Trending topic: {} ({} mentions)\n\
             Key insight: {}\n\n\
             Generate a specific weekly learning recommendation including:\n\
             - Focus area (be specific)\n\
             - Estimated time commitment\n\
             - Practical outcome\n\n\
             Format: 'Focus area: X (estimated Y hours) - Outcome description'",
            self.profile.skills.join(", "),
            self.profile.learning_goals.join(", "),
            self.profile.career_stage,
            topic.name,
            topic.mention_count,
            topic.key_insight,
        );
        self.generator
            .generate_or(&prompt, detailed_recommendation_fallback(&topic.name))
            .await
    }

    /// Weekly summary over the top three topics. With no topics the model is
    /// not asked at all.
    pub async fn weekly_summary(&self, topics: &[TrendingTopic], article_count: usize) -> String {
        let fallback = summary_fallback(topics, article_count);
        if topics.is_empty() {
            return fallback;
        }

        let trends = topics
            .iter()
            .take(3)
            .map(|t| format!("- {}: {}", t.name, t.key_insight))
            .join("\n");
        let prompt = format!(
            "Weekly technology summary based on {article_count} articles:\n\n\
             Top trends:\n{trends}\n\n\
             User interests: {}\n\n\
             Generate a concise weekly summary (2-3 sentences) highlighting the most \
             important technology developments this week and their potential impact.",
            self.profile.interests.join(", "),
        );
        self.generator.generate_or(&prompt, fallback).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::stubs::{Canned, Echo, Failing, InFlight};
    use crate::models::fixtures::{article, profile};

    fn ranked(name: &str, count: u32, related: usize) -> RankedTopic {
        RankedTopic {
            name: name.to_string(),
            mention_count: count,
            related_articles: (0..related)
                .map(|i| article(&format!("{name}{i}"), name, "", i as u32))
                .collect(),
        }
    }

    fn topic(name: &str) -> TrendingTopic {
        TrendingTopic {
            name: name.to_string(),
            mention_count: 3,
            key_insight: format!("{name} insight"),
            learning_recommendation: String::new(),
            related_articles: vec![article(name, name, "", 1)],
        }
    }

    #[tokio::test]
    async fn test_offline_topics_use_fallbacks() {
        let generator = TextGenerator::<Echo>::offline();
        let vocabulary = Vocabulary::default();
        let p = profile(&["Rust"], &[], &[]);
        let assembler = ReportAssembler::new(&generator, &vocabulary, &p, 4);

        let topics = assembler
            .describe_topics(vec![ranked("kubernetes", 7, 2), ranked("AI Agents", 4, 1)])
            .await;

        assert_eq!(topics[0].name, "kubernetes");
        assert_eq!(
            topics[0].key_insight,
            "Growing interest in kubernetes with 2 related articles this week"
        );
        assert_eq!(
            topics[0].learning_recommendation,
            "Explore kubernetes through hands-on projects and real-world implementation"
        );
        assert!(topics[1].learning_recommendation.starts_with("Build a multi-agent system"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_topic_prompts_respect_concurrency() {
        let (backend, peak) = InFlight::new();
        let generator = TextGenerator::new(backend);
        let vocabulary = Vocabulary::default();
        let p = profile(&["Rust"], &[], &[]);
        let assembler = ReportAssembler::new(&generator, &vocabulary, &p, 2);

        let input = ["rust", "docker", "kubernetes", "python"]
            .into_iter()
            .map(|name| ranked(name, 5, 1))
            .collect();
        let topics = assembler.describe_topics(input).await;

        assert_eq!(topics.len(), 4);
        assert_eq!(peak.get(), 2);
    }

    #[tokio::test]
    async fn test_curated_recommendation_wins_over_model() {
        let generator = TextGenerator::new(Canned("model text"));
        let vocabulary = Vocabulary::default();
        let p = profile(&[], &[], &[]);
        let assembler = ReportAssembler::new(&generator, &vocabulary, &p, 1);

        let rec = assembler.learning_recommendation("RAG Systems").await;
        assert!(rec.starts_with("Create a production RAG pipeline"));
        assert_eq!(assembler.learning_recommendation("rust").await, "model text");
    }

    #[tokio::test]
    async fn test_topics_keep_ranking_order_with_concurrency() {
        let generator = TextGenerator::new(Echo);
        let vocabulary = Vocabulary::default();
        let p = profile(&[], &[], &[]);
        let assembler = ReportAssembler::new(&generator, &vocabulary, &p, 3);

        let names = ["a", "b", "c", "d", "e"];
        let topics = assembler
            .describe_topics(names.iter().map(|n| ranked(n, 5, 1)).collect())
            .await;
        let got: Vec<&str> = topics.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(got, names);
        assert_eq!(topics[2].key_insight, "echo: Based on these recent articles about c:");
    }

    #[tokio::test]
    async fn test_detailed_recommendations_top_three() {
        let generator = TextGenerator::new(Failing);
        let vocabulary = Vocabulary::default();
        let p = profile(&[], &[], &[]);
        let assembler = ReportAssembler::new(&generator, &vocabulary, &p, 2);

        let topics: Vec<TrendingTopic> = ["rust", "docker", "redis", "aws"].map(topic).to_vec();
        let recs = assembler.detailed_recommendations(&topics).await;
        assert_eq!(
            recs,
            vec![
                "Deep dive: rust (estimated 4-6 hours) - Focus on practical implementation",
                "Deep dive: docker (estimated 4-6 hours) - Focus on practical implementation",
                "Deep dive: redis (estimated 4-6 hours) - Focus on practical implementation",
            ]
        );
    }

    #[tokio::test]
    async fn test_summary_fallback_lists_three_names() {
        let generator = TextGenerator::<Echo>::offline();
        let vocabulary = Vocabulary::default();
        let p = profile(&[], &[], &[]);
        let assembler = ReportAssembler::new(&generator, &vocabulary, &p, 1);

        let topics: Vec<TrendingTopic> = ["rust", "docker", "redis", "aws"].map(topic).to_vec();
        assert_eq!(
            assembler.weekly_summary(&topics, 42).await,
            "This week's technology landscape focused on rust, docker, redis. Total 42 articles analyzed from various sources."
        );
    }

    #[tokio::test]
    async fn test_summary_without_topics_skips_model() {
        let generator = TextGenerator::new(Canned("should not be used"));
        let vocabulary = Vocabulary::default();
        let p = profile(&[], &[], &[]);
        let assembler = ReportAssembler::new(&generator, &vocabulary, &p, 1);

        assert_eq!(
            assembler.weekly_summary(&[], 9).await,
            "This week's technology landscape showed no dominant trends. Total 9 articles analyzed from various sources."
        );
    }

    #[tokio::test]
    async fn test_summary_uses_model_when_available() {
        let generator = TextGenerator::new(Canned("A busy week."));
        let vocabulary = Vocabulary::default();
        let p = profile(&[], &[], &[]);
        let assembler = ReportAssembler::new(&generator, &vocabulary, &p, 1);

        assert_eq!(assembler.weekly_summary(&[topic("rust")], 3).await, "A busy week.");
    }
}
