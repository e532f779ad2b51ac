//! Relevance of an article to the reader's profile, and must-read selection.
//!
//! The score is additive and clamped to `1.0`:
//!
//! | Match | Weight |
//! |-------|--------|
//! | skill in title/summary, or equal to a tag | +0.3 each |
//! | interest in title/summary | +0.2 each |
//! | learning goal in title/summary | +0.4 each |
//! | popularity | `ln(score + 1) / 10` |
//!
//! All text matches are case-insensitive substring matches. Blank profile
//! entries are ignored.

use crate::models::{Article, UserProfile};
use tracing::debug;

pub const SKILL_WEIGHT: f64 = 0.3;
pub const INTEREST_WEIGHT: f64 = 0.2;
pub const LEARNING_GOAL_WEIGHT: f64 = 0.4;

/// Scores articles against one profile.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceScorer<'a> {
    profile: &'a UserProfile,
}

impl<'a> RelevanceScorer<'a> {
    pub fn new(profile: &'a UserProfile) -> Self {
        Self { profile }
    }

    /// Relevance in `[0.0, 1.0]`.
    pub fn score(&self, article: &Article) -> f64 {
        let title = article.title.to_lowercase();
        let summary = article.summary.to_lowercase();
        let mentions = |term: &str| title.contains(term) || summary.contains(term);

        let mut total = 0.0;

        for skill in terms(&self.profile.skills) {
            let tagged = article
                .tech_tags
                .iter()
                .any(|tag| tag.to_lowercase() == skill);
            if mentions(&skill) || tagged {
                total += SKILL_WEIGHT;
            }
        }

        for interest in terms(&self.profile.interests) {
            if mentions(&interest) {
                total += INTEREST_WEIGHT;
            }
        }

        for goal in terms(&self.profile.learning_goals) {
            if mentions(&goal) {
                total += LEARNING_GOAL_WEIGHT;
            }
        }

        total += popularity_boost(article.score);
        total.min(1.0)
    }

    /// Pick the `count` most relevant articles.
    ///
    /// Ordered by relevance, then origin score, both descending; remaining
    /// ties keep corpus order. The chosen articles get their
    /// `relevance_score` written back into `articles`; all others keep `0.0`.
    pub fn select_must_read(&self, articles: &mut [Article], count: usize) -> Vec<Article> {
        let scores: Vec<f64> = articles.iter().map(|a| self.score(a)).collect();

        let mut order: Vec<usize> = (0..articles.len()).collect();
        order.sort_by(|&a, &b| {
            scores[b]
                .total_cmp(&scores[a])
                .then_with(|| articles[b].score.cmp(&articles[a].score))
        });

        let selected: Vec<Article> = order
            .into_iter()
            .take(count)
            .map(|idx| {
                articles[idx].relevance_score = scores[idx];
                articles[idx].clone()
            })
            .collect();

        debug!(
            corpus = articles.len(),
            selected = selected.len(),
            top = selected.first().map(|a| a.relevance_score),
            "Selected must-read articles"
        );
        selected
    }
}

/// `ln(score + 1) / 10`, never negative.
pub fn popularity_boost(score: u32) -> f64 {
    (f64::from(score) + 1.0).ln() / 10.0
}

fn terms(values: &[String]) -> impl Iterator<Item = String> + '_ {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}
