//! Trend aggregation: keyword frequency, compound trends and topic ranking.
//!
//! The pipeline over a deduplicated corpus is:
//!
//! 1. [`TrendAggregator::keyword_frequency`] counts tags and trend words per
//!    article and keeps the strongest entries.
//! 2. Generic terms are dropped from the keyword side only; they stay in the
//!    frequency map that ends up in the report.
//! 3. [`TrendAggregator::detect_compound_trends`] counts articles matching any
//!    variant of each compound pattern.
//! 4. Both lists are merged and ranked by count. Sorting is stable: keywords
//!    precede compound labels, each in their own order, when counts tie.
//! 5. Each candidate gets its supporting articles; candidates without any are
//!    dropped before the final cut.

use super::vocabulary::Vocabulary;
use crate::models::Article;
use std::collections::HashMap;
use tracing::debug;

const WORD_SEPARATORS: &[char] = &[' ', ',', '.', '!', '?', ';', ':', '\n', '\r', '\t'];

/// Upper bound on the topics of one report.
pub const MAX_TOPICS: usize = 5;

/// Thresholds and caps of the aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSettings {
    /// Minimum count for a keyword or compound trend to be kept.
    pub min_mentions: u32,
    /// Size cap of the keyword frequency map.
    pub max_keywords: usize,
    /// Non-generic keywords considered for ranking.
    pub max_keyword_candidates: usize,
    /// Ranked labels that get materialized.
    pub max_candidates: usize,
    /// Topics kept after zero-support candidates are dropped, at most [`MAX_TOPICS`].
    pub max_topics: usize,
    /// Supporting articles per topic.
    pub max_supporting: usize,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            min_mentions: 3,
            max_keywords: 50,
            max_keyword_candidates: 15,
            max_candidates: 10,
            max_topics: MAX_TOPICS,
            max_supporting: 5,
        }
    }
}

/// A ranked label with its supporting articles, before any prose is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTopic {
    pub name: String,
    pub mention_count: u32,
    pub related_articles: Vec<Article>,
}

#[derive(Debug, Clone)]
pub struct TrendAggregator {
    vocabulary: Vocabulary,
    settings: TrendSettings,
}

impl TrendAggregator {
    pub fn new(vocabulary: Vocabulary, settings: TrendSettings) -> Self {
        Self {
            vocabulary,
            settings,
        }
    }

    /// Keyword counts ordered by count descending, first-seen keyword first on ties.
    ///
    /// Every tag adds one (lower-cased). Trend words add one per field they
    /// appear in, so a word found in both title and summary counts twice.
    /// Entries under `min_mentions` are removed and the rest is capped at
    /// `max_keywords`.
    pub fn keyword_frequency(&self, articles: &[Article]) -> Vec<(String, u32)> {
        let mut counts = Counter::default();

        for article in articles {
            for tag in &article.tech_tags {
                counts.add(tag.to_lowercase(), 1);
            }
            for field in [&article.title, &article.summary] {
                for word in self.trend_words_in(field) {
                    counts.add(word, 1);
                }
            }
        }

        let mut ranked: Vec<(String, u32)> = counts
            .into_entries()
            .into_iter()
            .filter(|(_, count)| *count >= self.settings.min_mentions)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.settings.max_keywords);

        debug!(keywords = ranked.len(), "Computed keyword frequency");
        ranked
    }

    /// Compound labels with the number of distinct articles that mention any
    /// variant, in pattern table order. Only labels reaching `min_mentions`.
    pub fn detect_compound_trends(&self, articles: &[Article]) -> Vec<(String, u32)> {
        let texts: Vec<String> = articles
            .iter()
            .map(|a| a.full_text().to_lowercase())
            .collect();

        self.vocabulary
            .compound_patterns
            .iter()
            .filter_map(|pattern| {
                let matched = texts
                    .iter()
                    .filter(|text| {
                        pattern
                            .variants
                            .iter()
                            .any(|v| text.contains(&v.to_lowercase()))
                    })
                    .count() as u32;
                (matched >= self.settings.min_mentions)
                    .then(|| (pattern.label.to_string(), matched))
            })
            .collect()
    }

    /// Merge non-generic keywords with compound trends and keep the top
    /// `max_candidates` labels by count.
    ///
    /// `frequency` must be the output of [`Self::keyword_frequency`].
    pub fn rank_candidates(
        &self,
        frequency: &[(String, u32)],
        compounds: &[(String, u32)],
    ) -> Vec<(String, u32)> {
        let mut merged = Counter::default();

        for (keyword, count) in frequency
            .iter()
            .filter(|(k, _)| !self.vocabulary.is_generic(k))
            .take(self.settings.max_keyword_candidates)
        {
            merged.set(keyword.clone(), *count);
        }
        for (label, count) in compounds {
            merged.set(label.clone(), *count);
        }

        let mut ranked = merged.into_entries();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.settings.max_candidates);
        ranked
    }

    /// Articles supporting `label`, highest origin score first, at most
    /// `max_supporting`.
    ///
    /// An article supports a label when one of its tags equals the label or
    /// its title or summary contains it, all case-insensitive.
    pub fn supporting_articles(&self, label: &str, articles: &[Article]) -> Vec<Article> {
        let needle = label.to_lowercase();
        let mut related: Vec<&Article> = articles
            .iter()
            .filter(|a| {
                a.tech_tags.iter().any(|t| t.to_lowercase() == needle)
                    || a.title.to_lowercase().contains(&needle)
                    || a.summary.to_lowercase().contains(&needle)
            })
            .collect();
        related.sort_by(|a, b| b.score.cmp(&a.score));
        related
            .into_iter()
            .take(self.settings.max_supporting)
            .cloned()
            .collect()
    }

    /// Attach supporting articles to the ranked candidates, drop the ones
    /// without support and keep the first `max_topics` (never more than [`MAX_TOPICS`]).
    pub fn materialize(&self, candidates: &[(String, u32)], articles: &[Article]) -> Vec<RankedTopic> {
        let topics: Vec<RankedTopic> = candidates
            .iter()
            .filter_map(|(name, count)| {
                let related_articles = self.supporting_articles(name, articles);
                if related_articles.is_empty() {
                    debug!(label = %name, "Dropping candidate without supporting articles");
                    return None;
                }
                Some(RankedTopic {
                    name: name.clone(),
                    mention_count: *count,
                    related_articles,
                })
            })
            .take(self.settings.max_topics.min(MAX_TOPICS))
            .collect();

        debug!(
            candidates = candidates.len(),
            topics = topics.len(),
            "Materialized trending topics"
        );
        topics
    }

    /// Run the ranking end to end. Returns the keyword frequency (for the
    /// report) together with the top topics.
    pub fn aggregate(&self, articles: &[Article]) -> (Vec<(String, u32)>, Vec<RankedTopic>) {
        let frequency = self.keyword_frequency(articles);
        let compounds = self.detect_compound_trends(articles);
        let candidates = self.rank_candidates(&frequency, &compounds);
        let topics = self.materialize(&candidates, articles);
        (frequency, topics)
    }

    /// Distinct trend words of one field, in order of first appearance.
    fn trend_words_in(&self, text: &str) -> Vec<String> {
        let mut words: Vec<String> = Vec::new();
        for word in text
            .to_lowercase()
            .split(WORD_SEPARATORS)
            .filter(|w| w.chars().count() > 2)
        {
            if self.vocabulary.trend_words.contains(&word) && !words.iter().any(|w| w == word) {
                words.push(word.to_string());
            }
        }
        words
    }
}

impl Default for TrendAggregator {
    fn default() -> Self {
        Self::new(Vocabulary::default(), TrendSettings::default())
    }
}

/// Insertion-ordered counter.
#[derive(Default)]
struct Counter {
    entries: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl Counter {
    fn add(&mut self, key: String, n: u32) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += n,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, n));
            }
        }
    }

    /// Overwrite the count, keeping the original position of an existing key.
    fn set(&mut self, key: String, n: u32) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = n,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, n));
            }
        }
    }

    fn into_entries(self) -> Vec<(String, u32)> {
        self.entries
    }
}
