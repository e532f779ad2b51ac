//! Shapes provider records into tagged [`Article`]s.

use super::tagger::KeywordTagger;
use crate::models::{Article, RawArticle};
use tracing::debug;

/// Trim fields, drop records without a title or url, and attach tech tags.
pub fn normalize(raw: RawArticle, tagger: &KeywordTagger) -> Option<Article> {
    let title = raw.title.trim().to_string();
    let url = raw.url.trim().to_string();
    if title.is_empty() || url.is_empty() {
        debug!(id = %raw.id, source = %raw.source, "Dropping article without title or url");
        return None;
    }

    let summary = raw.summary.trim().to_string();
    let tech_tags = tagger.tag(&format!("{title} {summary}"));

    Some(Article {
        id: raw.id,
        title,
        summary,
        url,
        source: raw.source,
        published_at: raw.published_at,
        tech_tags,
        score: raw.score,
        relevance_score: 0.0,
    })
}

/// Normalize a batch, keeping input order.
pub fn normalize_all(raw: Vec<RawArticle>, tagger: &KeywordTagger) -> Vec<Article> {
    let before = raw.len();
    let articles: Vec<Article> = raw
        .into_iter()
        .filter_map(|r| normalize(r, tagger))
        .collect();
    debug!(before, after = articles.len(), "Normalized articles");
    articles
}
