//! Collapses the same story collected from several sources.
//!
//! Two articles are duplicates when they share the url and the trimmed,
//! lower-cased title. Within a group the highest origin score wins; on equal
//! scores the first occurrence wins. Groups come out in order of their first
//! appearance, so the result only depends on the order of the input list.

use crate::models::Article;
use std::collections::HashMap;
use tracing::info;

/// Key used to group duplicates.
pub fn dedup_key(article: &Article) -> (String, String) {
    (article.url.clone(), article.title.trim().to_lowercase())
}

/// Remove duplicates. Never fails; empty input yields empty output.
pub fn deduplicate(articles: Vec<Article>) -> Vec<Article> {
    let before = articles.len();
    let mut slot_of: HashMap<(String, String), usize> = HashMap::new();
    let mut kept: Vec<Article> = Vec::with_capacity(before);

    for article in articles {
        match slot_of.get(&dedup_key(&article)) {
            Some(&slot) => {
                if article.score > kept[slot].score {
                    kept[slot] = article;
                }
            }
            None => {
                slot_of.insert(dedup_key(&article), kept.len());
                kept.push(article);
            }
        }
    }

    let removed = before - kept.len();
    if removed > 0 {
        info!(removed, retained = kept.len(), "Deduplication removed duplicates");
    }
    kept
}
