//! Hacker News collector.
//!
//! Reads the top story ids from the Firebase API and fetches the first
//! [`TOP_STORIES`] items. Stories without an outbound link point at their
//! discussion page; Ask HN style stories carry their HTML `text` as summary.

use super::{CollectionWindow, clamp_score, from_unix};
use crate::models::RawArticle;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use scraper::Html;
use serde::Deserialize;
use std::error::Error;
use tracing::{debug, info, instrument, warn};

const API_BASE: &str = "https://hacker-news.firebaseio.com/v0";
const ITEM_BASE: &str = "https://news.ycombinator.com/item?id=";

/// Stories fetched from the top list.
pub const TOP_STORIES: usize = 50;
/// Item requests in flight at once.
const FETCH_CONCURRENCY: usize = 10;

#[derive(Debug, Deserialize)]
struct HnItem {
    id: u64,
    title: Option<String>,
    url: Option<String>,
    text: Option<String>,
    time: Option<i64>,
    score: Option<i64>,
}

/// Collect top stories, keeping only those inside `window` when given.
#[instrument(level = "info", skip_all)]
pub async fn collect(
    client: &Client,
    window: Option<&CollectionWindow>,
) -> Result<Vec<RawArticle>, Box<dyn Error>> {
    let body = client
        .get(format!("{API_BASE}/topstories.json"))
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let ids: Vec<u64> = serde_json::from_str(&body)?;

    let articles: Vec<RawArticle> = stream::iter(ids.into_iter().take(TOP_STORIES))
        .map(|id| async move {
            match fetch_item(client, id).await {
                Ok(item) => item.and_then(into_raw),
                Err(e) => {
                    warn!(id, error = %e, "Failed to fetch HN story");
                    None
                }
            }
        })
        .buffered(FETCH_CONCURRENCY)
        .filter_map(|article| async move {
            article.filter(|a| window.is_none_or(|w| w.contains(a.published_at)))
        })
        .collect()
        .await;

    info!(count = articles.len(), "Collected Hacker News stories");
    Ok(articles)
}

async fn fetch_item(client: &Client, id: u64) -> Result<Option<HnItem>, Box<dyn Error>> {
    let body = client
        .get(format!("{API_BASE}/item/{id}.json"))
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    // Deleted items come back as `null`.
    let item: Option<HnItem> = serde_json::from_str(&body)?;
    debug!(id, found = item.is_some(), "Fetched HN item");
    Ok(item)
}

fn into_raw(item: HnItem) -> Option<RawArticle> {
    let title = item.title.filter(|t| !t.trim().is_empty())?;
    let published_at = item.time.and_then(from_unix).unwrap_or_else(Utc::now);
    let url = item
        .url
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| format!("{ITEM_BASE}{}", item.id));

    Some(RawArticle {
        id: format!("hn_{}", item.id),
        title,
        summary: item.text.as_deref().map(html_to_text).unwrap_or_default(),
        url,
        source: "HackerNews".to_string(),
        published_at,
        score: clamp_score(item.score),
    })
}

/// Flatten an HTML fragment into whitespace-normalized text.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
