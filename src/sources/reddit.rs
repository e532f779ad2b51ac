//! Reddit collector using the public `hot.json` listings.

use super::{CollectionWindow, clamp_score};
use crate::models::RawArticle;
use chrono::DateTime;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use tracing::{info, instrument, warn};

/// Posts requested per subreddit.
pub const LISTING_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    id: String,
    title: Option<String>,
    selftext: Option<String>,
    url: Option<String>,
    score: Option<i64>,
    created_utc: Option<f64>,
}

/// Collect hot posts of every subreddit, one after the other.
///
/// A failing subreddit is logged and skipped.
#[instrument(level = "info", skip_all, fields(subreddits = subreddits.len()))]
pub async fn collect(
    client: &Client,
    subreddits: &[String],
    window: Option<&CollectionWindow>,
) -> Vec<RawArticle> {
    let per_subreddit: Vec<Vec<RawArticle>> = stream::iter(subreddits)
        .then(|subreddit| async move {
            match fetch_listing(client, subreddit).await {
                Ok(body) => match parse_listing(&body, subreddit, window) {
                    Ok(posts) => posts,
                    Err(e) => {
                        warn!(%subreddit, error = %e, "Unparseable Reddit listing");
                        Vec::new()
                    }
                },
                Err(e) => {
                    warn!(%subreddit, error = %e, "Failed to fetch Reddit listing");
                    Vec::new()
                }
            }
        })
        .collect()
        .await;

    let posts: Vec<RawArticle> = per_subreddit.into_iter().flatten().collect();
    info!(count = posts.len(), "Collected Reddit posts");
    posts
}

async fn fetch_listing(client: &Client, subreddit: &str) -> Result<String, Box<dyn Error>> {
    let url = format!("https://www.reddit.com/r/{subreddit}/hot.json?limit={LISTING_LIMIT}");
    let body = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body)
}

/// Posts of one listing that have a url and a creation time inside `window`.
pub fn parse_listing(
    body: &str,
    subreddit: &str,
    window: Option<&CollectionWindow>,
) -> Result<Vec<RawArticle>, serde_json::Error> {
    let listing: Listing = serde_json::from_str(body)?;

    let posts = listing
        .data
        .children
        .into_iter()
        .filter_map(|child| {
            let post = child.data;
            let published_at = DateTime::from_timestamp(post.created_utc? as i64, 0)?;
            let url = post.url.filter(|u| !u.is_empty())?;
            if window.is_some_and(|w| !w.contains(published_at)) {
                return None;
            }
            Some(RawArticle {
                id: format!("reddit_{}", post.id),
                title: post.title.unwrap_or_default(),
                summary: post.selftext.unwrap_or_default(),
                url,
                source: format!("Reddit-{subreddit}"),
                published_at,
                score: clamp_score(post.score),
            })
        })
        .collect();
    Ok(posts)
}
