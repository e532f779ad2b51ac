//! NewsAPI collector.
//!
//! Runs a fixed list of technology queries against `/v2/everything`, first
//! restricted to a set of tech publications and, when that yields nothing,
//! with a category filter instead. URLs are de-duplicated across queries and
//! the result is capped at [`MAX_ARTICLES`].

use crate::models::RawArticle;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::error::Error;
use std::time::Duration as StdDuration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

const API_URL: &str = "https://newsapi.org/v2/everything";
const DOMAINS: &str =
    "techcrunch.com,arstechnica.com,theverge.com,wired.com,venturebeat.com,thenextweb.com";
const QUERY_DELAY: StdDuration = StdDuration::from_millis(200);

pub const MAX_ARTICLES: usize = 30;

pub const QUERIES: &[&str] = &[
    "AI OR \"artificial intelligence\" OR \"machine learning\"",
    "\"generative AI\" OR LLM OR \"language model\" OR ChatGPT OR Claude",
    "\"AI agent\" OR \"agentic AI\" OR \"multi-agent\" OR OpenAI OR Anthropic",
    "Azure OR AWS OR \"cloud computing\" OR \"platform engineering\"",
    "DevOps OR kubernetes OR serverless OR microservices",
    "\"software architecture\" OR \"system design\" OR \"distributed systems\"",
    "\".NET\" OR \"C#\" OR programming OR \"software development\"",
];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsArticle {
    source: Option<NewsSource>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct NewsSource {
    name: Option<String>,
}

/// Id derived from the first 8 bytes of the url's SHA-256 digest.
pub fn article_id(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    format!("newsapi_{}", hex::encode(&hasher.finalize()[..8]))
}

/// Search url for one query. `from` limits results to the last week.
pub fn search_url(query: &str, api_key: &str, from: &str, by_domain: bool) -> String {
    let (filter, page_size) = if by_domain {
        (format!("domains={DOMAINS}"), 15)
    } else {
        ("category=technology".to_string(), 10)
    };
    format!(
        "{API_URL}?q={}&{filter}&from={from}&sortBy=popularity&searchIn=title,description&apiKey={}&pageSize={page_size}",
        urlencoding::encode(query),
        urlencoding::encode(api_key),
    )
}

#[instrument(level = "info", skip_all)]
pub async fn collect(
    client: &Client,
    api_key: &str,
    now: DateTime<Utc>,
) -> Result<Vec<RawArticle>, Box<dyn Error>> {
    let from = (now - Duration::days(7)).format("%Y-%m-%d").to_string();
    let mut seen: HashSet<String> = HashSet::new();
    let mut articles: Vec<RawArticle> = Vec::new();

    for query in QUERIES {
        match search(client, query, api_key, &from).await {
            Ok(found) => {
                debug!(query, found = found.len(), "NewsAPI query answered");
                for article in found {
                    if seen.insert(article.url.clone()) {
                        articles.push(article);
                    }
                }
            }
            Err(e) => warn!(query, error = %e, "NewsAPI query failed"),
        }
        sleep(QUERY_DELAY).await;
    }

    articles.truncate(MAX_ARTICLES);
    info!(count = articles.len(), "Collected NewsAPI articles");
    Ok(articles)
}

async fn search(
    client: &Client,
    query: &str,
    api_key: &str,
    from: &str,
) -> Result<Vec<RawArticle>, Box<dyn Error>> {
    let found = fetch(client, &search_url(query, api_key, from, true)).await?;
    if !found.is_empty() {
        return Ok(found);
    }
    fetch(client, &search_url(query, api_key, from, false)).await
}

async fn fetch(client: &Client, url: &str) -> Result<Vec<RawArticle>, Box<dyn Error>> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(parse_response(&body)?)
}

/// Articles of one search response that have a url and a publication time.
pub fn parse_response(body: &str) -> Result<Vec<RawArticle>, serde_json::Error> {
    let response: SearchResponse = serde_json::from_str(body)?;
    let articles = response
        .articles
        .into_iter()
        .filter_map(|a| {
            let url = a.url.filter(|u| !u.is_empty())?;
            let published_at = a.published_at?;
            let name = a
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown".to_string());
            Some(RawArticle {
                id: article_id(&url),
                title: a.title.unwrap_or_default(),
                summary: a.description.unwrap_or_default(),
                url,
                source: format!("NewsAPI-{name}"),
                published_at,
                score: 0,
            })
        })
        .collect();
    Ok(articles)
}
