// src/ingest/twitter.rs
//! Live recent-search client (X/Twitter API v2).
//!
//! Only the fields the classifier needs are requested. Sex and age group are not
//! available from the API and stay empty.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::histogram;
use serde::Deserialize;

use crate::ingest::normalize_text;
use crate::ingest::types::{EventSource, FetchQuery};
use crate::records::{RawRecord, RawTimestamp, UserMeta};

pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
    #[serde(default)]
    includes: Option<Includes>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    text: String,
    created_at: Option<String>,
    author_id: Option<String>,
    public_metrics: Option<PublicMetrics>,
    entities: Option<Entities>,
}

#[derive(Debug, Deserialize)]
struct PublicMetrics {
    like_count: Option<u64>,
    retweet_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Entities {
    #[serde(default)]
    annotations: Vec<Annotation>,
}

#[derive(Debug, Deserialize)]
struct Annotation {
    #[serde(rename = "type")]
    kind: String,
    normalized_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Includes {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct User {
    id: String,
    name: Option<String>,
    location: Option<String>,
}

pub struct TwitterSource {
    client: reqwest::Client,
    bearer_token: String,
    base_url: String,
}

impl TwitterSource {
    pub fn new(bearer_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            bearer_token: bearer_token.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl EventSource for TwitterSource {
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<RawRecord>> {
        let t0 = std::time::Instant::now();
        let url = format!(
            "{}/2/tweets/search/recent",
            self.base_url.trim_end_matches('/')
        );
        // The API accepts 10..=100 results per page.
        let max_results = query.max_results.clamp(10, 100).to_string();
        let search = format!("{} -is:retweet lang:en", query.query);

        let body = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(&[
                ("query", search.as_str()),
                ("max_results", max_results.as_str()),
                ("tweet.fields", "created_at,entities,public_metrics,author_id"),
                ("expansions", "author_id"),
                ("user.fields", "name,location"),
            ])
            .send()
            .await
            .context("sending recent-search request")?
            .error_for_status()
            .context("recent-search returned an error status")?
            .text()
            .await
            .context("reading recent-search body")?;

        let records = parse_search_response(&body)?;
        histogram!("ingest_fetch_ms").record(t0.elapsed().as_secs_f64() * 1000.0);
        tracing::info!(
            target: "ingest",
            topic = %query.domain,
            count = records.len(),
            "fetched live posts"
        );
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "twitter"
    }
}

/// Convert a recent-search JSON body into raw posts.
pub fn parse_search_response(body: &str) -> Result<Vec<RawRecord>> {
    let resp: SearchResponse =
        serde_json::from_str(body).context("parsing recent-search json")?;

    let users: HashMap<&str, &User> = resp
        .includes
        .as_ref()
        .map(|inc| inc.users.iter().map(|u| (u.id.as_str(), u)).collect())
        .unwrap_or_default();

    let out = resp
        .data
        .iter()
        .map(|t| {
            let place = t
                .entities
                .as_ref()
                .and_then(|e| e.annotations.iter().find(|a| a.kind == "Place"))
                .and_then(|a| a.normalized_text.clone());
            let author = t.author_id.as_deref().and_then(|id| users.get(id));
            let metrics = t.public_metrics.as_ref();

            RawRecord {
                text: normalize_text(&t.text),
                location: place.clone(),
                likes: metrics.and_then(|m| m.like_count),
                retweets: metrics.and_then(|m| m.retweet_count),
                created_at: RawTimestamp::Text(t.created_at.clone().unwrap_or_default()),
                user: Some(UserMeta {
                    id: t.author_id.clone(),
                    name: author.and_then(|u| u.name.clone()),
                    sex: None,
                    age_group: None,
                    location_raw: author.and_then(|u| u.location.clone()).or(place),
                }),
                movie: None,
                industry: None,
            }
        })
        .collect();

    Ok(out)
}
