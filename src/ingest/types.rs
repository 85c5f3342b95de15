// src/ingest/types.rs
use anyhow::Result;
use chrono::NaiveDate;

use crate::records::RawRecord;
use crate::topic::TopicDomain;

/// What to fetch: a topic, a free-text query and an optional date window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    pub domain: TopicDomain,
    pub query: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub max_results: u32,
}

impl FetchQuery {
    pub fn for_domain(domain: TopicDomain) -> Self {
        Self {
            domain,
            query: domain.default_query().to_string(),
            from: None,
            to: None,
            max_results: 20,
        }
    }
}

/// Uniform source of raw posts (live API or synthetic).
#[async_trait::async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<RawRecord>>;
    fn name(&self) -> &'static str;
}
