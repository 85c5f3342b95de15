// src/ingest/synthetic.rs
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::generator;
use crate::ingest::types::{EventSource, FetchQuery};
use crate::records::RawRecord;
use crate::registry::Registry;

/// Event source backed by the synthetic generator; used when no live credentials exist.
pub struct SyntheticSource {
    registry: Arc<Registry>,
    volume: usize,
}

impl SyntheticSource {
    pub fn new(registry: Arc<Registry>, volume: usize) -> Self {
        Self { registry, volume }
    }
}

#[async_trait]
impl EventSource for SyntheticSource {
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<RawRecord>> {
        let registry = Arc::clone(&self.registry);
        let (domain, volume, from, to) = (query.domain, self.volume, query.from, query.to);

        // Large volumes take a while; keep them off the async workers.
        let records = tokio::task::spawn_blocking(move || {
            generator::generate(&registry, domain, volume, from, to)
        })
        .await
        .context("synthetic generation task")??;

        tracing::debug!(target: "ingest", %domain, count = records.len(), "synthesized posts");
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "synthetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::TopicDomain;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn yields_configured_volume() {
        let src = SyntheticSource::new(Arc::new(Registry::builtin()), 72);
        let mut q = FetchQuery::for_domain(TopicDomain::Cinema);
        q.from = NaiveDate::from_ymd_opt(2024, 3, 1);
        q.to = NaiveDate::from_ymd_opt(2024, 3, 3);
        let out = src.fetch(&q).await.unwrap();
        assert_eq!(out.len(), 72);
        assert!(out.iter().all(|r| r.movie.is_some()));
    }

    #[tokio::test]
    async fn reversed_window_is_an_error() {
        let src = SyntheticSource::new(Arc::new(Registry::builtin()), 10);
        let mut q = FetchQuery::for_domain(TopicDomain::Travel);
        q.from = NaiveDate::from_ymd_opt(2024, 3, 3);
        q.to = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert!(src.fetch(&q).await.is_err());
    }
}
