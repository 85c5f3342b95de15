// src/pipeline.rs
//! # Pipeline entry points
//!
//! `source → classify → hour filter → resample`. Filters are validated before
//! anything is fetched, so a call either returns a complete table or fails with a
//! [`PipelineError`] without emitting rows.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classify;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::generator;
use crate::ingest::fetch_or_empty;
use crate::ingest::types::{EventSource, FetchQuery};
use crate::records::CanonicalTable;
use crate::registry::Registry;
use crate::resample::resample;
use crate::topic::TopicDomain;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("pipeline_runs_total", "Pipeline invocations that passed validation.");
        describe_counter!("pipeline_raw_records_total", "Raw posts received from sources.");
        describe_counter!("pipeline_rows_total", "Canonical rows served after resampling.");
        describe_counter!("pipeline_source_errors_total", "Source fetch errors absorbed as empty input.");
        describe_histogram!("pipeline_run_ms", "End-to-end pipeline time in milliseconds.");
        describe_histogram!("ingest_fetch_ms", "Live source fetch time in milliseconds.");
    });
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Use the requested date window.
    #[default]
    Historical,
    /// Ignore the dates and use today from midnight up to now. This is wider
    /// than a last-hour window so sparse live feeds still fill the table.
    Realtime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFilters {
    pub topic: TopicDomain,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub start_hour: u32,
    pub end_hour: u32,
    pub mode: Mode,
}

impl DashboardFilters {
    /// Whole-day historical filters for one topic.
    pub fn new(topic: TopicDomain, from_date: NaiveDate, to_date: NaiveDate) -> Self {
        Self {
            topic,
            from_date,
            to_date,
            start_hour: 0,
            end_hour: 23,
            mode: Mode::Historical,
        }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.from_date > self.to_date {
            return Err(PipelineError::InvalidDateRange {
                from: self.from_date,
                to: self.to_date,
            });
        }
        if self.end_hour > 23 || self.start_hour > self.end_hour {
            return Err(PipelineError::InvalidHourRange {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        Ok(())
    }

    pub fn fetch_query(&self, max_results: u32) -> FetchQuery {
        let (from, to) = match self.mode {
            Mode::Historical => (Some(self.from_date), Some(self.to_date)),
            Mode::Realtime => (None, None),
        };
        FetchQuery {
            domain: self.topic,
            query: self.topic.default_query().to_string(),
            from,
            to,
            max_results,
        }
    }
}

pub struct Pipeline {
    registry: Arc<Registry>,
    source: Arc<dyn EventSource>,
    target_rows: usize,
    seed: u64,
    max_results: u32,
}

impl Pipeline {
    pub fn new(registry: Arc<Registry>, source: Arc<dyn EventSource>, cfg: &PipelineConfig) -> Self {
        Self {
            registry,
            source,
            target_rows: cfg.target_rows,
            seed: cfg.seed,
            max_results: cfg.max_results,
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Fetch, classify, filter and resample. An empty table means "no data".
    pub async fn run(&self, filters: &DashboardFilters) -> Result<CanonicalTable, PipelineError> {
        ensure_metrics_described();
        filters.validate()?;
        if self.target_rows == 0 {
            return Err(PipelineError::InvalidTarget);
        }

        let t0 = Instant::now();
        let raw = fetch_or_empty(self.source.as_ref(), &filters.fetch_query(self.max_results)).await?;
        let raw_count = raw.len();

        let mut table = classify::normalize(&self.registry, &raw, filters.topic);
        table.retain_hours(filters.start_hour, filters.end_hour);
        let filtered = table.len();
        let table = resample(table, self.target_rows, self.seed)?;

        counter!("pipeline_runs_total").increment(1);
        counter!("pipeline_rows_total").increment(table.len() as u64);
        histogram!("pipeline_run_ms").record(t0.elapsed().as_secs_f64() * 1000.0);
        info!(
            target: "pipeline",
            topic = %filters.topic,
            source = self.source.name(),
            raw = raw_count,
            filtered,
            rows = table.len(),
            "pipeline run complete"
        );
        Ok(table)
    }
}

/// Synchronous synthetic path: generate `count` posts, classify, resample to `target`.
pub fn synthesize_table(
    registry: &Registry,
    domain: TopicDomain,
    count: usize,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    target: usize,
    seed: u64,
) -> Result<CanonicalTable, PipelineError> {
    if target == 0 {
        return Err(PipelineError::InvalidTarget);
    }
    let raw = generator::generate(registry, domain, count, from, to)?;
    let table = classify::normalize(registry, &raw, domain);
    resample(table, target, seed)
}
