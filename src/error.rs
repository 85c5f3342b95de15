// src/error.rs
//! Configuration-level failures surfaced to pipeline callers.
//!
//! Per-record anomalies (bad timestamps, missing fields) never show up here;
//! they are absorbed with `"Unknown"`/`"Other"` defaults.

use chrono::{NaiveDate, NaiveDateTime};

use crate::topic::TopicDomain;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("unknown topic domain '{0}' (expected travel, politics, sports or cinema)")]
    UnknownTopic(String),

    #[error("target count must be at least 1")]
    InvalidTarget,

    #[error("fromDate {from} is after toDate {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    #[error("generation window is empty: start {start} is after end {end}")]
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("invalid hour range {start}..={end} (hours must satisfy 0 <= start <= end <= 23)")]
    InvalidHourRange { start: u32, end: u32 },

    #[error("record schema {found} does not match table domain {expected}")]
    SchemaMismatch {
        expected: TopicDomain,
        found: TopicDomain,
    },
}
