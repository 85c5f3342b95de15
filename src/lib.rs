// src/lib.rs
// Public library surface for the server binary and integration tests.

pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod generator;
pub mod ingest;
pub mod insights;
pub mod metrics;
pub mod pipeline;
pub mod records;
pub mod registry;
pub mod resample;
pub mod topic;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::classify::normalize;
pub use crate::error::PipelineError;
pub use crate::generator::generate;
pub use crate::pipeline::{DashboardFilters, Mode, Pipeline};
pub use crate::records::{CanonicalRecord, CanonicalTable, RawRecord, RawTimestamp};
pub use crate::registry::Registry;
pub use crate::resample::resample;
pub use crate::topic::TopicDomain;
