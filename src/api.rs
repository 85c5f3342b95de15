// src/api.rs
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::error::PipelineError;
use crate::insights::{self, MetricsHealth, NO_DATA};
use crate::pipeline::{DashboardFilters, Mode, Pipeline};
use crate::records::CanonicalRecord;
use crate::topic::TopicDomain;

/// Label reported for summaries produced by the rule-based engine.
pub const RULES_PROVIDER: &str = "rules";

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/dashboard", get(dashboard))
        .route("/api/insights", post(ai_insights))
        .route("/api/ai/insights", post(ai_insights))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Filters as they arrive over HTTP; the topic is parsed separately so an
/// unknown name maps to a descriptive 400.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FiltersIn {
    topic: String,
    from_date: NaiveDate,
    to_date: NaiveDate,
    #[serde(default)]
    start_hour: Option<u32>,
    #[serde(default)]
    end_hour: Option<u32>,
    #[serde(default)]
    mode: Option<Mode>,
}

impl FiltersIn {
    fn into_filters(self) -> Result<DashboardFilters, PipelineError> {
        let filters = DashboardFilters {
            topic: self.topic.parse::<TopicDomain>()?,
            from_date: self.from_date,
            to_date: self.to_date,
            start_hour: self.start_hour.unwrap_or(0),
            end_hour: self.end_hour.unwrap_or(23),
            mode: self.mode.unwrap_or_default(),
        };
        filters.validate()?;
        Ok(filters)
    }
}

pub struct ApiError(PipelineError);

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(target: "api", error = %self.0, "rejected request");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardSummary {
    insights: Option<String>,
    metrics_health: Option<MetricsHealth>,
}

#[derive(Serialize)]
struct DashboardResponse {
    topic: TopicDomain,
    filters: DashboardFilters,
    summary: DashboardSummary,
    rows: Vec<CanonicalRecord>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InsightsResponse {
    topic: TopicDomain,
    filters: DashboardFilters,
    insights: String,
    provider: Option<&'static str>,
    fallback: bool,
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn dashboard(
    State(state): State<AppState>,
    Query(q): Query<FiltersIn>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let filters = q.into_filters()?;
    let table = state.pipeline.run(&filters).await?;

    let summary = if table.is_empty() {
        DashboardSummary {
            insights: None,
            metrics_health: None,
        }
    } else {
        DashboardSummary {
            insights: Some(insights::summarize(&table)),
            metrics_health: Some(insights::metric_health(&table)),
        }
    };

    Ok(Json(DashboardResponse {
        topic: filters.topic,
        filters,
        summary,
        rows: table.into_records(),
    }))
}

async fn ai_insights(
    State(state): State<AppState>,
    Json(body): Json<FiltersIn>,
) -> Result<Json<InsightsResponse>, ApiError> {
    let filters = body.into_filters()?;
    let table = state.pipeline.run(&filters).await?;

    let (insights, provider, fallback) = if table.is_empty() {
        (NO_DATA.to_string(), None, true)
    } else {
        (insights::summarize(&table), Some(RULES_PROVIDER), false)
    };

    Ok(Json(InsightsResponse {
        topic: filters.topic,
        filters,
        insights,
        provider,
        fallback,
    }))
}
