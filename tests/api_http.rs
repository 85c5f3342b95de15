// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /api/dashboard  (rows resampled to the configured target)
// - POST /api/insights
// - POST /api/ai/insights (alias)
// - empty source: null summary, fallback insights
// - 400s for unknown topics and inverted hour ranges

use std::sync::Arc;

use serde_json::json;
use serde_json::Value as Json;
use shuttle_axum::axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use social_trends_analyzer::api::{self, AppState};
use social_trends_analyzer::config::PipelineConfig;
use social_trends_analyzer::ingest::synthetic::SyntheticSource;
use social_trends_analyzer::ingest::types::{EventSource, FetchQuery};
use social_trends_analyzer::insights::NO_DATA;
use social_trends_analyzer::{Pipeline, RawRecord, Registry};

const BODY_LIMIT: usize = 8 * 1024 * 1024;
const TARGET: usize = 60;

/// Router over the synthetic source with a small target.
fn test_router() -> Router {
    let registry = Arc::new(Registry::builtin());
    let cfg = PipelineConfig {
        target_rows: TARGET,
        synthetic_volume: 48,
        ..PipelineConfig::default()
    };
    let source = Arc::new(SyntheticSource::new(Arc::clone(&registry), cfg.synthetic_volume));
    api::router(AppState::new(Pipeline::new(registry, source, &cfg)))
}

/// Source that never has posts; `fail` makes it error like a dead network.
struct EmptySource {
    fail: bool,
}

#[async_trait::async_trait]
impl EventSource for EmptySource {
    async fn fetch(&self, _query: &FetchQuery) -> anyhow::Result<Vec<RawRecord>> {
        if self.fail {
            anyhow::bail!("upstream unavailable");
        }
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "empty"
    }
}

fn empty_router(fail: bool) -> Router {
    let registry = Arc::new(Registry::builtin());
    let cfg = PipelineConfig {
        target_rows: TARGET,
        ..PipelineConfig::default()
    };
    let source = Arc::new(EmptySource { fail });
    api::router(AppState::new(Pipeline::new(registry, source, &cfg)))
}

fn insights_request(uri: &str, payload: &Json) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn json_body(resp: axum::response::Response) -> Json {
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_reports_service_name() {
    let resp = test_router()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let v = json_body(resp).await;
    assert_eq!(v["status"], "ok");
    assert_eq!(v["service"], "social-trends-analyzer");
}

#[tokio::test]
async fn dashboard_returns_target_rows_with_canonical_columns() {
    let uri = "/api/dashboard?topic=Politics&fromDate=2024-01-01&toDate=2024-01-02";
    let resp = test_router()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .expect("oneshot /api/dashboard");
    assert_eq!(resp.status(), StatusCode::OK);

    let v = json_body(resp).await;
    assert_eq!(v["topic"], "politics");
    assert_eq!(v["filters"]["startHour"], 0);
    assert_eq!(v["filters"]["endHour"], 23);

    let rows = v["rows"].as_array().expect("rows array");
    assert_eq!(rows.len(), TARGET);
    for row in rows {
        for col in ["Text", "Likes", "Retweets", "Engagement", "Hour", "Party", "Politician", "State"] {
            assert!(row.get(col).is_some(), "missing {col} in {row}");
        }
        let likes = row["Likes"].as_u64().unwrap();
        let rts = row["Retweets"].as_u64().unwrap();
        assert_eq!(row["Engagement"].as_u64().unwrap(), likes + rts);
    }

    let summary = &v["summary"];
    assert!(summary["insights"].as_str().unwrap().contains("Most Discussed Party"));
    assert!(summary["metricsHealth"]["timerange"].is_string());
}

#[tokio::test]
async fn dashboard_hour_filter_is_respected() {
    let uri = "/api/dashboard?topic=travel&fromDate=2024-01-01&toDate=2024-01-01&startHour=18&endHour=20";
    let resp = test_router()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let v = json_body(resp).await;
    let rows = v["rows"].as_array().unwrap();
    assert_eq!(rows.len(), TARGET);
    assert!(rows
        .iter()
        .all(|r| (18..=20).contains(&r["Hour"].as_u64().unwrap())));
}

#[tokio::test]
async fn unknown_topic_is_a_400() {
    let uri = "/api/dashboard?topic=gardening&fromDate=2024-01-01&toDate=2024-01-01";
    let resp = test_router()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let v = json_body(resp).await;
    assert!(v["error"].as_str().unwrap().contains("gardening"));
}

#[tokio::test]
async fn inverted_hours_are_a_400() {
    let payload = json!({
        "topic": "sports",
        "fromDate": "2024-01-01",
        "toDate": "2024-01-01",
        "startHour": 15,
        "endHour": 3
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/insights")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn insights_uses_rule_engine() {
    let payload = json!({
        "topic": "cinema",
        "fromDate": "2024-01-01",
        "toDate": "2024-01-01",
        "mode": "historical"
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/insights")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let v = json_body(resp).await;
    assert_eq!(v["provider"], "rules");
    assert_eq!(v["fallback"], false);
    let text = v["insights"].as_str().unwrap();
    assert!(text.contains("Most Discussed Movie"), "{text}");
    assert!(text.contains("Peak Activity Time"), "{text}");
}

#[tokio::test]
async fn ai_insights_alias_serves_the_same_handler() {
    let payload = json!({ "topic": "travel", "fromDate": "2024-01-01", "toDate": "2024-01-01" });
    let resp = test_router()
        .oneshot(insights_request("/api/ai/insights", &payload))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let v = json_body(resp).await;
    assert_eq!(v["topic"], "travel");
    assert_eq!(v["provider"], "rules");
}

#[tokio::test]
async fn empty_source_gives_null_dashboard_summary() {
    for fail in [false, true] {
        let uri = "/api/dashboard?topic=sports&fromDate=2024-01-01&toDate=2024-01-01";
        let resp = empty_router(fail)
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "fail={fail}");

        let v = json_body(resp).await;
        assert_eq!(v["rows"].as_array().unwrap().len(), 0, "fail={fail}");
        assert!(v["summary"]["insights"].is_null(), "fail={fail}");
        assert!(v["summary"]["metricsHealth"].is_null(), "fail={fail}");
    }
}

#[tokio::test]
async fn empty_source_gives_fallback_insights() {
    let payload = json!({ "topic": "politics", "fromDate": "2024-01-01", "toDate": "2024-01-01" });
    for fail in [false, true] {
        let resp = empty_router(fail)
            .oneshot(insights_request("/api/insights", &payload))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "fail={fail}");

        let v = json_body(resp).await;
        assert_eq!(v["insights"], NO_DATA);
        assert_eq!(v["fallback"], true);
        assert!(v["provider"].is_null());
    }
}

#[tokio::test]
async fn zero_synthetic_volume_is_a_400() {
    let registry = Arc::new(Registry::builtin());
    let cfg = PipelineConfig {
        target_rows: TARGET,
        synthetic_volume: 0,
        ..PipelineConfig::default()
    };
    let source = Arc::new(SyntheticSource::new(Arc::clone(&registry), 0));
    let app = api::router(AppState::new(Pipeline::new(registry, source, &cfg)));

    let uri = "/api/dashboard?topic=travel&fromDate=2024-01-01&toDate=2024-01-01";
    let resp = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let v = json_body(resp).await;
    assert!(v["error"].as_str().unwrap().contains("target count"));
}
