//! Social Trends Analyzer: binary entrypoint.
//! Boots the Axum HTTP server, wiring the event source, pipeline and metrics.

use std::sync::Arc;

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use social_trends_analyzer::api::{self, AppState};
use social_trends_analyzer::config::PipelineConfig;
use social_trends_analyzer::ingest::select_source;
use social_trends_analyzer::metrics::Metrics;
use social_trends_analyzer::{Pipeline, Registry};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - SOCIAL_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("SOCIAL_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pipeline=info,ingest=info,api=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let cfg = PipelineConfig::load_default()?;
    let registry = Arc::new(Registry::builtin());
    let source = select_source(&cfg, Arc::clone(&registry));
    tracing::info!(
        source = source.name(),
        target_rows = cfg.target_rows,
        seed = cfg.seed,
        "event source selected"
    );

    let pipeline = Pipeline::new(registry, source, &cfg);
    let metrics = Metrics::init()?;

    let router = api::router(AppState::new(pipeline)).merge(metrics.router());
    Ok(router.into())
}
