// src/ingest/mod.rs
pub mod synthetic;
pub mod twitter;
pub mod types;

use std::sync::Arc;

use metrics::counter;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::ingest::synthetic::SyntheticSource;
use crate::ingest::twitter::TwitterSource;
use crate::ingest::types::{EventSource, FetchQuery};
use crate::records::RawRecord;
use crate::registry::Registry;

static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Clean live post text: decode HTML entities, strip tags, fold typographic
/// quotes to ASCII and collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s);
    let stripped = RE_TAGS.replace_all(&decoded, "");
    let folded = stripped
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");
    RE_WS.replace_all(&folded, " ").trim().to_string()
}

/// Live source when a bearer token is configured, synthetic otherwise.
pub fn select_source(cfg: &PipelineConfig, registry: Arc<Registry>) -> Arc<dyn EventSource> {
    match cfg.twitter_bearer_token.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => {
            Arc::new(TwitterSource::new(token, cfg.twitter_base_url.clone()))
        }
        _ => Arc::new(SyntheticSource::new(registry, cfg.synthetic_volume)),
    }
}

/// Fetch from `source`. Transport and parse failures are logged and counted,
/// and yield no posts. A [`PipelineError`] raised by the source is a
/// configuration problem and is returned to the caller.
pub async fn fetch_or_empty(
    source: &dyn EventSource,
    query: &FetchQuery,
) -> Result<Vec<RawRecord>, PipelineError> {
    match source.fetch(query).await {
        Ok(records) => {
            counter!("pipeline_raw_records_total").increment(records.len() as u64);
            Ok(records)
        }
        Err(e) => {
            if let Some(cfg_err) = e.downcast_ref::<PipelineError>() {
                return Err(cfg_err.clone());
            }
            tracing::warn!(
                target: "ingest",
                error = ?e,
                source = source.name(),
                topic = %query.domain,
                "source fetch failed; continuing with no data"
            );
            counter!("pipeline_source_errors_total").increment(1);
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::TopicDomain;
    use anyhow::anyhow;

    struct Failing;

    #[async_trait::async_trait]
    impl EventSource for Failing {
        async fn fetch(&self, _query: &FetchQuery) -> anyhow::Result<Vec<RawRecord>> {
            Err(anyhow!("connection reset"))
        }
        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn normalize_text_decodes_and_collapses() {
        let s = "  Beach&nbsp;&amp; <b>sun</b>\n\n in \u{201C}Goa\u{201D}!  ";
        assert_eq!(normalize_text(s), r#"Beach & sun in "Goa"!"#);
    }

    #[test]
    fn token_selects_live_source() {
        let registry = Arc::new(Registry::builtin());
        let mut cfg = PipelineConfig::default();
        assert_eq!(select_source(&cfg, registry.clone()).name(), "synthetic");
        cfg.twitter_bearer_token = Some("   ".into());
        assert_eq!(select_source(&cfg, registry.clone()).name(), "synthetic");
        cfg.twitter_bearer_token = Some("abc".into());
        assert_eq!(select_source(&cfg, registry).name(), "twitter");
    }

    #[tokio::test]
    async fn fetch_failure_becomes_empty() {
        let out = fetch_or_empty(&Failing, &FetchQuery::for_domain(TopicDomain::Travel))
            .await
            .unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn zero_synthetic_volume_is_surfaced() {
        let source = SyntheticSource::new(Arc::new(Registry::builtin()), 0);
        let err = fetch_or_empty(&source, &FetchQuery::for_domain(TopicDomain::Travel))
            .await
            .unwrap_err();
        assert_eq!(err, PipelineError::InvalidTarget);
    }
}
