// src/config/pipeline.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};

use crate::error::PipelineError;
use crate::ingest::twitter::DEFAULT_BASE_URL;
use crate::resample::{DEFAULT_SEED, DEFAULT_TARGET_ROWS};

pub const ENV_CONFIG_PATH: &str = "PIPELINE_CONFIG_PATH";
pub const ENV_TARGET_ROWS: &str = "PIPELINE_TARGET_ROWS";
pub const ENV_SEED: &str = "PIPELINE_SEED";
pub const ENV_SYNTHETIC_VOLUME: &str = "PIPELINE_SYNTHETIC_VOLUME";
pub const ENV_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Row count every served table is resampled to.
    pub target_rows: usize,
    /// Resampling seed.
    pub seed: u64,
    /// Posts synthesized per request when no live source is configured.
    pub synthetic_volume: usize,
    /// Page size requested from the live source.
    pub max_results: u32,
    #[serde(skip_serializing)]
    pub twitter_bearer_token: Option<String>,
    pub twitter_base_url: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_rows: DEFAULT_TARGET_ROWS,
            seed: DEFAULT_SEED,
            synthetic_volume: DEFAULT_TARGET_ROWS,
            max_results: 20,
            twitter_bearer_token: None,
            twitter_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load from an explicit TOML or JSON file (chosen by extension).
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading pipeline config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg = match ext.as_str() {
            "json" => serde_json::from_str(&content).context("parsing pipeline json")?,
            _ => toml::from_str(&content).context("parsing pipeline toml")?,
        };
        Ok(cfg)
    }

    /// Resolve config, then apply env overrides:
    /// 1) $PIPELINE_CONFIG_PATH
    /// 2) config/pipeline.toml
    /// 3) config/pipeline.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            ["config/pipeline.toml", "config/pipeline.json"]
                .iter()
                .map(PathBuf::from)
                .find(|p| p.exists())
                .map(|p| Self::load_from(&p))
                .transpose()?
                .unwrap_or_default()
        };
        cfg.apply_env()?;
        cfg.validate().context("validating pipeline config")?;
        Ok(cfg)
    }

    /// Row counts must be positive; a zero target or synthetic volume can never
    /// produce a table.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.target_rows == 0 || self.synthetic_volume == 0 {
            return Err(PipelineError::InvalidTarget);
        }
        Ok(())
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(v) = env_parse::<usize>(ENV_TARGET_ROWS)? {
            self.target_rows = v;
        }
        if let Some(v) = env_parse::<u64>(ENV_SEED)? {
            self.seed = v;
        }
        if let Some(v) = env_parse::<usize>(ENV_SYNTHETIC_VOLUME)? {
            self.synthetic_volume = v;
        }
        if let Ok(token) = env::var(ENV_BEARER_TOKEN) {
            if !token.trim().is_empty() {
                self.twitter_bearer_token = Some(token.trim().to_string());
            }
        }
        Ok(())
    }
}

fn env_parse<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("invalid value for {name}: {raw:?}")),
        Err(_) => Ok(None),
    }
}
