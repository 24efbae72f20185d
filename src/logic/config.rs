//! Engine Configuration
//!
//! Read once at startup from the environment (a `.env` file is loaded by
//! `main` first). Unset variables fall back to `constants`.

use std::path::PathBuf;

use crate::constants::{
    DEFAULT_ASSESSMENTS, DEFAULT_MODEL_MANIFEST, DEFAULT_SCALER, DEFAULT_SOURCE, ENV_ASSESSMENTS, ENV_BANDS,
    ENV_MODEL_MANIFEST, ENV_SCALER, ENV_SEED, ENV_SOURCE,
};
use crate::logic::error::ConfigError;
use crate::logic::source::SourceSetting;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub model_manifest: PathBuf,
    pub scaler: PathBuf,
    /// Band overrides; factory calibration when unset
    pub bands: Option<PathBuf>,
    pub source: SourceSetting,
    pub seed: Option<u64>,
    /// 0 = until the source is exhausted
    pub assessments: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_manifest: PathBuf::from(DEFAULT_MODEL_MANIFEST),
            scaler: PathBuf::from(DEFAULT_SCALER),
            bands: None,
            source: SourceSetting::parse(DEFAULT_SOURCE),
            seed: None,
            assessments: DEFAULT_ASSESSMENTS,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map instead of the process env)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            model_manifest: get(ENV_MODEL_MANIFEST).map(PathBuf::from).unwrap_or(defaults.model_manifest),
            scaler: get(ENV_SCALER).map(PathBuf::from).unwrap_or(defaults.scaler),
            bands: get(ENV_BANDS).map(PathBuf::from),
            source: get(ENV_SOURCE)
                .map(|v| SourceSetting::parse(&v))
                .unwrap_or(defaults.source),
            seed: get(ENV_SEED).map(|v| parse_setting(ENV_SEED, &v)).transpose()?,
            assessments: match get(ENV_ASSESSMENTS) {
                Some(v) => parse_setting(ENV_ASSESSMENTS, &v)?,
                None => defaults.assessments,
            },
        })
    }
}

fn parse_setting<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Setting {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
