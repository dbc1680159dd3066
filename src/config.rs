use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::{DEFAULT_MATCH_THRESHOLD, DEFAULT_MAX_INPUT_CHARS};
use crate::error::{ExtractorError, Result};
use crate::matching::InsuredRecord;

/// Environment variable naming the config file when `--config` is not given.
pub const CONFIG_PATH_ENV: &str = "INSURED_EXTRACTOR_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub matching: MatchingConfig,
    pub insureds: Vec<InsuredRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Largest document (in characters) the service adapter accepts
    pub max_input_chars: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum similarity for a registry match
    pub threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ExtractorError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Load from an explicit path, else from `INSURED_EXTRACTOR_CONFIG`, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load_from(path),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.service.max_input_chars == 0 {
            return Err(ExtractorError::Config(
                "service.max_input_chars must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.matching.threshold) {
            return Err(ExtractorError::Config(format!(
                "matching.threshold must be within 0.0..=1.0, got {}",
                self.matching.threshold
            )));
        }
        Ok(())
    }
}
