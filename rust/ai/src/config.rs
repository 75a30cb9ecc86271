//! Advisor configuration: defaults, then a TOML file, then environment overrides.
//!
//! | Variable | Field |
//! |---|---|
//! | `TABLESIGHT_CONFIG` | path of a TOML file |
//! | `TABLESIGHT_MODE` | `mode` |
//! | `TABLESIGHT_ITERATIONS` | `iterations` |
//! | `TABLESIGHT_SAMPLES` | `projection_samples` |
//! | `TABLESIGHT_SEED` | `seed` |
//! | `TABLESIGHT_SAMPLER` | `sampler` |

use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

use crate::decision::Mode;
use crate::projection::DEFAULT_PROJECTION_SAMPLES;

/// Upper bound on simulation work per tick.
pub const MAX_ITERATIONS: u32 = 20_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvisorConfig {
    pub mode: Mode,
    pub iterations: u32,
    pub projection_samples: u32,
    pub seed: Option<u64>,
    pub sampler: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Balanced,
            iterations: 1500,
            projection_samples: DEFAULT_PROJECTION_SAMPLES,
            seed: None,
            sampler: "rejection".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub mode: ValueSource,
    pub iterations: ValueSource,
    pub projection_samples: ValueSource,
    pub seed: ValueSource,
    pub sampler: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            mode: ValueSource::Default,
            iterations: ValueSource::Default,
            projection_samples: ValueSource::Default,
            seed: ValueSource::Default,
            sampler: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: AdvisorConfig,
    pub sources: ConfigSources,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub fn load() -> Result<AdvisorConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = AdvisorConfig::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("TABLESIGHT_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.mode {
            cfg.mode = v;
            sources.mode = ValueSource::File;
        }
        if let Some(v) = f.iterations {
            cfg.iterations = v;
            sources.iterations = ValueSource::File;
        }
        if let Some(v) = f.projection_samples {
            cfg.projection_samples = v;
            sources.projection_samples = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.sampler {
            cfg.sampler = v;
            sources.sampler = ValueSource::File;
        }
    }

    if let Ok(mode) = std::env::var("TABLESIGHT_MODE")
        && !mode.is_empty()
    {
        cfg.mode = Mode::from_name(&mode)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown mode {mode:?}")))?;
        sources.mode = ValueSource::Env;
    }
    if let Ok(n) = std::env::var("TABLESIGHT_ITERATIONS")
        && !n.is_empty()
    {
        cfg.iterations = n
            .parse()
            .map_err(|_| ConfigError::Invalid("iterations must be a number".into()))?;
        sources.iterations = ValueSource::Env;
    }
    if let Ok(n) = std::env::var("TABLESIGHT_SAMPLES")
        && !n.is_empty()
    {
        cfg.projection_samples = n
            .parse()
            .map_err(|_| ConfigError::Invalid("projection_samples must be a number".into()))?;
        sources.projection_samples = ValueSource::Env;
    }
    if let Ok(seed) = std::env::var("TABLESIGHT_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("seed must be a number".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(sampler) = std::env::var("TABLESIGHT_SAMPLER")
        && !sampler.is_empty()
    {
        cfg.sampler = sampler;
        sources.sampler = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    mode: Option<Mode>,
    #[serde(default)]
    iterations: Option<u32>,
    #[serde(default)]
    projection_samples: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    sampler: Option<String>,
}

pub fn validate(cfg: &AdvisorConfig) -> Result<(), ConfigError> {
    if !(1..=MAX_ITERATIONS).contains(&cfg.iterations) {
        return Err(ConfigError::Invalid(format!(
            "iterations must be within 1..={MAX_ITERATIONS}"
        )));
    }
    if !(1..=MAX_ITERATIONS).contains(&cfg.projection_samples) {
        return Err(ConfigError::Invalid(format!(
            "projection_samples must be within 1..={MAX_ITERATIONS}"
        )));
    }
    if !matches!(cfg.sampler.as_str(), "rejection" | "uniform") {
        return Err(ConfigError::Invalid(format!(
            "unknown sampler {:?}",
            cfg.sampler
        )));
    }
    Ok(())
}
