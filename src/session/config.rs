use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

use super::params::ParamId;
use crate::core::Mode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{param}: bounds must be finite (min {min}, max {max})")]
    NonFiniteBounds { param: ParamId, min: f64, max: f64 },
    #[error("{param}: min {min} must be below max {max}")]
    EmptyRange { param: ParamId, min: f64, max: f64 },
    #[error("{param}: step must be a finite number above zero (got {step})")]
    InvalidStep { param: ParamId, step: f64 },
    #[error("{param}: default {value} lies outside [{min}, {max}]")]
    DefaultOutOfRange {
        param: ParamId,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("coalesce delay must be greater than zero")]
    ZeroDelay,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterConfig {
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalculatorConfig {
    pub contribution: ParameterConfig,
    pub return_rate: ParameterConfig,
    pub horizon: ParameterConfig,
    pub initial_mode: Mode,
    pub coalesce_delay_ms: u64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            contribution: ParameterConfig {
                default: 25_000.0,
                min: 500.0,
                max: 100_000.0,
                step: 500.0,
            },
            return_rate: ParameterConfig {
                default: 12.0,
                min: 1.0,
                max: 25.0,
                step: 0.5,
            },
            horizon: ParameterConfig {
                default: 10.0,
                min: 1.0,
                max: 50.0,
                step: 1.0,
            },
            initial_mode: Mode::Sip,
            coalesce_delay_ms: 150,
        }
    }
}

impl CalculatorConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn parameter(&self, id: ParamId) -> &ParameterConfig {
        match id {
            ParamId::Contribution => &self.contribution,
            ParamId::ReturnRate => &self.return_rate,
            ParamId::Horizon => &self.horizon,
        }
    }

    pub fn coalesce_delay(&self) -> Duration {
        Duration::from_millis(self.coalesce_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for id in ParamId::ALL {
            validate_parameter(id, self.parameter(id))?;
        }
        if self.coalesce_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay);
        }
        Ok(())
    }
}

fn validate_parameter(param: ParamId, cfg: &ParameterConfig) -> Result<(), ConfigError> {
    if !cfg.min.is_finite() || !cfg.max.is_finite() {
        return Err(ConfigError::NonFiniteBounds {
            param,
            min: cfg.min,
            max: cfg.max,
        });
    }
    if cfg.min >= cfg.max {
        return Err(ConfigError::EmptyRange {
            param,
            min: cfg.min,
            max: cfg.max,
        });
    }
    if !cfg.step.is_finite() || cfg.step <= 0.0 {
        return Err(ConfigError::InvalidStep {
            param,
            step: cfg.step,
        });
    }
    if !(cfg.min..=cfg.max).contains(&cfg.default) {
        return Err(ConfigError::DefaultOutOfRange {
            param,
            value: cfg.default,
            min: cfg.min,
            max: cfg.max,
        });
    }
    Ok(())
}
