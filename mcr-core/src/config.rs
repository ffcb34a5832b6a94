//! Rollout configuration loaded from YAML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {msg}")]
    Invalid { msg: &'static str },
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Rollout engine settings.
    pub rollout: RolloutConfig,
    /// Batch value estimation settings.
    #[serde(default)]
    pub estimate: EstimateConfig,
}

/// Settings shared by every rollout of a run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RolloutConfig {
    /// Hard ceiling on simulated steps.
    pub max_depth: u32,
    #[serde(default)]
    pub mode: RolloutMode,
}

/// Which engine to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RolloutMode {
    /// Fixed horizon: stop only at `max_depth` or a terminal state.
    #[default]
    Standard,
    /// Additionally stop once the newest discounted reward sits within
    /// `threshold` of the sliding-window average.
    Adaptive {
        #[serde(default = "default_min_depth")]
        min_depth: u32,
        #[serde(default = "default_window_size")]
        window_size: u32,
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
}

impl RolloutMode {
    /// Short label used in log events.
    pub fn label(&self) -> &'static str {
        match self {
            RolloutMode::Standard => "standard",
            RolloutMode::Adaptive { .. } => "adaptive",
        }
    }
}

pub fn default_min_depth() -> u32 {
    10
}

pub fn default_window_size() -> u32 {
    5
}

pub fn default_threshold() -> f64 {
    0.01
}

/// Batch value estimation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EstimateConfig {
    /// Rollouts averaged per estimate.
    #[serde(default = "default_episodes")]
    pub episodes: u32,
    /// Seed callers use to build their random source. Engines never seed.
    #[serde(default)]
    pub seed: u64,
    /// Optional NDJSON file receiving one summary event per estimate.
    #[serde(default)]
    pub log_path: Option<String>,
}

fn default_episodes() -> u32 {
    1000
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            episodes: default_episodes(),
            seed: 0,
            log_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the rollout engines would treat as caller precondition violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let RolloutMode::Adaptive {
            window_size,
            threshold,
            ..
        } = self.rollout.mode
        {
            if window_size == 0 {
                return Err(ConfigError::Invalid {
                    msg: "rollout.mode.window_size must be > 0",
                });
            }
            if !(threshold.is_finite() && threshold >= 0.0) {
                return Err(ConfigError::Invalid {
                    msg: "rollout.mode.threshold must be finite and >= 0",
                });
            }
        }
        if self.estimate.episodes == 0 {
            return Err(ConfigError::Invalid {
                msg: "estimate.episodes must be > 0",
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rollout: RolloutConfig {
                max_depth: 100,
                mode: RolloutMode::Standard,
            },
            estimate: EstimateConfig::default(),
        }
    }
}
