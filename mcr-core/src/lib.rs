//! mcr-core: generative model capability and rollout configuration.

pub mod config;
pub mod model;

pub use config::{Config, ConfigError, EstimateConfig, RolloutConfig, RolloutMode};
pub use model::{ActionSpace, GenerativeModel};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
