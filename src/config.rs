//! Engine configuration

use serde::{Deserialize, Serialize};

/// Minimum per-variant sample size when a request does not name one.
pub const DEFAULT_MINIMUM_SAMPLE_SIZE: u64 = 30;

/// Confidence level when a request does not name one.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Defaults applied to new experiments.
///
/// Deserializable so it can live in a host application's config file;
/// missing fields fall back to the constants above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Used when `CreateExperiment::minimum_sample_size` is `None`
    pub default_minimum_sample_size: u64,
    /// Used when `CreateExperiment::confidence_level` is `None`
    pub default_confidence_level: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_minimum_sample_size: DEFAULT_MINIMUM_SAMPLE_SIZE,
            default_confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }
}

impl EngineConfig {
    /// Create a config builder
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

/// Builder for `EngineConfig`
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the default minimum sample size
    #[must_use]
    pub const fn default_minimum_sample_size(mut self, size: u64) -> Self {
        self.config.default_minimum_sample_size = size;
        self
    }

    /// Set the default confidence level
    #[must_use]
    pub const fn default_confidence_level(mut self, level: f64) -> Self {
        self.config.default_confidence_level = level;
        self
    }

    /// Build the config
    #[must_use]
    pub fn build(self) -> EngineConfig {
        self.config
    }
}
