//! Variant - one candidate content version inside an experiment

use serde::{Deserialize, Serialize};

use super::{Metrics, MetricsPatch};

/// Caller-supplied definition of a variant, before ids are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVariant {
    /// Display name, unique within the experiment
    pub name: String,
    /// Opaque content payload
    pub content: String,
}

impl NewVariant {
    /// Create a variant definition.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A stored variant with its tracked metrics.
///
/// `sample_size` always equals `metrics.views`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    id: String,
    name: String,
    content: String,
    metrics: Metrics,
    sample_size: u64,
}

impl Variant {
    /// Create a variant with zeroed metrics.
    #[must_use]
    pub fn new(id: impl Into<String>, definition: NewVariant) -> Self {
        Self {
            id: id.into(),
            name: definition.name,
            content: definition.content,
            metrics: Metrics::default(),
            sample_size: 0,
        }
    }

    /// Get the variant ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the content payload.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the tracked metrics.
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Get the sample size (current views).
    #[must_use]
    pub const fn sample_size(&self) -> u64 {
        self.sample_size
    }

    /// Merge a patch into this variant's metrics and resync the sample size.
    pub fn apply(&mut self, patch: &MetricsPatch) {
        self.metrics.apply(patch);
        self.sample_size = self.metrics.views;
    }
}
