//! Experiment - root entity of an A/B test

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::registry::validate_variants;
use super::{NewVariant, TargetMetric, Variant};
use crate::config::{DEFAULT_CONFIDENCE_LEVEL, DEFAULT_MINIMUM_SAMPLE_SIZE};
use crate::ids::IdGenerator;
use crate::{Error, Result};

/// Lifecycle status of an experiment.
///
/// New experiments are always `Active`; nothing in this crate moves them
/// out of it. Other states round-trip through storage unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentStatus {
    /// Collecting data.
    Active,
    /// Temporarily halted by the owner.
    Paused,
    /// Closed by the owner.
    Completed,
}

/// A content A/B test owned by one user.
///
/// The variant set is fixed at creation. Only variant metrics and
/// `updated_at` change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    owner_id: String,
    experiment_id: String,
    name: String,
    description: Option<String>,
    content_type: String,
    variants: Vec<Variant>,
    status: ExperimentStatus,
    target_metric: TargetMetric,
    minimum_sample_size: u64,
    confidence_level: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Experiment {
    /// Create a builder for a new experiment.
    #[must_use]
    pub fn builder(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        content_type: impl Into<String>,
        target_metric: TargetMetric,
    ) -> ExperimentBuilder {
        ExperimentBuilder::new(owner_id, name, content_type, target_metric)
    }

    /// Get the owner ID.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Get the experiment ID.
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the content-category tag.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Get the variants in creation order.
    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Look up a variant by ID.
    #[must_use]
    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id() == variant_id)
    }

    pub(crate) fn variant_mut(&mut self, variant_id: &str) -> Option<&mut Variant> {
        self.variants.iter_mut().find(|v| v.id() == variant_id)
    }

    /// Get the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ExperimentStatus {
        self.status
    }

    /// Get the target metric.
    #[must_use]
    pub const fn target_metric(&self) -> TargetMetric {
        self.target_metric
    }

    /// Get the per-variant sample size required before significance testing.
    #[must_use]
    pub const fn minimum_sample_size(&self) -> u64 {
        self.minimum_sample_size
    }

    /// Get the confidence level exactly as configured.
    #[must_use]
    pub const fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Builder for `Experiment`.
///
/// `build` runs the variant-set validation, so an `Experiment` obtained
/// from it always satisfies the 1–3 unique-names invariant.
#[derive(Debug)]
pub struct ExperimentBuilder {
    owner_id: String,
    name: String,
    description: Option<String>,
    content_type: String,
    variants: Vec<NewVariant>,
    target_metric: TargetMetric,
    minimum_sample_size: u64,
    confidence_level: f64,
    created_at: DateTime<Utc>,
}

impl ExperimentBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        content_type: impl Into<String>,
        target_metric: TargetMetric,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            name: name.into(),
            description: None,
            content_type: content_type.into(),
            variants: Vec::new(),
            target_metric,
            minimum_sample_size: DEFAULT_MINIMUM_SAMPLE_SIZE,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            created_at: Utc::now(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append one variant.
    #[must_use]
    pub fn variant(mut self, variant: NewVariant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Append several variants, keeping their order.
    #[must_use]
    pub fn variants(mut self, variants: impl IntoIterator<Item = NewVariant>) -> Self {
        self.variants.extend(variants);
        self
    }

    /// Set the minimum per-variant sample size.
    #[must_use]
    pub const fn minimum_sample_size(mut self, minimum_sample_size: u64) -> Self {
        self.minimum_sample_size = minimum_sample_size;
        self
    }

    /// Set the confidence level. Stored as given.
    #[must_use]
    pub const fn confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    /// Set a custom creation timestamp (useful for deserialization/testing).
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Validate the variant set and build the `Experiment`, drawing the
    /// experiment ID first and then one ID per variant.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the variant set is empty, larger than
    /// [`super::MAX_VARIANTS`], or has duplicate names, or if the
    /// confidence level is not finite. No IDs are drawn on failure.
    pub fn build<G: IdGenerator + ?Sized>(self, ids: &G) -> Result<Experiment> {
        validate_variants(&self.variants)?;
        // JSON has no NaN/inf; a stored non-finite level would never load again.
        if !self.confidence_level.is_finite() {
            return Err(Error::NonFiniteConfidenceLevel {
                level: self.confidence_level,
            });
        }

        let experiment_id = ids.next_id();
        let variants = self
            .variants
            .into_iter()
            .map(|definition| Variant::new(ids.next_id(), definition))
            .collect();

        Ok(Experiment {
            owner_id: self.owner_id,
            experiment_id,
            name: self.name,
            description: self.description,
            content_type: self.content_type,
            variants,
            status: ExperimentStatus::Active,
            target_metric: self.target_metric,
            minimum_sample_size: self.minimum_sample_size,
            confidence_level: self.confidence_level,
            created_at: self.created_at,
            updated_at: self.created_at,
        })
    }
}
