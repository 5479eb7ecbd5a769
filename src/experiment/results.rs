//! Derived, non-persisted view of an experiment's statistics.

use serde::{Deserialize, Serialize};

use crate::stats::ConfidenceInterval;

/// Statistics for one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantResult {
    /// Variant ID
    pub variant_id: String,
    /// Variant display name
    pub name: String,
    /// Target counter / sample size
    pub conversion_rate: f64,
    /// Interval around `conversion_rate`
    pub confidence_interval: ConfidenceInterval,
    /// Views at compute time
    pub sample_size: u64,
    /// True only for the declared winner
    pub is_winner: bool,
}

/// Results of evaluating an experiment.
///
/// `winner` is set exactly when `statistical_significance` is true, and
/// then exactly one entry in `variants` has `is_winner`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentResults {
    /// Experiment ID
    pub experiment_id: String,
    /// Per-variant statistics, in creation order
    pub variants: Vec<VariantResult>,
    /// Winning variant ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    /// Whether the leader beat every challenger at the configured level
    pub statistical_significance: bool,
    /// Smallest leader-vs-challenger p-value, when the test ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,
    /// Cohen's d between the winner and the strongest other variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect_size: Option<f64>,
    /// Human-readable next step
    pub recommended_action: String,
    /// Confidence level as stored on the experiment
    pub confidence_level: f64,
}

impl ExperimentResults {
    /// Result entry of the declared winner, if any.
    #[must_use]
    pub fn winning_variant(&self) -> Option<&VariantResult> {
        let winner = self.winner.as_deref()?;
        self.variants.iter().find(|v| v.variant_id == winner)
    }
}
