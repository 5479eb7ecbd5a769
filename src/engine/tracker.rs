//! Metric tracking for a single variant.

use chrono::Utc;

use crate::experiment::{Experiment, MetricsPatch};
use crate::{Error, Result};

/// Merge `patch` into one variant of `experiment`.
///
/// Only the named variant is touched: present fields overwrite stored
/// counters, absent ones keep their values, and the engagement rate and
/// sample size are recomputed from the merged record. `updated_at` is
/// refreshed on success.
///
/// # Errors
///
/// [`Error::VariantNotFound`] if `variant_id` is not part of the
/// experiment. The experiment is left unchanged.
pub fn apply_variant_metrics(
    experiment: &mut Experiment,
    variant_id: &str,
    patch: &MetricsPatch,
) -> Result<()> {
    let Some(variant) = experiment.variant_mut(variant_id) else {
        return Err(Error::VariantNotFound {
            experiment_id: experiment.experiment_id().to_string(),
            variant_id: variant_id.to_string(),
        });
    };

    variant.apply(patch);
    experiment.touch(Utc::now());
    Ok(())
}
