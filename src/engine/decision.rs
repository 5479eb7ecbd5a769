//! Winner decision over a loaded experiment.
//!
//! [`evaluate`] is pure: it reads the experiment as given and never touches
//! storage, so it can be called on any snapshot a host already holds.

use crate::experiment::{Experiment, ExperimentResults, VariantResult};
use crate::stats::{
    cohens_d, confidence_interval, leading_index_excluding, test_against_leader, VariantSample,
};

const NOT_REQUESTED: &str = "Statistical analysis was not requested.";
const TOO_FEW_VARIANTS: &str = "At least two variations are required for statistical analysis.";
const NO_DIFFERENCE: &str = "No statistically significant difference found. Consider running the test longer or increasing sample size.";

/// Largest per-variant gap to the minimum sample size, or `None` when every
/// variant has reached it.
#[must_use]
pub fn sample_shortfall(experiment: &Experiment) -> Option<u64> {
    let minimum = experiment.minimum_sample_size();
    experiment
        .variants()
        .iter()
        .map(|v| minimum.saturating_sub(v.sample_size()))
        .max()
        .filter(|&shortfall| shortfall > 0)
}

/// Compute results for an experiment.
///
/// Per-variant rates and intervals are always filled in. The significance
/// test only runs when `include_statistical_analysis` is set, there are at
/// least two variants, and every variant has reached the minimum sample
/// size. A winner is declared only on a significant result.
///
/// Effect size compares the winner with the variant holding the highest raw
/// target count among the rest. That is not necessarily the variant that
/// produced the minimum p-value.
#[must_use]
pub fn evaluate(experiment: &Experiment, include_statistical_analysis: bool) -> ExperimentResults {
    let target = experiment.target_metric();
    let confidence_level = experiment.confidence_level();

    let samples: Vec<VariantSample> = experiment
        .variants()
        .iter()
        .map(|v| VariantSample::new(v.metrics().value_of(target), v.sample_size()))
        .collect();

    let variants = experiment
        .variants()
        .iter()
        .zip(&samples)
        .map(|(variant, sample)| {
            let conversion_rate = sample.conversion_rate();
            VariantResult {
                variant_id: variant.id().to_string(),
                name: variant.name().to_string(),
                conversion_rate,
                confidence_interval: confidence_interval(
                    conversion_rate,
                    sample.sample_size,
                    confidence_level,
                ),
                sample_size: sample.sample_size,
                is_winner: false,
            }
        })
        .collect();

    let mut results = ExperimentResults {
        experiment_id: experiment.experiment_id().to_string(),
        variants,
        winner: None,
        statistical_significance: false,
        p_value: None,
        effect_size: None,
        recommended_action: String::new(),
        confidence_level,
    };

    if !include_statistical_analysis {
        results.recommended_action = NOT_REQUESTED.to_string();
        return results;
    }
    if samples.len() < 2 {
        results.recommended_action = TOO_FEW_VARIANTS.to_string();
        return results;
    }
    if let Some(shortfall) = sample_shortfall(experiment) {
        tracing::debug!(
            experiment_id = experiment.experiment_id(),
            shortfall,
            "minimum sample size not reached, skipping significance test"
        );
        results.recommended_action = format!(
            "Need {shortfall} more samples to reach minimum sample size for statistical analysis."
        );
        return results;
    }

    let Some(test) = test_against_leader(&samples, confidence_level) else {
        results.recommended_action = TOO_FEW_VARIANTS.to_string();
        return results;
    };
    results.p_value = Some(test.p_value);

    if !test.significant {
        results.recommended_action = NO_DIFFERENCE.to_string();
        return results;
    }

    let leader = test.leader;
    let winner = &mut results.variants[leader];
    winner.is_winner = true;
    results.winner = Some(winner.variant_id.clone());
    results.statistical_significance = true;
    results.recommended_action = format!(
        "Variation \"{}\" is the statistically significant winner. Implement this variation.",
        winner.name
    );

    if let Some(runner_up) = leading_index_excluding(&samples, Some(leader)) {
        let (a, b) = (samples[leader], samples[runner_up]);
        results.effect_size = Some(cohens_d(
            a.conversion_rate(),
            a.sample_size,
            b.conversion_rate(),
            b.sample_size,
        ));
    }

    tracing::info!(
        experiment_id = experiment.experiment_id(),
        winner = results.winner.as_deref().unwrap_or_default(),
        p_value = test.p_value,
        "declared A/B test winner"
    );

    results
}
