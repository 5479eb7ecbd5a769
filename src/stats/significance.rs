//! Leader-vs-rest Welch test on conversion rates.
//!
//! The leader is chosen on the raw target counter, not on the rate. Every
//! other variant is compared against it and the smallest p-value decides
//! significance.

use serde::{Deserialize, Serialize};

use super::special::student_t_cdf;

/// Raw counts for one variant, as seen by the tester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSample {
    /// Raw value of the experiment's target counter
    pub target_value: u64,
    /// Number of trials (views)
    pub sample_size: u64,
}

impl VariantSample {
    /// Create a sample.
    #[must_use]
    pub const fn new(target_value: u64, sample_size: u64) -> Self {
        Self {
            target_value,
            sample_size,
        }
    }

    /// `target_value / sample_size`, or 0 with no samples.
    #[must_use]
    pub fn conversion_rate(&self) -> f64 {
        conversion_rate(self.target_value, self.sample_size)
    }
}

/// `target_value / sample_size`, or 0 when `sample_size` is 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn conversion_rate(target_value: u64, sample_size: u64) -> f64 {
    if sample_size == 0 {
        0.0
    } else {
        target_value as f64 / sample_size as f64
    }
}

/// Index of the sample with the strictly largest target value, skipping
/// `excluded`. Ties keep the first one encountered.
#[must_use]
pub fn leading_index_excluding(samples: &[VariantSample], excluded: Option<usize>) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, sample) in samples.iter().enumerate() {
        if Some(i) == excluded {
            continue;
        }
        match best {
            Some(b) if sample.target_value <= samples[b].target_value => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Index of the leading sample (see [`leading_index_excluding`]).
#[must_use]
pub fn leading_index(samples: &[VariantSample]) -> Option<usize> {
    leading_index_excluding(samples, None)
}

/// `p(1 − p) / n` with the variance floored at 0; 0 when `n` is 0.
#[allow(clippy::cast_precision_loss)]
fn variance_term(rate: f64, sample_size: u64) -> f64 {
    if sample_size == 0 {
        return 0.0;
    }
    (rate * (1.0 - rate)).max(0.0) / sample_size as f64
}

/// Welch–Satterthwaite degrees of freedom for two variance terms.
///
/// Terms with `n <= 1` drop out of the denominator; an empty denominator
/// gives `f64::INFINITY`, which routes the CDF to the normal branch.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn welch_degrees_of_freedom(term_a: f64, n_a: u64, term_b: f64, n_b: u64) -> f64 {
    let part = |term: f64, n: u64| {
        if n <= 1 {
            0.0
        } else {
            term * term / (n - 1) as f64
        }
    };

    let numerator = (term_a + term_b).powi(2);
    let denominator = part(term_a, n_a) + part(term_b, n_b);
    if denominator > 0.0 {
        numerator / denominator
    } else {
        f64::INFINITY
    }
}

/// Two-tailed p-value for `leader` vs `other`, always in `[0, 1]`.
///
/// With zero standard error the result is exactly 1 for equal rates and 0
/// otherwise.
///
/// # Examples
/// ```
/// use trueno_ab::stats::{welch_p_value, VariantSample};
///
/// let strong = VariantSample::new(50, 200);
/// let weak = VariantSample::new(20, 200);
/// assert!(welch_p_value(strong, weak) < 0.05);
/// ```
#[must_use]
pub fn welch_p_value(leader: VariantSample, other: VariantSample) -> f64 {
    let rate_l = leader.conversion_rate();
    let rate_o = other.conversion_rate();
    let term_l = variance_term(rate_l, leader.sample_size);
    let term_o = variance_term(rate_o, other.sample_size);

    let standard_error = (term_l + term_o).sqrt();
    if standard_error == 0.0 {
        return if (rate_l - rate_o).abs() < f64::EPSILON {
            1.0
        } else {
            0.0
        };
    }

    let t = (rate_l - rate_o) / standard_error;
    let df = welch_degrees_of_freedom(term_l, leader.sample_size, term_o, other.sample_size);
    let p_value = 2.0 * (1.0 - student_t_cdf(t.abs(), df));

    if p_value.is_nan() {
        1.0
    } else {
        p_value.clamp(0.0, 1.0)
    }
}

/// One leader-vs-other comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// Index of the challenger in the input slice
    pub index: usize,
    /// Two-tailed p-value against the leader
    pub p_value: f64,
}

/// Aggregate outcome of testing the leader against every other variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignificanceTest {
    /// Index of the leading variant
    pub leader: usize,
    /// Per-challenger results, in input order
    pub comparisons: Vec<Comparison>,
    /// Minimum p-value across comparisons
    pub p_value: f64,
    /// `1 − confidence_level`
    pub alpha: f64,
    /// `p_value < alpha`
    pub significant: bool,
}

/// Test the leader against all other samples.
///
/// Returns `None` for fewer than two samples. `alpha` is derived from the
/// confidence level as given, without the z-table normalization.
#[must_use]
pub fn test_against_leader(samples: &[VariantSample], confidence_level: f64) -> Option<SignificanceTest> {
    if samples.len() < 2 {
        return None;
    }
    let leader = leading_index(samples)?;

    let comparisons: Vec<Comparison> = samples
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != leader)
        .map(|(index, &other)| Comparison {
            index,
            p_value: welch_p_value(samples[leader], other),
        })
        .collect();

    let p_value = comparisons
        .iter()
        .map(|c| c.p_value)
        .fold(1.0_f64, f64::min);
    let alpha = 1.0 - confidence_level;

    Some(SignificanceTest {
        leader,
        comparisons,
        p_value,
        alpha,
        significant: p_value < alpha,
    })
}
