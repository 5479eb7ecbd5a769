//! Normal-approximation confidence intervals for a proportion.

use serde::{Deserialize, Serialize};

/// Default z-score (95%) used for unrecognized confidence levels.
pub const DEFAULT_Z_SCORE: f64 = 1.96;

const LEVEL_TOLERANCE: f64 = 1e-9;

/// Closed interval `[lower, upper]` inside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Zero-width interval at 0, used when there is no data.
    pub const EMPTY: Self = Self {
        lower: 0.0,
        upper: 0.0,
    };

    /// Interval width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Two-sided z-score for a confidence level.
///
/// Recognizes 0.90, 0.95 and 0.99; every other level maps to 1.96.
///
/// # Examples
/// ```
/// use trueno_ab::stats::z_score;
///
/// assert!((z_score(0.99) - 2.576).abs() < f64::EPSILON);
/// assert!((z_score(0.8) - 1.96).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn z_score(confidence_level: f64) -> f64 {
    const TABLE: [(f64, f64); 3] = [(0.90, 1.645), (0.95, 1.96), (0.99, 2.576)];

    TABLE
        .iter()
        .find(|(level, _)| (level - confidence_level).abs() < LEVEL_TOLERANCE)
        .map_or(DEFAULT_Z_SCORE, |&(_, z)| z)
}

/// Normal-approximation interval around `proportion` with `sample_size` trials.
///
/// `sample_size == 0` yields [`ConfidenceInterval::EMPTY`]. The proportion
/// is clamped into `[0, 1]` first, so `0 <= lower <= upper <= 1` always holds.
#[must_use]
pub fn confidence_interval(
    proportion: f64,
    sample_size: u64,
    confidence_level: f64,
) -> ConfidenceInterval {
    if sample_size == 0 {
        return ConfidenceInterval::EMPTY;
    }

    let p = if proportion.is_nan() {
        0.0
    } else {
        proportion.clamp(0.0, 1.0)
    };
    #[allow(clippy::cast_precision_loss)]
    let n = sample_size as f64;

    let standard_error = (p * (1.0 - p) / n).sqrt();
    let margin = z_score(confidence_level) * standard_error;

    ConfidenceInterval {
        lower: (p - margin).max(0.0),
        upper: (p + margin).min(1.0),
    }
}
