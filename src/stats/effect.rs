//! Cohen's d between two proportions.

/// Cohen's d using the pooled proportion's standard deviation.
///
/// `pp = (n1·p1 + n2·p2) / (n1 + n2)`, `sd = sqrt(pp(1 − pp))`,
/// `d = (p1 − p2) / sd`. Returns 0 if either sample is empty or the pooled
/// standard deviation is 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cohens_d(rate_a: f64, n_a: u64, rate_b: f64, n_b: u64) -> f64 {
    if n_a == 0 || n_b == 0 {
        return 0.0;
    }

    let (n1, n2) = (n_a as f64, n_b as f64);
    let pooled = (n1 * rate_a + n2 * rate_b) / (n1 + n2);
    let pooled_sd = (pooled * (1.0 - pooled)).max(0.0).sqrt();

    if pooled_sd == 0.0 {
        0.0
    } else {
        (rate_a - rate_b) / pooled_sd
    }
}
