//! Statistical primitives for A/B decisions.
//!
//! Everything here is pure and total: degenerate inputs (no samples, zero
//! variance) resolve to fixed defaults instead of errors or NaN.
//!
//! ```rust
//! use trueno_ab::stats::{confidence_interval, test_against_leader, VariantSample};
//!
//! let samples = [VariantSample::new(20, 200), VariantSample::new(50, 200)];
//! let outcome = test_against_leader(&samples, 0.95).unwrap();
//! assert_eq!(outcome.leader, 1);
//! assert!(outcome.significant);
//!
//! let ci = confidence_interval(samples[1].conversion_rate(), 200, 0.95);
//! assert!(ci.lower < 0.25 && ci.upper > 0.25);
//! ```

mod confidence;
mod effect;
mod significance;
mod special;

pub use confidence::{confidence_interval, z_score, ConfidenceInterval, DEFAULT_Z_SCORE};
pub use effect::cohens_d;
pub use significance::{
    conversion_rate, leading_index, leading_index_excluding, test_against_leader,
    welch_degrees_of_freedom, welch_p_value, Comparison, SignificanceTest, VariantSample,
};
pub use special::{
    beta, erf, gamma, incomplete_beta, normal_cdf, student_t_cdf, NORMAL_APPROX_DF,
};
