//! Property-based tests for trueno-ab
//!
//! Following ruchy/trueno/aprender pattern:
//! - Test mathematical invariants
//! - Test data integrity properties
//! - Run with ProptestConfig::with_cases(100)
//! - Must complete in <30 seconds for pre-commit hook

use proptest::prelude::*;
use trueno_ab::engine::{apply_variant_metrics, evaluate};
use trueno_ab::experiment::{Experiment, Metrics, MetricsPatch, NewVariant, TargetMetric};
use trueno_ab::ids::SequentialIdGenerator;
use trueno_ab::stats::{
    cohens_d, confidence_interval, student_t_cdf, test_against_leader, welch_p_value,
    VariantSample,
};

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Variant sample where the target count may exceed the sample size
fn arb_sample() -> impl Strategy<Value = VariantSample> {
    (0u64..5_000, 0u64..5_000).prop_map(|(target, n)| VariantSample::new(target, n))
}

/// Recognized and unrecognized confidence levels
fn arb_confidence_level() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.90), Just(0.95), Just(0.99), 0.5f64..0.999]
}

fn arb_patch() -> impl Strategy<Value = MetricsPatch> {
    (
        proptest::option::of(0u64..10_000),
        proptest::option::of(0u64..10_000),
        proptest::option::of(0u64..10_000),
        proptest::option::of(0u64..10_000),
    )
        .prop_map(|(views, likes, reach, saves)| MetricsPatch {
            views,
            likes,
            reach,
            saves,
            ..MetricsPatch::default()
        })
}

fn experiment_with(samples: &[VariantSample], minimum: u64, level: f64) -> Experiment {
    let ids = SequentialIdGenerator::new("p");
    let mut experiment = Experiment::builder("owner", "prop", "blog", TargetMetric::Likes)
        .variants((0..samples.len()).map(|i| NewVariant::new(format!("V{i}"), "")))
        .minimum_sample_size(minimum)
        .confidence_level(level)
        .build(&ids)
        .unwrap();

    let ids: Vec<String> = experiment.variants().iter().map(|v| v.id().to_string()).collect();
    for (id, sample) in ids.iter().zip(samples) {
        let patch = MetricsPatch::new()
            .views(sample.sample_size)
            .likes(sample.target_value);
        apply_variant_metrics(&mut experiment, id, &patch).unwrap();
    }
    experiment
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ========================================================================
    // Confidence Estimator
    // ========================================================================

    /// Property: 0 <= lower <= upper <= 1 for any proportion in [0, 1]
    #[test]
    fn prop_interval_bounded(
        p in 0.0f64..=1.0,
        n in 0u64..100_000,
        level in arb_confidence_level()
    ) {
        let ci = confidence_interval(p, n, level);
        prop_assert!(ci.lower >= 0.0);
        prop_assert!(ci.lower <= ci.upper);
        prop_assert!(ci.upper <= 1.0);
        if n == 0 {
            prop_assert_eq!(ci.lower, 0.0);
            prop_assert_eq!(ci.upper, 0.0);
        }
    }

    /// Property: interval contains the proportion
    #[test]
    fn prop_interval_contains_proportion(p in 0.0f64..=1.0, n in 1u64..100_000) {
        let ci = confidence_interval(p, n, 0.95);
        prop_assert!(ci.lower <= p && p <= ci.upper);
    }

    // ========================================================================
    // Significance Tester
    // ========================================================================

    /// Property: p-values are always in [0, 1], including degenerate input
    #[test]
    fn prop_p_value_bounded(a in arb_sample(), b in arb_sample()) {
        let p = welch_p_value(a, b);
        prop_assert!((0.0..=1.0).contains(&p), "p = {}", p);
    }

    /// Property: the t CDF used for the tail never leaves [0.5, 1] for t >= 0
    #[test]
    fn prop_t_cdf_bounded(t in 0.0f64..50.0, df in 0.5f64..200.0) {
        let cdf = student_t_cdf(t, df);
        prop_assert!((0.5..=1.0).contains(&cdf));
    }

    /// Property: identical samples are never significant
    #[test]
    fn prop_identical_samples_not_significant(sample in arb_sample(), level in arb_confidence_level()) {
        let outcome = test_against_leader(&[sample, sample], level).unwrap();
        prop_assert!(!outcome.significant);
    }

    /// Property: overall p-value is the minimum over comparisons
    #[test]
    fn prop_overall_p_is_minimum(samples in proptest::collection::vec(arb_sample(), 2..=3)) {
        let outcome = test_against_leader(&samples, 0.95).unwrap();
        let min = outcome.comparisons.iter().map(|c| c.p_value).fold(f64::INFINITY, f64::min);
        prop_assert_eq!(outcome.p_value, min);
        prop_assert_eq!(outcome.comparisons.len(), samples.len() - 1);
    }

    /// Property: Cohen's d is finite
    #[test]
    fn prop_cohens_d_finite(a in arb_sample(), b in arb_sample()) {
        let d = cohens_d(a.conversion_rate(), a.sample_size, b.conversion_rate(), b.sample_size);
        prop_assert!(d.is_finite());
    }

    // ========================================================================
    // Decision Engine
    // ========================================================================

    /// Property: winner is set iff significant, and exactly one variant is flagged
    #[test]
    fn prop_winner_gating(
        samples in proptest::collection::vec(arb_sample(), 1..=3),
        minimum in 0u64..200,
        level in arb_confidence_level()
    ) {
        let experiment = experiment_with(&samples, minimum, level);
        let results = evaluate(&experiment, true);

        let flagged: Vec<_> = results.variants.iter().filter(|v| v.is_winner).collect();
        prop_assert_eq!(results.winner.is_some(), results.statistical_significance);
        match &results.winner {
            Some(id) => {
                prop_assert_eq!(flagged.len(), 1);
                prop_assert_eq!(&flagged[0].variant_id, id);
                prop_assert!(results.effect_size.is_some());
            }
            None => {
                prop_assert!(flagged.is_empty());
                prop_assert!(results.effect_size.is_none());
            }
        }
        if let Some(p) = results.p_value {
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }

    /// Property: any variant below the minimum blocks significance
    #[test]
    fn prop_sample_size_gating(
        samples in proptest::collection::vec(arb_sample(), 2..=3),
        minimum in 1u64..10_000
    ) {
        prop_assume!(samples.iter().any(|s| s.sample_size < minimum));
        let experiment = experiment_with(&samples, minimum, 0.95);
        let results = evaluate(&experiment, true);

        prop_assert!(!results.statistical_significance);
        prop_assert!(results.recommended_action.contains("sample size"));
    }

    // ========================================================================
    // Metric Tracker
    // ========================================================================

    /// Property: a patch sequence leaves each field at its last written value
    #[test]
    fn prop_patches_overwrite(patches in proptest::collection::vec(arb_patch(), 1..10)) {
        let mut metrics = Metrics::default();
        for patch in &patches {
            metrics.apply(patch);
        }

        let last = |pick: fn(&MetricsPatch) -> Option<u64>| {
            patches.iter().rev().find_map(pick).unwrap_or(0)
        };
        prop_assert_eq!(metrics.views, last(|p| p.views));
        prop_assert_eq!(metrics.likes, last(|p| p.likes));
        prop_assert_eq!(metrics.reach, last(|p| p.reach));
        prop_assert_eq!(metrics.saves, last(|p| p.saves));
        prop_assert!(metrics.engagement_rate() >= 0.0);
    }

    /// Property: updating one variant never changes another
    #[test]
    fn prop_tracking_independence(
        writes in proptest::collection::vec((0usize..3, arb_patch()), 0..12)
    ) {
        let mut experiment = experiment_with(&[VariantSample::new(0, 0); 3], 30, 0.95);
        let ids: Vec<String> = experiment.variants().iter().map(|v| v.id().to_string()).collect();

        let mut expected = vec![Metrics::default(); 3];
        for (index, patch) in &writes {
            apply_variant_metrics(&mut experiment, &ids[*index], patch).unwrap();
            expected[*index].apply(patch);
        }

        for (variant, metrics) in experiment.variants().iter().zip(&expected) {
            prop_assert_eq!(variant.metrics(), metrics);
            prop_assert_eq!(variant.sample_size(), metrics.views);
        }
    }
}
