//! Tests for error types

use trueno_ab::{Error, ErrorKind};

#[test]
fn test_no_variants_error() {
    let error = Error::NoVariants;
    assert_eq!(format!("{error}"), "at least one variation is required");
    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[test]
fn test_too_many_variants_error() {
    let error = Error::TooManyVariants { given: 5 };
    assert_eq!(format!("{error}"), "maximum of 3 variations allowed per test");
    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[test]
fn test_duplicate_name_error() {
    let error = Error::DuplicateVariantName {
        name: "Hook".to_string(),
    };
    assert_eq!(format!("{error}"), "variation names must be unique");
    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[test]
fn test_non_finite_confidence_level_error() {
    let error = Error::NonFiniteConfidenceLevel { level: f64::NAN };
    assert_eq!(
        format!("{error}"),
        "confidence level must be a finite number"
    );
    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[test]
fn test_unknown_target_metric_error() {
    let error = Error::UnknownTargetMetric("retweets".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("unknown target metric"));
    assert!(error_str.contains("retweets"));
    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[test]
fn test_experiment_not_found_error() {
    let error = Error::ExperimentNotFound {
        owner_id: "u1".to_string(),
        experiment_id: "e1".to_string(),
    };
    assert_eq!(format!("{error}"), "A/B test not found");
    assert_eq!(error.kind(), ErrorKind::NotFound);
}

#[test]
fn test_variant_not_found_error() {
    let error = Error::VariantNotFound {
        experiment_id: "e1".to_string(),
        variant_id: "v9".to_string(),
    };
    assert_eq!(format!("{error}"), "Variation not found in A/B test");
    assert_eq!(error.kind(), ErrorKind::NotFound);
}

#[test]
fn test_storage_error() {
    let error = Error::Storage("connection reset".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Storage error"));
    assert!(error_str.contains("connection reset"));
    assert_eq!(error.kind(), ErrorKind::Storage);
}

#[test]
fn test_serialization_error_from_serde() {
    let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
    let error: Error = json_err.into();
    assert!(format!("{error}").contains("Serialization error"));
    assert_eq!(error.kind(), ErrorKind::Storage);
}

#[test]
fn test_error_debug() {
    let error = Error::NoVariants;
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("NoVariants"));
}
