//! Tests for top-level engine API

use trueno_ab::experiment::{NewVariant, TargetMetric};
use trueno_ab::ids::SequentialIdGenerator;
use trueno_ab::store::KvRepository;
use trueno_ab::{CreateExperiment, EngineConfig, ExperimentEngine, Outcome};

fn request() -> CreateExperiment {
    CreateExperiment::new(
        "Top-level",
        "social",
        TargetMetric::Shares,
        vec![NewVariant::new("A", "a"), NewVariant::new("B", "b")],
    )
}

#[test]
fn test_engine_new_uses_default_config() {
    let engine = ExperimentEngine::new(KvRepository::in_memory());
    assert_eq!(engine.config(), &EngineConfig::default());
    assert!(engine.repository().store().is_empty());
}

#[test]
fn test_engine_builder_chain() {
    let config = EngineConfig::builder()
        .default_minimum_sample_size(500)
        .default_confidence_level(0.99)
        .build();

    let engine = ExperimentEngine::builder(KvRepository::in_memory())
        .id_generator(SequentialIdGenerator::new("t"))
        .config(config.clone())
        .build();

    assert_eq!(engine.config(), &config);
}

#[tokio::test]
async fn test_engine_config_fills_missing_request_fields() {
    let engine = ExperimentEngine::builder(KvRepository::in_memory())
        .config(
            EngineConfig::builder()
                .default_minimum_sample_size(500)
                .default_confidence_level(0.99)
                .build(),
        )
        .build();

    let experiment = engine.create_experiment("o", request()).await.unwrap();
    assert_eq!(experiment.minimum_sample_size(), 500);
    assert!((experiment.confidence_level() - 0.99).abs() < f64::EPSILON);

    let explicit = engine
        .create_experiment("o", request().minimum_sample_size(5).confidence_level(0.9))
        .await
        .unwrap();
    assert_eq!(explicit.minimum_sample_size(), 5);
    assert!((explicit.confidence_level() - 0.9).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_outcome_wraps_engine_result() {
    let engine = ExperimentEngine::builder(KvRepository::in_memory())
        .id_generator(SequentialIdGenerator::new("t"))
        .build();

    let created: Outcome<_> = engine.create_experiment("o", request()).await.into();
    assert!(created.success);
    assert_eq!(created.data.unwrap().experiment_id(), "t-1");

    let rejected: Outcome<_> = engine
        .create_experiment(
            "o",
            CreateExperiment::new("empty", "social", TargetMetric::Views, vec![]),
        )
        .await
        .into();
    assert!(!rejected.success);
    assert_eq!(
        rejected.error.as_deref(),
        Some("at least one variation is required")
    );
}

#[test]
fn test_create_request_from_json() {
    let request: CreateExperiment = serde_json::from_str(
        r#"{
            "name": "Caption",
            "contentType": "instagram",
            "targetMetric": "comments",
            "variants": [{"name": "A", "content": "x"}]
        }"#,
    )
    .unwrap();

    assert_eq!(request.target_metric, TargetMetric::Comments);
    assert_eq!(request.variants.len(), 1);
    assert!(request.minimum_sample_size.is_none());
    assert!(request.confidence_level.is_none());
}
