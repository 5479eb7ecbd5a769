//! A/B test engine: create experiments, track variant metrics, decide winners.
//!
//! # Example
//!
//! ```rust
//! use trueno_ab::engine::{CreateExperiment, ExperimentEngine};
//! use trueno_ab::experiment::{MetricsPatch, NewVariant, TargetMetric};
//! use trueno_ab::store::KvRepository;
//!
//! # async fn example() -> trueno_ab::Result<()> {
//! let engine = ExperimentEngine::new(KvRepository::in_memory());
//!
//! let request = CreateExperiment::new(
//!     "Listing caption",
//!     "instagram",
//!     TargetMetric::Likes,
//!     vec![NewVariant::new("A", "Just listed!"), NewVariant::new("B", "Open house Sunday")],
//! )
//! .minimum_sample_size(100);
//! let experiment = engine.create_experiment("owner-1", request).await?;
//!
//! let a = experiment.variants()[0].id();
//! engine
//!     .track_variant_metrics("owner-1", experiment.experiment_id(), a, &MetricsPatch::new().views(200).likes(20))
//!     .await?;
//!
//! let results = engine.get_results("owner-1", experiment.experiment_id(), true).await?;
//! assert!(results.winner.is_none());
//! # Ok(())
//! # }
//! ```

mod decision;
mod tracker;

pub use decision::{evaluate, sample_shortfall};
pub use tracker::apply_variant_metrics;

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::EngineConfig;
use crate::experiment::{Experiment, ExperimentResults, MetricsPatch, NewVariant, TargetMetric};
use crate::ids::{IdGenerator, UuidGenerator};
use crate::store::{storage_key, ExperimentRepository};
use crate::{Error, Result};

/// Request to create an experiment.
///
/// Optional fields fall back to the engine's [`EngineConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExperiment {
    /// Display name
    pub name: String,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Content-category tag
    pub content_type: String,
    /// Variant definitions, in display order
    pub variants: Vec<NewVariant>,
    /// Counter used as the conversion numerator
    pub target_metric: TargetMetric,
    /// Per-variant sample size required before testing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_sample_size: Option<u64>,
    /// Confidence level (0.90, 0.95 or 0.99 recognized)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<f64>,
}

impl CreateExperiment {
    /// Create a request with the required fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        target_metric: TargetMetric,
        variants: Vec<NewVariant>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            content_type: content_type.into(),
            variants,
            target_metric,
            minimum_sample_size: None,
            confidence_level: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the minimum sample size.
    #[must_use]
    pub const fn minimum_sample_size(mut self, minimum_sample_size: u64) -> Self {
        self.minimum_sample_size = Some(minimum_sample_size);
        self
    }

    /// Set the confidence level.
    #[must_use]
    pub const fn confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = Some(confidence_level);
        self
    }
}

/// Entry point for A/B test operations.
///
/// Each operation is one unit of work around the repository's `get`/`put`.
/// Metric updates to the same experiment are serialized through a per-key
/// async gate, so concurrent updates to different variants never overwrite
/// each other. `get_results` takes no gate and reads whatever is stored.
pub struct ExperimentEngine<R, G = UuidGenerator> {
    repository: R,
    ids: G,
    config: EngineConfig,
    write_gates: DashMap<String, Arc<Mutex<()>>>,
}

impl<R: ExperimentRepository> ExperimentEngine<R> {
    /// Engine with random UUIDs and default config.
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self::builder(repository).build()
    }

    /// Create an engine builder
    #[must_use]
    pub fn builder(repository: R) -> ExperimentEngineBuilder<R> {
        ExperimentEngineBuilder {
            repository,
            ids: UuidGenerator,
            config: EngineConfig::default(),
        }
    }
}

impl<R: ExperimentRepository, G: IdGenerator> ExperimentEngine<R, G> {
    /// Get the repository.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Get the active config.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate and store a new experiment.
    ///
    /// # Errors
    ///
    /// Validation errors (no variants, more than three, duplicate names)
    /// leave storage untouched. Repository failures propagate.
    pub async fn create_experiment(
        &self,
        owner_id: &str,
        request: CreateExperiment,
    ) -> Result<Experiment> {
        let mut builder = Experiment::builder(
            owner_id,
            request.name,
            request.content_type,
            request.target_metric,
        )
        .variants(request.variants)
        .minimum_sample_size(
            request
                .minimum_sample_size
                .unwrap_or(self.config.default_minimum_sample_size),
        )
        .confidence_level(
            request
                .confidence_level
                .unwrap_or(self.config.default_confidence_level),
        );
        if let Some(description) = request.description {
            builder = builder.description(description);
        }

        let experiment = match builder.build(&self.ids) {
            Ok(experiment) => experiment,
            Err(err) => {
                tracing::debug!(owner_id, error = %err, "rejected A/B test definition");
                return Err(err);
            }
        };

        self.repository
            .put(owner_id, experiment.experiment_id(), &experiment)
            .await?;

        tracing::info!(
            owner_id,
            experiment_id = experiment.experiment_id(),
            variants = experiment.variants().len(),
            target_metric = %experiment.target_metric(),
            "created A/B test"
        );
        Ok(experiment)
    }

    /// Overwrite the given metric fields of one variant.
    ///
    /// # Errors
    ///
    /// [`Error::ExperimentNotFound`] or [`Error::VariantNotFound`], with no
    /// mutation. Repository failures propagate.
    pub async fn track_variant_metrics(
        &self,
        owner_id: &str,
        experiment_id: &str,
        variant_id: &str,
        patch: &MetricsPatch,
    ) -> Result<()> {
        let key = storage_key(owner_id, experiment_id);
        let gate = self.write_gate(&key);
        let result = {
            let _guard = gate.lock().await;
            self.apply_and_store(owner_id, experiment_id, variant_id, patch)
                .await
        };
        drop(gate);
        self.release_write_gate(&key);
        result
    }

    async fn apply_and_store(
        &self,
        owner_id: &str,
        experiment_id: &str,
        variant_id: &str,
        patch: &MetricsPatch,
    ) -> Result<()> {
        let mut experiment = self.load(owner_id, experiment_id).await?;
        if let Err(err) = apply_variant_metrics(&mut experiment, variant_id, patch) {
            tracing::warn!(owner_id, experiment_id, variant_id, "variant not found");
            return Err(err);
        }
        self.repository
            .put(owner_id, experiment_id, &experiment)
            .await?;

        tracing::debug!(owner_id, experiment_id, variant_id, ?patch, "tracked variant metrics");
        Ok(())
    }

    /// Compute results over the currently stored state.
    ///
    /// Pass `include_statistical_analysis = true` for the normal flow; with
    /// `false` only per-variant rates and intervals are reported.
    ///
    /// # Errors
    ///
    /// [`Error::ExperimentNotFound`]; repository failures propagate.
    pub async fn get_results(
        &self,
        owner_id: &str,
        experiment_id: &str,
        include_statistical_analysis: bool,
    ) -> Result<ExperimentResults> {
        let experiment = self.load(owner_id, experiment_id).await?;
        Ok(evaluate(&experiment, include_statistical_analysis))
    }

    async fn load(&self, owner_id: &str, experiment_id: &str) -> Result<Experiment> {
        match self.repository.get(owner_id, experiment_id).await? {
            Some(experiment) => Ok(experiment),
            None => {
                tracing::warn!(owner_id, experiment_id, "A/B test not found");
                Err(Error::ExperimentNotFound {
                    owner_id: owner_id.to_string(),
                    experiment_id: experiment_id.to_string(),
                })
            }
        }
    }

    fn write_gate(&self, key: &str) -> Arc<Mutex<()>> {
        let entry = self.write_gates.entry(key.to_string()).or_default();
        Arc::clone(entry.value())
    }

    /// Drop the gate for `key` once no other caller holds or waits on it.
    ///
    /// The check runs under the map's shard lock, which `write_gate` also
    /// takes, so no clone can appear between the count and the removal.
    fn release_write_gate(&self, key: &str) {
        self.write_gates
            .remove_if(key, |_, gate| Arc::strong_count(gate) == 1);
    }
}

/// Builder for `ExperimentEngine`
#[derive(Debug)]
pub struct ExperimentEngineBuilder<R, G = UuidGenerator> {
    repository: R,
    ids: G,
    config: EngineConfig,
}

impl<R: ExperimentRepository, G: IdGenerator> ExperimentEngineBuilder<R, G> {
    /// Replace the id generator
    #[must_use]
    pub fn id_generator<G2: IdGenerator>(self, ids: G2) -> ExperimentEngineBuilder<R, G2> {
        ExperimentEngineBuilder {
            repository: self.repository,
            ids,
            config: self.config,
        }
    }

    /// Set the engine config
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the engine
    #[must_use]
    pub fn build(self) -> ExperimentEngine<R, G> {
        ExperimentEngine {
            repository: self.repository,
            ids: self.ids,
            config: self.config,
            write_gates: DashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;
    use crate::store::KvRepository;

    fn engine() -> ExperimentEngine<KvRepository, SequentialIdGenerator> {
        ExperimentEngine::builder(KvRepository::in_memory())
            .id_generator(SequentialIdGenerator::new("g"))
            .build()
    }

    #[tokio::test]
    async fn test_write_gates_released_after_unknown_experiment() {
        let engine = engine();
        let patch = MetricsPatch::new().views(1);

        for i in 0..1000 {
            let err = engine
                .track_variant_metrics("o", &format!("missing-{i}"), "v", &patch)
                .await
                .unwrap_err();
            assert!(matches!(err, Error::ExperimentNotFound { .. }));
        }

        assert!(engine.write_gates.is_empty());
    }

    #[tokio::test]
    async fn test_write_gates_released_after_tracking() {
        let engine = Arc::new(engine());
        let request = CreateExperiment::new(
            "gates",
            "blog",
            TargetMetric::Views,
            vec![NewVariant::new("A", ""), NewVariant::new("B", "")],
        );
        let experiment = engine.create_experiment("o", request).await.unwrap();

        let mut handles = vec![];
        for round in 0..20u64 {
            for variant in experiment.variants() {
                let engine = Arc::clone(&engine);
                let experiment_id = experiment.experiment_id().to_string();
                let variant_id = variant.id().to_string();
                handles.push(tokio::spawn(async move {
                    engine
                        .track_variant_metrics(
                            "o",
                            &experiment_id,
                            &variant_id,
                            &MetricsPatch::new().views(round),
                        )
                        .await
                }));
            }
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert!(engine.write_gates.is_empty());
    }
}
