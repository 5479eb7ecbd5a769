//! # Trueno-AB: Statistical A/B Test Engine
//!
//! **Version**: 0.1.0
//!
//! Trueno-AB decides, for a content variant test, whether one variant is
//! significantly outperforming the others and should be declared the
//! winner.
//!
//! ## Pipeline
//!
//! ```text
//! create_experiment ──> track_variant_metrics (per variant, repeated)
//!                                  │
//!                                  v
//!                            get_results
//!                  ┌───────────────┼────────────────┐
//!         confidence_interval  test_against_leader  cohens_d
//! ```
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Poka-Yoke safety**: Variant-set validation before any write; metric
//!   patches overwrite fields, never accumulate
//! - **Jidoka**: The statistics pipeline is total; degenerate input yields a
//!   defined default, never NaN or a panic
//! - **Genchi Genbutsu**: Winner decisions come with p-value, interval and
//!   effect size so they can be checked by hand
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use trueno_ab::engine::{CreateExperiment, ExperimentEngine};
//! use trueno_ab::experiment::{MetricsPatch, NewVariant, TargetMetric};
//! use trueno_ab::store::KvRepository;
//!
//! # async fn run() -> trueno_ab::Result<()> {
//! let engine = ExperimentEngine::new(KvRepository::in_memory());
//! let experiment = engine
//!     .create_experiment(
//!         "owner-1",
//!         CreateExperiment::new(
//!             "Hook test",
//!             "linkedin",
//!             TargetMetric::Likes,
//!             vec![NewVariant::new("A", "..."), NewVariant::new("B", "...")],
//!         ),
//!     )
//!     .await?;
//!
//! for (variant, likes) in experiment.variants().iter().zip([20, 50]) {
//!     let patch = MetricsPatch::new().views(200).likes(likes);
//!     engine
//!         .track_variant_metrics("owner-1", experiment.experiment_id(), variant.id(), &patch)
//!         .await?;
//! }
//!
//! let results = engine
//!     .get_results("owner-1", experiment.experiment_id(), true)
//!     .await?;
//! println!("{}", results.recommended_action);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod engine;
pub mod error;
pub mod experiment;
pub mod ids;
pub mod outcome;
pub mod stats;
pub mod store;

pub use config::EngineConfig;
pub use engine::{CreateExperiment, ExperimentEngine};
pub use error::{Error, ErrorKind, Result};
pub use outcome::Outcome;
