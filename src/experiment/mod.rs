//! A/B Test Schema
//!
//! Data structures for content variant tests.
//!
//! ## Schema Overview
//!
//! ```text
//! Experiment (1) ──< Variant (1..=3)
//!                        │
//!                        └── Metrics  [patched field-by-field]
//!
//! ExperimentResults  [derived, never stored]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use trueno_ab::experiment::{Experiment, MetricsPatch, NewVariant, TargetMetric};
//! use trueno_ab::ids::SequentialIdGenerator;
//!
//! let ids = SequentialIdGenerator::new("exp");
//! let experiment = Experiment::builder("owner-1", "Caption test", "instagram", TargetMetric::Likes)
//!     .variant(NewVariant::new("Short", "New listing!"))
//!     .variant(NewVariant::new("Long", "Just listed: 3 bed, 2 bath..."))
//!     .minimum_sample_size(100)
//!     .build(&ids)?;
//!
//! assert_eq!(experiment.variants().len(), 2);
//! # Ok::<(), trueno_ab::Error>(())
//! ```

mod experiment_record;
mod metrics;
mod registry;
mod results;
mod variant;

pub use experiment_record::{Experiment, ExperimentBuilder, ExperimentStatus};
pub use metrics::{Metrics, MetricsPatch, TargetMetric};
pub use registry::{validate_variants, MAX_VARIANTS};
pub use results::{ExperimentResults, VariantResult};
pub use variant::{NewVariant, Variant};
