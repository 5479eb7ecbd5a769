//! Error types for Trueno-AB
//!
//! Display strings are the exact caller-facing messages. Use
//! [`Error::kind`] for programmatic dispatch rather than matching on text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::experiment::MAX_VARIANTS;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Trueno-AB error types
#[derive(Error, Debug)]
pub enum Error {
    /// Experiment created without any variants
    #[error("at least one variation is required")]
    NoVariants,

    /// Experiment created with more than [`MAX_VARIANTS`] variants
    #[error("maximum of {MAX_VARIANTS} variations allowed per test")]
    TooManyVariants {
        /// Number of variants supplied
        given: usize,
    },

    /// Two variants share a name (exact, case-sensitive match)
    #[error("variation names must be unique")]
    DuplicateVariantName {
        /// First repeated name
        name: String,
    },

    /// Confidence level is NaN or infinite and cannot be stored
    #[error("confidence level must be a finite number")]
    NonFiniteConfidenceLevel {
        /// Level supplied
        level: f64,
    },

    /// Target metric name outside the supported set
    #[error("unknown target metric: {0}")]
    UnknownTargetMetric(String),

    /// No experiment stored for this owner/id pair
    #[error("A/B test not found")]
    ExperimentNotFound {
        /// Owner the lookup was scoped to
        owner_id: String,
        /// Requested experiment id
        experiment_id: String,
    },

    /// Variant id does not belong to the experiment
    #[error("Variation not found in A/B test")]
    VariantNotFound {
        /// Experiment that was searched
        experiment_id: String,
        /// Requested variant id
        variant_id: String,
    },

    /// Storage collaborator failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored record could not be encoded/decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse error category for programmatic dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Rejected input; nothing was stored. Safe to retry with corrected input.
    Validation,
    /// Unknown experiment or variant; nothing was mutated.
    NotFound,
    /// Failure in the persistence collaborator.
    Storage,
}

impl Error {
    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoVariants
            | Self::TooManyVariants { .. }
            | Self::DuplicateVariantName { .. }
            | Self::NonFiniteConfidenceLevel { .. }
            | Self::UnknownTargetMetric(_) => ErrorKind::Validation,
            Self::ExperimentNotFound { .. } | Self::VariantNotFound { .. } => ErrorKind::NotFound,
            Self::Storage(_) | Self::Serialization(_) => ErrorKind::Storage,
        }
    }
}
