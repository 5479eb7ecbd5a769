//! Variant-set validation for new experiments.

use rustc_hash::FxHashSet;

use super::NewVariant;
use crate::{Error, Result};

/// Maximum number of variants per experiment.
pub const MAX_VARIANTS: usize = 3;

/// Check a proposed variant set.
///
/// Checks run in order: non-empty, at most [`MAX_VARIANTS`], unique names
/// (exact, case-sensitive). The first failure is returned.
///
/// # Errors
///
/// [`Error::NoVariants`], [`Error::TooManyVariants`] or
/// [`Error::DuplicateVariantName`].
pub fn validate_variants(variants: &[NewVariant]) -> Result<()> {
    if variants.is_empty() {
        return Err(Error::NoVariants);
    }
    if variants.len() > MAX_VARIANTS {
        return Err(Error::TooManyVariants {
            given: variants.len(),
        });
    }

    let mut seen = FxHashSet::default();
    for variant in variants {
        if !seen.insert(variant.name.as_str()) {
            return Err(Error::DuplicateVariantName {
                name: variant.name.clone(),
            });
        }
    }

    Ok(())
}
