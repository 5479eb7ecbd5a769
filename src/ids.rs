//! Id generation for experiments and variants.
//!
//! The engine never reaches for a global random source; it asks an
//! [`IdGenerator`]. Production code uses [`UuidGenerator`], tests use
//! [`SequentialIdGenerator`] or a closure.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh, unique ids.
pub trait IdGenerator: Send + Sync {
    /// Produce the next id.
    fn next_id(&self) -> String;
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_id(&self) -> String {
        self()
    }
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic ids: `{prefix}-1`, `{prefix}-2`, ...
///
/// ```rust
/// use trueno_ab::ids::{IdGenerator, SequentialIdGenerator};
///
/// let ids = SequentialIdGenerator::new("var");
/// assert_eq!(ids.next_id(), "var-1");
/// assert_eq!(ids.next_id(), "var-2");
/// ```
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    /// Create a generator starting at 1.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{n}", self.prefix)
    }
}
