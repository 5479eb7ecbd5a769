//! `ExperimentRepository` over a byte KV store, one JSON document per experiment.

use super::{ExperimentRepository, KvStore, MemoryKvStore};
use crate::experiment::Experiment;
use crate::Result;

/// Key under which an experiment is stored.
///
/// ```rust
/// assert_eq!(trueno_ab::store::storage_key("u1", "e9"), "ab-test/u1/e9");
/// ```
#[must_use]
pub fn storage_key(owner_id: &str, experiment_id: &str) -> String {
    format!("ab-test/{owner_id}/{experiment_id}")
}

/// Stores experiments as `serde_json` bytes in a [`KvStore`].
#[derive(Debug, Default)]
pub struct KvRepository<S = MemoryKvStore> {
    store: S,
}

impl<S: KvStore> KvRepository<S> {
    /// Wrap a KV store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

impl KvRepository<MemoryKvStore> {
    /// Repository backed by a fresh [`MemoryKvStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryKvStore::new())
    }
}

impl<S: KvStore> ExperimentRepository for KvRepository<S> {
    async fn get(&self, owner_id: &str, experiment_id: &str) -> Result<Option<Experiment>> {
        let key = storage_key(owner_id, experiment_id);
        match self.store.get(&key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, owner_id: &str, experiment_id: &str, experiment: &Experiment) -> Result<()> {
        let key = storage_key(owner_id, experiment_id);
        let bytes = serde_json::to_vec(experiment)?;
        self.store.set(&key, bytes).await
    }
}
