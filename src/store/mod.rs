//! Persistence collaborator for experiments.
//!
//! The engine only needs [`ExperimentRepository`]: a last-write-wins
//! `get`/`put` keyed by owner and experiment id. [`KvRepository`] provides
//! it on top of any byte-oriented [`KvStore`], such as the in-process
//! [`MemoryKvStore`].
//!
//! # Example
//!
//! ```rust,no_run
//! use trueno_ab::store::{KvStore, MemoryKvStore};
//!
//! # async fn example() -> trueno_ab::Result<()> {
//! let store = MemoryKvStore::new();
//!
//! store.set("key", b"value".to_vec()).await?;
//! let value = store.get("key").await?;
//! assert_eq!(value, Some(b"value".to_vec()));
//! # Ok(())
//! # }
//! ```

mod memory;
mod repository;

pub use memory::MemoryKvStore;
pub use repository::{storage_key, KvRepository};

use crate::experiment::Experiment;
use crate::Result;
use std::future::Future;

/// Byte-oriented key-value store.
pub trait KvStore: Send + Sync {
    /// Get a value by key.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;

    /// Set a value for a key.
    ///
    /// Overwrites any existing value.
    fn set(&self, key: &str, value: Vec<u8>) -> impl Future<Output = Result<()>> + Send;
}

/// Storage for experiment records, keyed by (owner id, experiment id).
///
/// Both operations are last-write-wins with single-record atomicity; no
/// transactions are expected.
pub trait ExperimentRepository: Send + Sync {
    /// Load an experiment. `Ok(None)` if it does not exist.
    fn get(
        &self,
        owner_id: &str,
        experiment_id: &str,
    ) -> impl Future<Output = Result<Option<Experiment>>> + Send;

    /// Store an experiment, replacing any previous record.
    fn put(
        &self,
        owner_id: &str,
        experiment_id: &str,
        experiment: &Experiment,
    ) -> impl Future<Output = Result<()>> + Send;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::experiment::{NewVariant, TargetMetric};
    use crate::ids::SequentialIdGenerator;

    fn experiment_for(owner_id: &str, ids: &SequentialIdGenerator) -> Experiment {
        Experiment::builder(owner_id, "Hook", "social", TargetMetric::Shares)
            .variants([NewVariant::new("A", "a"), NewVariant::new("B", "b")])
            .build(ids)
            .unwrap()
    }

    #[tokio::test]
    async fn test_memory_kv_overwrite_keeps_one_entry() {
        let store = MemoryKvStore::default();
        assert!(store.is_empty());

        store.set("ab-test/o/e", b"v1".to_vec()).await.unwrap();
        store.set("ab-test/o/e", b"v2".to_vec()).await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("ab-test/o/e").await.unwrap(), Some(b"v2".to_vec()));
        assert_eq!(store.get("ab-test/o/missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_repository_concurrent_puts_across_owners() {
        let repo = Arc::new(KvRepository::in_memory());
        let ids = Arc::new(SequentialIdGenerator::new("c"));
        let mut handles = vec![];

        for i in 0..50 {
            let repo = Arc::clone(&repo);
            let ids = Arc::clone(&ids);
            handles.push(tokio::spawn(async move {
                let owner_id = format!("owner-{}", i % 5);
                let experiment = experiment_for(&owner_id, &ids);
                repo.put(&owner_id, experiment.experiment_id(), &experiment)
                    .await
                    .unwrap();
                experiment
            }));
        }

        let mut stored = vec![];
        for handle in handles {
            stored.push(handle.await.unwrap());
        }

        assert_eq!(repo.store().len(), 50);
        for experiment in &stored {
            let owner_id = experiment.owner_id();
            let loaded = repo
                .get(owner_id, experiment.experiment_id())
                .await
                .unwrap();
            assert_eq!(loaded.as_ref(), Some(experiment));

            // Same id under a different owner is a different key.
            let foreign = repo
                .get("owner-x", experiment.experiment_id())
                .await
                .unwrap();
            assert!(foreign.is_none());
        }
    }
}
