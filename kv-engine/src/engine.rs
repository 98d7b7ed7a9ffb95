//! # Shape Cluster
//!
//! Purpose: ties router + shard tasks + broadcast + snapshot together
//! into the one object `kv-server` hands a shape's HTTP routes.
//! Grounded in `original_source/core/actors/StringCacheActorCluster.go`,
//! which performs the analogous wiring for one value shape (spawn N
//! actors, build the hash group, hold the repository handle).

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::broadcast::BroadcastGroup;
use crate::clock::Clock;
use crate::router::ConsistentHashRing;
use crate::shard::{spawn_shard, CacheShape, ShardError, ShardHandle};
use crate::snapshot::SnapshotRepository;

/// One value shape's full runtime: its shards, their router, and the
/// repository used to load/save them.
pub struct ShapeCluster<S: CacheShape> {
    ring: ConsistentHashRing<S>,
    joins: Vec<JoinHandle<()>>,
    repository: Arc<dyn SnapshotRepository<S::SnapshotEntry>>,
}

impl<S: CacheShape> ShapeCluster<S> {
    /// Spawns `shard_count` shard tasks, loading each one's durable rows
    /// from `repository` before it starts serving requests.
    pub async fn start<C, F>(
        shard_count: usize,
        clock: Arc<C>,
        repository: Arc<dyn SnapshotRepository<S::SnapshotEntry>>,
        mut make_shape: F,
    ) -> anyhow::Result<Self>
    where
        C: Clock + 'static,
        F: FnMut() -> S,
    {
        let mut handles = Vec::with_capacity(shard_count);
        let mut joins = Vec::with_capacity(shard_count);

        for shard_index in 0..shard_count {
            let mut shape = make_shape();
            let loaded = repository.load_all(shard_index).await?;
            let restored = loaded.len();
            for entry in loaded {
                shape.restore_entry(entry);
            }
            if restored > 0 {
                info!(shard = shard_index, restored, "restored shard from snapshot");
            }

            let (handle, join) = spawn_shard(shard_index, shape, clock.clone());
            handles.push(handle);
            joins.push(join);
        }

        Ok(ShapeCluster {
            ring: ConsistentHashRing::new(handles),
            joins,
            repository,
        })
    }

    pub fn route(&self, key: &str) -> &ShardHandle<S> {
        self.ring.route(key)
    }

    pub fn shard_count(&self) -> usize {
        self.ring.shard_count()
    }

    /// Returns the keys every reachable shard reported, plus the errors
    /// from any shard that did not respond. Callers decide how to react
    /// to a non-empty error set (spec's aggregation contract requires
    /// reporting the failure, not silently returning a partial list).
    pub async fn enumerate_keys(&self) -> (Vec<String>, Vec<ShardError>) {
        BroadcastGroup::new(self.ring.shards()).enumerate_keys().await
    }

    /// Saves every shard's live entries, then sends `Stop` to all of
    /// them and waits for their tasks to exit. Shards are saved before
    /// being stopped so a save failure does not leave a shard already
    /// torn down.
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        for (shard_index, shard) in self.ring.shards().iter().enumerate() {
            match shard.snapshot().await {
                Ok(entries) => {
                    if let Err(error) = self.repository.save_all(shard_index, entries).await {
                        warn!(shard = shard_index, %error, "failed to save shard snapshot");
                    }
                }
                Err(ShardError::ShardGone) => {
                    warn!(shard = shard_index, "shard already gone before snapshot save");
                }
                Err(ShardError::Timeout) => {
                    warn!(shard = shard_index, "snapshot request timed out");
                }
            }
        }

        BroadcastGroup::new(self.ring.shards()).stop_all().await?;
        for join in self.joins.drain(..) {
            join.await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TestClock;
    use crate::shapes::{StringCommand, StringShape};
    use crate::snapshot::SnapshotRepository;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryRepository {
        rows: Mutex<std::collections::HashMap<usize, Vec<crate::shapes::StringSnapshotEntry>>>,
    }

    #[async_trait]
    impl SnapshotRepository<crate::shapes::StringSnapshotEntry> for InMemoryRepository {
        async fn load_all(&self, shard_index: usize) -> anyhow::Result<Vec<crate::shapes::StringSnapshotEntry>> {
            Ok(self.rows.lock().unwrap().get(&shard_index).cloned().unwrap_or_default())
        }

        async fn save_all(
            &self,
            shard_index: usize,
            entries: Vec<crate::shapes::StringSnapshotEntry>,
        ) -> anyhow::Result<()> {
            self.rows.lock().unwrap().insert(shard_index, entries);
            Ok(())
        }
    }

    #[tokio::test]
    async fn save_then_restart_restores_entries() {
        let clock = Arc::new(TestClock::new(100));
        let repository: Arc<dyn SnapshotRepository<crate::shapes::StringSnapshotEntry>> =
            Arc::new(InMemoryRepository::default());

        let cluster = ShapeCluster::start(2, clock.clone(), repository.clone(), StringShape::new)
            .await
            .unwrap();
        cluster
            .route("k")
            .send_command(StringCommand::Add {
                key: "k".into(),
                value: "v".into(),
                ttl_secs: 0,
            })
            .await
            .unwrap();
        cluster.shutdown().await.unwrap();

        let restarted = ShapeCluster::start(2, clock, repository, StringShape::new)
            .await
            .unwrap();
        let (keys, errors) = restarted.enumerate_keys().await;
        assert_eq!(keys, vec!["k".to_string()]);
        assert!(errors.is_empty());
    }
}
