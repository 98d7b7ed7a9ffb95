//! # Snapshot Repository
//!
//! Purpose: the persistence seam each shape's shard loads from at
//! startup and saves to at shutdown. Grounded in
//! `original_source/core/repository/{StringCacheRepository,
//! ListCacheRepository,DictionaryCacheRepository}.go`. Concrete backends
//! (`MongoRepository`, `NoopRepository`) live in `kv-store` so `kv-engine`
//! stays free of a persistence dependency.

use async_trait::async_trait;

/// Persists and restores one shape's shards. `E` is the shape's
/// `CacheShape::SnapshotEntry` (already carries the key internally for
/// list/dictionary, so implementors decide the on-disk encoding).
#[async_trait]
pub trait SnapshotRepository<E>: Send + Sync {
    /// Loads every row previously saved for `shard_index`, or an empty
    /// vec if nothing was ever saved (including when persistence is
    /// disabled entirely).
    async fn load_all(&self, shard_index: usize) -> anyhow::Result<Vec<E>>;

    /// Replaces shard `shard_index`'s durable rows with `entries`. An
    /// implementor is free to skip unchanged rows (see the write-skip
    /// note on `MongoRepository`); callers never depend on the shape of
    /// that optimization, only on "after this call, load_all returns
    /// the entries that were live when this was called".
    async fn save_all(&self, shard_index: usize, entries: Vec<E>) -> anyhow::Result<()>;
}
