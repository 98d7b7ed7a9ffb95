//! Grounded in `original_source/core/repository/StringCacheRepository.go`'s
//! `EmptyStringCacheRepository`, which is used whenever persistence is
//! disabled so the engine doesn't need two separate code paths.

use async_trait::async_trait;
use kv_engine::SnapshotRepository;

/// Loads nothing and discards everything it's asked to save.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRepository;

#[async_trait]
impl<E: Send + Sync + 'static> SnapshotRepository<E> for NoopRepository {
    async fn load_all(&self, _shard_index: usize) -> anyhow::Result<Vec<E>> {
        Ok(Vec::new())
    }

    async fn save_all(&self, _shard_index: usize, _entries: Vec<E>) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_all_is_always_empty() {
        let repo = NoopRepository;
        let loaded: Vec<(String, String)> = repo.load_all(0).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn save_all_never_errors() {
        let repo = NoopRepository;
        repo.save_all(0, vec![("a".to_string(), "b".to_string())])
            .await
            .unwrap();
    }
}
