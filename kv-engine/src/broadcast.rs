//! # Broadcast Group
//!
//! Purpose: operations that address every shard at once — key
//! enumeration and shutdown. Grounded in
//! `original_source/core/actors/{BroadcastStringKeysGroup,
//! BroadcastStopGroup}.go`.

use futures::future::join_all;

use crate::shard::{CacheShape, ShardError, ShardHandle};

/// Fans a command out to every shard in a shape and collects the
/// results, continuing past any individual shard failure.
pub struct BroadcastGroup<'a, S: CacheShape> {
    shards: &'a [ShardHandle<S>],
}

impl<'a, S: CacheShape> BroadcastGroup<'a, S> {
    pub fn new(shards: &'a [ShardHandle<S>]) -> Self {
        BroadcastGroup { shards }
    }

    /// Concurrently asks every shard for its live keys and concatenates
    /// the results. A shard that errors (gone, timed out) does not stop
    /// the other shards from being enumerated, but its failure is
    /// reported back alongside the keys the healthy shards returned, so
    /// callers can still surface a 500 for a partially-failed fan-out.
    pub async fn enumerate_keys(&self) -> (Vec<String>, Vec<ShardError>) {
        let replies = join_all(self.shards.iter().map(|shard| shard.get_keys())).await;
        let mut keys = Vec::new();
        let mut errors = Vec::new();
        for reply in replies {
            match reply {
                Ok(shard_keys) => keys.extend(shard_keys),
                Err(error) => errors.push(error),
            }
        }
        (keys, errors)
    }

    /// Sends `Stop` to every shard and waits for each to acknowledge,
    /// replacing the original's sleep-then-exit with a deterministic
    /// join over every shard's response.
    pub async fn stop_all(&self) -> Result<(), ShardError> {
        let replies = join_all(self.shards.iter().map(|shard| shard.stop())).await;
        for reply in replies {
            reply?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::TestClock;
    use crate::shard::spawn_shard;
    use crate::shapes::{StringCommand, StringShape};

    #[tokio::test]
    async fn enumerate_keys_collects_across_all_shards() {
        let clock = Arc::new(TestClock::new(100));
        let (handle_a, join_a) = spawn_shard(0, StringShape::new(), clock.clone());
        let (handle_b, join_b) = spawn_shard(1, StringShape::new(), clock.clone());

        handle_a
            .send_command(StringCommand::Add {
                key: "a".into(),
                value: "1".into(),
                ttl_secs: 0,
            })
            .await
            .unwrap();
        handle_b
            .send_command(StringCommand::Add {
                key: "b".into(),
                value: "2".into(),
                ttl_secs: 0,
            })
            .await
            .unwrap();

        let shards = vec![handle_a, handle_b];
        let group = BroadcastGroup::new(&shards);
        let (mut keys, errors) = group.enumerate_keys().await;
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        assert!(errors.is_empty());

        group.stop_all().await.unwrap();
        join_a.await.unwrap();
        join_b.await.unwrap();
    }
}
