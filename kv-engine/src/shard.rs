//! # Shard Actor
//!
//! Purpose: the single-threaded worker that owns one value-store shard.
//! Grounded in `original_source/core/actors/{StringCacheActor,ListCacheActor,
//! DictionaryCacheActor}.go`, which are near-identical actor loops over
//! three different value shapes — here they collapse into one generic
//! loop driven by the `CacheShape` trait, replacing the actor-framework
//! `Receive` dispatch the teacher's `hkv-server/src/server.rs` does not
//! use either (it dispatches RESP commands with a plain match).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::clock::Clock;

/// Default per-request timeout, matching spec's "~50ms default,
/// configurable" policy; `kv-server` may override it per deployment.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 50;

/// A value-shape-specific store plugged into the generic shard loop.
///
/// One implementor per value shape (string / list / dictionary). The
/// shard actor knows nothing about what `Command` or `Reply` actually
/// contain; it only drives `apply`, `get_keys`, and the snapshot pair.
pub trait CacheShape: Send + 'static {
    type Command: Send;
    type Reply: Send;
    type SnapshotEntry: Send;

    /// Executes one command against the store at time `now`.
    fn apply(&mut self, command: Self::Command, now: i64) -> Self::Reply;

    /// Live (non-expired) keys at time `now`.
    fn get_keys(&self, now: i64) -> Vec<String>;

    /// All live entries, for use at shutdown when building a snapshot.
    fn snapshot_all(&mut self, now: i64) -> Vec<Self::SnapshotEntry>;

    /// Restores one entry loaded from a snapshot at startup. Silently
    /// skipped if the key is already present (should not happen on a
    /// cold start, but matches the stores' own refuse-on-duplicate rule).
    fn restore_entry(&mut self, entry: Self::SnapshotEntry);
}

/// One message routed to a shard's inbox.
pub enum ShardMessage<S: CacheShape> {
    Command(S::Command, oneshot::Sender<S::Reply>),
    GetKeys(oneshot::Sender<Vec<String>>),
    Snapshot(oneshot::Sender<Vec<S::SnapshotEntry>>),
    Stop(oneshot::Sender<()>),
}

/// Cloneable handle to a running shard. Cloning only clones the channel
/// sender (cheap, lock-free) — the actual store never leaves its task.
pub struct ShardHandle<S: CacheShape> {
    pub index: usize,
    sender: mpsc::Sender<ShardMessage<S>>,
}

impl<S: CacheShape> Clone for ShardHandle<S> {
    fn clone(&self) -> Self {
        ShardHandle {
            index: self.index,
            sender: self.sender.clone(),
        }
    }
}

/// Error surfaced when a shard request cannot be completed.
#[derive(Debug, thiserror::Error)]
pub enum ShardError {
    #[error("shard is not accepting requests")]
    ShardGone,
    #[error("shard did not reply within the request timeout")]
    Timeout,
}

impl<S: CacheShape> ShardHandle<S> {
    /// Sends `command`, awaiting the reply with a bounded timeout.
    pub async fn send_command(&self, command: S::Command) -> Result<S::Reply, ShardError> {
        let (reply_to, rx) = oneshot::channel();
        self.sender
            .send(ShardMessage::Command(command, reply_to))
            .await
            .map_err(|_| ShardError::ShardGone)?;
        tokio::time::timeout(Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS), rx)
            .await
            .map_err(|_| ShardError::Timeout)?
            .map_err(|_| ShardError::ShardGone)
    }

    /// Sends `command` with an explicit timeout override.
    pub async fn send_command_with_timeout(
        &self,
        command: S::Command,
        timeout: Duration,
    ) -> Result<S::Reply, ShardError> {
        let (reply_to, rx) = oneshot::channel();
        self.sender
            .send(ShardMessage::Command(command, reply_to))
            .await
            .map_err(|_| ShardError::ShardGone)?;
        tokio::time::timeout(timeout, rx)
            .await
            .map_err(|_| ShardError::Timeout)?
            .map_err(|_| ShardError::ShardGone)
    }

    pub async fn get_keys(&self) -> Result<Vec<String>, ShardError> {
        let (reply_to, rx) = oneshot::channel();
        self.sender
            .send(ShardMessage::GetKeys(reply_to))
            .await
            .map_err(|_| ShardError::ShardGone)?;
        rx.await.map_err(|_| ShardError::ShardGone)
    }

    pub async fn snapshot(&self) -> Result<Vec<S::SnapshotEntry>, ShardError> {
        let (reply_to, rx) = oneshot::channel();
        self.sender
            .send(ShardMessage::Snapshot(reply_to))
            .await
            .map_err(|_| ShardError::ShardGone)?;
        rx.await.map_err(|_| ShardError::ShardGone)
    }

    /// Sends `Stop` and waits for the shard to acknowledge it has drained
    /// its inbox and is about to exit its loop.
    pub async fn stop(&self) -> Result<(), ShardError> {
        let (reply_to, rx) = oneshot::channel();
        self.sender
            .send(ShardMessage::Stop(reply_to))
            .await
            .map_err(|_| ShardError::ShardGone)?;
        rx.await.map_err(|_| ShardError::ShardGone)
    }
}

/// Inbox capacity for each shard's channel.
const SHARD_INBOX_CAPACITY: usize = 1024;

/// Spawns a shard actor task and returns its handle together with the
/// task's `JoinHandle`, so callers can await a deterministic shutdown.
pub fn spawn_shard<S, C>(index: usize, mut shape: S, clock: Arc<C>) -> (ShardHandle<S>, JoinHandle<()>)
where
    S: CacheShape,
    C: Clock + 'static,
{
    let (tx, mut rx) = mpsc::channel::<ShardMessage<S>>(SHARD_INBOX_CAPACITY);
    let handle = ShardHandle { index, sender: tx };

    let join = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            match message {
                ShardMessage::Command(command, reply_to) => {
                    let now = clock.now();
                    let reply = shape.apply(command, now);
                    if reply_to.send(reply).is_err() {
                        debug!(shard = index, "caller dropped before reply was sent");
                    }
                }
                ShardMessage::GetKeys(reply_to) => {
                    let now = clock.now();
                    let keys = shape.get_keys(now);
                    let _ = reply_to.send(keys);
                }
                ShardMessage::Snapshot(reply_to) => {
                    let now = clock.now();
                    let entries = shape.snapshot_all(now);
                    let _ = reply_to.send(entries);
                }
                ShardMessage::Stop(reply_to) => {
                    let _ = reply_to.send(());
                    break;
                }
            }
        }
        warn!(shard = index, "shard actor loop exited");
    });

    (handle, join)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TestClock;

    struct EchoShape;

    impl CacheShape for EchoShape {
        type Command = i32;
        type Reply = i32;
        type SnapshotEntry = i32;

        fn apply(&mut self, command: i32, _now: i64) -> i32 {
            command * 2
        }

        fn get_keys(&self, _now: i64) -> Vec<String> {
            vec!["k".to_string()]
        }

        fn snapshot_all(&mut self, _now: i64) -> Vec<i32> {
            vec![1, 2, 3]
        }

        fn restore_entry(&mut self, _entry: i32) {}
    }

    #[tokio::test]
    async fn command_roundtrips_through_the_actor() {
        let clock = Arc::new(TestClock::new(100));
        let (handle, join) = spawn_shard(0, EchoShape, clock);
        assert_eq!(handle.send_command(21).await.unwrap(), 42);
        assert_eq!(handle.get_keys().await.unwrap(), vec!["k".to_string()]);
        handle.stop().await.unwrap();
        join.await.unwrap();
    }

    #[tokio::test]
    async fn commands_after_stop_see_shard_gone() {
        let clock = Arc::new(TestClock::new(100));
        let (handle, join) = spawn_shard(0, EchoShape, clock);
        handle.stop().await.unwrap();
        join.await.unwrap();
        let err = handle.send_command(1).await.unwrap_err();
        assert!(matches!(err, ShardError::ShardGone));
    }
}
