//! Sharded, actor-based in-memory cache engine: value stores, the
//! generic shard worker loop, consistent-hash routing, broadcast
//! key-enumeration/shutdown, and the snapshot persistence seam.

pub mod broadcast;
pub mod clock;
pub mod engine;
pub mod entry;
pub mod router;
pub mod shapes;
pub mod shard;
pub mod snapshot;
pub mod store;

pub use clock::{Clock, SystemClock, TestClock};
pub use engine::ShapeCluster;
pub use entry::CacheEntryData;
pub use shard::{CacheShape, ShardError, ShardHandle};
pub use snapshot::SnapshotRepository;
