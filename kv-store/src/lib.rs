//! Snapshot repository backends for `kv-engine::SnapshotRepository`:
//! `MongoRepository` for durable persistence and `NoopRepository` for
//! running with persistence disabled.

pub mod mongo;
pub mod noop;

pub use mongo::MongoRepository;
pub use noop::NoopRepository;
