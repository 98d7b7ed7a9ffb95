//! # String Shape
//!
//! Purpose: wires `StringStore` into a `CacheShape` the generic shard
//! loop can drive. Grounded in
//! `original_source/core/actors/StringCacheActor.go`.

use crate::entry::CacheEntryData;
use crate::shard::CacheShape;
use crate::store::{StringEntry, StringStore};

#[derive(Debug)]
pub enum StringCommand {
    Get { key: String },
    Add { key: String, value: String, ttl_secs: i64 },
    Delete { key: String },
    Update { key: String, value: String, original: String },
}

#[derive(Debug, PartialEq)]
pub enum StringReply {
    Value(Option<String>),
    Added(bool),
    Deleted(Option<String>),
    /// `(applied, observed_value)` — mirrors `StringStore::try_update`.
    Updated(bool, String),
}

/// Snapshot row: `(key, value, metadata)`.
pub type StringSnapshotEntry = (String, String, CacheEntryData);

pub struct StringShape {
    store: StringStore,
}

impl StringShape {
    pub fn new() -> Self {
        StringShape {
            store: StringStore::new(),
        }
    }
}

impl Default for StringShape {
    fn default() -> Self {
        StringShape::new()
    }
}

impl CacheShape for StringShape {
    type Command = StringCommand;
    type Reply = StringReply;
    type SnapshotEntry = StringSnapshotEntry;

    fn apply(&mut self, command: StringCommand, now: i64) -> StringReply {
        match command {
            StringCommand::Get { key } => StringReply::Value(self.store.try_get(&key, now)),
            StringCommand::Add { key, value, ttl_secs } => {
                StringReply::Added(self.store.try_add(&key, value, ttl_secs, now))
            }
            StringCommand::Delete { key } => StringReply::Deleted(self.store.try_delete(&key, now)),
            StringCommand::Update { key, value, original } => {
                let (applied, observed) = self.store.try_update(&key, value, &original, now);
                StringReply::Updated(applied, observed)
            }
        }
    }

    fn get_keys(&self, now: i64) -> Vec<String> {
        self.store.get_keys(now)
    }

    fn snapshot_all(&mut self, now: i64) -> Vec<StringSnapshotEntry> {
        self.store
            .get_keys(now)
            .into_iter()
            .filter_map(|key| {
                self.store
                    .try_get_snapshot(&key, now)
                    .map(|entry: StringEntry| (key, entry.value, entry.meta))
            })
            .collect()
    }

    fn restore_entry(&mut self, (key, value, meta): StringSnapshotEntry) {
        self.store.try_add_from_snapshot(&key, value, meta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_get_delete_cycle() {
        let mut shape = StringShape::new();
        assert_eq!(
            shape.apply(
                StringCommand::Add {
                    key: "k".into(),
                    value: "v".into(),
                    ttl_secs: 0,
                },
                100
            ),
            StringReply::Added(true)
        );
        assert_eq!(
            shape.apply(StringCommand::Get { key: "k".into() }, 100),
            StringReply::Value(Some("v".to_string()))
        );
        assert_eq!(
            shape.apply(StringCommand::Delete { key: "k".into() }, 101),
            StringReply::Deleted(Some("v".to_string()))
        );
    }

    #[test]
    fn snapshot_roundtrip_restores_entry() {
        let mut shape = StringShape::new();
        shape.apply(
            StringCommand::Add {
                key: "k".into(),
                value: "v".into(),
                ttl_secs: 0,
            },
            100,
        );
        let snapshot = shape.snapshot_all(100);
        assert_eq!(snapshot.len(), 1);

        let mut restored = StringShape::new();
        for entry in snapshot {
            restored.restore_entry(entry);
        }
        assert_eq!(
            restored.apply(StringCommand::Get { key: "k".into() }, 100),
            StringReply::Value(Some("v".to_string()))
        );
    }
}
