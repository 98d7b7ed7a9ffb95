//! # List Shape
//!
//! Grounded in `original_source/core/actors/ListCacheActor.go`.

use crate::entry::CacheEntryData;
use crate::shard::CacheShape;
use crate::store::{ListEntry, ListStore};

#[derive(Debug)]
pub enum ListCommand {
    Get { key: String },
    Add { key: String, values: Vec<String>, ttl_secs: i64 },
    Delete { key: String },
    AddValue { key: String, value: String },
    UpdateValue { key: String, new_value: String, original: String },
    DeleteValue { key: String, value: String },
}

#[derive(Debug, PartialEq)]
pub enum ListReply {
    Values(Option<Vec<String>>),
    Added(bool),
    Deleted(Option<Vec<String>>),
    ValueAdded(bool),
    ValueUpdated(bool),
    ValueDeleted(bool),
}

/// Snapshot row: `(key, values, metadata)`.
pub type ListSnapshotEntry = (String, Vec<String>, CacheEntryData);

pub struct ListShape {
    store: ListStore,
}

impl ListShape {
    pub fn new() -> Self {
        ListShape { store: ListStore::new() }
    }
}

impl Default for ListShape {
    fn default() -> Self {
        ListShape::new()
    }
}

impl CacheShape for ListShape {
    type Command = ListCommand;
    type Reply = ListReply;
    type SnapshotEntry = ListSnapshotEntry;

    fn apply(&mut self, command: ListCommand, now: i64) -> ListReply {
        match command {
            ListCommand::Get { key } => ListReply::Values(self.store.try_get(&key, now)),
            ListCommand::Add { key, values, ttl_secs } => {
                ListReply::Added(self.store.try_add(&key, values, ttl_secs, now))
            }
            ListCommand::Delete { key } => ListReply::Deleted(self.store.try_delete(&key, now)),
            ListCommand::AddValue { key, value } => {
                ListReply::ValueAdded(self.store.try_add_value(&key, value, now))
            }
            ListCommand::UpdateValue { key, new_value, original } => {
                ListReply::ValueUpdated(self.store.try_update_value(&key, &new_value, &original, now))
            }
            ListCommand::DeleteValue { key, value } => {
                ListReply::ValueDeleted(self.store.try_delete_value(&key, &value, now))
            }
        }
    }

    fn get_keys(&self, now: i64) -> Vec<String> {
        self.store.get_keys(now)
    }

    fn snapshot_all(&mut self, now: i64) -> Vec<ListSnapshotEntry> {
        self.store
            .get_keys(now)
            .into_iter()
            .filter_map(|key| {
                self.store
                    .try_get_snapshot(&key, now)
                    .map(|entry: ListEntry| (key, entry.values, entry.meta))
            })
            .collect()
    }

    fn restore_entry(&mut self, (key, values, meta): ListSnapshotEntry) {
        self.store.try_add_from_snapshot(&key, values, meta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_value_replaces_all_occurrences_through_the_shape() {
        let mut shape = ListShape::new();
        shape.apply(
            ListCommand::Add {
                key: "L".into(),
                values: vec!["x".into(), "y".into(), "x".into()],
                ttl_secs: 0,
            },
            100,
        );
        assert_eq!(
            shape.apply(
                ListCommand::UpdateValue {
                    key: "L".into(),
                    new_value: "z".into(),
                    original: "x".into(),
                },
                101
            ),
            ListReply::ValueUpdated(true)
        );
        assert_eq!(
            shape.apply(ListCommand::Get { key: "L".into() }, 101),
            ListReply::Values(Some(vec!["z".to_string(), "y".to_string(), "z".to_string()]))
        );
    }

    #[test]
    fn add_value_on_unknown_key_fails() {
        let mut shape = ListShape::new();
        assert_eq!(
            shape.apply(
                ListCommand::AddValue {
                    key: "missing".into(),
                    value: "x".into(),
                },
                100
            ),
            ListReply::ValueAdded(false)
        );
    }
}
