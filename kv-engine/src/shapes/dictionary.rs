//! # Dictionary Shape
//!
//! Grounded in `original_source/core/actors/DictionaryCacheActor.go`.

use ahash::RandomState;
use hashbrown::HashMap;

use crate::entry::CacheEntryData;
use crate::shard::CacheShape;
use crate::store::DictionaryStore;

#[derive(Debug)]
pub enum DictionaryCommand {
    Get { key: String },
    Add { key: String, values: Vec<(String, String)>, ttl_secs: i64 },
    Delete { key: String },
    AddValue { key: String, subkey: String, value: String },
    UpdateValue { key: String, subkey: String, new_value: String, original: String },
    DeleteValue { key: String, subkey: String },
}

#[derive(Debug, PartialEq)]
pub enum DictionaryReply {
    Values(Option<Vec<(String, String)>>),
    Added(bool),
    Deleted(Option<Vec<(String, String)>>),
    ValueAdded(bool),
    /// `(applied, observed_value)` — `observed_value` is `None` when the
    /// subkey never existed.
    ValueUpdated(bool, Option<String>),
    ValueDeleted(Option<String>),
}

/// Snapshot row: `(key, subkey/value pairs, metadata)`.
pub type DictionarySnapshotEntry = (String, Vec<(String, String)>, CacheEntryData);

pub struct DictionaryShape {
    store: DictionaryStore,
}

impl DictionaryShape {
    pub fn new() -> Self {
        DictionaryShape {
            store: DictionaryStore::new(),
        }
    }
}

impl Default for DictionaryShape {
    fn default() -> Self {
        DictionaryShape::new()
    }
}

fn to_map(pairs: Vec<(String, String)>) -> HashMap<String, String, RandomState> {
    let mut map = HashMap::with_hasher(RandomState::default());
    for (k, v) in pairs {
        map.insert(k, v);
    }
    map
}

fn to_pairs(map: HashMap<String, String, RandomState>) -> Vec<(String, String)> {
    map.into_iter().collect()
}

impl CacheShape for DictionaryShape {
    type Command = DictionaryCommand;
    type Reply = DictionaryReply;
    type SnapshotEntry = DictionarySnapshotEntry;

    fn apply(&mut self, command: DictionaryCommand, now: i64) -> DictionaryReply {
        match command {
            DictionaryCommand::Get { key } => {
                DictionaryReply::Values(self.store.try_get(&key, now).map(to_pairs))
            }
            DictionaryCommand::Add { key, values, ttl_secs } => {
                DictionaryReply::Added(self.store.try_add(&key, to_map(values), ttl_secs, now))
            }
            DictionaryCommand::Delete { key } => {
                DictionaryReply::Deleted(self.store.try_delete(&key, now).map(to_pairs))
            }
            DictionaryCommand::AddValue { key, subkey, value } => {
                DictionaryReply::ValueAdded(self.store.try_add_value(&key, &subkey, value, now))
            }
            DictionaryCommand::UpdateValue {
                key,
                subkey,
                new_value,
                original,
            } => {
                let (applied, observed) =
                    self.store.try_update_value(&key, &subkey, new_value, &original, now);
                DictionaryReply::ValueUpdated(applied, observed)
            }
            DictionaryCommand::DeleteValue { key, subkey } => {
                DictionaryReply::ValueDeleted(self.store.try_delete_value(&key, &subkey, now))
            }
        }
    }

    fn get_keys(&self, now: i64) -> Vec<String> {
        self.store.get_keys(now)
    }

    fn snapshot_all(&mut self, now: i64) -> Vec<DictionarySnapshotEntry> {
        self.store
            .get_keys(now)
            .into_iter()
            .filter_map(|key| {
                self.store
                    .try_get_snapshot(&key, now)
                    .map(|entry| (key, to_pairs(entry.values), entry.meta))
            })
            .collect()
    }

    fn restore_entry(&mut self, (key, values, meta): DictionarySnapshotEntry) {
        self.store.try_add_from_snapshot(&key, to_map(values), meta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_duplicate_subkey_through_the_shape() {
        let mut shape = DictionaryShape::new();
        shape.apply(
            DictionaryCommand::Add {
                key: "D".into(),
                values: vec![("a".into(), "1".into())],
                ttl_secs: 0,
            },
            100,
        );
        assert_eq!(
            shape.apply(
                DictionaryCommand::AddValue {
                    key: "D".into(),
                    subkey: "a".into(),
                    value: "2".into(),
                },
                101
            ),
            DictionaryReply::ValueAdded(false)
        );
    }

    #[test]
    fn update_value_cas_reports_observed_value() {
        let mut shape = DictionaryShape::new();
        shape.apply(
            DictionaryCommand::Add {
                key: "D".into(),
                values: vec![("a".into(), "1".into())],
                ttl_secs: 0,
            },
            100,
        );
        assert_eq!(
            shape.apply(
                DictionaryCommand::UpdateValue {
                    key: "D".into(),
                    subkey: "a".into(),
                    new_value: "3".into(),
                    original: "2".into(),
                },
                101
            ),
            DictionaryReply::ValueUpdated(false, Some("1".to_string()))
        );
    }
}
