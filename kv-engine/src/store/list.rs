//! # List Store
//!
//! Purpose: the ordered-list-of-strings value shape. Update/delete act on
//! all matching occurrences, not just the first. Grounded in
//! `original_source/core/cache/ListCache.go`.

use ahash::RandomState;
use hashbrown::HashMap;

use crate::entry::CacheEntryData;

#[derive(Debug, Clone)]
pub struct ListEntry {
    pub values: Vec<String>,
    pub meta: CacheEntryData,
}

#[derive(Debug, Default)]
pub struct ListStore {
    entries: HashMap<String, ListEntry, RandomState>,
}

impl ListStore {
    pub fn new() -> Self {
        ListStore::default()
    }

    fn purge_if_expired(&mut self, key: &str, now: i64) {
        let expired = self
            .entries
            .get(key)
            .map(|entry| entry.meta.is_expired(now))
            .unwrap_or(false);
        if expired {
            self.entries.remove(key);
        }
    }

    pub fn try_get(&mut self, key: &str, now: i64) -> Option<Vec<String>> {
        self.purge_if_expired(key, now);
        self.entries.get(key).map(|entry| entry.values.clone())
    }

    pub fn try_get_snapshot(&mut self, key: &str, now: i64) -> Option<ListEntry> {
        self.purge_if_expired(key, now);
        self.entries.get(key).cloned()
    }

    pub fn try_add(&mut self, key: &str, values: Vec<String>, ttl_secs: i64, now: i64) -> bool {
        self.purge_if_expired(key, now);
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(
            key.to_string(),
            ListEntry {
                values,
                meta: CacheEntryData::new(now, ttl_secs),
            },
        );
        true
    }

    pub fn try_add_from_snapshot(&mut self, key: &str, values: Vec<String>, meta: CacheEntryData) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), ListEntry { values, meta });
        true
    }

    pub fn try_delete(&mut self, key: &str, now: i64) -> Option<Vec<String>> {
        self.purge_if_expired(key, now);
        self.entries.remove(key).map(|entry| entry.values)
    }

    /// Appends `value` to the list under `key`, if the key is live.
    pub fn try_add_value(&mut self, key: &str, value: String, now: i64) -> bool {
        self.purge_if_expired(key, now);
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.values.push(value);
                entry.meta = entry.meta.touched(now);
                true
            }
            None => false,
        }
    }

    /// Replaces every occurrence of `original` with `new_value`, preserving
    /// order. Succeeds iff at least one occurrence existed.
    pub fn try_update_value(&mut self, key: &str, new_value: &str, original: &str, now: i64) -> bool {
        self.purge_if_expired(key, now);
        match self.entries.get_mut(key) {
            Some(entry) => {
                let mut changed = false;
                for item in entry.values.iter_mut() {
                    if item == original {
                        *item = new_value.to_string();
                        changed = true;
                    }
                }
                if changed {
                    entry.meta = entry.meta.touched(now);
                }
                changed
            }
            None => false,
        }
    }

    /// Removes every occurrence of `value`. Succeeds iff at least one
    /// occurrence was removed.
    pub fn try_delete_value(&mut self, key: &str, value: &str, now: i64) -> bool {
        self.purge_if_expired(key, now);
        match self.entries.get_mut(key) {
            Some(entry) => {
                let before = entry.values.len();
                entry.values.retain(|item| item != value);
                let changed = entry.values.len() != before;
                if changed {
                    entry.meta = entry.meta.touched(now);
                }
                changed
            }
            None => false,
        }
    }

    pub fn get_keys(&self, now: i64) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.meta.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_value_appends_to_existing_list() {
        let mut store = ListStore::new();
        store.try_add("k", vec!["a".into()], 0, 100);
        assert!(store.try_add_value("k", "b".into(), 101));
        assert_eq!(store.try_get("k", 101), Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn add_value_fails_on_missing_key() {
        let mut store = ListStore::new();
        assert!(!store.try_add_value("missing", "b".into(), 100));
    }

    #[test]
    fn update_value_replaces_all_occurrences() {
        let mut store = ListStore::new();
        store.try_add("k", vec!["a".into(), "b".into(), "a".into()], 0, 100);
        assert!(store.try_update_value("k", "z", "a", 101));
        assert_eq!(
            store.try_get("k", 101),
            Some(vec!["z".to_string(), "b".to_string(), "z".to_string()])
        );
    }

    #[test]
    fn update_value_fails_when_original_absent() {
        let mut store = ListStore::new();
        store.try_add("k", vec!["a".into()], 0, 100);
        assert!(!store.try_update_value("k", "z", "missing", 101));
    }

    #[test]
    fn delete_value_removes_all_occurrences() {
        let mut store = ListStore::new();
        store.try_add("k", vec!["a".into(), "b".into(), "a".into()], 0, 100);
        assert!(store.try_delete_value("k", "a", 101));
        assert_eq!(store.try_get("k", 101), Some(vec!["b".to_string()]));
    }

    #[test]
    fn ttl_expiry_clears_the_list() {
        let mut store = ListStore::new();
        store.try_add("k", vec!["a".into()], 5, 100);
        assert_eq!(store.try_get("k", 106), None);
    }
}
