//! # Dictionary Store
//!
//! Purpose: the subkey-to-value map shape, with per-subkey compare-and-set.
//! Grounded in `original_source/core/cache/DictionaryCache.go`.

use ahash::RandomState;
use hashbrown::HashMap;

use crate::entry::CacheEntryData;

#[derive(Debug, Clone)]
pub struct DictionaryEntry {
    pub values: HashMap<String, String, RandomState>,
    pub meta: CacheEntryData,
}

#[derive(Debug, Default)]
pub struct DictionaryStore {
    entries: HashMap<String, DictionaryEntry, RandomState>,
}

impl DictionaryStore {
    pub fn new() -> Self {
        DictionaryStore::default()
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

    pub fn try_get(&mut self, key: &str, now: i64) -> Option<HashMap<String, String, RandomState>> {
        self.purge_if_expired(key, now);
        self.entries.get(key).map(|entry| entry.values.clone())
    }

    pub fn try_get_snapshot(&mut self, key: &str, now: i64) -> Option<DictionaryEntry> {
        self.purge_if_expired(key, now);
        self.entries.get(key).cloned()
    }

    pub fn try_add(
        &mut self,
        key: &str,
        values: HashMap<String, String, RandomState>,
        ttl_secs: i64,
        now: i64,
    ) -> bool {
        self.purge_if_expired(key, now);
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(
            key.to_string(),
            DictionaryEntry {
                values,
                meta: CacheEntryData::new(now, ttl_secs),
            },
        );
        true
    }

    pub fn try_add_from_snapshot(
        &mut self,
        key: &str,
        values: HashMap<String, String, RandomState>,
        meta: CacheEntryData,
    ) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), DictionaryEntry { values, meta });
        true
    }

    pub fn try_delete(&mut self, key: &str, now: i64) -> Option<HashMap<String, String, RandomState>> {
        self.purge_if_expired(key, now);
        self.entries.remove(key).map(|entry| entry.values)
    }

    /// Inserts `subkey` only if it is not already present; never overwrites.
    pub fn try_add_value(&mut self, key: &str, subkey: &str, value: String, now: i64) -> bool {
        self.purge_if_expired(key, now);
        match self.entries.get_mut(key) {
            Some(entry) => {
                if entry.values.contains_key(subkey) {
                    return false;
                }
                entry.values.insert(subkey.to_string(), value);
                entry.meta = entry.meta.touched(now);
                true
            }
            None => false,
        }
    }

    /// Compare-and-set a subkey's value. Returns `(applied, observed_value)`.
    pub fn try_update_value(
        &mut self,
        key: &str,
        subkey: &str,
        new_value: String,
        original: &str,
        now: i64,
    ) -> (bool, Option<String>) {
        self.purge_if_expired(key, now);
        match self.entries.get_mut(key) {
            Some(entry) => match entry.values.get_mut(subkey) {
                Some(current) if current == original => {
                    let observed = std::mem::replace(current, new_value);
                    entry.meta = entry.meta.touched(now);
                    (true, Some(observed))
                }
                Some(current) => (false, Some(current.clone())),
                None => (false, None),
            },
            None => (false, None),
        }
    }

    /// Removes `subkey`, returning its value if it existed.
    pub fn try_delete_value(&mut self, key: &str, subkey: &str, now: i64) -> Option<String> {
        self.purge_if_expired(key, now);
        match self.entries.get_mut(key) {
            Some(entry) => {
                let removed = entry.values.remove(subkey);
                if removed.is_some() {
                    entry.meta = entry.meta.touched(now);
                }
                removed
            }
            None => None,
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
