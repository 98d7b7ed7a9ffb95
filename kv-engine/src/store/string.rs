//! # String Store
//!
//! Purpose: the opaque-string value shape, including its compare-and-set
//! update. Grounded in `original_source/core/cache/StringCache.go`.

use ahash::RandomState;
use hashbrown::HashMap;

use crate::entry::CacheEntryData;

/// A single string entry together with its metadata.
#[derive(Debug, Clone)]
pub struct StringEntry {
    pub value: String,
    pub meta: CacheEntryData,
}

/// Single-shard string value store.
#[derive(Debug, Default)]
pub struct StringStore {
    entries: HashMap<String, StringEntry, RandomState>,
}

impl StringStore {
    pub fn new() -> Self {
        StringStore::default()
    }

    /// Removes `key` if present and expired at `now`. Returns the removed
    /// entry if it was in fact expired (the caller treats this as a miss
    /// either way it's called from).
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

    /// Returns the live value for `key`, or `None` on miss/expiry.
    pub fn try_get(&mut self, key: &str, now: i64) -> Option<String> {
        self.purge_if_expired(key, now);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Like `try_get` but returns the full entry with metadata. Used only
    /// at shutdown to build the snapshot.
    pub fn try_get_snapshot(&mut self, key: &str, now: i64) -> Option<StringEntry> {
        self.purge_if_expired(key, now);
        self.entries.get(key).cloned()
    }

    /// Inserts `value` under `key` if absent or expired.
    pub fn try_add(&mut self, key: &str, value: String, ttl_secs: i64, now: i64) -> bool {
        self.purge_if_expired(key, now);
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(
            key.to_string(),
            StringEntry {
                value,
                meta: CacheEntryData::new(now, ttl_secs),
            },
        );
        true
    }

    /// Raw insert used during snapshot restore. Refuses if already present.
    pub fn try_add_from_snapshot(&mut self, key: &str, value: String, meta: CacheEntryData) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), StringEntry { value, meta });
        true
    }

    /// Removes `key`, returning its live value if one existed.
    pub fn try_delete(&mut self, key: &str, now: i64) -> Option<String> {
        self.purge_if_expired(key, now);
        self.entries.remove(key).map(|entry| entry.value)
    }

    /// Compare-and-set: applies `new_value` iff the stored value equals
    /// `original`. Returns `(applied, observed_value)` — on mismatch the
    /// observed value lets the caller surface "already changed to X".
    pub fn try_update(
        &mut self,
        key: &str,
        new_value: String,
        original: &str,
        now: i64,
    ) -> (bool, String) {
        self.purge_if_expired(key, now);
        match self.entries.get_mut(key) {
            Some(entry) if entry.value == original => {
                let observed = std::mem::replace(&mut entry.value, new_value);
                entry.meta = entry.meta.touched(now);
                (true, observed)
            }
            Some(entry) => (false, entry.value.clone()),
            None => (false, String::new()),
        }
    }

    /// Live (non-expired) keys. Expired entries are not evicted here —
    /// the next access purges them; deleting mid-iteration is avoided.
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
    fn add_then_get_roundtrip() {
        let mut store = StringStore::new();
        assert!(store.try_add("k", "v".into(), 0, 100));
        assert_eq!(store.try_get("k", 100), Some("v".to_string()));
    }

    #[test]
    fn add_rejects_duplicate_key() {
        let mut store = StringStore::new();
        assert!(store.try_add("k", "v".into(), 0, 100));
        assert!(!store.try_add("k", "v2".into(), 0, 100));
    }

    #[test]
    fn update_succeeds_only_on_matching_original() {
        let mut store = StringStore::new();
        store.try_add("k", "a".into(), 0, 100);
        let (ok, observed) = store.try_update("k", "c".into(), "b", 101);
        assert!(!ok);
        assert_eq!(observed, "a");

        let (ok, observed) = store.try_update("k", "b".into(), "a", 102);
        assert!(ok);
        assert_eq!(observed, "a");
        assert_eq!(store.try_get("k", 102), Some("b".to_string()));
    }

    #[test]
    fn ttl_expiry_hides_entry_and_frees_the_key() {
        let mut store = StringStore::new();
        store.try_add("k", "v".into(), 5, 100);
        assert_eq!(store.try_get("k", 104), Some("v".to_string()));
        assert_eq!(store.try_get("k", 106), None);
        assert!(store.try_add("k", "v2".into(), 0, 106));
    }

    #[test]
    fn get_keys_excludes_expired() {
        let mut store = StringStore::new();
        store.try_add("alive", "v".into(), 0, 100);
        store.try_add("dead", "v".into(), 1, 100);
        let mut keys = store.get_keys(102);
        keys.sort();
        assert_eq!(keys, vec!["alive".to_string()]);
    }

    #[test]
    fn snapshot_restore_refuses_existing_key() {
        let mut store = StringStore::new();
        let meta = CacheEntryData::new(100, 0);
        assert!(store.try_add_from_snapshot("k", "v".into(), meta));
        assert!(!store.try_add_from_snapshot("k", "v2".into(), meta));
    }
}
