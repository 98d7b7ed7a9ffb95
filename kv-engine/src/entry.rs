//! # Entry Metadata
//!
//! Purpose: the `added`/`updated`/`expireAfter`/`persisted` bookkeeping
//! shared by every value shape, grounded in
//! `original_source/core/cache/CacheEntryData.go`.

use serde::{Deserialize, Serialize};

/// Metadata common to every stored entry, independent of its value shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntryData {
    /// Creation instant, Unix seconds.
    pub added: i64,
    /// Last-mutation instant, Unix seconds.
    pub updated: i64,
    /// Absolute expiration instant, Unix seconds, or `0` meaning "never".
    pub expire_after: i64,
    /// Whether this entry exists in the last durable snapshot.
    pub persisted: bool,
}

impl CacheEntryData {
    /// Builds metadata for a freshly inserted entry.
    ///
    /// `ttl_secs <= 0` means no expiration.
    pub fn new(now: i64, ttl_secs: i64) -> Self {
        let expire_after = if ttl_secs > 0 { now + ttl_secs } else { 0 };
        CacheEntryData {
            added: now,
            updated: now,
            expire_after,
            persisted: false,
        }
    }

    /// Returns a copy with `updated` advanced to `now`; `added`,
    /// `expire_after`, and `persisted` are carried over unchanged.
    pub fn touched(self, now: i64) -> Self {
        CacheEntryData {
            updated: now,
            ..self
        }
    }

    /// True once `now` has passed `expire_after` (never true when
    /// `expire_after == 0`).
    pub fn is_expired(&self, now: i64) -> bool {
        self.expire_after != 0 && now > self.expire_after
    }
}
