//! Cache entry model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::stored::StoredEntry;
use super::{FormSnapshot, ResultRecord};

/// A cached calculation outcome as persisted in the key-value store.
///
/// Entries are never mutated; a newer result for the same fingerprint
/// replaces the whole entry. Serialized with amounts as decimal strings, so
/// a stored entry reads back exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "StoredEntry", from = "StoredEntry")]
pub struct CacheEntry {
    /// The key the entry was stored under.
    pub fingerprint: String,
    /// When the entry was written.
    pub stored_at: DateTime<Utc>,
    /// The snapshot the result was computed for, kept for the equality re-check.
    pub source_snapshot: FormSnapshot,
    /// The computed breakdown.
    pub result: ResultRecord,
}

impl CacheEntry {
    /// Returns true when the entry is older than `ttl` at `now`.
    ///
    /// An entry exactly `ttl` old is still fresh.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.stored_at > ttl
    }
}
