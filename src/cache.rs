//! Content-addressed, time-boxed result cache.
//!
//! Results are keyed by a fingerprint of the complete [`FormSnapshot`] and
//! kept in a [`KeyValueStore`]. Entries expire after a fixed time-to-live and
//! are evicted lazily, only when a lookup finds them stale. There is no
//! background sweep: an expired entry nobody asks for again stays inert in
//! the store.
//!
//! Matching is syntactic. Two snapshots that differ only in the order of
//! their extra-compensation records get different fingerprints.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::{RescisaoError, RescisaoResult};
use crate::models::{CacheEntry, FormSnapshot, ResultRecord};
use crate::store::KeyValueStore;

/// Builds the cache key for `snapshot`.
///
/// The key is `prefix`, an underscore, and the snapshot's canonical JSON.
///
/// # Example
///
/// ```
/// use rescisao_client::cache::build_fingerprint;
/// use rescisao_client::models::{FormSnapshot, NoticeType, TerminationReason};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let snapshot = FormSnapshot {
///     salary: Decimal::new(3000, 0),
///     admission_date: NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
///     termination_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
///     termination_reason: TerminationReason::DismissalWithoutCause,
///     notice_type: NoticeType::Indemnified,
///     is_disability_protected: false,
///     extra_compensation: vec![],
/// };
/// let key = build_fingerprint("calculadora_rescisao_cache", &snapshot).unwrap();
/// assert!(key.starts_with("calculadora_rescisao_cache_{"));
/// ```
pub fn build_fingerprint(prefix: &str, snapshot: &FormSnapshot) -> RescisaoResult<String> {
    Ok(format!("{}_{}", prefix, snapshot.canonical_json()?))
}

/// A result cache layered on a key-value store.
pub struct ResultCache<K> {
    store: K,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    key_prefix: String,
}

impl<K: KeyValueStore> ResultCache<K> {
    /// Creates a cache over `store` whose entries live for `ttl`.
    pub fn new(store: K, clock: Arc<dyn Clock>, ttl: Duration, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            clock,
            ttl,
            key_prefix: key_prefix.into(),
        }
    }

    /// The backing store.
    pub fn store(&self) -> &K {
        &self.store
    }

    /// The entry time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Builds the fingerprint for `snapshot` with this cache's key prefix.
    pub fn build_fingerprint(&self, snapshot: &FormSnapshot) -> RescisaoResult<String> {
        build_fingerprint(&self.key_prefix, snapshot)
    }

    /// Returns the cached result for `fingerprint` if it is still fresh and
    /// was computed for exactly `snapshot`.
    ///
    /// Expired and unreadable entries are evicted. Store failures are logged
    /// and treated as a miss.
    pub fn lookup(&self, fingerprint: &str, snapshot: &FormSnapshot) -> Option<ResultRecord> {
        let raw = match self.store.get(fingerprint) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "Cache read failed, treating as miss");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Discarding unreadable cache entry");
                self.evict(fingerprint);
                return None;
            }
        };

        let now = self.clock.now();
        if entry.is_expired(now, self.ttl) {
            debug!(
                stored_at = %entry.stored_at,
                age_secs = (now - entry.stored_at).num_seconds(),
                "Cache entry expired"
            );
            self.evict(fingerprint);
            return None;
        }

        // Guards against fingerprint collisions and reused keys.
        match (entry.source_snapshot.canonical_json(), snapshot.canonical_json()) {
            (Ok(stored), Ok(current)) if stored == current => Some(entry.result),
            _ => {
                debug!("Cache entry snapshot does not match current form");
                None
            }
        }
    }

    /// Stores `result` for `snapshot` under `fingerprint`, replacing any
    /// previous entry.
    pub fn store_result(
        &self,
        fingerprint: &str,
        snapshot: &FormSnapshot,
        result: &ResultRecord,
    ) -> RescisaoResult<()> {
        let entry = CacheEntry {
            fingerprint: fingerprint.to_string(),
            stored_at: self.clock.now(),
            source_snapshot: snapshot.clone(),
            result: result.clone(),
        };
        let raw = serde_json::to_string(&entry).map_err(|e| RescisaoError::Store {
            message: format!("cache entry cannot be serialized: {}", e),
        })?;
        self.store.set(fingerprint, raw)
    }

    fn evict(&self, fingerprint: &str) {
        if let Err(err) = self.store.remove(fingerprint) {
            warn!(error = %err, "Failed to evict cache entry");
        }
    }
}
