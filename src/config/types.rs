//! Configuration types for the rescisão client.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every key is optional
//! and falls back to the defaults below.

use std::path::PathBuf;

use chrono::Duration;
use serde::Deserialize;

/// Default calculation endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://calculadora-rescisao.onrender.com/api/calcular";

/// Default prefix for cache keys in the key-value store.
pub const DEFAULT_CACHE_KEY_PREFIX: &str = "calculadora_rescisao_cache";

/// Default cache time-to-live, one hour.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 60 * 60;

/// Default lifetime of a user notice.
pub const DEFAULT_NOTICE_SECONDS: u64 = 5;

/// Cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Prefix prepended to every fingerprint.
    pub key_prefix: String,
    /// Seconds after which an entry is no longer honored.
    pub ttl_seconds: u64,
    /// File backing the persistent store.
    pub store_path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_CACHE_KEY_PREFIX.to_string(),
            ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            store_path: PathBuf::from(".rescisao-cache.json"),
        }
    }
}

/// Notice settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    /// Seconds a notice stays visible before it is dismissed.
    pub display_seconds: u64,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            display_seconds: DEFAULT_NOTICE_SECONDS,
        }
    }
}

/// The complete client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// URL of the remote calculation endpoint.
    pub endpoint: String,
    /// Cache settings.
    pub cache: CacheConfig,
    /// Notice settings.
    pub notices: NoticeConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cache: CacheConfig::default(),
            notices: NoticeConfig::default(),
        }
    }
}

impl ClientConfig {
    /// The cache time-to-live as a duration.
    pub fn cache_ttl(&self) -> Duration {
        seconds(self.cache.ttl_seconds)
    }

    /// How long a notice stays visible.
    pub fn notice_lifetime(&self) -> Duration {
        seconds(self.notices.display_seconds)
    }
}

fn seconds(value: u64) -> Duration {
    i64::try_from(value)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}
