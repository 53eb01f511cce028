//! Key-value storage backing the result cache.
//!
//! The cache only needs string keys and string values with get/set/remove,
//! scoped to one user profile. [`MemoryStore`] keeps them in process;
//! [`FileStore`] persists them to a JSON file.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::RescisaoResult;

/// A string-keyed, string-valued store.
///
/// Implementations use interior mutability so one handle can be shared by
/// the cache and by whoever inspects the store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> RescisaoResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> RescisaoResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> RescisaoResult<()>;
}
