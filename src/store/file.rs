//! File-backed key-value store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::error::{RescisaoError, RescisaoResult};

use super::KeyValueStore;

/// A key-value store persisted as a single JSON object on disk.
///
/// The file plays the role of one browser profile's local storage: every
/// change rewrites it through a temporary file and a rename, so a crash never
/// leaves a half-written store behind.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty when the file does not exist.
    ///
    /// A file that is not a JSON object of strings also opens empty: its
    /// entries are lost and the next write replaces it. Only a file that
    /// cannot be read at all is an error.
    pub fn open<P: AsRef<Path>>(path: P) -> RescisaoResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let content = fs::read(&path).map_err(|e| store_error(&path, e))?;
            parse_entries(&path, &content)
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), keys = entries.len(), "Opened file store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// The file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> RescisaoResult<MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries.lock().map_err(|_| RescisaoError::Store {
            message: format!("{}: lock poisoned", self.path.display()),
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> RescisaoResult<()> {
        let content = serde_json::to_string_pretty(entries).map_err(|e| store_error(&self.path, e))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content).map_err(|e| store_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| store_error(&self.path, e))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> RescisaoResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> RescisaoResult<()> {
        let mut entries = self.lock()?;
        // The in-memory map only changes once the file holds the new state.
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value);
        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> RescisaoResult<()> {
        let mut entries = self.lock()?;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut updated = entries.clone();
        updated.remove(key);
        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }
}

fn parse_entries(path: &Path, content: &[u8]) -> BTreeMap<String, String> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return BTreeMap::new();
    }
    match serde_json::from_slice(content) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cache file is unreadable, starting empty");
            BTreeMap::new()
        }
    }
}

fn store_error(path: &Path, error: impl std::fmt::Display) -> RescisaoError {
    RescisaoError::Store {
        message: format!("{}: {}", path.display(), error),
    }
}
