//! Key-value storage backends

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

/// Injected key-value capability backing persisted preferences.
///
/// Both operations are synchronous from the caller's perspective.
/// Implementations must swallow storage failures (logging them), never
/// surface them to the caller.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw stored value, or `None` when absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Store a raw value. Failures are logged and dropped.
    fn set(&self, key: &str, value: &str);
}

/// File-backed store: one JSON object per file, keys mapped to raw
/// string values.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read preference file");
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "preference file is not valid JSON");
                BTreeMap::new()
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        let encoded = match serde_json::to_string_pretty(&map) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "failed to encode preference file");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, encoded) {
            warn!(path = %self.path.display(), error = %e, "failed to write preference file");
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.entries.lock() {
            Ok(entries) => entries.get(key).cloned(),
            Err(e) => {
                warn!(error = %e, "preference store lock poisoned");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value.to_string());
            }
            Err(e) => {
                warn!(error = %e, "preference store lock poisoned");
            }
        }
    }
}
