//! Typed preference with readiness semantics

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::store::KeyValueStore;

/// One persisted preference, JSON-encoded under a single key.
///
/// The default value applies until `load` has run once. Readiness is
/// monotonic: `load` marks the preference ready whether or not the store
/// held anything, and it never reverts within a session. Consumers should
/// render a default/disabled state while `is_ready` is false rather than
/// guessing.
pub struct Preference<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    value: T,
    ready: bool,
}

impl<T> Preference<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, default: T) -> Self {
        Self {
            store,
            key: key.into(),
            value: default,
            ready: false,
        }
    }

    /// One-shot initial read. A malformed persisted value is discarded
    /// (logged only) and the default kept; success and failure alike
    /// transition to ready.
    pub fn load(&mut self) {
        match self.store.get(&self.key) {
            Some(raw) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => self.value = value,
                Err(e) => {
                    warn!(key = %self.key, error = %e, "discarding malformed persisted preference");
                }
            },
            None => debug!(key = %self.key, "no persisted preference, keeping default"),
        }
        self.ready = true;
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Update the in-memory value; persist only once the initial load has
    /// completed.
    pub fn set(&mut self, value: T) {
        self.value = value;
        if !self.ready {
            return;
        }
        match serde_json::to_string(&self.value) {
            Ok(encoded) => self.store.set(&self.key, &encoded),
            Err(e) => warn!(key = %self.key, error = %e, "failed to encode preference"),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
    #[serde(rename_all = "lowercase")]
    enum Size {
        Small,
        #[default]
        Medium,
        Large,
    }

    #[test]
    fn test_empty_store_loads_default_and_becomes_ready() {
        let store = Arc::new(MemoryStore::new());
        let mut pref = Preference::new(store, "fontSize", Size::default());

        assert!(!pref.is_ready());
        assert_eq!(*pref.get(), Size::Medium);

        pref.load();
        assert!(pref.is_ready());
        assert_eq!(*pref.get(), Size::Medium);
    }

    #[test]
    fn test_set_then_fresh_load_round_trips() {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());

        let mut pref = Preference::new(store.clone() as Arc<dyn KeyValueStore>, "fontSize", Size::default());
        pref.load();
        pref.set(Size::Large);

        let mut fresh = Preference::new(store as Arc<dyn KeyValueStore>, "fontSize", Size::default());
        fresh.load();
        assert!(fresh.is_ready());
        assert_eq!(*fresh.get(), Size::Large);
    }

    #[test]
    fn test_set_before_ready_does_not_persist() {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());

        let mut pref = Preference::new(store.clone() as Arc<dyn KeyValueStore>, "fontSize", Size::default());
        pref.set(Size::Large);
        assert_eq!(*pref.get(), Size::Large);
        assert_eq!(store.get("fontSize"), None);
    }

    #[test]
    fn test_malformed_persisted_value_keeps_default() {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        store.set("fontSize", "\"gigantic\"");

        let mut pref = Preference::new(store as Arc<dyn KeyValueStore>, "fontSize", Size::default());
        pref.load();
        assert!(pref.is_ready());
        assert_eq!(*pref.get(), Size::Medium);
    }
}
