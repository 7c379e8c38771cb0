use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::BTreeMap,
    sync::{Mutex, PoisonError},
};

///
/// StateStore
///
/// Local key-value persistence for view state (sort config, expanded groups,
/// current page). Values round-trip through JSON; a missing or unreadable key
/// means "use the default", never an error. Single writer, last write wins.
///

pub trait StateStore {
    fn load_raw(&self, key: &str) -> Option<serde_json::Value>;
    fn save_raw(&self, key: &str, value: serde_json::Value);

    /// Typed read; decode failures degrade to `None` like a missing key.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        self.load_raw(key)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Typed write. Values that fail to serialize are dropped silently;
    /// persisted view state is advisory, not authoritative.
    fn save<T: Serialize>(&self, key: &str, value: &T)
    where
        Self: Sized,
    {
        if let Ok(value) = serde_json::to_value(value) {
            self.save_raw(key, value);
        }
    }
}

impl<S: StateStore> StateStore for std::sync::Arc<S> {
    fn load_raw(&self, key: &str) -> Option<serde_json::Value> {
        (**self).load_raw(key)
    }

    fn save_raw(&self, key: &str, value: serde_json::Value) {
        (**self).save_raw(key, value);
    }
}

///
/// MemoryStateStore
///

#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: Mutex<BTreeMap<String, serde_json::Value>>,
}

impl MemoryStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn load_raw(&self, key: &str) -> Option<serde_json::Value> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        entries.get(key).cloned()
    }

    fn save_raw(&self, key: &str, value: serde_json::Value) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        entries.insert(key.to_string(), value);
    }
}

///
/// TESTS
///
