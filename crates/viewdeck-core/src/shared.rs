//! Process-wide state-store handles.
//!
//! Each name is initialized exactly once and the handle lives for the rest
//! of the process; there is no teardown. Callers go through this accessor
//! instead of an ambient global, and initialization races collapse to a
//! single instance per name.

use crate::state::MemoryStateStore;
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

static REGISTRY: OnceLock<Mutex<BTreeMap<String, Arc<MemoryStateStore>>>> = OnceLock::new();

/// Fetch the shared state store registered under `name`, initializing it on
/// first use.
#[must_use]
pub fn shared_state_store(name: &str) -> Arc<MemoryStateStore> {
    let registry = REGISTRY.get_or_init(|| Mutex::new(BTreeMap::new()));
    let mut stores = registry.lock().unwrap_or_else(PoisonError::into_inner);

    stores
        .entry(name.to_string())
        .or_insert_with(|| Arc::new(MemoryStateStore::new()))
        .clone()
}

///
/// TESTS
///
