//! Viewdeck: a collection view engine for admin-style UIs.
//!
//! ## Crate layout
//! - `core`: records, sorting, grouping, selection, pagination, unique
//!   identifier generation, view composition, and observability.
//!
//! The `prelude` module mirrors the surface an application layer uses to
//! drive one collection view end to end.

pub use viewdeck_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::{MAX_SUFFIX_PROBES, MAX_SYSTEM_KEY_LEN};

///
/// Application Prelude
///

pub mod prelude {
    pub use crate::core::{
        direction::Direction,
        error::{BatchError, BatchOutcome, StoreError, ViewError},
        record::{GroupRef, Record},
        sort::SortConfig,
        state::{MemoryStateStore, StateStore},
        store::EntityStore,
        unique::SuffixPolicy,
        value::FieldValue,
        view::{CollectionView, Duplicated, ViewConfig, ViewPage},
    };
    pub use serde::{Deserialize, Serialize};
}
