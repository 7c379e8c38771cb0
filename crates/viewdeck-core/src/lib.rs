//! Core runtime for Viewdeck: typed records, the sorting/grouping/selection
//! engines, pagination windows, unique-identifier generation, and the
//! per-collection view composer exported via the `prelude`.
#![warn(unreachable_pub)]

pub mod direction;
pub mod error;
pub mod group;
pub mod obs;
pub mod page;
pub mod record;
pub mod select;
pub mod shared;
pub mod sort;
pub mod state;
pub mod store;
pub mod unique;
pub mod value;
pub mod view;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Upper bound on uniqueness-search probes.
///
/// The search needs at most N + 1 probes for N colliding values, so this cap
/// only keeps the loop provably bounded for arbitrary input; it is
/// unreachable for any finite scope a view can hold.
pub const MAX_SUFFIX_PROBES: u32 = 10_000;

/// Maximum length of a generated system key.
pub const MAX_SYSTEM_KEY_LEN: usize = 50;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        direction::Direction,
        record::{GroupRef, Record},
        sort::SortConfig,
        unique::SuffixPolicy,
        value::FieldValue,
        view::{CollectionView, ViewConfig, ViewPage},
    };
}
