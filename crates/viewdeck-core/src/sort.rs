use crate::{direction::Direction, record::Record, state::StateStore};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::HashMap};

///
/// SortConfig
///
/// Active sort for one logical view. `direction` is present iff `key` is
/// present; the unsorted state is reachable by cycling asc -> desc -> clear.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SortConfig {
    pub key: Option<String>,
    pub direction: Option<Direction>,
}

impl SortConfig {
    #[must_use]
    pub const fn unsorted() -> Self {
        Self {
            key: None,
            direction: None,
        }
    }

    #[must_use]
    pub fn sorted(key: impl Into<String>, direction: Direction) -> Self {
        Self {
            key: Some(key.into()),
            direction: Some(direction),
        }
    }

    #[must_use]
    pub const fn is_sorted(&self) -> bool {
        self.key.is_some()
    }

    /// Three-state cycle: a different key starts ascending, the same key
    /// flips asc -> desc, and a third press clears back to unsorted.
    #[must_use]
    pub fn cycled(&self, key: &str) -> Self {
        match (self.key.as_deref(), self.direction) {
            (Some(active), Some(Direction::Asc)) if active == key => {
                Self::sorted(key, Direction::Desc)
            }
            (Some(active), Some(Direction::Desc)) if active == key => Self::unsorted(),
            _ => Self::sorted(key, Direction::Asc),
        }
    }
}

/// Comparator registered for one sort key. The comparator owns direction
/// handling; the engine does not re-negate its result.
pub type FieldComparator<E> = Box<dyn Fn(&E, &E, Direction) -> Ordering>;

///
/// ComparatorRegistry
///
/// Per-key custom comparators consulted before the default typed-field path.
///

pub struct ComparatorRegistry<E> {
    by_key: HashMap<String, FieldComparator<E>>,
}

impl<E> Default for ComparatorRegistry<E> {
    fn default() -> Self {
        Self {
            by_key: HashMap::new(),
        }
    }
}

impl<E> ComparatorRegistry<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        key: impl Into<String>,
        comparator: impl Fn(&E, &E, Direction) -> Ordering + 'static,
    ) {
        self.by_key.insert(key.into(), Box::new(comparator));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldComparator<E>> {
        self.by_key.get(key)
    }
}

/// Stable in-place sort under the active configuration.
///
/// An unsorted config is a no-op that preserves insertion order. Unknown keys
/// project every row to empty text, so the comparator returns `Equal`
/// everywhere and the stable sort leaves the slice untouched; sorting never
/// fails.
pub fn sort_records<E: Record>(
    items: &mut [E],
    config: &SortConfig,
    comparators: &ComparatorRegistry<E>,
) {
    let Some(key) = config.key.as_deref() else {
        return;
    };
    let direction = config.direction.unwrap_or_default();

    if let Some(comparator) = comparators.get(key) {
        items.sort_by(|a, b| comparator(a, b, direction));
    } else {
        items.sort_by(|a, b| {
            let left = a.field(key).unwrap_or_default();
            let right = b.field(key).unwrap_or_default();

            direction.apply(left.total_cmp(&right))
        });
    }
}

///
/// SortBinding
///
/// Couples a sort configuration to its persisted state key: restored on
/// construction (falling back to the caller's default) and written back on
/// every change.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortBinding {
    state_key: String,
    config: SortConfig,
}

impl SortBinding {
    /// Restore the persisted sort for `state_key`, or fall back to `default`.
    pub fn restore(state: &impl StateStore, state_key: impl Into<String>, default: SortConfig) -> Self {
        let state_key = state_key.into();
        let config = state.load(&state_key).unwrap_or(default);

        Self { state_key, config }
    }

    #[must_use]
    pub const fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Cycle the active sort for `key` and persist the result immediately.
    pub fn handle_sort(&mut self, state: &impl StateStore, key: &str) {
        self.config = self.config.cycled(key);
        state.save(&self.state_key, &self.config);
    }
}

///
/// TESTS
///
