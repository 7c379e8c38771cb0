use derive_more::{Deref, IntoIterator};
use std::collections::BTreeSet;

///
/// SelectionSet
///
/// Selected row identifiers for one collection view. Membership is explicit:
/// the set is not pruned when rows disappear elsewhere, so deletion flows
/// must remove ids with `toggle(ids, Some(false))`. Stale ids are tolerated
/// silently everywhere.
///

#[derive(Clone, Debug, Deref, Eq, IntoIterator, PartialEq)]
pub struct SelectionSet<Id: Ord>(BTreeSet<Id>);

impl<Id: Ord> Default for SelectionSet<Id> {
    fn default() -> Self {
        Self(BTreeSet::new())
    }
}

impl<Id: Clone + Ord> SelectionSet<Id> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle membership for `ids`.
    ///
    /// - `force == None`: select-all semantics — if every id is already
    ///   selected they are all removed, otherwise the union is selected.
    ///   For a single id this degenerates to a plain membership toggle.
    /// - `force == Some(true)`: union, deduplicated.
    /// - `force == Some(false)`: remove exactly those ids; removing an
    ///   absent id is a no-op.
    pub fn toggle(&mut self, ids: &[Id], force: Option<bool>) {
        let select = match force {
            Some(state) => state,
            None => !ids.iter().all(|id| self.0.contains(id)),
        };

        if select {
            for id in ids {
                self.0.insert(id.clone());
            }
        } else {
            for id in ids {
                self.0.remove(id);
            }
        }
    }

    /// Membership toggle for a single id.
    pub fn toggle_one(&mut self, id: Id) {
        if !self.0.remove(&id) {
            self.0.insert(id);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::SelectionSet;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    #[test]
    fn single_id_toggles_membership() {
        let mut selection = SelectionSet::new();
        selection.toggle_one(7u64);
        assert!(selection.contains(&7));

        selection.toggle_one(7);
        assert!(!selection.contains(&7));
    }

    #[test]
    fn toggle_all_selects_the_union_when_any_id_is_missing() {
        let mut selection = SelectionSet::new();
        selection.toggle_one(1u64);

        selection.toggle(&[1, 2, 3], None);
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn toggle_all_deselects_when_every_id_is_selected() {
        let mut selection = SelectionSet::new();
        selection.toggle(&[1u64, 2, 3], Some(true));

        selection.toggle(&[1, 2, 3], None);
        assert!(selection.is_empty());
    }

    #[test]
    fn force_false_is_idempotent_on_absent_ids() {
        let mut selection = SelectionSet::new();
        selection.toggle_one(5u64);

        selection.toggle(&[5, 99], Some(false));
        selection.toggle(&[5, 99], Some(false));
        assert!(selection.is_empty());
    }

    #[test]
    fn force_true_then_false_restores_disjoint_state() {
        let mut selection = SelectionSet::new();
        selection.toggle_one(1u64);

        selection.toggle(&[8, 9], Some(true));
        selection.toggle(&[8, 9], Some(false));

        let remaining: Vec<u64> = selection.iter().copied().collect();
        assert_eq!(remaining, [1]);
    }

    proptest! {
        // toggle(ids, None) applied twice returns to the original state when
        // the ids are disjoint from the current selection (select-all then
        // select-none over the same rows).
        #[test]
        fn toggle_all_is_an_involution_on_disjoint_ids(
            initial in proptest::collection::btree_set(0u64..16, 0..8),
            ids in proptest::collection::vec(16u64..32, 0..8),
        ) {
            let mut selection = SelectionSet::new();
            let seed: Vec<u64> = initial.iter().copied().collect();
            selection.toggle(&seed, Some(true));
            let before = selection.clone();

            selection.toggle(&ids, None);
            selection.toggle(&ids, None);

            prop_assert_eq!(selection, before);
        }

        // Membership after any toggle is consistent with set algebra.
        #[test]
        fn force_semantics_match_union_and_difference(
            initial in proptest::collection::btree_set(0u64..16, 0..8),
            ids in proptest::collection::vec(0u64..16, 0..8),
            force in proptest::option::of(any::<bool>()),
        ) {
            let mut selection = SelectionSet::new();
            let seed: Vec<u64> = initial.iter().copied().collect();
            selection.toggle(&seed, Some(true));

            let id_set: BTreeSet<u64> = ids.iter().copied().collect();
            let select = match force {
                Some(state) => state,
                None => !id_set.iter().all(|id| initial.contains(id)),
            };
            let expected: BTreeSet<u64> = if select {
                initial.union(&id_set).copied().collect()
            } else {
                initial.difference(&id_set).copied().collect()
            };

            selection.toggle(&ids, force);
            let actual: BTreeSet<u64> = selection.iter().copied().collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
