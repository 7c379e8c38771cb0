use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

///
/// GroupedRows
///
/// One grouping bucket: the resolved display label plus row indexes into the
/// sorted input. Indexes keep the bucket borrow-free and preserve input order
/// within the group.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupedRows {
    pub label: String,
    pub rows: Vec<usize>,
}

/// Group already-sorted rows by resolved label.
///
/// Unresolved references land in the empty-string bucket, never dropped.
/// Buckets are ordered case-insensitively by label, recomputed on every call
/// and independent of encounter order; the case-sensitive label is the
/// tie-break so distinct-cased labels stay distinct and deterministic. Every
/// input row lands in exactly one bucket.
#[must_use]
pub fn group_records<E>(sorted: &[E], resolver: impl Fn(&E) -> Option<String>) -> Vec<GroupedRows> {
    let mut buckets: BTreeMap<(String, String), Vec<usize>> = BTreeMap::new();

    for (row, record) in sorted.iter().enumerate() {
        let label = resolver(record).unwrap_or_default();
        buckets
            .entry((label.to_lowercase(), label))
            .or_default()
            .push(row);
    }

    buckets
        .into_iter()
        .map(|((_, label), rows)| GroupedRows { label, rows })
        .collect()
}

///
/// ExpandedGroups
///
/// Display labels currently expanded. Membership is label equality, so two
/// groups resolving to the same label expand and collapse together, and an
/// empty group can stay expanded. Persisted per logical view.
///

#[derive(
    Clone, Debug, Default, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize,
)]
pub struct ExpandedGroups(BTreeSet<String>);

impl ExpandedGroups {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Symmetric-difference toggle on one label.
    pub fn toggle(&mut self, label: &str) {
        if !self.0.remove(label) {
            self.0.insert(label.to_string());
        }
    }

    pub fn expand(&mut self, label: impl Into<String>) {
        self.0.insert(label.into());
    }
}

/// Flatten the row indexes of expanded buckets: bucket order first, input
/// order within each bucket. Feeds select-all-visible and grouped pagination.
#[must_use]
pub fn visible_rows(groups: &[GroupedRows], expanded: &ExpandedGroups) -> Vec<usize> {
    groups
        .iter()
        .filter(|group| expanded.contains(&group.label))
        .flat_map(|group| group.rows.iter().copied())
        .collect()
}

///
/// TESTS
///
