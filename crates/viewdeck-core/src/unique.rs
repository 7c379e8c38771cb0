use crate::{MAX_SUFFIX_PROBES, MAX_SYSTEM_KEY_LEN};
use convert_case::{Case, Casing};
use rand_chacha::rand_core::RngCore;
use std::collections::BTreeSet;

///
/// SuffixPolicy
///
/// Per-entity-type suffix vocabulary for duplicate naming. Configured once on
/// the composer, never hardcoded per call site.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SuffixPolicy {
    pub name_suffix: String,
    pub url_suffix: String,
}

impl Default for SuffixPolicy {
    fn default() -> Self {
        Self {
            name_suffix: "Copy".to_string(),
            url_suffix: "copy".to_string(),
        }
    }
}

///
/// UniqueScope
///
/// Values a generated identifier must avoid: a snapshot of persisted values
/// plus reservations made earlier in the same batch, so siblings generated in
/// one bulk operation never collide with each other before anything is
/// persisted.
///

#[derive(Clone, Debug, Default)]
pub struct UniqueScope {
    existing: BTreeSet<String>,
    pending: BTreeSet<String>,
}

impl UniqueScope {
    #[must_use]
    pub fn of(values: impl IntoIterator<Item = String>) -> Self {
        Self {
            existing: values.into_iter().collect(),
            pending: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.existing.contains(value) || self.pending.contains(value)
    }

    /// Record a batch-local reservation.
    pub fn reserve(&mut self, value: impl Into<String>) {
        self.pending.insert(value.into());
    }
}

/// Find the first free `"{base} ({suffix})"`, then `"{base} ({suffix} {n})"`
/// for n = 2, 3, ...
///
/// Bounded loop instead of recursion: N colliding values need at most N + 1
/// probes, so [`MAX_SUFFIX_PROBES`] is unreachable for any finite scope. If
/// the cap is ever hit the last candidate is returned as-is.
#[must_use]
pub fn unique_name(base: &str, scope: &UniqueScope, policy: &SuffixPolicy) -> String {
    let suffix = &policy.name_suffix;
    let mut candidate = format!("{base} ({suffix})");

    for n in 2..=MAX_SUFFIX_PROBES {
        if !scope.contains(&candidate) {
            return candidate;
        }
        candidate = format!("{base} ({suffix} {n})");
    }

    candidate
}

/// Find the first free `"{stem}-{suffix}"`, then `"{stem}-{suffix}-{n}"`.
///
/// Any trailing `-{suffix}` or `-{suffix}-{n}` on the base is stripped first,
/// so duplicating a duplicate restarts the search at the stem instead of
/// stacking suffixes.
#[must_use]
pub fn unique_url(base: &str, scope: &UniqueScope, policy: &SuffixPolicy) -> String {
    let suffix = &policy.url_suffix;
    let stem = strip_url_suffix(base, suffix);
    let mut candidate = format!("{stem}-{suffix}");

    for n in 2..=MAX_SUFFIX_PROBES {
        if !scope.contains(&candidate) {
            return candidate;
        }
        candidate = format!("{stem}-{suffix}-{n}");
    }

    candidate
}

/// Strip one trailing `-{suffix}` or `-{suffix}-{digits}` from `base`.
#[must_use]
pub fn strip_url_suffix<'a>(base: &'a str, suffix: &str) -> &'a str {
    let marker = format!("-{suffix}");

    if let Some(stem) = base.strip_suffix(marker.as_str()) {
        return stem;
    }

    if let Some(pos) = base.rfind(&format!("{marker}-")) {
        let counter = &base[pos + marker.len() + 1..];
        if !counter.is_empty() && counter.bytes().all(|b| b.is_ascii_digit()) {
            return &base[..pos];
        }
    }

    base
}

/// Build a system key for `label`: kebab slug restricted to `[a-z0-9-]`,
/// truncated to [`MAX_SYSTEM_KEY_LEN`]. A collision with `used` appends a
/// random five-digit suffix, re-truncating the stem so the result stays
/// within the cap.
///
/// The fallback is probabilistic: one draw over 90 000 values, no retry
/// loop. A same-batch collision is possible in principle and accepted; the
/// key space makes it astronomically unlikely at realistic batch sizes.
#[must_use]
pub fn system_key(label: &str, used: &BTreeSet<String>, rng: &mut impl RngCore) -> String {
    let mut slug: String = label
        .to_case(Case::Kebab)
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    slug.truncate(MAX_SYSTEM_KEY_LEN);

    if !used.contains(&slug) {
        return slug;
    }

    let counter = 10_000 + rng.next_u32() % 90_000;
    let tail = format!("-{counter}");
    slug.truncate(MAX_SYSTEM_KEY_LEN - tail.len());
    slug.push_str(&tail);

    slug
}

///
/// TESTS
///
