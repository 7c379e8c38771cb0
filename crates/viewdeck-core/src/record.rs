use crate::value::FieldValue;
use std::{fmt::Debug, hash::Hash};

///
/// GroupRef
///
/// Opaque foreign reference resolved to a display label by a caller-supplied
/// resolver (e.g. category id -> category name).
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GroupRef(pub i64);

///
/// Record
///
/// Typed schema for one managed entity type. Identity is assigned by the
/// external persistence collaborator and immutable once assigned. Optional
/// fields default at this boundary, not at use sites.
///

pub trait Record: Debug {
    /// Stable identifier.
    type Id: Clone + Debug + Eq + Hash + Ord;

    /// Create/update attribute payload accepted by the persistence
    /// collaborator.
    type Draft;

    fn id(&self) -> Self::Id;

    /// Display string used as the default sort key and duplication base.
    fn display_name(&self) -> &str;

    /// Secondary human-meaningful unique-per-collection string.
    fn url_slug(&self) -> Option<&str> {
        None
    }

    /// Foreign reference feeding the grouping resolver.
    fn group_ref(&self) -> Option<GroupRef> {
        None
    }

    /// Typed field projection for sorting. Unknown keys return `None` and
    /// sort as empty text.
    fn field(&self, key: &str) -> Option<FieldValue>;

    /// Build the create payload for a duplicate carrying a fresh name and
    /// slug. Everything else is copied from `self`.
    fn duplicate_draft(&self, name: String, url_slug: Option<String>) -> Self::Draft;
}
