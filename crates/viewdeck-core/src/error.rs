use crate::record::Record;
use thiserror::Error as ThisError;

///
/// StoreError
///
/// Rejection surfaced by the external persistence collaborator. Pure engine
/// paths never produce these; they only cross the composer seam and are
/// re-thrown to the caller, never swallowed.
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error("backend rejected the call: {message}")]
    Backend { message: String },

    #[error("conflicting write: {message}")]
    Conflict { message: String },

    #[error("entity not found: {key}")]
    NotFound { key: String },
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

///
/// ViewError
///
/// Composer-surface error for single-row operations.
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ViewError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unknown row id: {id}")]
    UnknownId { id: String },
}

///
/// BatchError
///
/// Halt-on-error payload for bulk duplication: the failure that stopped the
/// loop plus the entities already created. Earlier creations stay created;
/// there is no rollback.
///

#[derive(Debug, ThisError)]
#[error("bulk duplicate halted after {} rows: {source}", .created.len())]
pub struct BatchError<E: Record> {
    pub created: Vec<E>,
    /// Id whose creation failed; `None` when the final reload failed instead.
    pub failed_id: Option<E::Id>,
    #[source]
    pub source: StoreError,
}

///
/// BatchOutcome
///
/// Continue-on-error report for bulk deletion: ids actually removed plus
/// per-id failures, surfaced once at the end of the batch.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchOutcome<Id> {
    pub deleted: Vec<Id>,
    pub failures: Vec<(Id, StoreError)>,
}

impl<Id> BatchOutcome<Id> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            deleted: Vec::new(),
            failures: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl<Id> Default for BatchOutcome<Id> {
    fn default() -> Self {
        Self::new()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{StoreError, ViewError};

    #[test]
    fn store_errors_classify_not_found() {
        assert!(StoreError::not_found("42").is_not_found());
        assert!(!StoreError::backend("boom").is_not_found());
    }

    #[test]
    fn view_error_wraps_store_error_transparently() {
        let err: ViewError = StoreError::backend("offline").into();
        assert_eq!(err.to_string(), "backend rejected the call: offline");
    }
}
