//! Event accounting for view operations.
//!
//! Composer logic MUST NOT touch counter state directly; all instrumentation
//! flows through [`ViewEvent`] and [`ViewSink`]. This module is the only
//! bridge between view operations and the process-local counters.

mod sink;

pub use sink::{ViewEvent, ViewSink, with_view_sink};

pub(crate) use sink::record;

use std::cell::RefCell;

///
/// OpCounters
///
/// Per-thread operation counters accumulated by the default sink.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OpCounters {
    pub sorts_applied: u64,
    pub pages_snapped: u64,
    pub rows_duplicated: u64,
    pub rows_deleted: u64,
    pub delete_failures: u64,
}

thread_local! {
    static STATE: RefCell<OpCounters> = RefCell::new(OpCounters::default());
}

pub(crate) fn with_state_mut<T>(f: impl FnOnce(&mut OpCounters) -> T) -> T {
    STATE.with(|cell| f(&mut cell.borrow_mut()))
}

/// Snapshot the current counters for endpoint/test plumbing.
#[must_use]
pub fn counters() -> OpCounters {
    STATE.with(|cell| cell.borrow().clone())
}

/// Reset all counters.
pub fn reset() {
    STATE.with(|cell| *cell.borrow_mut() = OpCounters::default());
}
