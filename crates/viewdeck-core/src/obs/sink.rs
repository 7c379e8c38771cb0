use std::{cell::RefCell, rc::Rc};

///
/// ViewEvent
///

#[derive(Clone, Copy, Debug)]
pub enum ViewEvent {
    SortApplied,
    PageSnapped,
    RowsDuplicated { count: u64 },
    RowsDeleted { count: u64 },
    DeleteFailed,
}

///
/// ViewSink
///
/// Boundary between view operations and counter state. The composer records
/// through this trait only; tests install a scoped override.
///

pub trait ViewSink {
    fn record(&self, event: ViewEvent);
}

/// Default sink writing into the process-local counter state.
struct CounterSink;

impl ViewSink for CounterSink {
    fn record(&self, event: ViewEvent) {
        super::with_state_mut(|state| match event {
            ViewEvent::SortApplied => {
                state.sorts_applied = state.sorts_applied.saturating_add(1);
            }
            ViewEvent::PageSnapped => {
                state.pages_snapped = state.pages_snapped.saturating_add(1);
            }
            ViewEvent::RowsDuplicated { count } => {
                state.rows_duplicated = state.rows_duplicated.saturating_add(count);
            }
            ViewEvent::RowsDeleted { count } => {
                state.rows_deleted = state.rows_deleted.saturating_add(count);
            }
            ViewEvent::DeleteFailed => {
                state.delete_failures = state.delete_failures.saturating_add(1);
            }
        });
    }
}

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn ViewSink>>> = const { RefCell::new(None) };
}

pub(crate) fn record(event: ViewEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => CounterSink.record(event),
    }
}

/// Run a closure with a temporary sink override. The previous sink is
/// restored on all exits, including unwind.
pub fn with_view_sink<T>(sink: Rc<dyn ViewSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn ViewSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| *cell.borrow_mut() = self.0.take());
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{ViewEvent, ViewSink, record, with_view_sink};
    use crate::obs;
    use std::{cell::Cell, rc::Rc};

    struct CountingSink {
        calls: Cell<usize>,
    }

    impl ViewSink for CountingSink {
        fn record(&self, _: ViewEvent) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    #[test]
    fn default_sink_accumulates_counters() {
        obs::reset();

        record(ViewEvent::SortApplied);
        record(ViewEvent::RowsDeleted { count: 3 });
        record(ViewEvent::DeleteFailed);

        let counters = obs::counters();
        assert_eq!(counters.sorts_applied, 1);
        assert_eq!(counters.rows_deleted, 3);
        assert_eq!(counters.delete_failures, 1);
    }

    #[test]
    fn override_routes_events_and_restores_on_exit() {
        obs::reset();
        let sink = Rc::new(CountingSink {
            calls: Cell::new(0),
        });

        with_view_sink(sink.clone(), || {
            record(ViewEvent::SortApplied);
            record(ViewEvent::PageSnapped);
        });

        assert_eq!(sink.calls.get(), 2);
        // Counters untouched while the override was installed.
        assert_eq!(obs::counters().sorts_applied, 0);

        record(ViewEvent::SortApplied);
        assert_eq!(obs::counters().sorts_applied, 1);
        assert_eq!(sink.calls.get(), 2);
    }

    #[test]
    fn nested_overrides_restore_the_outer_sink() {
        obs::reset();
        let outer = Rc::new(CountingSink {
            calls: Cell::new(0),
        });
        let inner = Rc::new(CountingSink {
            calls: Cell::new(0),
        });

        with_view_sink(outer.clone(), || {
            record(ViewEvent::SortApplied);
            with_view_sink(inner.clone(), || {
                record(ViewEvent::SortApplied);
            });
            record(ViewEvent::SortApplied);
        });

        assert_eq!(outer.calls.get(), 2);
        assert_eq!(inner.calls.get(), 1);
    }
}
