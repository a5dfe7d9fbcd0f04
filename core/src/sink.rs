//! Event sinks and process-wide wiring.
//!
//! Raw [`TraceEvent`]s are handed to a [`Sink`] synchronously on the emitting
//! thread. A process-wide default sink is installed via [`set_sink()`] (the
//! render pipeline does this on initialization); [`with_sink()`] overrides the
//! default for the current thread only, which is what tests use so that
//! concurrently running tests never observe each other's events.
//!
//! The sink is the only shared resource of the tracer. It must serialize its
//! own writes; the emitting side never buffers events and never holds a lock
//! while calling [`Sink::emit()`].

use std::{
    cell::RefCell,
    sync::{Arc, Mutex, RwLock},
};

use once_cell::sync::Lazy;

use crate::TraceEvent;

/// Receiver of raw trace events.
///
/// Implemented for any `Fn(TraceEvent) + Send + Sync` closure, so a custom
/// backend can be wired with a plain hook:
///
/// ```
/// use std::sync::Arc;
///
/// traceme_core::set_sink(Arc::new(|event: traceme_core::TraceEvent| {
///     eprintln!("{event:?}");
/// }));
/// ```
pub trait Sink: Send + Sync {
    /// Consumes a single event. Called synchronously on the thread that
    /// produced the event.
    fn emit(&self, event: TraceEvent);
}

impl<F: Fn(TraceEvent) + Send + Sync> Sink for F {
    fn emit(&self, event: TraceEvent) {
        self(event);
    }
}

#[derive(Debug)]
struct NoopSink;

impl Sink for NoopSink {
    fn emit(&self, _event: TraceEvent) {
        // Dropped: no sink has been configured.
    }
}

static GLOBAL_SINK: Lazy<RwLock<Arc<dyn Sink>>> =
    Lazy::new(|| RwLock::new(Arc::new(NoopSink)));

thread_local! {
    static THREAD_SINK: RefCell<Option<Arc<dyn Sink>>> = const { RefCell::new(None) };
}

/// Installs the process-wide default sink. Re-invocation replaces the prior
/// wiring; events emitted before the first call are dropped.
pub fn set_sink(sink: Arc<dyn Sink>) {
    *GLOBAL_SINK.write().unwrap() = sink;
}

/// Runs `f` with `sink` installed as the default sink for the current thread.
///
/// The previous thread default is restored afterwards, also on unwind.
pub fn with_sink<R>(sink: Arc<dyn Sink>, f: impl FnOnce() -> R) -> R {
    struct ResetGuard(Option<Arc<dyn Sink>>);

    impl Drop for ResetGuard {
        fn drop(&mut self) {
            THREAD_SINK.with(|slot| *slot.borrow_mut() = self.0.take());
        }
    }

    let previous = THREAD_SINK.with(|slot| slot.borrow_mut().replace(sink));
    let _guard = ResetGuard(previous);
    f()
}

/// Routes an event to the thread default sink if one is set, or to the
/// process-wide sink otherwise.
pub(crate) fn emit(event: TraceEvent) {
    let thread_sink = THREAD_SINK.with(|slot| slot.borrow().clone());
    let sink = match thread_sink {
        Some(sink) => sink,
        // Clone the handle so the lock is not held during `emit`.
        None => Arc::clone(&*GLOBAL_SINK.read().unwrap()),
    };
    sink.emit(event);
}

/// Sink recording every received event in memory, for inspection in tests.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use traceme_core::{MemorySink, TraceConfig, TraceScope};
///
/// let sink = Arc::new(MemorySink::default());
/// traceme_core::with_sink(sink.clone(), || {
///     let config = TraceConfig::info().exit(true);
///     TraceScope::enter("compute", vec![], &config).in_scope(|| 1 + 1)
/// });
/// assert_eq!(sink.take().len(), 2); // enter + exit
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<TraceEvent>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the events received so far, in order of receipt.
    pub fn snapshot(&self) -> Vec<TraceEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Removes and returns the events received so far, in order of receipt.
    pub fn take(&self) -> Vec<TraceEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl Sink for MemorySink {
    fn emit(&self, event: TraceEvent) {
        self.events.lock().unwrap().push(event);
    }
}
