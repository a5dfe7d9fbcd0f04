//! Thread-local call-depth bookkeeping.
//!
//! Each thread owns a private counter; there is no cross-thread visibility and
//! thus no locking. The counter is created lazily on first use and reclaimed
//! on thread teardown.

use core::cell::Cell;

/// Number of depth units making up one visual indentation level.
pub const INDENT_STEP: u32 = 4;

thread_local! {
    static DEPTH: Cell<u32> = const { Cell::new(0) };
}

/// Returns the current thread's call depth, in depth units.
pub fn current() -> u32 {
    DEPTH.with(Cell::get)
}

/// Adds one indentation level to the current thread's depth.
pub fn increment() {
    DEPTH.with(|depth| depth.set(depth.get() + INDENT_STEP));
}

/// Removes one indentation level from the current thread's depth.
///
/// Callers must pair each `decrement` with a prior [`increment`] on the same
/// thread; [`TraceScope`](crate::TraceScope) guarantees this via scoped
/// acquisition. The subtraction saturates so that an unpaired call cannot
/// wrap the counter.
pub fn decrement() {
    DEPTH.with(|depth| depth.set(depth.get().saturating_sub(INDENT_STEP)));
}
