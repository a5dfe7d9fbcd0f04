//! Scope guards and the instrumentation wrapper family.

use core::fmt;
use std::{mem, thread, time::Instant};

use crate::{
    depth, sink, ArgValue, Direction, Level, Outcome, TraceConfig, TraceEvent, TraceValues,
};

/// Guard tied to a single traced invocation.
///
/// Creating the scope emits an enter event at the current depth and increments
/// the calling thread's depth counter; dropping it decrements the counter
/// unconditionally and, if [exit logging](TraceConfig::exit()) is enabled,
/// emits an exit event carrying the elapsed time and the outcome. The
/// decrement runs on every exit path, including unwinding, so depth
/// bookkeeping survives panics in the traced callable.
///
/// The guard must be dropped on the thread that created it. Tracing a
/// computation that suspends and resumes on a different thread is unsupported:
/// depth is thread-local and would be corrupted.
///
/// # Examples
///
/// ```
/// use traceme_core::{TraceConfig, TraceScope};
///
/// let config = TraceConfig::info().exit(true);
/// let scope = TraceScope::enter("add", vec![2_i64.into(), 3_i64.into()], &config);
/// let sum = scope.in_scope(|| 2 + 3);
/// assert_eq!(sum, 5);
/// ```
#[derive(Debug)]
pub struct TraceScope {
    name: String,
    level: Level,
    exit: bool,
    timeit: bool,
    start: Instant,
    outcome: Option<Outcome>,
}

impl TraceScope {
    /// Opens a scope: captures the start time, emits an enter event with the
    /// provided argument snapshot, and increments the thread's depth.
    pub fn enter(name: impl Into<String>, args: Vec<ArgValue>, config: &TraceConfig) -> Self {
        let name = name.into();
        let start = Instant::now();

        let mut event = TraceEvent::new(config.level, name.clone());
        event.direction = Some(Direction::Enter);
        event.depth = Some(depth::current());
        event.args = args;
        sink::emit(event);
        depth::increment();

        Self {
            name,
            level: config.level,
            exit: config.exit,
            timeit: config.timeit,
            start,
            outcome: None,
        }
    }

    /// Records a failure description for the exit event. Without an explicit
    /// outcome, the exit event reports `Ok` (or a panic if the scope is
    /// dropped during unwinding).
    pub fn fail(&mut self, description: impl Into<String>) {
        self.outcome = Some(Outcome::Failed(description.into()));
    }

    /// Runs `f` within this scope, consuming the scope when `f` completes
    /// or panics.
    pub fn in_scope<R>(self, f: impl FnOnce() -> R) -> R {
        // `self` is dropped after `f` returns or during its unwind.
        let _scope = self;
        f()
    }

    /// Runs the fallible `f` within this scope; an `Err` is recorded as a
    /// failed outcome on the exit event and returned unchanged.
    pub fn in_scope_result<T, E: fmt::Display>(
        mut self,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let result = f();
        if let Err(err) = &result {
            self.fail(err.to_string());
        }
        result
    }
}

impl Drop for TraceScope {
    fn drop(&mut self) {
        depth::decrement();
        if !self.exit {
            return;
        }
        let outcome = self.outcome.take().unwrap_or_else(|| {
            if thread::panicking() {
                Outcome::Failed("panicked".to_owned())
            } else {
                Outcome::Ok
            }
        });

        let mut event = TraceEvent::new(self.level, mem::take(&mut self.name));
        event.direction = Some(Direction::Exit);
        event.depth = Some(depth::current());
        if self.timeit {
            event.elapsed = Some(self.start.elapsed());
        }
        event.outcome = Some(outcome);
        sink::emit(event);
    }
}

/// Emits a single message event at [`Level::Info`] and the current depth,
/// with no direction marker.
pub fn log(message: impl Into<String>) {
    log_with(Level::Info, message, TraceValues::new());
}

/// Emits a single message event with named values at the current depth,
/// with no direction marker.
pub fn log_with(level: Level, message: impl Into<String>, kwargs: TraceValues) {
    let mut event = TraceEvent::new(level, message);
    event.depth = Some(depth::current());
    event.kwargs = kwargs;
    sink::emit(event);
}

/// Returns the unqualified display name of a type, for tracing constructors
/// under the owning type's name.
///
/// ```
/// struct Connection;
/// assert_eq!(traceme_core::type_display_name::<Connection>(), "Connection");
/// ```
pub fn type_display_name<T: ?Sized>() -> &'static str {
    let name = core::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

macro_rules! impl_wrap_fns {
    ($wrap:ident, $try_wrap:ident $(, $arg:ident: $ty:ident)*) => {
        /// Wraps a callable so that every invocation runs under a
        /// [`TraceScope`] with a snapshot of its arguments. The wrapped
        /// callable has an identical signature and is transparent to results
        /// and panics.
        pub fn $wrap<$($ty,)* R>(
            config: TraceConfig,
            name: impl Into<String>,
            function: impl Fn($($ty),*) -> R,
        ) -> impl Fn($($ty),*) -> R
        where
            $($ty: Clone + Into<ArgValue>,)*
        {
            let name = name.into();
            move |$($arg),*| {
                let args = vec![$($arg.clone().into()),*];
                let scope = TraceScope::enter(name.clone(), args, &config);
                scope.in_scope(|| function($($arg),*))
            }
        }

        /// Wraps a `Result`-returning callable; an `Err` return is recorded
        /// as a failed outcome on the exit event and propagated unchanged.
        pub fn $try_wrap<$($ty,)* T, E>(
            config: TraceConfig,
            name: impl Into<String>,
            function: impl Fn($($ty),*) -> Result<T, E>,
        ) -> impl Fn($($ty),*) -> Result<T, E>
        where
            E: fmt::Display,
            $($ty: Clone + Into<ArgValue>,)*
        {
            let name = name.into();
            move |$($arg),*| {
                let args = vec![$($arg.clone().into()),*];
                let scope = TraceScope::enter(name.clone(), args, &config);
                scope.in_scope_result(|| function($($arg),*))
            }
        }
    };
}

impl_wrap_fns!(wrap0, try_wrap0);
impl_wrap_fns!(wrap1, try_wrap1, a: A);
impl_wrap_fns!(wrap2, try_wrap2, a: A, b: B);
impl_wrap_fns!(wrap3, try_wrap3, a: A, b: B, c: C);
impl_wrap_fns!(wrap4, try_wrap4, a: A, b: B, c: C, d: D);
