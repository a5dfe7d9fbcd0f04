//! Instrumentation configuration.

use crate::Level;

/// Configuration of the instrumentation wrapper.
///
/// The three preset constructors are the severity variants of the tracing entry
/// point; they share identical control-flow and depth semantics and differ only
/// in the [`Level`] recorded on emitted events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceConfig {
    pub(crate) level: Level,
    pub(crate) exit: bool,
    pub(crate) timeit: bool,
}

impl TraceConfig {
    fn new(level: Level) -> Self {
        Self {
            level,
            exit: false,
            timeit: true,
        }
    }

    /// Preset emitting events at [`Level::Debug`].
    pub fn debug() -> Self {
        Self::new(Level::Debug)
    }

    /// Preset emitting events at [`Level::Info`].
    pub fn info() -> Self {
        Self::new(Level::Info)
    }

    /// Preset emitting events at [`Level::Error`].
    pub fn error() -> Self {
        Self::new(Level::Error)
    }

    /// Enables or disables exit events. Disabled by default; with exit events
    /// disabled, only the enter boundary of each scope is logged.
    #[must_use]
    pub fn exit(mut self, exit: bool) -> Self {
        self.exit = exit;
        self
    }

    /// Enables or disables elapsed-time measurement on exit events.
    /// Enabled by default; only relevant if [exit events](Self::exit()) are on.
    #[must_use]
    pub fn timeit(mut self, timeit: bool) -> Self {
        self.timeit = timeit;
        self
    }

    /// Returns the severity recorded on events emitted under this configuration.
    pub fn level(&self) -> Level {
        self.level
    }
}
