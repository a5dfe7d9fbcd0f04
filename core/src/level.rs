//! Trace severity levels.

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing_core::Level as TracingLevel;

/// Severity of a [`TraceEvent`](crate::TraceEvent).
///
/// The three variants correspond to the three instrumentation presets on
/// [`TraceConfig`](crate::TraceConfig); they only affect the `level` recorded on emitted
/// events, never control flow or depth bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// "DEBUG" level.
    Debug,
    /// "INFO" level.
    Info,
    /// "ERROR" level.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Error => "ERROR",
        })
    }
}

/// Lossy conversion from the `tracing` level set: `TRACE` maps to [`Level::Debug`]
/// and `WARN` to [`Level::Error`].
impl From<TracingLevel> for Level {
    fn from(level: TracingLevel) -> Self {
        match level {
            TracingLevel::TRACE | TracingLevel::DEBUG => Self::Debug,
            TracingLevel::INFO => Self::Info,
            TracingLevel::WARN | TracingLevel::ERROR => Self::Error,
        }
    }
}
