//! The structured event produced at scope boundaries.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ArgValue, Level, TraceValues};

/// Identifies which boundary of a scope an event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The scope was entered.
    Enter,
    /// The scope completed (normally or via an error).
    Exit,
}

/// Whether a scope completed normally or via an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The traced callable returned normally.
    Ok,
    /// The traced callable failed; carries the error description.
    Failed(String),
}

/// Event produced during call tracing.
///
/// Events are emitted by [`TraceScope`](crate::TraceScope) (or the manual
/// [`log`](crate::log) call) and consumed exactly once by the configured
/// [`Sink`](crate::Sink). `depth` and `timestamp` may be left unset on a raw
/// event; the render pipeline fills them in while still on the emitting thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct TraceEvent {
    /// Display name of the traced callable (or the message of a manual log call).
    pub name: String,
    /// Severity of the event.
    pub level: Level,
    /// Scope boundary this event represents; `None` for manual log events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Nesting depth in depth units: the depth *before* increment for enter events,
    /// and *after* decrement for exit events (i.e., equal for a matched pair).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    /// Wall-clock timestamp of the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Wall-clock time spent in the scope; present only on exit events with
    /// timing enabled. Serialized as integer microseconds.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_micros"
    )]
    pub elapsed: Option<Duration>,
    /// Snapshot of the positional arguments of the call.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgValue>,
    /// Named values attached to the event.
    #[serde(default, skip_serializing_if = "TraceValues::is_empty")]
    pub kwargs: TraceValues,
    /// How the scope completed; present only on exit events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl TraceEvent {
    /// Creates a bare event with the specified severity and name; all optional
    /// fields are unset.
    pub fn new(level: Level, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            direction: None,
            depth: None,
            timestamp: None,
            elapsed: None,
            args: Vec::new(),
            kwargs: TraceValues::new(),
            outcome: None,
        }
    }
}

mod serde_micros {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(super) fn serialize<S: Serializer>(
        duration: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        duration
            .map(|duration| u64::try_from(duration.as_micros()).unwrap_or(u64::MAX))
            .serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        let micros = Option::<u64>::deserialize(deserializer)?;
        Ok(micros.map(Duration::from_micros))
    }
}
