//! Columns: named formatting rules defining the layout of a rendered line.

use core::fmt;

use chrono::SecondsFormat;
use colored::{Color, Colorize};
use traceme_core::{Direction, Level, Outcome, TraceEvent};

use crate::format;

/// Color palette applied while rendering. Styling is a pure string-to-string
/// mapping: given a tag (severity or the callable-name slot) and a text, it
/// returns the text wrapped in the matching escape codes, or unchanged when
/// color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub(crate) color: bool,
    pub(crate) name: Color,
    pub(crate) debug: Color,
    pub(crate) info: Color,
    pub(crate) error: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: false,
            name: Color::Blue,
            debug: Color::BrightBlack,
            info: Color::Green,
            error: Color::Red,
        }
    }
}

impl Style {
    pub(crate) fn level_color(&self, level: Level) -> Color {
        match level {
            Level::Debug => self.debug,
            Level::Info => self.info,
            Level::Error => self.error,
        }
    }

    pub(crate) fn paint(&self, color: Color, text: &str) -> String {
        if self.color && !text.is_empty() {
            text.color(color).to_string()
        } else {
            text.to_owned()
        }
    }
}

/// Named formatting rule: maps an event to the display string of one column.
/// An ordered sequence of columns defines the layout of a rendered line;
/// columns producing an empty string are skipped when the line is joined.
#[derive(Clone, Copy)]
pub struct Column {
    name: &'static str,
    format: fn(&TraceEvent, &Style) -> String,
}

impl fmt::Debug for Column {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Column")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Column {
    /// Creates a column with the specified unique name and formatter.
    pub fn new(name: &'static str, format: fn(&TraceEvent, &Style) -> String) -> Self {
        Self { name, format }
    }

    /// Returns the column name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn render(&self, event: &TraceEvent, style: &Style) -> String {
        (self.format)(event, style)
    }

    /// ISO-8601 timestamp with microsecond precision.
    pub fn timestamp() -> Self {
        Self::new("timestamp", timestamp)
    }

    /// Upper-case severity, padded to 5 characters.
    pub fn level() -> Self {
        Self::new("level", level)
    }

    /// Vertical-guide indentation prefix.
    pub fn indent() -> Self {
        Self::new("indent", indent)
    }

    /// Direction glyph (`>` / `<`).
    pub fn direction() -> Self {
        Self::new("direction", direction)
    }

    /// The call itself: `name(args)` on enter, the bare name otherwise.
    pub fn call() -> Self {
        Self::new("call", call)
    }

    /// Formatted elapsed time (exit events with timing enabled).
    pub fn elapsed() -> Self {
        Self::new("elapsed", elapsed)
    }

    /// Remaining `key=value` pairs, including a failed outcome as `error=…`.
    pub fn extras() -> Self {
        Self::new("extras", extras)
    }
}

/// The fixed default layout: timestamp, level, indentation guide, direction
/// glyph, `name(args)`, elapsed, remaining `key=value` pairs.
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::timestamp(),
        Column::level(),
        Column::indent(),
        Column::direction(),
        Column::call(),
        Column::elapsed(),
        Column::extras(),
    ]
}

fn timestamp(event: &TraceEvent, _style: &Style) -> String {
    event.timestamp.map_or_else(String::new, |timestamp| {
        timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
    })
}

fn level(event: &TraceEvent, style: &Style) -> String {
    let text = format!("{:<5}", event.level.to_string());
    style.paint(style.level_color(event.level), &text)
}

fn indent(event: &TraceEvent, _style: &Style) -> String {
    format::indentation(event.depth.unwrap_or(0))
}

fn direction(event: &TraceEvent, _style: &Style) -> String {
    format::direction_glyph(event.direction).to_owned()
}

/// `name(arg, arg, …)` for enter events; the bare name for exit events and
/// the bare message for manual logs.
fn call(event: &TraceEvent, style: &Style) -> String {
    let name = style.paint(style.name, &event.name);
    if event.direction == Some(Direction::Enter) {
        let args: Vec<_> = event.args.iter().map(format::stringify).collect();
        format!("{}({})", name, args.join(", "))
    } else {
        name
    }
}

fn elapsed(event: &TraceEvent, _style: &Style) -> String {
    format::format_elapsed(event.elapsed)
}

/// Remaining `key=value` pairs; a failed outcome is rendered first as
/// `error=<description>` so it lines up with the other annotations.
fn extras(event: &TraceEvent, style: &Style) -> String {
    let mut pairs = Vec::with_capacity(event.kwargs.len() + 1);
    if let Some(Outcome::Failed(description)) = &event.outcome {
        pairs.push(style.paint(style.error, &format!("error={description}")));
    }
    for (key, value) in &event.kwargs {
        pairs.push(format!("{key}={}", format::stringify(value)));
    }
    pairs.join(" ")
}
