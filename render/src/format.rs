//! Pure formatting functions mapping event fields to display strings.
//!
//! Everything in this module is deterministic and total: the same input
//! always yields the same output, and no input can make a formatter fail.
//! This is what makes golden-output tests of the renderer possible.

use std::time::Duration;

use traceme_core::{depth::INDENT_STEP, ArgValue, Direction};

/// Longest callable name rendered in full; longer names are truncated with a
/// leading `...` marker.
pub const MAX_CALLABLE_NAME: usize = 30;

/// Vertical guide glyph used by [`indentation()`].
pub const BAR: char = '│';

/// Renders a single argument value for display.
///
/// Total over [`ArgValue`]: null-like values render as `None`, Booleans as
/// `True`/`False`, strings unmodified, callables as `name()` (truncated if the
/// name exceeds [`MAX_CALLABLE_NAME`] characters), and everything else via the
/// textual representation captured at call time.
pub fn stringify(value: &ArgValue) -> String {
    match value {
        ArgValue::Null => "None".to_owned(),
        ArgValue::Bool(true) => "True".to_owned(),
        ArgValue::Bool(false) => "False".to_owned(),
        ArgValue::Int(value) => value.to_string(),
        ArgValue::UInt(value) => value.to_string(),
        ArgValue::Float(value) => value.to_string(),
        ArgValue::String(value) => value.clone(),
        ArgValue::Callable(name) => {
            let length = name.chars().count();
            if length > MAX_CALLABLE_NAME {
                let tail: String = name.chars().skip(length - MAX_CALLABLE_NAME).collect();
                format!("...{tail}()")
            } else {
                format!("{name}()")
            }
        }
        other => ArgValue::as_debug_str(other).unwrap_or_default().to_owned(),
    }
}

/// Renders an elapsed duration in human units: microseconds under 1 ms,
/// milliseconds (2 decimal places) under 1 s, seconds otherwise. An absent
/// duration (enter events) renders as the empty string.
pub fn format_elapsed(elapsed: Option<Duration>) -> String {
    let Some(elapsed) = elapsed else {
        return String::new();
    };
    if elapsed < Duration::from_millis(1) {
        format!("{}µs", elapsed.as_micros())
    } else if elapsed < Duration::from_secs(1) {
        format!("{:.2}ms", elapsed.as_secs_f64() * 1_000.0)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

/// Maps a scope boundary to its marker: `>` for enter, `<` for exit, nothing
/// for direction-less (manual log) events.
pub fn direction_glyph(direction: Option<Direction>) -> &'static str {
    match direction {
        Some(Direction::Enter) => ">",
        Some(Direction::Exit) => "<",
        None => "",
    }
}

/// Renders the tree-guide prefix for a nesting depth: one `│   ` unit per
/// indentation level, the remainder as literal spaces, and a trailing bar.
///
/// Deterministic in `depth` alone; `indentation(0)` is a bare `│`.
pub fn indentation(depth: u32) -> String {
    let levels = depth / INDENT_STEP;
    let remainder = depth % INDENT_STEP;
    let mut prefix = String::new();
    for _ in 0..levels {
        prefix.push(BAR);
        prefix.push_str("   ");
    }
    for _ in 0..remainder {
        prefix.push(' ');
    }
    prefix.push(BAR);
    prefix
}
