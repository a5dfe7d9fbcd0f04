//! Indented call-tree rendering for `traceme` trace events.
//!
//! This crate turns the raw [`TraceEvent`](traceme_core::TraceEvent) stream
//! produced by [`traceme-core`](traceme_core) into human-readable lines: one
//! line per event, laid out in fixed columns with a vertical-guide
//! indentation prefix and `>`/`<` direction markers, so nested and recursive
//! calls read as a tree:
//!
//! ```text
//! 2023-04-01T12:00:00.000000Z INFO  │ > pythagoras(3, 4)
//! 2023-04-01T12:00:00.000100Z INFO  │   │ > square(3)
//! 2023-04-01T12:00:00.000210Z INFO  │   │   │ > square(4)
//! 2023-04-01T12:00:00.000320Z INFO  │   │   │ < square 104µs
//! 2023-04-01T12:00:00.000400Z INFO  │   │ < square 310µs
//! 2023-04-01T12:00:00.000470Z INFO  │ < pythagoras 455µs
//! ```
//!
//! Rendering is a pure function of the event and the configuration
//! ([`render_line()`]); the [`Renderer`] couples it with the processor chain
//! and an output writer, and [`Config::init()`] wires the whole pipeline into
//! the process-wide sink.
//!
//! # Examples
//!
//! ```
//! use traceme_core::{Direction, Level, TraceEvent};
//! use traceme_render::{default_columns, render_line, Style};
//!
//! let mut event = TraceEvent::new(Level::Info, "add");
//! event.direction = Some(Direction::Enter);
//! event.depth = Some(4);
//! event.args = vec![2_i64.into(), 3_i64.into()];
//!
//! let line = render_line(&event, &default_columns(), &Style::default(), " ");
//! assert_eq!(line, "INFO  │   │ > add(2, 3)");
//! ```

// Documentation settings.
#![doc(html_root_url = "https://docs.rs/traceme-render/0.1.0")]
// Linter settings.
#![warn(missing_debug_implementations, missing_docs, bare_trait_objects)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

mod column;
mod config;
pub mod format;
mod pipeline;

pub use crate::{
    column::{default_columns, Column, Style},
    config::{Config, ConfigError},
    pipeline::{
        annotate_depth, annotate_timestamp, default_processors, render_line, Processor, Renderer,
    },
};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
