//! Call-tracing instrumentation core.
//!
//! This crate lets any function be wrapped so that its invocation (arguments)
//! and optionally its completion (outcome, elapsed time) are emitted as
//! structured [`TraceEvent`]s, from which a caller/callee tree can be
//! reconstructed or rendered. It targets debugging of control flow in deeply
//! nested, recursive or continuation-passing code, where flat logs lose the
//! nesting relationship.
//!
//! The crate provides:
//!
//! - [`TraceScope`], a guard bracketing one traced invocation: an enter event
//!   and a depth increment on creation, an unconditional decrement and an
//!   optional exit event on drop — also when the traced code panics;
//! - the [`wrap1`]–style wrapper family producing identical-signature traced
//!   callables from a [`TraceConfig`] preset ([`TraceConfig::debug()`],
//!   [`TraceConfig::info()`], [`TraceConfig::error()`]);
//! - per-thread [depth](depth) bookkeeping in units of 4
//!   ([`depth::INDENT_STEP`]) with no cross-thread sharing and no locks;
//! - the [`Sink`] wiring through which raw events reach a backend (see the
//!   `traceme-render` crate for the line renderer).
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use traceme_core::{ArgValue, Direction, MemorySink, TraceConfig, wrap2};
//!
//! let add = wrap2(TraceConfig::info().exit(true), "add", |a: i64, b: i64| a + b);
//!
//! let sink = Arc::new(MemorySink::new());
//! let sum = traceme_core::with_sink(sink.clone(), || add(2, 3));
//! assert_eq!(sum, 5);
//!
//! let events = sink.take();
//! assert_eq!(events.len(), 2);
//! assert_eq!(events[0].direction, Some(Direction::Enter));
//! assert_eq!(events[0].args, [ArgValue::from(2_i64), ArgValue::from(3_i64)]);
//! assert_eq!(events[1].direction, Some(Direction::Exit));
//! assert_eq!(events[0].depth, events[1].depth);
//! ```
//!
//! # Concurrency
//!
//! Wrapped callables may run on any number of threads simultaneously; each
//! thread owns an independent depth counter, and events from one thread are
//! totally ordered and properly nested with respect to that thread only.
//! Tracing across suspension points (a computation yielding and resuming on
//! another thread) is not supported.

// Documentation settings.
#![doc(html_root_url = "https://docs.rs/traceme-core/0.1.0")]
// Linter settings.
#![warn(missing_debug_implementations, missing_docs, bare_trait_objects)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

mod config;
pub mod depth;
mod event;
mod level;
mod scope;
mod sink;
mod value;

pub use crate::{
    config::TraceConfig,
    event::{Direction, Outcome, TraceEvent},
    level::Level,
    scope::{
        log, log_with, try_wrap0, try_wrap1, try_wrap2, try_wrap3, try_wrap4, type_display_name,
        wrap0, wrap1, wrap2, wrap3, wrap4, TraceScope,
    },
    sink::{set_sink, with_sink, MemorySink, Sink},
    value::{ArgValue, DebugObject, TraceValues, TraceValuesIter},
};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
