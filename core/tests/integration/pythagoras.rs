//! Continuation-passing call graph used as a tracing scenario: every step
//! passes its result to the next function instead of returning it upward,
//! so the whole chain nests inside the outermost scope.

use std::sync::Arc;

use traceme_core::{MemorySink, TraceConfig, TraceEvent, TraceScope};

fn add<F: FnOnce(i64) -> i64>(a: i64, b: i64, config: &TraceConfig, cont: F) -> i64 {
    let scope = TraceScope::enter("add", vec![a.into(), b.into()], config);
    scope.in_scope(|| cont(a + b))
}

fn square<F: FnOnce(i64) -> i64>(a: i64, config: &TraceConfig, cont: F) -> i64 {
    let scope = TraceScope::enter("square", vec![a.into()], config);
    scope.in_scope(|| cont(a * a))
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn sqrt<F: FnOnce(i64) -> i64>(a: i64, config: &TraceConfig, cont: F) -> i64 {
    let scope = TraceScope::enter("sqrt", vec![a.into()], config);
    scope.in_scope(|| cont((a as f64).sqrt().floor() as i64))
}

/// `sqrt(square(a) + square(b))`, with every intermediate value passed on
/// through a continuation.
pub(crate) fn pythagoras(a: i64, b: i64, config: &TraceConfig) -> i64 {
    let scope = TraceScope::enter("pythagoras", vec![a.into(), b.into()], config);
    scope.in_scope(|| {
        square(a, config, |a_squared| {
            square(b, config, |b_squared| {
                add(a_squared, b_squared, config, |sum| {
                    sqrt(sum, config, |root| root)
                })
            })
        })
    })
}

/// Runs [`pythagoras`] with exit logging on and records the emitted events.
pub(crate) fn record_events(a: i64, b: i64) -> (i64, Vec<TraceEvent>) {
    let sink = Arc::new(MemorySink::new());
    let config = TraceConfig::info().exit(true);
    let result = traceme_core::with_sink(sink.clone(), || pythagoras(a, b, &config));
    (result, sink.take())
}
