//! Integration tests for the call-tracing core.

use std::{
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    thread,
    time::Duration,
};

use assert_matches::assert_matches;

mod pythagoras;

use traceme_core::{
    depth::INDENT_STEP, log_with, try_wrap1, wrap0, wrap2, ArgValue, Direction, Level, MemorySink,
    Outcome, TraceConfig, TraceEvent, TraceScope, TraceValues,
};

fn record<R>(action: impl FnOnce() -> R) -> (R, Vec<TraceEvent>) {
    let sink = Arc::new(MemorySink::new());
    let result = traceme_core::with_sink(sink.clone(), action);
    (result, sink.take())
}

fn enter_depths(events: &[TraceEvent]) -> Vec<u32> {
    events
        .iter()
        .filter(|event| event.direction == Some(Direction::Enter))
        .map(|event| event.depth.unwrap())
        .collect()
}

fn exit_depths(events: &[TraceEvent]) -> Vec<u32> {
    events
        .iter()
        .filter(|event| event.direction == Some(Direction::Exit))
        .map(|event| event.depth.unwrap())
        .collect()
}

fn factorial(config: TraceConfig, n: u64) -> u64 {
    let scope = TraceScope::enter("factorial", vec![n.into()], &config);
    scope.in_scope(|| if n <= 1 { 1 } else { n * factorial(config, n - 1) })
}

#[test]
fn wrapped_function_is_transparent_to_results() {
    let config = TraceConfig::info().exit(true);
    let add = wrap2(config, "add", |a: i64, b: i64| a + b);
    let (sum, events) = record(|| add(2, 3));

    assert_eq!(sum, 5);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].direction, Some(Direction::Enter));
    assert_eq!(events[0].name, "add");
    assert_eq!(events[0].args, [ArgValue::from(2_i64), ArgValue::from(3_i64)]);
    assert_eq!(events[1].direction, Some(Direction::Exit));
    assert_eq!(events[1].outcome, Some(Outcome::Ok));
    assert!(events[1].elapsed.is_some());
}

#[test]
fn exit_logging_is_off_by_default() {
    let config = TraceConfig::info();
    let add = wrap2(config, "add", |a: i64, b: i64| a + b);
    let (_, events) = record(|| add(2, 3));

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].direction, Some(Direction::Enter));
}

#[test]
fn timing_can_be_disabled() {
    let config = TraceConfig::debug().exit(true).timeit(false);
    let noop = wrap0(config, "noop", || ());
    let ((), events) = record(noop);

    assert_eq!(events.len(), 2);
    assert_eq!(events[1].elapsed, None);
    assert_eq!(events[1].level, Level::Debug);
}

#[test]
fn depth_returns_to_zero_after_outermost_call() {
    let config = TraceConfig::info().exit(true);
    let (root, events) = record(|| factorial(config, 5));

    assert_eq!(root, 120);
    assert_eq!(traceme_core::depth::current(), 0);

    let mut enters = enter_depths(&events);
    let mut exits = exit_depths(&events);
    assert_eq!(enters.len(), exits.len());
    enters.sort_unstable();
    exits.sort_unstable();
    assert_eq!(enters, exits);
}

#[test]
fn recursion_depths_form_a_palindrome() {
    let config = TraceConfig::info().exit(true);
    let (_, events) = record(|| factorial(config, 5));

    assert_eq!(enter_depths(&events), [0, 4, 8, 12, 16]);
    assert_eq!(exit_depths(&events), [16, 12, 8, 4, 0]);
    for event in &events {
        assert_eq!(event.name, "factorial");
        assert_eq!(event.depth.unwrap() % INDENT_STEP, 0);
    }
}

#[test]
fn continuation_passing_chain_nests_strictly() {
    let (result, events) = pythagoras::record_events(3, 4);
    assert_eq!(result, 5);

    let names: Vec<_> = events
        .iter()
        .filter(|event| event.direction == Some(Direction::Enter))
        .map(|event| event.name.as_str())
        .collect();
    assert_eq!(names, ["pythagoras", "square", "square", "add", "sqrt"]);
    assert_eq!(enter_depths(&events), [0, 4, 8, 12, 16]);
    assert_eq!(exit_depths(&events), [16, 12, 8, 4, 0]);

    let add_enter = events
        .iter()
        .find(|event| event.name == "add" && event.direction == Some(Direction::Enter))
        .unwrap();
    assert_eq!(add_enter.args, [ArgValue::from(9_i64), ArgValue::from(16_i64)]);
}

#[test]
fn panic_is_propagated_and_depth_restored() {
    let config = TraceConfig::error().exit(true);
    let explode = wrap0(config, "explode", || {
        panic!("boom");
    });

    let (caught, events) = record(|| {
        panic::catch_unwind(AssertUnwindSafe(&explode))
    });
    let payload = caught.unwrap_err();
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"boom"));

    assert_eq!(traceme_core::depth::current(), 0);
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].direction, Some(Direction::Exit));
    assert_eq!(events[1].depth, Some(0));
    assert_matches!(events[1].outcome, Some(Outcome::Failed(ref reason)) if reason == "panicked");
}

#[test]
fn err_return_is_recorded_and_propagated_unchanged() {
    let config = TraceConfig::info().exit(true);
    let parse = try_wrap1(config, "parse", |input: String| input.parse::<u64>());

    let (result, events) = record(|| parse("not a number".to_owned()));
    let err = result.unwrap_err();

    assert_eq!(events.len(), 2);
    assert_matches!(
        events[1].outcome,
        Some(Outcome::Failed(ref description)) if *description == err.to_string()
    );

    let (result, events) = record(|| parse("42".to_owned()));
    assert_eq!(result.unwrap(), 42);
    assert_eq!(events[1].outcome, Some(Outcome::Ok));
}

#[test]
fn manual_log_is_emitted_at_current_depth() {
    let config = TraceConfig::info().exit(true);
    let (_, events) = record(|| {
        let scope = TraceScope::enter("outer", vec![], &config);
        scope.in_scope(|| {
            let mut kwargs = TraceValues::new();
            kwargs.insert("attempt", ArgValue::from(2_u64));
            log_with(Level::Debug, "retrying", kwargs);
        });
    });

    let log_event = &events[1];
    assert_eq!(log_event.name, "retrying");
    assert_eq!(log_event.direction, None);
    assert_eq!(log_event.depth, Some(INDENT_STEP));
    assert_eq!(log_event.outcome, None);
    assert_eq!(log_event.kwargs["attempt"], 2_u64);
}

#[test]
fn threads_track_depth_independently() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            thread::spawn(|| {
                let config = TraceConfig::info().exit(true);
                let (_, events) = record(|| factorial(config, 3));
                (enter_depths(&events), exit_depths(&events))
            })
        })
        .collect();

    for handle in handles {
        let (enters, exits) = handle.join().unwrap();
        assert_eq!(enters, [0, 4, 8]);
        assert_eq!(exits, [8, 4, 0]);
    }
}

#[test]
fn events_serialize_to_a_stable_wire_shape() {
    let mut event = TraceEvent::new(Level::Info, "add");
    event.direction = Some(Direction::Exit);
    event.depth = Some(4);
    event.elapsed = Some(Duration::from_micros(1_500));
    event.args = vec![ArgValue::from(2_i64), ArgValue::Null];
    event.outcome = Some(Outcome::Ok);

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "add",
            "level": "info",
            "direction": "exit",
            "depth": 4,
            "elapsed": 1500,
            "args": [{ "int": 2 }, "null"],
            "outcome": "ok",
        })
    );

    let restored: TraceEvent = serde_json::from_value(json).unwrap();
    assert_eq!(restored, event);
}

#[test]
fn type_display_name_strips_the_module_path() {
    struct Connection;
    let _ = Connection;
    assert_eq!(traceme_core::type_display_name::<Connection>(), "Connection");
    assert_eq!(traceme_core::type_display_name::<Vec<u8>>(), "Vec<u8>");
}
