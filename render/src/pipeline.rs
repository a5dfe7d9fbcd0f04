//! The render pipeline: processors annotating raw events, and the renderer
//! turning each processed event into one output line.

use core::fmt;
use std::{
    io::Write,
    sync::Mutex,
};

use chrono::Utc;
use traceme_core::{depth, Sink, TraceEvent};

use crate::column::{Column, Style};

/// Processing step applied to each raw event, in order, before rendering.
pub type Processor = fn(&mut TraceEvent);

/// Fills in the nesting depth from the calling thread's counter.
///
/// This must run while still on the emitting thread: depth is thread-local
/// and unrecoverable once the event has crossed to any other thread. The
/// [`Renderer`] is a synchronous [`Sink`], so this holds by construction.
pub fn annotate_depth(event: &mut TraceEvent) {
    if event.depth.is_none() {
        event.depth = Some(depth::current());
    }
}

/// Fills in the wall-clock timestamp.
pub fn annotate_timestamp(event: &mut TraceEvent) {
    if event.timestamp.is_none() {
        event.timestamp = Some(Utc::now());
    }
}

/// The default processor chain: depth first, then timestamp.
pub fn default_processors() -> Vec<Processor> {
    vec![annotate_depth, annotate_timestamp]
}

/// Renders one event into one line: every column in order, empty outputs
/// skipped, the rest joined with `separator`.
///
/// Pure: the same event, columns, style and separator always produce the
/// same line.
pub fn render_line(
    event: &TraceEvent,
    columns: &[Column],
    style: &Style,
    separator: &str,
) -> String {
    let cells = columns
        .iter()
        .map(|column| column.render(event, style))
        .filter(|cell| !cell.is_empty());
    cells.collect::<Vec<_>>().join(separator)
}

/// The wired render pipeline: a [`Sink`] that processes each event and writes
/// the rendered line to its output.
///
/// The writer is guarded by a mutex — the sink is the single shared resource
/// of the tracer and serializes concurrent writes itself. Events are never
/// buffered, and no lock is held upstream while emitting.
pub struct Renderer {
    processors: Vec<Processor>,
    columns: Vec<Column>,
    style: Style,
    separator: String,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl fmt::Debug for Renderer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Renderer")
            .field("columns", &self.columns)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    pub(crate) fn new(
        processors: Vec<Processor>,
        columns: Vec<Column>,
        style: Style,
        separator: String,
        writer: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            processors,
            columns,
            style,
            separator,
            writer: Mutex::new(writer),
        }
    }

    /// Processes a raw event in place, without rendering it.
    pub(crate) fn process(&self, event: &mut TraceEvent) {
        for processor in &self.processors {
            processor(event);
        }
    }
}

impl Sink for Renderer {
    fn emit(&self, mut event: TraceEvent) {
        self.process(&mut event);
        let line = render_line(&event, &self.columns, &self.style, &self.separator);
        let mut writer = self.writer.lock().unwrap();
        // A failing writer must never mask the traced program's own errors.
        writeln!(writer, "{line}").ok();
    }
}
