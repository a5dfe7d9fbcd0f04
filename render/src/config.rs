//! Configuration and one-time wiring of the render pipeline.

use core::fmt;
use std::{error, io, io::Write, sync::Arc};

use colored::Color;
use traceme_core::Level;

use crate::{
    column::{default_columns, Column, Style},
    pipeline::{default_processors, Renderer},
};

/// Invalid render-pipeline configuration.
///
/// Configuration mistakes are programmer errors caught at wiring time, before
/// any event is traced; they are surfaced immediately instead of degrading
/// trace output later.
#[derive(Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// The column set is empty.
    NoColumns,
    /// Two columns share the same name.
    DuplicateColumn(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoColumns => formatter.write_str("no columns configured"),
            Self::DuplicateColumn(name) => write!(formatter, "duplicate column: `{name}`"),
        }
    }
}

impl error::Error for ConfigError {}

/// Builder for the render pipeline.
///
/// Recognized options are the severity-to-color mapping, the column set, the
/// column separator and the output writer; the timestamp format is fixed at
/// ISO-8601. [`Config::init()`] wires the pipeline into the process-wide
/// sink; invoking it again replaces the prior wiring.
///
/// # Examples
///
/// ```
/// use colored::Color;
/// use traceme_core::Level;
/// use traceme_render::Config;
///
/// Config::new()
///     .color(true)
///     .level_color(Level::Info, Color::Cyan)
///     .init();
/// ```
pub struct Config {
    columns: Vec<Column>,
    style: Style,
    separator: String,
    writer: Box<dyn Write + Send>,
}

impl fmt::Debug for Config {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Config")
            .field("columns", &self.columns)
            .field("style", &self.style)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates the default configuration: the [`default_columns()`] layout,
    /// a single-space separator, color enabled, output to stderr.
    pub fn new() -> Self {
        Self {
            columns: default_columns(),
            style: Style {
                color: true,
                ..Style::default()
            },
            separator: " ".to_owned(),
            writer: Box::new(io::stderr()),
        }
    }

    /// Replaces the column set.
    #[must_use]
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Replaces the column separator.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Enables or disables color output.
    #[must_use]
    pub fn color(mut self, color: bool) -> Self {
        self.style.color = color;
        self
    }

    /// Overrides the color associated with a severity level.
    #[must_use]
    pub fn level_color(mut self, level: Level, color: Color) -> Self {
        match level {
            Level::Debug => self.style.debug = color,
            Level::Info => self.style.info = color,
            Level::Error => self.style.error = color,
        }
        self
    }

    /// Overrides the color of the callable name.
    #[must_use]
    pub fn name_color(mut self, color: Color) -> Self {
        self.style.name = color;
        self
    }

    /// Replaces the output writer.
    #[must_use]
    pub fn writer(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.writer = writer;
        self
    }

    /// Validates the configuration and builds the renderer without installing
    /// it, e.g. for use as a thread-scoped sink in tests.
    pub fn try_build(self) -> Result<Renderer, ConfigError> {
        if self.columns.is_empty() {
            return Err(ConfigError::NoColumns);
        }
        let mut seen = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            if seen.contains(&column.name()) {
                return Err(ConfigError::DuplicateColumn(column.name()));
            }
            seen.push(column.name());
        }

        Ok(Renderer::new(
            default_processors(),
            self.columns,
            self.style,
            self.separator,
            self.writer,
        ))
    }

    /// Validates the configuration and installs the renderer as the
    /// process-wide sink, replacing any prior wiring.
    ///
    /// # Errors
    ///
    /// Returns an error if the column set is empty or contains duplicate
    /// names.
    pub fn try_init(self) -> Result<(), ConfigError> {
        let renderer = self.try_build()?;
        traceme_core::set_sink(Arc::new(renderer));
        Ok(())
    }

    /// Like [`Self::try_init()`], but panics on an invalid configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid; this is a programmer error
    /// caught at wiring time, not at trace time.
    pub fn init(self) {
        if let Err(err) = self.try_init() {
            panic!("invalid tracer configuration: {err}");
        }
    }
}
