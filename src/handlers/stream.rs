//! Line-oriented stream handler
//!
//! Renders each event as one formatted line made of the selected metadata,
//! the level, the message, the backtrace (if any) and the event's fields.

use super::output::Output;
use crate::core::{
    Event, FieldMap, Handler, LogLevel, LoggerConfig, LoggerError, Metadata, MetadataKey,
    OutputFormat, Result,
};
use crate::formatters::FormatterBudget;
use chrono::{DateTime, FixedOffset};
use parking_lot::Mutex;
use std::fmt::Write;

pub struct StreamHandler {
    outputs: Vec<Output>,
    formatter: OutputFormat,
    level: LogLevel,
    budget: FormatterBudget,
    metadata: Vec<MetadataKey>,
    date_format: String,
    time_format: String,
    lock: Mutex<()>,
}

impl StreamHandler {
    /// Stream handler writing to `output` with default settings
    pub fn new(output: Output) -> Self {
        let mut handler = Self::from_config(&LoggerConfig::default());
        handler.outputs = vec![output];
        handler
    }

    /// Stream handler taking its settings from the logger configuration
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self {
            outputs: config.output.clone(),
            formatter: config.formatter,
            level: config.level,
            budget: config.budget(),
            metadata: MetadataKey::expand(&config.metadata),
            date_format: config.date_format.clone(),
            time_format: config.time_format.clone(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_outputs(mut self, outputs: Vec<Output>) -> Self {
        self.outputs = outputs;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: OutputFormat) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_budget(mut self, budget: FormatterBudget) -> Self {
        self.budget = budget;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, keys: &[MetadataKey]) -> Self {
        self.metadata = MetadataKey::expand(keys);
        self
    }

    pub fn formatter(&self) -> OutputFormat {
        self.formatter
    }

    /// Build the line written for `event`, without the trailing newline
    pub fn render(&self, event: &Event) -> String {
        let meta = event.metadata();
        let mut data = FieldMap::new();

        for key in &self.metadata {
            match key {
                MetadataKey::Pid => data.insert("pid", meta.pid),
                MetadataKey::Date => data.insert("date", strftime(&meta.time, &self.date_format)),
                MetadataKey::Time => data.insert("time", strftime(&meta.time, &self.time_format)),
                MetadataKey::File => data.insert("path", format_filepath(meta)),
                MetadataKey::All => None,
            };
        }
        data.insert("level", meta.level.to_str());
        data.insert("message", event.message_text());
        if !event.backtrace().is_empty() {
            data.insert("backtrace", event.backtrace().join(","));
        }
        data.extend_from(event.fields());

        self.formatter.dump(&data, self.budget)
    }
}

impl Handler for StreamHandler {
    fn name(&self) -> &str {
        "stream"
    }

    fn call(&self, event: &Event) -> Result<()> {
        if self.outputs.is_empty() {
            return Err(LoggerError::config("StreamHandler", "no outputs configured"));
        }

        let line = self.render(event);
        let _guard = self.lock.lock();

        // Every output gets the line even if an earlier one failed
        let mut first_error = None;
        for output in &self.outputs {
            if let Err(e) = output.write_line(&line) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn level(&self) -> Option<LogLevel> {
        Some(self.level)
    }

    fn flush(&self) -> Result<()> {
        let _guard = self.lock.lock();
        for output in &self.outputs {
            output.flush()?;
        }
        Ok(())
    }
}

pub(crate) fn format_filepath(meta: &Metadata) -> String {
    match &meta.method {
        Some(method) => format!("{}:{}:in`{}`", meta.path, meta.line, method),
        None => format!("{}:{}", meta.path, meta.line),
    }
}

/// Format a timestamp, falling back to RFC 3339 for an unusable pattern
pub(crate) fn strftime(time: &DateTime<FixedOffset>, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", time.format(pattern)).is_err() {
        out = time.to_rfc3339();
    }
    out
}
