//! Human-readable console handler

use super::output::Output;
use super::stream::{format_filepath, strftime};
use crate::core::{
    Event, Handler, LogLevel, LoggerConfig, LoggerError, MetadataKey, OutputFormat, Result,
};
use crate::formatters::FormatterBudget;
use colored::{Color, Colorize};
use parking_lot::Mutex;

const LABEL_WIDTH: usize = 8;
const MESSAGE_WIDTH: usize = 25;
const BACKTRACE_INDENT: &str = "    ";

struct LevelStyle {
    symbol: &'static str,
    label: &'static str,
    color: Color,
}

/// Style for an event: built-in log types first, then the level
fn style(name: &str, level: LogLevel) -> LevelStyle {
    let (symbol, label) = match (name, level) {
        ("success", _) => ("✔", "success"),
        ("wait", _) => ("…", "waiting"),
        (_, LogLevel::Debug) => ("•", "debug"),
        (_, LogLevel::Info) => ("ℹ", "info"),
        (_, LogLevel::Warn) => ("⚠", "warning"),
        (_, LogLevel::Error) => ("⨯", "error"),
        (_, LogLevel::Fatal) => ("!", "fatal"),
    };
    let color = match name {
        "wait" => Color::Cyan,
        _ => level.color_code(),
    };
    LevelStyle { symbol, label, color }
}

/// Writes `symbol label message fields` lines, colored per level.
///
/// ```text
/// ℹ info    Deploying                 app=myapp env=prod
/// ```
pub struct ConsoleHandler {
    outputs: Vec<Output>,
    formatter: OutputFormat,
    level: LogLevel,
    budget: FormatterBudget,
    metadata: Vec<MetadataKey>,
    date_format: String,
    time_format: String,
    use_colors: bool,
    lock: Mutex<()>,
}

impl ConsoleHandler {
    pub fn new(output: Output) -> Self {
        let mut handler = Self::from_config(&LoggerConfig::default());
        handler.outputs = vec![output];
        handler
    }

    pub fn from_config(config: &LoggerConfig) -> Self {
        Self {
            outputs: config.output.clone(),
            formatter: config.formatter,
            level: config.level,
            budget: config.budget(),
            metadata: MetadataKey::expand(&config.metadata),
            date_format: config.date_format.clone(),
            time_format: config.time_format.clone(),
            use_colors: true,
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
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
    pub fn with_metadata(mut self, keys: &[MetadataKey]) -> Self {
        self.metadata = MetadataKey::expand(keys);
        self
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_metadata(&self, event: &Event) -> Option<String> {
        if self.metadata.is_empty() {
            return None;
        }
        let meta = event.metadata();
        let parts: Vec<String> = self
            .metadata
            .iter()
            .filter_map(|key| match key {
                MetadataKey::Pid => Some(meta.pid.to_string()),
                MetadataKey::Date => Some(strftime(&meta.time, &self.date_format)),
                MetadataKey::Time => Some(strftime(&meta.time, &self.time_format)),
                MetadataKey::File => Some(format_filepath(meta)),
                MetadataKey::All => None,
            })
            .map(|part| format!("[{}]", part))
            .collect();
        let prefix = format!("{} →", parts.join(" "));

        Some(if self.use_colors {
            prefix.dimmed().to_string()
        } else {
            prefix
        })
    }

    /// Build the (possibly multi-line) text written for `event`
    pub fn render(&self, event: &Event) -> String {
        let style = style(&event.metadata().name, event.level());
        let mut line = String::new();

        if let Some(prefix) = self.format_metadata(event) {
            line.push_str(&prefix);
            line.push(' ');
        }
        line.push_str(&self.paint(style.symbol, style.color));
        line.push(' ');
        line.push_str(&self.paint(style.label, style.color));
        line.push_str(&" ".repeat(LABEL_WIDTH.saturating_sub(style.label.chars().count())));
        line.push_str(&format!("{:<width$}", event.message_text(), width = MESSAGE_WIDTH));

        if !event.fields().is_empty() {
            line.push(' ');
            line.push_str(&self.formatter.dump(event.fields(), self.budget));
        }

        for frame in event.backtrace() {
            line.push('\n');
            line.push_str(BACKTRACE_INDENT);
            line.push_str(frame);
        }

        line
    }
}

impl Handler for ConsoleHandler {
    fn name(&self) -> &str {
        "console"
    }

    fn call(&self, event: &Event) -> Result<()> {
        if self.outputs.is_empty() {
            return Err(LoggerError::config("ConsoleHandler", "no outputs configured"));
        }

        let text = self.render(event);
        let _guard = self.lock.lock();

        let mut first_error = None;
        for output in &self.outputs {
            if let Err(e) = output.write_line(&text) {
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
