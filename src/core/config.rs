//! Logger configuration

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::output_format::OutputFormat;
use crate::filters::{DataFilter, FilterRule, MessageFilter, MessageRule, FILTERED};
use crate::formatters::{FormatterBudget, DEFAULT_MAX_BYTES, DEFAULT_MAX_DEPTH};
use crate::handlers::{HandlerSpec, Output};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_DATE_FORMAT: &str = "%F";
pub const DEFAULT_TIME_FORMAT: &str = "%T%.3f";

/// Event metadata a handler may prepend to each line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataKey {
    Pid,
    Date,
    Time,
    File,
    /// Shorthand for pid, date, time and file
    All,
}

impl MetadataKey {
    pub const EXPANDED: [MetadataKey; 4] = [
        MetadataKey::Pid,
        MetadataKey::Date,
        MetadataKey::Time,
        MetadataKey::File,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetadataKey::Pid => "pid",
            MetadataKey::Date => "date",
            MetadataKey::Time => "time",
            MetadataKey::File => "file",
            MetadataKey::All => "all",
        }
    }

    /// Resolve `All` and drop duplicates, keeping first occurrence order
    pub fn expand(keys: &[MetadataKey]) -> Vec<MetadataKey> {
        if keys.contains(&MetadataKey::All) {
            return Self::EXPANDED.to_vec();
        }
        let mut expanded = Vec::with_capacity(keys.len());
        for key in keys {
            if !expanded.contains(key) {
                expanded.push(*key);
            }
        }
        expanded
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetadataKey {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pid" => Ok(MetadataKey::Pid),
            "date" => Ok(MetadataKey::Date),
            "time" => Ok(MetadataKey::Time),
            "file" => Ok(MetadataKey::File),
            "all" => Ok(MetadataKey::All),
            _ => Err(LoggerError::config(
                "metadata",
                format!("unknown metadata key '{}'", s),
            )),
        }
    }
}

/// Redaction rules for message text and field maps
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub message: Vec<MessageRule>,
    pub data: Vec<FilterRule>,
    pub mask: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            message: Vec::new(),
            data: Vec::new(),
            mask: FILTERED.to_string(),
        }
    }
}

impl FilterConfig {
    pub fn data_filter(&self) -> Result<DataFilter> {
        DataFilter::with_mask(self.data.clone(), self.mask.clone())
    }

    pub fn message_filter(&self) -> Result<MessageFilter> {
        MessageFilter::with_mask(self.message.clone(), self.mask.clone())
    }
}

/// Everything a [`Logger`](super::Logger) is built from.
///
/// A plain value: loggers own their copy, and [`Logger::copy_with`](super::Logger::copy_with)
/// hands a clone to a closure for adjustment.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub max_bytes: usize,
    pub max_depth: usize,
    pub formatter: OutputFormat,
    pub handlers: Vec<HandlerSpec>,
    pub output: Vec<Output>,
    pub metadata: Vec<MetadataKey>,
    pub date_format: String,
    pub time_format: String,
    pub filters: FilterConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            max_bytes: DEFAULT_MAX_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
            formatter: OutputFormat::Text,
            handlers: vec![HandlerSpec::default()],
            output: vec![Output::stderr()],
            metadata: Vec::new(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            filters: FilterConfig::default(),
        }
    }
}

impl LoggerConfig {
    pub fn budget(&self) -> FormatterBudget {
        FormatterBudget::new(self.max_bytes, self.max_depth)
    }

    /// Check settings that would otherwise only fail while logging
    pub fn validate(&self) -> Result<()> {
        validate_strftime("date_format", &self.date_format)?;
        validate_strftime("time_format", &self.time_format)?;
        Ok(())
    }
}

fn validate_strftime(component: &str, pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(LoggerError::config(
            component,
            format!("invalid strftime pattern '{}'", pattern),
        ));
    }
    Ok(())
}
