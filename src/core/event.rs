//! Log event structure

use super::fields::FieldMap;
use super::log_level::LogLevel;
use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::panic::Location;

/// Snapshot of an error taken at log time.
///
/// Holds the error's kind, message and backtrace frames as owned strings,
/// so masking produces a new value and the caller's error is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedError {
    kind: String,
    message: String,
    backtrace: Vec<String>,
}

impl CapturedError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            backtrace: Vec::new(),
        }
    }

    /// Capture an error together with the current backtrace.
    ///
    /// Frames are only recorded when backtraces are enabled through
    /// `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE`.
    pub fn from_error<E: std::error::Error + ?Sized>(error: &E) -> Self {
        let backtrace = Backtrace::capture();
        let frames = match backtrace.status() {
            BacktraceStatus::Captured => backtrace
                .to_string()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        };

        Self {
            kind: std::any::type_name::<E>().to_string(),
            message: error.to_string(),
            backtrace: frames,
        }
    }

    #[must_use]
    pub fn with_backtrace<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backtrace = frames.into_iter().map(Into::into).collect();
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn backtrace(&self) -> &[String] {
        &self.backtrace
    }

    /// Same kind, new message and backtrace
    pub(crate) fn copy_with(&self, message: String, backtrace: Vec<String>) -> Self {
        Self {
            kind: self.kind.clone(),
            message,
            backtrace,
        }
    }
}

impl fmt::Display for CapturedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CapturedError {}

/// One positional part of a log message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessagePart {
    Text(String),
    Error(CapturedError),
}

impl fmt::Display for MessagePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessagePart::Text(text) => f.write_str(text),
            MessagePart::Error(error) => f.write_str(error.message()),
        }
    }
}

impl From<&str> for MessagePart {
    fn from(s: &str) -> Self {
        MessagePart::Text(s.to_string())
    }
}

impl From<String> for MessagePart {
    fn from(s: String) -> Self {
        MessagePart::Text(s)
    }
}

impl From<CapturedError> for MessagePart {
    fn from(error: CapturedError) -> Self {
        MessagePart::Error(error)
    }
}

/// Source location of a log call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub module: Option<&'static str>,
    /// Log type name, e.g. `success` for an info event logged via `Logger::success`
    pub label: Option<&'static str>,
}

impl CallSite {
    /// Location of the code calling this function
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
            module: None,
            label: None,
        }
    }

    #[must_use]
    pub fn with_module(mut self, module: &'static str) -> Self {
        self.module = Some(module);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }
}

/// Contextual data resolved once per log call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub level: LogLevel,
    pub time: DateTime<FixedOffset>,
    pub pid: u32,
    /// Originating label: the log type, else the calling module, else the level name
    pub name: String,
    pub path: String,
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl Metadata {
    pub fn capture(level: LogLevel, site: CallSite) -> Self {
        Self {
            level,
            time: Local::now().fixed_offset(),
            pid: std::process::id(),
            name: site
                .label
                .or(site.module)
                .map_or_else(|| level.to_str().to_string(), String::from),
            path: site.file.to_string(),
            line: site.line,
            method: site.module.map(String::from),
        }
    }
}

/// A single log occurrence.
///
/// Built once per log call and handed to handlers by shared reference;
/// nothing mutates it after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    message: Vec<MessagePart>,
    fields: FieldMap,
    metadata: Metadata,
    backtrace: Vec<String>,
}

impl Event {
    pub fn new(message: Vec<MessagePart>, fields: FieldMap, metadata: Metadata) -> Self {
        let backtrace = message
            .iter()
            .rev()
            .find_map(|part| match part {
                MessagePart::Error(error) => Some(error.backtrace().to_vec()),
                MessagePart::Text(_) => None,
            })
            .unwrap_or_default();

        Self {
            message,
            fields,
            metadata,
            backtrace,
        }
    }

    pub fn message(&self) -> &[MessagePart] {
        &self.message
    }

    /// Message parts joined with a single space
    pub fn message_text(&self) -> String {
        self.message
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn level(&self) -> LogLevel {
        self.metadata.level
    }

    pub fn backtrace(&self) -> &[String] {
        &self.backtrace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> Metadata {
        Metadata::capture(LogLevel::Info, CallSite::caller())
    }

    #[test]
    fn test_backtrace_defaults_to_empty() {
        let event = Event::new(vec!["message".into()], FieldMap::new(), metadata());

        assert_eq!(event.message_text(), "message");
        assert!(event.fields().is_empty());
        assert!(event.backtrace().is_empty());
    }

    #[test]
    fn test_error_without_backtrace() {
        let error = CapturedError::new("ArgumentError", "Wrong data");
        let event = Event::new(vec![error.clone().into()], FieldMap::new(), metadata());

        assert_eq!(event.message(), &[MessagePart::Error(error)]);
        assert!(event.backtrace().is_empty());
    }

    #[test]
    fn test_extracts_backtrace_from_error() {
        let error = CapturedError::new("ArgumentError", "Wrong data")
            .with_backtrace(["app.rs:10:in `run`", "main.rs:3:in `main`"]);
        let event = Event::new(
            vec!["Error".into(), error.clone().into()],
            FieldMap::new(),
            metadata(),
        );

        assert_eq!(event.message_text(), "Error Wrong data");
        assert_eq!(event.backtrace(), error.backtrace());
    }

    #[test]
    fn test_metadata_capture() {
        let meta = Metadata::capture(LogLevel::Warn, CallSite::caller());
        assert_eq!(meta.level, LogLevel::Warn);
        assert_eq!(meta.name, "warn");
        assert_eq!(meta.pid, std::process::id());
        assert!(meta.path.ends_with("event.rs"));
        assert!(meta.method.is_none());

        let meta = Metadata::capture(LogLevel::Info, CallSite::caller().with_module("app::deploy"));
        assert_eq!(meta.name, "app::deploy");
        assert_eq!(meta.method.as_deref(), Some("app::deploy"));

        let site = CallSite::caller().with_module("app::deploy").with_label("success");
        let meta = Metadata::capture(LogLevel::Info, site);
        assert_eq!(meta.name, "success");
        assert_eq!(meta.level, LogLevel::Info);
        assert_eq!(meta.method.as_deref(), Some("app::deploy"));
    }

    #[test]
    fn test_from_std_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config missing");
        let captured = CapturedError::from_error(&io);

        assert_eq!(captured.message(), "config missing");
        assert!(captured.kind().contains("Error"));
    }
}
