//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Unknown level name or number
    #[error("Invalid level: {value}")]
    InvalidLevel { value: String },

    /// Filter rule that failed to compile
    #[error("Invalid filter pattern '{pattern}': {message}")]
    InvalidFilterPattern { pattern: String, message: String },

    /// Formatter name without a registered implementation
    #[error("Unrecognized formatter name '{name}'")]
    UnrecognizedFormatter { name: String },

    /// Handler name without a registered implementation
    #[error("Unrecognized handler name '{name}'")]
    UnrecognizedHandler { name: String },

    /// Handler returned an error or panicked while processing an event
    #[error("Handler '{handler}' failed: {message}")]
    HandlerFailed { handler: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an invalid level error from the rejected input
    pub fn invalid_level(value: impl Into<String>) -> Self {
        LoggerError::InvalidLevel {
            value: value.into(),
        }
    }

    /// Create an invalid filter pattern error
    pub fn filter_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidFilterPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn unrecognized_formatter(name: impl Into<String>) -> Self {
        LoggerError::UnrecognizedFormatter { name: name.into() }
    }

    pub fn unrecognized_handler(name: impl Into<String>) -> Self {
        LoggerError::UnrecognizedHandler { name: name.into() }
    }

    /// Create a handler failure error
    pub fn handler_failed(handler: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HandlerFailed {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_level("verbose");
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));

        let err = LoggerError::config("StreamHandler", "no outputs");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::filter_pattern("(", "unclosed group");
        assert!(matches!(err, LoggerError::InvalidFilterPattern { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_level("verbose");
        assert_eq!(err.to_string(), "Invalid level: verbose");

        let err = LoggerError::unrecognized_formatter("xml");
        assert_eq!(err.to_string(), "Unrecognized formatter name 'xml'");

        let err = LoggerError::unrecognized_handler("syslog");
        assert_eq!(err.to_string(), "Unrecognized handler name 'syslog'");

        let err = LoggerError::handler_failed("stream", "broken pipe");
        assert_eq!(err.to_string(), "Handler 'stream' failed: broken pipe");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("writing log line", "cannot write to output", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing log line"));
        assert!(err.to_string().contains("cannot write to output"));
    }
}
