//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Fields follow the
//! message after a `;`. The calling module is recorded in the event
//! metadata.
//!
//! # Examples
//!
//! ```
//! use rust_field_logger::prelude::*;
//! use rust_field_logger::info;
//!
//! let logger = Logger::builder().handler(HandlerKind::Null).build().unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With fields
//! let user_id = 42;
//! info!(logger, "User {} logged in", user_id; "user" => user_id, "method" => "password");
//! ```

/// Build a [`FieldMap`](crate::FieldMap) from `key => value` pairs.
///
/// ```
/// use rust_field_logger::fields;
///
/// let map = fields!("app" => "myapp", "port" => 8080);
/// assert_eq!(map.to_string(), "app=myapp port=8080");
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::FieldMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::FieldMap::new();
        $( map.insert($key, $value); )+
        map
    }};
}

/// Log a message with automatic formatting.
///
/// Evaluates to the `Result` of [`Logger::log_from`](crate::Logger::log_from),
/// so an unknown level or a failed handler is visible to the caller.
///
/// # Examples
///
/// ```
/// # use rust_field_logger::prelude::*;
/// # let logger = Logger::builder().handler(HandlerKind::Null).build().unwrap();
/// use rust_field_logger::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, "error", "Error code: {}", 500; "code" => 500).unwrap();
/// assert!(log!(logger, "verbose", "Unknown level").is_err());
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* ; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.log_from(
            $crate::CallSite::caller().with_module(module_path!()),
            $level,
            $crate::LogArgs::from(format!($fmt $(, $arg)*))
                .with_fields($crate::fields!($($key => $value),+)),
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_from(
            $crate::CallSite::caller().with_module(module_path!()),
            $level,
            format!($($arg)+),
        )
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_field_logger::prelude::*;
/// # let logger = Logger::builder().handler(HandlerKind::Null).build().unwrap();
/// use rust_field_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+);
    }};
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_field_logger::prelude::*;
/// # let logger = Logger::builder().handler(HandlerKind::Null).build().unwrap();
/// use rust_field_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100; "batch" => 7);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($logger, $crate::LogLevel::Info, $($arg)+);
    }};
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_field_logger::prelude::*;
/// # let logger = Logger::builder().handler(HandlerKind::Null).build().unwrap();
/// use rust_field_logger::warn;
/// warn!(logger, "Retry {} of {}", 1, 3);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+);
    }};
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_field_logger::prelude::*;
/// # let logger = Logger::builder().handler(HandlerKind::Null).build().unwrap();
/// use rust_field_logger::error;
/// error!(logger, "Error code: {}", 500; "path" => "/health");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($logger, $crate::LogLevel::Error, $($arg)+);
    }};
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use rust_field_logger::prelude::*;
/// # let logger = Logger::builder().handler(HandlerKind::Null).build().unwrap();
/// use rust_field_logger::fatal;
/// fatal!(logger, "Critical failure: {}", "system");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+);
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger, LoggerError};
    use crate::handlers::output::testing::Capture;
    use crate::handlers::{HandlerKind, HandlerSpec};

    fn capturing_logger(level: LogLevel) -> (Logger, Capture) {
        let (output, capture) = Capture::output();
        let logger = Logger::builder()
            .level(level)
            .handler(HandlerSpec::new(HandlerKind::Stream))
            .output(output)
            .build()
            .unwrap();
        (logger, capture)
    }

    #[test]
    fn test_fields_macro() {
        let map = fields!("a" => 1, "b" => "two",);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(fields!().is_empty());
    }

    #[test]
    fn test_log_macro() {
        let (logger, capture) = capturing_logger(LogLevel::Info);
        log!(logger, LogLevel::Info, "Test message").unwrap();
        log!(logger, "warn", "Formatted: {}", 42).unwrap();

        assert_eq!(
            capture.lines(),
            vec!["level=info message=\"Test message\"", "level=warn message=\"Formatted: 42\""]
        );
    }

    #[test]
    fn test_log_macro_invalid_level() {
        let (logger, capture) = capturing_logger(LogLevel::Info);
        let err = log!(logger, "loud", "never written").unwrap_err();

        assert!(matches!(err, LoggerError::InvalidLevel { .. }));
        assert!(capture.contents().is_empty());
    }

    #[test]
    fn test_macro_fields() {
        let (logger, capture) = capturing_logger(LogLevel::Info);
        let items = 3;
        info!(logger, "Deploying {} items", items; "app" => "myapp", "items" => items);
        info!(logger, "No args"; "env" => "prod");

        assert_eq!(
            capture.lines(),
            vec![
                "level=info message=\"Deploying 3 items\" app=myapp items=3",
                "level=info message=\"No args\" env=prod",
            ]
        );
    }

    #[test]
    fn test_level_macros() {
        let (logger, capture) = capturing_logger(LogLevel::Debug);
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        fatal!(logger, "Critical failure: {}", "system");

        let levels: Vec<String> = capture
            .lines()
            .iter()
            .map(|line| line.split(' ').next().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            levels,
            vec!["level=debug", "level=info", "level=warn", "level=error", "level=fatal"]
        );
    }

    #[test]
    fn test_macro_records_module() {
        use crate::core::{Event, Handler, Result};
        use parking_lot::Mutex;
        use std::sync::Arc;

        #[derive(Clone, Default)]
        struct Sites(Arc<Mutex<Vec<(Option<String>, u32)>>>);

        impl Handler for Sites {
            fn name(&self) -> &str {
                "sites"
            }

            fn call(&self, event: &Event) -> Result<()> {
                let meta = event.metadata();
                self.0.lock().push((meta.method.clone(), meta.line));
                Ok(())
            }
        }

        let sites = Sites::default();
        let logger = Logger::builder()
            .handler(HandlerSpec::custom(sites.clone()))
            .build()
            .unwrap();
        let line = line!() + 1;
        info!(logger, "here");

        let recorded = sites.0.lock().clone();
        assert_eq!(recorded, vec![(Some(module_path!().to_string()), line)]);
    }
}
