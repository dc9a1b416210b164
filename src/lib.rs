//! # Rust Field Logger
//!
//! A structured logging front end: leveled events carrying a message, a
//! field map and call-site metadata, rendered through bounded formatters
//! and dispatched to pluggable handlers.
//!
//! ## Features
//!
//! - **Redaction**: mask fields by key, dotted path, regex or predicate, and
//!   mask message text and error backtraces
//! - **Bounded Output**: text and JSON formatters that truncate by byte
//!   budget and nesting depth while staying parseable
//! - **Per-Handler Levels**: each handler gates events with its own threshold
//! - **Thread Safe**: one logger may be shared across threads; each handler
//!   writes whole lines under its own lock
//!
//! ## Example
//!
//! ```
//! use rust_field_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .level(LogLevel::Debug)
//!     .handler(HandlerKind::Stream)
//!     .output(Output::stdout())
//!     .filter_data("password")
//!     .build()
//!     .unwrap();
//!
//! logger.info(("Login", fields!("user" => "alice", "password" => "hunter2")));
//! ```

pub mod core;
pub mod filters;
pub mod formatters;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        CapturedError, Event, FieldMap, FieldValue, Handler, LogLevel, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, MetadataKey, OutputFormat, Result,
    };
    pub use crate::fields;
    pub use crate::filters::{DataFilter, FilterRule, MessageFilter, MessageRule};
    pub use crate::handlers::{HandlerKind, HandlerSpec, Output, StreamHandler};
}

pub use crate::core::{
    compare_levels, log_allowed, CallSite, CapturedError, Event, FieldMap, FieldValue,
    FilterConfig, Handler, LogArg, LogArgs, LogLevel, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, MessagePart, Metadata, MetadataKey, OutputFormat, Result, ToLevel,
};
pub use filters::{DataFilter, FilterRule, MessageFilter, MessagePattern, MessageRule};
pub use formatters::{Formatter, FormatterBudget, JsonFormatter, TextFormatter};
pub use handlers::{HandlerKind, HandlerOptions, HandlerSpec, NullHandler, Output, StreamHandler};

#[cfg(feature = "console")]
pub use handlers::ConsoleHandler;
