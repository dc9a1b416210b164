//! Core logger types and traits

pub mod config;
pub mod error;
pub mod event;
pub mod fields;
pub mod handler;
pub mod log_args;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;

pub use config::{FilterConfig, LoggerConfig, MetadataKey, DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT};
pub use error::{LoggerError, Result};
pub use event::{CallSite, CapturedError, Event, MessagePart, Metadata};
pub use fields::{FieldMap, FieldValue};
pub use handler::Handler;
pub use log_args::{LogArg, LogArgs};
pub use log_level::{compare_levels, log_allowed, LogLevel, ToLevel};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
