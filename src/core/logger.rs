//! Main logger implementation

use super::{
    config::{LoggerConfig, MetadataKey},
    error::{LoggerError, Result},
    event::{CallSite, Event, Metadata},
    fields::{FieldMap, FieldValue},
    handler::Handler,
    log_args::LogArgs,
    log_level::{log_allowed, LogLevel, ToLevel},
    metrics::LoggerMetrics,
    output_format::OutputFormat,
};
use crate::filters::{DataFilter, FilterRule, MessageFilter, MessageRule};
use crate::handlers::{HandlerSpec, Output};
use parking_lot::RwLock;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

#[derive(Clone)]
struct Registered {
    spec: HandlerSpec,
    handler: Arc<dyn Handler>,
}

/// Structured logger.
///
/// Each log call normalizes its arguments, masks message text and fields,
/// builds one [`Event`] and hands it to every handler whose threshold
/// admits the event's level. Dispatch is synchronous; the logger may be
/// shared across threads.
///
/// # Example
///
/// ```
/// use rust_field_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .handler(HandlerKind::Null)
///     .fields(fields!("app" => "myapp"))
///     .build()
///     .unwrap();
///
/// logger.info(("Deploying", fields!("env" => "prod")));
/// logger.debug_with(|| format!("expensive {}", 42));
/// ```
pub struct Logger {
    config: LoggerConfig,
    fields: FieldMap,
    handlers: RwLock<Arc<Vec<Registered>>>,
    data_filter: DataFilter,
    message_filter: MessageFilter,
    level_override: RwLock<Option<LogLevel>>,
    /// Metrics for observability (emitted, skipped, failed handler calls)
    metrics: Arc<LoggerMetrics>,
}

macro_rules! level_methods {
    ($($level:ident => $name:ident, $lazy:ident;)+) => {
        $(
            #[doc = concat!("Log a `", stringify!($name), "` event at `", stringify!($level), "`, ignoring handler failures.")]
            #[track_caller]
            pub fn $name(&self, args: impl Into<LogArgs>) {
                let _ = self.dispatch(
                    LogLevel::$level,
                    args.into(),
                    None::<fn() -> LogArgs>,
                    CallSite::caller().with_label(stringify!($name)),
                );
            }

            #[doc = concat!("Log a `", stringify!($name), "` event with a message built by `block`.")]
            #[track_caller]
            pub fn $lazy<F, R>(&self, block: F)
            where
                F: FnOnce() -> R,
                R: Into<LogArgs>,
            {
                let site = CallSite::caller().with_label(stringify!($name));
                let _ = self.dispatch(LogLevel::$level, LogArgs::new(), Some(block), site);
            }
        )+
    };
}

impl Logger {
    /// Create a logger from a configuration
    pub fn new(config: LoggerConfig) -> Result<Self> {
        Self::with_fields(config, FieldMap::new())
    }

    /// Create a logger whose events all carry `fields`
    pub fn with_fields(config: LoggerConfig, fields: FieldMap) -> Result<Self> {
        config.validate()?;
        let data_filter = config.filters.data_filter()?;
        let message_filter = config.filters.message_filter()?;
        let handlers = config
            .handlers
            .iter()
            .map(|spec| {
                Ok(Registered {
                    spec: spec.clone(),
                    handler: spec.build(&config)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            config,
            fields,
            handlers: RwLock::new(Arc::new(handlers)),
            data_filter,
            message_filter,
            level_override: RwLock::new(None),
            metrics: Arc::new(LoggerMetrics::new()),
        })
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Persistent fields attached to every event
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Get current metrics
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Threshold applied to handlers without their own level
    pub fn level(&self) -> LogLevel {
        self.level_override.read().unwrap_or(self.config.level)
    }

    /// Log `args` at `level`.
    ///
    /// Every admitted handler runs even if an earlier one fails; the first
    /// failure is returned as [`LoggerError::HandlerFailed`] afterwards.
    /// An unknown level fails before anything is logged.
    #[track_caller]
    pub fn log(&self, level: impl ToLevel, args: impl Into<LogArgs>) -> Result<()> {
        let level = level.to_level()?;
        self.dispatch(level, args.into(), None::<fn() -> LogArgs>, CallSite::caller())
    }

    /// Log with a deferred message.
    ///
    /// `block` runs exactly once, and only when `args` hold no message
    /// parts. Field maps it returns merge into the call's fields.
    #[track_caller]
    pub fn log_with<F, R>(&self, level: impl ToLevel, args: impl Into<LogArgs>, block: F) -> Result<()>
    where
        F: FnOnce() -> R,
        R: Into<LogArgs>,
    {
        let level = level.to_level()?;
        self.dispatch(level, args.into(), Some(block), CallSite::caller())
    }

    /// Log with an explicit call site, as the logging macros do
    pub fn log_from(&self, site: CallSite, level: impl ToLevel, args: impl Into<LogArgs>) -> Result<()> {
        let level = level.to_level()?;
        self.dispatch(level, args.into(), None::<fn() -> LogArgs>, site)
    }

    level_methods! {
        Debug => debug, debug_with;
        Info => info, info_with;
        Warn => warn, warn_with;
        Error => error, error_with;
        Fatal => fatal, fatal_with;
        Info => success, success_with;
        Info => wait, wait_with;
    }

    /// Run `f` with every handler's threshold temporarily set to `level`.
    ///
    /// The previous thresholds come back when `f` returns or unwinds. The
    /// override is visible to all threads sharing this logger.
    ///
    /// Overlapping calls from different threads are not supported: each
    /// call restores the value it saw on entry, so the last one to finish
    /// may bring back another thread's override. Nesting on one thread is
    /// fine.
    pub fn log_at<T>(&self, level: impl ToLevel, f: impl FnOnce() -> T) -> Result<T> {
        let level = level.to_level()?;
        let previous = self.level_override.write().replace(level);
        let _restore = LevelGuard {
            slot: &self.level_override,
            previous,
        };
        Ok(f())
    }

    /// Child logger with the same configuration and `fields` added to the
    /// persistent fields (the child's values win)
    pub fn copy(&self, fields: FieldMap) -> Result<Logger> {
        self.copy_with(fields, |_| {})
    }

    /// Like [`Logger::copy`], adjusting a clone of the configuration first
    pub fn copy_with<F>(&self, fields: FieldMap, configure: F) -> Result<Logger>
    where
        F: FnOnce(&mut LoggerConfig),
    {
        let mut config = self.config.clone();
        config.handlers = self.handlers.read().iter().map(|r| r.spec.clone()).collect();
        configure(&mut config);
        Logger::with_fields(config, self.fields.merged(&fields))
    }

    /// Build and register another handler
    pub fn add_handler(&self, spec: impl Into<HandlerSpec>) -> Result<()> {
        let spec = spec.into();
        let handler = spec.build(&self.config)?;

        let mut guard = self.handlers.write();
        let mut handlers = Vec::clone(&guard);
        handlers.push(Registered { spec, handler });
        *guard = Arc::new(handlers);
        Ok(())
    }

    /// Unregister the first handler called `name`
    pub fn remove_handler(&self, name: &str) -> bool {
        let mut guard = self.handlers.write();
        let Some(idx) = guard.iter().position(|r| r.handler.name() == name) else {
            return false;
        };
        let mut handlers = Vec::clone(&guard);
        handlers.remove(idx);
        *guard = Arc::new(handlers);
        true
    }

    /// Names of the registered handlers, in dispatch order
    pub fn handler_names(&self) -> Vec<String> {
        self.handlers
            .read()
            .iter()
            .map(|r| r.handler.name().to_string())
            .collect()
    }

    pub fn flush(&self) -> Result<()> {
        let handlers = Arc::clone(&self.handlers.read());
        for registered in handlers.iter() {
            registered.handler.flush()?;
        }
        Ok(())
    }

    fn dispatch<F, R>(&self, level: LogLevel, args: LogArgs, block: Option<F>, site: CallSite) -> Result<()>
    where
        F: FnOnce() -> R,
        R: Into<LogArgs>,
    {
        let (mut parts, mut scoped) = args.split();
        if parts.is_empty() {
            if let Some(block) = block {
                block().into().absorb(&mut parts, &mut scoped);
            }
        }

        let fields = self.fields.merged(&scoped);
        let metadata = Metadata::capture(level, site);
        let message = self.message_filter.mask_parts(&parts);
        let fields = self.data_filter.filter(&fields);
        let event = Event::new(message, fields, metadata);

        self.metrics.record_dispatched();
        self.emit(&event)
    }

    /// Hand `event` to every admitted handler.
    ///
    /// **Per-Handler Isolation**: each handler call is wrapped in
    /// `catch_unwind`, so an error or panic in one handler does not keep the
    /// remaining handlers from receiving the event.
    fn emit(&self, event: &Event) -> Result<()> {
        let handlers = Arc::clone(&self.handlers.read());
        let level_override = *self.level_override.read();
        let mut first_failure = None;

        for (idx, registered) in handlers.iter().enumerate() {
            let handler = &registered.handler;
            let threshold = level_override
                .or_else(|| handler.level())
                .unwrap_or(self.config.level);
            if !log_allowed(threshold, event.level())? {
                self.metrics.record_skipped();
                continue;
            }

            let message = match catch_unwind(AssertUnwindSafe(|| handler.call(event))) {
                Ok(Ok(())) => {
                    self.metrics.record_emitted();
                    continue;
                }
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Handler #{} ({}) failed: {}", idx, handler.name(), e);
                    e.to_string()
                }
                Err(panic_info) => {
                    let panic_msg = panic_message(panic_info.as_ref());
                    eprintln!(
                        "[LOGGER CRITICAL] Handler #{} ({}) panicked: {}. \
                         Other handlers continue to function.",
                        idx,
                        handler.name(),
                        panic_msg
                    );
                    format!("panicked: {}", panic_msg)
                }
            };

            self.metrics.record_failure();
            first_failure.get_or_insert_with(|| LoggerError::handler_failed(handler.name(), message));
        }

        first_failure.map_or(Ok(()), Err)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during drop: {}", e);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

struct LevelGuard<'a> {
    slot: &'a RwLock<Option<LogLevel>>,
    previous: Option<LogLevel>,
}

impl Drop for LevelGuard<'_> {
    fn drop(&mut self) {
        *self.slot.write() = self.previous;
    }
}

/// Builder for creating a Logger with custom configuration
///
/// # Example
/// ```
/// use rust_field_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .formatter(OutputFormat::Json)
///     .handler(HandlerKind::Stream)
///     .output(Output::stdout())
///     .filter_data("password")
///     .filter_message("secret")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
    handlers: Option<Vec<HandlerSpec>>,
    outputs: Option<Vec<Output>>,
    fields: FieldMap,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_bytes(mut self, max_bytes: usize) -> Self {
        self.config.max_bytes = max_bytes;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: OutputFormat) -> Self {
        self.config.formatter = formatter;
        self
    }

    /// Add a handler; the first call replaces the default handlers
    #[must_use = "builder methods return a new value"]
    pub fn handler(mut self, spec: impl Into<HandlerSpec>) -> Self {
        self.handlers.get_or_insert_with(Vec::new).push(spec.into());
        self
    }

    /// Add an output; the first call replaces the default stderr output
    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, output: Output) -> Self {
        self.outputs.get_or_insert_with(Vec::new).push(output);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn metadata(mut self, key: MetadataKey) -> Self {
        self.config.metadata.push(key);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.config.date_format = format.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.config.time_format = format.into();
        self
    }

    /// Mask matches of `rule` in message text and backtraces
    #[must_use = "builder methods return a new value"]
    pub fn filter_message(mut self, rule: impl Into<MessageRule>) -> Self {
        self.config.filters.message.push(rule.into());
        self
    }

    /// Mask field values selected by `rule`
    #[must_use = "builder methods return a new value"]
    pub fn filter_data(mut self, rule: impl Into<FilterRule>) -> Self {
        self.config.filters.data.push(rule.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn mask(mut self, mask: impl Into<String>) -> Self {
        self.config.filters.mask = mask.into();
        self
    }

    /// Replace the persistent fields
    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: FieldMap) -> Self {
        self.fields = fields;
        self
    }

    /// Add one persistent field
    #[must_use = "builder methods return a new value"]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key, value);
        self
    }

    /// Build the Logger, compiling filters and resolving handlers
    pub fn build(self) -> Result<Logger> {
        let mut config = self.config;
        if let Some(handlers) = self.handlers {
            config.handlers = handlers;
        }
        if let Some(outputs) = self.outputs {
            config.output = outputs;
        }
        Logger::with_fields(config, self.fields)
    }
}
