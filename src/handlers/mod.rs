//! Handler implementations and the name registry
//!
//! Built-in handlers are selected by [`HandlerKind`]; anything else plugs in
//! through [`HandlerKind::Custom`] with an implementation of [`Handler`].

#[cfg(feature = "console")]
pub mod console;
pub mod null;
pub mod output;
pub mod stream;

#[cfg(feature = "console")]
pub use console::ConsoleHandler;
pub use null::NullHandler;
pub use output::Output;
pub use stream::StreamHandler;

use crate::core::{Event, Handler, LogLevel, LoggerConfig, LoggerError, OutputFormat, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Known handler implementations
#[derive(Clone)]
pub enum HandlerKind {
    #[cfg(feature = "console")]
    Console,
    Stream,
    Null,
    Custom(Arc<dyn Handler>),
}

impl HandlerKind {
    pub fn name(&self) -> &str {
        match self {
            #[cfg(feature = "console")]
            HandlerKind::Console => "console",
            HandlerKind::Stream => "stream",
            HandlerKind::Null => "null",
            HandlerKind::Custom(handler) => handler.name(),
        }
    }
}

impl Default for HandlerKind {
    #[cfg(feature = "console")]
    fn default() -> Self {
        HandlerKind::Console
    }

    #[cfg(not(feature = "console"))]
    fn default() -> Self {
        HandlerKind::Stream
    }
}

impl fmt::Debug for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerKind::Custom(handler) => write!(f, "Custom({})", handler.name()),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for HandlerKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            #[cfg(feature = "console")]
            "console" => Ok(HandlerKind::Console),
            "stream" => Ok(HandlerKind::Stream),
            "null" => Ok(HandlerKind::Null),
            _ => Err(LoggerError::unrecognized_handler(s)),
        }
    }
}

/// Per-handler overrides of the logger configuration
#[derive(Debug, Clone, Default)]
pub struct HandlerOptions {
    pub level: Option<LogLevel>,
    pub formatter: Option<OutputFormat>,
    pub output: Option<Vec<Output>>,
    pub enable_color: Option<bool>,
}

/// A handler to instantiate when a logger is built
#[derive(Debug, Clone, Default)]
pub struct HandlerSpec {
    pub kind: HandlerKind,
    pub options: HandlerOptions,
}

impl HandlerSpec {
    pub fn new(kind: HandlerKind) -> Self {
        Self {
            kind,
            options: HandlerOptions::default(),
        }
    }

    /// Spec for a caller supplied handler
    pub fn custom<H: Handler + 'static>(handler: H) -> Self {
        Self::new(HandlerKind::Custom(Arc::new(handler)))
    }

    /// Resolve a handler by name
    pub fn parse(name: &str) -> Result<Self> {
        name.parse().map(Self::new)
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.options.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: OutputFormat) -> Self {
        self.options.formatter = Some(formatter);
        self
    }

    /// Add an output; the first call replaces the configured outputs
    #[must_use]
    pub fn with_output(mut self, output: Output) -> Self {
        self.options.output.get_or_insert_with(Vec::new).push(output);
        self
    }

    #[must_use]
    pub fn with_colors(mut self, enable: bool) -> Self {
        self.options.enable_color = Some(enable);
        self
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Instantiate the handler against `config`
    pub fn build(&self, config: &LoggerConfig) -> Result<Arc<dyn Handler>> {
        let opts = &self.options;
        let outputs = opts.output.clone().unwrap_or_else(|| config.output.clone());
        if outputs.is_empty() && !matches!(self.kind, HandlerKind::Null | HandlerKind::Custom(_)) {
            return Err(LoggerError::config(self.name(), "no outputs configured"));
        }

        let handler: Arc<dyn Handler> = match &self.kind {
            #[cfg(feature = "console")]
            HandlerKind::Console => Arc::new(
                ConsoleHandler::from_config(config)
                    .with_outputs(outputs)
                    .with_formatter(opts.formatter.unwrap_or(config.formatter))
                    .with_level(opts.level.unwrap_or(config.level))
                    .with_colors(opts.enable_color.unwrap_or(true)),
            ),
            HandlerKind::Stream => Arc::new(
                StreamHandler::from_config(config)
                    .with_outputs(outputs)
                    .with_formatter(opts.formatter.unwrap_or(config.formatter))
                    .with_level(opts.level.unwrap_or(config.level)),
            ),
            HandlerKind::Null => Arc::new(NullHandler::new().with_level(opts.level.unwrap_or(config.level))),
            HandlerKind::Custom(handler) => match opts.level {
                Some(level) => Arc::new(LevelOverride {
                    inner: Arc::clone(handler),
                    level,
                }),
                None => Arc::clone(handler),
            },
        };

        Ok(handler)
    }
}

impl From<HandlerKind> for HandlerSpec {
    fn from(kind: HandlerKind) -> Self {
        Self::new(kind)
    }
}

/// Custom handler with a threshold set from its spec
struct LevelOverride {
    inner: Arc<dyn Handler>,
    level: LogLevel,
}

impl Handler for LevelOverride {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn call(&self, event: &Event) -> Result<()> {
        self.inner.call(event)
    }

    fn level(&self) -> Option<LogLevel> {
        Some(self.level)
    }

    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named;

    impl Handler for Named {
        fn name(&self) -> &str {
            "named"
        }

        fn call(&self, _event: &Event) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_resolves_names() {
        assert_eq!(HandlerSpec::parse("stream").unwrap().name(), "stream");
        assert_eq!(HandlerSpec::parse("NULL").unwrap().name(), "null");
        #[cfg(feature = "console")]
        assert_eq!(HandlerSpec::parse("Console").unwrap().name(), "console");
    }

    #[test]
    fn test_unknown_name_fails() {
        let err = HandlerSpec::parse("syslog").unwrap_err();
        assert!(matches!(err, LoggerError::UnrecognizedHandler { ref name } if name == "syslog"));
    }

    #[test]
    fn test_options_override_config() {
        let config = LoggerConfig::default();
        let handler = HandlerSpec::new(HandlerKind::Stream)
            .with_level(LogLevel::Error)
            .build(&config)
            .unwrap();
        assert_eq!(handler.level(), Some(LogLevel::Error));

        let handler = HandlerSpec::new(HandlerKind::Stream).build(&config).unwrap();
        assert_eq!(handler.level(), Some(config.level));
    }

    #[test]
    fn test_custom_handler() {
        let spec = HandlerSpec::custom(Named);
        assert_eq!(spec.name(), "named");

        let handler = spec.clone().build(&LoggerConfig::default()).unwrap();
        assert_eq!(handler.level(), None);

        let handler = spec.with_level(LogLevel::Warn).build(&LoggerConfig::default()).unwrap();
        assert_eq!(handler.name(), "named");
        assert_eq!(handler.level(), Some(LogLevel::Warn));
    }

    #[test]
    fn test_missing_outputs_rejected() {
        let mut config = LoggerConfig::default();
        config.output.clear();

        let err = HandlerSpec::new(HandlerKind::Stream).build(&config).err().expect("expected build error");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(HandlerSpec::new(HandlerKind::Null).build(&config).is_ok());
    }
}
