//! Handler that discards every event

use crate::core::{Event, Handler, LogLevel, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct NullHandler {
    level: Option<LogLevel>,
}

impl NullHandler {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }
}

impl Handler for NullHandler {
    fn name(&self) -> &str {
        "null"
    }

    fn call(&self, _event: &Event) -> Result<()> {
        Ok(())
    }

    fn level(&self) -> Option<LogLevel> {
        self.level
    }
}
