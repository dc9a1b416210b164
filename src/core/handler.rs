//! Handler trait for log event sinks

use super::{error::Result, event::Event, log_level::LogLevel};

/// Receives every event that passes its level gate.
///
/// Handlers get the event by shared reference and must not rely on
/// anything beyond what it exposes. Implementations that write somewhere
/// shared are responsible for serializing their own writes.
pub trait Handler: Send + Sync {
    fn name(&self) -> &str;

    fn call(&self, event: &Event) -> Result<()>;

    /// Threshold overriding the logger's level for this handler
    fn level(&self) -> Option<LogLevel> {
        None
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
