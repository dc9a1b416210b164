//! Shared line-oriented output sinks

use crate::core::error::{LoggerError, Result};
use parking_lot::Mutex;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// A cloneable handle to a writer.
///
/// Clones share the same underlying writer, so several handlers (or a
/// logger and its copies) can fan out to one stream. Each line is written
/// and flushed while holding the writer's lock.
#[derive(Clone)]
pub struct Output {
    name: Arc<str>,
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Output {
    pub fn new<W: Write + Send + 'static>(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: Arc::from(name.into()),
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stderr() -> Self {
        Self::new("stderr", std::io::stderr())
    }

    pub fn stdout() -> Self {
        Self::new("stdout", std::io::stdout())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write `line` followed by a newline
    pub fn write_line(&self, line: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush())
            .map_err(|e| {
                LoggerError::io_operation(
                    "writing log line",
                    format!("cannot write to {}", self.name),
                    e,
                )
            })
    }

    pub fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    /// Whether both handles write to the same writer
    pub fn same_writer(&self, other: &Output) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output").field("name", &self.name).finish()
    }
}
