//! Output format registry
//!
//! Maps formatter names to their implementations:
//! - Text: `key=value` pairs (default)
//! - Json: single-line JSON object

use super::error::{LoggerError, Result};
use super::fields::FieldMap;
use crate::formatters::{Formatter, FormatterBudget, JsonFormatter, TextFormatter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format for the field-map portion of a log line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable `key=value` format (default)
    ///
    /// Example: `level=info message="Request processed" user=alice`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"level":"info","message":"Request processed","user":"alice"}`
    Json,
}

static TEXT: TextFormatter = TextFormatter;
static JSON: JsonFormatter = JsonFormatter;

impl OutputFormat {
    /// The shared formatter implementation for this format
    pub fn formatter(&self) -> &'static dyn Formatter {
        match self {
            OutputFormat::Text => &TEXT,
            OutputFormat::Json => &JSON,
        }
    }

    /// Render a field map with this format
    pub fn dump(&self, fields: &FieldMap, budget: FormatterBudget) -> String {
        self.formatter().dump(fields, budget)
    }

    pub fn name(&self) -> &'static str {
        self.formatter().name()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(LoggerError::unrecognized_formatter(s)),
        }
    }
}
