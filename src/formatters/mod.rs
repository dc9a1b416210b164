//! Field map formatters
//!
//! Each formatter serializes a [`FieldMap`] into a single line, bounded by a
//! [`FormatterBudget`]. Output is deterministic: identical input and budget
//! always produce byte-identical text.

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::core::FieldMap;

/// Placeholder substituted for truncated content
pub const ELLIPSIS: &str = "...";

/// Default byte ceiling for a rendered field map
pub const DEFAULT_MAX_BYTES: usize = 8192;

/// Default nesting ceiling for a rendered field map
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Size and nesting limits applied while rendering a field map.
///
/// `max_bytes` bounds the rendered field-map line only, not the whole log
/// line. `max_depth` counts container levels; a container reached at the
/// limit is replaced by an ellipsis placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatterBudget {
    pub max_bytes: usize,
    pub max_depth: usize,
}

impl FormatterBudget {
    pub const fn new(max_bytes: usize, max_depth: usize) -> Self {
        Self {
            max_bytes,
            max_depth,
        }
    }

    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for FormatterBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BYTES, DEFAULT_MAX_DEPTH)
    }
}

/// Serializes a field map into one line of text
pub trait Formatter: Send + Sync {
    fn name(&self) -> &'static str;

    fn dump(&self, fields: &FieldMap, budget: FormatterBudget) -> String;
}
