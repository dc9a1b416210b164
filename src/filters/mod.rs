//! Redaction of sensitive data
//!
//! - [`DataFilter`]: masks field values by key, composite path or predicate
//! - [`MessageFilter`]: masks substrings of message text and backtraces

pub mod data;
pub mod message;

pub use data::{DataFilter, FilterRule, PathPredicate};
pub use message::{MessageFilter, MessagePattern, MessageRule};

/// Default placeholder for masked content
pub const FILTERED: &str = "[FILTERED]";
