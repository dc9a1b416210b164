//! Substring masking for message text and error backtraces

use super::FILTERED;
use crate::core::error::{LoggerError, Result};
use crate::core::event::MessagePart;
use regex::{NoExpand, Regex};
use std::borrow::Cow;

/// What a message rule looks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePattern {
    Literal(String),
    Regex(String),
}

/// One message masking rule with an optional mask of its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRule {
    pub pattern: MessagePattern,
    pub mask: Option<String>,
}

impl MessageRule {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            pattern: MessagePattern::Literal(text.into()),
            mask: None,
        }
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self {
            pattern: MessagePattern::Regex(pattern.into()),
            mask: None,
        }
    }

    #[must_use]
    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = Some(mask.into());
        self
    }
}

impl From<&str> for MessageRule {
    fn from(s: &str) -> Self {
        MessageRule::literal(s)
    }
}

impl From<String> for MessageRule {
    fn from(s: String) -> Self {
        MessageRule::literal(s)
    }
}

/// Replaces every occurrence of each rule in free text.
///
/// Rules apply in order, each to the output of the previous one. Errors are
/// never modified in place: masking an error part yields a new error with
/// masked message and backtrace lines.
#[derive(Debug, Clone)]
pub struct MessageFilter {
    rules: Vec<(Regex, String)>,
}

impl MessageFilter {
    pub fn new(rules: Vec<MessageRule>) -> Result<Self> {
        Self::with_mask(rules, FILTERED)
    }

    /// Compile rules; `mask` applies to rules without their own
    pub fn with_mask(rules: Vec<MessageRule>, mask: impl Into<String>) -> Result<Self> {
        let mask = mask.into();
        let rules = rules
            .into_iter()
            .map(|rule| {
                let source = match &rule.pattern {
                    MessagePattern::Literal(text) => regex::escape(text),
                    MessagePattern::Regex(pattern) => pattern.clone(),
                };
                let re = Regex::new(&source)
                    .map_err(|e| LoggerError::filter_pattern(source.clone(), e.to_string()))?;
                Ok((re, rule.mask.unwrap_or_else(|| mask.clone())))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Mask all rule matches in `text`
    pub fn mask_text(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (re, mask) in &self.rules {
            let replaced = match re.replace_all(&out, NoExpand(mask.as_str())) {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if let Some(replaced) = replaced {
                out = replaced;
            }
        }
        out
    }

    pub fn mask_part(&self, part: &MessagePart) -> MessagePart {
        match part {
            MessagePart::Text(text) => MessagePart::Text(self.mask_text(text)),
            MessagePart::Error(error) => {
                let backtrace = error
                    .backtrace()
                    .iter()
                    .map(|line| self.mask_text(line))
                    .collect();
                MessagePart::Error(error.copy_with(self.mask_text(error.message()), backtrace))
            }
        }
    }

    pub fn mask_parts(&self, parts: &[MessagePart]) -> Vec<MessagePart> {
        parts.iter().map(|part| self.mask_part(part)).collect()
    }
}
