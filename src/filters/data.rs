//! Field-map redaction by key and composite path

use super::FILTERED;
use crate::core::error::{LoggerError, Result};
use crate::core::fields::{FieldMap, FieldValue};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

const DOT: &str = ".";

/// Predicate over the composite path of a field, current key included
pub type PathPredicate = Arc<dyn Fn(&[String]) -> bool + Send + Sync>;

/// A rule selecting fields to mask.
///
/// Literal and regex rules are tested against the bare key unless their
/// text contains a `.`, in which case they are tested against the
/// dot-joined path from the map root (`params.password`). Literals must
/// match exactly; regexes match anywhere unless anchored.
#[derive(Clone)]
pub enum FilterRule {
    Literal(String),
    Regex(String),
    Predicate(PathPredicate),
}

impl FilterRule {
    pub fn literal(key: impl Into<String>) -> Self {
        FilterRule::Literal(key.into())
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        FilterRule::Regex(pattern.into())
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        FilterRule::Predicate(Arc::new(f))
    }
}

impl fmt::Debug for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterRule::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            FilterRule::Regex(s) => f.debug_tuple("Regex").field(s).finish(),
            FilterRule::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<&str> for FilterRule {
    fn from(s: &str) -> Self {
        FilterRule::Literal(s.to_string())
    }
}

impl From<String> for FilterRule {
    fn from(s: String) -> Self {
        FilterRule::Literal(s)
    }
}

#[derive(Default)]
struct CompiledRules {
    keys: Vec<Regex>,
    paths: Vec<Regex>,
    predicates: Vec<PathPredicate>,
}

impl CompiledRules {
    fn compile(rules: &[FilterRule]) -> Result<Self> {
        let mut compiled = CompiledRules::default();
        let mut literals = Vec::new();
        let mut nested_literals = Vec::new();

        for rule in rules {
            match rule {
                FilterRule::Literal(key) => {
                    let escaped = regex::escape(key);
                    if key.contains(DOT) {
                        nested_literals.push(escaped);
                    } else {
                        literals.push(escaped);
                    }
                }
                FilterRule::Regex(pattern) => {
                    let re = Regex::new(pattern)
                        .map_err(|e| LoggerError::filter_pattern(pattern, e.to_string()))?;
                    if pattern.contains(DOT) {
                        compiled.paths.push(re);
                    } else {
                        compiled.keys.push(re);
                    }
                }
                FilterRule::Predicate(f) => compiled.predicates.push(Arc::clone(f)),
            }
        }

        if !literals.is_empty() {
            compiled.keys.push(alternation(&literals)?);
        }
        if !nested_literals.is_empty() {
            compiled.paths.push(alternation(&nested_literals)?);
        }

        Ok(compiled)
    }

    fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.paths.is_empty() && self.predicates.is_empty()
    }
}

fn alternation(escaped: &[String]) -> Result<Regex> {
    let pattern = format!("^(?:{})$", escaped.join("|"));
    Regex::new(&pattern).map_err(|e| LoggerError::filter_pattern(pattern.clone(), e.to_string()))
}

/// Masks values of fields selected by a compiled rule set.
///
/// Rules are compiled once in [`DataFilter::new`]; [`DataFilter::filter`]
/// never recompiles and may be called concurrently.
///
/// # Example
///
/// ```
/// use rust_field_logger::{fields, DataFilter};
///
/// let filter = DataFilter::new(vec!["password".into()]).unwrap();
/// let masked = filter.filter(&fields!("user" => "alice", "password" => "hunter2"));
/// assert_eq!(masked.to_string(), r#"user=alice password="[FILTERED]""#);
/// ```
pub struct DataFilter {
    rules: Vec<FilterRule>,
    compiled: CompiledRules,
    mask: String,
}

impl DataFilter {
    /// Compile rules with the default `[FILTERED]` mask
    pub fn new(rules: Vec<FilterRule>) -> Result<Self> {
        Self::with_mask(rules, FILTERED)
    }

    pub fn with_mask(rules: Vec<FilterRule>, mask: impl Into<String>) -> Result<Self> {
        let compiled = CompiledRules::compile(&rules)?;
        Ok(Self {
            rules,
            compiled,
            mask: mask.into(),
        })
    }

    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    pub fn mask(&self) -> &str {
        &self.mask
    }

    /// Return a copy of `fields` with every selected value replaced by the mask
    pub fn filter(&self, fields: &FieldMap) -> FieldMap {
        if self.compiled.is_empty() {
            return fields.clone();
        }

        let mut path = Vec::new();
        fields
            .iter()
            .map(|(key, value)| (key, self.filter_val(key, value, &mut path)))
            .collect()
    }

    fn filter_val(&self, key: &str, value: &FieldValue, path: &mut Vec<String>) -> FieldValue {
        if self.is_filtered(key, path) {
            return FieldValue::String(self.mask.clone());
        }

        match value {
            FieldValue::Mapping(map) => {
                path.push(key.to_string());
                let filtered = map
                    .iter()
                    .map(|(k, v)| (k, self.filter_val(k, v, path)))
                    .collect();
                path.pop();
                FieldValue::Mapping(filtered)
            }
            // Elements take their container's key
            FieldValue::Sequence(items) => FieldValue::Sequence(
                items
                    .iter()
                    .map(|item| self.filter_val(key, item, path))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn is_filtered(&self, key: &str, path: &mut Vec<String>) -> bool {
        if self.compiled.keys.iter().any(|re| re.is_match(key)) {
            return true;
        }
        if self.compiled.paths.is_empty() && self.compiled.predicates.is_empty() {
            return false;
        }

        path.push(key.to_string());
        let joined = path.join(DOT);
        let matched = self.compiled.paths.iter().any(|re| re.is_match(&joined))
            || self.compiled.predicates.iter().any(|f| f(path.as_slice()));
        path.pop();
        matched
    }
}

impl fmt::Debug for DataFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataFilter")
            .field("rules", &self.rules)
            .field("mask", &self.mask)
            .finish()
    }
}
