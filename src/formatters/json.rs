//! JSON object formatter

use super::{Formatter, FormatterBudget, ELLIPSIS};
use crate::core::{FieldMap, FieldValue};
use chrono::{DateTime, FixedOffset};
use serde_json::Value;

/// Renders a field map as a single JSON object.
///
/// Keys keep insertion order. Entries past the byte budget collapse into a
/// single `"..."` value under the first key that did not fit; containers at
/// the depth limit are replaced by the string `"..."`. The result always
/// parses as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn dump(&self, fields: &FieldMap, budget: FormatterBudget) -> String {
        let mut entries: Vec<String> = Vec::with_capacity(fields.len());
        let mut bytesize = 0usize;

        for (key, value) in fields.iter() {
            let key_json = encode_str(key);
            let mut full = String::new();
            encode(value, usize::MAX, &mut full);
            let candidate = key_json.len() + full.len();

            let limit = budget.max_bytes.saturating_add(1);
            if bytesize + candidate + entries.len() + ELLIPSIS.len() > limit {
                entries.push(format!("{}:{}", key_json, encode_str(ELLIPSIS)));
                break;
            }

            bytesize += candidate;
            let mut rendered = String::new();
            encode(value, budget.max_depth, &mut rendered);
            entries.push(format!("{}:{}", key_json, rendered));
        }

        format!("{{{}}}", entries.join(","))
    }
}

fn encode_str(s: &str) -> String {
    Value::from(s).to_string()
}

fn encode_time(t: &DateTime<FixedOffset>) -> String {
    if t.offset().local_minus_utc() == 0 {
        t.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    } else {
        t.format("%Y-%m-%d %H:%M:%S %z").to_string()
    }
}

fn encode(value: &FieldValue, depth: usize, out: &mut String) {
    match value {
        FieldValue::Mapping(map) => {
            if depth <= 1 {
                out.push_str(&encode_str(ELLIPSIS));
                return;
            }
            out.push('{');
            for (idx, (k, v)) in map.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                out.push_str(&encode_str(k));
                out.push(':');
                encode(v, depth - 1, out);
            }
            out.push('}');
        }
        FieldValue::Sequence(items) => {
            if depth <= 1 {
                out.push_str(&encode_str(ELLIPSIS));
                return;
            }
            out.push('[');
            for (idx, v) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                encode(v, depth - 1, out);
            }
            out.push(']');
        }
        FieldValue::String(s) => out.push_str(&encode_str(s)),
        FieldValue::Timestamp(t) => out.push_str(&encode_str(&encode_time(t))),
        FieldValue::Float(f) => out.push_str(&Value::from(*f).to_string()),
        FieldValue::Int(i) => out.push_str(&i.to_string()),
        FieldValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        FieldValue::Null => out.push_str("null"),
    }
}
