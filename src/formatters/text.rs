//! `key=value` text formatter

use super::{Formatter, FormatterBudget, ELLIPSIS};
use crate::core::{FieldMap, FieldValue};
use regex::Regex;
use std::sync::LazyLock;

const SPACE: &str = " ";
const TIME_FORMAT: &str = "%FT%T%:z";

static NUM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d*(?:\.\d+)?\d+$").expect("numeric pattern is valid"));

/// Renders a field map as space separated `key=value` tokens.
///
/// Keys and strings stay bare unless they contain a character that would make the
/// line ambiguous to split, spell a literal (`true`, `false`, `nil`,
/// `null`) or look like a number; those are double quoted with escapes.
/// Control characters always force quoting so a record stays on one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn dump(&self, fields: &FieldMap, budget: FormatterBudget) -> String {
        let mut tokens: Vec<String> = Vec::with_capacity(fields.len());
        let mut bytesize = 0usize;

        for (key, value) in fields.iter() {
            let token = format!("{}={}", dump_key(key), dump_val(value, budget.max_depth));

            // Separators are counted between accepted tokens only
            let limit = budget.max_bytes.saturating_add(1);
            if bytesize + token.len() + tokens.len() > limit {
                if let Some(last) = tokens.last() {
                    if bytesize + tokens.len() + last.len() > limit.saturating_add(ELLIPSIS.len()) {
                        tokens.pop();
                    }
                }
                tokens.push(ELLIPSIS.to_string());
                break;
            }

            bytesize += token.len();
            tokens.push(token);
        }

        tokens.join(SPACE)
    }
}

fn needs_escape(c: char) -> bool {
    matches!(
        c,
        ' ' | '=' | '"' | '|' | '{' | '}' | '(' | ')' | '[' | ']' | '^' | '$' | '+' | '*' | '?'
            | '.' | '-'
    ) || c.is_control()
}

fn quote(s: &str) -> String {
    format!("{:?}", s)
}

/// Keys take the same bare or quoted form as string values
fn dump_key(key: &str) -> String {
    enc_str(key)
}

fn dump_val(value: &FieldValue, depth: usize) -> String {
    match value {
        FieldValue::Mapping(map) => enc_obj(map, depth),
        FieldValue::Sequence(items) => enc_arr(items, depth),
        FieldValue::String(s) => enc_str(s),
        FieldValue::Float(f) => enc_float(*f),
        FieldValue::Int(i) => i.to_string(),
        FieldValue::Timestamp(t) => t.format(TIME_FORMAT).to_string(),
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::Null => "null".to_string(),
    }
}

fn enc_obj(map: &FieldMap, depth: usize) -> String {
    if depth <= 1 {
        return format!("{{{}}}", ELLIPSIS);
    }
    let inner: Vec<String> = map
        .iter()
        .map(|(k, v)| format!("{}={}", dump_key(k), dump_val(v, depth - 1)))
        .collect();
    format!("{{{}}}", inner.join(SPACE))
}

fn enc_arr(items: &[FieldValue], depth: usize) -> String {
    if depth <= 1 {
        return format!("[{}]", ELLIPSIS);
    }
    let inner: Vec<String> = items.iter().map(|v| dump_val(v, depth - 1)).collect();
    format!("[{}]", inner.join(SPACE))
}

fn enc_str(s: &str) -> String {
    let literal = matches!(s, "true" | "false" | "nil" | "null");
    if s.contains('\'') || s.chars().any(needs_escape) || literal || NUM_REGEX.is_match(s) {
        quote(s)
    } else {
        s.to_string()
    }
}

fn enc_float(f: f64) -> String {
    format!("{:.6}", f).trim_end_matches('0').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Utc};

    fn dump_one(value: impl Into<FieldValue>) -> String {
        TextFormatter.dump(
            &FieldMap::new().with_field("k", value),
            FormatterBudget::default(),
        )
    }

    fn abc() -> FieldMap {
        FieldMap::new()
            .with_field("a", "aaaaa")
            .with_field("b", "bbbbb")
            .with_field("c", "ccccc")
    }

    #[test]
    fn test_scalar_encoding() {
        assert_eq!(dump_one("v"), "k=v");
        assert_eq!(dump_one(r"\n"), r"k=\n");
        assert_eq!(dump_one(""), "k=");
        assert_eq!(dump_one(true), "k=true");
        assert_eq!(dump_one(false), "k=false");
        assert_eq!(dump_one(FieldValue::Null), "k=null");
        assert_eq!(dump_one(1), "k=1");
        assert_eq!(dump_one(-42i64), "k=-42");
    }

    #[test]
    fn test_literal_strings_are_quoted() {
        assert_eq!(dump_one("true"), r#"k="true""#);
        assert_eq!(dump_one("false"), r#"k="false""#);
        assert_eq!(dump_one("nil"), r#"k="nil""#);
        assert_eq!(dump_one("null"), r#"k="null""#);
    }

    #[test]
    fn test_numeric_strings_are_quoted() {
        assert_eq!(dump_one("1"), r#"k="1""#);
        assert_eq!(dump_one("1.035"), r#"k="1.035""#);
        assert_eq!(dump_one("1e-5"), r#"k="1e-5""#);
        assert_eq!(dump_one("v1"), "k=v1");
    }

    #[test]
    fn test_float_trims_trailing_zeros() {
        assert_eq!(dump_one(1.035), "k=1.035");
        assert_eq!(dump_one(1e-5), "k=0.00001");
        assert_eq!(dump_one(2.5), "k=2.5");
    }

    #[test]
    fn test_special_characters_are_quoted() {
        assert_eq!(dump_one("v v"), r#"k="v v""#);
        assert_eq!(dump_one(" "), r#"k=" ""#);
        assert_eq!(dump_one("\""), r#"k="\"""#);
        assert_eq!(dump_one("="), r#"k="=""#);
        assert_eq!(dump_one("\\"), r"k=\");
        assert_eq!(dump_one("=\\"), r#"k="=\\""#);
        assert_eq!(dump_one("\\\""), r#"k="\\\"""#);
    }

    #[test]
    fn test_single_quote_uses_inspect_form() {
        assert_eq!(dump_one("it's"), r#"k="it's""#);
    }

    #[test]
    fn test_control_characters_stay_on_one_line() {
        assert_eq!(dump_one("line1\nline2"), r#"k="line1\nline2""#);
        assert_eq!(dump_one("a\tb"), r#"k="a\tb""#);
    }

    #[test]
    fn test_timestamp() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let t = tz.with_ymd_and_hms(2019, 7, 7, 12, 21, 35).unwrap();
        assert_eq!(dump_one(t), "k=2019-07-07T12:21:35+02:00");
    }

    #[test]
    fn test_nested_containers() {
        assert_eq!(dump_one(FieldMap::new().with_field("a", 1)), "k={a=1}");
        assert_eq!(
            dump_one(FieldMap::new().with_field("a", 1).with_field("b", 2)),
            "k={a=1 b=2}"
        );
        assert_eq!(
            dump_one(FieldMap::new().with_field("a", FieldMap::new().with_field("b", 2))),
            "k={a={b=2}}"
        );
        assert_eq!(
            dump_one(vec![FieldValue::from("a"), FieldValue::from(1)]),
            "k=[a 1]"
        );
        assert_eq!(
            dump_one(vec![
                FieldValue::from("a"),
                FieldValue::from(vec![FieldValue::from("b"), FieldValue::from(2)]),
                FieldValue::from(1),
            ]),
            "k=[a [b 2] 1]"
        );
    }

    #[test]
    fn test_quoted_keys() {
        let map = FieldMap::new()
            .with_field("[params]", FieldMap::new().with_field("{app}", "myapp").with_field("env", "prod"));
        assert_eq!(
            TextFormatter.dump(&map, FormatterBudget::default()),
            r#""[params]"={"{app}"=myapp env=prod}"#
        );
    }

    #[test]
    fn test_numeric_and_literal_keys_are_quoted() {
        let map = FieldMap::new()
            .with_field("1", "v")
            .with_field("true", "w")
            .with_field("nil", FieldMap::new().with_field("-2.5", "x"))
            .with_field("v1", "y");
        assert_eq!(
            TextFormatter.dump(&map, FormatterBudget::default()),
            r#""1"=v "true"=w "nil"={"-2.5"=x} v1=y"#
        );
    }

    #[test]
    fn test_dumps_a_log_line() {
        let at = Utc.timestamp_opt(123456, 0).unwrap();
        let map = FieldMap::new()
            .with_field("app", "myapp")
            .with_field("env", "prod")
            .with_field("sql", "SELECT * FROM admins")
            .with_field("at", at);

        assert_eq!(
            TextFormatter.dump(&map, FormatterBudget::default()),
            r#"app=myapp env=prod sql="SELECT * FROM admins" at=1970-01-02T10:17:36+00:00"#
        );
    }

    #[test]
    fn test_truncates_at_byte_budgets() {
        let cases = [
            (23, "a=aaaaa b=bbbbb c=ccccc"),
            (22, "a=aaaaa b=bbbbb c=ccccc"),
            (21, "a=aaaaa b=bbbbb ..."),
            (19, "a=aaaaa b=bbbbb ..."),
            (18, "a=aaaaa ..."),
            (14, "a=aaaaa ..."),
            (11, "a=aaaaa ..."),
            (10, "..."),
            (6, "..."),
            (5, "..."),
        ];
        for (max_bytes, want) in cases {
            let got = TextFormatter.dump(&abc(), FormatterBudget::default().with_max_bytes(max_bytes));
            assert_eq!(got, want, "max_bytes = {}", max_bytes);
        }
    }

    #[test]
    fn test_unbounded_byte_budget() {
        let got = TextFormatter.dump(&abc(), FormatterBudget::default().with_max_bytes(usize::MAX));
        assert_eq!(got, "a=aaaaa b=bbbbb c=ccccc");
    }

    #[test]
    fn test_truncates_nested_depth() {
        let map = FieldMap::new().with_field(
            "a",
            FieldMap::new().with_field("b", FieldMap::new().with_field("c", "ccccc")),
        );
        let dump = |depth| TextFormatter.dump(&map, FormatterBudget::default().with_max_depth(depth));

        assert_eq!(dump(1), "a={...}");
        assert_eq!(dump(2), "a={b={...}}");
        assert_eq!(dump(3), "a={b={c=ccccc}}");

        let seq = FieldMap::new().with_field(
            "a",
            vec![FieldValue::from("b"), FieldMap::new().with_field("c", "ccccc").into()],
        );
        let dump = |depth| TextFormatter.dump(&seq, FormatterBudget::default().with_max_depth(depth));
        assert_eq!(dump(1), "a=[...]");
        assert_eq!(dump(2), "a=[b {...}]");
        assert_eq!(dump(3), "a=[b {c=ccccc}]");
    }

    #[test]
    fn test_deterministic() {
        let map = abc().with_field("n", FieldMap::new().with_field("x", vec![1, 2, 3]));
        let budget = FormatterBudget::new(40, 2);
        assert_eq!(TextFormatter.dump(&map, budget), TextFormatter.dump(&map, budget));
    }
}
