//! JSON helpers behind the advisory validation and output formatting.
//!
//! Parse failures never escape these functions: they become [`JsonCheck::Invalid`] or the
//! documented fallback value. Authoritative rejection happens on the server.

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::{Number, Serializer, Value};
use std::borrow::Cow;
use std::io;

/// Largest integer an IEEE double represents exactly (2^53).
const MAX_SAFE_INTEGER: u64 = 1 << 53;

/// Outcome of parsing a piece of text as JSON.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonCheck {
    Valid(Value),
    Invalid,
}

impl JsonCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, JsonCheck::Valid(_))
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            JsonCheck::Valid(v) => Some(v),
            JsonCheck::Invalid => None,
        }
    }
}

/// Parse without a nesting limit; deep documents grow the stack on demand.
fn parse(text: &str) -> serde_json::Result<Value> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

pub fn check_json(text: &str) -> JsonCheck {
    match parse(text) {
        Ok(value) => JsonCheck::Valid(value),
        Err(err) => {
            log::trace!(target: "tools.json", "not JSON: {err}");
            JsonCheck::Invalid
        }
    }
}

pub fn is_valid_json(text: &str) -> bool {
    check_json(text).is_valid()
}

/// Pretty-print with two-space indentation, keeping object key order.
///
/// Numbers print the way a browser's `JSON.stringify` prints them: integers beyond 2^53
/// are rounded to the nearest double, integral doubles below 1e21 print without a fraction
/// or exponent (`1.0` → `1`, `1e20` → `100000000000000000000`), and exponents carry a sign
/// (`1e+21`). Text that does not parse is returned unchanged.
pub fn format_json(text: &str) -> Cow<'_, str> {
    let JsonCheck::Valid(mut value) = check_json(text) else {
        return Cow::Borrowed(text);
    };
    round_unsafe_integers(&mut value);
    match pretty_print(&value) {
        Ok(pretty) => Cow::Owned(pretty),
        Err(err) => {
            log::debug!(target: "tools.json", "pretty-print failed: {err}");
            Cow::Borrowed(text)
        }
    }
}

fn pretty_print(value: &Value) -> serde_json::Result<String> {
    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, BrowserFormatter::default());
    value.serialize(serde_stacker::Serializer::new(&mut ser))?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn round_unsafe_integers(value: &mut Value) {
    let mut stack = vec![value];
    while let Some(v) = stack.pop() {
        match v {
            Value::Number(n) => {
                let unsafe_int = n.as_u64().is_some_and(|u| u > MAX_SAFE_INTEGER)
                    || n.as_i64().is_some_and(|i| i.unsigned_abs() > MAX_SAFE_INTEGER);
                if unsafe_int
                    && let Some(rounded) = n.as_f64().and_then(Number::from_f64)
                {
                    *n = rounded;
                }
            }
            Value::Array(items) => stack.extend(items.iter_mut()),
            Value::Object(map) => stack.extend(map.values_mut()),
            Value::Null | Value::Bool(_) | Value::String(_) => {}
        }
    }
}

/// ECMAScript `Number::toString` for finite values.
fn browser_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&value.abs()) {
        return value.to_string();
    }
    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

/// [`PrettyFormatter`] with browser number rendering.
#[derive(Default)]
struct BrowserFormatter<'a>(PrettyFormatter<'a>);

impl Formatter for BrowserFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(browser_number(value).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_two_space_indent() {
        assert_eq!(format_json(r#"{"a":1}"#), "{\n  \"a\": 1\n}");
        assert_eq!(
            format_json(r#" {"list":[1,{"b":null}],"e":{}} "#),
            "{\n  \"list\": [\n    1,\n    {\n      \"b\": null\n    }\n  ],\n  \"e\": {}\n}"
        );
    }

    #[test]
    fn keeps_key_order() {
        assert_eq!(
            format_json(r#"{"z":1,"a":2,"m":3}"#),
            "{\n  \"z\": 1,\n  \"a\": 2,\n  \"m\": 3\n}"
        );
    }

    #[test]
    fn integral_floats_print_like_a_browser() {
        assert_eq!(format_json("[1.0, -0.0, 2.5, 1e2]"), "[\n  1,\n  0,\n  2.5,\n  100\n]");
    }

    #[test]
    fn large_and_tiny_numbers_print_like_a_browser() {
        assert_eq!(
            format_json("[1e20, 9007199254740993, -9007199254740993, 1e21, 1.5e300]"),
            "[\n  100000000000000000000,\n  9007199254740992,\n  -9007199254740992,\n  1e+21,\n  1.5e+300\n]"
        );
        assert_eq!(
            format_json("[0.000001, 1e-7, 2.5e-8, 123.456]"),
            "[\n  0.000001,\n  1e-7,\n  2.5e-8,\n  123.456\n]"
        );
        assert_eq!(format_json("9007199254740992"), "9007199254740992");
    }

    #[test]
    fn deep_nesting_is_accepted() {
        let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
        assert!(is_valid_json(&deep));
        let pretty = format_json(&deep);
        assert!(matches!(pretty, Cow::Owned(_)));
        assert_eq!(pretty.lines().count(), 399);
        assert!(pretty.ends_with("\n]"));
        assert!(!is_valid_json(&deep[1..]));
    }

    #[test]
    fn unparsable_text_is_returned_unchanged() {
        assert_eq!(format_json("not json"), "not json");
        assert!(matches!(format_json("{"), Cow::Borrowed("{")));
        assert_eq!(format_json(""), "");
    }

    #[test]
    fn validity_predicate() {
        assert!(is_valid_json("[1,2,3]"));
        assert!(is_valid_json("  \"s\"  "));
        assert!(is_valid_json("null"));
        assert!(!is_valid_json("{"));
        assert!(!is_valid_json(""));
        assert!(!is_valid_json("{'a': 1}"));
        assert!(!is_valid_json("[1,]"));
    }

    #[test]
    fn check_exposes_parsed_value() {
        let check = check_json(r#"{"k": [true]}"#);
        assert!(check.is_valid());
        assert_eq!(
            check.into_value(),
            Some(serde_json::json!({"k": [true]}))
        );
        assert_eq!(check_json("nope"), JsonCheck::Invalid);
        assert_eq!(check_json("nope").into_value(), None);
    }
}
