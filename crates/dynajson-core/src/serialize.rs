//! Text writer for document values.
//!
//! The output looks like JSON with a space after every `:` and `,`:
//!
//! - Objects → `{"k1": v1, "k2": v2}` in ascending key order, `{}` when empty
//! - Arrays → `[v1, v2]`, `[]` when empty
//! - Strings and keys → double-quoted; only `"` and `\` are escaped (with a
//!   backslash). Control characters are written as-is, so strings holding
//!   them do not produce RFC 8259 JSON. Use `serde_json::to_string` on the
//!   value when strict output is needed.
//! - Numbers → shortest round-trip decimal form (`3`, `0.5`, `-12.25`)
//! - Booleans and null → `true`, `false`, `null`
//!
//! # Example
//! ```
//! use dynajson_core::{serialize, Value};
//! let v = Value::from(serde_json::json!({"b": [1, 2.5], "a": "say \"hi\""}));
//! assert_eq!(serialize(&v), r#"{"a": "say \"hi\"", "b": [1, 2.5]}"#);
//! ```

use crate::value::Value;

/// Serialize a value to text.
pub fn serialize(value: &Value) -> String {
    let mut out = String::new();
    serialize_into(value, &mut out);
    out
}

/// Append the serialized text of `value` to `out`.
pub fn serialize_into(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_number(*n)),
        Value::String(s) => write_quoted(s, out),
        Value::Array(arr) => {
            out.push('[');
            for (i, item) in arr.borrow().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                serialize_into(item, out);
            }
            out.push(']');
        }
        Value::Object(obj) => {
            out.push('{');
            for (i, (key, item)) in obj.borrow().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_quoted(key, out);
                out.push_str(": ");
                serialize_into(item, out);
            }
            out.push('}');
        }
    }
}

/// Rust's `Display` for `f64` already prints integral values without a
/// fraction and never uses exponents; -0 is folded into 0.
fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    n.to_string()
}

/// Quote a string, escaping only `"` and `\`.
fn write_quoted(s: &str, out: &mut String) {
    out.reserve(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_use_display_form() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1e21), "1000000000000000000000");
    }

    #[test]
    fn quoting_escapes_quote_and_backslash_only() {
        let mut out = String::new();
        write_quoted("a\"b\\c\nd", &mut out);
        assert_eq!(out, "\"a\\\"b\\\\c\nd\"");
    }
}
