//! Compact JSON scalars with HTML-safe escaping.
//!
//! `<`, `>` and `&` become `\u003c`, `\u003e` and `\u0026`; the line and
//! paragraph separators become `\u2028` and `\u2029`.

use std::fmt::Write;

use serde::Serialize;

/// Appends `value` as a JSON string literal.
pub fn write_str(dst: &mut String, value: &str) {
    dst.push('"');
    for c in value.chars() {
        match c {
            '"' => dst.push_str("\\\""),
            '\\' => dst.push_str("\\\\"),
            '\n' => dst.push_str("\\n"),
            '\r' => dst.push_str("\\r"),
            '\t' => dst.push_str("\\t"),
            '<' | '>' | '&' | '\u{2028}' | '\u{2029}' => {
                let _ = write!(dst, "\\u{:04x}", c as u32);
            }
            c if (c as u32) < 0x20 => {
                let _ = write!(dst, "\\u{:04x}", c as u32);
            }
            c => dst.push(c),
        }
    }
    dst.push('"');
}

/// Appends any serializable value in compact form, escaping strings the
/// same way as [`write_str`].
pub fn write_value<T: Serialize + ?Sized>(dst: &mut String, value: &T) {
    match serde_json::to_value(value) {
        Ok(value) => write_json(dst, &value),
        Err(_) => dst.push_str("null"),
    }
}

fn write_json(dst: &mut String, value: &serde_json::Value) {
    use serde_json::Value;
    match value {
        Value::Null => dst.push_str("null"),
        Value::Bool(b) => dst.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => {
            let _ = write!(dst, "{n}");
        }
        Value::String(s) => write_str(dst, s),
        Value::Array(items) => {
            dst.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    dst.push(',');
                }
                write_json(dst, item);
            }
            dst.push(']');
        }
        Value::Object(map) => {
            dst.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    dst.push(',');
                }
                write_str(dst, key);
                dst.push(':');
                write_json(dst, item);
            }
            dst.push('}');
        }
    }
}
