//! YAML emission for site data files
//!
//! The emitter writes block-style YAML with a fixed layout: two-space
//! indentation, no line wrapping, every string scalar double-quoted, and
//! mapping keys left plain when they are simple identifiers. Quoting every
//! string keeps values like `"no"`, `"07"` or `"2024-09-01"` from being
//! re-typed by the site generator's YAML parser.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

const INDENT: usize = 2;

static PLAIN_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-]*( [A-Za-z0-9_\-]+)*$").expect("Invalid plain key regex")
});

/// Words a YAML 1.1 reader would resolve to something other than a string.
const RESERVED_KEYS: &[&str] = &["true", "false", "yes", "no", "on", "off", "null", "y", "n"];

/// Render `value` as a complete YAML document.
pub fn to_yaml_string(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Array(items) if !items.is_empty() => write_sequence(&mut out, items, 0, false),
        Value::Object(map) if !map.is_empty() => write_mapping(&mut out, map, 0, false),
        scalar => {
            out.push_str(&scalar_text(scalar));
            out.push('\n');
        }
    }
    out
}

fn push_indent(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat_n(' ', indent));
}

/// Write sequence entries. With `inline` the first entry continues the
/// current line (after a parent `- `).
fn write_sequence(out: &mut String, items: &[Value], indent: usize, mut inline: bool) {
    for item in items {
        if !inline {
            push_indent(out, indent);
        }
        inline = false;
        out.push_str("- ");
        match item {
            Value::Array(nested) if !nested.is_empty() => {
                write_sequence(out, nested, indent + INDENT, true)
            }
            Value::Object(map) if !map.is_empty() => write_mapping(out, map, indent + INDENT, true),
            scalar => {
                out.push_str(&scalar_text(scalar));
                out.push('\n');
            }
        }
    }
}

fn write_mapping(out: &mut String, map: &Map<String, Value>, indent: usize, mut inline: bool) {
    for (key, value) in map {
        if !inline {
            push_indent(out, indent);
        }
        inline = false;
        out.push_str(&key_text(key));
        out.push(':');
        match value {
            Value::Array(items) if !items.is_empty() => {
                out.push('\n');
                write_sequence(out, items, indent + INDENT, false);
            }
            Value::Object(nested) if !nested.is_empty() => {
                out.push('\n');
                write_mapping(out, nested, indent + INDENT, false);
            }
            scalar => {
                out.push(' ');
                out.push_str(&scalar_text(scalar));
                out.push('\n');
            }
        }
    }
}

/// Flow text for scalars and empty containers.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(s) => quote(s),
        Value::Array(_) => "[]".to_string(),
        Value::Object(_) => "{}".to_string(),
    }
}

fn key_text(key: &str) -> String {
    let reserved = RESERVED_KEYS
        .iter()
        .any(|word| word.eq_ignore_ascii_case(key));
    if !reserved && PLAIN_KEY.is_match(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

/// Double-quote `s` using YAML escape sequences.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if (c as u32) < 0x20 || ('\u{7f}'..='\u{9f}').contains(&c) => {
                out.push_str(&format!("\\x{:02X}", c as u32));
            }
            '\u{2028}' | '\u{2029}' | '\u{feff}' => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
