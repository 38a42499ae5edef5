//! Canonicalization of fetched values
//!
//! Spreadsheet exports are noisy: cells carry stray whitespace, blank cells
//! come through as `null` or `""`, and checkbox-like columns arrive as the
//! strings `"TRUE"`, `"yes"` and so on. Normalization cleans the fields of
//! every record before validation and persistence.

use serde_json::{Map, Value};

/// Options controlling normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    /// Turn boolean-like field strings into booleans.
    pub coerce_booleans: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            coerce_booleans: true,
        }
    }
}

impl Normalizer {
    pub fn new(coerce_booleans: bool) -> Self {
        Self { coerce_booleans }
    }

    /// Normalize a value.
    ///
    /// Arrays are normalized element by element and mappings field by field.
    /// Any other value at this level is returned unchanged; the field rules
    /// only apply to values held in a mapping.
    pub fn normalize(&self, value: &Value) -> Value {
        match value {
            Value::Array(items) => Value::Array(items.iter().map(|v| self.normalize(v)).collect()),
            Value::Object(map) => Value::Object(self.normalize_map(map)),
            other => other.clone(),
        }
    }

    fn normalize_map(&self, map: &Map<String, Value>) -> Map<String, Value> {
        map.iter()
            .map(|(key, value)| (key.clone(), self.normalize_field(value)))
            .collect()
    }

    fn normalize_field(&self, value: &Value) -> Value {
        match value {
            Value::Null => Value::String(String::new()),
            Value::String(s) if s.is_empty() => Value::String(String::new()),
            Value::String(s) => {
                if self.coerce_booleans
                    && let Some(flag) = parse_boolean(s)
                {
                    return Value::Bool(flag);
                }
                Value::String(s.trim().to_string())
            }
            Value::Array(_) | Value::Object(_) => self.normalize(value),
            other => other.clone(),
        }
    }
}

/// Parse the boolean vocabulary used in sheets: `true`/`yes` and
/// `false`/`no`, case-insensitive, surrounding whitespace ignored.
pub fn parse_boolean(raw: &str) -> Option<bool> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") || trimmed.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

/// Normalize with default options (boolean coercion on).
pub fn normalize(value: &Value) -> Value {
    Normalizer::default().normalize(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_board_record_coerces_elected_flag() {
        let input = json!([{"elected": "true", "name": "  Jane  "}]);
        assert_eq!(normalize(&input), json!([{"elected": true, "name": "Jane"}]));
    }

    #[test]
    fn test_trim_only_when_coercion_disabled() {
        let input = json!([{"elected": " TRUE ", "name": "  Jane  "}]);
        let normalized = Normalizer::new(false).normalize(&input);
        assert_eq!(normalized, json!([{"elected": "TRUE", "name": "Jane"}]));
    }

    #[test]
    fn test_null_and_empty_become_empty_string() {
        let input = json!({"a": null, "b": "", "c": "   "});
        assert_eq!(normalize(&input), json!({"a": "", "b": "", "c": ""}));
    }

    #[test]
    fn test_numbers_and_booleans_pass_through() {
        let input = json!({"order": 3, "ratio": 0.5, "active": false});
        assert_eq!(normalize(&input), input);
    }

    #[test]
    fn test_nested_containers_recurse() {
        let input = json!({"contact": {"email": " a@b.org ", "public": "No"}, "tags": [{"x": null}]});
        assert_eq!(
            normalize(&input),
            json!({"contact": {"email": "a@b.org", "public": false}, "tags": [{"x": ""}]})
        );
    }

    #[test]
    fn test_top_level_scalars_unchanged() {
        assert_eq!(normalize(&json!("  yes  ")), json!("  yes  "));
        assert_eq!(normalize(&Value::Null), Value::Null);
        assert_eq!(normalize(&json!(["  raw  "])), json!(["  raw  "]));
    }

    #[test]
    fn test_key_order_preserved() {
        let input = json!({"zeta": "1", "alpha": "2"});
        let keys: Vec<_> = normalize(&input).as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_parse_boolean_vocabulary() {
        assert_eq!(parse_boolean("YES"), Some(true));
        assert_eq!(parse_boolean(" no "), Some(false));
        assert_eq!(parse_boolean("y"), None);
        assert_eq!(parse_boolean("1"), None);
    }
}
