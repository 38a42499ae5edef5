//! Shape validation of normalized data

use serde_json::Value;

use crate::{Error, Result};

/// Check that `data` is a table of records: an array of mappings.
///
/// Returns the number of records. An empty table is accepted with a warning,
/// since e.g. an events sheet is legitimately empty between terms.
pub fn validate(source_name: &str, data: &Value) -> Result<usize> {
    let Value::Array(records) = data else {
        return Err(Error::shape(
            source_name,
            format!("expected an array of records, got {}", type_name(data)),
        ));
    };

    if records.is_empty() {
        tracing::warn!(source = source_name, "Source returned no records");
        return Ok(0);
    }

    let invalid = records.iter().filter(|record| !record.is_object()).count();
    if invalid > 0 {
        return Err(Error::shape(
            source_name,
            format!(
                "{} of {} records are not objects",
                invalid,
                records.len()
            ),
        ));
    }

    Ok(records.len())
}

/// Number of records in `data` when validation is skipped.
pub fn record_count(data: &Value) -> usize {
    match data {
        Value::Array(records) => records.len(),
        _ => 1,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
