pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` object of a computation envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value.get("result").unwrap_or(value)
}

/// Scalar leaves of `map` keyed by dotted path; arrays are left out.
///
/// `{"net_equity": {"base": "1"}}` becomes `net_equity.base = 1`.
pub(crate) fn flatten_scalars(map: &Map<String, Value>) -> Vec<(String, String)> {
    let mut out = Vec::new();
    collect_scalars("", map, &mut out);
    out
}

fn collect_scalars(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => collect_scalars(&path, inner, out),
            Value::Array(_) => {}
            other => out.push((path, cell(other))),
        }
    }
}

/// Named arrays of row objects inside `map` (schedules, yearly series).
pub(crate) fn row_series(map: &Map<String, Value>) -> Vec<(&str, &[Value])> {
    map.iter()
        .filter_map(|(key, val)| match val {
            Value::Array(rows) if rows.first().is_some_and(Value::is_object) => {
                Some((key.as_str(), rows.as_slice()))
            }
            _ => None,
        })
        .collect()
}

/// Plain-text rendering of a JSON leaf.
pub(crate) fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nests_with_dots_and_skips_arrays() {
        let value = json!({
            "winner": "B",
            "strategy_a": { "property_value_at_end": { "base": "16288946" } },
            "mortgage_schedule": [{ "month": 1 }]
        });
        let flat = flatten_scalars(value.as_object().unwrap());
        assert_eq!(
            flat,
            vec![
                ("strategy_a.property_value_at_end.base".to_string(), "16288946".to_string()),
                ("winner".to_string(), "B".to_string()),
            ]
        );
    }

    #[test]
    fn test_row_series_finds_object_arrays_only() {
        let value = json!({
            "yearly": ["1", "2"],
            "schedule": [{ "month": 1 }, { "month": 2 }],
            "empty": []
        });
        let series = row_series(value.as_object().unwrap());
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].0, "schedule");
        assert_eq!(series[0].1.len(), 2);
    }
}
