use chrono::Datelike;
use serde_json::{Map, Value};

use homestead_core::InputSnapshot;

use super::settings;

/// The calendar year used when neither the document nor `--as-of-year`
/// sets one.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Turn an optional input document into a snapshot.
///
/// Settings documents go through the versioned import; a bare object is
/// laid over the defaults. No document at all yields the defaults.
/// `as_of_year` overrides whatever the document says.
pub fn resolve_snapshot(
    document: Option<Value>,
    as_of_year: Option<i32>,
) -> Result<InputSnapshot, Box<dyn std::error::Error>> {
    let year = as_of_year.unwrap_or_else(current_year);

    let mut snapshot = match document {
        Some(doc) if settings::is_settings_document(&doc) => settings::import_settings(&doc, year)?,
        Some(Value::Object(fields)) => settings::merge_over_defaults(&fields, year)?,
        Some(other) => {
            return Err(format!("Expected a JSON object for the snapshot, got {other}").into())
        }
        None => InputSnapshot::with_defaults(year),
    };

    if let Some(year) = as_of_year {
        snapshot.as_of_year = year;
    }
    Ok(snapshot)
}

/// Apply individual flag overrides (already serialized to JSON values) on
/// top of a resolved snapshot.
pub fn apply_overrides(
    snapshot: InputSnapshot,
    overrides: Map<String, Value>,
) -> Result<InputSnapshot, Box<dyn std::error::Error>> {
    if overrides.is_empty() {
        return Ok(snapshot);
    }
    let mut value = serde_json::to_value(snapshot)?;
    if let Value::Object(fields) = &mut value {
        fields.extend(overrides);
    }
    Ok(serde_json::from_value(value)?)
}
