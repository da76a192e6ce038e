//! Versioned settings documents: `{ version, exported_at, inputs }`.
//!
//! Imports merge `inputs` over the default snapshot so files written by
//! older versions (with fewer fields) keep loading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use homestead_core::InputSnapshot;

/// Current settings document version.
pub const SETTINGS_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedSettings {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub inputs: InputSnapshot,
}

pub fn export_settings(snapshot: &InputSnapshot, exported_at: DateTime<Utc>) -> ExportedSettings {
    ExportedSettings {
        version: SETTINGS_VERSION,
        exported_at,
        inputs: snapshot.clone(),
    }
}

/// True when `value` looks like a settings document rather than a bare
/// snapshot.
pub fn is_settings_document(value: &Value) -> bool {
    value.get("inputs").is_some() && value.get("version").is_some()
}

/// Read a settings document, filling missing inputs from the defaults for
/// `as_of_year`.
pub fn import_settings(
    document: &Value,
    as_of_year: i32,
) -> Result<InputSnapshot, Box<dyn std::error::Error>> {
    let version = match document.get("version") {
        Some(v) => v
            .as_u64()
            .ok_or("Invalid settings file: version must be a positive integer")?,
        None => return Err("Invalid settings file: missing version".into()),
    };
    if version > SETTINGS_VERSION as u64 {
        return Err(format!(
            "Settings version {version} is newer than supported version {SETTINGS_VERSION}"
        )
        .into());
    }

    let inputs = document
        .get("inputs")
        .and_then(Value::as_object)
        .ok_or("Invalid settings file: missing inputs object")?;

    let snapshot = merge_over_defaults(inputs, as_of_year)?;
    if snapshot.property_price <= rust_decimal::Decimal::ZERO {
        return Err("Invalid settings file: property price must be positive".into());
    }
    Ok(snapshot)
}

/// Overlay `fields` on the default snapshot for `as_of_year`.
pub fn merge_over_defaults(
    fields: &Map<String, Value>,
    as_of_year: i32,
) -> Result<InputSnapshot, Box<dyn std::error::Error>> {
    let mut merged = serde_json::to_value(InputSnapshot::with_defaults(as_of_year))?;
    if let Value::Object(base) = &mut merged {
        for (key, value) in fields {
            base.insert(key.clone(), value.clone());
        }
    }
    Ok(serde_json::from_value(merged)?)
}
