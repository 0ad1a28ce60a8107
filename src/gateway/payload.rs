/// Coercion of untyped service responses into readings
use log::{debug, warn};
use serde_json::Value;

use crate::models::Reading;

/// Turn a fetch response body into a reading sequence
///
/// The service contract is not schema-validated, so this never fails:
/// - a non-array body yields an empty sequence
/// - array elements that are not valid readings are dropped
/// - readings with non-finite metrics are dropped
///
/// # Arguments
/// * `body` - Parsed JSON body of a successful fetch
///
/// # Returns
/// The valid readings, in service order
pub fn coerce_readings(body: Value) -> Vec<Reading> {
    let items = match body {
        Value::Array(items) => items,
        other => {
            debug!("Fetch body is not an array ({}), treating as empty", kind(&other));
            return Vec::new();
        }
    };

    let total = items.len();
    let readings: Vec<Reading> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Reading>(item) {
            Ok(reading) if reading.has_finite_metrics() => Some(reading),
            Ok(reading) => {
                warn!("Dropping reading {} with non-finite metrics", reading.id);
                None
            }
            Err(e) => {
                warn!("Dropping malformed reading at index {}: {}", index, e);
                None
            }
        })
        .collect();

    if readings.len() < total {
        warn!("Kept {} of {} fetched readings", readings.len(), total);
    }
    readings
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
