use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::model::game::GameRecord;

/// Parse a games response envelope (`{ "data": record | [record, ...] }`) into a list of records.
///
/// A body that is not JSON is an error. A missing, null or otherwise falsy `data` field yields
/// [`FetchError::MissingData`]. A single object is wrapped into a one-element list; a scalar
/// `data` value holds no games. Entries that are not game objects are skipped.
pub fn parse_games(body: &str) -> Result<Vec<GameRecord>, FetchError> {
    let document: Value = serde_json::from_str(body)?;
    let data = match document.get("data") {
        Some(data) if is_truthy(data) => data,
        _ => {
            warn!(body_bytes = body.len(), "Response has no usable data field");
            return Err(FetchError::MissingData);
        }
    };

    let entries: Vec<&Value> = match data {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![data],
        _ => Vec::new(),
    };
    debug!(entries = entries.len(), "Games data before filtering");

    let records = entries
        .into_iter()
        .filter_map(|entry| match GameRecord::deserialize(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "Skipping malformed game entry");
                None
            }
        })
        .collect();
    Ok(records)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
