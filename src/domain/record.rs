// src/domain/record.rs
//
// Wire representation of a row: a JSON object keyed by column name.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{DomainError, DomainResult};

/// A single row as exchanged with the persistence layer.
pub type Record = Map<String, Value>;

/// Column holding the opaque primary key.
pub const ID_COLUMN: &str = "id";

/// Serialize a typed entity into a record.
pub fn to_record<T: Serialize>(entity: &T) -> DomainResult<Record> {
    match serde_json::to_value(entity) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DomainError::InvariantViolation(format!(
            "Entity serialized to {} instead of an object",
            type_name(&other)
        ))),
        Err(e) => Err(DomainError::InvariantViolation(e.to_string())),
    }
}

/// Deserialize a record returned by the backend into a typed entity.
pub fn from_record<T: DeserializeOwned>(record: Record) -> DomainResult<T> {
    serde_json::from_value(Value::Object(record))
        .map_err(|e| DomainError::InvariantViolation(format!("Malformed record: {}", e)))
}

/// Read a column as a sequence number.
///
/// Missing, null, negative and non-numeric values count as 0. Numeric strings
/// are accepted since some rows were written by hand through the dashboard.
pub fn sequence_number(value: Option<&Value>) -> i64 {
    let n = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.floor() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    n.max(0)
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
