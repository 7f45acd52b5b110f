//! Projections of the inventory into consumer JSON schemas.
//!
//! Output is 4-space indented with object keys in sorted order, so two
//! runs over the same store are byte-identical.

pub mod inventory;
pub mod prometheus;
pub mod records;

use admiral_core::errors::{ProjectionError, VariablesOwner};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

const INDENT: &[u8] = b"    ";

/// Serialize `value` as 4-space indented JSON.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, ProjectionError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value
        .serialize(&mut serializer)
        .map_err(|e| ProjectionError::Serialization {
            message: e.to_string(),
        })?;
    Ok(buf)
}

/// Parse a stored variables blob. Anything but a JSON object is malformed.
pub fn parse_variables(
    owner: VariablesOwner,
    name: &str,
    blob: &str,
) -> Result<Map<String, Value>, ProjectionError> {
    let malformed = |message: String| ProjectionError::MalformedVariables {
        owner,
        name: name.to_string(),
        message,
    };
    match serde_json::from_str::<Value>(blob).map_err(|e| malformed(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(malformed(format!("expected a JSON object, found {}", kind(&other)))),
    }
}

/// Validate a variables blob and return it in compact canonical form.
pub fn normalize_variables(
    owner: VariablesOwner,
    name: &str,
    blob: &str,
) -> Result<String, ProjectionError> {
    let map = parse_variables(owner, name, blob)?;
    Ok(Value::Object(map).to_string())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
