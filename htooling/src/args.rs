//! JSON argument parsing helpers for function and trait-based tools.
//!
//! ```rust
//! use htooling::{parse_json_object, required_f64, optional_string};
//!
//! let args = parse_json_object(r#"{"weight":70.5,"diet":"low-fat"}"#).expect("object should parse");
//! assert_eq!(required_f64(&args, "weight").expect("weight should be present"), 70.5);
//! assert_eq!(optional_string(&args, "diet").expect("diet is a string"), Some("low-fat".to_string()));
//! ```

use serde_json::{Map, Value};

use crate::ToolError;

pub fn parse_json_value(args_json: &str) -> Result<Value, ToolError> {
    serde_json::from_str(args_json)
        .map_err(|err| ToolError::invalid_arguments(format!("invalid JSON arguments: {err}")))
}

/// Parses model-supplied arguments. An empty string is treated as `{}`.
pub fn parse_json_object(args_json: &str) -> Result<Map<String, Value>, ToolError> {
    if args_json.trim().is_empty() {
        return Ok(Map::new());
    }

    match parse_json_value(args_json)? {
        Value::Object(map) => Ok(map),
        _ => Err(ToolError::invalid_arguments("expected JSON object arguments")),
    }
}

pub fn required_string(args: &Map<String, Value>, key: &str) -> Result<String, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| ToolError::invalid_arguments(format!("missing required string: '{key}'")))
}

/// Absent and `null` values are `None`; any other non-string value fails.
pub fn optional_string(args: &Map<String, Value>, key: &str) -> Result<Option<String>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ToolError::invalid_arguments(format!(
            "argument '{key}' must be a string"
        ))),
    }
}

pub fn required_f64(args: &Map<String, Value>, key: &str) -> Result<f64, ToolError> {
    args.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| ToolError::invalid_arguments(format!("missing required number: '{key}'")))
}

/// Accepts integral floats such as `30.0`.
pub fn required_i64(args: &Map<String, Value>, key: &str) -> Result<i64, ToolError> {
    let value = args.get(key).and_then(|value| {
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|number| number.fract() == 0.0)
                .map(|number| number as i64)
        })
    });

    value.ok_or_else(|| ToolError::invalid_arguments(format!("missing required integer: '{key}'")))
}
