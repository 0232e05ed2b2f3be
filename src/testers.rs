//! Custom testers.

use serde_json::Value;
use tera::helpers::tests::{extract_string, number_args_allowed, value_defined};
use tera::Result;

/// Returns true if `value` is an instance of the named type, compared
/// case-insensitively.
///
/// The type of a value is its JSON type name (`null`, `bool`, `number`,
/// `string`, `array`, `object`). Objects carrying a string `type` field, as
/// produced by serde's internally tagged serialization, additionally match
/// that field, so `{% if event is instance_of("PageView") %}` works for
/// tagged structs.
pub fn instance_of(value: Option<&Value>, params: &[Value]) -> Result<bool> {
    number_args_allowed("instance_of", 1, params.len())?;
    value_defined("instance_of", value)?;

    let name = extract_string("instance_of", "with a parameter", params.first())?;
    let value = value.unwrap();

    if let Value::Object(map) = value {
        if let Some(tag) = map.get("type").and_then(Value::as_str) {
            if tag.eq_ignore_ascii_case(name) {
                return Ok(true);
            }
        }
    }

    let type_name = match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    Ok(type_name.eq_ignore_ascii_case(name))
}
