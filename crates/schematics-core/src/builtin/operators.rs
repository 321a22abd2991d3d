//! Built-in data operators
//!
//! Operators return `Some(new_value)` to replace the bound value or `None`
//! to leave it untouched; a value of the wrong shape is left untouched
//! rather than erroring, since the validate pass is where shape problems
//! get reported.

use serde_json::{Map, Value};

use crate::schema::Attributes;

/// Re-key an array of objects into a single object. The `unique_string_key`
/// attribute names the member whose string value becomes the key; elements
/// without that member are dropped.
pub fn array_of_obj_to_obj(value: &Value, attributes: &Attributes) -> Option<Value> {
    let array = value.as_array()?;
    let key_name = attributes.get("unique_string_key")?.as_str()?;

    let mut object = Map::new();
    for element in array {
        let Some(member) = element.get(key_name).and_then(Value::as_str) else {
            continue;
        };
        object.insert(member.to_string(), element.clone());
    }
    Some(Value::Object(object))
}

pub fn to_upper_case(value: &Value, _attributes: &Attributes) -> Option<Value> {
    value.as_str().map(|s| Value::String(s.to_uppercase()))
}

pub fn to_lower_case(value: &Value, _attributes: &Attributes) -> Option<Value> {
    value.as_str().map(|s| Value::String(s.to_lowercase()))
}

pub fn trim_spaces(value: &Value, _attributes: &Attributes) -> Option<Value> {
    value.as_str().map(|s| Value::String(s.trim().to_string()))
}
