//! Array shape and option-membership validators

use anyhow::{bail, Result};
use serde_json::Value;

use crate::schema::Attributes;

fn length_bound(attributes: &Attributes, name: &str) -> Result<usize> {
    match attributes.get(name).and_then(Value::as_f64) {
        Some(bound) if bound >= 0.0 => Ok(bound as usize),
        _ => bail!("attribute '{name}' must be a non-negative number"),
    }
}

pub fn array_length_max(value: &Value, attributes: &Attributes) -> Result<()> {
    let Some(array) = value.as_array() else {
        bail!("only arrays are allowed");
    };
    let max = length_bound(attributes, "max")?;
    if array.len() > max {
        bail!("array length can not be greater than {max}");
    }
    Ok(())
}

pub fn array_length_min(value: &Value, attributes: &Attributes) -> Result<()> {
    let Some(array) = value.as_array() else {
        bail!("only arrays are allowed");
    };
    let min = length_bound(attributes, "min")?;
    if array.len() < min {
        bail!("array length can not be lesser than {min}");
    }
    Ok(())
}

pub fn string_in_options(value: &Value, attributes: &Attributes) -> Result<()> {
    let Some(candidate) = value.as_str() else {
        bail!("value is not a string");
    };
    let Some(options) = attributes.get("options").and_then(Value::as_array) else {
        bail!("options are required for the validator to work");
    };
    let found = options
        .iter()
        .filter_map(Value::as_str)
        .any(|option| option == candidate);
    if found {
        Ok(())
    } else {
        bail!("string is out of the options")
    }
}

pub fn strings_exists_in_options(value: &Value, attributes: &Attributes) -> Result<()> {
    let Some(array) = value.as_array() else {
        bail!("only arrays are allowed");
    };
    for element in array {
        string_in_options(element, attributes)?;
    }
    Ok(())
}
