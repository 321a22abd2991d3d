//! Numeric shape and range validators
//!
//! Range checks read their bounds from the attribute bag (`min`/`max`);
//! a missing or non-numeric bound is itself a validation failure so schema
//! mistakes surface instead of silently passing.

use anyhow::{bail, Result};
use serde_json::Value;

use crate::schema::Attributes;

fn as_number(value: &Value) -> Option<f64> {
    value.as_f64()
}

fn bound(attributes: &Attributes, name: &str) -> Result<f64> {
    let Some(raw) = attributes.get(name) else {
        bail!("{name} attribute is required");
    };
    match as_number(raw) {
        Some(bound) => Ok(bound),
        None => bail!("{name} attribute should be a number"),
    }
}

pub fn is_integer(value: &Value, _attributes: &Attributes) -> Result<()> {
    if value.as_i64().is_some() || value.as_u64().is_some() {
        Ok(())
    } else {
        bail!("value is not an integer")
    }
}

pub fn is_float(value: &Value, _attributes: &Attributes) -> Result<()> {
    match value {
        Value::Number(number) if number.is_f64() => Ok(()),
        _ => bail!("value is not a floating number"),
    }
}

pub fn is_number(value: &Value, _attributes: &Attributes) -> Result<()> {
    if value.is_number() {
        Ok(())
    } else {
        bail!("value is neither integer nor floating number")
    }
}

pub fn max_allowed(value: &Value, attributes: &Attributes) -> Result<()> {
    let Some(number) = as_number(value) else {
        bail!("{value} is not a number");
    };
    let max = bound(attributes, "max")?;
    if number > max {
        bail!("{number} is greater than {max}");
    }
    Ok(())
}

pub fn min_allowed(value: &Value, attributes: &Attributes) -> Result<()> {
    let Some(number) = as_number(value) else {
        bail!("{value} is not a number");
    };
    let min = bound(attributes, "min")?;
    if number < min {
        bail!("{number} is lesser than {min}");
    }
    Ok(())
}

pub fn in_between(value: &Value, attributes: &Attributes) -> Result<()> {
    min_allowed(value, attributes)?;
    max_allowed(value, attributes)?;
    Ok(())
}

pub fn is_greater_than_zero(value: &Value, _attributes: &Attributes) -> Result<()> {
    let mut attributes = Attributes::new();
    attributes.insert("min".to_string(), Value::from(0));
    min_allowed(value, &attributes)
}

pub fn is_lesser_than_zero(value: &Value, _attributes: &Attributes) -> Result<()> {
    let mut attributes = Attributes::new();
    attributes.insert("max".to_string(), Value::from(0));
    max_allowed(value, &attributes)
}
