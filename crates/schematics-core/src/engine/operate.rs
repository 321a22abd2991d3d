//! Sequential operator pipeline
//!
//! Transformation counterpart of validation: for every schema field, each
//! matched value is pushed through the field's operators in declared order.
//! An operator returning `None` leaves the value unchanged; an operator
//! name missing from the registry aborts the whole operate call under the
//! registry's fail-unknown policy, stricter than validation's skip policy,
//! and deliberately so.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the MIT OR Apache-2.0 license

use serde_json::Value;

use crate::error::{Error, Result};
use crate::flat::{deflate, flatten};
use crate::matcher::find_matching_keys;
use crate::registry::{OperatorRegistry, UnknownPolicy};
use crate::schema::{Field, Schema};

/// Apply the field's operators to one value, in declared order.
pub(crate) fn operate_on_value(
    field: &Field,
    value: &Value,
    operators: &OperatorRegistry,
) -> Result<Value> {
    let mut current = value.clone();
    for (name, constant) in &field.operators {
        let Some(operator) = operators.get(name) else {
            match operators.policy() {
                UnknownPolicy::Skip => continue,
                UnknownPolicy::Fail => {
                    return Err(Error::UnknownOperator { name: name.clone() });
                }
            }
        };
        if let Some(next) = operator(&current, &constant.attributes) {
            current = next;
        }
    }
    Ok(current)
}

/// Flatten the record, transform every matched value, and deflate back.
///
/// A collapsed nested match replaces the flat keys it was assembled from:
/// the transformed value is re-flattened under the base key so the final
/// deflate sees a consistent mapping.
pub(crate) fn operate_on_object(
    schema: &Schema,
    data: &Value,
    operators: &OperatorRegistry,
    separator: &str,
) -> Result<Value> {
    let mut flat = flatten(data, separator);
    for (target, field) in &schema.fields {
        if field.operators.is_empty() {
            continue;
        }
        let matches = find_matching_keys(&flat, target.as_str(), separator);
        for (key, matched) in matches {
            let transformed = operate_on_value(field, &matched, operators)?;
            let prefix = format!("{key}{separator}");
            flat.retain(|existing, _| existing != &key && !existing.starts_with(&prefix));
            if transformed.is_object() || transformed.is_array() {
                for (suffix, leaf) in flatten(&transformed, separator) {
                    let path = if suffix.is_empty() {
                        key.clone()
                    } else {
                        format!("{key}{separator}{suffix}")
                    };
                    flat.insert(path, leaf);
                }
            } else {
                flat.insert(key, transformed);
            }
        }
    }
    Ok(deflate(&flat, separator))
}
