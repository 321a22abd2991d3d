//! Call-scoped field bindings
//!
//! Field templates in a [`Schema`] are immutable; every validate/operate
//! call produces fresh [`FieldBinding`]s from the flattened record. The
//! [`SchemaState`] view bundles the schema with the current bindings so
//! condition predicates can do cross-field lookups without the engine
//! handing out mutable state.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the MIT OR Apache-2.0 license

use indexmap::IndexMap;
use serde_json::Value;

use crate::matcher::find_matching_keys;
use crate::schema::{Field, Schema, TargetKey};

/// Runtime state binding one field template to one record.
#[derive(Debug, Clone, Default)]
pub struct FieldBinding {
    /// Concrete matched path → bound value. Array elements without an
    /// explicit key are addressed by their synthetic index path.
    pub values: IndexMap<String, Value>,
    /// True iff the matcher returned at least one match.
    pub provided: bool,
}

/// Bind every schema field against the flat record.
///
/// Pure with respect to the schema definition; idempotent.
pub(crate) fn bind_fields(
    schema: &Schema,
    flat: &IndexMap<String, Value>,
    separator: &str,
) -> IndexMap<TargetKey, FieldBinding> {
    schema
        .fields
        .keys()
        .map(|target| {
            let values = find_matching_keys(flat, target.as_str(), separator);
            let provided = !values.is_empty();
            (target.clone(), FieldBinding { values, provided })
        })
        .collect()
}

/// Read-only per-call view handed to condition predicates: the owning
/// schema plus the bindings of every field for the current record.
#[derive(Debug)]
pub struct SchemaState<'a> {
    schema: &'a Schema,
    bindings: &'a IndexMap<TargetKey, FieldBinding>,
}

impl<'a> SchemaState<'a> {
    pub(crate) fn new(
        schema: &'a Schema,
        bindings: &'a IndexMap<TargetKey, FieldBinding>,
    ) -> Self {
        Self { schema, bindings }
    }

    pub fn schema(&self) -> &Schema {
        self.schema
    }

    pub fn binding(&self, target: &str) -> Option<&FieldBinding> {
        self.bindings.get(&TargetKey(target.to_string()))
    }

    /// Whether the named sibling field matched at least one value in the
    /// current record.
    pub fn is_provided(&self, target: &str) -> bool {
        self.binding(target).is_some_and(|binding| binding.provided)
    }
}

/// Project a field template plus its binding as a generic record, the shape
/// condition predicates receive.
pub(crate) fn field_record(field: &Field, binding: &FieldBinding) -> Value {
    let mut record = match serde_json::to_value(field) {
        Ok(record) => record,
        Err(err) => {
            log::warn!("failed to serialize field '{}': {err}", field.name);
            Value::Object(serde_json::Map::new())
        }
    };
    if let Value::Object(map) = &mut record {
        map.insert("provided".to_string(), Value::Bool(binding.provided));
        map.insert(
            "value".to_string(),
            Value::Object(
                binding
                    .values
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ),
        );
    }
    record
}
