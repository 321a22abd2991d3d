//! The validation/transformation engine
//!
//! [`Schematics`] ties a loaded [`Schema`] to its plugin registries and
//! exposes the two entry points: [`Schematics::validate`] (concurrent
//! validation with error aggregation) and [`Schematics::operate`]
//! (sequential value transformation). Both accept a single object or an
//! array of objects; anything else is a whole-data structural error.
//!
//! The engine is organized into focused modules:
//! - `binding`: call-scoped field resolution against the flat record
//! - `gate`: condition and dependency gating
//! - `validate`: the per-value concurrent validation core
//! - `operate`: the sequential operator pipeline
//! - `db`: the derived DB projection handed to validators

pub mod binding;
pub mod db;
pub mod gate;
pub mod operate;
pub mod validate;

#[cfg(test)]
mod tests;


pub use binding::{FieldBinding, SchemaState};
pub use validate::DB_ATTRIBUTE;

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::flat::flatten;
use crate::registry::{ConditionRegistry, OperatorRegistry, ValidatorRegistry};
use crate::report::ErrorSet;
use crate::schema::Schema;

/// Default path separator for flattened records.
pub const DEFAULT_SEPARATOR: &str = ".";
/// Default locale for messages without an explicit locale.
pub const DEFAULT_LOCALE: &str = "en";
/// Default flat key consulted for array element identifiers.
pub const DEFAULT_ARRAY_ID_KEY: &str = "id";

/// A loaded schema plus the registries and settings needed to run it.
///
/// Construction pre-registers the built-in plugin set; callers may register
/// additional functions before the first validate/operate call. Registries
/// are treated as immutable once a call is in flight.
#[derive(Debug)]
pub struct Schematics {
    pub schema: Schema,
    pub validators: ValidatorRegistry,
    pub operators: OperatorRegistry,
    pub conditions: ConditionRegistry,
    /// Path separator used for flattening and matching.
    pub separator: String,
    /// Flat key consulted for an explicit array element identifier.
    pub array_id_key: String,
    /// Locale under which default (non-localized) messages are filed.
    pub locale: String,
}

impl Schematics {
    /// Wrap an already-parsed schema with built-in registries and defaults.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            validators: ValidatorRegistry::with_builtins(),
            operators: OperatorRegistry::with_builtins(),
            conditions: ConditionRegistry::with_builtins(),
            separator: DEFAULT_SEPARATOR.to_string(),
            array_id_key: DEFAULT_ARRAY_ID_KEY.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Load a schema from an in-memory JSON value.
    pub fn load_from_value(value: &Value) -> Result<Self> {
        let schema: Schema =
            serde_json::from_value(value.clone()).map_err(|err| Error::SchemaLoad {
                message: "schema document does not match the expected format".to_string(),
                source: Some(err.into()),
            })?;
        Ok(Self::new(schema))
    }

    /// Load a schema from a JSON file on disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|err| Error::Io {
            message: format!("failed to read schema file '{}'", path.display()),
            source: err,
        })?;
        let schema: Schema = serde_json::from_str(&content).map_err(|err| Error::SchemaLoad {
            message: format!("failed to parse schema file '{}'", path.display()),
            source: Some(err.into()),
        })?;
        Ok(Self::new(schema))
    }

    /// Adopt field templates from another schema for targets this schema
    /// does not define.
    pub fn merge_fields(&mut self, other: &Schema) {
        for (target, field) in &other.fields {
            if !self.schema.fields.contains_key(target) {
                self.schema.fields.insert(target.clone(), field.clone());
            }
        }
    }

    /// Validate a record (object or array of objects) against the schema.
    ///
    /// Returns `None` when no field produced an error.
    pub async fn validate(&self, data: &Value) -> Option<ErrorSet> {
        match data {
            Value::Object(_) => self.validate_object(data).await,
            Value::Array(elements) => {
                if elements.iter().any(|element| !element.is_object()) {
                    return Some(ErrorSet::whole_data(
                        "validate-object",
                        "invalid format provided for the data, expected an object or an array of objects",
                        self.locale.as_str(),
                    ));
                }
                let mut errors = ErrorSet::new();
                for (index, element) in elements.iter().enumerate() {
                    let id = self.element_id(element, index);
                    if let Some(element_errors) = self.validate_object(element).await {
                        errors.merge_under(id, element_errors);
                    }
                }
                if errors.has_errors() {
                    Some(errors)
                } else {
                    None
                }
            }
            _ => Some(ErrorSet::whole_data(
                "validate-object",
                "invalid format provided for the data, expected an object or an array of objects",
                self.locale.as_str(),
            )),
        }
    }

    /// Validate a single object against the schema.
    pub async fn validate_object(&self, data: &Value) -> Option<ErrorSet> {
        let flat = flatten(data, &self.separator);
        let bindings = binding::bind_fields(&self.schema, &flat, &self.separator);
        let db = Arc::new(db::project_db(&self.schema, &flat, &self.separator));

        // dependency satisfaction is fixed at iteration start: single pass,
        // schema declaration order, no forward references
        let satisfied: HashSet<&str> = bindings
            .iter()
            .filter(|(_, binding)| binding.provided)
            .map(|(target, _)| target.as_str())
            .collect();

        let mut errors = ErrorSet::new();
        for (target, field) in &self.schema.fields {
            let Some(field_binding) = bindings.get(target) else {
                continue;
            };
            let state = SchemaState::new(&self.schema, &bindings);

            if !gate::conditions_pass(field, field_binding, &self.conditions, &state) {
                continue;
            }

            let missing = gate::missing_dependencies(field, &satisfied);
            if !missing.is_empty() {
                errors.add(
                    target.as_str(),
                    gate::dependency_entry(target.as_str(), &missing, &self.locale),
                );
                continue;
            }

            if field.required && !field_binding.provided {
                errors.add(
                    target.as_str(),
                    validate::required_entry(target.as_str(), field, &self.locale),
                );
            }

            let entries =
                validate::validate_field(field, field_binding, &self.validators, &db, &self.locale)
                    .await;
            for entry in entries {
                errors.add(target.as_str(), entry);
            }
        }

        if errors.has_errors() {
            Some(errors)
        } else {
            None
        }
    }

    /// Transform a record (object or array of objects) through the schema's
    /// operator pipelines.
    ///
    /// Per-value operator misses abort with a single whole-data error; the
    /// transformed record is returned otherwise.
    pub fn operate(&self, data: &Value) -> std::result::Result<Value, ErrorSet> {
        match data {
            Value::Object(_) => self.operate_inner(data),
            Value::Array(elements) => {
                if elements.iter().any(|element| !element.is_object()) {
                    return Err(ErrorSet::whole_data(
                        "operate-on-schema",
                        "invalid format provided for the data, expected an object or an array of objects",
                        self.locale.as_str(),
                    ));
                }
                let mut out = Vec::with_capacity(elements.len());
                for element in elements {
                    out.push(self.operate_inner(element)?);
                }
                Ok(Value::Array(out))
            }
            _ => Err(ErrorSet::whole_data(
                "operate-on-schema",
                "invalid format provided for the data, expected an object or an array of objects",
                self.locale.as_str(),
            )),
        }
    }

    fn operate_inner(&self, data: &Value) -> std::result::Result<Value, ErrorSet> {
        operate::operate_on_object(&self.schema, data, &self.operators, &self.separator)
            .map_err(|err| ErrorSet::whole_data("operate-on-schema", err.to_string(), self.locale.as_str()))
    }

    /// Identifier for an array element: the configured id key's flat value
    /// when it is a string or number, else a positional `row-{i}` label.
    fn element_id(&self, element: &Value, index: usize) -> String {
        let flat = flatten(element, &self.separator);
        match flat.get(&self.array_id_key) {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => format!("row-{index}"),
        }
    }

    /// Synchronous wrapper around [`Schematics::validate`] that drives an
    /// internal runtime.
    #[cfg(feature = "blocking")]
    pub fn validate_blocking(&self, data: &Value) -> Result<Option<ErrorSet>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|err| Error::Runtime {
                message: "failed to build runtime for blocking validate".to_string(),
                source: err,
            })?;
        Ok(runtime.block_on(self.validate(data)))
    }
}
