//! Schema definition types
//!
//! Serde models for the schema document format: a versioned collection of
//! [`Field`] templates keyed by [`TargetKey`], plus a free-form DB seed
//! mapping. Field templates are immutable after load; all per-call state
//! (bound values, provided flags, errors) lives in call-scoped structures
//! under [`crate::engine`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute bag consumed by plugin functions
pub type Attributes = serde_json::Map<String, Value>;

/// Dotted path identifying a field location in the flattened record.
///
/// May contain wildcard `*` segments matching any single key at that
/// position (e.g. `items.*.price`). Unique within a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetKey(pub String);

impl TargetKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TargetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetKey {
    fn from(s: &str) -> Self {
        TargetKey(s.to_string())
    }
}

impl From<String> for TargetKey {
    fn from(s: String) -> Self {
        TargetKey(s)
    }
}

/// A versioned schema: field templates plus a DB seed mapping.
///
/// Duplicate target keys in the source document resolve last-write-wins,
/// which is inherent to map deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub version: String,
    #[serde(rename = "DB")]
    pub db: Attributes,
    pub fields: IndexMap<TargetKey, Field>,
}

impl Schema {
    /// Look up a field template by target key string.
    pub fn field(&self, target: &str) -> Option<&Field> {
        self.fields.get(&TargetKey(target.to_string()))
    }
}

/// The validation/transformation unit bound to one target key.
///
/// This is a pure template: matching, validation, and error state for a
/// given record live in a call-scoped [`crate::engine::FieldBinding`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub depends_on: Vec<String>,
    pub target: String,
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    pub add_to_db: bool,
    pub description: String,
    pub validators: IndexMap<String, Constant>,
    pub operators: IndexMap<String, Constant>,
    pub l10n: Attributes,
    pub additional_information: Attributes,
    pub conditions: IndexMap<String, Condition>,
    pub tags: Vec<String>,
}

/// Configuration unit for one validator or operator on one field:
/// an attribute bag for the plugin function, an optional custom error
/// message, and locale-indexed overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Constant {
    pub attributes: Attributes,
    pub error: String,
    pub l10n: ConstantL10n,
}

/// Locale-indexed overrides for a constant's display name and error message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstantL10n {
    pub name: Attributes,
    pub error: Attributes,
}

/// Attribute bag passed to a named condition predicate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub attributes: Attributes,
}
