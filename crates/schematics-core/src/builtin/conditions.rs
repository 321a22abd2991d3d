//! Built-in condition predicates

use serde_json::Value;

use crate::engine::SchemaState;
use crate::schema::Attributes;

/// True when the sibling field named by the `shouldBeProvided` attribute
/// matched at least one value in the current record. A missing or
/// non-string attribute makes the condition false, which gates the owning
/// field off rather than silently activating it.
pub fn field_is_provided(_field: &Value, attributes: &Attributes, state: &SchemaState<'_>) -> bool {
    match attributes.get("shouldBeProvided").and_then(Value::as_str) {
        Some(target) => state.is_provided(target),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::state_fixture;
    use serde_json::json;

    #[test]
    fn test_follows_sibling_presence() {
        let fixture = state_fixture(&["name", "nickname"], &json!({ "name": "ada" }));
        let state = fixture.state();
        let mut attrs = Attributes::new();
        attrs.insert("shouldBeProvided".to_string(), json!("name"));
        assert!(field_is_provided(&json!({}), &attrs, &state));

        attrs.insert("shouldBeProvided".to_string(), json!("nickname"));
        assert!(!field_is_provided(&json!({}), &attrs, &state));
    }

    #[test]
    fn test_missing_attribute_is_false() {
        let fixture = state_fixture(&["name"], &json!({ "name": "ada" }));
        let state = fixture.state();
        assert!(!field_is_provided(&json!({}), &Attributes::new(), &state));
    }
}
