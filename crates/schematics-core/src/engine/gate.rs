//! Dependency and condition gating
//!
//! Runs before a field's validators. Conditions gate applicability: any
//! predicate returning false skips the field silently. Dependencies gate
//! correctness: a declared dependency absent from the satisfied-target set
//! records a descriptive error and skips the field's validators. The
//! asymmetry is intentional.
//!
//! Dependency satisfaction is evaluated against the state as of iteration
//! start (a single pass in schema declaration order, no fixed point), so a
//! field cannot depend on a target that only becomes satisfied later in the
//! same pass.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the MIT OR Apache-2.0 license

use std::collections::HashSet;

use crate::engine::binding::{field_record, FieldBinding, SchemaState};
use crate::registry::ConditionRegistry;
use crate::report::ErrorEntry;
use crate::schema::Field;

/// Evaluate every declared condition for the field. Unregistered condition
/// names are skipped; any predicate returning false vetoes the field.
pub(crate) fn conditions_pass(
    field: &Field,
    binding: &FieldBinding,
    conditions: &ConditionRegistry,
    state: &SchemaState<'_>,
) -> bool {
    if field.conditions.is_empty() {
        return true;
    }
    let record = field_record(field, binding);
    for (name, condition) in &field.conditions {
        let Some(predicate) = conditions.get(name) else {
            continue;
        };
        if !predicate(&record, &condition.attributes, state) {
            log::debug!("condition '{name}' vetoed field '{}'", field.name);
            return false;
        }
    }
    true
}

/// Declared dependencies absent from the satisfied-target set, in
/// declaration order.
pub(crate) fn missing_dependencies(field: &Field, satisfied: &HashSet<&str>) -> Vec<String> {
    field
        .depends_on
        .iter()
        .filter(|dep| !satisfied.contains(dep.as_str()))
        .cloned()
        .collect()
}

/// Structural-style error entry naming the unmet dependencies.
pub(crate) fn dependency_entry(target: &str, missing: &[String], locale: &str) -> ErrorEntry {
    ErrorEntry::new(target, "depends-on").with_message(
        locale,
        format!("missing dependencies ({}) for {target}", missing.join(", ")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Condition;

    #[test]
    fn test_no_conditions_pass() {
        let field = Field::default();
        let schema = crate::schema::Schema::default();
        let bindings = indexmap::IndexMap::new();
        let state = SchemaState::new(&schema, &bindings);
        assert!(conditions_pass(
            &field,
            &FieldBinding::default(),
            &ConditionRegistry::new(),
            &state
        ));
    }

    #[test]
    fn test_unregistered_condition_is_skipped() {
        let mut field = Field::default();
        field
            .conditions
            .insert("NoSuchCondition".to_string(), Condition::default());
        let schema = crate::schema::Schema::default();
        let bindings = indexmap::IndexMap::new();
        let state = SchemaState::new(&schema, &bindings);
        assert!(conditions_pass(
            &field,
            &FieldBinding::default(),
            &ConditionRegistry::new(),
            &state
        ));
    }

    #[test]
    fn test_false_condition_vetoes() {
        let mut field = Field::default();
        field
            .conditions
            .insert("Never".to_string(), Condition::default());
        let mut registry = ConditionRegistry::new();
        registry.register("Never", |_, _, _| false);
        let schema = crate::schema::Schema::default();
        let bindings = indexmap::IndexMap::new();
        let state = SchemaState::new(&schema, &bindings);
        assert!(!conditions_pass(
            &field,
            &FieldBinding::default(),
            &registry,
            &state
        ));
    }

    #[test]
    fn test_missing_dependencies_reported_in_order() {
        let mut field = Field::default();
        field.depends_on = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let satisfied: HashSet<&str> = ["b"].into_iter().collect();
        assert_eq!(missing_dependencies(&field, &satisfied), vec!["a", "c"]);
    }

    #[test]
    fn test_dependency_entry_names_missing() {
        let entry = dependency_entry("b", &["a".to_string()], "en");
        assert_eq!(entry.validator, "depends-on");
        assert_eq!(entry.message_for("en"), Some("missing dependencies (a) for b"));
    }
}
