//! The concurrent validation engine
//!
//! For one field, every bound value is validated as an independent blocking
//! task in a [`JoinSet`]; tasks run in parallel and are combined only after
//! all of them finish. Within one task, the field's validators run in
//! declared order and the first failure wins; subsequent validators for
//! that value are not consulted (first-failure-per-value, not per-field).
//!
//! Tasks receive owned snapshots of everything they touch (value, validator
//! constants, function table, DB projection); the collected entries are
//! folded in by the single awaiting caller, so no shared mutable state
//! exists. A panicking validator is caught inside its own task and reported
//! as an error entry for that value; sibling tasks are unaffected.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the MIT OR Apache-2.0 license

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tokio::task::JoinSet;

use crate::engine::binding::FieldBinding;
use crate::registry::{UnknownPolicy, ValidatorRegistry, ValidatorTable};
use crate::report::ErrorEntry;
use crate::schema::{Attributes, Constant, Field};

/// Reserved attribute key under which the DB projection is injected into
/// every validator's attribute bag.
pub const DB_ATTRIBUTE: &str = "DB";

/// Validator names treated as structural markers and never dispatched.
const EXCLUDED_VALIDATORS: &[&str] = &["TYPE", "REQUIRED"];

fn is_excluded(name: &str) -> bool {
    EXCLUDED_VALIDATORS
        .iter()
        .any(|excluded| excluded.eq_ignore_ascii_case(name))
}

/// The dedicated synchronous required-but-absent error, emitted before any
/// validator runs.
pub(crate) fn required_entry(target: &str, field: &Field, locale: &str) -> ErrorEntry {
    let mut entry = ErrorEntry::new(target, "is-required")
        .with_message(locale, "please provide the value for this required field");
    for (loc, name) in &field.l10n {
        if let Some(name) = name.as_str() {
            entry.add_display_name(loc.clone(), name);
        }
    }
    entry
}

/// Concurrently validate every bound value of one field and return the
/// collected error entries after fan-in.
pub(crate) async fn validate_field(
    field: &Field,
    binding: &FieldBinding,
    validators: &ValidatorRegistry,
    db: &Arc<Attributes>,
    locale: &str,
) -> Vec<ErrorEntry> {
    if field.validators.is_empty() || binding.values.is_empty() {
        return Vec::new();
    }

    let table = Arc::new(validators.snapshot());
    let constants = Arc::new(field.validators.clone());
    let locale: Arc<str> = Arc::from(locale);

    let mut tasks = JoinSet::new();
    for (path, value) in &binding.values {
        let path = path.clone();
        let value = value.clone();
        let table = Arc::clone(&table);
        let constants = Arc::clone(&constants);
        let db = Arc::clone(db);
        let locale = Arc::clone(&locale);
        tasks.spawn_blocking(move || {
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                validate_single_value(&path, &value, &constants, &table, &db, &locale)
            }));
            match outcome {
                Ok(result) => result,
                Err(_) => Some(
                    ErrorEntry::new(path, "panic")
                        .with_value(value)
                        .with_message(&*locale, "validator panicked while checking this value"),
                ),
            }
        });
    }

    let mut entries = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(err) => log::warn!("validation task failed to join: {err}"),
        }
    }
    entries
}

/// Run one value through the field's validators in declared order; first
/// failure wins.
fn validate_single_value(
    path: &str,
    value: &Value,
    constants: &IndexMap<String, Constant>,
    table: &ValidatorTable,
    db: &Attributes,
    locale: &str,
) -> Option<ErrorEntry> {
    for (name, constant) in constants {
        if name.is_empty() || is_excluded(name) {
            continue;
        }
        let Some(validator) = table.get(name) else {
            match table.policy() {
                UnknownPolicy::Skip => continue,
                UnknownPolicy::Fail => {
                    return Some(
                        ErrorEntry::new(path, name.clone())
                            .with_value(value.clone())
                            .with_message(locale, format!("validator '{name}' is not registered")),
                    );
                }
            }
        };

        let mut attributes = constant.attributes.clone();
        attributes.insert(DB_ATTRIBUTE.to_string(), Value::Object(db.clone()));

        if let Err(failure) = validator(value, &attributes) {
            return Some(failure_entry(path, value, name, constant, &failure, locale));
        }
    }
    None
}

fn failure_entry(
    path: &str,
    value: &Value,
    validator: &str,
    constant: &Constant,
    failure: &anyhow::Error,
    locale: &str,
) -> ErrorEntry {
    let mut entry = ErrorEntry::new(path, validator).with_value(value.clone());
    let message = if constant.error.is_empty() {
        failure.to_string()
    } else {
        constant.error.clone()
    };
    entry.add_message(locale, message);
    for (loc, message) in &constant.l10n.error {
        if let Some(message) = message.as_str() {
            entry.add_message(loc.clone(), message);
        }
    }
    for (loc, name) in &constant.l10n.name {
        if let Some(name) = name.as_str() {
            entry.add_display_name(loc.clone(), name);
        }
    }
    entry
}
