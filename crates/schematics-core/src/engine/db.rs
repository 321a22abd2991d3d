//! DB projection
//!
//! Derives the simplified mapping handed to every validator invocation as
//! read-only context: the schema's seed DB plus, for every field flagged
//! `add_to_db`, its matched values: a bare scalar for exactly one match,
//! an ordered list for two or more, nothing for zero. Recomputed per call.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the MIT OR Apache-2.0 license

use indexmap::IndexMap;
use serde_json::Value;

use crate::matcher::find_matching_keys;
use crate::schema::{Attributes, Schema};

pub(crate) fn project_db(
    schema: &Schema,
    flat: &IndexMap<String, Value>,
    separator: &str,
) -> Attributes {
    let mut db = schema.db.clone();
    for (target, field) in &schema.fields {
        if !field.add_to_db {
            continue;
        }
        let matches = find_matching_keys(flat, target.as_str(), separator);
        match matches.len() {
            0 => {}
            1 => {
                if let Some(value) = matches.values().next() {
                    db.insert(target.to_string(), value.clone());
                }
            }
            _ => {
                db.insert(
                    target.to_string(),
                    Value::Array(matches.values().cloned().collect()),
                );
            }
        }
    }
    db
}
