//! End-to-end tests for the engine entry points
//!
//! These drive the public [`Schematics`] API with complete schema
//! documents, covering the gate, the concurrent validation core, array
//! identity, DB projection context, and the operate pipeline.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};

use crate::engine::Schematics;

fn schematics(schema: Value) -> Schematics {
    Schematics::load_from_value(&schema).expect("schema should load")
}

#[tokio::test]
async fn test_clean_record_returns_none() {
    let s = schematics(json!({
        "fields": {
            "name": { "required": true, "validators": { "IsString": {} } }
        }
    }));
    assert!(s.validate(&json!({ "name": "ada" })).await.is_none());
}

#[tokio::test]
async fn test_required_field_missing() {
    let s = schematics(json!({
        "fields": {
            "name": { "required": true, "validators": { "IsString": {} } }
        }
    }));
    let errors = s.validate(&json!({})).await.expect("should fail");
    let entries = errors.get("name").expect("keyed by target");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].validator, "is-required");
    assert_eq!(
        entries[0].message_for("en"),
        Some("please provide the value for this required field")
    );
}

#[tokio::test]
async fn test_optional_field_missing_is_fine() {
    let s = schematics(json!({
        "fields": {
            "nickname": { "validators": { "IsString": {} } }
        }
    }));
    assert!(s.validate(&json!({})).await.is_none());
}

#[tokio::test]
async fn test_dependency_gating_skips_validators() {
    let mut s = schematics(json!({
        "fields": {
            "a": { "validators": { "IsString": {} } },
            "b": { "depends_on": ["a"], "validators": { "Tracked": {} } }
        }
    }));
    let invoked = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&invoked);
    s.validators.register("Tracked", move |_, _| {
        flag.store(true, Ordering::SeqCst);
        Ok(())
    });

    let errors = s.validate(&json!({ "b": "only b" })).await.expect("should fail");
    let entries = errors.get("b").expect("keyed by target");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].validator, "depends-on");
    assert_eq!(
        entries[0].message_for("en"),
        Some("missing dependencies (a) for b")
    );
    assert!(!invoked.load(Ordering::SeqCst), "b's validators must not run");
}

#[tokio::test]
async fn test_satisfied_dependency_proceeds() {
    let s = schematics(json!({
        "fields": {
            "a": { "validators": { "IsString": {} } },
            "b": { "depends_on": ["a"], "validators": { "IsString": {} } }
        }
    }));
    assert!(s.validate(&json!({ "a": "x", "b": "y" })).await.is_none());
}

#[tokio::test]
async fn test_false_condition_skips_silently() {
    let s = schematics(json!({
        "fields": {
            "discount_code": {
                "required": true,
                "conditions": {
                    "FieldIsProvided": { "attributes": { "shouldBeProvided": "coupon" } }
                },
                "validators": { "IsString": {} }
            },
            "coupon": { "validators": { "IsString": {} } }
        }
    }));
    // coupon absent: discount_code is skipped entirely, even though it is
    // required and missing
    assert!(s.validate(&json!({})).await.is_none());
}

#[tokio::test]
async fn test_true_condition_activates_field() {
    let s = schematics(json!({
        "fields": {
            "discount_code": {
                "required": true,
                "conditions": {
                    "FieldIsProvided": { "attributes": { "shouldBeProvided": "coupon" } }
                },
                "validators": { "IsString": {} }
            },
            "coupon": { "validators": { "IsString": {} } }
        }
    }));
    let errors = s
        .validate(&json!({ "coupon": "SAVE10" }))
        .await
        .expect("discount_code is now required");
    assert!(errors.get("discount_code").is_some());
}

#[tokio::test]
async fn test_wildcard_values_validated_individually() {
    let s = schematics(json!({
        "fields": {
            "items.*.price": {
                "validators": { "MinAllowed": { "attributes": { "min": 0 } } }
            }
        }
    }));
    let data = json!({ "items": [{ "price": 5 }, { "price": -2 }, { "price": 7 }] });
    let errors = s.validate(&data).await.expect("one price is negative");
    let entries = errors.get("items.*.price").expect("keyed by target");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, "items.1.price");
}

#[tokio::test]
async fn test_array_elements_keyed_by_row_label() {
    let s = schematics(json!({
        "fields": {
            "name": { "required": true, "validators": { "IsString": {} } }
        }
    }));
    let data = json!([{ "age": 3 }, { "name": "ada" }]);
    let errors = s.validate(&data).await.expect("first element fails");
    assert_eq!(errors.len(), 1);
    assert!(errors.get("row-0").is_some());
    assert!(errors.get("row-1").is_none());
}

#[tokio::test]
async fn test_array_elements_keyed_by_explicit_id() {
    let s = schematics(json!({
        "fields": {
            "name": { "required": true, "validators": { "IsString": {} } }
        }
    }));
    let data = json!([{ "id": "u-7" }, { "id": "u-8", "name": "ada" }]);
    let errors = s.validate(&data).await.expect("first element fails");
    assert!(errors.get("u-7").is_some());
    assert!(errors.get("row-0").is_none());
}

#[tokio::test]
async fn test_scalar_top_level_is_whole_data_error() {
    let s = schematics(json!({ "fields": {} }));
    let errors = s.validate(&json!("just a string")).await.expect("bad shape");
    assert!(errors.get("whole-data").is_some());
}

#[tokio::test]
async fn test_whole_data_error_uses_configured_locale() {
    let mut s = schematics(json!({ "fields": {} }));
    s.locale = "de".to_string();
    let errors = s.validate(&json!(42)).await.expect("bad shape");
    let entry = &errors.get("whole-data").expect("whole-data keyed")[0];
    assert!(entry.messages.contains_key("de"));
    assert!(!entry.messages.contains_key("en"));
}

#[tokio::test]
async fn test_array_with_non_object_element_is_whole_data_error() {
    let s = schematics(json!({ "fields": {} }));
    let errors = s.validate(&json!([{ "a": 1 }, 2])).await.expect("bad shape");
    assert!(errors.get("whole-data").is_some());
}

#[tokio::test]
async fn test_db_projection_reaches_validators() {
    let mut s = schematics(json!({
        "DB": { "region": "eu" },
        "fields": {
            "country": { "add_to_db": true, "validators": { "IsString": {} } },
            "city": { "validators": { "InDb": {} } }
        }
    }));
    s.validators.register("InDb", |_, attrs| {
        let db = attrs
            .get(crate::engine::DB_ATTRIBUTE)
            .and_then(Value::as_object)
            .ok_or_else(|| anyhow::anyhow!("DB not injected"))?;
        anyhow::ensure!(db.get("region") == Some(&json!("eu")), "seed lost");
        anyhow::ensure!(db.get("country") == Some(&json!("PK")), "projection lost");
        Ok(())
    });
    let data = json!({ "country": "PK", "city": "lahore" });
    assert!(s.validate(&data).await.is_none());
}

#[test]
fn test_operate_object_round_trip() {
    let s = schematics(json!({
        "fields": {
            "name": { "operators": { "ToUpperCase": {} } }
        }
    }));
    let result = s.operate(&json!({ "name": "ada", "age": 30 })).unwrap();
    assert_eq!(result, json!({ "name": "ADA", "age": 30 }));
}

#[test]
fn test_operate_array_round_trip() {
    let s = schematics(json!({
        "fields": {
            "name": { "operators": { "TrimSpaces": {} } }
        }
    }));
    let result = s
        .operate(&json!([{ "name": "  ada " }, { "name": "grace" }]))
        .unwrap();
    assert_eq!(result, json!([{ "name": "ada" }, { "name": "grace" }]));
}

#[test]
fn test_operate_unknown_operator_is_whole_data_error() {
    let s = schematics(json!({
        "fields": {
            "name": { "operators": { "NoSuchOperator": {} } }
        }
    }));
    let errors = s.operate(&json!({ "name": "ada" })).unwrap_err();
    let strings = errors.get_strings("en", "%message");
    assert_eq!(strings, vec!["Operator 'NoSuchOperator' is not registered"]);
}

#[test]
fn test_merge_fields_adopts_missing_targets() {
    let mut s = schematics(json!({
        "fields": { "name": { "required": true } }
    }));
    let extra = schematics(json!({
        "fields": {
            "name": { "required": false },
            "age": { "validators": { "IsNumber": {} } }
        }
    }));
    s.merge_fields(&extra.schema);
    assert_eq!(s.schema.fields.len(), 2);
    // existing definitions win
    assert!(s.schema.field("name").unwrap().required);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "version": "2.1", "fields": {{ "name": {{ "required": true }} }} }}"#
    )
    .unwrap();
    let s = Schematics::load_from_file(file.path()).unwrap();
    assert_eq!(s.schema.version, "2.1");
    assert!(s.schema.field("name").unwrap().required);
}

#[test]
fn test_load_from_file_missing_path() {
    let err = Schematics::load_from_file("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, crate::Error::Io { .. }));
}

#[test]
fn test_load_from_bad_document() {
    let err = Schematics::load_from_value(&json!({ "fields": [1, 2] })).unwrap_err();
    assert!(matches!(err, crate::Error::SchemaLoad { .. }));
}

#[cfg(feature = "blocking")]
#[test]
fn test_validate_blocking() {
    let s = schematics(json!({
        "fields": {
            "name": { "required": true, "validators": { "IsString": {} } }
        }
    }));
    let errors = s.validate_blocking(&json!({})).unwrap().expect("should fail");
    assert!(errors.get("name").is_some());
}
