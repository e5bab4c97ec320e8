//! Tests for const fields and default injection.

use serde_json::json;
use veridoc::{CompiledSchema, Rule, Schema};

fn kind_schema() -> CompiledSchema {
    CompiledSchema::new(
        Schema::object().field("kind", Schema::constant(json!("Project")).injected()),
    )
}

#[test]
fn test_absent_const_field_injects_default() {
    let normalized = kind_schema().validate(&json!({})).unwrap();
    assert_eq!(normalized, json!({"kind": "Project"}));
}

#[test]
fn test_matching_const_field_passes_unchanged() {
    let doc = json!({"kind": "Project"});
    let normalized = kind_schema().validate(&doc).unwrap();
    assert_eq!(normalized, doc);
}

#[test]
fn test_mismatching_const_field_rejected_not_rewritten() {
    let err = kind_schema()
        .validate(&json!({"kind": "Deployment"}))
        .unwrap_err();
    assert_eq!(err.rule, Rule::Const);
    assert_eq!(err.path.to_string(), "data.kind");
    assert!(err.message.contains("Project"));
    assert_eq!(err.value, Some(json!("Deployment")));
}

#[test]
fn test_const_without_injection_skips_absent_field() {
    let schema = CompiledSchema::new(
        Schema::object().field("kind", Schema::constant(json!("Project"))),
    );

    let normalized = schema.validate(&json!({})).unwrap();
    assert_eq!(normalized, json!({}));
}

#[test]
fn test_const_works_for_non_string_literals() {
    let schema = CompiledSchema::new(
        Schema::object().field("apiVersion", Schema::constant(json!(2)).injected()),
    );

    assert_eq!(
        schema.validate(&json!({})).unwrap(),
        json!({"apiVersion": 2})
    );
    assert!(schema.validate(&json!({"apiVersion": 2})).is_ok());
    assert_eq!(
        schema
            .validate(&json!({"apiVersion": 3}))
            .unwrap_err()
            .rule,
        Rule::Const
    );
}

#[test]
fn test_input_document_is_never_mutated() {
    let doc = json!({});
    let normalized = kind_schema().validate(&doc).unwrap();

    assert_eq!(doc, json!({}));
    assert_eq!(normalized, json!({"kind": "Project"}));
}

#[test]
fn test_validation_is_idempotent_after_defaulting() {
    let schema = CompiledSchema::new(
        Schema::object()
            .field("kind", Schema::constant(json!("Project")).injected())
            .field("region", Schema::string())
            .default_value("region", json!("default")),
    );

    let once = schema.validate(&json!({})).unwrap();
    let twice = schema.validate(&once).unwrap();
    assert_eq!(once, twice);
}
