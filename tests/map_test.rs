//! Tests for open-ended string maps (label maps).

use serde_json::json;
use veridoc::{CompiledSchema, Rule, Schema};

#[test]
fn test_empty_map_is_valid() {
    let schema = CompiledSchema::new(Schema::map(Schema::string()));
    assert_eq!(schema.validate(&json!({})).unwrap(), json!({}));
}

#[test]
fn test_keys_are_unconstrained() {
    let schema = CompiledSchema::new(Schema::map(Schema::string()));

    let doc = json!({"env": "prod", "team/owner": "robotics", "": "empty-key"});
    assert_eq!(schema.validate(&doc).unwrap(), doc);
}

#[test]
fn test_every_value_validated() {
    let schema = CompiledSchema::new(Schema::map(Schema::string()));

    let err = schema
        .validate(&json!({"env": "prod", "replicas": 3}))
        .unwrap_err();
    assert_eq!(err.rule, Rule::Type);
    assert_eq!(err.path.to_string(), "data.replicas");
}

#[test]
fn test_rejects_non_mapping() {
    let schema = CompiledSchema::new(Schema::map(Schema::string()));

    let err = schema.validate(&json!(["not", "a", "map"])).unwrap_err();
    assert_eq!(err.rule, Rule::Type);
    assert!(err.message.contains("expected object"));
}

#[test]
fn test_nested_label_map_path_reporting() {
    // A violation at metadata.labels.env renders as data.metadata.labels.env.
    let schema = CompiledSchema::new(
        Schema::object().field(
            "metadata",
            Schema::object().field("labels", Schema::map(Schema::string())),
        ),
    );

    let err = schema
        .validate(&json!({"metadata": {"labels": {"env": true}}}))
        .unwrap_err();
    assert_eq!(err.path.to_string(), "data.metadata.labels.env");
    assert_eq!(err.rule, Rule::Type);
    assert_eq!(err.value, Some(json!(true)));
}

#[test]
fn test_map_values_can_be_structured() {
    let schema = CompiledSchema::new(Schema::map(
        Schema::object()
            .field("url", Schema::string())
            .require("url"),
    ));

    assert!(schema
        .validate(&json!({"camera": {"url": "rtsp://cam"}}))
        .is_ok());

    let err = schema.validate(&json!({"camera": {}})).unwrap_err();
    assert_eq!(err.rule, Rule::Required);
    assert_eq!(err.path.to_string(), "data.camera");
}
