//! Object schema node.
//!
//! This module provides [`ObjectNode`] for describing mappings with declared
//! fields, a required-field set, and default values for omitted fields.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use super::SchemaNode;

/// A schema node for mappings.
///
/// `ObjectNode` declares an ordered set of fields, which of them are
/// required, and optional defaults injected when a field is wholly absent
/// from the input. Field order is the schema's declared order and drives the
/// order in which the validator visits fields.
///
/// Input keys with no declared field pass through validation unchanged.
///
/// # Example
///
/// ```rust
/// use veridoc::Schema;
/// use serde_json::json;
///
/// let node = Schema::object()
///     .field("name", Schema::string())
///     .field("replicas", Schema::constant(json!("1")))
///     .require("name")
///     .default_value("replicas", json!("1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectNode {
    fields: IndexMap<String, SchemaNode>,
    required: Vec<String>,
    defaults: IndexMap<String, Value>,
}

impl ObjectNode {
    /// Creates a new object node with no declared fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field with the given schema.
    ///
    /// Fields are optional unless also named in [`require`](Self::require).
    /// Re-declaring a field replaces its schema but keeps its position.
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<SchemaNode>) -> Self {
        self.fields.insert(name.into(), schema.into());
        self
    }

    /// Marks a field as required.
    pub fn require(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    /// Sets a default injected when the named field is absent.
    pub fn default_value(mut self, name: impl Into<String>, default: Value) -> Self {
        self.defaults.insert(name.into(), default);
        self
    }

    /// Returns the declared fields in schema order.
    pub fn fields(&self) -> &IndexMap<String, SchemaNode> {
        &self.fields
    }

    /// Returns the required field names in declared order.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Returns the default for the named field, if one is declared.
    ///
    /// Const fields carry their own default; see [`super::ConstNode`].
    pub fn default_for(&self, name: &str) -> Option<&Value> {
        self.defaults.get(name)
    }

    /// Renders this node into its declarative source form.
    pub fn to_source(&self) -> Value {
        let mut properties = Map::new();
        for (name, schema) in &self.fields {
            let mut source = schema.to_source();
            if let (Some(default), Some(obj)) = (self.defaults.get(name), source.as_object_mut()) {
                obj.insert("default".to_string(), default.clone());
            }
            properties.insert(name.clone(), source);
        }

        let mut source = Map::new();
        source.insert("type".to_string(), json!("object"));
        if !properties.is_empty() {
            source.insert("properties".to_string(), Value::Object(properties));
        }
        if !self.required.is_empty() {
            source.insert("required".to_string(), json!(self.required));
        }
        Value::Object(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn test_field_order_preserved() {
        let node = Schema::object()
            .field("z", Schema::string())
            .field("a", Schema::string())
            .field("m", Schema::string());

        let names: Vec<_> = node.fields().keys().cloned().collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_require_is_idempotent() {
        let node = Schema::object()
            .field("name", Schema::string())
            .require("name")
            .require("name");

        assert_eq!(node.required(), ["name".to_string()]);
    }

    #[test]
    fn test_redeclaring_field_keeps_position() {
        let node = Schema::object()
            .field("a", Schema::string())
            .field("b", Schema::string())
            .field("a", Schema::map(Schema::string()));

        let names: Vec<_> = node.fields().keys().cloned().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(matches!(node.fields()["a"], SchemaNode::Map(_)));
    }

    #[test]
    fn test_to_source_includes_defaults() {
        let node = Schema::object()
            .field("region", Schema::string())
            .default_value("region", json!("default"));

        let source = node.to_source();
        assert_eq!(source["properties"]["region"]["default"], json!("default"));
    }

    #[test]
    fn test_to_source_omits_empty_sections() {
        let source = Schema::object().to_source();
        assert_eq!(source, json!({"type": "object"}));
    }
}
