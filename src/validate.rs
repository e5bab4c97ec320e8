//! The recursive-descent validator.
//!
//! This module implements [`CompiledSchema::validate`], the single entry
//! point that walks a document against the schema tree. The walk is
//! depth-first in schema-declared field order and fails fast: the first
//! violation aborts the walk and is returned as the call's error.
//!
//! The input document is never mutated. The returned value is the normalized
//! document, with defaults injected for absent fields; callers must use the
//! returned value rather than the input.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::compile::CompiledSchema;
use crate::error::{Rule, SchemaValidationError};
use crate::path::ValuePath;
use crate::schema::{ArrayNode, ConstNode, MapNode, ObjectNode, SchemaNode, StringNode};

impl CompiledSchema {
    /// Validates a document against this schema.
    ///
    /// On success, returns the normalized document: a copy of the input with
    /// defaults injected for absent fields. Re-validating the output yields
    /// it unchanged (defaults apply only to absent fields).
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaValidationError`] encountered during the
    /// depth-first, schema-ordered walk.
    ///
    /// # Example
    ///
    /// ```rust
    /// use veridoc::{CompiledSchema, Schema};
    /// use serde_json::json;
    ///
    /// let schema = CompiledSchema::new(
    ///     Schema::object()
    ///         .field("name", Schema::string())
    ///         .require("name"),
    /// );
    ///
    /// assert!(schema.validate(&json!({"name": "demo"})).is_ok());
    /// assert!(schema.validate(&json!({})).is_err());
    /// ```
    pub fn validate(&self, data: &Value) -> Result<Value, SchemaValidationError> {
        self.walk(self.root(), data, &ValuePath::root(), 0)
    }

    fn walk(
        &self,
        node: &SchemaNode,
        value: &Value,
        path: &ValuePath,
        depth: usize,
    ) -> Result<Value, SchemaValidationError> {
        match node {
            SchemaNode::Object(obj) => self.walk_object(obj, value, path, depth),
            SchemaNode::Const(node) => walk_const(node, value, path),
            SchemaNode::String(node) => walk_string(node, value, path),
            SchemaNode::Array(arr) => self.walk_array(arr, value, path, depth),
            SchemaNode::Map(map) => self.walk_map(map, value, path, depth),
            SchemaNode::Ref(name) => self.walk_ref(name, value, path, depth),
        }
    }

    fn walk_object(
        &self,
        obj: &ObjectNode,
        value: &Value,
        path: &ValuePath,
        depth: usize,
    ) -> Result<Value, SchemaValidationError> {
        let map = match value.as_object() {
            Some(m) => m,
            None => return Err(type_error(path, "object", value, obj.to_source())),
        };

        // One error for the whole required set, before any field recursion.
        let missing = obj
            .required()
            .iter()
            .any(|name| !map.contains_key(name));
        if missing {
            return Err(SchemaValidationError::new(
                path.clone(),
                Rule::Required,
                format!("must contain {:?} properties", obj.required()),
            )
            .with_value(value.clone())
            .with_schema(obj.to_source()));
        }

        // Undeclared input keys pass through unchanged.
        let mut normalized = map.clone();

        for (name, field_node) in obj.fields() {
            let field_path = path.push_field(name);
            match map.get(name) {
                Some(field_value) => {
                    let validated = self.walk(field_node, field_value, &field_path, depth)?;
                    normalized.insert(name.clone(), validated);
                }
                None => {
                    let default = obj.default_for(name).or_else(|| match field_node {
                        SchemaNode::Const(c) => c.default(),
                        _ => None,
                    });
                    // An injected default must satisfy the field's own node,
                    // so re-validating the output always succeeds.
                    if let Some(default) = default {
                        let validated = self.walk(field_node, default, &field_path, depth)?;
                        normalized.insert(name.clone(), validated);
                    }
                    // Absent with no default: skipped silently.
                }
            }
        }

        Ok(Value::Object(normalized))
    }

    fn walk_array(
        &self,
        arr: &ArrayNode,
        value: &Value,
        path: &ValuePath,
        depth: usize,
    ) -> Result<Value, SchemaValidationError> {
        let items = match value.as_array() {
            Some(items) => items,
            None => return Err(type_error(path, "array", value, arr.to_source())),
        };

        let mut normalized = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            normalized.push(self.walk(arr.items(), item, &path.push_index(index), depth)?);
        }

        if arr.unique_items() {
            let distinct: HashSet<NormKey> = items.iter().map(normalized_key).collect();
            if distinct.len() != items.len() {
                // The message states the constraint without enumerating the
                // offending duplicates.
                return Err(SchemaValidationError::new(
                    path.clone(),
                    Rule::UniqueItems,
                    "elements must be unique",
                )
                .with_value(value.clone())
                .with_schema(arr.to_source()));
            }
        }

        Ok(Value::Array(normalized))
    }

    fn walk_map(
        &self,
        map_node: &MapNode,
        value: &Value,
        path: &ValuePath,
        depth: usize,
    ) -> Result<Value, SchemaValidationError> {
        let map = match value.as_object() {
            Some(m) => m,
            None => return Err(type_error(path, "object", value, map_node.to_source())),
        };

        let mut normalized = Map::new();
        for (key, entry) in map {
            let validated = self.walk(map_node.values(), entry, &path.push_field(key), depth)?;
            normalized.insert(key.clone(), validated);
        }

        Ok(Value::Object(normalized))
    }

    fn walk_ref(
        &self,
        name: &str,
        value: &Value,
        path: &ValuePath,
        depth: usize,
    ) -> Result<Value, SchemaValidationError> {
        // Depth is checked before resolution so self- and mutually-referential
        // definitions fail instead of overflowing the stack.
        if depth >= self.max_depth() {
            return Err(SchemaValidationError::new(
                path.clone(),
                Rule::MaxDepth,
                format!("maximum reference depth {} exceeded", self.max_depth()),
            )
            .with_value(value.clone()));
        }

        let resolved = match self.definition(name) {
            Some(node) => node,
            None => {
                return Err(SchemaValidationError::new(
                    path.clone(),
                    Rule::Reference,
                    format!("definition '{}' not found", name),
                )
                .with_value(value.clone()))
            }
        };

        self.walk(resolved, value, path, depth + 1)
    }
}

fn walk_const(
    node: &ConstNode,
    value: &Value,
    path: &ValuePath,
) -> Result<Value, SchemaValidationError> {
    if value == node.value() {
        Ok(value.clone())
    } else {
        Err(SchemaValidationError::new(
            path.clone(),
            Rule::Const,
            format!("must equal {}", node.value()),
        )
        .with_value(value.clone())
        .with_schema(node.to_source()))
    }
}

fn walk_string(
    node: &StringNode,
    value: &Value,
    path: &ValuePath,
) -> Result<Value, SchemaValidationError> {
    let s = match value.as_str() {
        Some(s) => s,
        None => return Err(type_error(path, "string", value, node.to_source())),
    };

    if let Some(pattern) = node.pattern_ref() {
        if !pattern.is_match(s) {
            return Err(SchemaValidationError::new(
                path.clone(),
                Rule::Pattern,
                format!("does not match pattern '{}'", pattern.source()),
            )
            .with_value(value.clone())
            .with_schema(node.to_source()));
        }
    }

    Ok(value.clone())
}

fn type_error(
    path: &ValuePath,
    expected: &str,
    value: &Value,
    schema: Value,
) -> SchemaValidationError {
    SchemaValidationError::new(
        path.clone(),
        Rule::Type,
        format!("expected {}, got {}", expected, value_type_name(value)),
    )
    .with_value(value.clone())
    .with_schema(schema)
}

/// Returns the structural type name for a value.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The normalized structural encoding used by the `uniqueItems` check.
///
/// Mappings compare order-independently, sequences element-wise, and scalars
/// by their string form. Booleans fold into `"true"`/`"false"`, so `true`
/// and the string `"true"` compare equal; kept for compatibility with
/// existing manifests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum NormKey {
    Scalar(String),
    Seq(Vec<NormKey>),
    Map(Vec<(String, NormKey)>),
}

fn normalized_key(value: &Value) -> NormKey {
    match value {
        Value::Null => NormKey::Scalar("null".to_string()),
        Value::Bool(b) => NormKey::Scalar(b.to_string()),
        Value::Number(n) => NormKey::Scalar(n.to_string()),
        Value::String(s) => NormKey::Scalar(s.clone()),
        Value::Array(items) => NormKey::Seq(items.iter().map(normalized_key).collect()),
        Value::Object(map) => {
            let mut entries: Vec<(String, NormKey)> = map
                .iter()
                .map(|(k, v)| (k.clone(), normalized_key(v)))
                .collect();
            entries.sort();
            NormKey::Map(entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mappings_compare_order_independently() {
        let a = normalized_key(&json!({"a": 1, "b": 2}));
        let b = normalized_key(&json!({"b": 2, "a": 1}));
        assert_eq!(a, b);
    }

    #[test]
    fn test_nested_structures_compare_structurally() {
        let a = normalized_key(&json!([{"x": [1, 2]}, "s"]));
        let b = normalized_key(&json!([{"x": [1, 2]}, "s"]));
        let c = normalized_key(&json!([{"x": [2, 1]}, "s"]));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_boolean_folds_into_string_form() {
        assert_eq!(normalized_key(&json!(true)), normalized_key(&json!("true")));
        assert_eq!(
            normalized_key(&json!(false)),
            normalized_key(&json!("false"))
        );
    }

    #[test]
    fn test_null_and_numbers_stringify() {
        assert_eq!(normalized_key(&json!(null)), normalized_key(&json!("null")));
        assert_eq!(normalized_key(&json!(42)), normalized_key(&json!("42")));
    }

    #[test]
    fn test_value_type_names() {
        assert_eq!(value_type_name(&json!(null)), "null");
        assert_eq!(value_type_name(&json!(true)), "boolean");
        assert_eq!(value_type_name(&json!(1.5)), "number");
        assert_eq!(value_type_name(&json!("s")), "string");
        assert_eq!(value_type_name(&json!([])), "array");
        assert_eq!(value_type_name(&json!({})), "object");
    }
}
