//! Array schema node.
//!
//! This module provides [`ArrayNode`] for sequences whose elements share one
//! schema, with an optional uniqueness constraint.

use serde_json::{json, Map, Value};

use super::SchemaNode;

/// A schema node for sequences.
///
/// Every element validates against the item schema, with index-qualified
/// paths on failure. With [`unique`](Self::unique), elements must be
/// pairwise distinct under the validator's structural normalization (see
/// [`crate::validate`]).
///
/// # Example
///
/// ```rust
/// use veridoc::Schema;
///
/// let subnets = Schema::array(Schema::string().pattern(r"\d+\.\d+\.\d+\.\d+/\d+").unwrap())
///     .unique();
/// ```
#[derive(Debug, Clone)]
pub struct ArrayNode {
    items: Box<SchemaNode>,
    unique_items: bool,
}

impl ArrayNode {
    /// Creates a new array node whose elements validate against `items`.
    pub fn new(items: impl Into<SchemaNode>) -> Self {
        Self {
            items: Box::new(items.into()),
            unique_items: false,
        }
    }

    /// Requires elements to be pairwise distinct.
    pub fn unique(mut self) -> Self {
        self.unique_items = true;
        self
    }

    /// Returns the element schema.
    pub fn items(&self) -> &SchemaNode {
        &self.items
    }

    /// Returns true when elements must be pairwise distinct.
    pub fn unique_items(&self) -> bool {
        self.unique_items
    }

    /// Renders this node into its declarative source form.
    pub fn to_source(&self) -> Value {
        let mut source = Map::new();
        source.insert("type".to_string(), json!("array"));
        source.insert("items".to_string(), self.items.to_source());
        if self.unique_items {
            source.insert("uniqueItems".to_string(), json!(true));
        }
        Value::Object(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn test_unique_flag() {
        let node = Schema::array(Schema::string());
        assert!(!node.unique_items());
        assert!(node.unique().unique_items());
    }

    #[test]
    fn test_to_source() {
        let node = Schema::array(Schema::string()).unique();
        assert_eq!(
            node.to_source(),
            json!({"type": "array", "items": {"type": "string"}, "uniqueItems": true})
        );
    }
}
