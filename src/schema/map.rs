//! String-map schema node.
//!
//! This module provides [`MapNode`] for open-ended mappings where keys are
//! unconstrained and every value shares one schema.

use serde_json::{json, Value};

use super::SchemaNode;

/// A schema node for open-ended mappings.
///
/// Keys are not constrained; every value must satisfy the declared value
/// schema. Resource manifests use this for free-form label maps.
///
/// # Example
///
/// ```rust
/// use veridoc::Schema;
///
/// let labels = Schema::map(Schema::string());
/// ```
#[derive(Debug, Clone)]
pub struct MapNode {
    values: Box<SchemaNode>,
}

impl MapNode {
    /// Creates a new map node whose values validate against `values`.
    pub fn new(values: impl Into<SchemaNode>) -> Self {
        Self {
            values: Box::new(values.into()),
        }
    }

    /// Returns the value schema.
    pub fn values(&self) -> &SchemaNode {
        &self.values
    }

    /// Renders this node into its declarative source form.
    pub fn to_source(&self) -> Value {
        json!({"type": "object", "additionalProperties": self.values.to_source()})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn test_to_source() {
        let node = Schema::map(Schema::string());
        assert_eq!(
            node.to_source(),
            json!({"type": "object", "additionalProperties": {"type": "string"}})
        );
    }
}
