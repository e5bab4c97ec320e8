//! Const schema node.
//!
//! This module provides [`ConstNode`] for fields constrained to one exact
//! literal value.

use serde_json::{Map, Value};

/// A schema node demanding one exact literal value.
///
/// A const node never coerces a present, non-matching value; it rejects it.
/// With [`injected`](Self::injected) it also carries a default equal to the
/// literal, which the validator injects into the normalized output when the
/// field is wholly absent from the input mapping. Resource manifests use this
/// for discriminator fields like `kind`.
///
/// # Example
///
/// ```rust
/// use veridoc::Schema;
/// use serde_json::json;
///
/// let kind = Schema::constant(json!("Project")).injected();
/// ```
#[derive(Debug, Clone)]
pub struct ConstNode {
    value: Value,
    default: Option<Value>,
}

impl ConstNode {
    /// Creates a new const node demanding the given literal.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            default: None,
        }
    }

    /// Makes the literal double as the field's default when absent.
    pub fn injected(mut self) -> Self {
        self.default = Some(self.value.clone());
        self
    }

    /// Returns the demanded literal.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the default injected for absent fields, if enabled.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Renders this node into its declarative source form.
    pub fn to_source(&self) -> Value {
        let mut source = Map::new();
        source.insert("const".to_string(), self.value.clone());
        if let Some(default) = &self.default {
            source.insert("default".to_string(), default.clone());
        }
        Value::Object(source)
    }
}
