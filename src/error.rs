//! Validation error types.
//!
//! This module provides [`SchemaValidationError`], the single failure kind
//! produced by the validator, and [`Rule`], the set of rules a document can
//! violate.

use std::fmt::{self, Display};

use serde_json::Value;

use crate::path::ValuePath;

/// The rule a value violated.
///
/// The first five variants correspond to data violations; `Reference` and
/// `MaxDepth` are engine guards raised while resolving named schema
/// references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// The value has the wrong structural type (e.g. string where a mapping
    /// was expected).
    Type,
    /// A mapping is missing one or more required fields.
    Required,
    /// The value does not equal the literal a const field demands.
    Const,
    /// A string does not fully match the schema's anchored pattern.
    Pattern,
    /// A sequence contains structurally equal elements under `uniqueItems`.
    UniqueItems,
    /// A schema reference names a definition that does not exist.
    Reference,
    /// The reference chain exceeded the configured depth limit.
    MaxDepth,
}

impl Rule {
    /// Returns the serialized rule name as it appears in rendered errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Type => "type",
            Rule::Required => "required",
            Rule::Const => "const",
            Rule::Pattern => "pattern",
            Rule::UniqueItems => "uniqueItems",
            Rule::Reference => "reference",
            Rule::MaxDepth => "maxDepth",
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure with full context.
///
/// `SchemaValidationError` captures everything a caller needs to report the
/// failure:
/// - **path**: where in the document the violation occurred
/// - **rule**: which rule was violated
/// - **message**: human-readable description of the failure
/// - **value**: the offending value (optional, cloned from the input)
/// - **schema**: the violated schema fragment in declarative form (optional)
///
/// Validation fails fast, so a failed call produces exactly one of these.
///
/// # Example
///
/// ```rust
/// use veridoc::{Rule, SchemaValidationError, ValuePath};
/// use serde_json::json;
///
/// let error = SchemaValidationError::new(
///     ValuePath::root().push_field("guid"),
///     Rule::Pattern,
///     "does not match pattern '^[0-9a-f-]{36}$'",
/// )
/// .with_value(json!("not-a-guid"));
///
/// assert_eq!(error.rule, Rule::Pattern);
/// assert_eq!(error.path.to_string(), "data.guid");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaValidationError {
    /// The path to the value that failed validation.
    pub path: ValuePath,
    /// The violated rule.
    pub rule: Rule,
    /// Human-readable error message.
    pub message: String,
    /// The offending value, if one exists (required-field failures carry the
    /// enclosing mapping).
    pub value: Option<Value>,
    /// The schema fragment that was violated, in declarative form.
    pub schema: Option<Value>,
}

impl SchemaValidationError {
    /// Creates a new validation error with the given path, rule, and message.
    pub fn new(path: ValuePath, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            path,
            rule,
            message: message.into(),
            value: None,
            schema: None,
        }
    }

    /// Attaches the offending value and returns self for chaining.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Attaches the violated schema fragment and returns self for chaining.
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }
}

impl Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (rule: {})", self.path, self.message, self.rule)?;
        if let Some(ref value) = self.value {
            write!(f, " (got: {})", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaValidationError {}

// SchemaValidationError is Send + Sync since all fields are owned types.
// These assertions keep that true if the types change.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaValidationError>();
    assert_sync::<SchemaValidationError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_creation() {
        let error = SchemaValidationError::new(
            ValuePath::root().push_field("name"),
            Rule::Required,
            "required properties missing",
        );

        assert_eq!(error.path, ValuePath::root().push_field("name"));
        assert_eq!(error.rule, Rule::Required);
        assert!(error.value.is_none());
        assert!(error.schema.is_none());
    }

    #[test]
    fn test_error_builder() {
        let error = SchemaValidationError::new(
            ValuePath::root().push_field("replicas"),
            Rule::Type,
            "expected string",
        )
        .with_value(json!(3))
        .with_schema(json!({"type": "string"}));

        assert_eq!(error.value, Some(json!(3)));
        assert_eq!(error.schema, Some(json!({"type": "string"})));
    }

    #[test]
    fn test_error_display() {
        let error = SchemaValidationError::new(
            ValuePath::root().push_field("guid"),
            Rule::Pattern,
            "does not match pattern",
        )
        .with_value(json!("nope"));

        let display = error.to_string();
        assert!(display.contains("data.guid: does not match pattern"));
        assert!(display.contains("rule: pattern"));
        assert!(display.contains("got: \"nope\""));
    }

    #[test]
    fn test_error_display_root() {
        let error = SchemaValidationError::new(ValuePath::root(), Rule::Type, "expected object");
        assert!(error.to_string().starts_with("data: expected object"));
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(Rule::Type.as_str(), "type");
        assert_eq!(Rule::Required.as_str(), "required");
        assert_eq!(Rule::Const.as_str(), "const");
        assert_eq!(Rule::Pattern.as_str(), "pattern");
        assert_eq!(Rule::UniqueItems.as_str(), "uniqueItems");
        assert_eq!(Rule::Reference.as_str(), "reference");
        assert_eq!(Rule::MaxDepth.as_str(), "maxDepth");
    }
}
