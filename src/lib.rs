//! # Veridoc
//!
//! Schema-driven structural validation for resource manifests.
//!
//! Veridoc checks an in-memory JSON/YAML-like document against a declarative
//! schema and returns either a normalized document (with defaults injected)
//! or a single validation error identifying the offending path, the violated
//! rule, and the offending value. Validation fails fast: the first violation
//! found during the depth-first, schema-ordered walk wins.
//!
//! ## Core Types
//!
//! - [`ValuePath`]: the field/index trail to a value in a nested document
//!   (e.g. `data.metadata.labels.env`)
//! - [`SchemaNode`]: one rule in the validation tree (object/const/string/
//!   array/map/ref)
//! - [`CompiledSchema`]: a schema tree plus its named definitions, ready to
//!   validate documents
//! - [`SchemaValidationError`]: a validation failure with full context
//! - [`SchemaRegistry`]: a thread-safe store of compiled schemas keyed by
//!   resource kind
//!
//! ## Example
//!
//! ```rust
//! use veridoc::{CompiledSchema, Schema};
//! use serde_json::json;
//!
//! let schema = CompiledSchema::new(
//!     Schema::object()
//!         .field("name", Schema::string().pattern("[a-z]+").unwrap())
//!         .field("kind", Schema::constant(json!("Project")).injected())
//!         .require("name"),
//! );
//!
//! // Defaults are injected into the returned document, never into the input.
//! let normalized = schema.validate(&json!({"name": "demo"})).unwrap();
//! assert_eq!(normalized, json!({"name": "demo", "kind": "Project"}));
//!
//! // Violations carry the path and the violated rule.
//! let err = schema.validate(&json!({"name": "DEMO"})).unwrap_err();
//! assert_eq!(err.path.to_string(), "data.name");
//! ```

pub mod compile;
pub mod error;
pub mod path;
pub mod registry;
pub mod schema;
pub mod validate;

pub use compile::{CompileError, CompiledSchema};
pub use error::{Rule, SchemaValidationError};
pub use path::{PathSegment, ValuePath};
pub use registry::{RegistryError, SchemaRegistry};
pub use schema::{ArrayNode, ConstNode, MapNode, ObjectNode, Schema, SchemaNode, StringNode};

/// Type alias for validation results carrying a normalized document.
pub type ValidationResult = Result<serde_json::Value, SchemaValidationError>;
