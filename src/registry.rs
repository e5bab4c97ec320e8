//! Schema registry for resource-kind lookup and caching.
//!
//! This module provides the [`SchemaRegistry`] type that stores compiled
//! schemas keyed by resource-kind strings (e.g. `"Project"`,
//! `"Deployment"`), so each declarative source is compiled once and the
//! compiled tree is reused across validation calls.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::compile::{compile, CompileError, CompiledSchema};
use crate::error::SchemaValidationError;

/// A thread-safe registry of compiled schemas keyed by resource kind.
///
/// # Thread Safety
///
/// The registry uses `RwLock` internally:
/// - Multiple threads can look up and validate concurrently (read access)
/// - Registration operations are serialized (write access)
///
/// Compiled schemas are held behind `Arc` and are immutable, so a schema
/// fetched with [`get`](Self::get) stays valid regardless of later
/// registrations.
///
/// # Example
///
/// ```rust
/// use veridoc::SchemaRegistry;
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
///
/// registry.register_source("Project", &json!({
///     "type": "object",
///     "properties": {
///         "name": {"type": "string", "pattern": "^project-[a-z]{24}$"}
///     },
///     "required": ["name"]
/// })).unwrap();
///
/// let doc = json!({"name": "project-abcdefghijklmnopqrstuvwx"});
/// assert!(registry.validate("Project", &doc).unwrap().is_ok());
/// ```
#[derive(Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<String, Arc<CompiledSchema>>>,
}

impl SchemaRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a compiled schema under the given resource kind.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateKind`] if the kind is already
    /// registered.
    pub fn register(
        &self,
        kind: impl Into<String>,
        schema: CompiledSchema,
    ) -> Result<(), RegistryError> {
        let kind = kind.into();
        let mut schemas = self.schemas.write();

        if schemas.contains_key(&kind) {
            return Err(RegistryError::DuplicateKind(kind));
        }

        tracing::debug!(kind = %kind, "registering schema");
        schemas.insert(kind, Arc::new(schema));
        Ok(())
    }

    /// Compiles a declarative source and registers it under the given kind.
    ///
    /// The compiled tree is cached; later lookups for the kind reuse it.
    pub fn register_source(
        &self,
        kind: impl Into<String>,
        source: &Value,
    ) -> Result<(), RegistryError> {
        self.register(kind, compile(source)?)
    }

    /// Compiles YAML (or JSON) schema text and registers it under the given
    /// kind.
    pub fn register_yaml(&self, kind: impl Into<String>, text: &str) -> Result<(), RegistryError> {
        self.register(kind, CompiledSchema::from_yaml(text)?)
    }

    /// Retrieves the compiled schema for a resource kind.
    ///
    /// Returns `None` if no schema is registered for the kind.
    pub fn get(&self, kind: &str) -> Option<Arc<CompiledSchema>> {
        self.schemas.read().get(kind).cloned()
    }

    /// Returns the registered resource kinds, sorted.
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.schemas.read().keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// Validates a document against the schema registered for a kind.
    ///
    /// The outer error reports an unknown kind; the inner result is the
    /// validation outcome, carrying the normalized document on success.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownKind`] if no schema is registered for
    /// the kind.
    pub fn validate(
        &self,
        kind: &str,
        data: &Value,
    ) -> Result<Result<Value, SchemaValidationError>, RegistryError> {
        let schema = self
            .get(kind)
            .ok_or_else(|| RegistryError::UnknownKind(kind.to_string()))?;

        tracing::debug!(kind = %kind, "validating document");
        Ok(schema.validate(data))
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a schema under a kind that already exists.
    #[error("schema for kind '{0}' already registered")]
    DuplicateKind(String),

    /// Attempted to validate against a kind with no registered schema.
    #[error("no schema registered for kind '{0}'")]
    UnknownKind(String),

    /// The declarative source failed to compile.
    #[error(transparent)]
    Compile(#[from] CompileError),
}
