//! Declarative schema compilation.
//!
//! This module parses a declarative schema document (a JSON-Schema-flavoured
//! subset, loadable from JSON or YAML text) into a [`CompiledSchema`]: an
//! immutable [`SchemaNode`] tree plus its named definitions table. Schemas
//! are compiled once and shared read-only across validation calls; new
//! resource kinds are a data change, not a code change.
//!
//! Recognized keywords: `type` (`object`/`string`/`array`), `properties`,
//! `required`, `default`, `const`, `pattern`, `items`, `uniqueItems`,
//! `additionalProperties` (schema form), `$ref` (`#/definitions/<name>`),
//! and a top-level `definitions` mapping. Anything else is rejected with
//! [`CompileError::UnsupportedKeyword`] rather than silently dropped.

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::schema::{ArrayNode, ConstNode, ObjectNode, Schema, SchemaNode, StringNode};
use crate::validate::value_type_name;

const REF_PREFIX: &str = "#/definitions/";

/// Errors produced while compiling a declarative schema source.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The schema source (or a nested fragment) is not a mapping.
    #[error("schema source must be a mapping, got {0}")]
    NotAMapping(&'static str),

    /// The `type` keyword names a type this engine does not model.
    #[error("unsupported type '{0}'")]
    UnsupportedType(String),

    /// A fragment declares none of `type`, `const`, or `$ref`.
    #[error("schema must declare 'type', 'const', or '$ref'")]
    MissingType,

    /// An `array` schema has no `items` schema.
    #[error("'array' schema requires an 'items' schema")]
    MissingItems,

    /// A `$ref` target outside `#/definitions/`.
    #[error("unsupported reference '{0}': only '#/definitions/<name>' is supported")]
    UnsupportedRef(String),

    /// A keyword is present but has the wrong shape.
    #[error("keyword '{keyword}' must be {expected}")]
    InvalidKeyword {
        /// The offending keyword.
        keyword: &'static str,
        /// What the keyword's value must look like.
        expected: &'static str,
    },

    /// A keyword this engine does not model for the declared node kind.
    ///
    /// Compilation fails closed: a dropped keyword would silently weaken the
    /// schema, so anything unrecognized is rejected.
    #[error("unsupported keyword '{keyword}' in '{kind}' schema")]
    UnsupportedKeyword {
        /// The offending keyword.
        keyword: String,
        /// The node kind being compiled.
        kind: &'static str,
    },

    /// `properties`/`required` combined with a schema-valued
    /// `additionalProperties`.
    #[error(
        "'properties' and 'required' cannot be combined with a schema-valued 'additionalProperties'"
    )]
    MixedProperties,

    /// A const field's `default` differs from its `const` literal.
    #[error("'default' must equal 'const' (const: {constant}, default: {default})")]
    ConstDefaultMismatch {
        /// The declared literal.
        constant: Value,
        /// The mismatched default.
        default: Value,
    },

    /// The declared `pattern` is not a valid regex.
    #[error("invalid pattern '{pattern}'")]
    InvalidPattern {
        /// The declared pattern source.
        pattern: String,
        /// The regex compilation failure.
        #[source]
        source: regex::Error,
    },

    /// The schema text is not valid YAML/JSON.
    #[error("invalid schema text")]
    Parse(#[from] serde_yaml::Error),
}

/// A schema tree plus its named definitions, ready to validate documents.
///
/// A `CompiledSchema` is built once — from builders via [`new`](Self::new)
/// and [`define`](Self::define), or from a declarative source via
/// [`compile`] / [`from_yaml`](Self::from_yaml) — and is immutable
/// thereafter. Validation never mutates it, so it is safely shared across
/// threads.
///
/// # Example
///
/// ```rust
/// use veridoc::CompiledSchema;
/// use serde_json::json;
///
/// let schema = CompiledSchema::from_yaml(r##"
/// type: object
/// properties:
///   guid:
///     $ref: "#/definitions/Uuid"
/// required: [guid]
/// definitions:
///   Uuid:
///     type: string
///     pattern: "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
/// "##).unwrap();
///
/// let doc = json!({"guid": "6ba7b810-9dad-11d1-80b4-00c04fd430c8"});
/// assert!(schema.validate(&doc).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    root: SchemaNode,
    definitions: IndexMap<String, SchemaNode>,
    max_depth: usize,
}

impl CompiledSchema {
    /// Default limit on reference-chain depth.
    pub const DEFAULT_MAX_DEPTH: usize = 100;

    /// Creates a compiled schema from a root node with no definitions.
    pub fn new(root: impl Into<SchemaNode>) -> Self {
        Self {
            root: root.into(),
            definitions: IndexMap::new(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Adds a named definition for `$ref` resolution.
    pub fn define(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.definitions.insert(name.into(), node.into());
        self
    }

    /// Sets the maximum reference depth for circular reference prevention.
    ///
    /// Reference chains longer than this fail validation with the `maxDepth`
    /// rule instead of recursing without bound.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Compiles a schema from YAML (or JSON) text.
    pub fn from_yaml(text: &str) -> Result<Self, CompileError> {
        let source: Value = serde_yaml::from_str(text)?;
        compile(&source)
    }

    /// Returns the root node.
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Returns the named definition, if present.
    pub fn definition(&self, name: &str) -> Option<&SchemaNode> {
        self.definitions.get(name)
    }

    /// Returns the maximum reference depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the names of referenced definitions that do not exist.
    ///
    /// Call after building a schema to check reference integrity up front;
    /// dangling references otherwise surface per-document at validation time.
    pub fn unresolved_refs(&self) -> Vec<String> {
        let mut refs = Vec::new();
        self.root.collect_refs(&mut refs);
        for node in self.definitions.values() {
            node.collect_refs(&mut refs);
        }

        let mut unresolved: Vec<String> = refs
            .into_iter()
            .filter(|name| !self.definitions.contains_key(name))
            .collect();
        unresolved.sort();
        unresolved.dedup();
        unresolved
    }

    /// Renders the schema back into its declarative source form.
    pub fn to_source(&self) -> Value {
        let mut source = self.root.to_source();
        if !self.definitions.is_empty() {
            let mut defs = serde_json::Map::new();
            for (name, node) in &self.definitions {
                defs.insert(name.clone(), node.to_source());
            }
            source["definitions"] = Value::Object(defs);
        }
        source
    }
}

/// Compiles a declarative schema source into a [`CompiledSchema`].
///
/// The top-level `definitions` mapping, if present, is compiled into the
/// definitions table; the rest of the source compiles as the root node.
///
/// # Errors
///
/// Returns a [`CompileError`] when the source uses unsupported or
/// malformed keywords.
pub fn compile(source: &Value) -> Result<CompiledSchema, CompileError> {
    let map = source
        .as_object()
        .ok_or_else(|| CompileError::NotAMapping(value_type_name(source)))?;

    // `definitions` is a top-level-only keyword; the root fragment compiles
    // without it.
    let root = if map.contains_key("definitions") {
        let mut stripped = map.clone();
        stripped.remove("definitions");
        compile_node(&Value::Object(stripped))?
    } else {
        compile_node(source)?
    };
    let mut schema = CompiledSchema::new(root);

    if let Some(definitions) = map.get("definitions") {
        let definitions = definitions
            .as_object()
            .ok_or(CompileError::InvalidKeyword {
                keyword: "definitions",
                expected: "a mapping of names to schemas",
            })?;
        for (name, def_source) in definitions {
            schema = schema.define(name.clone(), compile_node(def_source)?);
        }
    }

    Ok(schema)
}

/// Compiles one declarative schema fragment into a [`SchemaNode`].
pub fn compile_node(source: &Value) -> Result<SchemaNode, CompileError> {
    let map = source
        .as_object()
        .ok_or_else(|| CompileError::NotAMapping(value_type_name(source)))?;

    if let Some(target) = map.get("$ref") {
        check_keywords(map, &["$ref", "default"], "$ref")?;
        let target = target.as_str().ok_or(CompileError::InvalidKeyword {
            keyword: "$ref",
            expected: "a string",
        })?;
        let name = target
            .strip_prefix(REF_PREFIX)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| CompileError::UnsupportedRef(target.to_string()))?;
        return Ok(Schema::ref_(name));
    }

    if let Some(literal) = map.get("const") {
        check_keywords(map, &["const", "default", "type"], "const")?;
        let mut node = ConstNode::new(literal.clone());
        if let Some(default) = map.get("default") {
            if default != literal {
                return Err(CompileError::ConstDefaultMismatch {
                    constant: literal.clone(),
                    default: default.clone(),
                });
            }
            node = node.injected();
        }
        return Ok(node.into());
    }

    let type_name = match map.get("type") {
        Some(Value::String(name)) => name.as_str(),
        Some(_) => {
            return Err(CompileError::InvalidKeyword {
                keyword: "type",
                expected: "a string",
            })
        }
        None => return Err(CompileError::MissingType),
    };

    match type_name {
        "object" => compile_object(map),
        "string" => compile_string(map),
        "array" => compile_array(map),
        other => Err(CompileError::UnsupportedType(other.to_string())),
    }
}

/// Rejects any keyword outside the set a node kind models.
///
/// A dropped keyword would compile into a schema weaker than its source
/// declares, so compilation fails closed instead.
fn check_keywords(
    map: &serde_json::Map<String, Value>,
    allowed: &[&str],
    kind: &'static str,
) -> Result<(), CompileError> {
    for keyword in map.keys() {
        if !allowed.contains(&keyword.as_str()) {
            return Err(CompileError::UnsupportedKeyword {
                keyword: keyword.clone(),
                kind,
            });
        }
    }
    Ok(())
}

fn compile_object(map: &serde_json::Map<String, Value>) -> Result<SchemaNode, CompileError> {
    // A schema-valued additionalProperties with no declared properties is an
    // open value map; combined with properties or required it is unsupported.
    if let Some(additional) = map.get("additionalProperties") {
        match additional {
            Value::Object(_) => {
                if map.contains_key("properties") || map.contains_key("required") {
                    return Err(CompileError::MixedProperties);
                }
                check_keywords(map, &["type", "additionalProperties", "default"], "map")?;
                return Ok(Schema::map(compile_node(additional)?).into());
            }
            Value::Bool(true) => {}
            _ => {
                return Err(CompileError::InvalidKeyword {
                    keyword: "additionalProperties",
                    expected: "a schema or true",
                })
            }
        }
    }

    check_keywords(
        map,
        &[
            "type",
            "properties",
            "required",
            "additionalProperties",
            "default",
        ],
        "object",
    )?;

    let mut node = ObjectNode::new();

    if let Some(properties) = map.get("properties") {
        let properties = properties.as_object().ok_or(CompileError::InvalidKeyword {
            keyword: "properties",
            expected: "a mapping of names to schemas",
        })?;
        for (name, prop_source) in properties {
            let field = compile_node(prop_source)?;
            // Const fields carry their own default; everything else stores
            // its declared default on the enclosing object.
            if !matches!(field, SchemaNode::Const(_)) {
                if let Some(default) = prop_source.get("default") {
                    node = node.default_value(name.clone(), default.clone());
                }
            }
            node = node.field(name.clone(), field);
        }
    }

    if let Some(required) = map.get("required") {
        let required = required.as_array().ok_or(CompileError::InvalidKeyword {
            keyword: "required",
            expected: "an array of field names",
        })?;
        for name in required {
            let name = name.as_str().ok_or(CompileError::InvalidKeyword {
                keyword: "required",
                expected: "an array of field names",
            })?;
            node = node.require(name);
        }
    }

    Ok(node.into())
}

fn compile_string(map: &serde_json::Map<String, Value>) -> Result<SchemaNode, CompileError> {
    check_keywords(map, &["type", "pattern", "default"], "string")?;

    let mut node = StringNode::new();

    if let Some(pattern) = map.get("pattern") {
        let pattern = pattern.as_str().ok_or(CompileError::InvalidKeyword {
            keyword: "pattern",
            expected: "a string",
        })?;
        node = node
            .pattern(pattern)
            .map_err(|source| CompileError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
    }

    Ok(node.into())
}

fn compile_array(map: &serde_json::Map<String, Value>) -> Result<SchemaNode, CompileError> {
    check_keywords(map, &["type", "items", "uniqueItems", "default"], "array")?;

    let items = map.get("items").ok_or(CompileError::MissingItems)?;
    let mut node = ArrayNode::new(compile_node(items)?);

    if let Some(unique) = map.get("uniqueItems") {
        match unique {
            Value::Bool(true) => node = node.unique(),
            Value::Bool(false) => {}
            _ => {
                return Err(CompileError::InvalidKeyword {
                    keyword: "uniqueItems",
                    expected: "a boolean",
                })
            }
        }
    }

    Ok(node.into())
}
