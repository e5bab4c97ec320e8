//! Schema node definitions.
//!
//! A schema is a tree of [`SchemaNode`] values built once (from builders or
//! from a declarative source via [`crate::compile`]), immutable thereafter,
//! and shared read-only across validation calls.
//!
//! # Example
//!
//! ```rust
//! use veridoc::Schema;
//!
//! let node = Schema::object()
//!     .field("name", Schema::string().pattern("^[a-z-]+$").unwrap())
//!     .field("labels", Schema::map(Schema::string()))
//!     .require("name");
//! ```

mod array;
mod constant;
mod map;
mod object;
mod string;

pub use array::ArrayNode;
pub use constant::ConstNode;
pub use map::MapNode;
pub use object::ObjectNode;
pub use string::{Pattern, StringNode};

use serde_json::{json, Value};

/// One rule in the declarative validation tree.
///
/// Each variant describes how one value in the document must be shaped.
/// Nodes nest: an object's fields, an array's elements, and a map's values
/// are themselves schema nodes. `Ref` names another top-level definition,
/// enabling shared and recursive schemas.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// A mapping with declared fields, required-field set, and defaults.
    Object(ObjectNode),
    /// A field constrained to one exact literal value.
    Const(ConstNode),
    /// A string, optionally constrained by an anchored pattern.
    String(StringNode),
    /// A sequence whose elements share one schema.
    Array(ArrayNode),
    /// An open-ended mapping whose values share one schema.
    Map(MapNode),
    /// A named reference to a top-level definition.
    Ref(String),
}

impl SchemaNode {
    /// Renders this node back into its declarative source form.
    ///
    /// The output is accepted by [`crate::compile::compile_node`] and is the
    /// fragment attached to validation errors.
    pub fn to_source(&self) -> Value {
        match self {
            SchemaNode::Object(node) => node.to_source(),
            SchemaNode::Const(node) => node.to_source(),
            SchemaNode::String(node) => node.to_source(),
            SchemaNode::Array(node) => node.to_source(),
            SchemaNode::Map(node) => node.to_source(),
            SchemaNode::Ref(name) => json!({ "$ref": format!("#/definitions/{}", name) }),
        }
    }

    /// Collects the names of all definitions referenced from this subtree.
    pub fn collect_refs(&self, refs: &mut Vec<String>) {
        match self {
            SchemaNode::Object(node) => {
                for schema in node.fields().values() {
                    schema.collect_refs(refs);
                }
            }
            SchemaNode::Array(node) => node.items().collect_refs(refs),
            SchemaNode::Map(node) => node.values().collect_refs(refs),
            SchemaNode::Ref(name) => refs.push(name.clone()),
            SchemaNode::Const(_) | SchemaNode::String(_) => {}
        }
    }
}

impl From<ObjectNode> for SchemaNode {
    fn from(node: ObjectNode) -> Self {
        SchemaNode::Object(node)
    }
}

impl From<ConstNode> for SchemaNode {
    fn from(node: ConstNode) -> Self {
        SchemaNode::Const(node)
    }
}

impl From<StringNode> for SchemaNode {
    fn from(node: StringNode) -> Self {
        SchemaNode::String(node)
    }
}

impl From<ArrayNode> for SchemaNode {
    fn from(node: ArrayNode) -> Self {
        SchemaNode::Array(node)
    }
}

impl From<MapNode> for SchemaNode {
    fn from(node: MapNode) -> Self {
        SchemaNode::Map(node)
    }
}

/// Entry point for building schema nodes.
///
/// `Schema` provides factory methods for each node kind. Builders return the
/// concrete node type so kind-specific constraints chain naturally; every
/// node converts into [`SchemaNode`] where one is expected.
///
/// # Example
///
/// ```rust
/// use veridoc::Schema;
/// use serde_json::json;
///
/// let deployment = Schema::object()
///     .field("kind", Schema::constant(json!("Deployment")).injected())
///     .field("guid", Schema::ref_("Uuid"))
///     .field("labels", Schema::map(Schema::string()))
///     .require("guid");
/// ```
pub struct Schema;

impl Schema {
    /// Creates a new object node with no declared fields.
    pub fn object() -> ObjectNode {
        ObjectNode::new()
    }

    /// Creates a new string node with no pattern.
    pub fn string() -> StringNode {
        StringNode::new()
    }

    /// Creates a new const node demanding the given literal.
    pub fn constant(value: Value) -> ConstNode {
        ConstNode::new(value)
    }

    /// Creates a new array node whose elements validate against `items`.
    pub fn array(items: impl Into<SchemaNode>) -> ArrayNode {
        ArrayNode::new(items)
    }

    /// Creates a new string-map node whose values validate against `values`.
    pub fn map(values: impl Into<SchemaNode>) -> MapNode {
        MapNode::new(values)
    }

    /// Creates a reference to the named top-level definition.
    pub fn ref_(name: impl Into<String>) -> SchemaNode {
        SchemaNode::Ref(name.into())
    }
}
