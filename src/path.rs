//! Location of a value inside a nested manifest.
//!
//! Every validation error points at the value that violated a rule.
//! [`ValuePath`] records that location as a chain of [`PathSegment`]s and
//! renders it in the dot-and-bracket form manifest tooling prints, with the
//! document root named `data`.

use std::fmt::{self, Display};

/// One step into a nested document: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Descent through a mapping key.
    Field(String),
    /// Descent into a sequence element.
    Index(usize),
}

impl PathSegment {
    /// Creates a field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates an index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// The location of a value in a nested document, used in error reporting.
///
/// Paths grow by copy: `push_field` and `push_index` leave the receiver
/// untouched and return the extended path, so sibling branches of the
/// validation walk never see each other's segments.
///
/// # Example
///
/// ```rust
/// use veridoc::ValuePath;
///
/// let root = ValuePath::root();
/// assert_eq!(root.to_string(), "data");
///
/// let device = root.push_field("spec").push_field("devices").push_index(3);
/// assert_eq!(device.to_string(), "data.spec.devices[3]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    /// The document root, rendered as `data`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns this path extended by a mapping key.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns this path extended by a sequence index.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Whether this path is the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The nesting depth (number of segments).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over the segments from the root outward.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
