//! String schema node.
//!
//! This module provides [`StringNode`] for string values with an optional
//! anchored regex pattern.

use regex::Regex;
use serde_json::{json, Value};

/// A compiled, anchored pattern constraint.
///
/// The declared pattern is compiled wrapped in `\A(?:...)\z` so a match must
/// cover the whole string, regardless of whether the source carried its own
/// anchors.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    source: String,
}

impl Pattern {
    /// Compiles an anchored pattern from the declared source.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(r"\A(?:{})\z", source))?;
        Ok(Self {
            regex,
            source: source.to_string(),
        })
    }

    /// Returns true when the whole string matches the pattern.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// Returns the pattern as declared, without the anchoring wrapper.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A schema node for string values.
///
/// Validates that the value is a string and, when a pattern is declared,
/// that the whole string matches it. The type check always precedes the
/// pattern check.
///
/// # Example
///
/// ```rust
/// use veridoc::Schema;
///
/// let project_id = Schema::string().pattern("^project-[a-z]{24}$").unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringNode {
    pattern: Option<Pattern>,
}

impl StringNode {
    /// Creates a new string node with no pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an anchored pattern constraint.
    ///
    /// Returns an error if the regex source is invalid.
    pub fn pattern(mut self, source: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(Pattern::new(source)?);
        Ok(self)
    }

    /// Returns the pattern constraint, if declared.
    pub fn pattern_ref(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    /// Renders this node into its declarative source form.
    pub fn to_source(&self) -> Value {
        match &self.pattern {
            Some(pattern) => json!({"type": "string", "pattern": pattern.source()}),
            None => json!({"type": "string"}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_is_anchored() {
        let pattern = Pattern::new("[a-z]+").unwrap();
        assert!(pattern.is_match("abc"));
        assert!(!pattern.is_match("abc1"));
        assert!(!pattern.is_match("1abc"));
    }

    #[test]
    fn test_explicit_anchors_still_work() {
        let pattern = Pattern::new("^project-[a-z]{24}$").unwrap();
        assert!(pattern.is_match("project-abcdefghijklmnopqrstuvwx"));
        assert!(!pattern.is_match("project-abc"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(StringNode::new().pattern("[unclosed").is_err());
    }

    #[test]
    fn test_to_source_keeps_declared_pattern() {
        let node = StringNode::new().pattern("[a-z]+").unwrap();
        assert_eq!(
            node.to_source(),
            json!({"type": "string", "pattern": "[a-z]+"})
        );
    }
}
