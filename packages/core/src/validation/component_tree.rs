//! Component Tree Validation
//!
//! Confirms an untyped, client-submitted JSON value is a well-formed component
//! tree before it is ever persisted. The walk keeps its own stack of
//! `(node, depth)` pairs, so the depth bound does not depend on the host call
//! stack. Nodes are visited in document order and the first failure is
//! returned (fail-fast).
//!
//! # Examples
//!
//! ```rust
//! use pagecraft_core::validation::ComponentTreeValidator;
//! use serde_json::json;
//!
//! let validator = ComponentTreeValidator::new();
//! let hero = json!({ "type": "Hero", "id": "hero-1", "props": {} });
//! assert!(validator.validate(Some(&hero), 0).is_ok());
//!
//! let bogus = json!({ "type": "Bogus", "id": "x", "props": {} });
//! assert!(validator.validate(Some(&bogus), 0).is_err());
//! ```

use crate::models::{ComponentType, ValidationError};
use serde_json::Value;

/// Deepest allowed nesting level; the root sits at depth 0
pub const MAX_COMPONENT_DEPTH: usize = 10;

/// Structural validator for component trees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentTreeValidator {
    max_depth: usize,
}

impl Default for ComponentTreeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentTreeValidator {
    pub fn new() -> Self {
        Self {
            max_depth: MAX_COMPONENT_DEPTH,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Validate `node` (and everything below it) as if it sat at `depth`.
    ///
    /// `None` and JSON `null` are both "missing node".
    pub fn validate(&self, node: Option<&Value>, depth: usize) -> Result<(), ValidationError> {
        let mut pending: Vec<(Option<&Value>, usize)> = vec![(node, depth)];

        while let Some((node, depth)) = pending.pop() {
            if let Some(children) = self.check_node(node, depth)? {
                // Reverse push keeps siblings in document order
                for child in children.iter().rev() {
                    pending.push((Some(child), depth + 1));
                }
            }
        }

        Ok(())
    }

    /// Validate each root-level component of a page, stopping at the first failure
    pub fn validate_components(&self, components: &[Value]) -> Result<(), ValidationError> {
        components
            .iter()
            .try_for_each(|component| self.validate(Some(component), 0))
    }

    /// Check a single node's own fields and hand back its children, if any
    fn check_node<'a>(
        &self,
        node: Option<&'a Value>,
        depth: usize,
    ) -> Result<Option<&'a Vec<Value>>, ValidationError> {
        if depth > self.max_depth {
            return Err(ValidationError::NestingTooDeep {
                max: self.max_depth,
            });
        }

        let node = match node {
            None | Some(Value::Null) => return Err(ValidationError::MissingNode),
            Some(node) => node,
        };

        match node.get("type") {
            None | Some(Value::Null) => return Err(ValidationError::MissingType),
            Some(Value::String(t)) if t.is_empty() => return Err(ValidationError::MissingType),
            Some(Value::String(t)) => {
                t.parse::<ComponentType>()?;
            }
            Some(other) => return Err(ValidationError::InvalidType(other.to_string())),
        }

        match node.get("id") {
            Some(Value::String(id)) if !id.is_empty() => {}
            _ => return Err(ValidationError::MissingId),
        }

        if !matches!(node.get("props"), Some(Value::Object(_))) {
            return Err(ValidationError::MissingProps);
        }

        match node.get("children") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(children)) => Ok(Some(children)),
            Some(_) => Err(ValidationError::ChildrenNotSequence),
        }
    }
}
