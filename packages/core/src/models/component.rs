//! Component Tree Data Structures
//!
//! A page's content is an ordered sequence of `ComponentNode`s. Each node has
//! a type drawn from a closed set, an author-chosen id, an opaque `props`
//! mapping and an optional ordered list of children.
//!
//! # Examples
//!
//! ```rust
//! use pagecraft_core::models::{ComponentNode, ComponentType};
//! use serde_json::json;
//!
//! let card = ComponentNode::new(
//!     ComponentType::ArticleCard,
//!     "article-1",
//!     json!({ "title": "Hello" }).as_object().cloned().unwrap_or_default(),
//! );
//! let list = ComponentNode::new(ComponentType::ArticleList, "list-1", Default::default())
//!     .with_children(vec![card]);
//!
//! assert_eq!(list.depth(), 1);
//! ```

use crate::models::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The closed set of component types the renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    Hero,
    ArticleCard,
    ArticleList,
    Section,
    Text,
    Image,
    Container,
}

impl ComponentType {
    /// Every accepted type, in declaration order
    pub const ALL: [ComponentType; 7] = [
        ComponentType::Hero,
        ComponentType::ArticleCard,
        ComponentType::ArticleList,
        ComponentType::Section,
        ComponentType::Text,
        ComponentType::Image,
        ComponentType::Container,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Hero => "Hero",
            ComponentType::ArticleCard => "ArticleCard",
            ComponentType::ArticleList => "ArticleList",
            ComponentType::Section => "Section",
            ComponentType::Text => "Text",
            ComponentType::Image => "Image",
            ComponentType::Container => "Container",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = ValidationError;

    /// Matching is exact: `"hero"` is not `Hero`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidType(s.to_string()))
    }
}

/// A typed node in a page's content tree.
///
/// `props` is opaque: any JSON object is accepted and its key order is kept
/// through persistence. `children` distinguishes "absent" from "empty".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub id: String,
    pub props: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ComponentNode>>,
}

impl ComponentNode {
    pub fn new(component_type: ComponentType, id: impl Into<String>, props: Map<String, Value>) -> Self {
        Self {
            component_type,
            id: id.into(),
            props,
            children: None,
        }
    }

    /// Builder-style helper replacing this node's children
    pub fn with_children(mut self, children: Vec<ComponentNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// Depth of the deepest descendant, with this node at depth 0
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0usize)];

        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            if let Some(children) = &node.children {
                pending.extend(children.iter().map(|child| (child, depth + 1)));
            }
        }

        deepest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn component_type_parses_exact_names_only() {
        assert_eq!("Hero".parse::<ComponentType>().unwrap(), ComponentType::Hero);
        assert_eq!(
            "ArticleList".parse::<ComponentType>().unwrap(),
            ComponentType::ArticleList
        );
        assert!(matches!(
            "hero".parse::<ComponentType>(),
            Err(ValidationError::InvalidType(t)) if t == "hero"
        ));
    }

    #[test]
    fn node_serializes_type_field_and_omits_absent_children() {
        let node = ComponentNode::new(
            ComponentType::Text,
            "text-1",
            json!({ "body": "hi" }).as_object().cloned().unwrap(),
        );

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value, json!({ "type": "Text", "id": "text-1", "props": { "body": "hi" } }));
    }

    #[test]
    fn empty_children_survive_serialization() {
        let node = ComponentNode::new(ComponentType::Section, "s", Map::new()).with_children(vec![]);
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["children"], json!([]));

        let back: ComponentNode = serde_json::from_value(value).unwrap();
        assert_eq!(back.children, Some(vec![]));
    }

    #[test]
    fn depth_counts_root_as_zero() {
        let leaf = ComponentNode::new(ComponentType::Text, "leaf", Map::new());
        assert_eq!(leaf.depth(), 0);

        let tree = ComponentNode::new(ComponentType::Container, "outer", Map::new()).with_children(vec![
            ComponentNode::new(ComponentType::Text, "a", Map::new()),
            ComponentNode::new(ComponentType::Section, "b", Map::new())
                .with_children(vec![ComponentNode::new(ComponentType::Image, "c", Map::new())]),
        ]);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn props_keep_insertion_order() {
        let raw = r#"{"type":"Hero","id":"h","props":{"zeta":1,"alpha":2,"mid":3}}"#;
        let node: ComponentNode = serde_json::from_str(raw).unwrap();
        let keys: Vec<&str> = node.props.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(serde_json::to_string(&node).unwrap(), raw);
    }
}
