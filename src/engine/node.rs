//! Parse-tree nodes
//!
//! The intermediate tree built during matching, discarded once folded into
//! the final AST by [`super::postprocess`].

use serde::Serialize;

/// Properties the post-processor consumes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NodeProperties {
    pub is_entry: bool,
    pub is_abstract: bool,
    /// Key under which the node lands in its parent's shaped contents;
    /// `None` defaults to the node's own name during shaping
    pub alias: Option<String>,
}

/// One node of the raw parse tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseTreeNode {
    pub name: String,
    pub value: Option<String>,
    pub children: Vec<ParseTreeNode>,
    pub properties: NodeProperties,
}

impl ParseTreeNode {
    pub fn new(
        name: impl Into<String>,
        value: Option<String>,
        children: Vec<ParseTreeNode>,
        properties: NodeProperties,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            children,
            properties,
        }
    }

    /// A childless node carrying a matched value.
    pub fn leaf(name: impl Into<String>, value: Option<String>, alias: Option<String>) -> Self {
        Self::new(
            name,
            value,
            Vec::new(),
            NodeProperties {
                alias,
                ..NodeProperties::default()
            },
        )
    }

    /// The abstract wrapper quantifiers collect repetitions into; removed
    /// by flattening.
    pub fn list(children: Vec<ParseTreeNode>) -> Self {
        Self::new(
            "List",
            None,
            children,
            NodeProperties {
                is_abstract: true,
                ..NodeProperties::default()
            },
        )
    }
}
