//! AST post-processing
//!
//! The two passes applied to a successful top-level match:
//!
//! 1. **Abstract flattening** — a bottom-up functional rewrite in which any
//!    abstract child is replaced in place by its own children, repeatedly at
//!    the same level. Quantifier List wrappers fall out here too. Because
//!    the tree is rebuilt from the leaves up, a second application is a
//!    no-op by construction.
//! 2. **Alias/contents shaping** — every surviving node becomes an
//!    [`AstNode`]: leaves keep their value; interior nodes get an ordered
//!    contents map from alias to child. The first alias repetition promotes
//!    the slot from a scalar to an ordered list, preserving arrival order.
//!    With contents entries as a closed scalar-or-list variant, promotion
//!    is total and no further collision shape exists.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::node::ParseTreeNode;

/// A shaped AST node: a leaf with a value, or an interior node whose
/// children live in an ordered contents map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstNode {
    /// The producing production/terminal/literal name
    pub kind: String,
    pub value: Option<String>,
    pub contents: Option<Contents>,
}

impl AstNode {
    /// Convenience lookup into the contents map.
    pub fn get(&self, alias: &str) -> Option<&ContentsEntry> {
        self.contents.as_ref()?.get(alias)
    }
}

/// One slot of a contents map: a single child, or the ordered list a
/// repeated alias was promoted to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentsEntry {
    One(AstNode),
    Many(Vec<AstNode>),
}

/// Ordered alias → entry map; insertion order is arrival order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contents {
    entries: Vec<(String, ContentsEntry)>,
}

impl Contents {
    pub fn get(&self, alias: &str) -> Option<&ContentsEntry> {
        self.entries
            .iter()
            .find(|(key, _)| key == alias)
            .map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContentsEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Insert under `alias`: a free slot takes the node as a scalar, an
    /// occupied scalar slot is promoted to a list of both, a list appends.
    pub fn insert(&mut self, alias: String, node: AstNode) {
        match self.entries.iter().position(|(key, _)| *key == alias) {
            Some(pos) => {
                let slot = &mut self.entries[pos].1;
                let current = std::mem::replace(slot, ContentsEntry::Many(Vec::new()));
                *slot = match current {
                    ContentsEntry::One(first) => ContentsEntry::Many(vec![first, node]),
                    ContentsEntry::Many(mut nodes) => {
                        nodes.push(node);
                        ContentsEntry::Many(nodes)
                    }
                };
            }
            None => self.entries.push((alias, ContentsEntry::One(node))),
        }
    }
}

impl Serialize for Contents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

/// Pass 1: rebuild the tree with every abstract child spliced out, bottom
/// up. The root itself is never spliced, even when abstract.
pub fn flatten(node: ParseTreeNode) -> ParseTreeNode {
    let mut children: Vec<ParseTreeNode> = node.children.into_iter().map(flatten).collect();
    // A spliced-in child may itself be abstract; repeat at this level until
    // none remain.
    while children.iter().any(|child| child.properties.is_abstract) {
        children = children
            .into_iter()
            .flat_map(|child| {
                if child.properties.is_abstract {
                    child.children
                } else {
                    vec![child]
                }
            })
            .collect();
    }
    ParseTreeNode {
        children,
        ..node
    }
}

/// Pass 2: shape a flattened tree into the final AST.
pub fn shape(node: ParseTreeNode) -> AstNode {
    if node.children.is_empty() {
        return AstNode {
            kind: node.name,
            value: node.value,
            contents: None,
        };
    }
    let mut contents = Contents::default();
    for child in node.children {
        let alias = child
            .properties
            .alias
            .clone()
            .unwrap_or_else(|| child.name.clone());
        contents.insert(alias, shape(child));
    }
    AstNode {
        kind: node.name,
        value: node.value,
        contents: Some(contents),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::node::{NodeProperties, ParseTreeNode};

    fn leaf(name: &str, value: &str) -> ParseTreeNode {
        ParseTreeNode::leaf(name, Some(value.to_string()), None)
    }

    fn abstract_node(name: &str, children: Vec<ParseTreeNode>) -> ParseTreeNode {
        ParseTreeNode::new(
            name,
            None,
            children,
            NodeProperties {
                is_abstract: true,
                ..NodeProperties::default()
            },
        )
    }

    #[test]
    fn flatten_splices_abstract_children() {
        let tree = ParseTreeNode::new(
            "root",
            None,
            vec![abstract_node("wrapper", vec![leaf("a", "1"), leaf("b", "2")])],
            NodeProperties::default(),
        );
        let flat = flatten(tree);
        let names: Vec<&str> = flat.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn flatten_handles_nested_abstract_wrappers() {
        let tree = ParseTreeNode::new(
            "root",
            None,
            vec![abstract_node(
                "outer",
                vec![abstract_node("inner", vec![leaf("a", "1")]), leaf("b", "2")],
            )],
            NodeProperties::default(),
        );
        let flat = flatten(tree);
        let names: Vec<&str> = flat.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn flatten_is_idempotent() {
        let tree = ParseTreeNode::new(
            "root",
            None,
            vec![
                abstract_node("w", vec![leaf("a", "1")]),
                leaf("b", "2"),
            ],
            NodeProperties::default(),
        );
        let once = flatten(tree);
        let twice = flatten(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn abstract_root_survives() {
        let tree = abstract_node("root", vec![leaf("a", "1")]);
        let flat = flatten(tree);
        assert_eq!(flat.name, "root");
        assert_eq!(flat.children.len(), 1);
    }

    #[test]
    fn shape_defaults_alias_to_name() {
        let tree = ParseTreeNode::new(
            "root",
            None,
            vec![leaf("a", "1")],
            NodeProperties::default(),
        );
        let ast = shape(tree);
        match ast.get("a") {
            Some(ContentsEntry::One(child)) => assert_eq!(child.value.as_deref(), Some("1")),
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn repeated_alias_promotes_scalar_to_list_in_arrival_order() {
        let tree = ParseTreeNode::new(
            "root",
            None,
            vec![leaf("a", "1"), leaf("a", "2"), leaf("a", "3")],
            NodeProperties::default(),
        );
        let ast = shape(tree);
        match ast.get("a") {
            Some(ContentsEntry::Many(nodes)) => {
                let values: Vec<&str> =
                    nodes.iter().filter_map(|n| n.value.as_deref()).collect();
                assert_eq!(values, vec!["1", "2", "3"]);
            }
            other => panic!("expected promoted list, got {:?}", other),
        }
    }

    #[test]
    fn leaves_keep_value_and_have_no_contents() {
        let ast = shape(leaf("a", "1"));
        assert_eq!(ast.value.as_deref(), Some("1"));
        assert!(ast.contents.is_none());
    }

    #[test]
    fn contents_serialize_as_ordered_map() {
        let tree = ParseTreeNode::new(
            "root",
            None,
            vec![leaf("b", "2"), leaf("a", "1"), leaf("b", "3")],
            NodeProperties::default(),
        );
        let json = serde_json::to_string(&shape(tree)).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"root","value":null,"contents":{"b":[{"kind":"b","value":"2","contents":null},{"kind":"b","value":"3","contents":null}],"a":{"kind":"a","value":"1","contents":null}}}"#
        );
    }
}
