//! Normalized, path-addressed element tree.
//!
//! A [`TreeNode`] is built once by the [`TreeBuilder`](crate::TreeBuilder)
//! and never mutated afterwards. Only elements become nodes; the text
//! directly under an element is folded into its `text_content`.

mod iter;

pub use iter::DfsTreeIterator;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// One element of a built tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Local name of the element.
    tag_name: String,
    /// Root-anchored path, unique within the tree.
    path: String,
    /// Attribute name to value.
    attributes: BTreeMap<String, String>,
    /// Trimmed text directly under this element.
    text_content: String,
    /// Child elements in document order.
    children: Vec<TreeNode>,
    /// Display label: `tag` or `tag[@attr="value"]`.
    comparison_key: String,
    /// 1-based position among same-tag siblings.
    sibling_index: usize,
    /// Number of same-tag siblings, including this node.
    sibling_total: usize,
}

/// Per-node values computed by the builder.
#[derive(Debug, Clone)]
pub(crate) struct NodeFields {
    pub tag_name: String,
    pub path: String,
    pub attributes: BTreeMap<String, String>,
    pub text_content: String,
    pub comparison_key: String,
    pub sibling_index: usize,
    pub sibling_total: usize,
}

impl TreeNode {
    pub(crate) fn new(fields: NodeFields, children: Vec<TreeNode>) -> Self {
        TreeNode {
            tag_name: fields.tag_name,
            path: fields.path,
            attributes: fields.attributes,
            text_content: fields.text_content,
            children,
            comparison_key: fields.comparison_key,
            sibling_index: fields.sibling_index,
            sibling_total: fields.sibling_total,
        }
    }

    /// Returns the element's local name.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Returns the node's path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the attributes.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Returns the value of one attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns the direct text content.
    pub fn text_content(&self) -> &str {
        &self.text_content
    }

    /// Returns the child elements.
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Returns true if the node has no child elements.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the cosmetic comparison key.
    pub fn comparison_key(&self) -> &str {
        &self.comparison_key
    }

    /// Returns the 1-based index among same-tag siblings.
    pub fn sibling_index(&self) -> usize {
        self.sibling_index
    }

    /// Returns the number of same-tag siblings.
    pub fn sibling_total(&self) -> usize {
        self.sibling_total
    }

    /// Tests whether this node's own text and attributes equal `other`'s.
    ///
    /// Children are not considered.
    pub fn content_equals(&self, other: &TreeNode) -> bool {
        if self.text_content != other.text_content {
            return false;
        }
        if self.attributes.len() != other.attributes.len() {
            return false;
        }
        self.attributes
            .iter()
            .all(|(name, value)| other.attributes.get(name) == Some(value))
    }

    /// Iterates over this node and its descendants, parents first.
    pub fn iter(&self) -> DfsTreeIterator<'_> {
        DfsTreeIterator::new(self)
    }

    /// Looks up a node by exact path.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        self.iter().find(|node| node.path == path)
    }

    /// Returns every path in the tree.
    pub fn paths(&self) -> BTreeSet<String> {
        self.iter().map(|node| node.path.clone()).collect()
    }

    /// Returns the number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }
}

impl<'a> IntoIterator for &'a TreeNode {
    type Item = &'a TreeNode;
    type IntoIter = DfsTreeIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Looks up a node by exact path. Returns `None` when absent.
pub fn find_node<'a>(tree: &'a TreeNode, path: &str) -> Option<&'a TreeNode> {
    tree.find(path)
}

/// Returns the set of all paths in a tree.
pub fn all_paths(tree: &TreeNode) -> BTreeSet<String> {
    tree.paths()
}

/// Counts the nodes in a tree.
pub fn count_nodes(tree: &TreeNode) -> usize {
    tree.node_count()
}
