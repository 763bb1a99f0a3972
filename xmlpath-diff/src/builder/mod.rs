//! Tree builder: XML text to a normalized [`TreeNode`].
//!
//! Building is a single pass: validate the input, parse it with the injected
//! [`DomParser`], then walk the DOM assigning paths, copying attributes,
//! collecting direct text and deriving comparison keys. Either a full tree
//! or an error comes back, never a partial tree.

mod path;

pub use path::{child_path, index_suffix, sibling_positions, SiblingPosition};

use std::collections::BTreeMap;
use std::mem;

use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::constants::{ELLIPSIS, KEY_ATTRIBUTES, MAX_DIAGNOSTIC_CHARS, PATH_SEPARATOR};
use crate::error::{Error, Result, ValidationError};
use crate::node::{NodeFields, TreeNode};
use crate::settings::BuildSettings;
use crate::xml::{DomElement, DomParser, QuickXmlParser};

/// Builds path-addressed trees with an injected XML parser.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder<P: DomParser = QuickXmlParser> {
    parser: P,
}

impl<P: DomParser> TreeBuilder<P> {
    /// Creates a builder that parses with `parser`.
    pub fn new(parser: P) -> Self {
        TreeBuilder { parser }
    }

    /// Builds a tree from XML text.
    #[instrument(level = "debug", skip_all, fields(len = xml.len()))]
    pub fn build(&self, xml: &str, settings: &BuildSettings) -> Result<TreeNode> {
        if xml.trim().is_empty() {
            return Err(ValidationError::Empty.into());
        }

        let document = self
            .parser
            .parse_document(xml)
            .map_err(|diagnostic| Error::Parse(clean_diagnostic(&diagnostic)))?;

        let root_path = format!("{}{}", PATH_SEPARATOR, document.local_name());
        let position = SiblingPosition { index: 1, total: 1 };
        let tree = build_node(&document, root_path, position, settings);

        debug!(root = tree.path(), nodes = tree.node_count(), "built tree");
        Ok(tree)
    }

    /// Builds a tree from an untyped value, as received across a message
    /// boundary. Anything other than a JSON string is rejected.
    pub fn build_value(&self, input: &Value, settings: &BuildSettings) -> Result<TreeNode> {
        match input {
            Value::String(xml) => self.build(xml, settings),
            _ => Err(ValidationError::NotAString.into()),
        }
    }
}

/// Builds a tree from XML text using the default parser.
pub fn build_tree(xml: &str, settings: &BuildSettings) -> Result<TreeNode> {
    TreeBuilder::new(QuickXmlParser).build(xml, settings)
}

/// Builds one node and its descendants.
///
/// Uses an explicit stack of partly built nodes, so document depth does not
/// consume call stack.
fn build_node(
    element: &DomElement,
    path: String,
    position: SiblingPosition,
    settings: &BuildSettings,
) -> TreeNode {
    let mut open: Vec<PendingNode<'_>> = Vec::new();
    let mut current = PendingNode::new(element, path, position);

    loop {
        if let Some((child, child_position)) = current.pending.next() {
            let path = child_path(&current.path, child, child_position, settings);
            let next = PendingNode::new(child, path, child_position);
            open.push(mem::replace(&mut current, next));
            continue;
        }

        let node = current.finish();
        match open.pop() {
            Some(parent) => {
                current = parent;
                current.children.push(node);
            }
            None => return node,
        }
    }
}

/// A node whose children are still being built.
struct PendingNode<'a> {
    element: &'a DomElement,
    path: String,
    position: SiblingPosition,
    pending: std::vec::IntoIter<(&'a DomElement, SiblingPosition)>,
    children: Vec<TreeNode>,
}

impl<'a> PendingNode<'a> {
    fn new(element: &'a DomElement, path: String, position: SiblingPosition) -> Self {
        trace!(path = %path, "node");
        let child_elements: Vec<&DomElement> = element.child_elements().collect();
        let positions = sibling_positions(child_elements.iter().copied());
        let pending: Vec<_> = child_elements.into_iter().zip(positions).collect();
        PendingNode {
            element,
            path,
            position,
            children: Vec::with_capacity(pending.len()),
            pending: pending.into_iter(),
        }
    }

    fn finish(self) -> TreeNode {
        let element = self.element;
        let attributes: BTreeMap<String, String> = element
            .attributes()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        let fields = NodeFields {
            tag_name: element.local_name().to_string(),
            path: self.path,
            comparison_key: comparison_key(element),
            text_content: direct_text(element),
            attributes,
            sibling_index: self.position.index,
            sibling_total: self.position.total,
        };
        TreeNode::new(fields, self.children)
    }
}

/// Concatenates the trimmed text fragments directly under `element`.
fn direct_text(element: &DomElement) -> String {
    element
        .children()
        .iter()
        .filter_map(|child| child.as_text())
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Returns `tag[@attr="value"]` for the first identifying attribute, or `tag`.
fn comparison_key(element: &DomElement) -> String {
    let tag = element.local_name();
    KEY_ATTRIBUTES
        .iter()
        .find_map(|&name| {
            element
                .attribute(name)
                .map(|value| format!("{}[@{}=\"{}\"]", tag, name, value))
        })
        .unwrap_or_else(|| tag.to_string())
}

/// Collapses whitespace runs to one space and truncates to the diagnostic limit.
pub fn clean_diagnostic(diagnostic: &str) -> String {
    let collapsed = diagnostic.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_DIAGNOSTIC_CHARS {
        return collapsed;
    }
    let mut truncated: String = collapsed.chars().take(MAX_DIAGNOSTIC_CHARS - 1).collect();
    truncated.push(ELLIPSIS);
    truncated
}
