//! DOM-like document model produced by a [`DomParser`](super::DomParser).
//!
//! This is the raw, unnormalized shape of a document: every element with its
//! attributes in source order, and every text run, comment and processing
//! instruction as it appeared. The tree builder normalizes it into
//! [`TreeNode`](crate::node::TreeNode)s.

/// A child of a DOM element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomNode {
    /// A nested element.
    Element(DomElement),
    /// A run of character data, untrimmed, entities already resolved.
    Text(String),
    /// A comment.
    Comment(String),
    /// A processing instruction.
    ProcessingInstruction(String),
}

impl DomNode {
    /// Returns the element, if this is an element node.
    pub fn as_element(&self) -> Option<&DomElement> {
        match self {
            DomNode::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the character data, if this is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DomNode::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// An element with its qualified name, attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// The qualified name (e.g., "item", "ns:item").
    name: String,
    /// Attributes in source order.
    attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    children: Vec<DomNode>,
}

impl DomElement {
    /// Creates an element with no attributes and no children.
    pub fn new(name: impl Into<String>) -> Self {
        DomElement {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute and returns the element.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Appends a child and returns the element.
    pub fn with_child(mut self, child: DomNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child.
    pub fn push_child(&mut self, child: DomNode) {
        self.children.push(child);
    }

    /// Returns the qualified name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name without any namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Returns the attributes in source order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns the value of the named attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns all child nodes.
    pub fn children(&self) -> &[DomNode] {
        &self.children
    }

    /// Iterates over child elements only.
    pub fn child_elements(&self) -> impl Iterator<Item = &DomElement> {
        self.children.iter().filter_map(DomNode::as_element)
    }

    /// Returns true if the element has no child elements.
    pub fn is_leaf(&self) -> bool {
        self.child_elements().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name_strips_prefix() {
        assert_eq!(DomElement::new("ns:item").local_name(), "item");
        assert_eq!(DomElement::new("item").local_name(), "item");
    }

    #[test]
    fn test_leaf_ignores_text_and_comments() {
        let element = DomElement::new("a")
            .with_child(DomNode::Text("hello".to_string()))
            .with_child(DomNode::Comment("note".to_string()));
        assert!(element.is_leaf());

        let parent = element.with_child(DomNode::Element(DomElement::new("b")));
        assert!(!parent.is_leaf());
        assert_eq!(parent.child_elements().count(), 1);
    }

    #[test]
    fn test_attribute_lookup() {
        let element = DomElement::new("a")
            .with_attribute("id", "1")
            .with_attribute("name", "x");
        assert_eq!(element.attribute("name"), Some("x"));
        assert_eq!(element.attribute("key"), None);
    }
}
