//! XML parsing into a DOM-like tree.
//!
//! The tree builder never reaches for a parser on its own; it is handed a
//! [`DomParser`]. [`QuickXmlParser`] is the default implementation.

mod dom;
mod parser;

pub use dom::{DomElement, DomNode};
pub use parser::QuickXmlParser;

/// A well-formedness checking XML parser.
///
/// Implementations turn markup into a [`DomElement`] for the document
/// element, or return the parser's own diagnostic text. The diagnostic is
/// cleaned up and truncated by the caller, so implementations may return it
/// verbatim.
pub trait DomParser {
    /// Parses a complete document and returns its root element.
    fn parse_document(&self, xml: &str) -> std::result::Result<DomElement, String>;
}

impl<P: DomParser + ?Sized> DomParser for &P {
    fn parse_document(&self, xml: &str) -> std::result::Result<DomElement, String> {
        (**self).parse_document(xml)
    }
}
