//! quick-xml backed DOM parser.
//!
//! This parser uses quick-xml's streaming API with an explicit element stack,
//! so document depth does not consume call stack.

use std::mem;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{DomElement, DomNode, DomParser};

/// Default parser, built on quick-xml.
///
/// Checks that end tags match their start tags, that exactly one document
/// element exists, that no element is left open at end of input, and that no
/// character data appears outside the document element. Predefined and
/// character entity references are resolved; anything else is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickXmlParser;

impl QuickXmlParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        QuickXmlParser
    }
}

impl DomParser for QuickXmlParser {
    fn parse_document(&self, xml: &str) -> std::result::Result<DomElement, String> {
        let mut reader = Reader::from_str(xml);
        // Don't trim text - the builder trims each fragment itself
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        let mut state = DocumentState::default();

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(format!("{} at position {}", e, reader.error_position()));
                }
            };

            match event {
                Event::Start(ref e) => {
                    state.flush_text()?;
                    let element = read_element(e, &reader)?;
                    state.open(element)?;
                }
                Event::End(_) => {
                    state.flush_text()?;
                    state.close()?;
                }
                Event::Empty(ref e) => {
                    state.flush_text()?;
                    let element = read_element(e, &reader)?;
                    state.attach(element)?;
                }
                Event::Text(e) => {
                    let raw = std::str::from_utf8(e.as_ref()).map_err(|e| e.to_string())?;
                    let text = unescape(raw).map_err(|e| e.to_string())?;
                    state.text.push_str(&text);
                }
                Event::GeneralRef(e) => {
                    // Entity references split text events; they belong to the same run
                    let name = std::str::from_utf8(e.as_ref()).map_err(|e| e.to_string())?;
                    let reference = format!("&{};", name);
                    let resolved = unescape(&reference).map_err(|e| e.to_string())?;
                    state.text.push_str(&resolved);
                }
                Event::CData(e) => {
                    state.flush_text()?;
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    state.push_inside("CDATA section", DomNode::Text(text))?;
                }
                Event::Comment(e) => {
                    state.flush_text()?;
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    state.push_optional(DomNode::Comment(text));
                }
                Event::PI(e) => {
                    state.flush_text()?;
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    state.push_optional(DomNode::ProcessingInstruction(text));
                }
                Event::Decl(_) | Event::DocType(_) => {
                    state.flush_text()?;
                }
                Event::Eof => break,
            }
        }

        state.finish()
    }
}

/// Parse state: open elements, pending character data, finished root.
#[derive(Default)]
struct DocumentState {
    stack: Vec<DomElement>,
    root: Option<DomElement>,
    text: String,
}

impl DocumentState {
    /// Turns accumulated character data into a text node.
    fn flush_text(&mut self) -> std::result::Result<(), String> {
        if self.text.is_empty() {
            return Ok(());
        }
        let text = mem::take(&mut self.text);
        match self.stack.last_mut() {
            Some(parent) => {
                parent.push_child(DomNode::Text(text));
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err("text content is not allowed outside the root element".to_string()),
        }
    }

    fn open(&mut self, element: DomElement) -> std::result::Result<(), String> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(format!(
                "unexpected element <{}> after the root element",
                element.name()
            ));
        }
        self.stack.push(element);
        Ok(())
    }

    fn close(&mut self) -> std::result::Result<(), String> {
        match self.stack.pop() {
            Some(element) => self.attach(element),
            None => Err("unexpected end tag with no open element".to_string()),
        }
    }

    /// Attaches a complete element to its parent, or makes it the root.
    fn attach(&mut self, element: DomElement) -> std::result::Result<(), String> {
        if let Some(parent) = self.stack.last_mut() {
            parent.push_child(DomNode::Element(element));
            return Ok(());
        }
        if self.root.is_some() {
            return Err(format!(
                "unexpected element <{}> after the root element",
                element.name()
            ));
        }
        self.root = Some(element);
        Ok(())
    }

    /// Adds a node that is only legal inside an element.
    fn push_inside(&mut self, what: &str, node: DomNode) -> std::result::Result<(), String> {
        match self.stack.last_mut() {
            Some(parent) => {
                parent.push_child(node);
                Ok(())
            }
            None => Err(format!("{} is not allowed outside the root element", what)),
        }
    }

    /// Adds a node inside the current element; dropped at document level.
    fn push_optional(&mut self, node: DomNode) {
        if let Some(parent) = self.stack.last_mut() {
            parent.push_child(node);
        }
    }

    fn finish(mut self) -> std::result::Result<DomElement, String> {
        self.flush_text()?;
        if let Some(open) = self.stack.last() {
            return Err(format!("unclosed element <{}> at end of input", open.name()));
        }
        self.root.ok_or_else(|| "no root element found".to_string())
    }
}

/// Reads an element's name and attributes.
fn read_element(
    e: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
) -> std::result::Result<DomElement, String> {
    let name = reader
        .decoder()
        .decode(e.name().as_ref())
        .map_err(|e| e.to_string())?
        .into_owned();

    let mut element = DomElement::new(name);
    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| format!("attribute error: {}", e))?;
        let key = reader
            .decoder()
            .decode(attr.key.as_ref())
            .map_err(|e| e.to_string())?
            .into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| e.to_string())?
            .into_owned();
        element = element.with_attribute(key, value);
    }

    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> std::result::Result<DomElement, String> {
        QuickXmlParser.parse_document(xml)
    }

    #[test]
    fn test_parse_simple_xml() {
        let root = parse(r#"<root><child>text</child></root>"#).unwrap();
        assert_eq!(root.name(), "root");
        assert_eq!(root.children().len(), 1);

        let child = root.child_elements().next().unwrap();
        assert_eq!(child.name(), "child");
        assert_eq!(child.children()[0].as_text(), Some("text"));
    }

    #[test]
    fn test_parse_with_attributes() {
        let root = parse(r#"<root id="foo" class="a &amp; b">content</root>"#).unwrap();
        assert_eq!(root.attribute("id"), Some("foo"));
        assert_eq!(root.attribute("class"), Some("a & b"));
    }

    #[test]
    fn test_entities_stay_in_one_text_run() {
        let root = parse("<root>fish &amp; chips &#x41;</root>").unwrap();
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].as_text(), Some("fish & chips A"));
    }

    #[test]
    fn test_cdata_and_comments() {
        let root = parse("<root><!-- note --><![CDATA[<raw>]]></root>").unwrap();
        assert_eq!(
            root.children(),
            &[
                DomNode::Comment(" note ".to_string()),
                DomNode::Text("<raw>".to_string()),
            ]
        );
    }

    #[test]
    fn test_prolog_is_ignored() {
        let xml = "<?xml version=\"1.0\"?>\n<!-- header -->\n<root/>\n";
        let root = parse(xml).unwrap();
        assert_eq!(root.name(), "root");
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_unclosed_element() {
        let err = parse("<root><unclosed>").unwrap_err();
        assert!(err.contains("unclosed"), "{}", err);
    }

    #[test]
    fn test_mismatched_end_tag() {
        assert!(parse("<root><a></b></root>").is_err());
    }

    #[test]
    fn test_unknown_entity() {
        assert!(parse("<root>&bogus;</root>").is_err());
    }

    #[test]
    fn test_entity_only_text() {
        let root = parse("<root><a>&lt;</a><b>&#38;&quot;</b></root>").unwrap();
        let texts: Vec<Option<&str>> = root
            .child_elements()
            .map(|child| child.children()[0].as_text())
            .collect();
        assert_eq!(texts, vec![Some("<"), Some("&\"")]);
    }

    #[test]
    fn test_multiple_roots() {
        let err = parse("<a/><b/>").unwrap_err();
        assert!(err.contains("after the root element"), "{}", err);
    }

    #[test]
    fn test_text_outside_root() {
        assert!(parse("<a/>trailing").is_err());
        assert!(parse("leading<a/>").is_err());
    }

    #[test]
    fn test_no_root() {
        let err = parse("<!-- only a comment -->").unwrap_err();
        assert_eq!(err, "no root element found");
    }
}
