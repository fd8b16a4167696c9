//! XML text to element tree
//!
//! Event-driven parse via quick-xml. Comments, processing instructions,
//! and the incoming declaration are dropped; the serializer emits a fresh
//! declaration.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::element::{Element, XmlNode};
use crate::error::{SdfError, SdfResult};

/// Parse an XML document into its root element
pub fn parse_document(xml: &str) -> SdfResult<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if root.is_some() && stack.is_empty() {
                    return Err(malformed("multiple root elements"));
                }
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.push_child(XmlNode::Element(element)),
                    None if root.is_none() => root = Some(element),
                    None => return Err(malformed("multiple root elements")),
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed("unexpected closing tag"))?;
                match stack.last_mut() {
                    Some(parent) => parent.push_child(XmlNode::Element(element)),
                    None if root.is_none() => root = Some(element),
                    None => return Err(malformed("multiple root elements")),
                }
            }
            Event::Text(text) => {
                let value = text.unescape()?;
                match stack.last_mut() {
                    Some(parent) => parent.push_child(XmlNode::Text(value.into_owned())),
                    None if value.trim().is_empty() => {}
                    None => return Err(malformed("text outside of the document root")),
                }
            }
            Event::CData(data) => {
                let value = String::from_utf8(data.to_vec())?;
                if let Some(parent) = stack.last_mut() {
                    parent.push_child(XmlNode::Text(value));
                }
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctypes
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(malformed("unclosed element"));
    }

    root.ok_or_else(|| malformed("no root element"))
}

fn element_from_start(start: &BytesStart) -> SdfResult<Element> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(tag);

    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.set_attribute(key, value);
    }

    Ok(element)
}

fn malformed(message: &str) -> SdfError {
    SdfError::Malformed(message.to_string())
}
