//! Element tree to XML text

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::element::{Element, XmlNode};
use crate::error::SdfResult;

/// Serialize an element tree to a standalone XML document
///
/// Emits an XML declaration with a UTF-8 encoding label. The output is
/// re-parseable and structurally equivalent to the input tree; childless
/// elements use the empty-element form.
pub fn serialize_document(root: &Element) -> SdfResult<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write_element(&mut writer, root)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> SdfResult<()> {
    let mut start = BytesStart::new(element.tag.as_str());
    for (key, value) in element.attributes() {
        start.push_attribute((key, value));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(nested) => write_element(writer, nested)?,
            XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.tag.as_str())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::parser::parse_document;

    #[test]
    fn test_serialize_emits_declaration() {
        let out = serialize_document(&Element::new("sdf")).unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(out.ends_with("<sdf/>"));
    }

    #[test]
    fn test_serialize_escapes_text_and_attributes() {
        let mut element = Element::new("plugin");
        element.set_attribute("filename", "lib&.so");
        element.push_child(XmlNode::Text("a < b".to_string()));

        let out = serialize_document(&element).unwrap();
        assert!(out.contains("filename=\"lib&amp;.so\""));
        assert!(out.contains("a &lt; b"));
    }

    #[test]
    fn test_structural_round_trip() {
        let xml = r#"
        <sdf version="1.6">
            <model name="actor">
                <pose>1 2 0 0 0 0</pose>
                <link name="body">
                    <collision name="c"/>
                </link>
            </model>
        </sdf>
        "#;

        let first = parse_document(xml).unwrap();
        let second = parse_document(&serialize_document(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
