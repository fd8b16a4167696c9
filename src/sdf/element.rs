//! Mutable XML element tree
//!
//! Ownership tree backing [`SdfDocument`](super::SdfDocument). Children are
//! owned by their parent, so removing a subtree is a plain `Vec` operation
//! on the parent and no back-pointers are needed.

/// A node in an element's child list
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// Nested element
    Element(Element),
    /// Character data (unescaped)
    Text(String),
}

/// An XML element with tag, ordered attributes, and owned children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag name
    pub tag: String,
    /// Attributes in document order
    attributes: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<XmlNode>,
}

impl Element {
    /// Create an empty element with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing the value in place if the name exists
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Iterate attributes in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of attributes
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Append a child node
    pub fn push_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    /// Iterate direct child elements, skipping text nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Find the first direct child element with the given tag
    pub fn find_child(&self, tag: &str) -> Option<&Element> {
        self.child_elements().find(|element| element.tag == tag)
    }

    /// Mutable variant of [`find_child`](Self::find_child)
    pub fn find_child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|child| match child {
            XmlNode::Element(element) if element.tag == tag => Some(element),
            _ => None,
        })
    }

    /// Concatenated text of direct text children, or `None` if there are none
    pub fn text(&self) -> Option<String> {
        let mut parts = self.children.iter().filter_map(|child| match child {
            XmlNode::Text(text) => Some(text.as_str()),
            XmlNode::Element(_) => None,
        });
        let first = parts.next()?;
        let mut out = first.to_string();
        for part in parts {
            out.push_str(part);
        }
        Some(out)
    }
}
