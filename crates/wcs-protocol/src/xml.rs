//! Owned XML element tree and its ISO-8859-1 serialization.
//!
//! Documents are built in memory and serialized in one go, so a failed build
//! never leaves a half-written response behind. There is no process-wide
//! parser state: a document lives for one response and is dropped on every
//! exit path.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use wcs_common::{WcsError, WcsResult};

/// An XML element with attributes, optional text, and child elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Element holding a single text node.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut el = Self::new(name);
        el.text = Some(text.into());
        el
    }

    /// Builder-style attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder-style child.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((key.into(), value.into()));
    }

    /// Append a child and return a handle to it.
    pub fn push(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Append a text-only child.
    pub fn push_text(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.children.push(Element::with_text(name, text));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child with the given name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given name.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow a path of child names, e.g. `["Domain", "SpatialDomain", "GridCRS"]`.
    pub fn find_path(&self, path: &[&str]) -> Option<&Element> {
        path.iter().try_fold(self, |el, name| el.find(name))
    }
}

/// Append one `name` element per `delimiter`-separated token of `values`.
pub fn generate_list(parent: &mut Element, name: &str, values: &str, delimiter: char) {
    for token in values.split(delimiter).filter(|t| !t.is_empty()) {
        parent.push_text(name, token);
    }
}

/// A complete document ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: Element,
}

impl XmlDocument {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Serialize as indented XML in the ISO-8859-1 encoding.
    ///
    /// Characters outside Latin-1 are written as numeric character references.
    pub fn to_latin1_bytes(&self) -> WcsResult<Vec<u8>> {
        let utf8 = self.to_utf8_string()?;
        let mut out = Vec::with_capacity(utf8.len());
        for ch in utf8.chars() {
            let code = ch as u32;
            if code <= 0xFF {
                out.push(code as u8);
            } else {
                out.extend_from_slice(format!("&#{};", code).as_bytes());
            }
        }
        Ok(out)
    }

    fn to_utf8_string(&self) -> WcsResult<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("ISO-8859-1"), None)))
            .map_err(xml_error)?;
        write_element(&mut writer, &self.root)?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| WcsError::NoApplicableCode(e.to_string()))
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, el: &Element) -> WcsResult<()> {
    let mut start = BytesStart::new(el.name.as_str());
    for (key, value) in &el.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if el.children.is_empty() && el.text.is_none() {
        return writer.write_event(Event::Empty(start)).map_err(xml_error);
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    if let Some(text) = &el.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_error)?;
    }
    for child in &el.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(el.name.as_str())))
        .map_err(xml_error)
}

fn xml_error(err: quick_xml::Error) -> WcsError {
    WcsError::NoApplicableCode(format!("XML serialization failed: {}", err))
}
