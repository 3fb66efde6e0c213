//! Minimal element tree over quick-xml events.
//!
//! crm_mon's status dump is attribute-driven: every fact the checker needs
//! lives in an attribute, so text content is dropped while decoding.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::SnapshotError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    /// Decode a document into its root element.
    pub fn parse(xml: &str) -> Result<Element, SnapshotError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader.read_event().map_err(|source| SnapshotError::Xml {
                position: reader.error_position() as u64,
                source,
            })?;
            match event {
                Event::Start(start) => {
                    let element = Self::open(&start).map_err(|source| SnapshotError::Xml {
                        position: reader.buffer_position() as u64,
                        source,
                    })?;
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = Self::open(&start).map_err(|source| SnapshotError::Xml {
                        position: reader.buffer_position() as u64,
                        source,
                    })?;
                    Self::close(element, &mut stack, &mut root);
                }
                Event::End(_) => {
                    // quick-xml already rejects mismatched end tags
                    if let Some(element) = stack.pop() {
                        Self::close(element, &mut stack, &mut root);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(SnapshotError::Unterminated(open.name));
        }
        root.ok_or(SnapshotError::Empty)
    }

    fn open(start: &BytesStart<'_>) -> Result<Element, quick_xml::Error> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Element {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    fn close(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            // Only the first top-level element counts as the document root
            None => {
                if root.is_none() {
                    *root = Some(element);
                }
            }
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given tag name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}
