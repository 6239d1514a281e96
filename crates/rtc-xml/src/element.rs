//! Generic element tree produced by the event reader.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{XmlError, XmlResult};

/// One XML element with namespace prefixes stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn open(start: &BytesStart<'_>) -> XmlResult<Self> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text content.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Trimmed text of the first child with the given name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlElement::text)
    }
}

/// Read a whole document into an element tree.
pub fn parse_document(xml: &str) -> XmlResult<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(XmlElement::open(&start)?),
            Event::Empty(start) => {
                let element = XmlElement::open(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element)?;
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed { element: open.name });
    }
    root.ok_or(XmlError::EmptyDocument)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> XmlResult<()> {
    let has_root = root.is_some();
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if has_root => return Err(XmlError::SecondRoot { element: element.name }),
        None => *root = Some(element),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_tree() {
        let doc = parse_document(
            r#"<a xmlns="urn:x"><b id="1">one</b><b id="2"/><c><![CDATA[raw]]></c></a>"#,
        )
        .unwrap();
        assert_eq!(doc.name, "a");
        assert_eq!(doc.children_named("b").count(), 2);
        assert_eq!(doc.child("b").unwrap().attr("id"), Some("1"));
        assert_eq!(doc.child_text("b"), Some("one"));
        assert_eq!(doc.child_text("c"), Some("raw"));
    }

    #[test]
    fn strips_namespace_prefixes() {
        let doc = parse_document(r#"<rtc:a xmlns:rtc="urn:x"><rtc:b rtc:ref="EXPLICIT">x</rtc:b></rtc:a>"#)
            .unwrap();
        assert_eq!(doc.name, "a");
        assert_eq!(doc.child("b").unwrap().attr("ref"), Some("EXPLICIT"));
    }

    #[test]
    fn unescapes_text() {
        let doc = parse_document("<a>x &amp; y</a>").unwrap();
        assert_eq!(doc.text(), "x & y");
    }

    #[test]
    fn empty_document_is_error() {
        assert!(matches!(parse_document(""), Err(XmlError::EmptyDocument)));
    }

    #[test]
    fn second_root_is_error() {
        assert!(matches!(
            parse_document("<a/><b/>"),
            Err(XmlError::SecondRoot { .. })
        ));
    }

    #[test]
    fn mismatched_end_is_error() {
        assert!(parse_document("<a><b></a>").is_err());
    }
}
