//! Pull-style token reader used by every `read` implementation.
//!
//! The reader keeps the name and attributes of the most recent start or end
//! tag, tracks nesting depth, and offers `next_child` for walking the direct
//! children of an element. Self-closing elements are expanded into a start
//! and an end token so callers only deal with one shape.

use crate::common::xml::{resolve_entity, unescape_xml};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::options::ReadOptions;
use crate::ooxml::xml::value::FromXml;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::BufRead;

/// One token of the element stream.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlToken {
    /// Opening tag; name and attributes are available on the reader.
    Start,
    /// Closing tag; the name is available on the reader.
    End,
    /// Character data, with entities resolved.
    Text(String),
    /// End of input.
    Eof,
}

/// Token reader over a quick-xml event stream.
pub struct XmlReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    name: String,
    attributes: Vec<(String, String)>,
    depth: usize,
    options: ReadOptions,
}

impl<'a> XmlReader<&'a [u8]> {
    /// Create a reader over an in-memory document.
    pub fn from_str(xml: &'a str, options: ReadOptions) -> Self {
        Self::new(xml.as_bytes(), options)
    }
}

impl<R: BufRead> XmlReader<R> {
    /// Create a reader over any buffered source.
    pub fn new(source: R, options: ReadOptions) -> Self {
        let mut reader = Reader::from_reader(source);
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.trim_text(false);
        Self {
            reader,
            buf: Vec::new(),
            name: String::new(),
            attributes: Vec::new(),
            depth: 0,
            options,
        }
    }

    /// Options this reader was created with.
    #[inline]
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Local name (namespace prefix stripped) of the current tag.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nesting depth; the root element's start tag leaves it at 1.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Attributes of the current start tag, keyed by local name.
    #[inline]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Raw value of one attribute of the current start tag.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parsed value of one attribute; unparsable values are logged and
    /// treated as absent.
    pub fn parse_attribute<T: FromXml>(&self, key: &str) -> Option<T> {
        let raw = self.attribute(key)?;
        let parsed = T::from_xml(raw);
        if parsed.is_none() {
            log::warn!(
                "ignoring unparsable value {raw:?} for attribute {key} of <{}>",
                self.name
            );
        }
        parsed
    }

    /// Value of a `val`-style element such as `<c:gapWidth val="150"/>`.
    #[inline]
    pub fn val<T: FromXml>(&self) -> Option<T> {
        self.parse_attribute("val")
    }

    /// Value of a boolean `val` element; a missing `val` means `true`.
    #[inline]
    pub fn bool_val(&self) -> Option<bool> {
        match self.attribute("val") {
            None => Some(true),
            Some(_) => self.parse_attribute("val"),
        }
    }

    /// Advance to the next significant token.
    pub fn advance(&mut self) -> Result<XmlToken> {
        loop {
            self.buf.clear();
            let event = self.reader.read_event_into(&mut self.buf)?;
            match event {
                Event::Start(ref e) => {
                    let (name, attributes) = Self::decode_start(&self.reader, e)?;
                    self.name = name;
                    self.attributes = attributes;
                    self.depth += 1;
                    return Ok(XmlToken::Start);
                },
                Event::End(ref e) => {
                    self.name = decode_utf8(e.local_name().as_ref())?.to_owned();
                    self.attributes.clear();
                    self.depth = self.depth.saturating_sub(1);
                    return Ok(XmlToken::End);
                },
                Event::Text(ref e) => {
                    let raw = decode_utf8(e.as_ref())?;
                    return Ok(XmlToken::Text(unescape_xml(raw).into_owned()));
                },
                Event::CData(ref e) => {
                    return Ok(XmlToken::Text(decode_utf8(e.as_ref())?.to_owned()));
                },
                Event::GeneralRef(ref e) => {
                    let name = decode_utf8(e.as_ref())?;
                    let text = match resolve_entity(name) {
                        Some(ch) => ch.to_string(),
                        None => format!("&{name};"),
                    };
                    return Ok(XmlToken::Text(text));
                },
                Event::Eof => return Ok(XmlToken::Eof),
                _ => {},
            }
        }
    }

    /// Advance to the next direct child of the element open at `depth`.
    ///
    /// Returns `false` once that element's end tag has been consumed.
    /// Deeper content a caller chose not to consume is passed over.
    pub fn next_child(&mut self, depth: usize) -> Result<bool> {
        loop {
            match self.advance()? {
                XmlToken::Start if self.depth == depth + 1 => return Ok(true),
                XmlToken::End if self.depth < depth => return Ok(false),
                XmlToken::Eof => {
                    return Err(OoxmlError::Xml(format!(
                        "unexpected end of document inside <{}>",
                        self.name
                    )));
                },
                _ => {},
            }
        }
    }

    /// Advance to the first start tag of the document.
    pub fn next_root(&mut self) -> Result<bool> {
        loop {
            match self.advance()? {
                XmlToken::Start => return Ok(true),
                XmlToken::Eof => return Ok(false),
                _ => {},
            }
        }
    }

    /// Concatenated text content of the current element, consuming it.
    pub fn read_text(&mut self) -> Result<String> {
        let depth = self.depth;
        let mut text = String::new();
        loop {
            match self.advance()? {
                XmlToken::Text(t) => text.push_str(&t),
                XmlToken::End if self.depth < depth => return Ok(text),
                XmlToken::Eof => {
                    return Err(OoxmlError::Xml(
                        "unexpected end of document in text content".to_string(),
                    ));
                },
                _ => {},
            }
        }
    }

    /// Consume the current element and everything inside it.
    pub fn skip_element(&mut self) -> Result<()> {
        let depth = self.depth;
        log::debug!("skipping <{}>", self.name);
        while self.next_child(depth)? {}
        Ok(())
    }

    fn decode_start(
        reader: &Reader<R>,
        e: &BytesStart<'_>,
    ) -> Result<(String, Vec<(String, String)>)> {
        let name = decode_utf8(e.local_name().as_ref())?.to_owned();
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| OoxmlError::Xml(err.to_string()))?;
            let key = decode_utf8(attr.key.local_name().as_ref())?.to_owned();
            let value = attr
                .decode_and_unescape_value(reader.decoder())
                .map_err(|err| OoxmlError::Xml(err.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok((name, attributes))
    }
}

#[inline]
fn decode_utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| OoxmlError::Xml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_direct_children_and_skips_the_rest() {
        let xml = r#"<c:root xmlns:c="urn:c"><c:a val="1"/><c:b><c:deep/></c:b><c:c>x</c:c></c:root>"#;
        let mut reader = XmlReader::from_str(xml, ReadOptions::new());
        assert!(reader.next_root().unwrap());
        assert_eq!(reader.name(), "root");
        let depth = reader.depth();
        let mut seen = Vec::new();
        while reader.next_child(depth).unwrap() {
            seen.push(reader.name().to_string());
            if reader.name() == "a" {
                assert_eq!(reader.val::<u32>(), Some(1));
            }
        }
        assert_eq!(seen, ["a", "b", "c"]);
        assert_eq!(reader.advance().unwrap(), XmlToken::Eof);
    }

    #[test]
    fn reads_text_with_entities() {
        let xml = "<f>Sheet1!$A$1 &amp; &#65;<![CDATA[<raw>]]></f>";
        let mut reader = XmlReader::from_str(xml, ReadOptions::new());
        reader.next_root().unwrap();
        assert_eq!(reader.read_text().unwrap(), "Sheet1!$A$1 & A<raw>");
    }

    #[test]
    fn boolean_val_defaults_to_true() {
        let mut reader = XmlReader::from_str("<a><b/><c val=\"0\"/></a>", ReadOptions::new());
        reader.next_root().unwrap();
        assert!(reader.next_child(1).unwrap());
        assert_eq!(reader.bool_val(), Some(true));
        assert!(reader.next_child(1).unwrap());
        assert_eq!(reader.bool_val(), Some(false));
        assert!(!reader.next_child(1).unwrap());
    }

    #[test]
    fn truncated_document_is_an_error() {
        let mut reader = XmlReader::from_str("<a><b>", ReadOptions::new());
        reader.next_root().unwrap();
        assert!(reader.next_child(1).unwrap());
        assert!(matches!(reader.next_child(1), Err(OoxmlError::Xml(_))));
    }
}
