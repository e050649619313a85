//! Token writer used by every `write` implementation.
//!
//! Elements are written straight to the sink with `write!`. A start tag
//! stays open until its first child or text arrives, so an element with no
//! content closes as `<name/>`.

use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::options::WriteOptions;
use crate::ooxml::xml::value::ToXml;
use std::io::Write;

/// Streaming XML writer with an open-element stack.
pub struct XmlWriter<W: Write> {
    sink: W,
    open: Vec<String>,
    tag_pending: bool,
    options: WriteOptions,
}

impl XmlWriter<Vec<u8>> {
    /// Create a writer into an in-memory buffer.
    pub fn in_memory(options: WriteOptions) -> Self {
        Self::new(Vec::new(), options)
    }
}

impl<W: Write> XmlWriter<W> {
    pub fn new(sink: W, options: WriteOptions) -> Self {
        Self {
            sink,
            open: Vec::new(),
            tag_pending: false,
            options,
        }
    }

    #[inline]
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Write the XML declaration if the options ask for one.
    pub fn write_declaration(&mut self) -> Result<()> {
        if !self.options.xml_declaration {
            return Ok(());
        }
        if self.options.standalone {
            writeln!(
                self.sink,
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#
            )?;
        } else {
            writeln!(self.sink, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        }
        Ok(())
    }

    /// Open an element. Attributes may follow until content is written.
    pub fn start_element(&mut self, name: &str) -> Result<()> {
        self.close_pending()?;
        write!(self.sink, "<{name}")?;
        self.open.push(name.to_owned());
        self.tag_pending = true;
        Ok(())
    }

    /// Add an attribute to the element opened last.
    pub fn attribute<V: ToXml + ?Sized>(&mut self, name: &str, value: &V) -> Result<()> {
        if !self.tag_pending {
            return Err(OoxmlError::Other(format!(
                "attribute {name} written outside a start tag"
            )));
        }
        write!(self.sink, r#" {name}="{}""#, escape_xml(&value.to_xml()))?;
        Ok(())
    }

    /// Add an attribute only when a value is present.
    #[inline]
    pub fn optional_attribute<V: ToXml>(&mut self, name: &str, value: Option<&V>) -> Result<()> {
        match value {
            Some(value) => self.attribute(name, value),
            None => Ok(()),
        }
    }

    /// Close the element opened last.
    pub fn end_element(&mut self) -> Result<()> {
        let name = self
            .open
            .pop()
            .ok_or_else(|| OoxmlError::Other("end_element without open element".to_string()))?;
        if self.tag_pending {
            self.tag_pending = false;
            write!(self.sink, "/>")?;
        } else {
            write!(self.sink, "</{name}>")?;
        }
        Ok(())
    }

    /// Write a self-closing element with the given attributes.
    pub fn empty_element(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.start_element(name)?;
        for (key, value) in attributes {
            self.attribute(key, *value)?;
        }
        self.end_element()
    }

    /// Write `<name val="value"/>`.
    pub fn val_element<V: ToXml + ?Sized>(&mut self, name: &str, value: &V) -> Result<()> {
        self.start_element(name)?;
        self.attribute("val", value)?;
        self.end_element()
    }

    /// Write `<name val="value"/>` only when a value is present.
    #[inline]
    pub fn optional_val_element<V: ToXml>(&mut self, name: &str, value: Option<&V>) -> Result<()> {
        match value {
            Some(value) => self.val_element(name, value),
            None => Ok(()),
        }
    }

    /// Write `<name>text</name>`.
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start_element(name)?;
        self.text(text)?;
        self.end_element()
    }

    /// Write escaped character data inside the current element.
    pub fn text(&mut self, text: &str) -> Result<()> {
        self.close_pending()?;
        write!(self.sink, "{}", escape_xml(text))?;
        Ok(())
    }

    /// Check that every element was closed and hand back the sink.
    pub fn finish(mut self) -> Result<W> {
        if let Some(name) = self.open.last() {
            return Err(OoxmlError::Other(format!("element <{name}> left open")));
        }
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn close_pending(&mut self) -> Result<()> {
        if self.tag_pending {
            self.tag_pending = false;
            write!(self.sink, ">")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment() -> XmlWriter<Vec<u8>> {
        XmlWriter::in_memory(WriteOptions::new().with_xml_declaration(false))
    }

    #[test]
    fn empty_elements_self_close() {
        let mut w = fragment();
        w.start_element("c:legend").unwrap();
        w.val_element("c:legendPos", "r").unwrap();
        w.start_element("c:layout").unwrap();
        w.end_element().unwrap();
        w.end_element().unwrap();
        let out = String::from_utf8(w.finish().unwrap()).unwrap();
        assert_eq!(out, r#"<c:legend><c:legendPos val="r"/><c:layout/></c:legend>"#);
    }

    #[test]
    fn escapes_text_and_attributes() {
        let mut w = fragment();
        w.start_element("c:f").unwrap();
        w.attribute("note", "a\"b").unwrap();
        w.text("'Q&A'!$A$1").unwrap();
        w.end_element().unwrap();
        let out = String::from_utf8(w.finish().unwrap()).unwrap();
        assert_eq!(out, r#"<c:f note="a&quot;b">&apos;Q&amp;A&apos;!$A$1</c:f>"#);
    }

    #[test]
    fn unbalanced_output_is_refused() {
        let mut w = fragment();
        w.start_element("a").unwrap();
        assert!(w.finish().is_err());
        let mut w = fragment();
        assert!(w.end_element().is_err());
        assert!(w.attribute("x", "1").is_err());
    }

    #[test]
    fn declaration_follows_options() {
        let mut w = XmlWriter::in_memory(WriteOptions::new().with_standalone(false));
        w.write_declaration().unwrap();
        let out = String::from_utf8(w.finish().unwrap()).unwrap();
        assert_eq!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }
}
