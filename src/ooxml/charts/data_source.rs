//! Data feeding one dimension of a series.
//!
//! A data source is either a reference to a cell range (`numRef`, `strRef`,
//! `multiLvlStrRef`) or an inline literal list (`numLit`, `strLit`). The
//! cached preview values Excel stores under references are never written
//! and are dropped on read.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::options::PointIndexPolicy;
use crate::ooxml::xml::{FromXml, XmlReader, XmlWriter};
use std::io::{BufRead, Write};

/// Upper bound on literal points, matching the worksheet row limit.
const MAX_POINTS: usize = 1_048_576;

/// Kind of a [`DataSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSourceKind {
    #[default]
    None,
    NumberReference,
    StringReference,
    NumberLiterals,
    StringLiterals,
    MultiLevelStringReference,
}

impl DataSourceKind {
    /// Returns true for the range-reference kinds.
    #[inline]
    pub const fn is_reference(&self) -> bool {
        matches!(
            self,
            Self::NumberReference | Self::StringReference | Self::MultiLevelStringReference
        )
    }

    /// Look up the kind for a data element's local name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "numRef" => Some(Self::NumberReference),
            "strRef" => Some(Self::StringReference),
            "numLit" => Some(Self::NumberLiterals),
            "strLit" => Some(Self::StringLiterals),
            "multiLvlStrRef" => Some(Self::MultiLevelStringReference),
            _ => None,
        }
    }

    /// Element name written for this kind.
    pub const fn tag(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::NumberReference => Some("c:numRef"),
            Self::StringReference => Some("c:strRef"),
            Self::NumberLiterals => Some("c:numLit"),
            Self::StringLiterals => Some("c:strLit"),
            Self::MultiLevelStringReference => Some("c:multiLvlStrRef"),
        }
    }
}

/// A range reference or literal list.
///
/// # Examples
///
/// ```
/// use chartml::ooxml::charts::{DataSource, DataSourceKind};
///
/// let empty = DataSource::from_reference(DataSourceKind::NumberReference, "");
/// assert!(!empty.is_valid());
/// assert_eq!(empty.kind(), DataSourceKind::None);
///
/// let literal = DataSource::from_numbers([1.0, 2.0, 3.0]);
/// assert!(literal.is_valid());
/// assert_eq!(literal.kind(), DataSourceKind::NumberLiterals);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSource {
    kind: DataSourceKind,
    reference: String,
    numbers: Vec<Option<f64>>,
    strings: Vec<Option<String>>,
    format_code: Option<String>,
}

impl DataSource {
    /// An empty source of kind `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A range reference. An empty reference, or a non-reference kind,
    /// yields a source of kind `None`.
    pub fn from_reference(kind: DataSourceKind, reference: &str) -> Self {
        let reference = reference.trim();
        if reference.is_empty() || !kind.is_reference() {
            log::debug!("data source {kind:?} with reference {reference:?} degraded to None");
            return Self::default();
        }
        Self {
            kind,
            reference: reference.to_owned(),
            ..Default::default()
        }
    }

    /// An inline list of numbers.
    pub fn from_numbers(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            kind: DataSourceKind::NumberLiterals,
            numbers: values.into_iter().map(Some).collect(),
            ..Default::default()
        }
    }

    /// An inline list of strings.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            kind: DataSourceKind::StringLiterals,
            strings: values.into_iter().map(|s| Some(s.into())).collect(),
            ..Default::default()
        }
    }

    /// Set the number format of literal numbers.
    pub fn with_format_code(mut self, format_code: &str) -> Self {
        self.format_code = Some(format_code.to_owned());
        self
    }

    #[inline]
    pub fn kind(&self) -> DataSourceKind {
        self.kind
    }

    /// Range formula for reference kinds; empty otherwise.
    #[inline]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Literal numbers; `None` marks a point with no value.
    #[inline]
    pub fn numbers(&self) -> &[Option<f64>] {
        &self.numbers
    }

    /// Literal strings; `None` marks a point with no value.
    #[inline]
    pub fn strings(&self) -> &[Option<String>] {
        &self.strings
    }

    #[inline]
    pub fn format_code(&self) -> Option<&str> {
        self.format_code.as_deref()
    }

    /// `kind` is not `None` and the payload that kind uses is non-empty.
    pub fn is_valid(&self) -> bool {
        match self.kind {
            DataSourceKind::None => false,
            DataSourceKind::NumberLiterals => !self.numbers.is_empty(),
            DataSourceKind::StringLiterals => !self.strings.is_empty(),
            _ => !self.reference.is_empty(),
        }
    }

    /// Read a container element (`c:cat`, `c:val`, `c:xVal`, ...) holding
    /// one data choice. The element tag decides the kind.
    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut source = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match DataSourceKind::from_tag(reader.name()) {
                Some(kind) => source = Self::read_choice(reader, kind)?,
                None => reader.skip_element()?,
            }
        }
        Ok(source)
    }

    fn read_choice<R: BufRead>(reader: &mut XmlReader<R>, kind: DataSourceKind) -> Result<Self> {
        let mut source = Self {
            kind,
            ..Default::default()
        };
        let mut point_count: Option<usize> = None;
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "f" if kind.is_reference() => source.reference = reader.read_text()?.trim().to_owned(),
                "formatCode" if !kind.is_reference() => {
                    source.format_code = Some(reader.read_text()?);
                },
                "ptCount" if !kind.is_reference() => {
                    let count = reader.val::<usize>().unwrap_or(0).min(MAX_POINTS);
                    point_count = Some(count);
                    source.resize(count);
                },
                "pt" if !kind.is_reference() => source.read_point(reader, point_count)?,
                _ => reader.skip_element()?,
            }
        }
        if kind.is_reference() && source.reference.is_empty() {
            log::warn!("{kind:?} without a formula read as an empty data source");
            return Ok(Self::default());
        }
        Ok(source)
    }

    fn resize(&mut self, len: usize) {
        match self.kind {
            DataSourceKind::NumberLiterals => self.numbers.resize(len, None),
            DataSourceKind::StringLiterals => self.strings.resize(len, None),
            _ => {},
        }
    }

    fn len(&self) -> usize {
        match self.kind {
            DataSourceKind::NumberLiterals => self.numbers.len(),
            DataSourceKind::StringLiterals => self.strings.len(),
            _ => 0,
        }
    }

    fn read_point<R: BufRead>(
        &mut self,
        reader: &mut XmlReader<R>,
        point_count: Option<usize>,
    ) -> Result<()> {
        let index = reader.parse_attribute::<usize>("idx");
        let limit = point_count.unwrap_or(MAX_POINTS);
        let index = match index {
            Some(index) if index < limit => index,
            _ => {
                let raw = reader.attribute("idx").unwrap_or("").to_owned();
                match reader.options().point_index_policy {
                    PointIndexPolicy::Reject => {
                        return Err(OoxmlError::InvalidFormat(format!(
                            "literal point index {raw:?} outside 0..{limit}"
                        )));
                    },
                    PointIndexPolicy::Skip => {
                        log::warn!("skipping literal point with index {raw:?} outside 0..{limit}");
                        reader.skip_element()?;
                        return Ok(());
                    },
                }
            },
        };

        let mut value = None;
        let depth = reader.depth();
        while reader.next_child(depth)? {
            if reader.name() == "v" {
                value = Some(reader.read_text()?);
            } else {
                reader.skip_element()?;
            }
        }

        if index >= self.len() {
            self.resize(index + 1);
        }
        match self.kind {
            DataSourceKind::NumberLiterals => {
                let number = value.as_deref().and_then(f64::from_xml);
                if number.is_none() {
                    log::warn!("literal point {index} has no numeric value");
                }
                self.numbers[index] = number;
            },
            DataSourceKind::StringLiterals => self.strings[index] = value,
            _ => {},
        }
        Ok(())
    }

    /// Write the source wrapped in `element`. Nothing is written for kind
    /// `None`.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>, element: &str) -> Result<()> {
        let Some(tag) = self.kind.tag() else {
            return Ok(());
        };
        writer.start_element(element)?;
        writer.start_element(tag)?;
        match self.kind {
            DataSourceKind::NumberLiterals => {
                if let Some(code) = &self.format_code {
                    writer.text_element("c:formatCode", code)?;
                }
                writer.val_element("c:ptCount", &(self.numbers.len() as u64))?;
                for (index, value) in self.numbers.iter().enumerate() {
                    if let Some(value) = value {
                        write_point(writer, index, &crate::ooxml::xml::format_f64(*value))?;
                    }
                }
            },
            DataSourceKind::StringLiterals => {
                writer.val_element("c:ptCount", &(self.strings.len() as u64))?;
                for (index, value) in self.strings.iter().enumerate() {
                    if let Some(value) = value {
                        write_point(writer, index, value)?;
                    }
                }
            },
            _ => writer.text_element("c:f", &self.reference)?,
        }
        writer.end_element()?;
        writer.end_element()
    }
}

fn write_point<W: Write>(writer: &mut XmlWriter<W>, index: usize, value: &str) -> Result<()> {
    writer.start_element("c:pt")?;
    writer.attribute("idx", &(index as u64))?;
    writer.text_element("c:v", value)?;
    writer.end_element()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::options::{ReadOptions, WriteOptions};
    use pretty_assertions::assert_eq;

    fn write(source: &DataSource) -> String {
        let mut writer = XmlWriter::in_memory(WriteOptions::new().with_xml_declaration(false));
        source.write(&mut writer, "c:val").unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    fn read_with(xml: &str, options: ReadOptions) -> Result<DataSource> {
        let mut reader = XmlReader::from_str(xml, options);
        reader.next_root().unwrap();
        DataSource::read(&mut reader)
    }

    #[test]
    fn empty_reference_degrades_to_none() {
        let source = DataSource::from_reference(DataSourceKind::StringReference, "  ");
        assert_eq!(source.kind(), DataSourceKind::None);
        assert!(!source.is_valid());
        assert_eq!(write(&source), "");

        let literal_kind = DataSource::from_reference(DataSourceKind::NumberLiterals, "A1");
        assert_eq!(literal_kind.kind(), DataSourceKind::None);
    }

    #[test]
    fn reference_written_without_cache() {
        let source = DataSource::from_reference(DataSourceKind::NumberReference, "Sheet1!$B$2:$B$4");
        let xml = write(&source);
        assert_eq!(xml, "<c:val><c:numRef><c:f>Sheet1!$B$2:$B$4</c:f></c:numRef></c:val>");
        assert_eq!(read_with(&xml, ReadOptions::new()).unwrap(), source);
    }

    #[test]
    fn cached_values_are_dropped() {
        let xml = r#"<c:cat><c:strRef><c:f>Sheet1!$A$2:$A$3</c:f>
            <c:strCache><c:ptCount val="2"/><c:pt idx="0"><c:v>a</c:v></c:pt></c:strCache>
            </c:strRef></c:cat>"#;
        let source = read_with(xml, ReadOptions::new()).unwrap();
        assert_eq!(source.kind(), DataSourceKind::StringReference);
        assert_eq!(source.reference(), "Sheet1!$A$2:$A$3");
        assert!(source.strings().is_empty());
    }

    #[test]
    fn literal_numbers_round_trip() {
        let source = DataSource::from_numbers([1.0, 2.5, 3.0]).with_format_code("0.0");
        let xml = write(&source);
        assert_eq!(
            xml,
            concat!(
                "<c:val><c:numLit><c:formatCode>0.0</c:formatCode><c:ptCount val=\"3\"/>",
                "<c:pt idx=\"0\"><c:v>1</c:v></c:pt><c:pt idx=\"1\"><c:v>2.5</c:v></c:pt>",
                "<c:pt idx=\"2\"><c:v>3</c:v></c:pt></c:numLit></c:val>"
            )
        );
        assert_eq!(read_with(&xml, ReadOptions::new()).unwrap(), source);
    }

    #[test]
    fn sparse_literals_keep_their_slots() {
        let xml = r#"<c:cat><c:strLit><c:ptCount val="3"/><c:pt idx="2"><c:v>c</c:v></c:pt>
            <c:pt idx="0"><c:v>a</c:v></c:pt></c:strLit></c:cat>"#;
        let source = read_with(xml, ReadOptions::new()).unwrap();
        assert_eq!(
            source.strings(),
            &[Some("a".to_string()), None, Some("c".to_string())]
        );
    }

    #[test]
    fn out_of_range_index_follows_policy() {
        let xml = r#"<c:val><c:numLit><c:ptCount val="1"/><c:pt idx="0"><c:v>1</c:v></c:pt>
            <c:pt idx="5"><c:v>9</c:v></c:pt></c:numLit></c:val>"#;
        assert!(matches!(
            read_with(xml, ReadOptions::new()),
            Err(OoxmlError::InvalidFormat(_))
        ));

        let lenient = ReadOptions::new().with_point_index_policy(PointIndexPolicy::Skip);
        let source = read_with(xml, lenient).unwrap();
        assert_eq!(source.numbers(), &[Some(1.0)]);
    }

    #[test]
    fn literals_without_count_grow() {
        let xml = r#"<c:val><c:numLit><c:pt idx="1"><c:v>4</c:v></c:pt></c:numLit></c:val>"#;
        let source = read_with(xml, ReadOptions::new()).unwrap();
        assert_eq!(source.numbers(), &[None, Some(4.0)]);
        assert!(source.is_valid());
    }

    #[test]
    fn tag_decides_kind() {
        let xml = r#"<c:val><c:numLit><c:pt idx="0"><c:v>1</c:v></c:pt></c:numLit>
            <c:strRef><c:f>Sheet1!$A$1</c:f></c:strRef></c:val>"#;
        let source = read_with(xml, ReadOptions::new()).unwrap();
        assert_eq!(source.kind(), DataSourceKind::StringReference);
        assert!(source.numbers().is_empty());
    }
}
