//! Small chart models shared by titles, axes, series and labels.

use crate::ooxml::charts::format::{ShapeFormat, TextFormat};
use crate::ooxml::charts::types::{LayoutMode, LayoutTarget};
use crate::ooxml::error::Result;
use crate::ooxml::xml::{XmlReader, XmlWriter};
use std::io::{BufRead, Write};

/// Manual layout of a chart element, `c:layout/c:manualLayout`.
///
/// An empty layout writes as `<c:layout/>` (automatic layout).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub target: Option<LayoutTarget>,
    pub x_mode: Option<LayoutMode>,
    pub y_mode: Option<LayoutMode>,
    pub width_mode: Option<LayoutMode>,
    pub height_mode: Option<LayoutMode>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Layout {
    /// Inner plot-area layout given as fractions of the chart space.
    pub fn inner(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            target: Some(LayoutTarget::Inner),
            x_mode: Some(LayoutMode::Edge),
            y_mode: Some(LayoutMode::Edge),
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn is_manual(&self) -> bool {
        *self != Self::default()
    }

    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut layout = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            if reader.name() != "manualLayout" {
                reader.skip_element()?;
                continue;
            }
            let manual_depth = reader.depth();
            while reader.next_child(manual_depth)? {
                match reader.name() {
                    "layoutTarget" => layout.target = reader.val(),
                    "xMode" => layout.x_mode = reader.val(),
                    "yMode" => layout.y_mode = reader.val(),
                    "wMode" => layout.width_mode = reader.val(),
                    "hMode" => layout.height_mode = reader.val(),
                    "x" => layout.x = reader.val(),
                    "y" => layout.y = reader.val(),
                    "w" => layout.width = reader.val(),
                    "h" => layout.height = reader.val(),
                    _ => reader.skip_element()?,
                }
            }
        }
        Ok(layout)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:layout")?;
        if self.is_manual() {
            writer.start_element("c:manualLayout")?;
            writer.optional_val_element("c:layoutTarget", self.target.as_ref())?;
            writer.optional_val_element("c:xMode", self.x_mode.as_ref())?;
            writer.optional_val_element("c:yMode", self.y_mode.as_ref())?;
            writer.optional_val_element("c:wMode", self.width_mode.as_ref())?;
            writer.optional_val_element("c:hMode", self.height_mode.as_ref())?;
            writer.optional_val_element("c:x", self.x.as_ref())?;
            writer.optional_val_element("c:y", self.y.as_ref())?;
            writer.optional_val_element("c:w", self.width.as_ref())?;
            writer.optional_val_element("c:h", self.height.as_ref())?;
            writer.end_element()?;
        }
        writer.end_element()
    }
}

/// Text that is either typed in or pulled from a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Text {
    Literal(String),
    /// Cell reference formula, e.g. `Sheet1!$B$1`
    Reference(String),
}

impl Text {
    /// Read a `c:tx` element (series name, title, label text).
    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Option<Self>> {
        let mut text = None;
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "strRef" => {
                    let ref_depth = reader.depth();
                    while reader.next_child(ref_depth)? {
                        if reader.name() == "f" {
                            text = Some(Text::Reference(reader.read_text()?));
                        } else {
                            reader.skip_element()?;
                        }
                    }
                },
                "v" => text = Some(Text::Literal(reader.read_text()?)),
                "rich" => text = Some(Text::Literal(read_rich_text(reader, None)?)),
                _ => reader.skip_element()?,
            }
        }
        Ok(text)
    }

    /// Write a series-style `c:tx` (`c:v` for literals).
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:tx")?;
        match self {
            Text::Literal(value) => writer.text_element("c:v", value)?,
            Text::Reference(formula) => write_string_reference(writer, formula)?,
        }
        writer.end_element()
    }
}

fn write_string_reference<W: Write>(writer: &mut XmlWriter<W>, formula: &str) -> Result<()> {
    writer.start_element("c:strRef")?;
    writer.text_element("c:f", formula)?;
    writer.end_element()
}

/// Collect the text of an `a:rich`/`c:rich` body; paragraphs are joined
/// with newlines. Run properties of the first run land in `format`.
fn read_rich_text<R: BufRead>(
    reader: &mut XmlReader<R>,
    mut format: Option<&mut TextFormat>,
) -> Result<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let depth = reader.depth();
    while reader.next_child(depth)? {
        match reader.name() {
            "bodyPr" => {
                if let Some(format) = format.as_deref_mut() {
                    format.rotation = reader.parse_attribute("rot");
                }
            },
            "p" => {
                let mut paragraph = String::new();
                let p_depth = reader.depth();
                while reader.next_child(p_depth)? {
                    match reader.name() {
                        "r" | "fld" => {
                            let run_depth = reader.depth();
                            while reader.next_child(run_depth)? {
                                match reader.name() {
                                    "t" => paragraph.push_str(&reader.read_text()?),
                                    "rPr" => match format.as_deref_mut() {
                                        Some(format) => format.read_run_properties(reader)?,
                                        None => reader.skip_element()?,
                                    },
                                    _ => reader.skip_element()?,
                                }
                            }
                        },
                        "br" => paragraph.push('\n'),
                        _ => reader.skip_element()?,
                    }
                }
                paragraphs.push(paragraph);
            },
            _ => reader.skip_element()?,
        }
    }
    Ok(paragraphs.join("\n"))
}

/// Chart or axis title, `c:title`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Title {
    /// `None` means an auto-generated title
    pub text: Option<Text>,
    /// Run formatting of rich literal text
    pub run_format: Option<TextFormat>,
    pub layout: Option<Layout>,
    pub overlay: Option<bool>,
    pub shape: Option<ShapeFormat>,
    pub text_format: Option<TextFormat>,
}

impl Title {
    pub fn new(text: &str) -> Self {
        Self {
            text: Some(Text::Literal(text.to_owned())),
            ..Default::default()
        }
    }

    pub fn from_reference(formula: &str) -> Self {
        Self {
            text: Some(Text::Reference(formula.to_owned())),
            ..Default::default()
        }
    }

    pub fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn with_run_format(mut self, format: TextFormat) -> Self {
        self.run_format = Some(format);
        self
    }

    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut title = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "tx" => {
                    let tx_depth = reader.depth();
                    while reader.next_child(tx_depth)? {
                        match reader.name() {
                            "rich" => {
                                let mut format = TextFormat::default();
                                let text = read_rich_text(reader, Some(&mut format))?;
                                title.text = Some(Text::Literal(text));
                                if format != TextFormat::default() {
                                    title.run_format = Some(format);
                                }
                            },
                            "strRef" => {
                                let ref_depth = reader.depth();
                                while reader.next_child(ref_depth)? {
                                    if reader.name() == "f" {
                                        title.text = Some(Text::Reference(reader.read_text()?));
                                    } else {
                                        reader.skip_element()?;
                                    }
                                }
                            },
                            _ => reader.skip_element()?,
                        }
                    }
                },
                "layout" => title.layout = Some(Layout::read(reader)?),
                "overlay" => title.overlay = reader.bool_val(),
                "spPr" => title.shape = Some(ShapeFormat::read(reader)?),
                "txPr" => title.text_format = Some(TextFormat::read(reader)?),
                _ => reader.skip_element()?,
            }
        }
        Ok(title)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:title")?;
        match &self.text {
            Some(Text::Literal(text)) => {
                let format = self.run_format.clone().unwrap_or_default();
                writer.start_element("c:tx")?;
                writer.start_element("c:rich")?;
                format.write_body_properties(writer)?;
                writer.empty_element("a:lstStyle", &[])?;
                for line in text.split('\n') {
                    writer.start_element("a:p")?;
                    writer.start_element("a:pPr")?;
                    writer.empty_element("a:defRPr", &[])?;
                    writer.end_element()?;
                    writer.start_element("a:r")?;
                    format.write_run_properties(writer, "a:rPr", Some("en-US"))?;
                    writer.text_element("a:t", line)?;
                    writer.end_element()?;
                    writer.end_element()?;
                }
                writer.end_element()?;
                writer.end_element()?;
            },
            Some(Text::Reference(formula)) => {
                writer.start_element("c:tx")?;
                write_string_reference(writer, formula)?;
                writer.end_element()?;
            },
            None => {},
        }
        if let Some(layout) = &self.layout {
            layout.write(writer)?;
        }
        writer.optional_val_element("c:overlay", self.overlay.as_ref())?;
        if let Some(shape) = &self.shape {
            shape.write(writer)?;
        }
        if let Some(format) = &self.text_format {
            format.write(writer)?;
        }
        writer.end_element()
    }
}

/// Number format, `c:numFmt`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberFormat {
    pub format_code: String,
    pub source_linked: Option<bool>,
}

impl NumberFormat {
    pub fn new(format_code: &str) -> Self {
        Self {
            format_code: format_code.to_owned(),
            source_linked: None,
        }
    }

    pub fn linked(format_code: &str) -> Self {
        Self {
            format_code: format_code.to_owned(),
            source_linked: Some(true),
        }
    }

    pub fn read<R: BufRead>(reader: &XmlReader<R>) -> Self {
        Self {
            format_code: reader.attribute("formatCode").unwrap_or("General").to_owned(),
            source_linked: reader.parse_attribute("sourceLinked"),
        }
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:numFmt")?;
        writer.attribute("formatCode", &self.format_code)?;
        writer.optional_attribute("sourceLinked", self.source_linked.as_ref())?;
        writer.end_element()
    }
}
