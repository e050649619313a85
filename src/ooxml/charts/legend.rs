//! Chart legend and data table.

use crate::ooxml::charts::format::{ShapeFormat, TextFormat};
use crate::ooxml::charts::models::Layout;
use crate::ooxml::charts::types::LegendPosition;
use crate::ooxml::error::Result;
use crate::ooxml::xml::{XmlReader, XmlWriter};
use std::io::{BufRead, Write};

/// Chart legend, `c:legend`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Legend {
    pub position: Option<LegendPosition>,
    /// Per-entry overrides, one per series index
    pub entries: Vec<LegendEntry>,
    pub layout: Option<Layout>,
    /// Overlay on the plot area
    pub overlay: Option<bool>,
    pub shape: Option<ShapeFormat>,
    pub text_format: Option<TextFormat>,
}

impl Legend {
    /// Create a legend at `position`.
    #[inline]
    pub fn new(position: LegendPosition) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    /// Set whether to overlay on chart.
    #[inline]
    pub fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Set manual layout.
    #[inline]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Hide the entry of one series.
    pub fn hide_entry(&mut self, index: u32) {
        match self.entries.iter_mut().find(|e| e.index == index) {
            Some(entry) => entry.deleted = true,
            None => self.entries.push(LegendEntry {
                index,
                deleted: true,
                text_format: None,
            }),
        }
    }

    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut legend = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "legendPos" => legend.position = reader.val(),
                "legendEntry" => legend.entries.push(LegendEntry::read(reader)?),
                "layout" => legend.layout = Some(Layout::read(reader)?),
                "overlay" => legend.overlay = reader.bool_val(),
                "spPr" => legend.shape = Some(ShapeFormat::read(reader)?),
                "txPr" => legend.text_format = Some(TextFormat::read(reader)?),
                _ => reader.skip_element()?,
            }
        }
        Ok(legend)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:legend")?;
        writer.optional_val_element("c:legendPos", self.position.as_ref())?;
        for entry in &self.entries {
            entry.write(writer)?;
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

/// Individual legend entry. A deleted entry carries no formatting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LegendEntry {
    pub index: u32,
    pub deleted: bool,
    pub text_format: Option<TextFormat>,
}

impl LegendEntry {
    #[inline]
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut entry = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "idx" => entry.index = reader.val().unwrap_or(0),
                "delete" => entry.deleted = reader.bool_val().unwrap_or(false),
                "txPr" => entry.text_format = Some(TextFormat::read(reader)?),
                _ => reader.skip_element()?,
            }
        }
        Ok(entry)
    }

    fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:legendEntry")?;
        writer.val_element("c:idx", &self.index)?;
        if self.deleted {
            writer.val_element("c:delete", &true)?;
        } else if let Some(format) = &self.text_format {
            format.write(writer)?;
        }
        writer.end_element()
    }
}

/// Data table below the plot area, `c:dTable`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTable {
    pub show_horizontal_border: Option<bool>,
    pub show_vertical_border: Option<bool>,
    pub show_outline: Option<bool>,
    pub show_keys: Option<bool>,
    pub shape: Option<ShapeFormat>,
    pub text_format: Option<TextFormat>,
}

impl DataTable {
    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut table = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "showHorzBorder" => table.show_horizontal_border = reader.bool_val(),
                "showVertBorder" => table.show_vertical_border = reader.bool_val(),
                "showOutline" => table.show_outline = reader.bool_val(),
                "showKeys" => table.show_keys = reader.bool_val(),
                "spPr" => table.shape = Some(ShapeFormat::read(reader)?),
                "txPr" => table.text_format = Some(TextFormat::read(reader)?),
                _ => reader.skip_element()?,
            }
        }
        Ok(table)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:dTable")?;
        writer.optional_val_element("c:showHorzBorder", self.show_horizontal_border.as_ref())?;
        writer.optional_val_element("c:showVertBorder", self.show_vertical_border.as_ref())?;
        writer.optional_val_element("c:showOutline", self.show_outline.as_ref())?;
        writer.optional_val_element("c:showKeys", self.show_keys.as_ref())?;
        if let Some(shape) = &self.shape {
            shape.write(writer)?;
        }
        if let Some(format) = &self.text_format {
            format.write(writer)?;
        }
        writer.end_element()
    }
}
