//! Data labels, `c:dLbls` and `c:dLbl`.

use crate::ooxml::charts::format::{BlipFill, ShapeFormat, TextFormat};
use crate::ooxml::charts::models::{Layout, NumberFormat, Text};
use crate::ooxml::charts::types::LabelPosition;
use crate::ooxml::error::Result;
use crate::ooxml::xml::{XmlReader, XmlWriter};
use bitflags::bitflags;
use std::io::{BufRead, Write};

bitflags! {
    /// Which parts of a data point a label shows.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LabelShow: u8 {
        const LEGEND_KEY = 1 << 0;
        const VALUE = 1 << 1;
        const CATEGORY_NAME = 1 << 2;
        const SERIES_NAME = 1 << 3;
        const PERCENT = 1 << 4;
        const BUBBLE_SIZE = 1 << 5;
    }
}

/// Element name of each flag, in schema order.
const SHOW_ELEMENTS: [(LabelShow, &str); 6] = [
    (LabelShow::LEGEND_KEY, "showLegendKey"),
    (LabelShow::VALUE, "showVal"),
    (LabelShow::CATEGORY_NAME, "showCatName"),
    (LabelShow::SERIES_NAME, "showSerName"),
    (LabelShow::PERCENT, "showPercent"),
    (LabelShow::BUBBLE_SIZE, "showBubbleSize"),
];

fn show_flag(name: &str) -> Option<LabelShow> {
    SHOW_ELEMENTS
        .iter()
        .find(|(_, element)| *element == name)
        .map(|(flag, _)| *flag)
}

fn write_show<W: Write>(writer: &mut XmlWriter<W>, show: LabelShow) -> Result<()> {
    for (flag, element) in SHOW_ELEMENTS {
        writer.val_element(&format!("c:{element}"), &show.contains(flag))?;
    }
    Ok(())
}

/// Label of one data point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Label {
    /// Point index
    pub index: u32,
    /// Hide this point's label
    pub deleted: bool,
    pub layout: Option<Layout>,
    pub text: Option<Text>,
    pub number_format: Option<NumberFormat>,
    pub shape: Option<ShapeFormat>,
    pub text_format: Option<TextFormat>,
    pub position: Option<LabelPosition>,
    /// `None` leaves the show flags unwritten
    pub show: Option<LabelShow>,
    pub separator: Option<String>,
}

impl Label {
    pub fn new(index: u32, show: LabelShow) -> Self {
        Self {
            index,
            show: Some(show),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: LabelPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut label = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            let name = reader.name();
            if let Some(flag) = show_flag(name) {
                let show = label.show.get_or_insert_with(LabelShow::empty);
                show.set(flag, reader.bool_val().unwrap_or(false));
                continue;
            }
            match name {
                "idx" => label.index = reader.val().unwrap_or(0),
                "delete" => label.deleted = reader.bool_val().unwrap_or(false),
                "layout" => label.layout = Some(Layout::read(reader)?),
                "tx" => label.text = Text::read(reader)?,
                "numFmt" => label.number_format = Some(NumberFormat::read(reader)),
                "spPr" => label.shape = Some(ShapeFormat::read(reader)?),
                "txPr" => label.text_format = Some(TextFormat::read(reader)?),
                "dLblPos" => label.position = reader.val(),
                "separator" => label.separator = Some(reader.read_text()?),
                _ => reader.skip_element()?,
            }
        }
        Ok(label)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:dLbl")?;
        writer.val_element("c:idx", &self.index)?;
        if self.deleted {
            writer.val_element("c:delete", &true)?;
            return writer.end_element();
        }
        if let Some(layout) = &self.layout {
            layout.write(writer)?;
        }
        if let Some(text) = &self.text {
            text.write(writer)?;
        }
        if let Some(format) = &self.number_format {
            format.write(writer)?;
        }
        if let Some(shape) = &self.shape {
            shape.write(writer)?;
        }
        if let Some(format) = &self.text_format {
            format.write(writer)?;
        }
        writer.optional_val_element("c:dLblPos", self.position.as_ref())?;
        if let Some(show) = self.show {
            write_show(writer, show)?;
        }
        if let Some(separator) = &self.separator {
            writer.text_element("c:separator", separator)?;
        }
        writer.end_element()
    }
}

/// Label settings of a series or a whole chart-type block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Labels {
    /// Per-point overrides, kept sorted by point index
    pub points: Vec<Label>,
    /// Hide all labels
    pub deleted: bool,
    pub number_format: Option<NumberFormat>,
    pub shape: Option<ShapeFormat>,
    pub text_format: Option<TextFormat>,
    pub position: Option<LabelPosition>,
    /// Default display for all points; `None` leaves the flags unwritten
    pub show: Option<LabelShow>,
    pub separator: Option<String>,
    pub show_leader_lines: Option<bool>,
}

impl Labels {
    /// Labels showing `show` on every point.
    pub fn showing(show: LabelShow) -> Self {
        Self {
            show: Some(show),
            ..Default::default()
        }
    }

    /// True when nothing would be written.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Override for one point.
    pub fn point(&self, index: u32) -> Option<&Label> {
        self.points.iter().find(|label| label.index == index)
    }

    /// Insert or replace the override for `label.index`.
    pub fn replace_point(&mut self, label: Label) -> Option<Label> {
        match self.points.binary_search_by_key(&label.index, |l| l.index) {
            Ok(pos) => Some(std::mem::replace(&mut self.points[pos], label)),
            Err(pos) => {
                self.points.insert(pos, label);
                None
            },
        }
    }

    /// Mutate an existing override in place. Returns false if there is none.
    pub fn update_point(&mut self, index: u32, update: impl FnOnce(&mut Label)) -> bool {
        match self.points.iter_mut().find(|label| label.index == index) {
            Some(label) => {
                update(label);
                true
            },
            None => false,
        }
    }

    pub fn remove_point(&mut self, index: u32) -> Option<Label> {
        let pos = self.points.iter().position(|label| label.index == index)?;
        Some(self.points.remove(pos))
    }

    pub(crate) fn visit_blips(&mut self, visit: &mut dyn FnMut(&mut BlipFill)) {
        ShapeFormat::visit_optional(&mut self.shape, visit);
        for label in &mut self.points {
            ShapeFormat::visit_optional(&mut label.shape, visit);
        }
    }

    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut labels = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            let name = reader.name();
            if let Some(flag) = show_flag(name) {
                let show = labels.show.get_or_insert_with(LabelShow::empty);
                show.set(flag, reader.bool_val().unwrap_or(false));
                continue;
            }
            match name {
                "dLbl" => {
                    let label = Label::read(reader)?;
                    labels.replace_point(label);
                },
                "delete" => labels.deleted = reader.bool_val().unwrap_or(false),
                "numFmt" => labels.number_format = Some(NumberFormat::read(reader)),
                "spPr" => labels.shape = Some(ShapeFormat::read(reader)?),
                "txPr" => labels.text_format = Some(TextFormat::read(reader)?),
                "dLblPos" => labels.position = reader.val(),
                "separator" => labels.separator = Some(reader.read_text()?),
                "showLeaderLines" => labels.show_leader_lines = reader.bool_val(),
                _ => reader.skip_element()?,
            }
        }
        Ok(labels)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:dLbls")?;
        for label in &self.points {
            label.write(writer)?;
        }
        if self.deleted {
            writer.val_element("c:delete", &true)?;
            return writer.end_element();
        }
        if let Some(format) = &self.number_format {
            format.write(writer)?;
        }
        if let Some(shape) = &self.shape {
            shape.write(writer)?;
        }
        if let Some(format) = &self.text_format {
            format.write(writer)?;
        }
        writer.optional_val_element("c:dLblPos", self.position.as_ref())?;
        if let Some(show) = self.show {
            write_show(writer, show)?;
        }
        if let Some(separator) = &self.separator {
            writer.text_element("c:separator", separator)?;
        }
        writer.optional_val_element("c:showLeaderLines", self.show_leader_lines.as_ref())?;
        writer.end_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::options::{ReadOptions, WriteOptions};
    use pretty_assertions::assert_eq;

    fn round_trip(labels: &Labels) -> (String, Labels) {
        let mut writer = XmlWriter::in_memory(WriteOptions::new().with_xml_declaration(false));
        labels.write(&mut writer).unwrap();
        let xml = String::from_utf8(writer.finish().unwrap()).unwrap();
        let mut reader = XmlReader::from_str(&xml, ReadOptions::new());
        reader.next_root().unwrap();
        let back = Labels::read(&mut reader).unwrap();
        (xml, back)
    }

    #[test]
    fn show_flags_written_in_schema_order() {
        let labels = Labels::showing(LabelShow::VALUE | LabelShow::PERCENT);
        let (xml, back) = round_trip(&labels);
        assert_eq!(
            xml,
            concat!(
                r#"<c:dLbls><c:showLegendKey val="0"/><c:showVal val="1"/><c:showCatName val="0"/>"#,
                r#"<c:showSerName val="0"/><c:showPercent val="1"/><c:showBubbleSize val="0"/></c:dLbls>"#
            )
        );
        assert_eq!(back, labels);
    }

    #[test]
    fn point_overrides_stay_sorted() {
        let mut labels = Labels::showing(LabelShow::empty());
        labels.replace_point(Label::new(3, LabelShow::VALUE));
        labels.replace_point(Label::new(1, LabelShow::VALUE).with_position(LabelPosition::Top));
        assert!(labels.replace_point(Label::new(3, LabelShow::SERIES_NAME)).is_some());
        assert_eq!(labels.points.iter().map(|l| l.index).collect::<Vec<_>>(), [1, 3]);

        assert!(labels.update_point(1, |l| l.separator = Some("; ".into())));
        assert!(!labels.update_point(7, |_| {}));

        let (_, back) = round_trip(&labels);
        assert_eq!(back, labels);

        assert!(labels.remove_point(1).is_some());
        assert!(labels.point(1).is_none());
    }

    #[test]
    fn deleted_labels_write_only_delete() {
        let labels = Labels {
            deleted: true,
            show: Some(LabelShow::VALUE),
            ..Default::default()
        };
        let (xml, _) = round_trip(&labels);
        assert_eq!(xml, r#"<c:dLbls><c:delete val="1"/></c:dLbls>"#);
    }
}
