//! Sheet views, `sheetViews/sheetView`.
//!
//! Worksheets and chartsheets share the element name but not the attribute
//! set; chartsheet views only carry `tabSelected`, `zoomScale`,
//! `workbookViewId` and `zoomToFit`. Writing filters by [`SheetKind`].

use crate::ooxml::charts::column_to_letters;
use crate::ooxml::error::Result;
use crate::ooxml::xlsx::SheetKind;
use crate::ooxml::xml::{XmlReader, XmlWriter, xml_enum};
use std::io::{BufRead, Write};

xml_enum! {
    /// Worksheet view type.
    pub enum SheetViewType {
        Normal => "normal",
        PageBreakPreview => "pageBreakPreview",
        PageLayout => "pageLayout",
    }
}

xml_enum! {
    /// Pane of a split or frozen window.
    pub enum PaneType {
        BottomRight => "bottomRight",
        TopRight => "topRight",
        BottomLeft => "bottomLeft",
        TopLeft => "topLeft",
    }
}

xml_enum! {
    pub enum PaneState {
        Split => "split",
        Frozen => "frozen",
        FrozenSplit => "frozenSplit",
    }
}

/// Window split or frozen panes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pane {
    /// Horizontal split: column count when frozen, twips when split
    pub x_split: Option<f64>,
    pub y_split: Option<f64>,
    pub top_left_cell: Option<String>,
    pub active_pane: Option<PaneType>,
    pub state: Option<PaneState>,
}

impl Pane {
    /// Freeze the top `rows` rows and left `columns` columns.
    pub fn frozen(rows: u32, columns: u32) -> Self {
        let active_pane = match (columns > 0, rows > 0) {
            (true, true) => Some(PaneType::BottomRight),
            (true, false) => Some(PaneType::TopRight),
            (false, true) => Some(PaneType::BottomLeft),
            (false, false) => None,
        };
        Self {
            x_split: (columns > 0).then_some(f64::from(columns)),
            y_split: (rows > 0).then_some(f64::from(rows)),
            top_left_cell: Some(format!("{}{}", column_to_letters(columns + 1), rows + 1)),
            active_pane,
            state: Some(PaneState::Frozen),
        }
    }

    fn read<R: BufRead>(reader: &XmlReader<R>) -> Self {
        Self {
            x_split: reader.parse_attribute("xSplit"),
            y_split: reader.parse_attribute("ySplit"),
            top_left_cell: reader.attribute("topLeftCell").map(str::to_owned),
            active_pane: reader.parse_attribute("activePane"),
            state: reader.parse_attribute("state"),
        }
    }

    fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("pane")?;
        writer.optional_attribute("xSplit", self.x_split.as_ref())?;
        writer.optional_attribute("ySplit", self.y_split.as_ref())?;
        writer.optional_attribute("topLeftCell", self.top_left_cell.as_ref())?;
        writer.optional_attribute("activePane", self.active_pane.as_ref())?;
        writer.optional_attribute("state", self.state.as_ref())?;
        writer.end_element()
    }
}

/// Selected cells of one pane.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    pub pane: Option<PaneType>,
    pub active_cell: Option<String>,
    pub active_cell_id: Option<u32>,
    /// Space-separated list of ranges
    pub sqref: Option<String>,
}

impl Selection {
    pub fn new(active_cell: &str) -> Self {
        Self {
            active_cell: Some(active_cell.to_owned()),
            sqref: Some(active_cell.to_owned()),
            ..Default::default()
        }
    }

    fn read<R: BufRead>(reader: &XmlReader<R>) -> Self {
        Self {
            pane: reader.parse_attribute("pane"),
            active_cell: reader.attribute("activeCell").map(str::to_owned),
            active_cell_id: reader.parse_attribute("activeCellId"),
            sqref: reader.attribute("sqref").map(str::to_owned),
        }
    }

    fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("selection")?;
        writer.optional_attribute("pane", self.pane.as_ref())?;
        writer.optional_attribute("activeCell", self.active_cell.as_ref())?;
        writer.optional_attribute("activeCellId", self.active_cell_id.as_ref())?;
        writer.optional_attribute("sqref", self.sqref.as_ref())?;
        writer.end_element()
    }
}

/// One view of a worksheet or chartsheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetView {
    pub window_protection: Option<bool>,
    /// Show formulas instead of values.
    pub show_formulas: Option<bool>,
    pub show_grid_lines: Option<bool>,
    /// Show row/column headers.
    pub show_row_col_headers: Option<bool>,
    pub show_zeros: Option<bool>,
    pub right_to_left: Option<bool>,
    pub tab_selected: Option<bool>,
    pub show_ruler: Option<bool>,
    pub show_outline_symbols: Option<bool>,
    pub default_grid_color: Option<bool>,
    pub show_white_space: Option<bool>,
    pub view_type: Option<SheetViewType>,
    /// Top-left visible cell.
    pub top_left_cell: Option<String>,
    /// Indexed grid color
    pub color_id: Option<u32>,
    /// Zoom scale (10-400).
    pub zoom_scale: Option<u16>,
    pub zoom_scale_normal: Option<u16>,
    pub zoom_scale_sheet_layout_view: Option<u16>,
    pub zoom_scale_page_layout_view: Option<u16>,
    /// Chartsheets only: fit the chart to the window
    pub zoom_to_fit: Option<bool>,
    pub workbook_view_id: u32,
    pub pane: Option<Pane>,
    /// At most four, one per pane
    pub selections: Vec<Selection>,
}

impl SheetView {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when any setting beyond the workbook view id is present.
    pub fn is_valid(&self) -> bool {
        let bare = Self {
            workbook_view_id: self.workbook_view_id,
            ..Default::default()
        };
        *self != bare
    }

    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut view = Self {
            window_protection: reader.parse_attribute("windowProtection"),
            show_formulas: reader.parse_attribute("showFormulas"),
            show_grid_lines: reader.parse_attribute("showGridLines"),
            show_row_col_headers: reader.parse_attribute("showRowColHeaders"),
            show_zeros: reader.parse_attribute("showZeros"),
            right_to_left: reader.parse_attribute("rightToLeft"),
            tab_selected: reader.parse_attribute("tabSelected"),
            show_ruler: reader.parse_attribute("showRuler"),
            show_outline_symbols: reader.parse_attribute("showOutlineSymbols"),
            default_grid_color: reader.parse_attribute("defaultGridColor"),
            show_white_space: reader.parse_attribute("showWhiteSpace"),
            view_type: reader.parse_attribute("view"),
            top_left_cell: reader.attribute("topLeftCell").map(str::to_owned),
            color_id: reader.parse_attribute("colorId"),
            zoom_scale: reader.parse_attribute("zoomScale"),
            zoom_scale_normal: reader.parse_attribute("zoomScaleNormal"),
            zoom_scale_sheet_layout_view: reader.parse_attribute("zoomScaleSheetLayoutView"),
            zoom_scale_page_layout_view: reader.parse_attribute("zoomScalePageLayoutView"),
            zoom_to_fit: reader.parse_attribute("zoomToFit"),
            workbook_view_id: reader.parse_attribute("workbookViewId").unwrap_or(0),
            pane: None,
            selections: Vec::new(),
        };
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "pane" => view.pane = Some(Pane::read(reader)),
                "selection" => view.selections.push(Selection::read(reader)),
                _ => reader.skip_element()?,
            }
        }
        Ok(view)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>, kind: SheetKind) -> Result<()> {
        writer.start_element("sheetView")?;
        match kind {
            SheetKind::Worksheet => {
                writer.optional_attribute("windowProtection", self.window_protection.as_ref())?;
                writer.optional_attribute("showFormulas", self.show_formulas.as_ref())?;
                writer.optional_attribute("showGridLines", self.show_grid_lines.as_ref())?;
                writer.optional_attribute("showRowColHeaders", self.show_row_col_headers.as_ref())?;
                writer.optional_attribute("showZeros", self.show_zeros.as_ref())?;
                writer.optional_attribute("rightToLeft", self.right_to_left.as_ref())?;
                writer.optional_attribute("tabSelected", self.tab_selected.as_ref())?;
                writer.optional_attribute("showRuler", self.show_ruler.as_ref())?;
                writer.optional_attribute("showOutlineSymbols", self.show_outline_symbols.as_ref())?;
                writer.optional_attribute("defaultGridColor", self.default_grid_color.as_ref())?;
                writer.optional_attribute("showWhiteSpace", self.show_white_space.as_ref())?;
                writer.optional_attribute("view", self.view_type.as_ref())?;
                writer.optional_attribute("topLeftCell", self.top_left_cell.as_ref())?;
                writer.optional_attribute("colorId", self.color_id.as_ref())?;
                writer.optional_attribute("zoomScale", self.zoom_scale.as_ref())?;
                writer.optional_attribute("zoomScaleNormal", self.zoom_scale_normal.as_ref())?;
                writer.optional_attribute(
                    "zoomScaleSheetLayoutView",
                    self.zoom_scale_sheet_layout_view.as_ref(),
                )?;
                writer.optional_attribute(
                    "zoomScalePageLayoutView",
                    self.zoom_scale_page_layout_view.as_ref(),
                )?;
                writer.attribute("workbookViewId", &self.workbook_view_id)?;
                if let Some(pane) = &self.pane {
                    pane.write(writer)?;
                }
                for selection in self.selections.iter().take(4) {
                    selection.write(writer)?;
                }
            },
            SheetKind::Chartsheet => {
                writer.optional_attribute("tabSelected", self.tab_selected.as_ref())?;
                writer.optional_attribute("zoomScale", self.zoom_scale.as_ref())?;
                writer.attribute("workbookViewId", &self.workbook_view_id)?;
                writer.optional_attribute("zoomToFit", self.zoom_to_fit.as_ref())?;
            },
        }
        writer.end_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::options::{ReadOptions, WriteOptions};
    use pretty_assertions::assert_eq;

    fn write(view: &SheetView, kind: SheetKind) -> String {
        let mut writer = XmlWriter::in_memory(WriteOptions::new().with_xml_declaration(false));
        view.write(&mut writer, kind).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    fn read(xml: &str) -> SheetView {
        let mut reader = XmlReader::from_str(xml, ReadOptions::new());
        reader.next_root().unwrap();
        SheetView::read(&mut reader).unwrap()
    }

    #[test]
    fn frozen_pane_round_trip() {
        let mut view = SheetView::new();
        view.tab_selected = Some(true);
        view.zoom_scale = Some(85);
        view.pane = Some(Pane::frozen(1, 2));
        view.selections.push(Selection {
            pane: Some(PaneType::BottomRight),
            ..Selection::new("C2")
        });
        let xml = write(&view, SheetKind::Worksheet);
        assert_eq!(
            xml,
            concat!(
                r#"<sheetView tabSelected="1" zoomScale="85" workbookViewId="0">"#,
                r#"<pane xSplit="2" ySplit="1" topLeftCell="C2" activePane="bottomRight" state="frozen"/>"#,
                r#"<selection pane="bottomRight" activeCell="C2" sqref="C2"/></sheetView>"#
            )
        );
        assert_eq!(read(&xml), view);
    }

    #[test]
    fn chartsheet_views_drop_worksheet_attributes() {
        let mut view = SheetView::new();
        view.show_grid_lines = Some(false);
        view.zoom_to_fit = Some(true);
        view.zoom_scale = Some(120);
        view.pane = Some(Pane::frozen(3, 0));
        assert_eq!(
            write(&view, SheetKind::Chartsheet),
            r#"<sheetView zoomScale="120" workbookViewId="0" zoomToFit="1"/>"#
        );
    }

    #[test]
    fn validity_ignores_workbook_view_id() {
        let mut view = SheetView {
            workbook_view_id: 3,
            ..Default::default()
        };
        assert!(!view.is_valid());
        view.view_type = Some(SheetViewType::PageLayout);
        assert!(view.is_valid());
        assert_eq!(
            read(r#"<sheetView view="pageBreakPreview" workbookViewId="1"><extLst/></sheetView>"#)
                .view_type,
            Some(SheetViewType::PageBreakPreview)
        );
    }
}
