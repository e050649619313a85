//! Worksheet and chartsheet metadata.
//!
//! A [`Sheet`] keeps the display, print and protection records of one sheet
//! part together with the charts drawn on it. Cell content is out of scope:
//! [`Sheet::read`] passes over everything but the metadata elements.

use crate::ooxml::charts::{Chart, ChartKind, SheetRef};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::options::ReadOptions;
use crate::ooxml::xlsx::{
    HeaderFooter, Pane, PageMargins, PageSetup, PrintOptions, Selection, SheetProtection,
    SheetView,
};
use crate::ooxml::xml::{XmlReader, XmlWriter};
use std::io::{BufRead, Write};

/// Which sheet part a [`Sheet`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    /// `worksheet`: a grid of cells
    Worksheet,
    /// `chartsheet`: a single chart filling the sheet
    Chartsheet,
}

impl SheetKind {
    /// Root element name of the part.
    pub const fn root_element(self) -> &'static str {
        match self {
            Self::Worksheet => "worksheet",
            Self::Chartsheet => "chartsheet",
        }
    }

    pub fn from_root_element(name: &str) -> Option<Self> {
        match name {
            "worksheet" => Some(Self::Worksheet),
            "chartsheet" => Some(Self::Chartsheet),
            _ => None,
        }
    }
}

/// Metadata and charts of one sheet.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    kind: SheetKind,
    pub views: Vec<SheetView>,
    pub protection: Option<SheetProtection>,
    /// Worksheets only
    pub print_options: Option<PrintOptions>,
    pub page_margins: Option<PageMargins>,
    pub page_setup: Option<PageSetup>,
    pub header_footer: Option<HeaderFooter>,
    charts: Vec<Chart>,
}

impl Sheet {
    pub fn new(name: &str, kind: SheetKind) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            views: Vec::new(),
            protection: None,
            print_options: None,
            page_margins: None,
            page_setup: None,
            header_footer: None,
            charts: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the sheet; charts on it follow.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
        for chart in &mut self.charts {
            chart.set_sheet(Some(SheetRef::new(name, self.kind)));
        }
    }

    #[inline]
    pub fn kind(&self) -> SheetKind {
        self.kind
    }

    // ---- views ------------------------------------------------------------

    /// First view, if any.
    pub fn view(&self) -> Option<&SheetView> {
        self.views.first()
    }

    /// First view, created on demand.
    pub fn view_mut(&mut self) -> &mut SheetView {
        if self.views.is_empty() {
            self.views.push(SheetView::new());
        }
        &mut self.views[0]
    }

    pub fn tab_selected(&self) -> bool {
        self.view().and_then(|v| v.tab_selected).unwrap_or(false)
    }

    pub fn set_tab_selected(&mut self, selected: bool) {
        self.view_mut().tab_selected = Some(selected);
    }

    pub fn zoom_scale(&self) -> Option<u16> {
        self.view().and_then(|v| v.zoom_scale)
    }

    /// Set the zoom percentage, clamped to 10..=400.
    pub fn set_zoom_scale(&mut self, percent: u16) {
        self.view_mut().zoom_scale = Some(percent.clamp(10, 400));
    }

    pub fn right_to_left(&self) -> bool {
        self.view().and_then(|v| v.right_to_left).unwrap_or(false)
    }

    pub fn set_right_to_left(&mut self, right_to_left: bool) {
        self.view_mut().right_to_left = Some(right_to_left);
    }

    pub fn show_grid_lines(&self) -> bool {
        self.view().and_then(|v| v.show_grid_lines).unwrap_or(true)
    }

    pub fn set_show_grid_lines(&mut self, show: bool) {
        self.view_mut().show_grid_lines = Some(show);
    }

    pub fn zoom_to_fit(&self) -> bool {
        self.view().and_then(|v| v.zoom_to_fit).unwrap_or(false)
    }

    /// Chartsheets only; ignored on worksheets when written.
    pub fn set_zoom_to_fit(&mut self, fit: bool) {
        self.view_mut().zoom_to_fit = Some(fit);
    }

    /// Freeze the top `rows` and left `columns`. Zero for both unfreezes.
    pub fn freeze_panes(&mut self, rows: u32, columns: u32) {
        if rows == 0 && columns == 0 {
            self.unfreeze_panes();
            return;
        }
        let pane = Pane::frozen(rows, columns);
        let view = self.view_mut();
        let mut selection = Selection::new(pane.top_left_cell.as_deref().unwrap_or("A1"));
        selection.pane = pane.active_pane;
        view.selections = vec![selection];
        view.pane = Some(pane);
    }

    /// Drop the pane of the first view. Does not create a view.
    pub fn unfreeze_panes(&mut self) {
        if let Some(view) = self.views.first_mut() {
            view.pane = None;
            view.selections.retain(|s| s.pane.is_none());
        }
    }

    /// Frozen `(rows, columns)` of the first view.
    pub fn frozen_panes(&self) -> Option<(u32, u32)> {
        let pane = self.view()?.pane.as_ref()?;
        pane.state?;
        Some((
            pane.y_split.unwrap_or(0.0) as u32,
            pane.x_split.unwrap_or(0.0) as u32,
        ))
    }

    // ---- protection -------------------------------------------------------

    pub fn is_protected(&self) -> bool {
        self.protection.as_ref().is_some_and(|p| match self.kind {
            SheetKind::Worksheet => p.sheet == Some(true),
            SheetKind::Chartsheet => p.content == Some(true),
        })
    }

    /// Protection record, created on demand.
    pub fn protection_mut(&mut self) -> &mut SheetProtection {
        self.protection.get_or_insert_with(SheetProtection::new)
    }

    /// Turn protection on with an optional SHA-512 password.
    pub fn protect(&mut self, password: Option<&str>) -> Result<()> {
        let kind = self.kind;
        let protection = self.protection_mut();
        match kind {
            SheetKind::Worksheet => protection.sheet = Some(true),
            SheetKind::Chartsheet => protection.content = Some(true),
        }
        match password {
            Some(password) if !password.is_empty() => protection.set_password(password),
            _ => {
                protection.clear_password();
                Ok(())
            },
        }
    }

    pub fn unprotect(&mut self) {
        self.protection = None;
    }

    // ---- page layout ------------------------------------------------------

    /// Page setup record, created on demand.
    pub fn page_setup_mut(&mut self) -> &mut PageSetup {
        self.page_setup.get_or_insert_with(PageSetup::new)
    }

    /// Margins, created with the default values on demand.
    pub fn page_margins_mut(&mut self) -> &mut PageMargins {
        self.page_margins.get_or_insert_with(PageMargins::default)
    }

    pub fn header_footer_mut(&mut self) -> &mut HeaderFooter {
        self.header_footer.get_or_insert_with(HeaderFooter::default)
    }

    pub fn print_options_mut(&mut self) -> &mut PrintOptions {
        self.print_options.get_or_insert_with(PrintOptions::default)
    }

    // ---- charts -----------------------------------------------------------

    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    pub fn chart_mut(&mut self, index: usize) -> Option<&mut Chart> {
        self.charts.get_mut(index)
    }

    /// Create a chart on this sheet. A chartsheet holds at most one chart;
    /// a second insert returns `None`.
    pub fn insert_chart(&mut self, kind: ChartKind) -> Option<&mut Chart> {
        self.attach_chart(Chart::new(kind))
    }

    /// Attach an existing chart, pointing its sheet back-reference here.
    pub fn attach_chart(&mut self, mut chart: Chart) -> Option<&mut Chart> {
        if self.kind == SheetKind::Chartsheet && !self.charts.is_empty() {
            log::debug!("chartsheet {} already holds a chart", self.name);
            return None;
        }
        chart.set_sheet(Some(SheetRef::new(&self.name, self.kind)));
        self.charts.push(chart);
        self.charts.last_mut()
    }

    pub fn remove_chart(&mut self, index: usize) -> Option<Chart> {
        if index >= self.charts.len() {
            return None;
        }
        let mut chart = self.charts.remove(index);
        chart.set_sheet(None);
        Some(chart)
    }

    // ---- XML --------------------------------------------------------------

    /// Parse a whole worksheet or chartsheet part, keeping only its
    /// metadata.
    pub fn from_xml(name: &str, xml: &str, options: ReadOptions) -> Result<Self> {
        let mut reader = XmlReader::from_str(xml, options);
        Self::read(&mut reader, name)
    }

    /// Consume a `worksheet` or `chartsheet` root from `reader`.
    pub fn read<R: BufRead>(reader: &mut XmlReader<R>, name: &str) -> Result<Self> {
        if !reader.next_root()? {
            return Err(OoxmlError::InvalidFormat("empty sheet part".to_string()));
        }
        let kind = SheetKind::from_root_element(reader.name()).ok_or_else(|| {
            OoxmlError::InvalidFormat(format!("unexpected sheet root <{}>", reader.name()))
        })?;
        let mut sheet = Self::new(name, kind);
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "sheetViews" => {
                    let views_depth = reader.depth();
                    while reader.next_child(views_depth)? {
                        if reader.name() == "sheetView" {
                            sheet.views.push(SheetView::read(reader)?);
                        } else {
                            reader.skip_element()?;
                        }
                    }
                },
                "sheetProtection" => sheet.protection = Some(SheetProtection::read(reader)),
                "printOptions" => sheet.print_options = Some(PrintOptions::read(reader)),
                "pageMargins" => sheet.page_margins = Some(PageMargins::read(reader)),
                "pageSetup" => sheet.page_setup = Some(PageSetup::read(reader)),
                "headerFooter" => sheet.header_footer = Some(HeaderFooter::read(reader)?),
                _ => reader.skip_element()?,
            }
        }
        Ok(sheet)
    }

    /// Write `sheetViews`; nothing when the sheet has no view.
    pub fn write_views<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        if self.views.is_empty() {
            return Ok(());
        }
        writer.start_element("sheetViews")?;
        for view in &self.views {
            view.write(writer, self.kind)?;
        }
        writer.end_element()
    }

    pub fn write_protection<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match &self.protection {
            Some(protection) if protection.is_valid() => protection.write(writer, self.kind),
            _ => Ok(()),
        }
    }

    /// Write `printOptions`, `pageMargins`, `pageSetup` and `headerFooter`
    /// in schema order.
    pub fn write_page_layout<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        if self.kind == SheetKind::Worksheet
            && let Some(options) = &self.print_options
            && options.is_valid()
        {
            options.write(writer)?;
        }
        if let Some(margins) = &self.page_margins {
            margins.write(writer)?;
        }
        if let Some(setup) = &self.page_setup
            && setup.is_valid()
        {
            setup.write(writer, self.kind)?;
        }
        if let Some(header_footer) = &self.header_footer
            && header_footer.is_valid()
        {
            header_footer.write(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::options::WriteOptions;
    use crate::ooxml::xlsx::{PageOrientation, PaneState};
    use pretty_assertions::assert_eq;

    fn fragment() -> XmlWriter<Vec<u8>> {
        XmlWriter::in_memory(WriteOptions::new().with_xml_declaration(false))
    }

    fn finish(writer: XmlWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn getters_never_create_views() {
        let mut sheet = Sheet::new("Data", SheetKind::Worksheet);
        assert!(!sheet.tab_selected());
        assert_eq!(sheet.zoom_scale(), None);
        assert!(sheet.show_grid_lines());
        sheet.unfreeze_panes();
        assert!(sheet.views.is_empty());

        sheet.set_tab_selected(true);
        assert_eq!(sheet.views.len(), 1);
        sheet.set_zoom_scale(1000);
        assert_eq!(sheet.views.len(), 1);
        assert_eq!(sheet.zoom_scale(), Some(400));
    }

    #[test]
    fn freeze_panes_sets_pane_and_selection() {
        let mut sheet = Sheet::new("Data", SheetKind::Worksheet);
        sheet.freeze_panes(1, 2);
        let view = sheet.view().unwrap();
        let pane = view.pane.as_ref().unwrap();
        assert_eq!(pane.top_left_cell.as_deref(), Some("C2"));
        assert_eq!(pane.state, Some(PaneState::Frozen));
        assert_eq!(view.selections[0].active_cell.as_deref(), Some("C2"));
        assert_eq!(sheet.frozen_panes(), Some((1, 2)));

        sheet.freeze_panes(0, 0);
        assert_eq!(sheet.frozen_panes(), None);
        assert!(sheet.view().unwrap().selections.is_empty());
    }

    #[test]
    fn chartsheet_holds_one_chart() {
        let mut sheet = Sheet::new("Chart1", SheetKind::Chartsheet);
        let chart = sheet.insert_chart(ChartKind::Pie).unwrap();
        assert_eq!(chart.sheet().map(|s| s.kind), Some(SheetKind::Chartsheet));
        assert!(sheet.insert_chart(ChartKind::Bar).is_none());
        assert_eq!(sheet.charts().len(), 1);

        let removed = sheet.remove_chart(0).unwrap();
        assert!(removed.sheet().is_none());
        assert!(sheet.insert_chart(ChartKind::Bar).is_some());
    }

    #[test]
    fn renaming_updates_chart_back_references() {
        let mut sheet = Sheet::new("Old", SheetKind::Worksheet);
        sheet.insert_chart(ChartKind::Line);
        sheet.insert_chart(ChartKind::Area);
        sheet.set_name("New");
        assert!(
            sheet
                .charts()
                .iter()
                .all(|c| c.sheet().map(|s| s.name.as_str()) == Some("New"))
        );
    }

    #[test]
    fn protect_follows_sheet_kind() {
        let mut sheet = Sheet::new("Chart1", SheetKind::Chartsheet);
        sheet.protect(None).unwrap();
        assert!(sheet.is_protected());
        let protection = sheet.protection.as_ref().unwrap();
        assert_eq!(protection.content, Some(true));
        assert_eq!(protection.sheet, None);

        sheet.unprotect();
        assert!(!sheet.is_protected());
    }

    #[test]
    fn reads_metadata_and_skips_cells() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <dimension ref="A1:B2"/>
  <sheetViews>
    <sheetView tabSelected="1" zoomScale="85" workbookViewId="0">
      <pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/>
      <selection pane="bottomLeft" activeCell="A2" sqref="A2"/>
    </sheetView>
  </sheetViews>
  <sheetData><row r="1"><c r="A1"><v>1</v></c></row></sheetData>
  <sheetProtection password="83AF" sheet="1" objects="1"/>
  <printOptions gridLines="1"/>
  <pageMargins left="0.5" right="0.5" top="1" bottom="1" header="0.3" footer="0.3"/>
  <pageSetup orientation="landscape" r:id="rId1"/>
  <headerFooter><oddHeader>&amp;CReport</oddHeader></headerFooter>
</worksheet>"#;
        let sheet = Sheet::from_xml("Data", xml, ReadOptions::new()).unwrap();
        assert_eq!(sheet.kind(), SheetKind::Worksheet);
        assert!(sheet.tab_selected());
        assert_eq!(sheet.zoom_scale(), Some(85));
        assert_eq!(sheet.frozen_panes(), Some((1, 0)));
        assert!(sheet.is_protected());
        assert!(sheet.protection.as_ref().unwrap().verify_password("password"));
        assert_eq!(sheet.page_margins.as_ref().unwrap().left, 0.5);
        let setup = sheet.page_setup.as_ref().unwrap();
        assert_eq!(setup.orientation, Some(PageOrientation::Landscape));
        assert_eq!(setup.relationship_id.as_deref(), Some("rId1"));
        assert_eq!(
            sheet.header_footer.as_ref().unwrap().odd_header.as_deref(),
            Some("&CReport")
        );
    }

    #[test]
    fn unknown_root_is_rejected() {
        let err = Sheet::from_xml("x", "<dialogsheet/>", ReadOptions::new()).unwrap_err();
        assert!(matches!(err, OoxmlError::InvalidFormat(_)));
    }

    #[test]
    fn chartsheet_page_layout_skips_print_options() {
        let mut sheet = Sheet::new("Chart1", SheetKind::Chartsheet);
        sheet.print_options_mut().grid_lines = Some(true);
        sheet.page_margins_mut();
        sheet.page_setup_mut().orientation = Some(PageOrientation::Landscape);
        let mut writer = fragment();
        sheet.write_page_layout(&mut writer).unwrap();
        assert_eq!(
            finish(writer),
            concat!(
                r#"<pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/>"#,
                r#"<pageSetup orientation="landscape"/>"#,
            )
        );
    }

    #[test]
    fn views_round_trip_through_write() {
        let mut sheet = Sheet::new("Data", SheetKind::Worksheet);
        sheet.set_tab_selected(true);
        sheet.freeze_panes(2, 0);
        let mut writer = fragment();
        writer.start_element("worksheet").unwrap();
        sheet.write_views(&mut writer).unwrap();
        writer.end_element().unwrap();
        let xml = finish(writer);

        let back = Sheet::from_xml("Data", &xml, ReadOptions::new()).unwrap();
        assert_eq!(back.views, sheet.views);
    }
}
