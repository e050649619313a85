//! Print layout records: `printOptions`, `pageMargins`, `pageSetup` and
//! `headerFooter`.

use crate::ooxml::error::Result;
use crate::ooxml::xlsx::SheetKind;
use crate::ooxml::xml::{XmlReader, XmlWriter, xml_enum};
use std::io::{BufRead, Write};

xml_enum! {
    pub enum PageOrientation {
        Default => "default",
        Portrait => "portrait",
        Landscape => "landscape",
    }
}

xml_enum! {
    pub enum PageOrder {
        DownThenOver => "downThenOver",
        OverThenDown => "overThenDown",
    }
}

xml_enum! {
    /// How cell comments are printed.
    pub enum PrintComments {
        None => "none",
        AsDisplayed => "asDisplayed",
        AtEnd => "atEnd",
    }
}

xml_enum! {
    /// How cell errors are printed.
    pub enum PrintErrors {
        Displayed => "displayed",
        Blank => "blank",
        Dash => "dash",
        NotAvailable => "NA",
    }
}

/// Page setup, `pageSetup`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageSetup {
    /// Paper size index (1 = Letter, 9 = A4, ...)
    pub paper_size: Option<u32>,
    /// Custom paper height with units, e.g. `297mm`
    pub paper_height: Option<String>,
    pub paper_width: Option<String>,
    /// Print scale in percent (10-400); worksheets only
    pub scale: Option<u32>,
    pub first_page_number: Option<u32>,
    pub fit_to_width: Option<u32>,
    pub fit_to_height: Option<u32>,
    pub page_order: Option<PageOrder>,
    pub orientation: Option<PageOrientation>,
    pub use_printer_defaults: Option<bool>,
    pub black_and_white: Option<bool>,
    pub draft: Option<bool>,
    pub cell_comments: Option<PrintComments>,
    pub use_first_page_number: Option<bool>,
    pub errors: Option<PrintErrors>,
    pub horizontal_dpi: Option<u32>,
    pub vertical_dpi: Option<u32>,
    pub copies: Option<u32>,
    /// Relationship id of the printer settings part
    pub relationship_id: Option<String>,
}

impl PageSetup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orientation(mut self, orientation: PageOrientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn with_paper_size(mut self, paper_size: u32) -> Self {
        self.paper_size = Some(paper_size);
        self
    }

    /// Fit the printout to `width` by `height` pages.
    pub fn with_fit_to(mut self, width: u32, height: u32) -> Self {
        self.fit_to_width = Some(width);
        self.fit_to_height = Some(height);
        self
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::default()
    }

    pub fn read<R: BufRead>(reader: &XmlReader<R>) -> Self {
        Self {
            paper_size: reader.parse_attribute("paperSize"),
            paper_height: reader.attribute("paperHeight").map(str::to_owned),
            paper_width: reader.attribute("paperWidth").map(str::to_owned),
            scale: reader.parse_attribute("scale"),
            first_page_number: reader.parse_attribute("firstPageNumber"),
            fit_to_width: reader.parse_attribute("fitToWidth"),
            fit_to_height: reader.parse_attribute("fitToHeight"),
            page_order: reader.parse_attribute("pageOrder"),
            orientation: reader.parse_attribute("orientation"),
            use_printer_defaults: reader.parse_attribute("usePrinterDefaults"),
            black_and_white: reader.parse_attribute("blackAndWhite"),
            draft: reader.parse_attribute("draft"),
            cell_comments: reader.parse_attribute("cellComments"),
            use_first_page_number: reader.parse_attribute("useFirstPageNumber"),
            errors: reader.parse_attribute("errors"),
            horizontal_dpi: reader.parse_attribute("horizontalDpi"),
            vertical_dpi: reader.parse_attribute("verticalDpi"),
            copies: reader.parse_attribute("copies"),
            relationship_id: reader.attribute("id").map(str::to_owned),
        }
    }

    /// Write `pageSetup`; chartsheets drop the worksheet-only attributes.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>, kind: SheetKind) -> Result<()> {
        let worksheet = kind == SheetKind::Worksheet;
        writer.start_element("pageSetup")?;
        writer.optional_attribute("paperSize", self.paper_size.as_ref())?;
        writer.optional_attribute("paperHeight", self.paper_height.as_ref())?;
        writer.optional_attribute("paperWidth", self.paper_width.as_ref())?;
        if worksheet {
            writer.optional_attribute("scale", self.scale.as_ref())?;
        }
        writer.optional_attribute("firstPageNumber", self.first_page_number.as_ref())?;
        if worksheet {
            writer.optional_attribute("fitToWidth", self.fit_to_width.as_ref())?;
            writer.optional_attribute("fitToHeight", self.fit_to_height.as_ref())?;
            writer.optional_attribute("pageOrder", self.page_order.as_ref())?;
        }
        writer.optional_attribute("orientation", self.orientation.as_ref())?;
        writer.optional_attribute("usePrinterDefaults", self.use_printer_defaults.as_ref())?;
        writer.optional_attribute("blackAndWhite", self.black_and_white.as_ref())?;
        writer.optional_attribute("draft", self.draft.as_ref())?;
        if worksheet {
            writer.optional_attribute("cellComments", self.cell_comments.as_ref())?;
        }
        writer.optional_attribute("useFirstPageNumber", self.use_first_page_number.as_ref())?;
        if worksheet {
            writer.optional_attribute("errors", self.errors.as_ref())?;
        }
        writer.optional_attribute("horizontalDpi", self.horizontal_dpi.as_ref())?;
        writer.optional_attribute("verticalDpi", self.vertical_dpi.as_ref())?;
        writer.optional_attribute("copies", self.copies.as_ref())?;
        writer.optional_attribute("r:id", self.relationship_id.as_ref())?;
        writer.end_element()
    }
}

/// Page margins in inches, `pageMargins`. Every margin is required.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMargins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub header: f64,
    pub footer: f64,
}

impl Default for PageMargins {
    /// Excel's "Normal" margins.
    fn default() -> Self {
        Self {
            left: 0.7,
            right: 0.7,
            top: 0.75,
            bottom: 0.75,
            header: 0.3,
            footer: 0.3,
        }
    }
}

impl PageMargins {
    pub fn read<R: BufRead>(reader: &XmlReader<R>) -> Self {
        let defaults = Self::default();
        Self {
            left: reader.parse_attribute("left").unwrap_or(defaults.left),
            right: reader.parse_attribute("right").unwrap_or(defaults.right),
            top: reader.parse_attribute("top").unwrap_or(defaults.top),
            bottom: reader.parse_attribute("bottom").unwrap_or(defaults.bottom),
            header: reader.parse_attribute("header").unwrap_or(defaults.header),
            footer: reader.parse_attribute("footer").unwrap_or(defaults.footer),
        }
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("pageMargins")?;
        writer.attribute("left", &self.left)?;
        writer.attribute("right", &self.right)?;
        writer.attribute("top", &self.top)?;
        writer.attribute("bottom", &self.bottom)?;
        writer.attribute("header", &self.header)?;
        writer.attribute("footer", &self.footer)?;
        writer.end_element()
    }
}

/// Worksheet print options, `printOptions`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrintOptions {
    pub horizontal_centered: Option<bool>,
    pub vertical_centered: Option<bool>,
    /// Print row and column headings
    pub headings: Option<bool>,
    pub grid_lines: Option<bool>,
    pub grid_lines_set: Option<bool>,
}

impl PrintOptions {
    pub fn is_valid(&self) -> bool {
        *self != Self::default()
    }

    pub fn read<R: BufRead>(reader: &XmlReader<R>) -> Self {
        Self {
            horizontal_centered: reader.parse_attribute("horizontalCentered"),
            vertical_centered: reader.parse_attribute("verticalCentered"),
            headings: reader.parse_attribute("headings"),
            grid_lines: reader.parse_attribute("gridLines"),
            grid_lines_set: reader.parse_attribute("gridLinesSet"),
        }
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("printOptions")?;
        writer.optional_attribute("horizontalCentered", self.horizontal_centered.as_ref())?;
        writer.optional_attribute("verticalCentered", self.vertical_centered.as_ref())?;
        writer.optional_attribute("headings", self.headings.as_ref())?;
        writer.optional_attribute("gridLines", self.grid_lines.as_ref())?;
        writer.optional_attribute("gridLinesSet", self.grid_lines_set.as_ref())?;
        writer.end_element()
    }
}

/// Printed headers and footers, `headerFooter`.
///
/// Texts use Excel's section codes: `&L`, `&C` and `&R` start the left,
/// centre and right sections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderFooter {
    pub different_odd_even: Option<bool>,
    pub different_first: Option<bool>,
    pub scale_with_document: Option<bool>,
    pub align_with_margins: Option<bool>,
    pub odd_header: Option<String>,
    pub odd_footer: Option<String>,
    pub even_header: Option<String>,
    pub even_footer: Option<String>,
    pub first_header: Option<String>,
    pub first_footer: Option<String>,
}

impl HeaderFooter {
    /// Join left/centre/right sections into one header or footer text.
    ///
    /// ```
    /// use chartml::ooxml::xlsx::HeaderFooter;
    /// assert_eq!(HeaderFooter::sections(Some("Draft"), None, Some("&P")), "&LDraft&R&P");
    /// ```
    pub fn sections(left: Option<&str>, center: Option<&str>, right: Option<&str>) -> String {
        let mut text = String::new();
        for (code, section) in [("&L", left), ("&C", center), ("&R", right)] {
            if let Some(section) = section {
                text.push_str(code);
                text.push_str(section);
            }
        }
        text
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::default()
    }

    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut hf = Self {
            different_odd_even: reader.parse_attribute("differentOddEven"),
            different_first: reader.parse_attribute("differentFirst"),
            scale_with_document: reader.parse_attribute("scaleWithDoc"),
            align_with_margins: reader.parse_attribute("alignWithMargins"),
            ..Default::default()
        };
        let depth = reader.depth();
        while reader.next_child(depth)? {
            let slot = match reader.name() {
                "oddHeader" => &mut hf.odd_header,
                "oddFooter" => &mut hf.odd_footer,
                "evenHeader" => &mut hf.even_header,
                "evenFooter" => &mut hf.even_footer,
                "firstHeader" => &mut hf.first_header,
                "firstFooter" => &mut hf.first_footer,
                _ => {
                    reader.skip_element()?;
                    continue;
                },
            };
            *slot = Some(reader.read_text()?);
        }
        Ok(hf)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("headerFooter")?;
        writer.optional_attribute("differentOddEven", self.different_odd_even.as_ref())?;
        writer.optional_attribute("differentFirst", self.different_first.as_ref())?;
        writer.optional_attribute("scaleWithDoc", self.scale_with_document.as_ref())?;
        writer.optional_attribute("alignWithMargins", self.align_with_margins.as_ref())?;
        let texts = [
            ("oddHeader", &self.odd_header),
            ("oddFooter", &self.odd_footer),
            ("evenHeader", &self.even_header),
            ("evenFooter", &self.even_footer),
            ("firstHeader", &self.first_header),
            ("firstFooter", &self.first_footer),
        ];
        for (name, text) in texts {
            if let Some(text) = text {
                writer.text_element(name, text)?;
            }
        }
        writer.end_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::options::{ReadOptions, WriteOptions};
    use pretty_assertions::assert_eq;

    fn to_xml(write: impl FnOnce(&mut XmlWriter<Vec<u8>>) -> Result<()>) -> String {
        let mut writer = XmlWriter::in_memory(WriteOptions::new().with_xml_declaration(false));
        write(&mut writer).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    fn reader(xml: &str) -> XmlReader<&[u8]> {
        let mut reader = XmlReader::from_str(xml, ReadOptions::new());
        reader.next_root().unwrap();
        reader
    }

    #[test]
    fn page_setup_filters_by_sheet_kind() {
        let setup = PageSetup::new()
            .with_paper_size(9)
            .with_orientation(PageOrientation::Landscape)
            .with_fit_to(1, 0);
        let xml = to_xml(|w| setup.write(w, SheetKind::Worksheet));
        assert_eq!(
            xml,
            r#"<pageSetup paperSize="9" fitToWidth="1" fitToHeight="0" orientation="landscape"/>"#
        );
        assert_eq!(PageSetup::read(&reader(&xml)), setup);

        let xml = to_xml(|w| setup.write(w, SheetKind::Chartsheet));
        assert_eq!(xml, r#"<pageSetup paperSize="9" orientation="landscape"/>"#);
    }

    #[test]
    fn margins_are_always_complete() {
        let xml = to_xml(|w| PageMargins::default().write(w));
        assert_eq!(
            xml,
            r#"<pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/>"#
        );
        let margins = PageMargins::read(&reader(r#"<pageMargins left="1" top="0.5"/>"#));
        assert_eq!((margins.left, margins.top, margins.right), (1.0, 0.5, 0.7));
    }

    #[test]
    fn header_footer_round_trip() {
        let hf = HeaderFooter {
            different_first: Some(true),
            odd_header: Some(HeaderFooter::sections(None, Some("Q1 & Q2"), None)),
            first_footer: Some("&CPage &P of &N".into()),
            ..Default::default()
        };
        let xml = to_xml(|w| hf.write(w));
        assert!(xml.contains("<oddHeader>&amp;CQ1 &amp; Q2</oddHeader>"), "{xml}");
        assert_eq!(HeaderFooter::read(&mut reader(&xml)).unwrap(), hf);
    }

    #[test]
    fn print_options_validity() {
        let mut options = PrintOptions::default();
        assert!(!options.is_valid());
        options.grid_lines = Some(true);
        assert!(options.is_valid());
        assert_eq!(to_xml(|w| options.write(w)), r#"<printOptions gridLines="1"/>"#);
    }
}
