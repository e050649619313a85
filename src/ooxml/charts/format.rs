//! DrawingML formatting shared by chart elements.
//!
//! Shape properties (`spPr`), text properties (`txPr`), markers and picture
//! options. Only the commonly used parts of DrawingML are modelled; anything
//! else inside these containers is skipped on read.

use crate::ooxml::charts::types::{MarkerSymbol, PresetDash};
use crate::ooxml::error::Result;
use crate::ooxml::xml::{XmlReader, XmlWriter, xml_enum};
use std::io::{BufRead, Write};

/// Base value of a DrawingML color.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorValue {
    /// `srgbClr`, hex `RRGGBB`
    Rgb(String),
    /// `schemeClr`, e.g. `accent1`
    Scheme(String),
    /// `sysClr` with an optional cached `lastClr`
    System { value: String, last: Option<String> },
    /// `prstClr`, e.g. `red`
    Preset(String),
}

/// A color transform such as `lumMod` or `alpha`, in thousandths of a percent.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTransform {
    pub name: String,
    pub value: i32,
}

/// A DrawingML color with its transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    pub value: ColorValue,
    pub transforms: Vec<ColorTransform>,
}

impl Color {
    /// Create an sRGB color from a hex string (`RRGGBB`, optional leading `#`).
    pub fn rgb(hex: &str) -> Self {
        Self {
            value: ColorValue::Rgb(hex.trim_start_matches('#').to_ascii_uppercase()),
            transforms: Vec::new(),
        }
    }

    /// Create a theme color reference.
    pub fn scheme(name: &str) -> Self {
        Self {
            value: ColorValue::Scheme(name.to_owned()),
            transforms: Vec::new(),
        }
    }

    /// Add a transform (`lumMod`, `lumOff`, `tint`, `shade`, `alpha`, ...).
    pub fn with_transform(mut self, name: &str, value: i32) -> Self {
        self.transforms.push(ColorTransform {
            name: name.to_owned(),
            value,
        });
        self
    }

    fn element_name(&self) -> &'static str {
        match self.value {
            ColorValue::Rgb(_) => "a:srgbClr",
            ColorValue::Scheme(_) => "a:schemeClr",
            ColorValue::System { .. } => "a:sysClr",
            ColorValue::Preset(_) => "a:prstClr",
        }
    }

    /// Read a color if the current element is one of the color choices.
    pub fn read_choice<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Option<Self>> {
        let val = reader.attribute("val").unwrap_or_default().to_owned();
        let value = match reader.name() {
            "srgbClr" => ColorValue::Rgb(val),
            "schemeClr" => ColorValue::Scheme(val),
            "prstClr" => ColorValue::Preset(val),
            "sysClr" => ColorValue::System {
                value: val,
                last: reader.attribute("lastClr").map(str::to_owned),
            },
            _ => return Ok(None),
        };
        let mut transforms = Vec::new();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            if let Some(value) = reader.val::<i32>() {
                transforms.push(ColorTransform {
                    name: reader.name().to_owned(),
                    value,
                });
            }
        }
        Ok(Some(Self { value, transforms }))
    }

    /// Read the first color found among the children of the current element.
    pub fn read_nested<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Option<Self>> {
        let mut color = None;
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match Self::read_choice(reader)? {
                Some(c) if color.is_none() => color = Some(c),
                _ => {},
            }
        }
        Ok(color)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element(self.element_name())?;
        match &self.value {
            ColorValue::Rgb(v) | ColorValue::Scheme(v) | ColorValue::Preset(v) => {
                writer.attribute("val", v)?;
            },
            ColorValue::System { value, last } => {
                writer.attribute("val", value)?;
                writer.optional_attribute("lastClr", last.as_ref())?;
            },
        }
        for transform in &self.transforms {
            writer.val_element(&format!("a:{}", transform.name), &transform.value)?;
        }
        writer.end_element()
    }
}

/// One stop of a gradient fill; `position` in thousandths of a percent.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    pub position: u32,
    pub color: Color,
}

/// Linear gradient fill.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GradientFill {
    pub stops: Vec<GradientStop>,
    /// Angle in 60000ths of a degree
    pub angle: Option<i32>,
    pub scaled: Option<bool>,
}

/// Picture fill. `embed` is the relationship id of the image part;
/// `image` holds bytes not yet handed to a media registry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlipFill {
    pub embed: Option<String>,
    pub image: Option<Vec<u8>>,
    pub stretch: bool,
}

impl BlipFill {
    /// Create a stretched picture fill from raw image bytes.
    pub fn from_image(bytes: Vec<u8>) -> Self {
        Self {
            embed: None,
            image: Some(bytes),
            stretch: true,
        }
    }
}

/// Pattern fill.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatternFill {
    /// Preset pattern such as `pct50` or `ltDnDiag`
    pub preset: Option<String>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

/// Fill choice of a shape or line.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    None,
    Solid(Color),
    Gradient(GradientFill),
    Picture(BlipFill),
    Pattern(PatternFill),
}

impl Fill {
    /// Read a fill if the current element is one of the fill choices.
    pub fn read_choice<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Option<Self>> {
        let fill = match reader.name() {
            "noFill" => Fill::None,
            "solidFill" => match Color::read_nested(reader)? {
                Some(color) => Fill::Solid(color),
                None => Fill::None,
            },
            "gradFill" => Fill::Gradient(Self::read_gradient(reader)?),
            "blipFill" => Fill::Picture(Self::read_blip(reader)?),
            "pattFill" => Fill::Pattern(Self::read_pattern(reader)?),
            _ => return Ok(None),
        };
        Ok(Some(fill))
    }

    fn read_gradient<R: BufRead>(reader: &mut XmlReader<R>) -> Result<GradientFill> {
        let mut gradient = GradientFill::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "gsLst" => {
                    let list_depth = reader.depth();
                    while reader.next_child(list_depth)? {
                        if reader.name() != "gs" {
                            reader.skip_element()?;
                            continue;
                        }
                        let position = reader.parse_attribute("pos").unwrap_or(0);
                        if let Some(color) = Color::read_nested(reader)? {
                            gradient.stops.push(GradientStop { position, color });
                        }
                    }
                },
                "lin" => {
                    gradient.angle = reader.parse_attribute("ang");
                    gradient.scaled = reader.parse_attribute("scaled");
                },
                _ => reader.skip_element()?,
            }
        }
        Ok(gradient)
    }

    fn read_blip<R: BufRead>(reader: &mut XmlReader<R>) -> Result<BlipFill> {
        let mut blip = BlipFill::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "blip" => blip.embed = reader.attribute("embed").map(str::to_owned),
                "stretch" => blip.stretch = true,
                _ => reader.skip_element()?,
            }
        }
        Ok(blip)
    }

    fn read_pattern<R: BufRead>(reader: &mut XmlReader<R>) -> Result<PatternFill> {
        let mut pattern = PatternFill {
            preset: reader.attribute("prst").map(str::to_owned),
            ..Default::default()
        };
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "fgClr" => pattern.foreground = Color::read_nested(reader)?,
                "bgClr" => pattern.background = Color::read_nested(reader)?,
                _ => reader.skip_element()?,
            }
        }
        Ok(pattern)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Fill::None => writer.empty_element("a:noFill", &[]),
            Fill::Solid(color) => {
                writer.start_element("a:solidFill")?;
                color.write(writer)?;
                writer.end_element()
            },
            Fill::Gradient(gradient) => {
                writer.start_element("a:gradFill")?;
                if !gradient.stops.is_empty() {
                    writer.start_element("a:gsLst")?;
                    for stop in &gradient.stops {
                        writer.start_element("a:gs")?;
                        writer.attribute("pos", &stop.position)?;
                        stop.color.write(writer)?;
                        writer.end_element()?;
                    }
                    writer.end_element()?;
                }
                if gradient.angle.is_some() || gradient.scaled.is_some() {
                    writer.start_element("a:lin")?;
                    writer.optional_attribute("ang", gradient.angle.as_ref())?;
                    writer.optional_attribute("scaled", gradient.scaled.as_ref())?;
                    writer.end_element()?;
                }
                writer.end_element()
            },
            Fill::Picture(blip) => {
                if blip.embed.is_none() && blip.image.is_some() {
                    log::warn!("picture fill written before its image was registered");
                }
                writer.start_element("a:blipFill")?;
                writer.start_element("a:blip")?;
                writer.optional_attribute("r:embed", blip.embed.as_ref())?;
                writer.end_element()?;
                if blip.stretch {
                    writer.start_element("a:stretch")?;
                    writer.empty_element("a:fillRect", &[])?;
                    writer.end_element()?;
                }
                writer.end_element()
            },
            Fill::Pattern(pattern) => {
                writer.start_element("a:pattFill")?;
                writer.optional_attribute("prst", pattern.preset.as_ref())?;
                if let Some(fg) = &pattern.foreground {
                    writer.start_element("a:fgClr")?;
                    fg.write(writer)?;
                    writer.end_element()?;
                }
                if let Some(bg) = &pattern.background {
                    writer.start_element("a:bgClr")?;
                    bg.write(writer)?;
                    writer.end_element()?;
                }
                writer.end_element()
            },
        }
    }
}

/// Line (outline) properties, `a:ln`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineFormat {
    /// Width in EMU
    pub width: Option<u32>,
    pub fill: Option<Fill>,
    pub dash: Option<PresetDash>,
}

impl LineFormat {
    pub fn solid(color: Color) -> Self {
        Self {
            fill: Some(Fill::Solid(color)),
            ..Default::default()
        }
    }

    pub fn with_width(mut self, emu: u32) -> Self {
        self.width = Some(emu);
        self
    }

    pub fn with_dash(mut self, dash: PresetDash) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut line = Self {
            width: reader.parse_attribute("w"),
            ..Default::default()
        };
        let depth = reader.depth();
        while reader.next_child(depth)? {
            if reader.name() == "prstDash" {
                line.dash = reader.val();
            } else if let Some(fill) = Fill::read_choice(reader)? {
                line.fill = Some(fill);
            }
        }
        Ok(line)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("a:ln")?;
        writer.optional_attribute("w", self.width.as_ref())?;
        if let Some(fill) = &self.fill {
            fill.write(writer)?;
        }
        if let Some(dash) = &self.dash {
            writer.val_element("a:prstDash", dash)?;
        }
        writer.end_element()
    }
}

/// Shape properties, `c:spPr`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeFormat {
    pub fill: Option<Fill>,
    pub line: Option<LineFormat>,
}

impl ShapeFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_line(mut self, line: LineFormat) -> Self {
        self.line = Some(line);
        self
    }

    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut shape = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            if reader.name() == "ln" {
                shape.line = Some(LineFormat::read(reader)?);
            } else if let Some(fill) = Fill::read_choice(reader)? {
                shape.fill = Some(fill);
            } else {
                reader.skip_element()?;
            }
        }
        Ok(shape)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:spPr")?;
        if let Some(fill) = &self.fill {
            fill.write(writer)?;
        }
        if let Some(line) = &self.line {
            line.write(writer)?;
        }
        writer.end_element()
    }

    pub(crate) fn visit_blips(&mut self, visit: &mut dyn FnMut(&mut BlipFill)) {
        if let Some(Fill::Picture(blip)) = &mut self.fill {
            visit(blip);
        }
    }

    /// Visit the picture fill of an optional shape.
    pub(crate) fn visit_optional(shape: &mut Option<Self>, visit: &mut dyn FnMut(&mut BlipFill)) {
        if let Some(shape) = shape {
            shape.visit_blips(visit);
        }
    }
}

/// Character properties shared by `txPr` and rich-text runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextFormat {
    /// Text rotation in 60000ths of a degree (`bodyPr/@rot`)
    pub rotation: Option<i32>,
    /// Font size in points
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub color: Option<Color>,
    /// Latin typeface
    pub font: Option<String>,
}

impl TextFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, points: f64) -> Self {
        self.size = Some(points);
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_font(mut self, font: &str) -> Self {
        self.font = Some(font.to_owned());
        self
    }

    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = Some(rotation);
        self
    }

    fn has_run_properties(&self) -> bool {
        self.size.is_some()
            || self.bold.is_some()
            || self.italic.is_some()
            || self.color.is_some()
            || self.font.is_some()
    }

    /// Read a `txPr` element.
    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut format = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "bodyPr" => format.rotation = reader.parse_attribute("rot"),
                "p" => format.read_paragraph(reader)?,
                _ => reader.skip_element()?,
            }
        }
        Ok(format)
    }

    /// Pick up default run properties from an `a:p` element.
    pub(crate) fn read_paragraph<R: BufRead>(&mut self, reader: &mut XmlReader<R>) -> Result<()> {
        let depth = reader.depth();
        while reader.next_child(depth)? {
            if reader.name() != "pPr" {
                reader.skip_element()?;
                continue;
            }
            let ppr_depth = reader.depth();
            while reader.next_child(ppr_depth)? {
                if reader.name() == "defRPr" {
                    self.read_run_properties(reader)?;
                } else {
                    reader.skip_element()?;
                }
            }
        }
        Ok(())
    }

    /// Read the attributes and children of `a:defRPr` or `a:rPr`.
    pub(crate) fn read_run_properties<R: BufRead>(
        &mut self,
        reader: &mut XmlReader<R>,
    ) -> Result<()> {
        if let Some(sz) = reader.parse_attribute::<u32>("sz") {
            self.size = Some(f64::from(sz) / 100.0);
        }
        self.bold = reader.parse_attribute("b").or(self.bold);
        self.italic = reader.parse_attribute("i").or(self.italic);
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "solidFill" => self.color = Color::read_nested(reader)?,
                "latin" => self.font = reader.attribute("typeface").map(str::to_owned),
                _ => reader.skip_element()?,
            }
        }
        Ok(())
    }

    /// Write run properties as `name` (`a:defRPr` or `a:rPr`).
    pub(crate) fn write_run_properties<W: Write>(
        &self,
        writer: &mut XmlWriter<W>,
        name: &str,
        lang: Option<&str>,
    ) -> Result<()> {
        writer.start_element(name)?;
        if let Some(lang) = lang {
            writer.attribute("lang", lang)?;
        }
        if let Some(size) = self.size {
            writer.attribute("sz", &((size * 100.0).round() as i64))?;
        }
        writer.optional_attribute("b", self.bold.as_ref())?;
        writer.optional_attribute("i", self.italic.as_ref())?;
        if let Some(color) = &self.color {
            writer.start_element("a:solidFill")?;
            color.write(writer)?;
            writer.end_element()?;
        }
        if let Some(font) = &self.font {
            writer.empty_element("a:latin", &[("typeface", font.as_str())])?;
        }
        writer.end_element()
    }

    /// Write `a:bodyPr`.
    pub(crate) fn write_body_properties<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("a:bodyPr")?;
        writer.optional_attribute("rot", self.rotation.as_ref())?;
        writer.end_element()
    }

    /// Write a `c:txPr` element.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:txPr")?;
        self.write_body_properties(writer)?;
        writer.empty_element("a:lstStyle", &[])?;
        writer.start_element("a:p")?;
        writer.start_element("a:pPr")?;
        if self.has_run_properties() {
            self.write_run_properties(writer, "a:defRPr", None)?;
        } else {
            writer.empty_element("a:defRPr", &[])?;
        }
        writer.end_element()?;
        writer.empty_element("a:endParaRPr", &[("lang", "en-US")])?;
        writer.end_element()?;
        writer.end_element()
    }
}

/// Series or chart-wide marker, `c:marker`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerFormat {
    pub symbol: Option<MarkerSymbol>,
    /// Size in points (2-72)
    pub size: Option<u8>,
    pub shape: Option<ShapeFormat>,
}

impl MarkerFormat {
    pub(crate) fn visit_blips(&mut self, visit: &mut dyn FnMut(&mut BlipFill)) {
        ShapeFormat::visit_optional(&mut self.shape, visit);
    }

    pub fn new(symbol: MarkerSymbol) -> Self {
        Self {
            symbol: Some(symbol),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: u8) -> Self {
        self.size = Some(size.clamp(2, 72));
        self
    }

    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut marker = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "symbol" => marker.symbol = reader.val(),
                "size" => marker.size = reader.val(),
                "spPr" => marker.shape = Some(ShapeFormat::read(reader)?),
                _ => reader.skip_element()?,
            }
        }
        Ok(marker)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:marker")?;
        writer.optional_val_element("c:symbol", self.symbol.as_ref())?;
        writer.optional_val_element("c:size", self.size.as_ref())?;
        if let Some(shape) = &self.shape {
            shape.write(writer)?;
        }
        writer.end_element()
    }
}

xml_enum! {
    /// How a picture fills a bar or area.
    pub enum PictureFormat {
        Stretch => "stretch",
        Stack => "stack",
        StackScale => "stackScale",
    }
}

/// Picture options of bar/area series and 3D walls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PictureOptions {
    pub apply_to_front: Option<bool>,
    pub apply_to_sides: Option<bool>,
    pub apply_to_end: Option<bool>,
    pub format: Option<PictureFormat>,
    pub stack_unit: Option<f64>,
}

impl PictureOptions {
    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut options = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "applyToFront" => options.apply_to_front = reader.bool_val(),
                "applyToSides" => options.apply_to_sides = reader.bool_val(),
                "applyToEnd" => options.apply_to_end = reader.bool_val(),
                "pictureFormat" => options.format = reader.val(),
                "pictureStackUnit" => options.stack_unit = reader.val(),
                _ => reader.skip_element()?,
            }
        }
        Ok(options)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:pictureOptions")?;
        writer.optional_val_element("c:applyToFront", self.apply_to_front.as_ref())?;
        writer.optional_val_element("c:applyToSides", self.apply_to_sides.as_ref())?;
        writer.optional_val_element("c:applyToEnd", self.apply_to_end.as_ref())?;
        writer.optional_val_element("c:pictureFormat", self.format.as_ref())?;
        writer.optional_val_element("c:pictureStackUnit", self.stack_unit.as_ref())?;
        writer.end_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::options::{ReadOptions, WriteOptions};
    use pretty_assertions::assert_eq;

    fn to_string(write: impl FnOnce(&mut XmlWriter<Vec<u8>>) -> Result<()>) -> String {
        let mut writer = XmlWriter::in_memory(WriteOptions::new().with_xml_declaration(false));
        write(&mut writer).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn shape_format_round_trip() {
        let shape = ShapeFormat::new()
            .with_fill(Fill::Solid(Color::scheme("accent1").with_transform("lumMod", 75000)))
            .with_line(LineFormat::solid(Color::rgb("#ff0000")).with_width(9525).with_dash(PresetDash::Dash));
        let xml = to_string(|w| shape.write(w));
        assert_eq!(
            xml,
            concat!(
                r#"<c:spPr><a:solidFill><a:schemeClr val="accent1"><a:lumMod val="75000"/></a:schemeClr></a:solidFill>"#,
                r#"<a:ln w="9525"><a:solidFill><a:srgbClr val="FF0000"/></a:solidFill><a:prstDash val="dash"/></a:ln></c:spPr>"#
            )
        );

        let mut reader = XmlReader::from_str(&xml, ReadOptions::new());
        reader.next_root().unwrap();
        assert_eq!(ShapeFormat::read(&mut reader).unwrap(), shape);
    }

    #[test]
    fn text_format_reads_default_run_properties() {
        let xml = r#"<c:txPr xmlns:c="c" xmlns:a="a"><a:bodyPr rot="-5400000" vert="horz"/><a:lstStyle/>
            <a:p><a:pPr><a:defRPr sz="1400" b="1"><a:solidFill><a:srgbClr val="333333"/></a:solidFill>
            <a:latin typeface="Calibri"/></a:defRPr></a:pPr><a:endParaRPr lang="en-US"/></a:p></c:txPr>"#;
        let mut reader = XmlReader::from_str(xml, ReadOptions::new());
        reader.next_root().unwrap();
        let format = TextFormat::read(&mut reader).unwrap();
        assert_eq!(format.rotation, Some(-5_400_000));
        assert_eq!(format.size, Some(14.0));
        assert_eq!(format.bold, Some(true));
        assert_eq!(format.italic, None);
        assert_eq!(format.color, Some(Color::rgb("333333")));
        assert_eq!(format.font.as_deref(), Some("Calibri"));
    }

    #[test]
    fn picture_fill_writes_embed_id() {
        let mut blip = BlipFill::from_image(vec![1, 2, 3]);
        blip.embed = Some("rId1".into());
        let xml = to_string(|w| Fill::Picture(blip).write(w));
        assert_eq!(
            xml,
            r#"<a:blipFill><a:blip r:embed="rId1"/><a:stretch><a:fillRect/></a:stretch></a:blipFill>"#
        );
    }

    #[test]
    fn marker_size_is_clamped() {
        assert_eq!(MarkerFormat::new(MarkerSymbol::Circle).with_size(200).size, Some(72));
        assert_eq!(MarkerFormat::new(MarkerSymbol::Circle).with_size(0).size, Some(2));
    }
}
