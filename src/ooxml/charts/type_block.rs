//! Chart-type blocks: `c:barChart`, `c:lineChart`, `c:pieChart`, ...
//!
//! Each block groups the series drawn with one chart kind and one axis set.
//! The legal children of a block and their order are fixed per kind by the
//! [`layout`] table, which drives both reading and writing: an element the
//! table does not list for a kind is skipped on read and never written.

use crate::ooxml::charts::format::{BlipFill, ShapeFormat};
use crate::ooxml::charts::labels::Labels;
use crate::ooxml::charts::series::Series;
use crate::ooxml::charts::types::{
    BarDirection, BarShape, ChartKind, Grouping, OfPieType, RadarStyle, ScatterStyle,
    SizeRepresents, SplitType,
};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xml::{FromXml, XmlReader, XmlWriter};
use smallvec::SmallVec;
use std::io::{BufRead, Write};

/// Axis ids referenced by a block; never more than three.
pub type AxisIds = SmallVec<[u32; 3]>;

/// Child elements a chart-type block may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    BarDirection,
    Grouping,
    RadarStyle,
    ScatterStyle,
    OfPieType,
    Wireframe,
    VaryColors,
    Series,
    Labels,
    DropLines,
    HiLowLines,
    UpDownBars,
    Marker,
    Smooth,
    GapWidth,
    GapDepth,
    Overlap,
    Shape,
    FirstSliceAngle,
    HoleSize,
    SplitType,
    SplitPosition,
    CustomSplit,
    SecondPieSize,
    SeriesLines,
    BandFormats,
    Bubble3D,
    BubbleScale,
    ShowNegativeBubbles,
    SizeRepresents,
    AxisId,
}

impl Part {
    fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "barDir" => Self::BarDirection,
            "grouping" => Self::Grouping,
            "radarStyle" => Self::RadarStyle,
            "scatterStyle" => Self::ScatterStyle,
            "ofPieType" => Self::OfPieType,
            "wireframe" => Self::Wireframe,
            "varyColors" => Self::VaryColors,
            "ser" => Self::Series,
            "dLbls" => Self::Labels,
            "dropLines" => Self::DropLines,
            "hiLowLines" => Self::HiLowLines,
            "upDownBars" => Self::UpDownBars,
            "marker" => Self::Marker,
            "smooth" => Self::Smooth,
            "gapWidth" => Self::GapWidth,
            "gapDepth" => Self::GapDepth,
            "overlap" => Self::Overlap,
            "shape" => Self::Shape,
            "firstSliceAng" => Self::FirstSliceAngle,
            "holeSize" => Self::HoleSize,
            "splitType" => Self::SplitType,
            "splitPos" => Self::SplitPosition,
            "custSplit" => Self::CustomSplit,
            "secondPieSize" => Self::SecondPieSize,
            "serLines" => Self::SeriesLines,
            "bandFmts" => Self::BandFormats,
            "bubble3D" => Self::Bubble3D,
            "bubbleScale" => Self::BubbleScale,
            "showNegBubbles" => Self::ShowNegativeBubbles,
            "sizeRepresents" => Self::SizeRepresents,
            "axId" => Self::AxisId,
            _ => return None,
        })
    }
}

/// Legal children of each chart kind, in schema order.
fn layout(kind: ChartKind) -> &'static [Part] {
    use Part::*;
    match kind {
        ChartKind::Area => &[Grouping, VaryColors, Series, Labels, DropLines, AxisId],
        ChartKind::Area3D => &[Grouping, VaryColors, Series, Labels, DropLines, GapDepth, AxisId],
        ChartKind::Line => &[
            Grouping, VaryColors, Series, Labels, DropLines, HiLowLines, UpDownBars, Marker,
            Smooth, AxisId,
        ],
        ChartKind::Line3D => &[Grouping, VaryColors, Series, Labels, DropLines, GapDepth, AxisId],
        ChartKind::Stock => &[Series, Labels, DropLines, HiLowLines, UpDownBars, AxisId],
        ChartKind::Radar => &[RadarStyle, VaryColors, Series, Labels, AxisId],
        ChartKind::Scatter => &[ScatterStyle, VaryColors, Series, Labels, AxisId],
        ChartKind::Pie => &[VaryColors, Series, Labels, FirstSliceAngle],
        ChartKind::Pie3D => &[VaryColors, Series, Labels],
        ChartKind::Doughnut => &[VaryColors, Series, Labels, FirstSliceAngle, HoleSize],
        ChartKind::Bar => &[
            BarDirection, Grouping, VaryColors, Series, Labels, GapWidth, Overlap, SeriesLines,
            AxisId,
        ],
        ChartKind::Bar3D => &[
            BarDirection, Grouping, VaryColors, Series, Labels, GapWidth, GapDepth, Shape, AxisId,
        ],
        ChartKind::OfPie => &[
            OfPieType, VaryColors, Series, Labels, GapWidth, SplitType, SplitPosition,
            CustomSplit, SecondPieSize, SeriesLines,
        ],
        ChartKind::Surface | ChartKind::Surface3D => &[Wireframe, Series, BandFormats, AxisId],
        ChartKind::Bubble => &[
            VaryColors, Series, Labels, Bubble3D, BubbleScale, ShowNegativeBubbles,
            SizeRepresents, AxisId,
        ],
    }
}

/// Drop, high-low or series lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartLines {
    pub shape: Option<ShapeFormat>,
}

impl ChartLines {
    fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        Ok(Self {
            shape: read_optional_shape(reader)?,
        })
    }

    fn write<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.start_element(name)?;
        if let Some(shape) = &self.shape {
            shape.write(writer)?;
        }
        writer.end_element()
    }
}

/// Up/down bars of line and stock charts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpDownBars {
    pub gap_width: Option<u16>,
    /// `None` leaves the bars out; `Some` with no shape writes `<c:upBars/>`
    pub up: Option<ChartLines>,
    pub down: Option<ChartLines>,
}

impl UpDownBars {
    fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut bars = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "gapWidth" => bars.gap_width = reader.val(),
                "upBars" => bars.up = Some(ChartLines::read(reader)?),
                "downBars" => bars.down = Some(ChartLines::read(reader)?),
                _ => reader.skip_element()?,
            }
        }
        Ok(bars)
    }

    fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:upDownBars")?;
        writer.optional_val_element("c:gapWidth", self.gap_width.as_ref())?;
        if let Some(up) = &self.up {
            up.write(writer, "c:upBars")?;
        }
        if let Some(down) = &self.down {
            down.write(writer, "c:downBars")?;
        }
        writer.end_element()
    }
}

/// Formatting of one surface-chart band.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BandFormat {
    pub index: u32,
    pub shape: Option<ShapeFormat>,
}

fn read_optional_shape<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Option<ShapeFormat>> {
    let mut shape = None;
    let depth = reader.depth();
    while reader.next_child(depth)? {
        if reader.name() == "spPr" {
            shape = Some(ShapeFormat::read(reader)?);
        } else {
            reader.skip_element()?;
        }
    }
    Ok(shape)
}

/// A group of series sharing one chart kind, one parameter set and one
/// axis set. Only the fields the kind's layout lists are ever written.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTypeBlock {
    kind: ChartKind,
    series: Vec<Series>,
    axis_ids: AxisIds,
    pub vary_colors: Option<bool>,
    pub grouping: Option<Grouping>,
    pub bar_direction: Option<BarDirection>,
    pub scatter_style: Option<ScatterStyle>,
    pub radar_style: Option<RadarStyle>,
    pub of_pie_type: Option<OfPieType>,
    pub wireframe: Option<bool>,
    pub labels: Option<Labels>,
    pub drop_lines: Option<ChartLines>,
    pub hi_low_lines: Option<ChartLines>,
    pub up_down_bars: Option<UpDownBars>,
    pub series_lines: Option<ChartLines>,
    /// Show markers on line charts
    pub marker: Option<bool>,
    pub smooth: Option<bool>,
    /// Percent of bar width (0-500)
    pub gap_width: Option<u16>,
    /// Percent of bar width (0-500)
    pub gap_depth: Option<u16>,
    /// Percent (-100 to 100)
    pub overlap: Option<i8>,
    pub shape: Option<BarShape>,
    /// Degrees (0-360)
    pub first_slice_angle: Option<u16>,
    /// Percent (10-90)
    pub hole_size: Option<u8>,
    pub split_type: Option<SplitType>,
    pub split_position: Option<f64>,
    /// Point indices sent to the second plot with a custom split
    pub custom_split: Vec<u32>,
    /// Percent (5-200)
    pub second_pie_size: Option<u16>,
    pub band_formats: Vec<BandFormat>,
    pub bubble_3d: Option<bool>,
    /// Percent (0-300)
    pub bubble_scale: Option<u32>,
    pub show_negative_bubbles: Option<bool>,
    pub size_represents: Option<SizeRepresents>,
}

impl ChartTypeBlock {
    /// Create an empty block, filling in the elements the kind requires.
    pub fn new(kind: ChartKind) -> Self {
        let mut block = Self {
            kind,
            series: Vec::new(),
            axis_ids: AxisIds::new(),
            vary_colors: None,
            grouping: None,
            bar_direction: None,
            scatter_style: None,
            radar_style: None,
            of_pie_type: None,
            wireframe: None,
            labels: None,
            drop_lines: None,
            hi_low_lines: None,
            up_down_bars: None,
            series_lines: None,
            marker: None,
            smooth: None,
            gap_width: None,
            gap_depth: None,
            overlap: None,
            shape: None,
            first_slice_angle: None,
            hole_size: None,
            split_type: None,
            split_position: None,
            custom_split: Vec::new(),
            second_pie_size: None,
            band_formats: Vec::new(),
            bubble_3d: None,
            bubble_scale: None,
            show_negative_bubbles: None,
            size_represents: None,
        };
        match kind {
            ChartKind::Line | ChartKind::Line3D => block.grouping = Some(Grouping::Standard),
            ChartKind::Bar | ChartKind::Bar3D => {
                block.bar_direction = Some(BarDirection::Column);
                block.grouping = Some(Grouping::Clustered);
            },
            ChartKind::Radar => block.radar_style = Some(RadarStyle::Marker),
            ChartKind::Scatter => block.scatter_style = Some(ScatterStyle::LineMarker),
            ChartKind::OfPie => block.of_pie_type = Some(OfPieType::Pie),
            ChartKind::Doughnut => block.hole_size = Some(50),
            _ => {},
        }
        block
    }

    /// Create a block of `kind` referencing `axis_ids`.
    pub fn with_axis_ids(kind: ChartKind, axis_ids: &[u32]) -> Self {
        let mut block = Self::new(kind);
        block.axis_ids = AxisIds::from_slice(axis_ids);
        block
    }

    #[inline]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[inline]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[inline]
    pub fn series_mut(&mut self) -> &mut [Series] {
        &mut self.series
    }

    #[inline]
    pub fn axis_ids(&self) -> &[u32] {
        &self.axis_ids
    }

    pub(crate) fn set_axis_ids(&mut self, axis_ids: &[u32]) {
        self.axis_ids = AxisIds::from_slice(axis_ids);
    }

    /// Whether the block references exactly `axis_ids`, in any order.
    pub fn uses_axes(&self, axis_ids: &[u32]) -> bool {
        let mut mine: AxisIds = self.axis_ids.clone();
        let mut theirs: AxisIds = AxisIds::from_slice(axis_ids);
        mine.sort_unstable();
        theirs.sort_unstable();
        mine == theirs
    }

    /// Append a new series whose `index` and `order` are `index`.
    pub fn add_series(&mut self, index: u32) -> &mut Series {
        let position = self.series.len();
        self.series.push(Series::new(self.kind.series_type(), index));
        &mut self.series[position]
    }

    /// Take ownership of a series moved in from another block.
    pub(crate) fn push_series(&mut self, mut series: Series) {
        series.set_series_type(self.kind.series_type());
        self.series.push(series);
    }

    /// Remove the series with `index`.
    pub fn remove_series(&mut self, index: u32) -> Option<Series> {
        let pos = self.series.iter().position(|s| s.index() == index)?;
        Some(self.series.remove(pos))
    }

    pub(crate) fn retain_series(&mut self, keep: impl FnMut(&Series) -> bool) -> usize {
        let before = self.series.len();
        self.series.retain(keep);
        before - self.series.len()
    }

    pub(crate) fn visit_blips(&mut self, visit: &mut dyn FnMut(&mut BlipFill)) {
        for series in &mut self.series {
            series.visit_blips(visit);
        }
        if let Some(labels) = &mut self.labels {
            labels.visit_blips(visit);
        }
        let bars = self.up_down_bars.as_mut();
        let (up, down) = match bars {
            Some(bars) => (bars.up.as_mut(), bars.down.as_mut()),
            None => (None, None),
        };
        let lines = [
            self.drop_lines.as_mut(),
            self.hi_low_lines.as_mut(),
            self.series_lines.as_mut(),
            up,
            down,
        ];
        for lines in lines.into_iter().flatten() {
            ShapeFormat::visit_optional(&mut lines.shape, visit);
        }
        for band in &mut self.band_formats {
            ShapeFormat::visit_optional(&mut band.shape, visit);
        }
    }

    /// Read a chart-type element. The element name selects the kind; an
    /// unknown name is an [`OoxmlError::UnknownChartType`].
    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let kind = ChartKind::from_tag(reader.name())
            .ok_or_else(|| OoxmlError::UnknownChartType(reader.name().to_owned()))?;
        let mut block = Self::new(kind);
        // required defaults only apply to blocks built in memory
        block.grouping = None;
        block.bar_direction = None;
        block.radar_style = None;
        block.scatter_style = None;
        block.of_pie_type = None;
        block.hole_size = None;

        let legal = layout(kind);
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match Part::from_tag(reader.name()) {
                Some(part) if legal.contains(&part) => block.read_part(reader, part)?,
                _ => {
                    log::debug!("<{}> is not part of <{}>", reader.name(), kind.tag());
                    reader.skip_element()?;
                },
            }
        }
        Ok(block)
    }

    fn read_part<R: BufRead>(&mut self, reader: &mut XmlReader<R>, part: Part) -> Result<()> {
        match part {
            Part::BarDirection => self.bar_direction = reader.val(),
            Part::Grouping => self.grouping = reader.val(),
            Part::RadarStyle => self.radar_style = reader.val(),
            Part::ScatterStyle => self.scatter_style = reader.val(),
            Part::OfPieType => self.of_pie_type = reader.val(),
            Part::Wireframe => self.wireframe = reader.bool_val(),
            Part::VaryColors => self.vary_colors = reader.bool_val(),
            Part::Series => {
                let series = Series::read(reader, self.kind.series_type())?;
                self.series.push(series);
            },
            Part::Labels => self.labels = Some(Labels::read(reader)?),
            Part::DropLines => self.drop_lines = Some(ChartLines::read(reader)?),
            Part::HiLowLines => self.hi_low_lines = Some(ChartLines::read(reader)?),
            Part::UpDownBars => self.up_down_bars = Some(UpDownBars::read(reader)?),
            Part::Marker => self.marker = reader.bool_val(),
            Part::Smooth => self.smooth = reader.bool_val(),
            Part::GapWidth => self.gap_width = reader.val(),
            Part::GapDepth => self.gap_depth = reader.val(),
            Part::Overlap => self.overlap = reader.val::<i32>().map(|v| v.clamp(-100, 100) as i8),
            Part::Shape => self.shape = reader.val(),
            Part::FirstSliceAngle => self.first_slice_angle = reader.val(),
            Part::HoleSize => self.hole_size = reader.val(),
            Part::SplitType => self.split_type = reader.val(),
            Part::SplitPosition => self.split_position = reader.val(),
            Part::CustomSplit => {
                let depth = reader.depth();
                while reader.next_child(depth)? {
                    if reader.name() == "secondPiePt"
                        && let Some(index) = reader.val()
                    {
                        self.custom_split.push(index);
                    }
                }
            },
            Part::SecondPieSize => self.second_pie_size = reader.val(),
            Part::SeriesLines => self.series_lines = Some(ChartLines::read(reader)?),
            Part::BandFormats => {
                let depth = reader.depth();
                while reader.next_child(depth)? {
                    if reader.name() == "bandFmt" {
                        self.band_formats.push(read_band_format(reader)?);
                    } else {
                        reader.skip_element()?;
                    }
                }
            },
            Part::Bubble3D => self.bubble_3d = reader.bool_val(),
            Part::BubbleScale => self.bubble_scale = reader.val(),
            Part::ShowNegativeBubbles => self.show_negative_bubbles = reader.bool_val(),
            Part::SizeRepresents => self.size_represents = reader.val(),
            Part::AxisId => match reader.val() {
                Some(id) if self.axis_ids.len() < 3 => self.axis_ids.push(id),
                Some(id) => log::warn!("ignoring extra axis id {id} in <{}>", self.kind.tag()),
                None => {
                    return Err(OoxmlError::InvalidFormat(format!(
                        "axId without a value in <{}>",
                        self.kind.tag()
                    )));
                },
            },
        }
        Ok(())
    }

    /// Write the block in the element order of its kind.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element(&format!("c:{}", self.kind.tag()))?;
        for part in layout(self.kind) {
            self.write_part(writer, *part)?;
        }
        writer.end_element()
    }

    fn write_part<W: Write>(&self, writer: &mut XmlWriter<W>, part: Part) -> Result<()> {
        match part {
            Part::BarDirection => writer.optional_val_element("c:barDir", self.bar_direction.as_ref()),
            Part::Grouping => writer.optional_val_element("c:grouping", self.grouping.as_ref()),
            Part::RadarStyle => writer.optional_val_element("c:radarStyle", self.radar_style.as_ref()),
            Part::ScatterStyle => {
                writer.optional_val_element("c:scatterStyle", self.scatter_style.as_ref())
            },
            Part::OfPieType => writer.optional_val_element("c:ofPieType", self.of_pie_type.as_ref()),
            Part::Wireframe => writer.optional_val_element("c:wireframe", self.wireframe.as_ref()),
            Part::VaryColors => writer.optional_val_element("c:varyColors", self.vary_colors.as_ref()),
            Part::Series => {
                for series in &self.series {
                    series.write(writer)?;
                }
                Ok(())
            },
            Part::Labels => match &self.labels {
                Some(labels) => labels.write(writer),
                None => Ok(()),
            },
            Part::DropLines => write_lines(writer, self.drop_lines.as_ref(), "c:dropLines"),
            Part::HiLowLines => write_lines(writer, self.hi_low_lines.as_ref(), "c:hiLowLines"),
            Part::UpDownBars => match &self.up_down_bars {
                Some(bars) => bars.write(writer),
                None => Ok(()),
            },
            Part::Marker => writer.optional_val_element("c:marker", self.marker.as_ref()),
            Part::Smooth => writer.optional_val_element("c:smooth", self.smooth.as_ref()),
            Part::GapWidth => writer.optional_val_element("c:gapWidth", self.gap_width.as_ref()),
            Part::GapDepth => writer.optional_val_element("c:gapDepth", self.gap_depth.as_ref()),
            Part::Overlap => {
                let overlap = self.overlap.map(i32::from);
                writer.optional_val_element("c:overlap", overlap.as_ref())
            },
            Part::Shape => writer.optional_val_element("c:shape", self.shape.as_ref()),
            Part::FirstSliceAngle => {
                writer.optional_val_element("c:firstSliceAng", self.first_slice_angle.as_ref())
            },
            Part::HoleSize => writer.optional_val_element("c:holeSize", self.hole_size.as_ref()),
            Part::SplitType => writer.optional_val_element("c:splitType", self.split_type.as_ref()),
            Part::SplitPosition => {
                writer.optional_val_element("c:splitPos", self.split_position.as_ref())
            },
            Part::CustomSplit => {
                if self.custom_split.is_empty() {
                    return Ok(());
                }
                writer.start_element("c:custSplit")?;
                for index in &self.custom_split {
                    writer.val_element("c:secondPiePt", index)?;
                }
                writer.end_element()
            },
            Part::SecondPieSize => {
                writer.optional_val_element("c:secondPieSize", self.second_pie_size.as_ref())
            },
            Part::SeriesLines => write_lines(writer, self.series_lines.as_ref(), "c:serLines"),
            Part::BandFormats => {
                if self.band_formats.is_empty() {
                    return Ok(());
                }
                writer.start_element("c:bandFmts")?;
                for band in &self.band_formats {
                    writer.start_element("c:bandFmt")?;
                    writer.val_element("c:idx", &band.index)?;
                    if let Some(shape) = &band.shape {
                        shape.write(writer)?;
                    }
                    writer.end_element()?;
                }
                writer.end_element()
            },
            Part::Bubble3D => writer.optional_val_element("c:bubble3D", self.bubble_3d.as_ref()),
            Part::BubbleScale => {
                writer.optional_val_element("c:bubbleScale", self.bubble_scale.as_ref())
            },
            Part::ShowNegativeBubbles => {
                writer.optional_val_element("c:showNegBubbles", self.show_negative_bubbles.as_ref())
            },
            Part::SizeRepresents => {
                writer.optional_val_element("c:sizeRepresents", self.size_represents.as_ref())
            },
            Part::AxisId => {
                for id in &self.axis_ids {
                    writer.val_element("c:axId", id)?;
                }
                Ok(())
            },
        }
    }
}

fn write_lines<W: Write>(
    writer: &mut XmlWriter<W>,
    lines: Option<&ChartLines>,
    name: &str,
) -> Result<()> {
    match lines {
        Some(lines) => lines.write(writer, name),
        None => Ok(()),
    }
}

fn read_band_format<R: BufRead>(reader: &mut XmlReader<R>) -> Result<BandFormat> {
    let mut band = BandFormat::default();
    let depth = reader.depth();
    while reader.next_child(depth)? {
        match reader.name() {
            "idx" => band.index = reader.attribute("val").and_then(u32::from_xml).unwrap_or(0),
            "spPr" => band.shape = Some(ShapeFormat::read(reader)?),
            _ => reader.skip_element()?,
        }
    }
    Ok(band)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::charts::labels::LabelShow;
    use crate::ooxml::charts::types::SeriesType;
    use crate::ooxml::options::{ReadOptions, WriteOptions};
    use pretty_assertions::assert_eq;

    fn write(block: &ChartTypeBlock) -> String {
        let mut writer = XmlWriter::in_memory(WriteOptions::new().with_xml_declaration(false));
        block.write(&mut writer).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    fn read(xml: &str) -> Result<ChartTypeBlock> {
        let mut reader = XmlReader::from_str(xml, ReadOptions::new());
        reader.next_root().unwrap();
        ChartTypeBlock::read(&mut reader)
    }

    #[test]
    fn bar_block_element_order() {
        let mut block = ChartTypeBlock::with_axis_ids(ChartKind::Bar, &[1, 2]);
        block.vary_colors = Some(false);
        block.gap_width = Some(150);
        block.overlap = Some(-20);
        block.labels = Some(Labels::showing(LabelShow::VALUE));
        block.add_series(0);
        let xml = write(&block);
        let positions: Vec<usize> = [
            "<c:barDir", "<c:grouping", "<c:varyColors", "<c:ser>", "<c:dLbls>", "<c:gapWidth",
            "<c:overlap", "<c:axId val=\"1\"", "<c:axId val=\"2\"",
        ]
        .iter()
        .map(|tag| xml.find(tag).unwrap_or_else(|| panic!("{tag} missing in {xml}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{xml}");
        assert!(xml.contains(r#"<c:overlap val="-20"/>"#));
    }

    #[test]
    fn fields_outside_the_layout_are_not_written() {
        let mut block = ChartTypeBlock::new(ChartKind::Pie);
        block.hole_size = Some(40);
        block.gap_width = Some(100);
        block.first_slice_angle = Some(90);
        block.set_axis_ids(&[1, 2]);
        let xml = write(&block);
        assert_eq!(xml, r#"<c:pieChart><c:firstSliceAng val="90"/></c:pieChart>"#);
    }

    #[test]
    fn unknown_chart_type_fails() {
        let err = read(r#"<c:funnelChart><c:varyColors val="1"/></c:funnelChart>"#).unwrap_err();
        assert!(matches!(err, OoxmlError::UnknownChartType(tag) if tag == "funnelChart"));
    }

    #[test]
    fn unknown_children_are_skipped() {
        let xml = r#"<c:lineChart><c:grouping val="stacked"/><c:future><c:ser/></c:future>
            <c:ser><c:idx val="0"/><c:order val="0"/></c:ser><c:holeSize val="50"/>
            <c:marker val="1"/><c:axId val="10"/><c:axId val="20"/></c:lineChart>"#;
        let block = read(xml).unwrap();
        assert_eq!(block.kind(), ChartKind::Line);
        assert_eq!(block.grouping, Some(Grouping::Stacked));
        assert_eq!(block.series().len(), 1);
        assert_eq!(block.series()[0].series_type(), SeriesType::Line);
        assert_eq!(block.hole_size, None);
        assert_eq!(block.marker, Some(true));
        assert_eq!(block.axis_ids(), &[10, 20]);
    }

    #[test]
    fn of_pie_round_trip() {
        let mut block = ChartTypeBlock::new(ChartKind::OfPie);
        block.of_pie_type = Some(OfPieType::Bar);
        block.split_type = Some(SplitType::Custom);
        block.custom_split = vec![3, 4];
        block.second_pie_size = Some(75);
        block.series_lines = Some(ChartLines::default());
        block.add_series(0);
        assert_eq!(read(&write(&block)).unwrap(), block);
    }

    #[test]
    fn surface_and_stock_round_trip() {
        let mut surface = ChartTypeBlock::with_axis_ids(ChartKind::Surface3D, &[1, 2, 3]);
        surface.wireframe = Some(true);
        surface.band_formats.push(BandFormat { index: 0, shape: None });
        surface.add_series(0);
        assert_eq!(read(&write(&surface)).unwrap(), surface);

        let mut stock = ChartTypeBlock::with_axis_ids(ChartKind::Stock, &[5, 6]);
        stock.hi_low_lines = Some(ChartLines::default());
        stock.up_down_bars = Some(UpDownBars {
            gap_width: Some(150),
            up: Some(ChartLines::default()),
            down: Some(ChartLines::default()),
        });
        for index in 0..3 {
            stock.add_series(index);
        }
        assert_eq!(read(&write(&stock)).unwrap(), stock);
    }

    #[test]
    fn add_series_uses_block_series_type() {
        let mut block = ChartTypeBlock::new(ChartKind::Doughnut);
        let series = block.add_series(4);
        assert_eq!(series.series_type(), SeriesType::Pie);
        assert_eq!((series.index(), series.order()), (4, 4));
        assert!(block.remove_series(4).is_some());
        assert!(block.remove_series(4).is_none());
    }
}
