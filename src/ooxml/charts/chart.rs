//! The chart object, `c:chartSpace`.
//!
//! A [`Chart`] owns its axes and an ordered list of [`ChartTypeBlock`]s; the
//! blocks reference axes by id. All series/axis bookkeeping goes through the
//! chart so those references never dangle.

use crate::ooxml::charts::axis::Axis;
use crate::ooxml::charts::data_source::{DataSource, DataSourceKind};
use crate::ooxml::charts::format::{BlipFill, PictureOptions, ShapeFormat, TextFormat};
use crate::ooxml::charts::legend::{DataTable, Legend};
use crate::ooxml::charts::media::{MediaRegistry, relationship_id};
use crate::ooxml::charts::models::{Layout, Text, Title};
use crate::ooxml::charts::range::{CellRange, SeriesRangeOptions, split_series};
use crate::ooxml::charts::series::Series;
use crate::ooxml::charts::type_block::{AxisIds, ChartTypeBlock};
use crate::ooxml::charts::types::{AxisPosition, AxisType, ChartKind, DisplayBlanks};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::options::{ReadOptions, WriteOptions};
use crate::ooxml::xlsx::SheetKind;
use crate::ooxml::xml::{XmlReader, XmlWriter};
use std::io::{BufRead, Write};

const NS_CHART: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";
const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// 3D view settings, `c:view3D`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct View3D {
    /// Rotation around X axis (-90 to 90 degrees)
    pub rot_x: Option<i8>,
    /// Height percent (5-500%)
    pub height_percent: Option<u16>,
    /// Rotation around Y axis (0-360 degrees)
    pub rot_y: Option<u16>,
    /// Depth percent (20-2000%)
    pub depth_percent: Option<u16>,
    /// Right-angle axes
    pub right_angle_axes: Option<bool>,
    /// Perspective (0-240)
    pub perspective: Option<u8>,
}

impl View3D {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rotation angles.
    #[inline]
    pub fn with_rotation(mut self, rot_x: i8, rot_y: u16) -> Self {
        self.rot_x = Some(rot_x);
        self.rot_y = Some(rot_y);
        self
    }

    #[inline]
    pub fn with_perspective(mut self, perspective: u8) -> Self {
        self.perspective = Some(perspective);
        self
    }

    fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut view = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "rotX" => view.rot_x = reader.val::<i32>().map(|v| v.clamp(-90, 90) as i8),
                "hPercent" => view.height_percent = reader.val(),
                "rotY" => view.rot_y = reader.val(),
                "depthPercent" => view.depth_percent = reader.val(),
                "rAngAx" => view.right_angle_axes = reader.bool_val(),
                "perspective" => view.perspective = reader.val(),
                _ => reader.skip_element()?,
            }
        }
        Ok(view)
    }

    fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:view3D")?;
        let rot_x = self.rot_x.map(i32::from);
        writer.optional_val_element("c:rotX", rot_x.as_ref())?;
        writer.optional_val_element("c:hPercent", self.height_percent.as_ref())?;
        writer.optional_val_element("c:rotY", self.rot_y.as_ref())?;
        writer.optional_val_element("c:depthPercent", self.depth_percent.as_ref())?;
        writer.optional_val_element("c:rAngAx", self.right_angle_axes.as_ref())?;
        writer.optional_val_element("c:perspective", self.perspective.as_ref())?;
        writer.end_element()
    }
}

/// Floor or wall of a 3D chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Surface {
    pub thickness: Option<u32>,
    pub shape: Option<ShapeFormat>,
    pub picture_options: Option<PictureOptions>,
}

impl Surface {
    fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut surface = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "thickness" => surface.thickness = reader.val(),
                "spPr" => surface.shape = Some(ShapeFormat::read(reader)?),
                "pictureOptions" => surface.picture_options = Some(PictureOptions::read(reader)?),
                _ => reader.skip_element()?,
            }
        }
        Ok(surface)
    }

    fn write<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.start_element(name)?;
        writer.optional_val_element("c:thickness", self.thickness.as_ref())?;
        if let Some(shape) = &self.shape {
            shape.write(writer)?;
        }
        if let Some(options) = &self.picture_options {
            options.write(writer)?;
        }
        writer.end_element()
    }
}

/// Chart-space protection flags, `c:protection`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartProtection {
    pub chart_object: Option<bool>,
    pub data: Option<bool>,
    pub formatting: Option<bool>,
    pub selection: Option<bool>,
    pub user_interface: Option<bool>,
}

impl ChartProtection {
    fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut protection = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "chartObject" => protection.chart_object = reader.bool_val(),
                "data" => protection.data = reader.bool_val(),
                "formatting" => protection.formatting = reader.bool_val(),
                "selection" => protection.selection = reader.bool_val(),
                "userInterface" => protection.user_interface = reader.bool_val(),
                _ => reader.skip_element()?,
            }
        }
        Ok(protection)
    }

    fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:protection")?;
        writer.optional_val_element("c:chartObject", self.chart_object.as_ref())?;
        writer.optional_val_element("c:data", self.data.as_ref())?;
        writer.optional_val_element("c:formatting", self.formatting.as_ref())?;
        writer.optional_val_element("c:selection", self.selection.as_ref())?;
        writer.optional_val_element("c:userInterface", self.user_interface.as_ref())?;
        writer.end_element()
    }
}

/// The sheet a chart is placed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    pub name: String,
    pub kind: SheetKind,
}

impl SheetRef {
    pub fn new(name: &str, kind: SheetKind) -> Self {
        Self {
            name: name.to_owned(),
            kind,
        }
    }
}

/// A chart: title, legend, plot area (blocks + axes) and chart-space
/// formatting.
///
/// `kind` is the chart kind new series are created with; changing it between
/// [`Chart::add_series`] calls builds combination charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    kind: ChartKind,
    blocks: Vec<ChartTypeBlock>,
    axes: Vec<Axis>,
    sheet: Option<SheetRef>,
    pub date_1904: Option<bool>,
    pub lang: Option<String>,
    pub rounded_corners: Option<bool>,
    /// Built-in style (1-48)
    pub style: Option<u8>,
    pub protection: Option<ChartProtection>,
    pub title: Option<Title>,
    pub auto_title_deleted: Option<bool>,
    pub view_3d: Option<View3D>,
    pub floor: Option<Surface>,
    pub side_wall: Option<Surface>,
    pub back_wall: Option<Surface>,
    pub plot_area_layout: Option<Layout>,
    pub data_table: Option<DataTable>,
    pub plot_area_shape: Option<ShapeFormat>,
    pub legend: Option<Legend>,
    pub plot_visible_only: Option<bool>,
    pub display_blanks_as: Option<DisplayBlanks>,
    pub show_labels_over_max: Option<bool>,
    pub shape: Option<ShapeFormat>,
    pub text_format: Option<TextFormat>,
}

impl Chart {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            blocks: Vec::new(),
            axes: Vec::new(),
            sheet: None,
            date_1904: None,
            lang: None,
            rounded_corners: None,
            style: None,
            protection: None,
            title: None,
            auto_title_deleted: None,
            view_3d: None,
            floor: None,
            side_wall: None,
            back_wall: None,
            plot_area_layout: None,
            data_table: None,
            plot_area_shape: None,
            legend: None,
            plot_visible_only: None,
            display_blanks_as: None,
            show_labels_over_max: None,
            shape: None,
            text_format: None,
        }
    }

    #[inline]
    pub fn with_title(mut self, title: Title) -> Self {
        self.title = Some(title);
        self
    }

    #[inline]
    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    #[inline]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// Kind used for blocks created from now on. Existing blocks keep theirs.
    #[inline]
    pub fn set_kind(&mut self, kind: ChartKind) {
        self.kind = kind;
    }

    #[inline]
    pub fn blocks(&self) -> &[ChartTypeBlock] {
        &self.blocks
    }

    /// Mutable access to one block's parameters. Series and axis ids are
    /// managed through the chart.
    #[inline]
    pub fn block_mut(&mut self, position: usize) -> Option<&mut ChartTypeBlock> {
        self.blocks.get_mut(position)
    }

    #[inline]
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    #[inline]
    pub fn axes_count(&self) -> usize {
        self.axes.len()
    }

    pub fn axis(&self, id: u32) -> Option<&Axis> {
        self.axes.iter().find(|axis| axis.id() == id)
    }

    pub fn axis_mut(&mut self, id: u32) -> Option<&mut Axis> {
        self.axes.iter_mut().find(|axis| axis.id() == id)
    }

    #[inline]
    pub fn sheet(&self) -> Option<&SheetRef> {
        self.sheet.as_ref()
    }

    #[inline]
    pub fn set_sheet(&mut self, sheet: Option<SheetRef>) {
        self.sheet = sheet;
    }

    // ---- series -----------------------------------------------------------

    /// Number of series across all blocks.
    pub fn series_count(&self) -> usize {
        self.blocks.iter().map(|block| block.series().len()).sum()
    }

    /// All series, block by block.
    pub fn all_series(&self) -> impl Iterator<Item = &Series> {
        self.blocks.iter().flat_map(|block| block.series())
    }

    pub fn series(&self, index: u32) -> Option<&Series> {
        self.all_series().find(|series| series.index() == index)
    }

    pub fn series_mut(&mut self, index: u32) -> Option<&mut Series> {
        self.blocks
            .iter_mut()
            .flat_map(|block| block.series_mut().iter_mut())
            .find(|series| series.index() == index)
    }

    fn next_series_index(&self) -> u32 {
        self.all_series()
            .map(|series| series.index() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Add a series of the chart's current kind.
    ///
    /// Creates the default axes on first use and appends to the last block
    /// when its kind matches, otherwise starts a new block.
    pub fn add_series(&mut self) -> &mut Series {
        let axis_ids = self.add_default_axes();
        let index = self.next_series_index();
        let reuse_last = self
            .blocks
            .last()
            .is_some_and(|block| block.kind() == self.kind);
        if !reuse_last {
            self.blocks
                .push(ChartTypeBlock::with_axis_ids(self.kind, &axis_ids));
        }
        let last = self.blocks.len() - 1;
        self.blocks[last].add_series(index)
    }

    /// Add one series per column (or row) of an A1 range.
    ///
    /// An unqualified range is resolved against the chart's worksheet. The
    /// range is rejected (nothing is added) when it does not parse, leaves
    /// no data cells, or is unqualified while the chart sits on a
    /// chartsheet. Returns the indices of the new series.
    pub fn add_series_from_range(&mut self, range: &str, options: &SeriesRangeOptions) -> Vec<u32> {
        let Some(range) = CellRange::parse(range) else {
            log::debug!("cannot build series from invalid range {range:?}");
            return Vec::new();
        };
        let sheet = match (&range.sheet, &self.sheet) {
            (Some(name), _) => name.clone(),
            (None, Some(sheet)) if sheet.kind == SheetKind::Worksheet => sheet.name.clone(),
            _ => {
                log::debug!("range {range} needs a sheet name");
                return Vec::new();
            },
        };
        let category_kind = if self.kind.series_type().uses_xy() {
            DataSourceKind::NumberReference
        } else {
            DataSourceKind::StringReference
        };

        split_series(&range, &sheet, options)
            .into_iter()
            .map(|refs| {
                let series = self.add_series();
                if let Some(name) = refs.name {
                    series.name = Some(Text::Reference(name));
                }
                if let Some(categories) = refs.categories {
                    series.set_category_data(DataSource::from_reference(category_kind, &categories));
                }
                series.set_value_data(DataSource::from_reference(
                    DataSourceKind::NumberReference,
                    &refs.values,
                ));
                series.index()
            })
            .collect()
    }

    /// Remove the series with `index`, dropping blocks left empty.
    pub fn remove_series(&mut self, index: u32) -> bool {
        self.remove_series_where(|series| series.index() == index)
    }

    /// Remove every series equal to `series`, dropping blocks left empty.
    pub fn remove_series_matching(&mut self, series: &Series) -> bool {
        self.remove_series_where(|candidate| candidate == series)
    }

    fn remove_series_where(&mut self, mut matches: impl FnMut(&Series) -> bool) -> bool {
        let mut removed = 0;
        for block in &mut self.blocks {
            removed += block.retain_series(|series| !matches(series));
        }
        if removed > 0 {
            self.blocks.retain(|block| !block.series().is_empty());
        }
        removed > 0
    }

    /// Swap the plotting order of two series.
    pub fn move_series(&mut self, index: u32, other: u32) -> bool {
        let (Some(first), Some(second)) = (self.series(index), self.series(other)) else {
            return false;
        };
        let (first_order, second_order) = (first.order(), second.order());
        if let Some(series) = self.series_mut(index) {
            series.set_order(second_order);
        }
        if let Some(series) = self.series_mut(other) {
            series.set_order(first_order);
        }
        true
    }

    /// Bind a series to another axis set.
    ///
    /// The series moves to a block already using exactly `axis_ids`, or to
    /// a new block of the chart's kind. A block left empty is removed.
    /// Fails without changes if the series or any axis id is unknown, or
    /// when a new block is needed and the chart's kind cannot carry
    /// `axis_ids` (axes on a pie kind, no axes on any other kind).
    pub fn set_series_axes_ids(&mut self, index: u32, axis_ids: &[u32]) -> bool {
        if axis_ids.len() > 3 {
            log::debug!("a series cannot use {} axes", axis_ids.len());
            return false;
        }
        if let Some(id) = axis_ids.iter().find(|id| self.axis(**id).is_none()) {
            log::debug!("cannot bind series {index} to unknown axis {id}");
            return false;
        }
        let Some(from) = self
            .blocks
            .iter()
            .position(|block| block.series().iter().any(|s| s.index() == index))
        else {
            return false;
        };
        if self.blocks[from].uses_axes(axis_ids) {
            return true;
        }

        let to = match self.blocks.iter().position(|block| block.uses_axes(axis_ids)) {
            Some(to) => to,
            None if self.kind.default_axes().is_empty() != axis_ids.is_empty() => {
                log::debug!(
                    "a {} block cannot be bound to axes {axis_ids:?}",
                    self.kind.tag()
                );
                return false;
            },
            None => {
                self.blocks
                    .push(ChartTypeBlock::with_axis_ids(self.kind, axis_ids));
                self.blocks.len() - 1
            },
        };
        let Some(series) = self.blocks[from].remove_series(index) else {
            return false;
        };
        self.blocks[to].push_series(series);
        if self.blocks[from].series().is_empty() {
            self.blocks.remove(from);
        }
        true
    }

    /// Indices of the series plotted on axis `id`.
    pub fn series_that_use_axis(&self, id: u32) -> Vec<u32> {
        self.blocks
            .iter()
            .filter(|block| block.axis_ids().contains(&id))
            .flat_map(|block| block.series().iter().map(Series::index))
            .collect()
    }

    // ---- axes -------------------------------------------------------------

    /// Add an axis with the first free id (starting at 1) and return the id.
    pub fn add_axis(&mut self, axis_type: AxisType, position: AxisPosition) -> u32 {
        let id = (1..)
            .find(|id| self.axis(*id).is_none())
            .unwrap_or(u32::MAX);
        self.axes.push(Axis::new(axis_type, id, position));
        id
    }

    /// Remove axis `id`. Refused while any block still references it.
    pub fn remove_axis(&mut self, id: u32) -> bool {
        if self.blocks.iter().any(|block| block.axis_ids().contains(&id)) {
            log::debug!("axis {id} is still in use");
            return false;
        }
        let Some(pos) = self.axes.iter().position(|axis| axis.id() == id) else {
            return false;
        };
        self.axes.remove(pos);
        for axis in &mut self.axes {
            if axis.cross_axis == Some(id) {
                axis.cross_axis = None;
            }
        }
        true
    }

    /// Make sure the axes the chart's kind needs exist, reusing any axis of
    /// the right type and position. The first two axes cross each other.
    /// Returns the ids in the kind's axis order.
    pub fn add_default_axes(&mut self) -> AxisIds {
        let mut ids = AxisIds::new();
        let mut created = AxisIds::new();
        for (axis_type, position) in self.kind.default_axes() {
            let existing = self
                .axes
                .iter()
                .find(|axis| {
                    axis.axis_type() == *axis_type
                        && axis.position == *position
                        && !ids.contains(&axis.id())
                })
                .map(Axis::id);
            let id = match existing {
                Some(id) => id,
                None => {
                    let id = self.add_axis(*axis_type, *position);
                    created.push(id);
                    id
                },
            };
            ids.push(id);
        }

        // reused axes keep the partner they already cross
        if let [first, second, rest @ ..] = ids.as_slice() {
            let (first, second) = (*first, *second);
            let mut wire = |id: u32, partner: u32| {
                let fresh = created.contains(&id);
                if let Some(axis) = self.axis_mut(id)
                    && (fresh || axis.cross_axis.is_none())
                {
                    axis.cross_axis = Some(partner);
                }
            };
            wire(first, second);
            wire(second, first);
            for &id in rest {
                wire(id, second);
            }
        }
        ids
    }

    // ---- media ------------------------------------------------------------

    /// Register every picture fill holding image bytes and point it at its
    /// relationship id. Returns how many fills were registered.
    pub fn register_blips(&mut self, registry: &mut dyn MediaRegistry) -> usize {
        let mut registered = 0;
        let mut visit = |blip: &mut BlipFill| {
            if let Some(image) = blip.image.take() {
                let id = registry.register_blip(&image);
                blip.embed = Some(relationship_id(id));
                registered += 1;
            }
        };
        self.visit_blips(&mut visit);
        registered
    }

    fn visit_blips(&mut self, visit: &mut dyn FnMut(&mut BlipFill)) {
        let shapes = [
            self.shape.as_mut(),
            self.plot_area_shape.as_mut(),
            self.title.as_mut().and_then(|t| t.shape.as_mut()),
            self.legend.as_mut().and_then(|l| l.shape.as_mut()),
            self.data_table.as_mut().and_then(|d| d.shape.as_mut()),
            self.floor.as_mut().and_then(|s| s.shape.as_mut()),
            self.side_wall.as_mut().and_then(|s| s.shape.as_mut()),
            self.back_wall.as_mut().and_then(|s| s.shape.as_mut()),
        ];
        for shape in shapes.into_iter().flatten() {
            shape.visit_blips(visit);
        }
        for axis in &mut self.axes {
            axis.visit_blips(visit);
        }
        for block in &mut self.blocks {
            block.visit_blips(visit);
        }
    }

    // ---- XML --------------------------------------------------------------

    /// Parse a chart part.
    pub fn from_xml(xml: &str, options: ReadOptions) -> Result<Self> {
        let mut reader = XmlReader::from_str(xml, options);
        if !reader.next_root()? {
            return Err(OoxmlError::InvalidFormat("empty chart part".to_string()));
        }
        Self::read(&mut reader)
    }

    /// Serialize as a complete chart part.
    pub fn to_xml(&self, options: WriteOptions) -> Result<String> {
        let mut writer = XmlWriter::in_memory(options);
        writer.write_declaration()?;
        self.write(&mut writer)?;
        let bytes = writer.finish()?;
        String::from_utf8(bytes).map_err(|err| OoxmlError::Other(err.to_string()))
    }

    /// Read a `c:chartSpace` element. The chart's kind becomes the kind of
    /// the last block read; a chart without blocks reads as a bar chart.
    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        if reader.name() != "chartSpace" {
            return Err(OoxmlError::InvalidFormat(format!(
                "expected <chartSpace>, found <{}>",
                reader.name()
            )));
        }
        let mut chart = Self::new(ChartKind::Bar);
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "date1904" => chart.date_1904 = reader.bool_val(),
                "lang" => chart.lang = reader.val(),
                "roundedCorners" => chart.rounded_corners = reader.bool_val(),
                "style" => chart.style = reader.val(),
                "protection" => chart.protection = Some(ChartProtection::read(reader)?),
                "chart" => chart.read_chart(reader)?,
                "spPr" => chart.shape = Some(ShapeFormat::read(reader)?),
                "txPr" => chart.text_format = Some(TextFormat::read(reader)?),
                _ => reader.skip_element()?,
            }
        }
        if let Some(block) = chart.blocks.last() {
            chart.kind = block.kind();
        }
        Ok(chart)
    }

    fn read_chart<R: BufRead>(&mut self, reader: &mut XmlReader<R>) -> Result<()> {
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "title" => self.title = Some(Title::read(reader)?),
                "autoTitleDeleted" => self.auto_title_deleted = reader.bool_val(),
                "view3D" => self.view_3d = Some(View3D::read(reader)?),
                "floor" => self.floor = Some(Surface::read(reader)?),
                "sideWall" => self.side_wall = Some(Surface::read(reader)?),
                "backWall" => self.back_wall = Some(Surface::read(reader)?),
                "plotArea" => self.read_plot_area(reader)?,
                "legend" => self.legend = Some(Legend::read(reader)?),
                "plotVisOnly" => self.plot_visible_only = reader.bool_val(),
                "dispBlanksAs" => self.display_blanks_as = reader.val(),
                "showDLblsOverMax" => self.show_labels_over_max = reader.bool_val(),
                _ => reader.skip_element()?,
            }
        }
        Ok(())
    }

    fn read_plot_area<R: BufRead>(&mut self, reader: &mut XmlReader<R>) -> Result<()> {
        let depth = reader.depth();
        while reader.next_child(depth)? {
            let name = reader.name();
            match name {
                "layout" => self.plot_area_layout = Some(Layout::read(reader)?),
                "catAx" | "valAx" | "serAx" | "dateAx" => {
                    let axis = Axis::read(reader)?;
                    if self.axis(axis.id()).is_some() {
                        return Err(OoxmlError::InvalidFormat(format!(
                            "duplicate axis id {}",
                            axis.id()
                        )));
                    }
                    self.axes.push(axis);
                },
                "dTable" => self.data_table = Some(DataTable::read(reader)?),
                "spPr" => self.plot_area_shape = Some(ShapeFormat::read(reader)?),
                _ if name.ends_with("Chart") => self.blocks.push(ChartTypeBlock::read(reader)?),
                _ => reader.skip_element()?,
            }
        }
        Ok(())
    }

    /// Write the `c:chartSpace` element in schema order.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:chartSpace")?;
        writer.attribute("xmlns:c", NS_CHART)?;
        writer.attribute("xmlns:a", NS_DRAWING)?;
        writer.attribute("xmlns:r", NS_RELATIONSHIPS)?;
        writer.optional_val_element("c:date1904", self.date_1904.as_ref())?;
        writer.optional_val_element("c:lang", self.lang.as_ref())?;
        writer.optional_val_element("c:roundedCorners", self.rounded_corners.as_ref())?;
        writer.optional_val_element("c:style", self.style.as_ref())?;
        if let Some(protection) = &self.protection {
            protection.write(writer)?;
        }

        writer.start_element("c:chart")?;
        if let Some(title) = &self.title {
            title.write(writer)?;
        }
        writer.optional_val_element("c:autoTitleDeleted", self.auto_title_deleted.as_ref())?;
        if let Some(view) = &self.view_3d {
            view.write(writer)?;
        }
        if let Some(floor) = &self.floor {
            floor.write(writer, "c:floor")?;
        }
        if let Some(wall) = &self.side_wall {
            wall.write(writer, "c:sideWall")?;
        }
        if let Some(wall) = &self.back_wall {
            wall.write(writer, "c:backWall")?;
        }
        self.write_plot_area(writer)?;
        if let Some(legend) = &self.legend {
            legend.write(writer)?;
        }
        writer.optional_val_element("c:plotVisOnly", self.plot_visible_only.as_ref())?;
        writer.optional_val_element("c:dispBlanksAs", self.display_blanks_as.as_ref())?;
        writer.optional_val_element("c:showDLblsOverMax", self.show_labels_over_max.as_ref())?;
        writer.end_element()?;

        if let Some(shape) = &self.shape {
            shape.write(writer)?;
        }
        if let Some(format) = &self.text_format {
            format.write(writer)?;
        }
        writer.end_element()
    }

    fn write_plot_area<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:plotArea")?;
        if let Some(layout) = &self.plot_area_layout {
            layout.write(writer)?;
        }
        for block in &self.blocks {
            block.write(writer)?;
        }
        for axis in &self.axes {
            axis.write(writer)?;
        }
        if let Some(table) = &self.data_table {
            table.write(writer)?;
        }
        if let Some(shape) = &self.plot_area_shape {
            shape.write(writer)?;
        }
        writer.end_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::charts::axis::Gridlines;
    use crate::ooxml::charts::format::{Color, Fill, MarkerFormat};
    use crate::ooxml::charts::media::MediaStore;
    use crate::ooxml::charts::type_block::{ChartLines, UpDownBars};
    use crate::ooxml::charts::types::{LegendPosition, MarkerSymbol, SeriesType, TickMark};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn round_trip(chart: &Chart) -> Chart {
        let xml = chart.to_xml(WriteOptions::new()).unwrap();
        Chart::from_xml(&xml, ReadOptions::new()).unwrap()
    }

    #[test]
    fn removing_a_series_keeps_other_indices() {
        let mut chart = Chart::new(ChartKind::Bar);
        for _ in 0..3 {
            chart.add_series();
        }
        assert_eq!(chart.series_count(), 3);
        assert_eq!(chart.blocks().len(), 1);

        assert!(chart.remove_series(1));
        assert!(!chart.remove_series(1));
        assert_eq!(chart.series_count(), 2);
        let indices: Vec<u32> = chart.all_series().map(Series::index).collect();
        assert_eq!(indices, [0, 2]);

        // new series never reuse an index still in use
        assert_eq!(chart.add_series().index(), 3);
    }

    #[test]
    fn first_series_creates_crossing_default_axes() {
        let mut chart = Chart::new(ChartKind::Line);
        chart.add_series();
        assert_eq!(chart.axes_count(), 2);
        let category = &chart.axes()[0];
        let value = &chart.axes()[1];
        assert_eq!((category.id(), category.axis_type()), (1, AxisType::Category));
        assert_eq!((value.id(), value.axis_type()), (2, AxisType::Value));
        assert_eq!(category.cross_axis, Some(2));
        assert_eq!(value.cross_axis, Some(1));
        assert_eq!(chart.blocks()[0].axis_ids(), &[1, 2]);
    }

    #[test]
    fn pie_charts_have_no_axes() {
        let mut chart = Chart::new(ChartKind::Doughnut);
        chart.add_series();
        assert_eq!(chart.axes_count(), 0);
        assert!(chart.blocks()[0].axis_ids().is_empty());
        assert_eq!(chart.blocks()[0].series()[0].series_type(), SeriesType::Pie);
    }

    #[test]
    fn changing_kind_builds_a_combination_chart() {
        let mut chart = Chart::new(ChartKind::Bar);
        chart.add_series();
        chart.set_kind(ChartKind::Line);
        chart.add_series();
        chart.add_series();

        let kinds: Vec<ChartKind> = chart.blocks().iter().map(ChartTypeBlock::kind).collect();
        assert_eq!(kinds, [ChartKind::Bar, ChartKind::Line]);
        assert_eq!(chart.blocks()[1].series().len(), 2);
        // both blocks share the category/value pair
        assert_eq!(chart.axes_count(), 2);
        assert_eq!(chart.series_that_use_axis(1), [0, 1, 2]);
    }

    #[test]
    fn axis_in_use_cannot_be_removed() {
        let mut chart = Chart::new(ChartKind::Scatter);
        chart.add_series();
        assert!(!chart.remove_axis(1));
        assert_eq!(chart.axes_count(), 2);

        let spare = chart.add_axis(AxisType::Value, AxisPosition::Right);
        assert_eq!(spare, 3);
        assert!(chart.remove_axis(spare));
        assert!(!chart.remove_axis(spare));
        assert_eq!(chart.add_axis(AxisType::Value, AxisPosition::Right), 3);
    }

    #[test]
    fn series_moves_to_secondary_axes() {
        let mut chart = Chart::new(ChartKind::Bar);
        chart.add_series();
        chart.add_series();
        let category = chart.add_axis(AxisType::Category, AxisPosition::Bottom);
        let value = chart.add_axis(AxisType::Value, AxisPosition::Right);

        assert!(!chart.set_series_axes_ids(1, &[category, 99]));
        assert!(chart.set_series_axes_ids(1, &[category, value]));
        assert_eq!(chart.series_count(), 2);
        assert_eq!(chart.blocks().len(), 2);
        assert_eq!(chart.series_that_use_axis(value), [1]);
        assert_eq!(chart.series_that_use_axis(1), [0]);

        // moving the last series back empties and prunes the secondary block
        assert!(chart.set_series_axes_ids(1, &[2, 1]));
        assert_eq!(chart.blocks().len(), 1);
        assert!(chart.remove_axis(value));
    }

    #[test]
    fn move_series_swaps_order() {
        let mut chart = Chart::new(ChartKind::Area);
        chart.add_series();
        chart.add_series();
        assert!(chart.move_series(0, 1));
        assert_eq!(chart.series(0).map(Series::order), Some(1));
        assert_eq!(chart.series(1).map(Series::order), Some(0));
        assert!(!chart.move_series(0, 7));
    }

    #[test]
    fn remove_matching_series_prunes_block() {
        let mut chart = Chart::new(ChartKind::Pie);
        chart.add_series();
        let series = chart.series(0).cloned().unwrap();
        assert!(chart.remove_series_matching(&series));
        assert!(chart.blocks().is_empty());
    }

    #[test]
    fn series_from_range_use_sheet_back_reference() {
        let mut chart = Chart::new(ChartKind::Bar);
        chart.set_sheet(Some(SheetRef::new("Sales", SheetKind::Worksheet)));
        let options = SeriesRangeOptions::new().with_header(true).with_categories(true);
        let added = chart.add_series_from_range("A1:C4", &options);
        assert_eq!(added, [0, 1]);

        let series = chart.series(1).unwrap();
        assert_eq!(series.name, Some(Text::Reference("Sales!$C$1".into())));
        assert_eq!(series.category_data().kind(), DataSourceKind::StringReference);
        assert_eq!(series.category_data().reference(), "Sales!$A$2:$A$4");
        assert_eq!(series.value_data().reference(), "Sales!$C$2:$C$4");
    }

    #[test]
    fn unqualified_range_on_chartsheet_is_rejected() {
        let mut chart = Chart::new(ChartKind::Line);
        chart.set_sheet(Some(SheetRef::new("Chart1", SheetKind::Chartsheet)));
        let options = SeriesRangeOptions::new();
        assert!(chart.add_series_from_range("A1:B5", &options).is_empty());
        assert!(chart.add_series_from_range("not a range", &options).is_empty());
        assert_eq!(chart.series_count(), 0);
        assert_eq!(chart.add_series_from_range("Data!A1:B5", &options), [0, 1]);
    }

    #[test]
    fn picture_fills_are_registered_once() {
        let mut chart = Chart::new(ChartKind::Bar);
        let picture = || ShapeFormat::new().with_fill(Fill::Picture(BlipFill::from_image(vec![1, 2, 3])));
        chart.shape = Some(picture());
        chart.add_series().shape = Some(picture());

        let mut store = MediaStore::new();
        assert_eq!(chart.register_blips(&mut store), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(chart.register_blips(&mut store), 0);
        let xml = chart.to_xml(WriteOptions::new()).unwrap();
        assert_eq!(xml.matches(r#"r:embed="rId1""#).count(), 2);
    }

    #[test]
    fn built_chart_round_trips() {
        let mut chart = Chart::new(ChartKind::Bar)
            .with_title(Title::new("Quarterly sales"))
            .with_legend(Legend::new(LegendPosition::Bottom).with_overlay(false));
        chart.lang = Some("en-US".into());
        chart.rounded_corners = Some(false);
        chart.style = Some(2);
        chart.plot_visible_only = Some(true);
        chart.display_blanks_as = Some(DisplayBlanks::Gap);
        chart.view_3d = Some(View3D::new().with_rotation(15, 20));
        chart.plot_area_shape =
            Some(ShapeFormat::new().with_fill(Fill::Solid(Color::rgb("F2F2F2"))));
        for values in [[1.0, 2.0], [3.5, 4.0]] {
            let series = chart.add_series();
            series.set_value_data(DataSource::from_numbers(values));
            series.set_category_data(DataSource::from_reference(
                DataSourceKind::StringReference,
                "Sheet1!$A$2:$A$3",
            ));
        }
        chart.set_kind(ChartKind::Line);
        chart.add_series().smooth = Some(true);

        let back = round_trip(&chart);
        assert_eq!(back.series_count(), 3);
        assert_eq!(back.kind(), ChartKind::Line);
        for (a, b) in chart.all_series().zip(back.all_series()) {
            assert_eq!(
                (a.series_type(), a.index(), a.order()),
                (b.series_type(), b.index(), b.order())
            );
        }
        for (a, b) in chart.axes().iter().zip(back.axes()) {
            assert_eq!((a.id(), a.axis_type(), a.position), (b.id(), b.axis_type(), b.position));
        }
        assert_eq!(back, chart);
    }

    #[test]
    fn unset_fields_stay_absent() {
        let chart = Chart::new(ChartKind::Pie);
        let xml = chart.to_xml(WriteOptions::new().with_xml_declaration(false)).unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" "#,
                r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
                r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
                r#"<c:chart><c:plotArea/></c:chart></c:chartSpace>"#
            )
        );
    }

    #[test]
    fn unknown_chart_type_fails_the_read() {
        let xml = r#"<c:chartSpace xmlns:c="c"><c:chart><c:plotArea>
            <c:sunburstChart/></c:plotArea></c:chart></c:chartSpace>"#;
        let err = Chart::from_xml(xml, ReadOptions::new()).unwrap_err();
        assert!(matches!(err, OoxmlError::UnknownChartType(_)));

        let err = Chart::from_xml("<worksheet/>", ReadOptions::new()).unwrap_err();
        assert!(matches!(err, OoxmlError::InvalidFormat(_)));
    }

    #[test]
    fn reads_chart_space_properties() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
            <c:chartSpace xmlns:c="c" xmlns:a="a">
              <c:date1904 val="0"/><c:lang val="de-DE"/>
              <c:protection><c:data val="1"/></c:protection>
              <c:chart>
                <c:autoTitleDeleted val="1"/>
                <c:plotArea>
                  <c:layout/>
                  <c:pieChart><c:varyColors val="1"/>
                    <c:ser><c:idx val="0"/><c:order val="0"/><c:explosion val="10"/></c:ser>
                    <c:firstSliceAng val="0"/>
                  </c:pieChart>
                </c:plotArea>
                <c:plotVisOnly val="1"/>
              </c:chart>
              <c:extLst><c:ext uri="x"/></c:extLst>
            </c:chartSpace>"#;
        let chart = Chart::from_xml(xml, ReadOptions::new()).unwrap();
        assert_eq!(chart.kind(), ChartKind::Pie);
        assert_eq!(chart.date_1904, Some(false));
        assert_eq!(chart.lang.as_deref(), Some("de-DE"));
        assert_eq!(chart.protection.as_ref().and_then(|p| p.data), Some(true));
        assert_eq!(chart.auto_title_deleted, Some(true));
        assert_eq!(chart.series(0).and_then(|s| s.explosion), Some(10));
        assert_eq!(chart.blocks()[0].first_slice_angle, Some(0));
    }

    #[test]
    fn pie_kind_refuses_an_axis_bound_block() {
        let mut chart = Chart::new(ChartKind::Bar);
        chart.add_series();
        chart.add_series();
        let category = chart.add_axis(AxisType::Category, AxisPosition::Bottom);
        let value = chart.add_axis(AxisType::Value, AxisPosition::Right);
        chart.set_kind(ChartKind::Pie);

        assert!(!chart.set_series_axes_ids(1, &[category, value]));
        assert_eq!(chart.blocks().len(), 1);
        assert_eq!(chart.series_that_use_axis(1), [0, 1]);
        assert!(chart.remove_axis(value));

        // an axis-bound kind cannot open a block without axes either
        chart.set_kind(ChartKind::Line);
        assert!(!chart.set_series_axes_ids(0, &[]));
        assert_eq!(chart.blocks().len(), 1);
    }

    #[test]
    fn switching_kind_keeps_existing_crossings() {
        let mut chart = Chart::new(ChartKind::Line);
        chart.add_series();
        chart.set_kind(ChartKind::Scatter);
        chart.add_series();

        assert_eq!(chart.axes_count(), 3);
        let crossings: Vec<(u32, Option<u32>)> =
            chart.axes().iter().map(|axis| (axis.id(), axis.cross_axis)).collect();
        assert_eq!(crossings, [(1, Some(2)), (2, Some(1)), (3, Some(2))]);
        assert_eq!(chart.blocks()[1].axis_ids(), &[3, 2]);

        let back = round_trip(&chart);
        assert_eq!(back, chart);
    }

    #[test]
    fn duplicate_axis_ids_fail_the_read() {
        let xml = r#"<c:chartSpace xmlns:c="c"><c:chart><c:plotArea>
            <c:lineChart><c:ser><c:idx val="0"/><c:order val="0"/></c:ser>
              <c:axId val="1"/><c:axId val="2"/></c:lineChart>
            <c:catAx><c:axId val="1"/><c:crossAx val="2"/></c:catAx>
            <c:valAx><c:axId val="2"/><c:crossAx val="1"/></c:valAx>
            <c:valAx><c:axId val="2"/><c:crossAx val="1"/></c:valAx>
            </c:plotArea></c:chart></c:chartSpace>"#;
        let err = Chart::from_xml(xml, ReadOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            OoxmlError::InvalidFormat(ref msg) if msg.contains("duplicate axis id 2")
        ));
    }

    #[test]
    fn nested_picture_fills_are_registered() {
        let picture = || ShapeFormat::new().with_fill(Fill::Picture(BlipFill::from_image(vec![7, 7])));
        let mut chart = Chart::new(ChartKind::Line);
        let series = chart.add_series();
        let mut marker = MarkerFormat::new(MarkerSymbol::Picture);
        marker.shape = Some(picture());
        series.marker = Some(marker);
        if let Some(axis) = chart.axis_mut(2) {
            axis.major_gridlines = Some(Gridlines {
                shape: Some(picture()),
            });
        }
        if let Some(block) = chart.block_mut(0) {
            block.up_down_bars = Some(UpDownBars {
                up: Some(ChartLines {
                    shape: Some(picture()),
                }),
                ..Default::default()
            });
        }

        let mut store = MediaStore::new();
        assert_eq!(chart.register_blips(&mut store), 3);
        assert_eq!(store.len(), 1);
        let xml = chart.to_xml(WriteOptions::new()).unwrap();
        assert_eq!(xml.matches(r#"r:embed="rId1""#).count(), 3);
        assert!(xml.contains(r#"<c:symbol val="picture"/>"#));

        let back = round_trip(&chart);
        let marker = back.series(0).and_then(|s| s.marker.as_ref());
        assert_eq!(marker.and_then(|m| m.symbol), Some(MarkerSymbol::Picture));
        assert_eq!(back, chart);
    }

    #[derive(Debug, Clone)]
    enum AxisOp {
        Add(bool),
        Remove(u32),
        Series,
    }

    fn axis_op() -> impl Strategy<Value = AxisOp> {
        prop_oneof![
            any::<bool>().prop_map(AxisOp::Add),
            (1u32..8).prop_map(AxisOp::Remove),
            Just(AxisOp::Series),
        ]
    }

    fn chart_kind() -> impl Strategy<Value = ChartKind> {
        prop::sample::select(ChartKind::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn axis_ids_stay_unique_and_positive(
            kind in chart_kind(),
            ops in prop::collection::vec(axis_op(), 0..40),
        ) {
            let mut chart = Chart::new(kind);
            for op in ops {
                match op {
                    AxisOp::Add(value) => {
                        let ty = if value { AxisType::Value } else { AxisType::Category };
                        chart.add_axis(ty, AxisPosition::Top);
                    },
                    AxisOp::Remove(id) => {
                        let in_use = chart.blocks().iter().any(|b| b.axis_ids().contains(&id));
                        let exists = chart.axis(id).is_some();
                        let before = chart.axes_count();
                        let removed = chart.remove_axis(id);
                        prop_assert_eq!(removed, exists && !in_use);
                        let expected = if removed { before - 1 } else { before };
                        prop_assert_eq!(chart.axes_count(), expected);
                    },
                    AxisOp::Series => {
                        chart.add_series();
                    },
                }
                let mut ids: Vec<u32> = chart.axes().iter().map(Axis::id).collect();
                prop_assert!(ids.iter().all(|id| *id >= 1));
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), chart.axes_count());
            }
        }

        #[test]
        fn default_axes_are_idempotent(kind in chart_kind(), extra in 0usize..3) {
            let mut chart = Chart::new(kind);
            for _ in 0..extra {
                chart.add_axis(AxisType::Value, AxisPosition::Right);
            }
            let first = chart.add_default_axes();
            let count = chart.axes_count();
            let second = chart.add_default_axes();
            prop_assert_eq!(first, second);
            prop_assert_eq!(chart.axes_count(), count);
            prop_assert_eq!(count, extra + kind.default_axes().len());
        }

        #[test]
        fn moving_series_keeps_the_count(
            series in 1u32..6,
            target in 0u32..6,
            secondary in any::<bool>(),
        ) {
            let mut chart = Chart::new(ChartKind::Line);
            for _ in 0..series {
                chart.add_series();
            }
            let ids = if secondary {
                let category = chart.add_axis(AxisType::Category, AxisPosition::Bottom);
                let value = chart.add_axis(AxisType::Value, AxisPosition::Right);
                vec![category, value]
            } else {
                vec![1, 2]
            };
            let before = chart.series_count();
            let moved = chart.set_series_axes_ids(target, &ids);
            prop_assert_eq!(moved, target < series);
            prop_assert_eq!(chart.series_count(), before);
            if moved {
                for id in &ids {
                    prop_assert!(chart.series_that_use_axis(*id).contains(&target));
                }
                prop_assert!(chart.blocks().iter().all(|b| !b.series().is_empty()));
            }
        }

        #[test]
        fn api_built_charts_round_trip(
            kind in chart_kind(),
            count in 0usize..4,
            vary_colors in prop::option::of(any::<bool>()),
            gap_width in prop::option::of(0u16..=500),
            hole_size in prop::option::of(10u8..=90),
            bounds in prop::option::of((-100i32..0, 0i32..100)),
            deleted in prop::option::of(any::<bool>()),
            tick_mark in prop::option::of(prop::sample::select(vec![
                TickMark::Cross, TickMark::In, TickMark::None, TickMark::Out,
            ])),
        ) {
            let mut chart = Chart::new(kind);
            for n in 0..count {
                let series = chart.add_series();
                series.set_value_data(DataSource::from_numbers([n as f64, 0.5]));
            }
            if let Some(block) = chart.block_mut(0) {
                if !matches!(kind, ChartKind::Stock | ChartKind::Surface | ChartKind::Surface3D) {
                    block.vary_colors = vary_colors;
                }
                if matches!(kind, ChartKind::Bar | ChartKind::Bar3D | ChartKind::OfPie) {
                    block.gap_width = gap_width;
                }
                if kind == ChartKind::Doughnut {
                    block.hole_size = hole_size;
                }
            }
            let ids: Vec<u32> = chart.axes().iter().map(Axis::id).collect();
            for id in ids {
                if let Some(axis) = chart.axis_mut(id) {
                    axis.min = bounds.map(|(min, _)| f64::from(min));
                    axis.max = bounds.map(|(_, max)| f64::from(max));
                    axis.deleted = deleted;
                    axis.major_tick_mark = tick_mark;
                }
            }
            let back = round_trip(&chart);
            prop_assert_eq!(back.series_count(), count);
            if count > 0 {
                prop_assert_eq!(back.kind(), kind);
                prop_assert_eq!(&back, &chart);
            }
        }
    }
}
