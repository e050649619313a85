//! Chart axes: `c:catAx`, `c:valAx`, `c:serAx` and `c:dateAx`.
//!
//! Axes belong to the chart and are referenced from chart-type blocks by
//! id. The partner axis is likewise stored as an id, never as a pointer.

use crate::ooxml::charts::format::{BlipFill, ShapeFormat, TextFormat};
use crate::ooxml::charts::models::{NumberFormat, Title};
use crate::ooxml::charts::types::{
    AxisPosition, AxisType, BuiltInUnit, CrossBetween, Crosses, LabelAlign, Orientation,
    TickLabelPosition, TickMark, TimeUnit,
};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xml::{XmlReader, XmlWriter};
use std::io::{BufRead, Write};

/// Major or minor gridlines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gridlines {
    pub shape: Option<ShapeFormat>,
}

impl Gridlines {
    fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut gridlines = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            if reader.name() == "spPr" {
                gridlines.shape = Some(ShapeFormat::read(reader)?);
            } else {
                reader.skip_element()?;
            }
        }
        Ok(gridlines)
    }

    fn write<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()> {
        writer.start_element(name)?;
        if let Some(shape) = &self.shape {
            shape.write(writer)?;
        }
        writer.end_element()
    }
}

/// Where this axis crosses its partner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisCrossing {
    Crosses(Crosses),
    /// Crosses at a value on the partner axis
    At(f64),
}

/// Display units of a value axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayUnits {
    pub unit: DisplayUnit,
    /// Write a `dispUnitsLbl` so the unit name is shown
    pub show_label: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayUnit {
    BuiltIn(BuiltInUnit),
    Custom(f64),
}

/// Properties only category axes have.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryAxis {
    pub auto: Option<bool>,
    pub label_align: Option<LabelAlign>,
    pub label_offset: Option<u16>,
    pub tick_label_skip: Option<u32>,
    pub tick_mark_skip: Option<u32>,
    pub no_multi_level_labels: Option<bool>,
}

/// Properties only value axes have.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueAxis {
    pub cross_between: Option<CrossBetween>,
    pub major_unit: Option<f64>,
    pub minor_unit: Option<f64>,
    pub display_units: Option<DisplayUnits>,
}

/// Properties only series (depth) axes have.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesAxis {
    pub tick_label_skip: Option<u32>,
    pub tick_mark_skip: Option<u32>,
}

/// Properties only date axes have.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DateAxis {
    pub auto: Option<bool>,
    pub label_offset: Option<u16>,
    pub base_time_unit: Option<TimeUnit>,
    pub major_unit: Option<f64>,
    pub major_time_unit: Option<TimeUnit>,
    pub minor_unit: Option<f64>,
    pub minor_time_unit: Option<TimeUnit>,
}

/// Type-specific part of an axis.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisDetails {
    Category(CategoryAxis),
    Value(ValueAxis),
    Series(SeriesAxis),
    Date(DateAxis),
}

impl AxisDetails {
    fn for_type(axis_type: AxisType) -> Self {
        match axis_type {
            AxisType::Category => Self::Category(CategoryAxis::default()),
            AxisType::Value => Self::Value(ValueAxis::default()),
            AxisType::Series => Self::Series(SeriesAxis::default()),
            AxisType::Date => Self::Date(DateAxis::default()),
        }
    }

    fn axis_type(&self) -> AxisType {
        match self {
            Self::Category(_) => AxisType::Category,
            Self::Value(_) => AxisType::Value,
            Self::Series(_) => AxisType::Series,
            Self::Date(_) => AxisType::Date,
        }
    }
}

/// One chart axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    id: u32,
    pub position: AxisPosition,
    /// Id of the partner axis
    pub cross_axis: Option<u32>,
    pub deleted: Option<bool>,
    pub orientation: Option<Orientation>,
    pub log_base: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub major_gridlines: Option<Gridlines>,
    pub minor_gridlines: Option<Gridlines>,
    pub title: Option<Title>,
    pub number_format: Option<NumberFormat>,
    pub major_tick_mark: Option<TickMark>,
    pub minor_tick_mark: Option<TickMark>,
    pub tick_label_position: Option<TickLabelPosition>,
    pub shape: Option<ShapeFormat>,
    pub text_format: Option<TextFormat>,
    pub crossing: Option<AxisCrossing>,
    pub details: AxisDetails,
}

impl Axis {
    pub(crate) fn new(axis_type: AxisType, id: u32, position: AxisPosition) -> Self {
        Self {
            id,
            position,
            cross_axis: None,
            deleted: None,
            orientation: None,
            log_base: None,
            min: None,
            max: None,
            major_gridlines: None,
            minor_gridlines: None,
            title: None,
            number_format: None,
            major_tick_mark: None,
            minor_tick_mark: None,
            tick_label_position: None,
            shape: None,
            text_format: None,
            crossing: None,
            details: AxisDetails::for_type(axis_type),
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn axis_type(&self) -> AxisType {
        self.details.axis_type()
    }

    pub fn with_title(mut self, title: Title) -> Self {
        self.title = Some(title);
        self
    }

    pub(crate) fn visit_blips(&mut self, visit: &mut dyn FnMut(&mut BlipFill)) {
        ShapeFormat::visit_optional(&mut self.shape, visit);
        if let Some(title) = &mut self.title {
            ShapeFormat::visit_optional(&mut title.shape, visit);
        }
        for gridlines in [&mut self.major_gridlines, &mut self.minor_gridlines]
            .into_iter()
            .flatten()
        {
            ShapeFormat::visit_optional(&mut gridlines.shape, visit);
        }
    }

    /// Read an axis element; the element name gives the axis type.
    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let axis_type = AxisType::parse(reader.name()).ok_or_else(|| {
            OoxmlError::InvalidFormat(format!("<{}> is not an axis element", reader.name()))
        })?;
        let mut axis = Self::new(axis_type, 0, AxisPosition::Bottom);
        let mut id = None;
        let depth = reader.depth();
        while reader.next_child(depth)? {
            let name = reader.name();
            match name {
                "axId" => id = reader.val::<u32>(),
                "scaling" => axis.read_scaling(reader)?,
                "delete" => axis.deleted = reader.bool_val(),
                "axPos" => axis.position = reader.val().unwrap_or(AxisPosition::Bottom),
                "majorGridlines" => axis.major_gridlines = Some(Gridlines::read(reader)?),
                "minorGridlines" => axis.minor_gridlines = Some(Gridlines::read(reader)?),
                "title" => axis.title = Some(Title::read(reader)?),
                "numFmt" => axis.number_format = Some(NumberFormat::read(reader)),
                "majorTickMark" => axis.major_tick_mark = reader.val(),
                "minorTickMark" => axis.minor_tick_mark = reader.val(),
                "tickLblPos" => axis.tick_label_position = reader.val(),
                "spPr" => axis.shape = Some(ShapeFormat::read(reader)?),
                "txPr" => axis.text_format = Some(TextFormat::read(reader)?),
                "crossAx" => axis.cross_axis = reader.val(),
                "crosses" => axis.crossing = reader.val().map(AxisCrossing::Crosses),
                "crossesAt" => axis.crossing = reader.val().map(AxisCrossing::At),
                _ => axis.read_detail(reader)?,
            }
        }
        axis.id = id.filter(|id| *id > 0).ok_or_else(|| {
            OoxmlError::InvalidFormat(format!("{} without a valid axId", axis_type.xml_value()))
        })?;
        Ok(axis)
    }

    fn read_scaling<R: BufRead>(&mut self, reader: &mut XmlReader<R>) -> Result<()> {
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "logBase" => self.log_base = reader.val(),
                "orientation" => self.orientation = reader.val(),
                "max" => self.max = reader.val(),
                "min" => self.min = reader.val(),
                _ => reader.skip_element()?,
            }
        }
        Ok(())
    }

    fn read_detail<R: BufRead>(&mut self, reader: &mut XmlReader<R>) -> Result<()> {
        match &mut self.details {
            AxisDetails::Category(cat) => match reader.name() {
                "auto" => cat.auto = reader.bool_val(),
                "lblAlgn" => cat.label_align = reader.val(),
                "lblOffset" => cat.label_offset = reader.val(),
                "tickLblSkip" => cat.tick_label_skip = reader.val(),
                "tickMarkSkip" => cat.tick_mark_skip = reader.val(),
                "noMultiLvlLbl" => cat.no_multi_level_labels = reader.bool_val(),
                _ => reader.skip_element()?,
            },
            AxisDetails::Value(val) => match reader.name() {
                "crossBetween" => val.cross_between = reader.val(),
                "majorUnit" => val.major_unit = reader.val(),
                "minorUnit" => val.minor_unit = reader.val(),
                "dispUnits" => val.display_units = read_display_units(reader)?,
                _ => reader.skip_element()?,
            },
            AxisDetails::Series(ser) => match reader.name() {
                "tickLblSkip" => ser.tick_label_skip = reader.val(),
                "tickMarkSkip" => ser.tick_mark_skip = reader.val(),
                _ => reader.skip_element()?,
            },
            AxisDetails::Date(date) => match reader.name() {
                "auto" => date.auto = reader.bool_val(),
                "lblOffset" => date.label_offset = reader.val(),
                "baseTimeUnit" => date.base_time_unit = reader.val(),
                "majorUnit" => date.major_unit = reader.val(),
                "majorTimeUnit" => date.major_time_unit = reader.val(),
                "minorUnit" => date.minor_unit = reader.val(),
                "minorTimeUnit" => date.minor_time_unit = reader.val(),
                _ => reader.skip_element()?,
            },
        }
        Ok(())
    }

    /// Write the axis in schema order. `axId`, `scaling` and `axPos` are
    /// always written; everything else only when set.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element(&format!("c:{}", self.axis_type().xml_value()))?;
        writer.val_element("c:axId", &self.id)?;
        writer.start_element("c:scaling")?;
        writer.optional_val_element("c:logBase", self.log_base.as_ref())?;
        writer.optional_val_element("c:orientation", self.orientation.as_ref())?;
        writer.optional_val_element("c:max", self.max.as_ref())?;
        writer.optional_val_element("c:min", self.min.as_ref())?;
        writer.end_element()?;
        writer.optional_val_element("c:delete", self.deleted.as_ref())?;
        writer.val_element("c:axPos", &self.position)?;
        if let Some(gridlines) = &self.major_gridlines {
            gridlines.write(writer, "c:majorGridlines")?;
        }
        if let Some(gridlines) = &self.minor_gridlines {
            gridlines.write(writer, "c:minorGridlines")?;
        }
        if let Some(title) = &self.title {
            title.write(writer)?;
        }
        if let Some(format) = &self.number_format {
            format.write(writer)?;
        }
        writer.optional_val_element("c:majorTickMark", self.major_tick_mark.as_ref())?;
        writer.optional_val_element("c:minorTickMark", self.minor_tick_mark.as_ref())?;
        writer.optional_val_element("c:tickLblPos", self.tick_label_position.as_ref())?;
        if let Some(shape) = &self.shape {
            shape.write(writer)?;
        }
        if let Some(format) = &self.text_format {
            format.write(writer)?;
        }
        writer.optional_val_element("c:crossAx", self.cross_axis.as_ref())?;
        match &self.crossing {
            Some(AxisCrossing::Crosses(crosses)) => writer.val_element("c:crosses", crosses)?,
            Some(AxisCrossing::At(value)) => writer.val_element("c:crossesAt", value)?,
            None => {},
        }
        match &self.details {
            AxisDetails::Category(cat) => {
                writer.optional_val_element("c:auto", cat.auto.as_ref())?;
                writer.optional_val_element("c:lblAlgn", cat.label_align.as_ref())?;
                writer.optional_val_element("c:lblOffset", cat.label_offset.as_ref())?;
                writer.optional_val_element("c:tickLblSkip", cat.tick_label_skip.as_ref())?;
                writer.optional_val_element("c:tickMarkSkip", cat.tick_mark_skip.as_ref())?;
                writer.optional_val_element("c:noMultiLvlLbl", cat.no_multi_level_labels.as_ref())?;
            },
            AxisDetails::Value(val) => {
                writer.optional_val_element("c:crossBetween", val.cross_between.as_ref())?;
                writer.optional_val_element("c:majorUnit", val.major_unit.as_ref())?;
                writer.optional_val_element("c:minorUnit", val.minor_unit.as_ref())?;
                if let Some(units) = &val.display_units {
                    write_display_units(writer, units)?;
                }
            },
            AxisDetails::Series(ser) => {
                writer.optional_val_element("c:tickLblSkip", ser.tick_label_skip.as_ref())?;
                writer.optional_val_element("c:tickMarkSkip", ser.tick_mark_skip.as_ref())?;
            },
            AxisDetails::Date(date) => {
                writer.optional_val_element("c:auto", date.auto.as_ref())?;
                writer.optional_val_element("c:lblOffset", date.label_offset.as_ref())?;
                writer.optional_val_element("c:baseTimeUnit", date.base_time_unit.as_ref())?;
                writer.optional_val_element("c:majorUnit", date.major_unit.as_ref())?;
                writer.optional_val_element("c:majorTimeUnit", date.major_time_unit.as_ref())?;
                writer.optional_val_element("c:minorUnit", date.minor_unit.as_ref())?;
                writer.optional_val_element("c:minorTimeUnit", date.minor_time_unit.as_ref())?;
            },
        }
        writer.end_element()
    }
}

fn read_display_units<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Option<DisplayUnits>> {
    let mut unit = None;
    let mut show_label = false;
    let depth = reader.depth();
    while reader.next_child(depth)? {
        match reader.name() {
            "builtInUnit" => unit = reader.val().map(DisplayUnit::BuiltIn),
            "custUnit" => unit = reader.val().map(DisplayUnit::Custom),
            "dispUnitsLbl" => {
                show_label = true;
                reader.skip_element()?;
            },
            _ => reader.skip_element()?,
        }
    }
    Ok(unit.map(|unit| DisplayUnits { unit, show_label }))
}

fn write_display_units<W: Write>(writer: &mut XmlWriter<W>, units: &DisplayUnits) -> Result<()> {
    writer.start_element("c:dispUnits")?;
    match &units.unit {
        DisplayUnit::BuiltIn(unit) => writer.val_element("c:builtInUnit", unit)?,
        DisplayUnit::Custom(value) => writer.val_element("c:custUnit", value)?,
    }
    if units.show_label {
        writer.empty_element("c:dispUnitsLbl", &[])?;
    }
    writer.end_element()
}
