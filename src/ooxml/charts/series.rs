//! Chart series, `c:ser`.
//!
//! One element layout serves every series flavour; [`SeriesType`] decides
//! which optional children are legal. A child that is illegal for the type
//! is neither read nor written, even when the field holds a value.

use crate::ooxml::charts::data_source::DataSource;
use crate::ooxml::charts::format::{BlipFill, MarkerFormat, PictureOptions, ShapeFormat};
use crate::ooxml::charts::labels::{Label, LabelShow, Labels};
use crate::ooxml::charts::models::Text;
use crate::ooxml::charts::types::{
    BarShape, ErrorBarDirection, ErrorBarType, ErrorValueType, LabelPosition, SeriesType,
    TrendlineType,
};
use crate::ooxml::error::Result;
use crate::ooxml::xml::{XmlReader, XmlWriter};
use std::io::{BufRead, Write};

/// Formatting override for one data point, `c:dPt`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataPoint {
    pub index: u32,
    pub invert_if_negative: Option<bool>,
    pub marker: Option<MarkerFormat>,
    pub bubble_3d: Option<bool>,
    pub explosion: Option<u32>,
    pub shape: Option<ShapeFormat>,
    pub picture_options: Option<PictureOptions>,
}

impl DataPoint {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn with_shape(mut self, shape: ShapeFormat) -> Self {
        self.shape = Some(shape);
        self
    }

    fn read<R: BufRead>(reader: &mut XmlReader<R>, series_type: SeriesType) -> Result<Self> {
        let mut point = Self::default();
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "idx" => point.index = reader.val().unwrap_or(0),
                "invertIfNegative" if series_type.has_invert_if_negative() => {
                    point.invert_if_negative = reader.bool_val();
                },
                "marker" if series_type.has_marker() => {
                    point.marker = Some(MarkerFormat::read(reader)?);
                },
                "bubble3D" if series_type.has_bubble_3d() => point.bubble_3d = reader.bool_val(),
                "explosion" if series_type.has_explosion() => point.explosion = reader.val(),
                "spPr" => point.shape = Some(ShapeFormat::read(reader)?),
                "pictureOptions" if series_type.has_picture_options() => {
                    point.picture_options = Some(PictureOptions::read(reader)?);
                },
                _ => reader.skip_element()?,
            }
        }
        Ok(point)
    }

    fn write<W: Write>(&self, writer: &mut XmlWriter<W>, series_type: SeriesType) -> Result<()> {
        writer.start_element("c:dPt")?;
        writer.val_element("c:idx", &self.index)?;
        if series_type.has_invert_if_negative() {
            writer.optional_val_element("c:invertIfNegative", self.invert_if_negative.as_ref())?;
        }
        if series_type.has_marker()
            && let Some(marker) = &self.marker
        {
            marker.write(writer)?;
        }
        if series_type.has_bubble_3d() {
            writer.optional_val_element("c:bubble3D", self.bubble_3d.as_ref())?;
        }
        if series_type.has_explosion() {
            writer.optional_val_element("c:explosion", self.explosion.as_ref())?;
        }
        if let Some(shape) = &self.shape {
            shape.write(writer)?;
        }
        if series_type.has_picture_options()
            && let Some(options) = &self.picture_options
        {
            options.write(writer)?;
        }
        writer.end_element()
    }
}

/// Regression line of a series, `c:trendline`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trendline {
    pub name: Option<String>,
    pub shape: Option<ShapeFormat>,
    pub kind: TrendlineType,
    /// Polynomial order (2-6)
    pub order: Option<u8>,
    /// Moving-average period
    pub period: Option<u32>,
    pub forward: Option<f64>,
    pub backward: Option<f64>,
    pub intercept: Option<f64>,
    pub display_r_squared: Option<bool>,
    pub display_equation: Option<bool>,
}

impl Trendline {
    pub fn new(kind: TrendlineType) -> Self {
        Self {
            name: None,
            shape: None,
            kind,
            order: None,
            period: None,
            forward: None,
            backward: None,
            intercept: None,
            display_r_squared: None,
            display_equation: None,
        }
    }

    pub fn polynomial(order: u8) -> Self {
        Self {
            order: Some(order.clamp(2, 6)),
            ..Self::new(TrendlineType::Polynomial)
        }
    }

    pub fn moving_average(period: u32) -> Self {
        Self {
            period: Some(period.max(2)),
            ..Self::new(TrendlineType::MovingAverage)
        }
    }

    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut trendline = Self::new(TrendlineType::Linear);
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "name" => trendline.name = Some(reader.read_text()?),
                "spPr" => trendline.shape = Some(ShapeFormat::read(reader)?),
                "trendlineType" => {
                    trendline.kind = reader.val().unwrap_or(TrendlineType::Linear);
                },
                "order" => trendline.order = reader.val(),
                "period" => trendline.period = reader.val(),
                "forward" => trendline.forward = reader.val(),
                "backward" => trendline.backward = reader.val(),
                "intercept" => trendline.intercept = reader.val(),
                "dispRSqr" => trendline.display_r_squared = reader.bool_val(),
                "dispEq" => trendline.display_equation = reader.bool_val(),
                _ => reader.skip_element()?,
            }
        }
        Ok(trendline)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:trendline")?;
        if let Some(name) = &self.name {
            writer.text_element("c:name", name)?;
        }
        if let Some(shape) = &self.shape {
            shape.write(writer)?;
        }
        writer.val_element("c:trendlineType", &self.kind)?;
        if self.kind == TrendlineType::Polynomial {
            writer.optional_val_element("c:order", self.order.as_ref())?;
        }
        if self.kind == TrendlineType::MovingAverage {
            writer.optional_val_element("c:period", self.period.as_ref())?;
        }
        writer.optional_val_element("c:forward", self.forward.as_ref())?;
        writer.optional_val_element("c:backward", self.backward.as_ref())?;
        writer.optional_val_element("c:intercept", self.intercept.as_ref())?;
        writer.optional_val_element("c:dispRSqr", self.display_r_squared.as_ref())?;
        writer.optional_val_element("c:dispEq", self.display_equation.as_ref())?;
        writer.end_element()
    }
}

/// Error bars of a series, `c:errBars`.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBars {
    pub direction: Option<ErrorBarDirection>,
    pub bar_type: ErrorBarType,
    pub value_type: ErrorValueType,
    pub no_end_cap: Option<bool>,
    /// Custom plus amounts (`ErrorValueType::Custom`)
    pub plus: DataSource,
    /// Custom minus amounts (`ErrorValueType::Custom`)
    pub minus: DataSource,
    /// Amount for fixed, percentage and standard-deviation bars
    pub value: Option<f64>,
    pub shape: Option<ShapeFormat>,
}

impl ErrorBars {
    pub fn new(bar_type: ErrorBarType, value_type: ErrorValueType) -> Self {
        Self {
            direction: None,
            bar_type,
            value_type,
            no_end_cap: None,
            plus: DataSource::new(),
            minus: DataSource::new(),
            value: None,
            shape: None,
        }
    }

    /// Fixed-amount bars on both sides.
    pub fn fixed(value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::new(ErrorBarType::Both, ErrorValueType::FixedValue)
        }
    }

    /// Custom bars taking their amounts from two data sources.
    pub fn custom(plus: DataSource, minus: DataSource) -> Self {
        Self {
            plus,
            minus,
            ..Self::new(ErrorBarType::Both, ErrorValueType::Custom)
        }
    }

    pub fn with_direction(mut self, direction: ErrorBarDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn read<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let mut bars = Self::new(ErrorBarType::Both, ErrorValueType::FixedValue);
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "errDir" => bars.direction = reader.val(),
                "errBarType" => bars.bar_type = reader.val().unwrap_or(ErrorBarType::Both),
                "errValType" => {
                    bars.value_type = reader.val().unwrap_or(ErrorValueType::FixedValue);
                },
                "noEndCap" => bars.no_end_cap = reader.bool_val(),
                "plus" => bars.plus = DataSource::read(reader)?,
                "minus" => bars.minus = DataSource::read(reader)?,
                "val" => bars.value = reader.val(),
                "spPr" => bars.shape = Some(ShapeFormat::read(reader)?),
                _ => reader.skip_element()?,
            }
        }
        Ok(bars)
    }

    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start_element("c:errBars")?;
        writer.optional_val_element("c:errDir", self.direction.as_ref())?;
        writer.val_element("c:errBarType", &self.bar_type)?;
        writer.val_element("c:errValType", &self.value_type)?;
        writer.optional_val_element("c:noEndCap", self.no_end_cap.as_ref())?;
        self.plus.write(writer, "c:plus")?;
        self.minus.write(writer, "c:minus")?;
        writer.optional_val_element("c:val", self.value.as_ref())?;
        if let Some(shape) = &self.shape {
            shape.write(writer)?;
        }
        writer.end_element()
    }
}

/// One plotted data series.
///
/// `index` identifies the series; `order` is its plotting position. Both
/// start out equal and `order` can later be swapped by the chart.
/// Equality compares the whole series, so two series are equal exactly
/// when they hold the same data and formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    series_type: SeriesType,
    index: u32,
    order: u32,
    pub name: Option<Text>,
    pub shape: Option<ShapeFormat>,
    pub invert_if_negative: Option<bool>,
    pub picture_options: Option<PictureOptions>,
    pub marker: Option<MarkerFormat>,
    /// Pie slice explosion in percent
    pub explosion: Option<u32>,
    data_points: Vec<DataPoint>,
    labels: Labels,
    pub trendlines: Vec<Trendline>,
    pub error_bars: Vec<ErrorBars>,
    category: DataSource,
    value: DataSource,
    bubble_size: DataSource,
    pub bar_shape: Option<BarShape>,
    pub smooth: Option<bool>,
    pub bubble_3d: Option<bool>,
}

impl Series {
    /// Create an empty series whose `index` and `order` are both `index`.
    pub fn new(series_type: SeriesType, index: u32) -> Self {
        Self {
            series_type,
            index,
            order: index,
            name: None,
            shape: None,
            invert_if_negative: None,
            picture_options: None,
            marker: None,
            explosion: None,
            data_points: Vec::new(),
            labels: Labels::default(),
            trendlines: Vec::new(),
            error_bars: Vec::new(),
            category: DataSource::new(),
            value: DataSource::new(),
            bubble_size: DataSource::new(),
            bar_shape: None,
            smooth: None,
            bubble_3d: None,
        }
    }

    #[inline]
    pub fn series_type(&self) -> SeriesType {
        self.series_type
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn order(&self) -> u32 {
        self.order
    }

    pub(crate) fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    /// Adopt the series flavour of a new owning block.
    pub(crate) fn set_series_type(&mut self, series_type: SeriesType) {
        self.series_type = series_type;
    }

    pub fn with_name(mut self, name: Text) -> Self {
        self.name = Some(name);
        self
    }

    pub fn category_data(&self) -> &DataSource {
        &self.category
    }

    pub fn value_data(&self) -> &DataSource {
        &self.value
    }

    pub fn bubble_size_data(&self) -> &DataSource {
        &self.bubble_size
    }

    /// Replace the category (or x) data.
    pub fn set_category_data(&mut self, data: DataSource) {
        self.category = data;
    }

    /// Replace the value (or y) data.
    pub fn set_value_data(&mut self, data: DataSource) {
        self.value = data;
    }

    /// Replace the bubble-size data. Only written for bubble series.
    pub fn set_bubble_size_data(&mut self, data: DataSource) {
        self.bubble_size = data;
    }

    pub fn data_points(&self) -> &[DataPoint] {
        &self.data_points
    }

    pub fn data_point(&self, index: u32) -> Option<&DataPoint> {
        self.data_points.iter().find(|p| p.index == index)
    }

    /// Insert or replace the override for `point.index`.
    pub fn replace_data_point(&mut self, point: DataPoint) -> Option<DataPoint> {
        match self.data_points.binary_search_by_key(&point.index, |p| p.index) {
            Ok(pos) => Some(std::mem::replace(&mut self.data_points[pos], point)),
            Err(pos) => {
                self.data_points.insert(pos, point);
                None
            },
        }
    }

    /// Mutate an existing override in place. Returns false if there is none.
    pub fn update_data_point(&mut self, index: u32, update: impl FnOnce(&mut DataPoint)) -> bool {
        match self.data_points.iter_mut().find(|p| p.index == index) {
            Some(point) => {
                update(point);
                true
            },
            None => false,
        }
    }

    pub fn remove_data_point(&mut self, index: u32) -> Option<DataPoint> {
        let pos = self.data_points.iter().position(|p| p.index == index)?;
        Some(self.data_points.remove(pos))
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn labels_mut(&mut self) -> &mut Labels {
        &mut self.labels
    }

    /// Turn the default label display off and label exactly `indices`.
    pub fn set_labels(
        &mut self,
        indices: &[u32],
        show: LabelShow,
        position: Option<LabelPosition>,
    ) {
        self.labels.show = Some(LabelShow::empty());
        self.labels.position = None;
        self.labels.points.clear();
        for &index in indices {
            self.labels.replace_point(Label {
                position,
                ..Label::new(index, show)
            });
        }
    }

    /// Label every point the same way, dropping per-point overrides.
    pub fn set_default_labels(&mut self, show: LabelShow, position: Option<LabelPosition>) {
        self.labels.points.clear();
        self.labels.show = Some(show);
        self.labels.position = position;
    }

    pub fn label(&self, index: u32) -> Option<&Label> {
        self.labels.point(index)
    }

    pub fn replace_label(&mut self, label: Label) -> Option<Label> {
        self.labels.replace_point(label)
    }

    pub fn update_label(&mut self, index: u32, update: impl FnOnce(&mut Label)) -> bool {
        self.labels.update_point(index, update)
    }

    pub fn remove_label(&mut self, index: u32) -> Option<Label> {
        self.labels.remove_point(index)
    }

    /// Error bars allowed per series: one for bar and line, two otherwise.
    fn max_error_bars(&self) -> usize {
        match self.series_type {
            SeriesType::Bar | SeriesType::Line => 1,
            _ if self.series_type.has_error_bars() => 2,
            _ => 0,
        }
    }

    pub(crate) fn visit_blips(&mut self, visit: &mut dyn FnMut(&mut BlipFill)) {
        ShapeFormat::visit_optional(&mut self.shape, visit);
        if let Some(marker) = &mut self.marker {
            marker.visit_blips(visit);
        }
        for point in &mut self.data_points {
            ShapeFormat::visit_optional(&mut point.shape, visit);
            if let Some(marker) = &mut point.marker {
                marker.visit_blips(visit);
            }
        }
        self.labels.visit_blips(visit);
        for trendline in &mut self.trendlines {
            ShapeFormat::visit_optional(&mut trendline.shape, visit);
        }
        for error_bars in &mut self.error_bars {
            ShapeFormat::visit_optional(&mut error_bars.shape, visit);
        }
    }

    /// Read a `c:ser` element of a block whose series are `series_type`.
    pub fn read<R: BufRead>(reader: &mut XmlReader<R>, series_type: SeriesType) -> Result<Self> {
        let mut series = Self::new(series_type, 0);
        let mut order = None;
        let depth = reader.depth();
        while reader.next_child(depth)? {
            match reader.name() {
                "idx" => series.index = reader.val().unwrap_or(0),
                "order" => order = reader.val(),
                "tx" => series.name = Text::read(reader)?,
                "spPr" => series.shape = Some(ShapeFormat::read(reader)?),
                "invertIfNegative" if series_type.has_invert_if_negative() => {
                    series.invert_if_negative = reader.bool_val();
                },
                "pictureOptions" if series_type.has_picture_options() => {
                    series.picture_options = Some(PictureOptions::read(reader)?);
                },
                "marker" if series_type.has_marker() => {
                    series.marker = Some(MarkerFormat::read(reader)?);
                },
                "explosion" if series_type.has_explosion() => series.explosion = reader.val(),
                "dPt" if series_type.has_data_points() => {
                    let point = DataPoint::read(reader, series_type)?;
                    series.replace_data_point(point);
                },
                "dLbls" if series_type.has_data_points() => series.labels = Labels::read(reader)?,
                "trendline" if series_type.has_error_bars() => {
                    series.trendlines.push(Trendline::read(reader)?);
                },
                "errBars" if series_type.has_error_bars() => {
                    series.error_bars.push(ErrorBars::read(reader)?);
                },
                "cat" | "xVal" => series.category = DataSource::read(reader)?,
                "val" | "yVal" => series.value = DataSource::read(reader)?,
                "bubbleSize" if series_type == SeriesType::Bubble => {
                    series.bubble_size = DataSource::read(reader)?;
                },
                "shape" if series_type == SeriesType::Bar => series.bar_shape = reader.val(),
                "smooth" if series_type.has_smooth() => series.smooth = reader.bool_val(),
                "bubble3D" if series_type.has_bubble_3d() => series.bubble_3d = reader.bool_val(),
                _ => reader.skip_element()?,
            }
        }
        series.order = order.unwrap_or(series.index);
        Ok(series)
    }

    /// Write the series in schema order for its type.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        let ty = self.series_type;
        writer.start_element("c:ser")?;
        writer.val_element("c:idx", &self.index)?;
        writer.val_element("c:order", &self.order)?;
        if let Some(name) = &self.name {
            name.write(writer)?;
        }
        if let Some(shape) = &self.shape {
            shape.write(writer)?;
        }
        if ty.has_invert_if_negative() {
            writer.optional_val_element("c:invertIfNegative", self.invert_if_negative.as_ref())?;
        }
        if ty.has_picture_options()
            && let Some(options) = &self.picture_options
        {
            options.write(writer)?;
        }
        if ty.has_marker()
            && let Some(marker) = &self.marker
        {
            marker.write(writer)?;
        }
        if ty.has_explosion() {
            writer.optional_val_element("c:explosion", self.explosion.as_ref())?;
        }
        if ty.has_data_points() {
            for point in &self.data_points {
                point.write(writer, ty)?;
            }
            if !self.labels.is_empty() {
                self.labels.write(writer)?;
            }
        }
        if ty.has_error_bars() {
            for trendline in &self.trendlines {
                trendline.write(writer)?;
            }
            for bars in self.error_bars.iter().take(self.max_error_bars()) {
                bars.write(writer)?;
            }
        }
        let (category_tag, value_tag) = if ty.uses_xy() {
            ("c:xVal", "c:yVal")
        } else {
            ("c:cat", "c:val")
        };
        self.category.write(writer, category_tag)?;
        self.value.write(writer, value_tag)?;
        if ty == SeriesType::Bar {
            writer.optional_val_element("c:shape", self.bar_shape.as_ref())?;
        }
        if ty == SeriesType::Bubble {
            self.bubble_size.write(writer, "c:bubbleSize")?;
        }
        if ty.has_smooth() {
            writer.optional_val_element("c:smooth", self.smooth.as_ref())?;
        }
        if ty.has_bubble_3d() {
            writer.optional_val_element("c:bubble3D", self.bubble_3d.as_ref())?;
        }
        writer.end_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::charts::data_source::DataSourceKind;
    use crate::ooxml::charts::format::{Color, Fill};
    use crate::ooxml::charts::types::MarkerSymbol;
    use crate::ooxml::options::{ReadOptions, WriteOptions};
    use pretty_assertions::assert_eq;

    fn write(series: &Series) -> String {
        let mut writer = XmlWriter::in_memory(WriteOptions::new().with_xml_declaration(false));
        series.write(&mut writer).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    fn read(xml: &str, series_type: SeriesType) -> Series {
        let mut reader = XmlReader::from_str(xml, ReadOptions::new());
        reader.next_root().unwrap();
        Series::read(&mut reader, series_type).unwrap()
    }

    fn sample(series_type: SeriesType) -> Series {
        let mut series = Series::new(series_type, 2).with_name(Text::Reference("Sheet1!$B$1".into()));
        series.set_category_data(DataSource::from_reference(
            DataSourceKind::StringReference,
            "Sheet1!$A$2:$A$4",
        ));
        series.set_value_data(DataSource::from_reference(
            DataSourceKind::NumberReference,
            "Sheet1!$B$2:$B$4",
        ));
        series
    }

    #[test]
    fn bar_series_element_order() {
        let mut series = sample(SeriesType::Bar);
        series.invert_if_negative = Some(false);
        series.bar_shape = Some(BarShape::Cylinder);
        assert_eq!(
            write(&series),
            concat!(
                r#"<c:ser><c:idx val="2"/><c:order val="2"/><c:tx><c:strRef><c:f>Sheet1!$B$1</c:f></c:strRef></c:tx>"#,
                r#"<c:invertIfNegative val="0"/>"#,
                r#"<c:cat><c:strRef><c:f>Sheet1!$A$2:$A$4</c:f></c:strRef></c:cat>"#,
                r#"<c:val><c:numRef><c:f>Sheet1!$B$2:$B$4</c:f></c:numRef></c:val>"#,
                r#"<c:shape val="cylinder"/></c:ser>"#
            )
        );
    }

    #[test]
    fn fields_illegal_for_type_are_not_written() {
        let mut series = sample(SeriesType::Pie);
        series.marker = Some(MarkerFormat::new(MarkerSymbol::Circle));
        series.smooth = Some(true);
        series.invert_if_negative = Some(true);
        series.trendlines.push(Trendline::new(TrendlineType::Linear));
        series.error_bars.push(ErrorBars::fixed(1.0));
        series.explosion = Some(10);
        let xml = write(&series);
        assert!(!xml.contains("marker"));
        assert!(!xml.contains("smooth"));
        assert!(!xml.contains("invertIfNegative"));
        assert!(!xml.contains("trendline"));
        assert!(!xml.contains("errBars"));
        assert!(xml.contains(r#"<c:explosion val="10"/>"#));
    }

    #[test]
    fn scatter_series_uses_xy_data() {
        let mut series = sample(SeriesType::Scatter);
        series.smooth = Some(false);
        series.marker = Some(MarkerFormat::new(MarkerSymbol::Diamond).with_size(7));
        let xml = write(&series);
        assert!(xml.contains("<c:xVal>"));
        assert!(xml.contains("<c:yVal>"));
        assert!(!xml.contains("<c:cat>"));
        assert_eq!(read(&xml, SeriesType::Scatter), series);
    }

    #[test]
    fn line_series_round_trip_with_extras() {
        let mut series = sample(SeriesType::Line);
        series.shape = Some(ShapeFormat::new().with_fill(Fill::Solid(Color::rgb("4472C4"))));
        series.smooth = Some(true);
        series.replace_data_point(DataPoint::new(1).with_shape(ShapeFormat::new().with_fill(Fill::None)));
        series.set_labels(&[0, 2], LabelShow::VALUE, Some(LabelPosition::Top));
        series.trendlines.push(Trendline::polynomial(3));
        series.error_bars.push(ErrorBars::custom(
            DataSource::from_numbers([0.5, 0.5, 0.5]),
            DataSource::from_reference(DataSourceKind::NumberReference, "Sheet1!$C$2:$C$4"),
        ));
        series.error_bars.push(ErrorBars::fixed(2.0));

        let xml = write(&series);
        let back = read(&xml, SeriesType::Line);
        // line series carry one error bar set
        assert_eq!(back.error_bars.len(), 1);
        series.error_bars.truncate(1);
        assert_eq!(back, series);
    }

    #[test]
    fn set_labels_and_default_labels() {
        let mut series = Series::new(SeriesType::Bar, 0);
        series.set_labels(&[3, 1], LabelShow::VALUE, None);
        assert_eq!(series.labels().show, Some(LabelShow::empty()));
        assert_eq!(series.labels().points.len(), 2);
        assert_eq!(series.label(1).and_then(|l| l.show), Some(LabelShow::VALUE));

        assert!(series.update_label(3, |l| l.deleted = true));
        assert!(series.label(3).is_some_and(|l| l.deleted));

        series.set_default_labels(LabelShow::CATEGORY_NAME | LabelShow::VALUE, Some(LabelPosition::OutsideEnd));
        assert!(series.labels().points.is_empty());
        assert_eq!(series.labels().position, Some(LabelPosition::OutsideEnd));
    }

    #[test]
    fn data_point_accessors() {
        let mut series = Series::new(SeriesType::Pie, 0);
        assert!(series.replace_data_point(DataPoint::new(4)).is_none());
        assert!(series.replace_data_point(DataPoint::new(0)).is_none());
        assert!(series.update_data_point(4, |p| p.explosion = Some(25)));
        assert_eq!(series.data_point(4).and_then(|p| p.explosion), Some(25));
        assert_eq!(series.data_points()[0].index, 0);
        assert!(series.remove_data_point(0).is_some());
        assert!(series.remove_data_point(0).is_none());
    }

    #[test]
    fn order_defaults_to_index_on_read() {
        let series = read(r#"<c:ser><c:idx val="5"/></c:ser>"#, SeriesType::Area);
        assert_eq!(series.index(), 5);
        assert_eq!(series.order(), 5);
    }
}
