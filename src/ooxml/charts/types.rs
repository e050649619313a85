//! Core chart types and enumerations.
//!
//! This module defines the chart kinds, series types, axis types and the
//! many small token enumerations of the DrawingML chart schema.

use crate::ooxml::xml::xml_enum;
use phf::phf_map;
use std::fmt;

static CHART_KIND_TAGS: phf::Map<&'static str, ChartKind> = phf_map! {
    "areaChart" => ChartKind::Area,
    "area3DChart" => ChartKind::Area3D,
    "lineChart" => ChartKind::Line,
    "line3DChart" => ChartKind::Line3D,
    "stockChart" => ChartKind::Stock,
    "radarChart" => ChartKind::Radar,
    "scatterChart" => ChartKind::Scatter,
    "pieChart" => ChartKind::Pie,
    "pie3DChart" => ChartKind::Pie3D,
    "doughnutChart" => ChartKind::Doughnut,
    "barChart" => ChartKind::Bar,
    "bar3DChart" => ChartKind::Bar3D,
    "ofPieChart" => ChartKind::OfPie,
    "surfaceChart" => ChartKind::Surface,
    "surface3DChart" => ChartKind::Surface3D,
    "bubbleChart" => ChartKind::Bubble,
};

/// Chart kind, one per chart-type element of the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Area chart (2D)
    Area,
    /// Area chart (3D)
    Area3D,
    /// Line chart
    Line,
    /// Line chart (3D)
    Line3D,
    /// Stock (high-low-close) chart
    Stock,
    /// Radar chart
    Radar,
    /// Scatter (XY) chart
    Scatter,
    /// Pie chart
    Pie,
    /// Pie chart (3D)
    Pie3D,
    /// Doughnut chart
    Doughnut,
    /// Bar or column chart
    Bar,
    /// Bar or column chart (3D)
    Bar3D,
    /// Pie-of-pie or bar-of-pie chart
    OfPie,
    /// Surface chart
    Surface,
    /// Surface chart (3D)
    Surface3D,
    /// Bubble chart
    Bubble,
}

impl ChartKind {
    pub const ALL: [ChartKind; 16] = [
        Self::Area,
        Self::Area3D,
        Self::Line,
        Self::Line3D,
        Self::Stock,
        Self::Radar,
        Self::Scatter,
        Self::Pie,
        Self::Pie3D,
        Self::Doughnut,
        Self::Bar,
        Self::Bar3D,
        Self::OfPie,
        Self::Surface,
        Self::Surface3D,
        Self::Bubble,
    ];

    /// Look up the kind for a chart-type element's local name.
    #[inline]
    pub fn from_tag(tag: &str) -> Option<Self> {
        CHART_KIND_TAGS.get(tag).copied()
    }

    /// Returns the XML element name for this chart kind.
    #[inline]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Area => "areaChart",
            Self::Area3D => "area3DChart",
            Self::Line => "lineChart",
            Self::Line3D => "line3DChart",
            Self::Stock => "stockChart",
            Self::Radar => "radarChart",
            Self::Scatter => "scatterChart",
            Self::Pie => "pieChart",
            Self::Pie3D => "pie3DChart",
            Self::Doughnut => "doughnutChart",
            Self::Bar => "barChart",
            Self::Bar3D => "bar3DChart",
            Self::OfPie => "ofPieChart",
            Self::Surface => "surfaceChart",
            Self::Surface3D => "surface3DChart",
            Self::Bubble => "bubbleChart",
        }
    }

    /// Series flavour used by every series of a block of this kind.
    #[inline]
    pub const fn series_type(&self) -> SeriesType {
        match self {
            Self::Area | Self::Area3D => SeriesType::Area,
            Self::Line | Self::Line3D | Self::Stock => SeriesType::Line,
            Self::Bar | Self::Bar3D => SeriesType::Bar,
            Self::Pie | Self::Pie3D | Self::OfPie | Self::Doughnut => SeriesType::Pie,
            Self::Scatter => SeriesType::Scatter,
            Self::Radar => SeriesType::Radar,
            Self::Surface | Self::Surface3D => SeriesType::Surface,
            Self::Bubble => SeriesType::Bubble,
        }
    }

    /// Returns true if this is a 3D chart kind.
    #[inline]
    pub const fn is_3d(&self) -> bool {
        matches!(
            self,
            Self::Area3D | Self::Bar3D | Self::Line3D | Self::Pie3D | Self::Surface3D
        )
    }

    /// Returns true for kinds plotted without axes.
    #[inline]
    pub const fn is_pie_family(&self) -> bool {
        matches!(
            self,
            Self::Pie | Self::Pie3D | Self::Doughnut | Self::OfPie
        )
    }

    /// Axes a chart of this kind needs, in creation order.
    ///
    /// The first two entries cross each other.
    pub const fn default_axes(&self) -> &'static [(AxisType, AxisPosition)] {
        match self {
            Self::Pie | Self::Pie3D | Self::Doughnut | Self::OfPie => &[],
            Self::Scatter | Self::Bubble => &[
                (AxisType::Value, AxisPosition::Bottom),
                (AxisType::Value, AxisPosition::Left),
            ],
            Self::Area | Self::Line | Self::Stock | Self::Radar | Self::Bar => &[
                (AxisType::Category, AxisPosition::Bottom),
                (AxisType::Value, AxisPosition::Left),
            ],
            Self::Area3D | Self::Line3D | Self::Bar3D | Self::Surface | Self::Surface3D => &[
                (AxisType::Category, AxisPosition::Bottom),
                (AxisType::Value, AxisPosition::Left),
                (AxisType::Series, AxisPosition::Bottom),
            ],
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Series flavour; decides which optional series elements are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesType {
    Area,
    Line,
    Bar,
    Pie,
    Scatter,
    Radar,
    Surface,
    Bubble,
}

impl SeriesType {
    /// `marker` child is legal.
    #[inline]
    pub const fn has_marker(&self) -> bool {
        matches!(self, Self::Line | Self::Scatter | Self::Radar)
    }

    /// `smooth` child is legal.
    #[inline]
    pub const fn has_smooth(&self) -> bool {
        matches!(self, Self::Line | Self::Scatter)
    }

    /// `invertIfNegative` child is legal.
    #[inline]
    pub const fn has_invert_if_negative(&self) -> bool {
        matches!(self, Self::Bar | Self::Bubble)
    }

    /// `bubble3D` child is legal.
    #[inline]
    pub const fn has_bubble_3d(&self) -> bool {
        matches!(self, Self::Bubble)
    }

    /// `explosion` child is legal.
    #[inline]
    pub const fn has_explosion(&self) -> bool {
        matches!(self, Self::Pie)
    }

    /// `pictureOptions` child is legal.
    #[inline]
    pub const fn has_picture_options(&self) -> bool {
        matches!(self, Self::Area | Self::Bar)
    }

    /// `errBars` and `trendline` children are legal.
    #[inline]
    pub const fn has_error_bars(&self) -> bool {
        matches!(
            self,
            Self::Line | Self::Scatter | Self::Bar | Self::Area | Self::Bubble
        )
    }

    /// `dPt` and `dLbls` children are legal.
    #[inline]
    pub const fn has_data_points(&self) -> bool {
        !matches!(self, Self::Surface)
    }

    /// Category/value data is written as `xVal`/`yVal`.
    #[inline]
    pub const fn uses_xy(&self) -> bool {
        matches!(self, Self::Scatter | Self::Bubble)
    }
}

xml_enum! {
    /// Axis type; the XML value is the axis element name.
    pub enum AxisType {
        /// Category axis
        Category => "catAx",
        /// Value axis
        Value => "valAx",
        /// Series (depth) axis of 3D charts
        Series => "serAx",
        /// Date axis
        Date => "dateAx",
    }
}

xml_enum! {
    /// Axis position.
    pub enum AxisPosition {
        Bottom => "b",
        Left => "l",
        Right => "r",
        Top => "t",
    }
}

xml_enum! {
    /// Axis orientation (min to max or max to min).
    pub enum Orientation {
        /// Min to max (normal)
        MinMax => "minMax",
        /// Max to min (reversed)
        MaxMin => "maxMin",
    }
}

xml_enum! {
    /// Tick mark style.
    pub enum TickMark {
        Cross => "cross",
        In => "in",
        None => "none",
        Out => "out",
    }
}

xml_enum! {
    /// Tick label position.
    pub enum TickLabelPosition {
        High => "high",
        Low => "low",
        NextTo => "nextTo",
        None => "none",
    }
}

xml_enum! {
    /// Where an axis crosses its partner.
    pub enum Crosses {
        AutoZero => "autoZero",
        Max => "max",
        Min => "min",
    }
}

xml_enum! {
    /// Whether the value axis crosses between categories or at their midpoint.
    pub enum CrossBetween {
        Between => "between",
        MidCategory => "midCat",
    }
}

xml_enum! {
    /// Display units of a value axis.
    pub enum BuiltInUnit {
        Hundreds => "hundreds",
        Thousands => "thousands",
        TenThousands => "tenThousands",
        HundredThousands => "hundredThousands",
        Millions => "millions",
        TenMillions => "tenMillions",
        HundredMillions => "hundredMillions",
        Billions => "billions",
        Trillions => "trillions",
    }
}

xml_enum! {
    /// Base time unit of a date axis.
    pub enum TimeUnit {
        Days => "days",
        Months => "months",
        Years => "years",
    }
}

xml_enum! {
    /// Category label alignment.
    pub enum LabelAlign {
        Center => "ctr",
        Left => "l",
        Right => "r",
    }
}

xml_enum! {
    /// Bar/column direction.
    pub enum BarDirection {
        /// Horizontal bars
        Bar => "bar",
        /// Vertical bars (columns)
        Column => "col",
    }
}

xml_enum! {
    /// Series grouping. `Clustered` is only valid for bar charts.
    pub enum Grouping {
        Standard => "standard",
        Stacked => "stacked",
        PercentStacked => "percentStacked",
        Clustered => "clustered",
    }
}

xml_enum! {
    /// Shape of 3D bars.
    pub enum BarShape {
        Box => "box",
        Cone => "cone",
        ConeToMax => "coneToMax",
        Cylinder => "cylinder",
        Pyramid => "pyramid",
        PyramidToMax => "pyramidToMax",
    }
}

xml_enum! {
    /// Scatter chart style.
    pub enum ScatterStyle {
        None => "none",
        Line => "line",
        LineMarker => "lineMarker",
        Marker => "marker",
        Smooth => "smooth",
        SmoothMarker => "smoothMarker",
    }
}

xml_enum! {
    /// Radar chart style.
    pub enum RadarStyle {
        Standard => "standard",
        Marker => "marker",
        Filled => "filled",
    }
}

xml_enum! {
    /// Second plot of an of-pie chart.
    pub enum OfPieType {
        Pie => "pie",
        Bar => "bar",
    }
}

xml_enum! {
    /// How points are split into the second plot of an of-pie chart.
    pub enum SplitType {
        Auto => "auto",
        Custom => "cust",
        Percent => "percent",
        Position => "pos",
        Value => "val",
    }
}

xml_enum! {
    /// What a bubble's size represents.
    pub enum SizeRepresents {
        Area => "area",
        Width => "w",
    }
}

xml_enum! {
    /// Legend position.
    pub enum LegendPosition {
        Bottom => "b",
        TopRight => "tr",
        Left => "l",
        Right => "r",
        Top => "t",
    }
}

xml_enum! {
    /// Data label position.
    pub enum LabelPosition {
        BestFit => "bestFit",
        Bottom => "b",
        Center => "ctr",
        InsideBase => "inBase",
        InsideEnd => "inEnd",
        Left => "l",
        OutsideEnd => "outEnd",
        Right => "r",
        Top => "t",
    }
}

xml_enum! {
    /// Marker symbol for line, scatter and radar series.
    pub enum MarkerSymbol {
        Circle => "circle",
        Dash => "dash",
        Diamond => "diamond",
        Dot => "dot",
        None => "none",
        Picture => "picture",
        Plus => "plus",
        Square => "square",
        Star => "star",
        Triangle => "triangle",
        X => "x",
        Auto => "auto",
    }
}

xml_enum! {
    /// How blank cells are plotted.
    pub enum DisplayBlanks {
        /// Gaps where there are blank cells
        Gap => "gap",
        /// Connect data points across blank cells
        Span => "span",
        /// Treat blank cells as zero
        Zero => "zero",
    }
}

xml_enum! {
    /// Manual layout mode.
    pub enum LayoutMode {
        Edge => "edge",
        Factor => "factor",
    }
}

xml_enum! {
    /// Manual layout target.
    pub enum LayoutTarget {
        /// Plot area without tick labels
        Inner => "inner",
        /// Plot area including tick labels
        Outer => "outer",
    }
}

xml_enum! {
    /// Trendline regression type.
    pub enum TrendlineType {
        Exponential => "exp",
        Linear => "linear",
        Logarithmic => "log",
        MovingAverage => "movingAvg",
        Polynomial => "poly",
        Power => "power",
    }
}

xml_enum! {
    /// Error bar direction.
    pub enum ErrorBarDirection {
        X => "x",
        Y => "y",
    }
}

xml_enum! {
    /// Which side(s) of a point error bars extend to.
    pub enum ErrorBarType {
        Both => "both",
        Minus => "minus",
        Plus => "plus",
    }
}

xml_enum! {
    /// How error amounts are computed.
    pub enum ErrorValueType {
        Custom => "cust",
        FixedValue => "fixedVal",
        Percentage => "percentage",
        StandardDeviation => "stdDev",
        StandardError => "stdErr",
    }
}

xml_enum! {
    /// Preset line dash.
    pub enum PresetDash {
        Solid => "solid",
        Dot => "dot",
        Dash => "dash",
        LargeDash => "lgDash",
        DashDot => "dashDot",
        LargeDashDot => "lgDashDot",
        LargeDashDotDot => "lgDashDotDot",
        SystemDash => "sysDash",
        SystemDot => "sysDot",
        SystemDashDot => "sysDashDot",
        SystemDashDotDot => "sysDashDotDot",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_round_trips_through_its_tag() {
        for kind in CHART_KIND_TAGS.values() {
            assert_eq!(ChartKind::from_tag(kind.tag()), Some(*kind));
        }
        assert_eq!(CHART_KIND_TAGS.len(), 16);
        assert_eq!(ChartKind::from_tag("fooChart"), None);
    }

    #[test]
    fn series_type_mapping() {
        assert_eq!(ChartKind::Stock.series_type(), SeriesType::Line);
        assert_eq!(ChartKind::Doughnut.series_type(), SeriesType::Pie);
        assert_eq!(ChartKind::OfPie.series_type(), SeriesType::Pie);
        assert_eq!(ChartKind::Surface3D.series_type(), SeriesType::Surface);
        assert_eq!(ChartKind::Area3D.series_type(), SeriesType::Area);
    }

    #[test]
    fn series_type_legality() {
        assert!(SeriesType::Radar.has_marker());
        assert!(!SeriesType::Radar.has_smooth());
        assert!(!SeriesType::Pie.has_error_bars());
        assert!(SeriesType::Bubble.has_invert_if_negative());
        assert!(!SeriesType::Surface.has_data_points());
    }

    #[test]
    fn enum_tokens() {
        assert_eq!(Grouping::parse("percentStacked"), Some(Grouping::PercentStacked));
        assert_eq!(LabelPosition::Center.xml_value(), "ctr");
        assert_eq!(AxisType::parse("dateAx"), Some(AxisType::Date));
        assert_eq!(MarkerSymbol::parse("hexagon"), None);
    }
}
