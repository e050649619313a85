//! DrawingML charts.
//!
//! A [`Chart`] is the in-memory form of a chart part (`c:chartSpace`). It
//! owns a list of [`Axis`] values and an ordered list of [`ChartTypeBlock`]s,
//! each grouping the [`Series`] drawn with one chart kind on one axis set.
//!
//! # Example
//!
//! ```
//! use chartml::ooxml::charts::{Chart, ChartKind, DataSource, Title};
//! use chartml::ooxml::WriteOptions;
//!
//! let mut chart = Chart::new(ChartKind::Bar).with_title(Title::new("Revenue"));
//! for values in [[120.0, 135.5], [98.0, 101.25]] {
//!     chart.add_series().set_value_data(DataSource::from_numbers(values));
//! }
//! assert_eq!(chart.series_count(), 2);
//! assert_eq!(chart.axes_count(), 2);
//!
//! let xml = chart.to_xml(WriteOptions::new()).unwrap();
//! assert!(xml.contains("<c:barChart>"));
//! ```

pub mod axis;
pub mod chart;
pub mod data_source;
pub mod format;
pub mod labels;
pub mod legend;
pub mod media;
pub mod models;
pub mod range;
pub mod series;
pub mod type_block;
pub mod types;

pub use axis::{
    Axis, AxisCrossing, AxisDetails, CategoryAxis, DateAxis, DisplayUnit, DisplayUnits,
    Gridlines, SeriesAxis, ValueAxis,
};
pub use chart::{Chart, ChartProtection, SheetRef, Surface, View3D};
pub use data_source::{DataSource, DataSourceKind};
pub use format::{
    BlipFill, Color, ColorTransform, ColorValue, Fill, GradientFill, GradientStop, LineFormat,
    MarkerFormat, PatternFill, PictureFormat, PictureOptions, ShapeFormat, TextFormat,
};
pub use labels::{Label, LabelShow, Labels};
pub use legend::{DataTable, Legend, LegendEntry};
pub use media::{MediaRegistry, MediaStore, relationship_id};
pub use models::{Layout, NumberFormat, Text, Title};
pub use range::{CellRange, SeriesRangeOptions, column_to_letters};
pub use series::{DataPoint, ErrorBars, Series, Trendline};
pub use type_block::{AxisIds, BandFormat, ChartLines, ChartTypeBlock, UpDownBars};
pub use types::{AxisPosition, AxisType, ChartKind, SeriesType};
