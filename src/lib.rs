//! chartml - A Rust library for reading and writing OOXML spreadsheet charts
//!
//! This library models the DrawingML chart part of Office Open XML
//! spreadsheets together with the view, page layout and protection
//! metadata of worksheets and chartsheets.
//!
//! # Features
//!
//! - **Chart model**: chart space, plot area, chart-type blocks, series, axes,
//!   legend and data table with every optional property kept as "unset"
//! - **Round-trip XML**: parse a `c:chartSpace` part and write it back in
//!   schema order
//! - **Builder API**: add series and axes programmatically, or build series
//!   from A1 cell ranges
//! - **Sheet metadata**: sheet views, frozen panes, page setup, margins,
//!   headers and footers, and password protection
//!
//! # Example - Building a chart
//!
//! ```
//! use chartml::ooxml::charts::{Chart, ChartKind, SeriesRangeOptions};
//! use chartml::ooxml::xlsx::{Sheet, SheetKind};
//!
//! let mut sheet = Sheet::new("Sales", SheetKind::Worksheet);
//! let chart = sheet.insert_chart(ChartKind::Bar).unwrap();
//! let options = SeriesRangeOptions::new().with_header(true).with_categories(true);
//! let added = chart.add_series_from_range("A1:C5", &options);
//! assert_eq!(added.len(), 2);
//! ```
//!
//! # Example - Reading a chart part
//!
//! ```no_run
//! use chartml::ooxml::ReadOptions;
//! use chartml::ooxml::charts::Chart;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let xml = std::fs::read_to_string("chart1.xml")?;
//! let chart = Chart::from_xml(&xml, ReadOptions::new())?;
//! for series in chart.all_series() {
//!     println!("series {} ({:?})", series.index(), series.series_type());
//! }
//! # Ok(())
//! # }
//! ```

/// Helpers shared across formats
pub mod common;

/// OOXML (Office Open XML) chart and sheet-metadata parts
pub mod ooxml;

// Re-export commonly used types for convenience
pub use ooxml::charts::{Chart, ChartKind};
pub use ooxml::xlsx::{Sheet, SheetKind};
pub use ooxml::{OoxmlError, ReadOptions, Result, WriteOptions};
