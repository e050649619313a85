//! Office Open XML chart and sheet-metadata parts.
//!
//! The module is organized into layers:
//!
//! 1. **XML collaborators** (`xml`): a pull reader and a streaming writer
//!    over quick-xml, plus attribute value conversion
//! 2. **Shared pieces** (`error`, `options`): the error type and the read and
//!    write configuration
//! 3. **Part models**:
//!    - `charts`: DrawingML chart parts (`c:chartSpace`)
//!    - `xlsx`: worksheet and chartsheet views, page layout and protection
//!
//! # Example
//!
//! ```rust
//! use chartml::ooxml::charts::{Chart, ChartKind};
//! use chartml::ooxml::{ReadOptions, WriteOptions};
//!
//! let mut chart = Chart::new(ChartKind::Line);
//! chart.add_series();
//! let xml = chart.to_xml(WriteOptions::new())?;
//! let back = Chart::from_xml(&xml, ReadOptions::new())?;
//! assert_eq!(back.kind(), ChartKind::Line);
//! assert_eq!(back.series_count(), 1);
//! # Ok::<(), chartml::ooxml::OoxmlError>(())
//! ```
pub mod charts;
pub mod error;
pub mod options;
pub mod xlsx;
pub mod xml;

// Re-export error types
pub use error::{OoxmlError, Result};

// Re-export configuration
pub use options::{PointIndexPolicy, ReadOptions, WriteOptions};
