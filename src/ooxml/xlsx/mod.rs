//! SpreadsheetML sheet metadata.
//!
//! Sheet views, page layout and protection records of worksheet and
//! chartsheet parts, and the [`Sheet`] that owns them together with the
//! sheet's charts.
//!
//! # Example
//!
//! ```
//! use chartml::ooxml::xlsx::{HeaderFooter, Sheet, SheetKind};
//!
//! let mut sheet = Sheet::new("Summary", SheetKind::Worksheet);
//! sheet.set_tab_selected(true);
//! sheet.freeze_panes(1, 0);
//! sheet.header_footer_mut().odd_footer =
//!     Some(HeaderFooter::sections(None, Some("Page &P of &N"), None));
//! assert_eq!(sheet.frozen_panes(), Some((1, 0)));
//! ```

mod page_setup;
mod protection;
mod sheet;
mod views;

pub use page_setup::{
    HeaderFooter, PageMargins, PageOrder, PageOrientation, PageSetup, PrintComments, PrintErrors,
    PrintOptions,
};
pub use protection::SheetProtection;
pub use sheet::{Sheet, SheetKind};
pub use views::{Pane, PaneState, PaneType, Selection, SheetView, SheetViewType};
