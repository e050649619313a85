//! XML text helpers shared by the readers and writers.

mod escape;

pub use escape::{escape_xml, resolve_entity, unescape_xml};
