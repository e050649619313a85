//! Token-level XML collaborators.
//!
//! [`XmlReader`] and [`XmlWriter`] are the only places that touch the
//! tokenizer or the output sink; chart and sheet models talk to them in
//! terms of element names, attributes and text.

mod reader;
mod value;
mod writer;

pub use reader::{XmlReader, XmlToken};
pub(crate) use value::xml_enum;
pub use value::{FromXml, ToXml, format_f64, parse_bool};
pub use writer::XmlWriter;
