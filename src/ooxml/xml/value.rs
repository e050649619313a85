//! Conversion between Rust values and XML attribute text.
//!
//! Integers go through `itoa`, floats through `ryu` with an integral fast
//! path, and float parsing uses `fast_float2`.

use std::borrow::Cow;

/// A value that can be written as XML attribute or element text.
pub trait ToXml {
    fn to_xml(&self) -> Cow<'_, str>;
}

/// A value that can be parsed from XML attribute or element text.
pub trait FromXml: Sized {
    fn from_xml(value: &str) -> Option<Self>;
}

/// Format a float the way spreadsheet applications do: integral values
/// without a fractional part, everything else with the shortest
/// round-tripping representation.
///
/// ```
/// use chartml::ooxml::xml::format_f64;
/// assert_eq!(format_f64(10.0), "10");
/// assert_eq!(format_f64(-2.5), "-2.5");
/// assert_eq!(format_f64(0.1), "0.1");
/// ```
#[inline]
pub fn format_f64(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        let mut buffer = itoa::Buffer::new();
        buffer.format(n as i64).to_owned()
    } else {
        let mut buffer = ryu::Buffer::new();
        buffer.format(n).to_owned()
    }
}

/// Parse an `xsd:boolean`.
#[inline]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

impl ToXml for str {
    #[inline]
    fn to_xml(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl ToXml for String {
    #[inline]
    fn to_xml(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl FromXml for String {
    #[inline]
    fn from_xml(value: &str) -> Option<Self> {
        Some(value.to_owned())
    }
}

impl ToXml for bool {
    #[inline]
    fn to_xml(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "1" } else { "0" })
    }
}

impl FromXml for bool {
    #[inline]
    fn from_xml(value: &str) -> Option<Self> {
        parse_bool(value)
    }
}

impl ToXml for f64 {
    #[inline]
    fn to_xml(&self) -> Cow<'_, str> {
        Cow::Owned(format_f64(*self))
    }
}

impl FromXml for f64 {
    #[inline]
    fn from_xml(value: &str) -> Option<Self> {
        fast_float2::parse(value.trim()).ok()
    }
}

macro_rules! integer_xml {
    ($($ty:ty),+) => {
        $(
            impl ToXml for $ty {
                #[inline]
                fn to_xml(&self) -> Cow<'_, str> {
                    let mut buffer = itoa::Buffer::new();
                    Cow::Owned(buffer.format(*self).to_owned())
                }
            }

            impl FromXml for $ty {
                #[inline]
                fn from_xml(value: &str) -> Option<Self> {
                    value.trim().parse().ok()
                }
            }
        )+
    };
}

integer_xml!(u8, u16, u32, u64, usize, i32, i64);

/// Declare a closed enumeration of XML tokens.
///
/// Generates the enum with `xml_value()`/`parse()` plus [`ToXml`] and
/// [`FromXml`] implementations, so every variant has exactly one spelling.
macro_rules! xml_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Returns the XML value for this variant.
            #[inline]
            pub const fn xml_value(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            /// Parse the XML value; `None` for unknown tokens.
            #[inline]
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl $crate::ooxml::xml::ToXml for $name {
            #[inline]
            fn to_xml(&self) -> ::std::borrow::Cow<'_, str> {
                ::std::borrow::Cow::Borrowed(self.xml_value())
            }
        }

        impl $crate::ooxml::xml::FromXml for $name {
            #[inline]
            fn from_xml(value: &str) -> Option<Self> {
                Self::parse(value)
            }
        }
    };
}

pub(crate) use xml_enum;
