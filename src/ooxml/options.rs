/// Configuration types for reading and writing chart and sheet parts.
///
/// Both option structs follow the same builder pattern: start from
/// `new()` (or `default()`) and chain `with_*` calls.

/// What to do with a literal data point whose `idx` falls outside the
/// declared `ptCount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointIndexPolicy {
    /// Fail the read with [`OoxmlError::InvalidFormat`](crate::ooxml::error::OoxmlError::InvalidFormat).
    #[default]
    Reject,
    /// Drop the point and log a warning.
    Skip,
}

/// Options applied while parsing XML.
///
/// # Examples
///
/// ```rust
/// use chartml::ooxml::options::{PointIndexPolicy, ReadOptions};
///
/// let options = ReadOptions::new().with_point_index_policy(PointIndexPolicy::Skip);
/// assert_eq!(options.point_index_policy, PointIndexPolicy::Skip);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Handling of out-of-range literal point indices
    pub point_index_policy: PointIndexPolicy,
}

impl ReadOptions {
    /// Create a new `ReadOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy for out-of-range literal point indices.
    #[inline]
    pub fn with_point_index_policy(mut self, policy: PointIndexPolicy) -> Self {
        self.point_index_policy = policy;
        self
    }
}

/// Options applied while serializing XML.
///
/// # Examples
///
/// ```rust
/// use chartml::ooxml::options::WriteOptions;
///
/// // Fragment output, e.g. for embedding into a larger document
/// let options = WriteOptions::new().with_xml_declaration(false);
/// assert!(!options.xml_declaration);
/// ```
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Emit `<?xml ...?>` before the root element
    pub xml_declaration: bool,
    /// Mark the declaration `standalone="yes"`
    pub standalone: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            standalone: true,
        }
    }
}

impl WriteOptions {
    /// Create a new `WriteOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to emit the XML declaration.
    #[inline]
    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.xml_declaration = declaration;
        self
    }

    /// Set whether the declaration carries `standalone="yes"`.
    #[inline]
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }
}
