//! A1-style cell ranges used to build series from worksheet data.

use std::borrow::Cow;
use std::fmt;

/// A rectangular block of cells, optionally qualified by a sheet name.
/// Rows and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    pub sheet: Option<String>,
    pub first_row: u32,
    pub first_column: u32,
    pub last_row: u32,
    pub last_column: u32,
}

impl CellRange {
    /// Create an unqualified range; corners are normalised.
    pub fn new(first_row: u32, first_column: u32, last_row: u32, last_column: u32) -> Self {
        Self {
            sheet: None,
            first_row: first_row.min(last_row),
            first_column: first_column.min(last_column),
            last_row: first_row.max(last_row),
            last_column: first_column.max(last_column),
        }
    }

    pub fn with_sheet(mut self, sheet: &str) -> Self {
        self.sheet = Some(sheet.to_owned());
        self
    }

    /// Parse `A1:C5`, `$A$1:$C$5`, `Sheet1!A1:C5`, `'My Sheet'!A1` and
    /// similar. Returns `None` for anything that is not a cell block.
    ///
    /// ```
    /// use chartml::ooxml::charts::CellRange;
    /// let range = CellRange::parse("'Q1 data'!$B$2:$D$10").unwrap();
    /// assert_eq!(range.sheet.as_deref(), Some("Q1 data"));
    /// assert_eq!((range.rows(), range.columns()), (9, 3));
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (sheet, cells) = match text.rfind('!') {
            Some(pos) => (Some(unquote_sheet_name(&text[..pos])?), &text[pos + 1..]),
            None => (None, text),
        };
        let (first, last) = match cells.split_once(':') {
            Some((first, last)) => (first, last),
            None => (cells, cells),
        };
        let (first_row, first_column) = parse_cell_ref(first)?;
        let (last_row, last_column) = parse_cell_ref(last)?;
        let mut range = Self::new(first_row, first_column, last_row, last_column);
        range.sheet = sheet;
        Some(range)
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.last_row - self.first_row + 1
    }

    #[inline]
    pub fn columns(&self) -> u32 {
        self.last_column - self.first_column + 1
    }

    /// Absolute reference qualified with `sheet`, e.g. `'Q1 data'!$B$2:$B$10`.
    pub fn to_absolute(&self, sheet: &str) -> String {
        let first = format!("${}${}", column_to_letters(self.first_column), self.first_row);
        let name = quote_sheet_name(sheet);
        if self.first_row == self.last_row && self.first_column == self.last_column {
            format!("{name}!{first}")
        } else {
            let last = format!("${}${}", column_to_letters(self.last_column), self.last_row);
            format!("{name}!{first}:{last}")
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sheet {
            Some(sheet) => f.write_str(&self.to_absolute(sheet)),
            None => write!(
                f,
                "{}{}:{}{}",
                column_to_letters(self.first_column),
                self.first_row,
                column_to_letters(self.last_column),
                self.last_row
            ),
        }
    }
}

/// Layout of the source block when turning a range into series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesRangeOptions {
    /// The first row (or column, for row series) holds series names
    pub first_row_is_header: bool,
    /// The first column (or row, for row series) holds categories
    pub first_column_is_categories: bool,
    /// One series per column; `false` gives one series per row
    pub column_series: bool,
}

impl Default for SeriesRangeOptions {
    fn default() -> Self {
        Self {
            first_row_is_header: false,
            first_column_is_categories: false,
            column_series: true,
        }
    }
}

impl SeriesRangeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.first_row_is_header = header;
        self
    }

    pub fn with_categories(mut self, categories: bool) -> Self {
        self.first_column_is_categories = categories;
        self
    }

    pub fn with_column_series(mut self, column_series: bool) -> Self {
        self.column_series = column_series;
        self
    }
}

/// References for one series carved out of a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SeriesReferences {
    pub name: Option<String>,
    pub categories: Option<String>,
    pub values: String,
}

/// Split `range` into per-series references qualified with `sheet`.
/// Empty when headers and categories leave no data cells.
pub(crate) fn split_series(
    range: &CellRange,
    sheet: &str,
    options: &SeriesRangeOptions,
) -> Vec<SeriesReferences> {
    // work in "series major" coordinates: lines are series, cells are points
    let (line_first, line_last, cell_first, cell_last) = if options.column_series {
        (range.first_column, range.last_column, range.first_row, range.last_row)
    } else {
        (range.first_row, range.last_row, range.first_column, range.last_column)
    };
    let data_first = cell_first + u32::from(options.first_row_is_header);
    let series_first = line_first + u32::from(options.first_column_is_categories);
    if data_first > cell_last || series_first > line_last {
        return Vec::new();
    }

    let block = |line: u32, first: u32, last: u32| -> String {
        let cells = if options.column_series {
            CellRange::new(first, line, last, line)
        } else {
            CellRange::new(line, first, line, last)
        };
        cells.to_absolute(sheet)
    };

    let categories = options
        .first_column_is_categories
        .then(|| block(line_first, data_first, cell_last));
    (series_first..=line_last)
        .map(|line| SeriesReferences {
            name: options
                .first_row_is_header
                .then(|| block(line, cell_first, cell_first)),
            categories: categories.clone(),
            values: block(line, data_first, cell_last),
        })
        .collect()
}

/// Convert a 1-based column number to letters (1 -> "A", 27 -> "AA").
pub fn column_to_letters(column: u32) -> String {
    let mut letters = Vec::new();
    let mut column = column;
    while column > 0 {
        column -= 1;
        letters.push((column % 26) as u8 + b'A');
        column /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Parse `A1` or `$A$1` into 1-based (row, column).
fn parse_cell_ref(cell: &str) -> Option<(u32, u32)> {
    let cell = cell.trim();
    let mut chars = cell.chars().peekable();
    if chars.peek() == Some(&'$') {
        chars.next();
    }
    let mut column: u32 = 0;
    let mut letters = 0;
    while let Some(ch) = chars.peek().copied().filter(char::is_ascii_alphabetic) {
        column = column
            .checked_mul(26)?
            .checked_add(u32::from(ch.to_ascii_uppercase() as u8 - b'A') + 1)?;
        letters += 1;
        chars.next();
    }
    if chars.peek() == Some(&'$') {
        chars.next();
    }
    let digits: String = chars.collect();
    if letters == 0 || letters > 3 || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row = digits.parse::<u32>().ok().filter(|row| *row > 0)?;
    // XFD / 1048576 are the worksheet limits
    (column <= 16_384 && row <= 1_048_576).then_some((row, column))
}

fn unquote_sheet_name(name: &str) -> Option<String> {
    let name = name.trim();
    if let Some(inner) = name.strip_prefix('\'') {
        let inner = inner.strip_suffix('\'')?;
        return Some(inner.replace("''", "'"));
    }
    (!name.is_empty()).then(|| name.to_owned())
}

fn quote_sheet_name(name: &str) -> Cow<'_, str> {
    let plain = !name.is_empty()
        && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if plain {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("'{}'", name.replace('\'', "''")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn parses_plain_and_absolute_ranges() {
        let range = CellRange::parse("$B$2:$D$10").unwrap();
        assert_eq!(range, CellRange::new(2, 2, 10, 4));
        assert_eq!(CellRange::parse("D10:B2").unwrap(), range);
        assert_eq!(CellRange::parse("Sheet1!A1").unwrap().sheet.as_deref(), Some("Sheet1"));
        assert_eq!(
            CellRange::parse("'Bob''s sheet'!A1:A3").unwrap().sheet.as_deref(),
            Some("Bob's sheet")
        );
    }

    #[test]
    fn rejects_malformed_ranges() {
        for text in ["", "A", "1", "A0", "A1:", "A1B", "'open!A1", "XFE1", "A1048577", "!A1"] {
            assert!(CellRange::parse(text).is_none(), "{text}");
        }
    }

    #[test]
    fn absolute_reference_quotes_when_needed() {
        let range = CellRange::new(1, 1, 5, 1);
        assert_eq!(range.to_absolute("Sheet1"), "Sheet1!$A$1:$A$5");
        assert_eq!(range.to_absolute("My Data"), "'My Data'!$A$1:$A$5");
        assert_eq!(range.to_absolute("2024"), "'2024'!$A$1:$A$5");
        assert_eq!(CellRange::new(3, 28, 3, 28).to_absolute("S"), "S!$AB$3");
    }

    #[test]
    fn splits_columns_with_header_and_categories() {
        let range = CellRange::new(1, 1, 4, 3);
        let options = SeriesRangeOptions::new().with_header(true).with_categories(true);
        let series = split_series(&range, "Data", &options);
        assert_eq!(
            series,
            vec![
                SeriesReferences {
                    name: Some("Data!$B$1".into()),
                    categories: Some("Data!$A$2:$A$4".into()),
                    values: "Data!$B$2:$B$4".into(),
                },
                SeriesReferences {
                    name: Some("Data!$C$1".into()),
                    categories: Some("Data!$A$2:$A$4".into()),
                    values: "Data!$C$2:$C$4".into(),
                },
            ]
        );
    }

    #[test]
    fn splits_rows() {
        let range = CellRange::new(2, 1, 3, 4);
        let options = SeriesRangeOptions::new().with_column_series(false).with_header(true);
        let series = split_series(&range, "S", &options);
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].name.as_deref(), Some("S!$A$3"));
        assert_eq!(series[1].values, "S!$B$3:$D$3");
        assert_eq!(series[1].categories, None);
    }

    #[test]
    fn header_only_range_yields_nothing() {
        let range = CellRange::new(1, 1, 1, 3);
        let options = SeriesRangeOptions::new().with_header(true);
        assert!(split_series(&range, "S", &options).is_empty());
    }

    proptest! {
        #[test]
        fn column_letters_round_trip(column in 1u32..=16_384, row in 1u32..=1_048_576) {
            let text = format!("{}{}", column_to_letters(column), row);
            prop_assert_eq!(parse_cell_ref(&text), Some((row, column)));
        }
    }
}
