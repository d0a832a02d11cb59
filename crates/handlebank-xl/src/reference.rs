//! Cell addresses, cell ranges and normalized range references

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// A cell address in normalized form.
///
/// The parser accepts A1-style notation with optional `$` absolute markers
/// ("B2", "$B$2"); the markers are not part of the normalized form, so
/// addresses that differ only in absoluteness compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., XFD=16383)
    pub col: u16,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from A1-style notation
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let col_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if pos == col_start {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        let col = Self::letters_to_column(&s[col_start..pos])?;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let row_str = &s[pos..];
        if row_str.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }
        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        // Excel rows are 1-based, we use 0-based internally
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }
        let row = row - 1;

        if row >= MAX_ROWS {
            return Err(Error::InvalidAddress(format!(
                "row {} out of bounds in '{}'",
                row + 1,
                s
            )));
        }

        Ok(Self { row, col })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u16) -> String {
        let mut result = String::new();
        let mut n = col as u32 + 1; // 1-based for calculation

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }
        // The last column XFD is three letters; longer runs can never be in
        // bounds and would overflow the accumulator below
        if letters.len() > 3 {
            return Err(Error::InvalidAddress(format!(
                "column '{}' out of bounds",
                letters
            )));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        }
        let col = col - 1; // Convert to 0-based

        if col >= MAX_COLS as u32 {
            return Err(Error::InvalidAddress(format!(
                "column '{}' out of bounds",
                letters
            )));
        }

        Ok(col as u16)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            Self::column_to_letters(self.col),
            self.row + 1
        )
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular block of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top-left corner
    pub start: CellAddress,
    /// Bottom-right corner
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range, normalizing corner order
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        Self {
            start: CellAddress::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellAddress::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse a range from "A1:B10" or single-cell "A1" notation
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let parsed = if let Some(colon_pos) = s.find(':') {
            CellAddress::parse(&s[..colon_pos]).and_then(|start| {
                CellAddress::parse(&s[colon_pos + 1..]).map(|end| Self::new(start, end))
            })
        } else {
            CellAddress::parse(s).map(Self::single)
        };
        parsed.map_err(|_| Error::InvalidRange(s.to_string()))
    }

    /// Check if a cell lies within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Check if another range lies entirely within this range
    pub fn contains_range(&self, other: &CellRange) -> bool {
        self.contains(&other.start) && self.contains(&other.end)
    }

    /// Number of cells in the range
    pub fn cell_count(&self) -> u64 {
        let rows = (self.end.row - self.start.row + 1) as u64;
        let cols = (self.end.col - self.start.col + 1) as u64;
        rows * cols
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A normalized textual range address, optionally qualified by workbook and
/// worksheet ("[BOOK1.XLSX]SHEET1!A1:B2").
///
/// References are upper-cased on parse, so two spellings of the same address
/// normalize to the same key. Used as the key for error correlation and for
/// containment checks against a selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeReference {
    /// Workbook name, without brackets
    pub book: Option<String>,
    /// Worksheet name
    pub sheet: Option<String>,
    /// The cell block
    pub range: CellRange,
}

impl RangeReference {
    /// Parse and normalize a textual range reference.
    ///
    /// Accepted forms: "A1", "A1:B2", "Sheet1!A1", "[Book1.xlsx]Sheet1!A1:B2",
    /// with optional `$` markers anywhere an address appears.
    pub fn parse(s: &str) -> Result<Self> {
        let normalized = s.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(Error::InvalidRangeReference(s.to_string()));
        }

        let mut rest = normalized.as_str();

        let book = if let Some(stripped) = rest.strip_prefix('[') {
            let close = stripped
                .find(']')
                .ok_or_else(|| Error::InvalidRangeReference(s.to_string()))?;
            let book = stripped[..close].to_string();
            if book.is_empty() {
                return Err(Error::InvalidRangeReference(s.to_string()));
            }
            rest = &stripped[close + 1..];
            Some(book)
        } else {
            None
        };

        let sheet = if let Some(bang) = rest.find('!') {
            let sheet = rest[..bang].trim_matches('\'').to_string();
            if sheet.is_empty() {
                return Err(Error::InvalidRangeReference(s.to_string()));
            }
            rest = &rest[bang + 1..];
            Some(sheet)
        } else {
            // A book qualifier without a sheet is not a cell reference
            if book.is_some() {
                return Err(Error::InvalidRangeReference(s.to_string()));
            }
            None
        };

        let range =
            CellRange::parse(rest).map_err(|_| Error::InvalidRangeReference(s.to_string()))?;

        Ok(Self { book, sheet, range })
    }

    /// Create an unqualified reference from a cell range
    pub fn local(range: CellRange) -> Self {
        Self {
            book: None,
            sheet: None,
            range,
        }
    }

    /// The normalized key form of this reference
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Check whether a selection falls entirely within this reference.
    ///
    /// Book and sheet qualifiers must match exactly; an unqualified
    /// reference only contains other unqualified references.
    pub fn contains(&self, other: &RangeReference) -> bool {
        self.book == other.book
            && self.sheet == other.sheet
            && self.range.contains_range(&other.range)
    }
}

impl fmt::Display for RangeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(book) = &self.book {
            write!(f, "[{}]", book)?;
        }
        if let Some(sheet) = &self.sheet {
            write!(f, "{}!", sheet)?;
        }
        write!(f, "{}", self.range)
    }
}

impl FromStr for RangeReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
