//! Cell address type and column arithmetic

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "ZZ40")
///
/// Columns use letters (A-ZZ), rows are numbered from 1. Only two-letter columns
/// are addressable, so column indices run from 0 (A) to 701 (ZZ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., ZZ=701)
    pub col: u16,
}

impl CellAddress {
    /// Create a new cell address from 0-based indices
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use paramsheet_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B15").unwrap();
    /// assert_eq!(addr.row, 14);
    /// assert_eq!(addr.col, 1);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let letters_end = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());

        if letters_end == 0 {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let col = Self::letters_to_column(&s[..letters_end])?;

        let row_str = &s[letters_end..];
        if row_str.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }
        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        // Rows are 1-based in A1 notation, 0-based internally
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        let row = row - 1;
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
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

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, ..., ZZ = 701)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
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
            if col > MAX_COLS as u32 {
                return Err(Error::ColumnOutOfBounds(col - 1, MAX_COLS - 1));
            }
        }

        Ok((col - 1) as u16)
    }

    /// Shift this address by `delta` columns, keeping the row.
    ///
    /// Returns `None` when the resulting column falls outside A..ZZ.
    ///
    /// ```
    /// use paramsheet_core::CellAddress;
    ///
    /// let z1 = CellAddress::parse("Z1").unwrap();
    /// assert_eq!(z1.offset_columns(1).unwrap().to_string(), "AA1");
    /// assert_eq!(CellAddress::parse("ZZ1").unwrap().offset_columns(1), None);
    /// ```
    pub fn offset_columns(&self, delta: i32) -> Option<CellAddress> {
        let col = i64::from(self.col) + i64::from(delta);
        if col < 0 || col >= i64::from(MAX_COLS) {
            return None;
        }
        Some(Self {
            row: self.row,
            col: col as u16,
        })
    }

    /// The cell one column to the right, if addressable
    pub fn next_column(&self) -> Option<CellAddress> {
        self.offset_columns(1)
    }

    /// Row number as shown in A1 notation (1-based)
    pub fn row_number(&self) -> u32 {
        self.row + 1
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Shift an A1-style coordinate by `delta` columns.
///
/// Parse failures are errors; a shift past the addressable columns is `Ok(None)`.
pub fn shift_column(coordinate: &str, delta: i32) -> Result<Option<String>> {
    let addr = CellAddress::parse(coordinate)?;
    Ok(addr.offset_columns(delta).map(|a| a.to_a1_string()))
}
