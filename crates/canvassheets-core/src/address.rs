use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AddressError, Result};

/// One of the five structural zones of a table
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridRegion {
    Body,
    TopLabels,
    BottomLabels,
    LeftLabels,
    RightLabels,
}

impl GridRegion {
    pub const ALL: [GridRegion; 5] = [
        GridRegion::Body,
        GridRegion::TopLabels,
        GridRegion::BottomLabels,
        GridRegion::LeftLabels,
        GridRegion::RightLabels,
    ];

    /// Token used in address text (e.g. `top_labels`)
    pub const fn token(self) -> &'static str {
        match self {
            GridRegion::Body => "body",
            GridRegion::TopLabels => "top_labels",
            GridRegion::BottomLabels => "bottom_labels",
            GridRegion::LeftLabels => "left_labels",
            GridRegion::RightLabels => "right_labels",
        }
    }

    /// Exact, case-sensitive token lookup
    pub fn from_token(token: &str) -> Option<Self> {
        GridRegion::ALL.into_iter().find(|region| region.token() == token)
    }

    /// True for the four bands surrounding the body
    pub fn is_label_band(self) -> bool {
        !matches!(self, GridRegion::Body)
    }
}

impl fmt::Display for GridRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for GridRegion {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self> {
        GridRegion::from_token(s).ok_or_else(|| AddressError::InvalidRegion(s.to_string()))
    }
}

/// Cell coordinate within a region (0-indexed)
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    pub const fn new(row: u32, col: u32) -> Self {
        CellAddress { row, col }
    }

    /// Parse `A1`-style text (e.g. "B2" -> (1, 1))
    pub fn from_label(label: &str) -> Result<Self> {
        parse_cell(label)
    }

    /// Format as `A1`-style text
    pub fn label(&self) -> String {
        cell_label(self.row, self.col)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Convert a column index (0-indexed) to its label (A, B, ..., Z, AA, AB, ...)
pub fn column_label(index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = index as u64 + 1;

    while n > 0 {
        let remainder = (n - 1) % 26;
        letters.push(char::from(b'A' + remainder as u8));
        n = (n - 1) / 26;
    }

    letters.iter().rev().collect()
}

/// Convert a column label to its index (0-indexed)
///
/// Lowercase letters are folded to uppercase; any other character, an empty
/// label, or a label too long to fit a `u32` index is rejected.
pub fn column_index(label: &str) -> Result<u32> {
    let upper = label.trim().to_uppercase();
    let invalid = || AddressError::InvalidCellReference(label.to_string());

    if upper.is_empty() {
        return Err(invalid());
    }

    let mut value: u64 = 0;
    for c in upper.chars() {
        if !c.is_ascii_uppercase() {
            return Err(invalid());
        }
        value = value * 26 + (c as u64 - 'A' as u64 + 1);
        if value > u32::MAX as u64 + 1 {
            return Err(invalid());
        }
    }

    Ok((value - 1) as u32)
}

/// Parse a cell reference such as `A1` or `aa10` into a zero-based address
pub fn parse_cell(text: &str) -> Result<CellAddress> {
    let trimmed = text.trim();
    let invalid = || AddressError::InvalidCellReference(text.to_string());

    let split = trimmed
        .char_indices()
        .find(|(_, c)| !c.is_alphabetic())
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    let (letters, digits) = trimmed.split_at(split);

    if letters.is_empty() || digits.is_empty() {
        return Err(invalid());
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let row_number: u64 = digits.parse().map_err(|_| invalid())?;
    if row_number == 0 || row_number > u32::MAX as u64 {
        return Err(invalid());
    }

    let col = column_index(letters).map_err(|_| invalid())?;

    Ok(CellAddress::new((row_number - 1) as u32, col))
}

/// Format a zero-based coordinate as `A1`-style text
pub fn cell_label(row: u32, col: u32) -> String {
    format!("{}{}", column_label(col), row as u64 + 1)
}

/// Format a single-cell address such as `body[B3]`
pub fn address(region: GridRegion, row: u32, col: u32) -> String {
    format!("{}[{}]", region, cell_label(row, col))
}

/// A region-qualified span of cells.
///
/// `start` and `end` are kept in the order they were written; a range whose
/// start lies after its end is valid. Use [`RangeAddress::top_left`] and
/// [`RangeAddress::bottom_right`] for normalized bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeAddress {
    pub region: GridRegion,
    pub start: CellAddress,
    pub end: CellAddress,
}

impl RangeAddress {
    pub fn new(region: GridRegion, start: CellAddress, end: CellAddress) -> Self {
        RangeAddress { region, start, end }
    }

    pub fn single(region: GridRegion, cell: CellAddress) -> Self {
        RangeAddress::new(region, cell, cell)
    }

    /// Parse `region[A1]` or `region[A1:B2]`
    pub fn parse(text: &str) -> Result<Self> {
        parse_range(text)
    }

    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    pub fn top_left(&self) -> CellAddress {
        CellAddress::new(self.start.row.min(self.end.row), self.start.col.min(self.end.col))
    }

    pub fn bottom_right(&self) -> CellAddress {
        CellAddress::new(self.start.row.max(self.end.row), self.start.col.max(self.end.col))
    }

    /// Number of rows covered (always at least 1)
    pub fn row_count(&self) -> u64 {
        (self.bottom_right().row - self.top_left().row) as u64 + 1
    }

    /// Number of columns covered (always at least 1)
    pub fn col_count(&self) -> u64 {
        (self.bottom_right().col - self.top_left().col) as u64 + 1
    }

    pub fn cell_count(&self) -> u64 {
        self.row_count() * self.col_count()
    }

    /// Check if a coordinate of this range's region is inside the range
    pub fn contains(&self, cell: CellAddress) -> bool {
        let (min, max) = (self.top_left(), self.bottom_right());
        cell.row >= min.row && cell.row <= max.row && cell.col >= min.col && cell.col <= max.col
    }

    /// Iterate over all cells of the normalized rectangle, row by row
    pub fn iter(&self) -> RangeAddressIter {
        let top_left = self.top_left();
        RangeAddressIter {
            top_left,
            bottom_right: self.bottom_right(),
            current: Some(top_left),
        }
    }
}

impl fmt::Display for RangeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() {
            write!(f, "{}[{}]", self.region, self.start)
        } else {
            write!(f, "{}[{}:{}]", self.region, self.start, self.end)
        }
    }
}

impl FromStr for RangeAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self> {
        parse_range(s)
    }
}

impl IntoIterator for RangeAddress {
    type Item = CellAddress;
    type IntoIter = RangeAddressIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major iterator over the cells of a range
pub struct RangeAddressIter {
    top_left: CellAddress,
    bottom_right: CellAddress,
    current: Option<CellAddress>,
}

impl Iterator for RangeAddressIter {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.current?;

        self.current = if cell.col < self.bottom_right.col {
            Some(CellAddress::new(cell.row, cell.col + 1))
        } else if cell.row < self.bottom_right.row {
            Some(CellAddress::new(cell.row + 1, self.top_left.col))
        } else {
            None
        };

        Some(cell)
    }
}

/// Parse `region[cell]` or `region[cell:cell]` into a [`RangeAddress`]
pub fn parse_range(text: &str) -> Result<RangeAddress> {
    let trimmed = text.trim();

    let Some(open) = trimmed.find('[') else {
        return Err(AddressError::InvalidFormat(text.to_string()));
    };
    if !trimmed.ends_with(']') {
        return Err(AddressError::InvalidFormat(text.to_string()));
    }

    let token = trimmed[..open].trim();
    let region = GridRegion::from_token(token)
        .ok_or_else(|| AddressError::InvalidRegion(token.to_string()))?;

    let inner = &trimmed[open + 1..trimmed.len() - 1];
    let parts: Vec<&str> = inner.split(':').collect();
    match parts.as_slice() {
        [cell] => Ok(RangeAddress::single(region, parse_cell(cell)?)),
        [start, end] => Ok(RangeAddress::new(region, parse_cell(start)?, parse_cell(end)?)),
        _ => Err(AddressError::InvalidFormat(text.to_string())),
    }
}
