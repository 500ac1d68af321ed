use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::address::{CellAddress, GridRegion, RangeAddress};
use crate::cell::{CellValue, ColumnDataType};
use crate::clipboard;
use crate::error::Result;
use crate::export;
use crate::format::FormatConfig;
use crate::import::TableImport;

/// Canvas width of one grid column
pub const DEFAULT_CELL_WIDTH: f64 = 100.0;
/// Canvas height of one grid row
pub const DEFAULT_CELL_HEIGHT: f64 = 24.0;

/// Position and size of a table on the sheet canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Number of label rows/columns on each side of the body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelBands {
    pub top_rows: u32,
    pub bottom_rows: u32,
    pub left_cols: u32,
    pub right_cols: u32,
}

impl LabelBands {
    pub fn new(top_rows: u32, left_cols: u32, bottom_rows: u32, right_cols: u32) -> Self {
        LabelBands {
            top_rows,
            bottom_rows,
            left_cols,
            right_cols,
        }
    }
}

/// Body dimensions plus the label bands around it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    pub body_rows: u32,
    pub body_cols: u32,
    #[serde(default)]
    pub label_bands: LabelBands,
}

impl GridSpec {
    pub fn new(body_rows: u32, body_cols: u32) -> Self {
        GridSpec {
            body_rows,
            body_cols,
            label_bands: LabelBands::default(),
        }
    }

    pub fn with_label_bands(mut self, label_bands: LabelBands) -> Self {
        self.label_bands = label_bands;
        self
    }

    /// (rows, cols) of a region: top/bottom bands span the body's columns,
    /// left/right bands span its rows
    pub fn region_size(&self, region: GridRegion) -> (u32, u32) {
        let bands = &self.label_bands;
        match region {
            GridRegion::Body => (self.body_rows, self.body_cols),
            GridRegion::TopLabels => (bands.top_rows, self.body_cols),
            GridRegion::BottomLabels => (bands.bottom_rows, self.body_cols),
            GridRegion::LeftLabels => (self.body_rows, bands.left_cols),
            GridRegion::RightLabels => (self.body_rows, bands.right_cols),
        }
    }

    /// Rows across the top band, body and bottom band
    pub fn total_rows(&self) -> u64 {
        let bands = &self.label_bands;
        bands.top_rows as u64 + self.body_rows as u64 + bands.bottom_rows as u64
    }

    /// Columns across the left band, body and right band
    pub fn total_cols(&self) -> u64 {
        let bands = &self.label_bands;
        bands.left_cols as u64 + self.body_cols as u64 + bands.right_cols as u64
    }

    /// Grow the dimensions shared with `region` so that `cell` lies inside it
    fn grow_to_fit(&mut self, region: GridRegion, cell: CellAddress) {
        let rows = cell.row.saturating_add(1);
        let cols = cell.col.saturating_add(1);
        let bands = &mut self.label_bands;
        match region {
            GridRegion::Body => {
                self.body_rows = self.body_rows.max(rows);
                self.body_cols = self.body_cols.max(cols);
            }
            GridRegion::TopLabels => {
                bands.top_rows = bands.top_rows.max(rows);
                self.body_cols = self.body_cols.max(cols);
            }
            GridRegion::BottomLabels => {
                bands.bottom_rows = bands.bottom_rows.max(rows);
                self.body_cols = self.body_cols.max(cols);
            }
            GridRegion::LeftLabels => {
                self.body_rows = self.body_rows.max(rows);
                bands.left_cols = bands.left_cols.max(cols);
            }
            GridRegion::RightLabels => {
                self.body_rows = self.body_rows.max(rows);
                bands.right_cols = bands.right_cols.max(cols);
            }
        }
    }
}

/// A table on the canvas: a body, four label bands and their typed cells.
///
/// Writing a cell outside its region grows the grid, and every change to the
/// grid refits `rect` to the default cell size while keeping its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub name: String,
    pub rect: Rect,
    pub grid_spec: GridSpec,
    /// Only populated cells are stored, keyed by region then coordinate
    #[serde(default, rename = "cellValues", with = "cell_map_serde")]
    cells: BTreeMap<(GridRegion, CellAddress), CellValue>,
    /// Recorded display type per body column
    #[serde(default, rename = "bodyColumnTypes")]
    pub column_types: Vec<ColumnDataType>,
}

/// Serialize cells as a map keyed by address text (`"body[A1]"`)
mod cell_map_serde {
    use super::*;
    use serde::ser::SerializeMap;
    use serde::{de, Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(
        cells: &BTreeMap<(GridRegion, CellAddress), CellValue>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(cells.len()))?;
        for ((region, cell), value) in cells {
            map.serialize_entry(&crate::address::address(*region, cell.row, cell.col), value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> std::result::Result<BTreeMap<(GridRegion, CellAddress), CellValue>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CellMapVisitor;

        impl<'de> de::Visitor<'de> for CellMapVisitor {
            type Value = BTreeMap<(GridRegion, CellAddress), CellValue>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map with address keys like \"body[A1]\"")
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                let mut cells = BTreeMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    let value: CellValue = map.next_value()?;
                    let range = RangeAddress::parse(&key).map_err(de::Error::custom)?;
                    if !range.is_single_cell() {
                        return Err(de::Error::custom(format!("expected a single cell, got {key:?}")));
                    }
                    if !value.is_empty() {
                        cells.insert((range.region, range.start), value);
                    }
                }

                Ok(cells)
            }
        }

        deserializer.deserialize_map(CellMapVisitor)
    }
}

impl Table {
    /// Create a table at the canvas origin, sized from its grid
    pub fn new(id: impl Into<String>, name: impl Into<String>, grid_spec: GridSpec) -> Self {
        let mut table = Table {
            id: id.into(),
            name: name.into(),
            rect: Rect::default(),
            grid_spec,
            cells: BTreeMap::new(),
            column_types: Vec::new(),
        };
        table.fit_rect();
        table
    }

    /// Move the table on the canvas; its size is unchanged
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.rect.x = x;
        self.rect.y = y;
    }

    fn fit_rect(&mut self) {
        self.rect.width = self.grid_spec.total_cols() as f64 * DEFAULT_CELL_WIDTH;
        self.rect.height = self.grid_spec.total_rows() as f64 * DEFAULT_CELL_HEIGHT;
    }

    /// Get a populated cell
    pub fn cell(&self, region: GridRegion, cell: CellAddress) -> Option<&CellValue> {
        self.cells.get(&(region, cell))
    }

    /// Store a value, growing the grid to contain it; an empty value clears
    /// the cell
    pub fn set_cell(&mut self, region: GridRegion, cell: CellAddress, value: CellValue) {
        if value.is_empty() {
            self.cells.remove(&(region, cell));
        } else {
            self.cells.insert((region, cell), value);
            self.grid_spec.grow_to_fit(region, cell);
            self.fit_rect();
        }
    }

    /// Populated cells of one region in row-major order
    pub fn region_cells(&self, region: GridRegion) -> impl Iterator<Item = (CellAddress, &CellValue)> {
        self.cells
            .range((region, CellAddress::new(0, 0))..=(region, CellAddress::new(u32::MAX, u32::MAX)))
            .map(|((_, cell), value)| (*cell, value))
    }

    pub fn populated_count(&self) -> usize {
        self.cells.len()
    }

    /// Assign values by address text; a range address fills every cell in it
    pub fn set_cells<'k, I>(&mut self, mapping: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'k str, CellValue)>,
    {
        for (key, value) in mapping {
            let range = RangeAddress::parse(key)?;
            for cell in range.iter() {
                self.set_cell(range.region, cell, value.clone());
            }
        }
        Ok(())
    }

    /// Write a block of values whose top-left lands on the range's start cell.
    ///
    /// Returns the range actually written.
    pub fn set_range(&mut self, range: &str, values: Vec<Vec<CellValue>>) -> Result<RangeAddress> {
        let range = RangeAddress::parse(range)?;
        Ok(self.write_block(range.region, range.start, values))
    }

    fn write_block(
        &mut self,
        region: GridRegion,
        origin: CellAddress,
        values: Vec<Vec<CellValue>>,
    ) -> RangeAddress {
        let mut end = origin;
        for (r, row) in values.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                let cell = CellAddress::new(
                    origin.row.saturating_add(r as u32),
                    origin.col.saturating_add(c as u32),
                );
                end = CellAddress::new(end.row.max(cell.row), end.col.max(cell.col));
                self.set_cell(region, cell, value);
            }
        }
        RangeAddress::new(region, origin, end)
    }

    /// Interpret pasted text for `region` and write it at `origin`.
    ///
    /// Trailing rows with no value (the line break most copies end with) are
    /// not written, so they never clear the cells below the block. A paste
    /// with no values at all writes nothing and reports the origin cell.
    pub fn paste(&mut self, region: GridRegion, origin: CellAddress, text: &str) -> RangeAddress {
        let mut values = clipboard::interpret(text, region);
        while values
            .last()
            .is_some_and(|row| row.iter().all(CellValue::is_empty))
        {
            values.pop();
        }
        self.write_block(region, origin, values)
    }

    /// Render the cells of a range as tab-delimited clipboard text
    pub fn copy(&self, range: &RangeAddress, config: &FormatConfig) -> String {
        let top_left = range.top_left();
        let bottom_right = range.bottom_right();

        let rows: Vec<Vec<CellValue>> = (top_left.row..=bottom_right.row)
            .map(|row| {
                (top_left.col..=bottom_right.col)
                    .map(|col| {
                        self.cell(range.region, CellAddress::new(row, col))
                            .cloned()
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        // Label bands hold plain text
        let column_types: Vec<ColumnDataType> = if range.region == GridRegion::Body {
            (top_left.col..=bottom_right.col)
                .map(|col| self.column_type(col))
                .collect()
        } else {
            vec![ColumnDataType::String; range.col_count() as usize]
        };

        clipboard::copy_text(&rows, &column_types, config)
    }

    /// Recorded type of a body column; unrecorded columns are numeric
    pub fn column_type(&self, col: u32) -> ColumnDataType {
        self.column_types
            .get(col as usize)
            .copied()
            .unwrap_or(ColumnDataType::Number)
    }

    /// Record the type of a body column, widening the body if needed
    pub fn set_column_type(&mut self, col: u32, column_type: ColumnDataType) {
        let index = col as usize;
        if self.column_types.len() <= index {
            self.column_types.resize(index + 1, ColumnDataType::Number);
        }
        self.column_types[index] = column_type;

        self.grid_spec.body_cols = self.grid_spec.body_cols.max(col.saturating_add(1));
        self.fit_rect();
    }

    /// Write an import into the body at `origin`, recording its column types
    /// and growing the body to cover the whole imported block
    pub fn apply_import(&mut self, import: TableImport, origin: CellAddress) -> RangeAddress {
        for (offset, column_type) in import.column_types.iter().enumerate() {
            self.set_column_type(origin.col.saturating_add(offset as u32), *column_type);
        }

        let written = self.write_block(GridRegion::Body, origin, import.rows);
        self.grid_spec.grow_to_fit(GridRegion::Body, written.bottom_right());
        self.fit_rect();
        written
    }

    /// Export the populated body rectangle as comma-delimited text
    pub fn export_text(&self, config: &FormatConfig) -> String {
        export::export_cells(self.region_cells(GridRegion::Body), &self.column_types, config)
    }

    pub fn region_size(&self, region: GridRegion) -> (u32, u32) {
        self.grid_spec.region_size(region)
    }

    pub fn resize(&mut self, rows: Option<u32>, cols: Option<u32>) {
        if let Some(rows) = rows {
            self.grid_spec.body_rows = rows;
        }
        if let Some(cols) = cols {
            self.grid_spec.body_cols = cols;
        }
        self.fit_rect();
    }

    pub fn set_labels(
        &mut self,
        top: Option<u32>,
        left: Option<u32>,
        bottom: Option<u32>,
        right: Option<u32>,
    ) {
        let bands = &mut self.grid_spec.label_bands;
        if let Some(top) = top {
            bands.top_rows = top;
        }
        if let Some(left) = left {
            bands.left_cols = left;
        }
        if let Some(bottom) = bottom {
            bands.bottom_rows = bottom;
        }
        if let Some(right) = right {
            bands.right_cols = right;
        }
        self.fit_rect();
    }

    /// Shrink the body to the populated cells (at least one row and column).
    ///
    /// Label band cells count along the axis they share with the body; the
    /// bands themselves keep their size.
    pub fn minimize(&mut self) {
        let (mut rows, mut cols) = (1u32, 1u32);
        for (region, cell) in self.cells.keys() {
            let (r, c) = (cell.row.saturating_add(1), cell.col.saturating_add(1));
            match region {
                GridRegion::Body => {
                    rows = rows.max(r);
                    cols = cols.max(c);
                }
                GridRegion::TopLabels | GridRegion::BottomLabels => cols = cols.max(c),
                GridRegion::LeftLabels | GridRegion::RightLabels => rows = rows.max(r),
            }
        }

        self.grid_spec.body_rows = rows;
        self.grid_spec.body_cols = cols;
        self.column_types.truncate(cols as usize);
        self.fit_rect();
    }

    /// Insert body rows before `at`, shifting body and side-band cells down
    pub fn insert_rows(&mut self, at: u32, count: u32) {
        self.grid_spec.body_rows = self.grid_spec.body_rows.saturating_add(count);
        self.shift_cells(|region, cell| {
            let shifts = matches!(
                region,
                GridRegion::Body | GridRegion::LeftLabels | GridRegion::RightLabels
            );
            if shifts && cell.row >= at {
                cell.row.checked_add(count).map(|row| CellAddress::new(row, cell.col))
            } else {
                Some(cell)
            }
        });
        self.fit_rect();
    }

    /// Insert body columns before `at`, shifting body and top/bottom band cells
    /// right; inserted columns are numeric
    pub fn insert_cols(&mut self, at: u32, count: u32) {
        self.grid_spec.body_cols = self.grid_spec.body_cols.saturating_add(count);
        let index = at as usize;
        if index < self.column_types.len() {
            self.column_types
                .splice(index..index, std::iter::repeat(ColumnDataType::Number).take(count as usize));
        }
        self.shift_cells(|region, cell| {
            let shifts = matches!(
                region,
                GridRegion::Body | GridRegion::TopLabels | GridRegion::BottomLabels
            );
            if shifts && cell.col >= at {
                cell.col.checked_add(count).map(|col| CellAddress::new(cell.row, col))
            } else {
                Some(cell)
            }
        });
        self.fit_rect();
    }

    /// Move cells with `remap`; cells it cannot place are dropped
    fn shift_cells(&mut self, remap: impl Fn(GridRegion, CellAddress) -> Option<CellAddress>) {
        let cells = std::mem::take(&mut self.cells);
        let before = cells.len();
        self.cells = cells
            .into_iter()
            .filter_map(|((region, cell), value)| {
                remap(region, cell).map(|moved| ((region, moved), value))
            })
            .collect();

        let dropped = before - self.cells.len();
        if dropped > 0 {
            tracing::warn!(dropped, "cells shifted past the last addressable row or column were dropped");
        }
    }

    /// Serialize the table to JSON
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize the table to pretty JSON
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a table from JSON
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
