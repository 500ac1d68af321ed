//! Delimited-text export of a table body.

use std::collections::HashMap;

use crate::address::CellAddress;
use crate::cell::{CellValue, ColumnDataType};
use crate::csv;
use crate::format::{self, FormatConfig};

static EMPTY: CellValue = CellValue::Empty;

/// Largest populated row and column, each taken independently
pub fn populated_bounds<'a, I>(cells: I) -> Option<CellAddress>
where
    I: IntoIterator<Item = (CellAddress, &'a CellValue)>,
{
    cells
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .fold(None, |bounds: Option<CellAddress>, (cell, _)| {
            Some(match bounds {
                None => cell,
                Some(b) => CellAddress::new(b.row.max(cell.row), b.col.max(cell.col)),
            })
        })
}

/// Export body cells as comma-delimited text.
///
/// The exported rectangle always starts at `A1` and reaches the largest
/// populated row and column, so gaps inside it come out as empty fields.
/// Columns beyond `column_types` use the number formatter. A body with no
/// populated cell exports as empty text.
pub fn export_cells<'a, I>(cells: I, column_types: &[ColumnDataType], config: &FormatConfig) -> String
where
    I: IntoIterator<Item = (CellAddress, &'a CellValue)>,
{
    let populated: HashMap<CellAddress, &CellValue> = cells
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect();

    let Some(bounds) = populated_bounds(populated.iter().map(|(cell, value)| (*cell, *value))) else {
        return String::new();
    };
    tracing::debug!(rows = bounds.row as u64 + 1, cols = bounds.col as u64 + 1, "exporting body");

    let rows: Vec<Vec<String>> = (0..=bounds.row)
        .map(|row| {
            (0..=bounds.col)
                .map(|col| {
                    let value = populated
                        .get(&CellAddress::new(row, col))
                        .copied()
                        .unwrap_or(&EMPTY);
                    let column_type = column_types
                        .get(col as usize)
                        .copied()
                        .unwrap_or(ColumnDataType::Number);
                    format::display_value(value, column_type, config)
                })
                .collect()
        })
        .collect();

    csv::encode(&rows)
}
