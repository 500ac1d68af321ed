//! Typed import of delimited text with per-column type inference.

use serde::{Deserialize, Serialize};

use crate::cell::{CellValue, ColumnDataType};
use crate::csv;
use crate::format::FormatConfig;
use crate::parse;

/// Result of importing delimited text: a rectangle of typed cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableImport {
    pub column_types: Vec<ColumnDataType>,
    pub rows: Vec<Vec<CellValue>>,
}

impl TableImport {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.column_types.len()
    }
}

/// Infer one data type from a column's raw cells.
///
/// Only trimmed, non-blank cells are considered; a column with none of them is
/// numeric. The first type every cell satisfies wins, in the order date, time,
/// currency, percentage, number, string. Currency additionally needs at least
/// one cell written with a known symbol, percentage one cell written with `%`.
pub fn infer_column_type<S: AsRef<str>>(cells: &[S], config: &FormatConfig) -> ColumnDataType {
    let values: Vec<&str> = cells
        .iter()
        .map(|cell| cell.as_ref().trim())
        .filter(|cell| !cell.is_empty())
        .collect();

    if values.is_empty() {
        return ColumnDataType::Number;
    }

    if all_accept(&values, |v| parse::parse_date(v, config).is_some()) {
        return ColumnDataType::Date;
    }
    if all_accept(&values, |v| parse::parse_time(v, config).is_some()) {
        return ColumnDataType::Time;
    }
    if values.iter().any(|v| parse::contains_currency_symbol(v, config))
        && all_accept(&values, |v| parse::parse_currency(v, config).is_some())
    {
        return ColumnDataType::Currency;
    }
    if values.iter().any(|v| v.contains('%'))
        && all_accept(&values, |v| parse::parse_percentage(v).is_some())
    {
        return ColumnDataType::Percentage;
    }
    if all_accept(&values, |v| {
        parse::parse_boolean(v).is_some() || parse::parse_number(v).is_some()
    }) {
        return ColumnDataType::Number;
    }

    ColumnDataType::String
}

fn all_accept(values: &[&str], accepts: impl Fn(&str) -> bool) -> bool {
    values.iter().all(|v| accepts(v))
}

/// Pad every row on the right with empty fields up to the widest row
pub fn rectangularize(rows: &mut [Vec<String>]) -> usize {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in rows.iter_mut() {
        row.resize(width, String::new());
    }
    width
}

/// Import comma-delimited text as typed rows.
///
/// Returns `None` when there are no rows or every row is zero columns wide.
pub fn import_table(text: &str, config: &FormatConfig) -> Option<TableImport> {
    import_rows(csv::parse(text), config)
}

/// Import already-split rows as typed rows
pub fn import_rows(mut rows: Vec<Vec<String>>, config: &FormatConfig) -> Option<TableImport> {
    if rows.is_empty() {
        return None;
    }
    let width = rectangularize(&mut rows);
    if width == 0 {
        return None;
    }

    let column_types: Vec<ColumnDataType> = (0..width)
        .map(|col| {
            let column: Vec<&str> = rows.iter().map(|row| row[col].as_str()).collect();
            infer_column_type(&column, config)
        })
        .collect();
    tracing::debug!(rows = rows.len(), cols = width, ?column_types, "inferred column types");

    let typed = rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            row.iter()
                .zip(&column_types)
                .enumerate()
                .map(|(c, (raw, &column_type))| {
                    parse::coerce(raw, column_type, config).unwrap_or_else(|| {
                        tracing::warn!(
                            row = r,
                            col = c,
                            %column_type,
                            raw = %raw,
                            "cell failed coercion, importing as empty"
                        );
                        CellValue::Empty
                    })
                })
                .collect()
        })
        .collect();

    Some(TableImport {
        column_types,
        rows: typed,
    })
}
