//! Interpretation of pasted text and rendering of copied blocks.

use serde::{Deserialize, Serialize};

use crate::address::GridRegion;
use crate::cell::{CellValue, ColumnDataType};
use crate::csv;
use crate::format::{self, FormatConfig};

/// Field separator detected in pasted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardDelimiter {
    Tab,
    Comma,
}

impl ClipboardDelimiter {
    /// Any tab anywhere makes the whole paste tab-delimited
    pub fn detect(text: &str) -> Self {
        if text.contains('\t') {
            ClipboardDelimiter::Tab
        } else {
            ClipboardDelimiter::Comma
        }
    }
}

/// Split pasted text into raw rows of fields
pub fn split_rows(text: &str) -> Vec<Vec<String>> {
    let delimiter = ClipboardDelimiter::detect(text);
    tracing::trace!(?delimiter, len = text.len(), "splitting clipboard text");

    match delimiter {
        ClipboardDelimiter::Tab => split_tab_rows(text),
        ClipboardDelimiter::Comma => csv::parse(text),
    }
}

/// Split tab-delimited text: one row per line, one field per tab.
///
/// Empty lines and empty fields are kept, except that trailing empty lines are
/// trimmed down to at most one. Single-line input always keeps its row.
pub fn split_tab_rows(text: &str) -> Vec<Vec<String>> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut end = lines.len();
    while end > 1 && lines[end - 1].is_empty() && lines[end - 2].is_empty() {
        end -= 1;
    }

    lines[..end]
        .iter()
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect()
}

/// Coerce one raw field for the region it is pasted into.
///
/// Body cells go through general value inference; label bands hold plain text.
pub fn coerce_field(raw: &str, region: GridRegion) -> CellValue {
    match region {
        GridRegion::Body => CellValue::infer(raw),
        GridRegion::TopLabels
        | GridRegion::BottomLabels
        | GridRegion::LeftLabels
        | GridRegion::RightLabels => CellValue::text(raw),
    }
}

/// Split pasted text and coerce every field for `region`
pub fn interpret(text: &str, region: GridRegion) -> Vec<Vec<CellValue>> {
    split_rows(text)
        .into_iter()
        .map(|row| row.iter().map(|field| coerce_field(field, region)).collect())
        .collect()
}

/// Render a block of values as tab-delimited clipboard text.
///
/// Each value uses the display formatter of its column; columns without a
/// recorded type use the number formatter.
pub fn copy_text(rows: &[Vec<CellValue>], column_types: &[ColumnDataType], config: &FormatConfig) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(col, value)| {
                    let column_type = column_types.get(col).copied().unwrap_or(ColumnDataType::Number);
                    format::display_value(value, column_type, config)
                })
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
