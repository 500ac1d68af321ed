//! Command bodies. Each takes already-read input and returns the text to print.

use canvassheets_core::{
    clipboard, column_index, column_label, csv, import_rows, parse_range, visible_window, CellSize,
    FormatConfig, GridRegion, Table, VisibleRect,
};

use crate::error::{CliError, Result};

/// Parse a range and print it as JSON
pub fn address(text: &str) -> Result<String> {
    let range = parse_range(text)?;
    tracing::debug!(%range, cells = range.cell_count(), "parsed address");
    Ok(serde_json::to_string_pretty(&range)?)
}

pub fn label(index: u32) -> String {
    column_label(index)
}

pub fn column(label: &str) -> Result<String> {
    Ok(column_index(label)?.to_string())
}

/// Typed import as JSON, `null` when the text holds no data
pub fn import(text: &str, delimiter: char, config: &FormatConfig) -> Result<String> {
    let import = import_rows(csv::parse_delimited(text, delimiter), config);
    match &import {
        Some(import) => tracing::info!(rows = import.row_count(), cols = import.col_count(), "imported table"),
        None => tracing::info!("input holds no data"),
    }
    Ok(serde_json::to_string_pretty(&import)?)
}

/// Read a table document and export its body
pub fn export(table_json: &str, config: &FormatConfig) -> Result<String> {
    let table = Table::from_json(table_json)?;
    tracing::info!(id = %table.id, cells = table.populated_count(), "exporting table");
    Ok(table.export_text(config))
}

/// Interpret clipboard text for a region and print the typed rows
pub fn paste(text: &str, region: &str) -> Result<String> {
    let region: GridRegion = region.parse()?;
    let rows = clipboard::interpret(text, region);
    Ok(serde_json::to_string_pretty(&rows)?)
}

pub fn viewport(rect: &str, cell: &str, rows: usize, cols: usize) -> Result<String> {
    let [min_x, min_y, max_x, max_y] = parse_numbers::<4>(rect, "rect")?;
    let [width, height] = parse_numbers::<2>(cell, "cell")?;

    let window = visible_window(
        VisibleRect::new(min_x, min_y, max_x, max_y),
        CellSize::new(width, height),
        rows,
        cols,
    );
    Ok(serde_json::to_string_pretty(&window)?)
}

/// Parse exactly `N` comma-separated numbers
fn parse_numbers<const N: usize>(text: &str, what: &str) -> Result<[f64; N]> {
    let bad = || CliError::BadArgument(format!("{what} expects {N} comma-separated numbers, got {text:?}"));

    let values = text
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| bad())?;
    values.try_into().map_err(|_| bad())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn parsed(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_address() {
        let out = parsed(&address("top_labels[B1:A3]").unwrap());
        assert_eq!(
            out,
            json!({
                "region": "top_labels",
                "start": {"row": 0, "col": 1},
                "end": {"row": 2, "col": 0}
            })
        );
        assert!(matches!(address("body[A0]"), Err(CliError::Address(_))));
    }

    #[test]
    fn test_label_and_column() {
        assert_eq!(label(27), "AB");
        assert_eq!(column("ab").unwrap(), "27");
        assert!(column("A1").is_err());
    }

    #[test]
    fn test_import() {
        let config = FormatConfig::default();
        let out = parsed(&import("n,when\n1,2024-01-02\n", ',', &config).unwrap());
        assert_eq!(out["columnTypes"], json!(["string", "string"]));
        assert_eq!(out["rows"][1][0], json!({"type": "string", "value": "1"}));

        assert_eq!(import("", ',', &config).unwrap(), "null");
    }

    #[test]
    fn test_import_tab_delimited() {
        let out = parsed(&import("3\t2024-01-02\n4\t2024-01-03\n", '\t', &FormatConfig::default()).unwrap());
        assert_eq!(out["columnTypes"], json!(["number", "date"]));
        assert_eq!(out["rows"][1][1], json!({"type": "date", "value": "2024-01-03"}));
    }

    #[test]
    fn test_export() {
        let doc = json!({
            "id": "t1",
            "name": "Totals",
            "rect": {"x": 0.0, "y": 0.0, "width": 200.0, "height": 100.0},
            "gridSpec": {"bodyRows": 3, "bodyCols": 2},
            "cellValues": {
                "body[B2]": {"type": "number", "value": 5.0},
                "top_labels[A1]": {"type": "string", "value": "ignored"}
            },
            "bodyColumnTypes": ["string", "currency"]
        });
        let out = export(&doc.to_string(), &FormatConfig::default()).unwrap();
        assert_eq!(out, ",\n,$5.00");

        assert!(matches!(export("{", &FormatConfig::default()), Err(CliError::Serialization(_))));
    }

    #[test]
    fn test_paste() {
        let out = parsed(&paste("1\tx\n", "body").unwrap());
        assert_eq!(
            out,
            json!([
                [{"type": "number", "value": 1.0}, {"type": "string", "value": "x"}],
                [{"type": "empty"}]
            ])
        );
        assert!(matches!(paste("a", "Body"), Err(CliError::Address(_))));
    }

    #[test]
    fn test_viewport() {
        let out = parsed(&viewport("0,0,100,40", "50,20", 100, 10).unwrap());
        assert_eq!(out, json!({"rowStart": 0, "rowEnd": 2, "colStart": 0, "colEnd": 2}));

        assert!(matches!(viewport("0,0,100", "50,20", 1, 1), Err(CliError::BadArgument(_))));
        assert!(matches!(viewport("0,0,1,x", "50,20", 1, 1), Err(CliError::BadArgument(_))));
    }
}
