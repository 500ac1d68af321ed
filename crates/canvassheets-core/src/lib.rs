pub mod address;
pub mod cell;
pub mod clipboard;
pub mod csv;
pub mod error;
pub mod export;
pub mod format;
pub mod import;
pub mod parse;
pub mod table;
pub mod viewport;

pub use address::{
    address, cell_label, column_index, column_label, parse_cell, parse_range, CellAddress,
    GridRegion, RangeAddress,
};
pub use cell::{CellValue, ColumnDataType, CurrencyAmount};
pub use clipboard::{copy_text, interpret, split_rows, ClipboardDelimiter};
pub use error::{AddressError, Result};
pub use export::export_cells;
pub use format::{display_value, FormatConfig};
pub use import::{import_rows, import_table, infer_column_type, TableImport};
pub use table::{GridSpec, LabelBands, Rect, Table, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};
pub use viewport::{visible_window, CellSize, VisibleRect, VisibleWindow};
