use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::address::CellAddress;
use crate::table::Rect;

/// Visible area of a table in the table's own coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleRect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl VisibleRect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl From<Rect> for VisibleRect {
    fn from(rect: Rect) -> Self {
        VisibleRect::new(rect.x, rect.y, rect.x + rect.width, rect.y + rect.height)
    }
}

/// Uniform cell dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl CellSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Half-open row and column index windows to render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleWindow {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl VisibleWindow {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Range<usize> {
        self.row_start..self.row_end
    }

    pub fn cols(&self) -> Range<usize> {
        self.col_start..self.col_end
    }

    pub fn row_count(&self) -> usize {
        self.row_end - self.row_start
    }

    pub fn col_count(&self) -> usize {
        self.col_end - self.col_start
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.col_count() == 0
    }

    pub fn contains(&self, cell: CellAddress) -> bool {
        self.rows().contains(&(cell.row as usize)) && self.cols().contains(&(cell.col as usize))
    }

    /// Cells to materialize, row by row
    pub fn cells(&self) -> impl Iterator<Item = CellAddress> + '_ {
        self.rows().flat_map(move |row| {
            self.cols()
                .map(move |col| CellAddress::new(row as u32, col as u32))
        })
    }
}

fn axis_window(min: f64, max: f64, size: f64, count: usize) -> (usize, usize) {
    let limit = count as f64;
    let start = (min / size).floor().clamp(0.0, limit) as usize;
    let end = (max / size).ceil().clamp(0.0, limit) as usize;
    (start, end.max(start))
}

/// Compute the rows and columns intersecting `rect` for a grid of uniform cells.
///
/// Degenerate geometry (no rows, no columns, or a non-positive cell size)
/// yields empty windows.
pub fn visible_window(rect: VisibleRect, cell: CellSize, rows: usize, cols: usize) -> VisibleWindow {
    let usable = |v: f64| v > 0.0;
    if rows == 0 || cols == 0 || !usable(cell.width) || !usable(cell.height) {
        return VisibleWindow::empty();
    }

    let (row_start, row_end) = axis_window(rect.min_y, rect.max_y, cell.height, rows);
    let (col_start, col_end) = axis_window(rect.min_x, rect.max_x, cell.width, cols);

    VisibleWindow {
        row_start,
        row_end,
        col_start,
        col_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_window() {
        let window = visible_window(
            VisibleRect::new(0.0, 0.0, 100.0, 40.0),
            CellSize::new(50.0, 20.0),
            100,
            10,
        );
        assert_eq!(window.cols(), 0..2);
        assert_eq!(window.rows(), 0..2);
        assert_eq!(window.cells().count(), 4);
    }

    #[test]
    fn test_partial_cells_are_included() {
        let window = visible_window(
            VisibleRect::new(25.0, 10.0, 101.0, 41.0),
            CellSize::new(50.0, 20.0),
            100,
            10,
        );
        assert_eq!(window.cols(), 0..3);
        assert_eq!(window.rows(), 0..3);
        assert!(window.contains(CellAddress::new(2, 2)));
        assert!(!window.contains(CellAddress::new(3, 0)));
    }

    #[test]
    fn test_window_is_clamped_to_grid() {
        let window = visible_window(
            VisibleRect::new(-500.0, -500.0, 10_000.0, 10_000.0),
            CellSize::new(50.0, 20.0),
            5,
            3,
        );
        assert_eq!(window.rows(), 0..5);
        assert_eq!(window.cols(), 0..3);

        let beyond = visible_window(
            VisibleRect::new(1_000.0, 1_000.0, 2_000.0, 2_000.0),
            CellSize::new(50.0, 20.0),
            5,
            3,
        );
        assert!(beyond.is_empty());
        assert_eq!(beyond.rows(), 5..5);
    }

    #[test]
    fn test_degenerate_inputs() {
        let rect = VisibleRect::new(0.0, 0.0, 100.0, 100.0);
        let size = CellSize::new(10.0, 10.0);

        assert_eq!(visible_window(rect, size, 0, 10), VisibleWindow::empty());
        assert_eq!(visible_window(rect, size, 10, 0), VisibleWindow::empty());
        assert_eq!(visible_window(rect, CellSize::new(0.0, 10.0), 10, 10), VisibleWindow::empty());
        assert_eq!(visible_window(rect, CellSize::new(10.0, -1.0), 10, 10), VisibleWindow::empty());
        assert_eq!(
            visible_window(rect, CellSize::new(f64::NAN, 10.0), 10, 10),
            VisibleWindow::empty()
        );
    }

    #[test]
    fn test_inverted_rect_is_empty() {
        let window = visible_window(
            VisibleRect::new(100.0, 100.0, 0.0, 0.0),
            CellSize::new(10.0, 10.0),
            50,
            50,
        );
        assert!(window.is_empty());
    }

    #[test]
    fn test_monotonic_growth() {
        let size = CellSize::new(30.0, 17.0);
        let mut previous = VisibleWindow::empty();
        for step in 0..40 {
            let grow = step as f64 * 13.0;
            let window = visible_window(
                VisibleRect::new(200.0 - grow, 150.0 - grow, 260.0 + grow, 190.0 + grow),
                size,
                40,
                25,
            );
            if step > 0 {
                assert!(window.row_start <= previous.row_start && window.row_end >= previous.row_end);
                assert!(window.col_start <= previous.col_start && window.col_end >= previous.col_end);
            }
            previous = window;
        }
    }

    #[test]
    fn test_from_rect() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(VisibleRect::from(rect), VisibleRect::new(10.0, 20.0, 110.0, 70.0));
    }
}
