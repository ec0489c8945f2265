// THEORY:
// The `Grid` is the coordinate system of the whole estimator. It partitions the
// bounding box of a shelf photo into `rows x cols` equal-area rectangles and gives
// every rectangle a stable identity, the `Cell`.
//
// Key architectural principles:
// 1.  **Validated Construction**: A `Grid` can only be built through `Grid::new`,
//     which rejects a zero dimension. Every other module can therefore rely on
//     `total_cells() >= 1` and never guard against division by zero.
// 2.  **Typed Identity**: A `Cell` is a `(row, col)` value type. It is `Copy`,
//     hashable and ordered, so it can live in a real set. The packed index
//     `row * cols + col` is offered for flat buffers but is never the identity
//     itself, because its meaning changes with the resolution.
// 3.  **Resolution-Independent Geometry**: The grid only knows percentages of the
//     image box. Pixel geometry lives in the `overlay` module, which combines a
//     `Grid` with the natural dimensions of a concrete photo.

use crate::error::EstimatorError;
use serde::{Deserialize, Serialize};

/// Rows used when the caller does not choose a resolution.
pub const DEFAULT_ROWS: u32 = 4;
/// Columns used when the caller does not choose a resolution.
pub const DEFAULT_COLS: u32 = 6;

/// Identity of one grid cell. Not materialized anywhere; the pair is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Zero-based row, counted from the top of the photo.
    pub row: u32,
    /// Zero-based column, counted from the left of the photo.
    pub col: u32,
}

impl Cell {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// A cell's rectangle expressed as percentages of the image box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A `rows x cols` partition of the image area into equal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Grid {
    rows: u32,
    cols: u32,
}

impl Grid {
    /// Builds a grid, rejecting a zero dimension with `InvalidConfiguration`.
    pub fn new(rows: u32, cols: u32) -> Result<Self, EstimatorError> {
        if rows == 0 || cols == 0 {
            return Err(EstimatorError::InvalidConfiguration { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of cells in the grid. Always at least 1.
    pub fn total_cells(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Returns the cell unchanged when it lies on this grid, `InvalidCell` otherwise.
    pub fn check(&self, cell: Cell) -> Result<Cell, EstimatorError> {
        if self.contains(cell) {
            Ok(cell)
        } else {
            Err(EstimatorError::InvalidCell {
                row: cell.row,
                col: cell.col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Row-major packed index of a cell, `row * cols + col`.
    pub fn index_of(&self, cell: Cell) -> Option<u64> {
        self.contains(cell)
            .then(|| u64::from(cell.row) * u64::from(self.cols) + u64::from(cell.col))
    }

    /// Inverse of `index_of`.
    pub fn cell_at_index(&self, index: u64) -> Option<Cell> {
        if index >= self.total_cells() {
            return None;
        }
        let cols = u64::from(self.cols);
        // Both quotients are bounded by rows and cols, which fit in u32.
        Some(Cell::new((index / cols) as u32, (index % cols) as u32))
    }

    /// Every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }

    /// Width of one cell as a percentage of the image width (`100 / cols`).
    pub fn cell_width_percent(&self) -> f64 {
        100.0 / f64::from(self.cols)
    }

    /// Height of one cell as a percentage of the image height (`100 / rows`).
    pub fn cell_height_percent(&self) -> f64 {
        100.0 / f64::from(self.rows)
    }

    pub fn cell_rect_percent(&self, cell: Cell) -> Option<PercentRect> {
        if !self.contains(cell) {
            return None;
        }
        let width = self.cell_width_percent();
        let height = self.cell_height_percent();
        Some(PercentRect {
            left: f64::from(cell.col) * width,
            top: f64::from(cell.row) * height,
            width,
            height,
        })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}
