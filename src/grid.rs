//! Binary input matrix for the zero-square search.

use serde::Serialize;

use crate::error::{DpError, Result};

/// Rectangular matrix of cells; `0` is empty, anything else is blocked.
///
/// Cells are stored row-major. A grid may have zero rows or zero columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Build a grid from a row-major cell buffer.
    pub fn new(rows: usize, cols: usize, cells: Vec<u8>) -> Result<Self> {
        if cells.len() != rows * cols {
            return Err(DpError::config(format!(
                "grid of {rows}x{cols} needs {} cells, got {}",
                rows * cols,
                cells.len()
            )));
        }
        Ok(Self { rows, cols, cells })
    }

    /// Build a grid from a slice of rows, rejecting ragged input.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(DpError::RaggedGrid {
                    row: idx,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Grid of the given shape with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: u8) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True when the grid has no cells at all.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Whether `(row, col)` is an empty cell. Out-of-range cells are not.
    #[inline]
    pub fn is_empty_cell(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(0)
    }

    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.cells[start..start + self.cols])
        } else {
            None
        }
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 0).count()
    }

    /// Bytes held by the input plus a full `u32` DP table of the same shape.
    pub fn estimated_footprint_bytes(&self) -> u64 {
        let cells = self.rows as u64 * self.cols as u64;
        cells * (1 + std::mem::size_of::<u32>() as u64)
    }
}
