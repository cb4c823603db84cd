//! Largest all-empty square sub-matrix of a binary grid.
//!
//! Cell `(i, j)` of the table holds the side of the largest all-empty square
//! whose bottom-right corner is `(i, j)`:
//!
//! - blocked cell: `0`
//! - empty cell in row 0 or column 0: `1`
//! - otherwise: `1 + min(diag, up, left)`
//!
//! The engine reports the first maximal corner in row-major order; the
//! result converts it to the square's top-left corner.

use std::fmt;
use std::sync::atomic::AtomicBool;

use serde::Serialize;

use crate::engine::{Storage, TableEngine};
use crate::error::Result;
use crate::grid::Grid;
use crate::traits::{BestCell, Neighbors, TableProblem};

/// Size and top-left corner of the largest all-empty square.
///
/// `position` is `None` exactly when `size == 0`, i.e. the grid had no empty
/// cell or no cells at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SquareResult {
    pub size: usize,
    pub position: Option<(usize, usize)>,
}

impl SquareResult {
    pub const NONE: SquareResult = SquareResult {
        size: 0,
        position: None,
    };

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn row(&self) -> Option<usize> {
        self.position.map(|(r, _)| r)
    }

    pub fn col(&self) -> Option<usize> {
        self.position.map(|(_, c)| c)
    }

    /// Whether `(row, col)` lies inside the reported square.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        match self.position {
            Some((r, c)) => row >= r && row < r + self.size && col >= c && col < c + self.size,
            None => false,
        }
    }
}

impl fmt::Display for SquareResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some((row, col)) => write!(
                f,
                "Largest zero sub-matrix: {0}×{0} at position ({1}, {2})",
                self.size, row, col
            ),
            None => f.write_str("Largest zero sub-matrix: none"),
        }
    }
}

#[derive(Clone, Copy)]
pub struct ZeroSquareProblem<'a> {
    grid: &'a Grid,
}

impl<'a> ZeroSquareProblem<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &Grid {
        self.grid
    }
}

impl<'a> TableProblem for ZeroSquareProblem<'a> {
    type Cell = u32;
    type Score = u32;
    type Output = SquareResult;

    fn rows(&self) -> usize {
        self.grid.rows()
    }

    fn cols(&self) -> usize {
        self.grid.cols()
    }

    fn fill_cell(&self, row: usize, col: usize, n: Neighbors<u32>) -> u32 {
        if !self.grid.is_empty_cell(row, col) {
            return 0;
        }
        let diag = n.diag.unwrap_or(0);
        let up = n.up.unwrap_or(0);
        let left = n.left.unwrap_or(0);
        1 + diag.min(up).min(left)
    }

    fn score(&self, cell: &u32) -> u32 {
        *cell
    }

    fn baseline(&self) -> u32 {
        0
    }

    fn finish(&self, best: Option<BestCell<u32>>) -> SquareResult {
        match best {
            Some(BestCell { row, col, cell }) => {
                let size = cell as usize;
                SquareResult {
                    size,
                    position: Some((row + 1 - size, col + 1 - size)),
                }
            }
            None => SquareResult::NONE,
        }
    }
}

/// Reusable finder carrying the engine's storage choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroSquareFinder {
    storage: Storage,
}

impl ZeroSquareFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> Storage {
        self.storage
    }

    pub fn find(&self, grid: &Grid) -> SquareResult {
        TableEngine::with_storage(ZeroSquareProblem::new(grid), self.storage).run()
    }

    /// Checks `cancel` once per grid row.
    pub fn find_cancellable(&self, grid: &Grid, cancel: &AtomicBool) -> Result<SquareResult> {
        TableEngine::with_storage(ZeroSquareProblem::new(grid), self.storage)
            .run_cancellable(cancel)
    }
}

/// Largest all-empty square in `grid`, using full-table storage.
pub fn find_largest_zero_square(grid: &Grid) -> SquareResult {
    ZeroSquareFinder::new().find(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Grid {
        Grid::from_rows(&[
            [1u8, 0, 0, 1, 0],
            [0, 0, 0, 0, 1],
            [0, 0, 0, 0, 0],
            [1, 0, 0, 0, 0],
            [0, 0, 1, 0, 0],
        ])
        .unwrap()
    }

    #[test]
    fn example_grid_has_three_square_at_one_one() {
        let r = find_largest_zero_square(&example());
        assert_eq!(r.size, 3);
        assert_eq!(r.position, Some((1, 1)));
        assert_eq!(r.to_string(), "Largest zero sub-matrix: 3×3 at position (1, 1)");
    }

    #[test]
    fn blocked_grid_has_no_square() {
        let r = find_largest_zero_square(&Grid::filled(4, 6, 1));
        assert_eq!(r, SquareResult::NONE);
        assert!(r.is_empty());
    }

    #[test]
    fn degenerate_grids() {
        assert_eq!(find_largest_zero_square(&Grid::filled(0, 5, 0)), SquareResult::NONE);
        assert_eq!(find_largest_zero_square(&Grid::filled(5, 0, 0)), SquareResult::NONE);
    }

    #[test]
    fn open_grid_reports_top_left() {
        let r = find_largest_zero_square(&Grid::filled(3, 7, 0));
        assert_eq!(r.size, 3);
        assert_eq!(r.position, Some((0, 0)));
    }

    #[test]
    fn single_empty_cell_uses_row_major_first() {
        // (1, 1) precedes (2, 0) in row-major order.
        let g = Grid::from_rows(&[[1u8, 1], [1, 0], [0, 1]]).unwrap();
        let r = find_largest_zero_square(&g);
        assert_eq!(r.size, 1);
        assert_eq!(r.position, Some((1, 1)));
    }

    #[test]
    fn contains_covers_reported_square() {
        let r = SquareResult {
            size: 2,
            position: Some((1, 3)),
        };
        assert!(r.contains(1, 3));
        assert!(r.contains(2, 4));
        assert!(!r.contains(3, 3));
        assert!(!r.contains(1, 5));
        assert!(!SquareResult::NONE.contains(0, 0));
    }

    #[test]
    fn rolling_storage_matches_full() {
        let g = example();
        let full = ZeroSquareFinder::with_storage(Storage::Full).find(&g);
        let rolling = ZeroSquareFinder::with_storage(Storage::Rolling).find(&g);
        assert_eq!(full, rolling);
    }
}
