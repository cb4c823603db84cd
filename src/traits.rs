//! Core trait for table-filling dynamic programs.
//!
//! A [`TableProblem`] describes a DP over a `rows x cols` table whose cell
//! `(i, j)` depends only on its diagonal, upper, and left neighbours. The
//! [`TableEngine`](crate::engine::TableEngine) fills the table in row-major
//! order and remembers the first cell whose score strictly exceeds every
//! score seen before it. Implementations supply the recurrence and turn that
//! best cell into a result.
//!
//! Row-major order plus the strict comparison is the tie-break contract:
//! among equal optima, the one with the smallest row (then column) wins.

/// Neighbours of cell `(i, j)` that have already been filled.
///
/// Each is `None` when it falls outside the table (row 0 or column 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbors<C> {
    pub diag: Option<C>,
    pub up: Option<C>,
    pub left: Option<C>,
}

/// Best cell found by a scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestCell<C> {
    pub row: usize,
    pub col: usize,
    pub cell: C,
}

pub trait TableProblem {
    /// Value stored in every table cell.
    type Cell: Copy + Default;

    /// Quantity being maximised, projected from a cell.
    type Score: Copy + PartialOrd + std::fmt::Debug;

    /// Final answer built from the best cell.
    type Output;

    /// Number of table rows.
    fn rows(&self) -> usize;

    /// Number of table columns.
    fn cols(&self) -> usize;

    /// Compute cell `(row, col)` from its already-filled neighbours.
    ///
    /// Must depend only on the neighbours and fixed problem data.
    fn fill_cell(&self, row: usize, col: usize, neighbors: Neighbors<Self::Cell>) -> Self::Cell;

    /// Score of a filled cell.
    fn score(&self, cell: &Self::Cell) -> Self::Score;

    /// Score a cell must strictly exceed to become the best cell.
    fn baseline(&self) -> Self::Score;

    /// Build the output from the best cell, or from `None` when no cell
    /// beat the baseline (including tables with no cells).
    fn finish(&self, best: Option<BestCell<Self::Cell>>) -> Self::Output;
}
