//! Generic row-major table-filling engine.
//!
//! The engine drives any [`TableProblem`]: it visits cells in row-major
//! order, hands each one its diagonal/up/left neighbours, and tracks the
//! first cell whose score strictly exceeds everything before it. Changing
//! the visiting order would change which optimum is reported when several
//! tie, so the order is fixed here rather than left to problems.
//!
//! Two storage modes are supported. [`Storage::Full`] keeps the entire
//! `rows x cols` table alive for the duration of the call; [`Storage::Rolling`]
//! keeps only the previous and current rows. Both produce identical results.

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{DpError, Result};
use crate::table::DpTable;
use crate::traits::{BestCell, Neighbors, TableProblem};

/// How the engine stores DP cells while scanning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Storage {
    /// Dense `rows x cols` table, O(m*n) memory.
    #[default]
    Full,
    /// Previous and current row only, O(n) memory.
    Rolling,
}

/// Table-filling engine for a problem instance `P`.
///
/// ```
/// use grid_dp::{Grid, TableEngine, problems::zero_square::ZeroSquareProblem};
///
/// let grid = Grid::from_rows(&[[0u8, 0], [0, 0]]).unwrap();
/// let result = TableEngine::new(ZeroSquareProblem::new(&grid)).run();
/// assert_eq!(result.size, 2);
/// ```
pub struct TableEngine<P: TableProblem> {
    problem: P,
    storage: Storage,
}

struct ScanState<C, S> {
    best_score: S,
    best: Option<BestCell<C>>,
}

impl<P: TableProblem> TableEngine<P> {
    /// Create an engine with the default (full-table) storage.
    pub fn new(problem: P) -> Self {
        Self::with_storage(problem, Storage::default())
    }

    pub fn with_storage(problem: P, storage: Storage) -> Self {
        Self { problem, storage }
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn storage(&self) -> Storage {
        self.storage
    }

    /// Fill the table and return the problem's output.
    pub fn run(&self) -> P::Output {
        let best = match self.scan(|_| Ok::<(), Infallible>(())) {
            Ok(best) => best,
            Err(never) => match never {},
        };
        self.problem.finish(best)
    }

    /// Like [`run`](Self::run), but checks `cancel` before every row and
    /// stops with [`DpError::Cancelled`] once it is set.
    pub fn run_cancellable(&self, cancel: &AtomicBool) -> Result<P::Output> {
        let best = self.scan(|row| check_cancel(cancel, row))?;
        Ok(self.problem.finish(best))
    }

    /// Fill a full table regardless of the configured storage and return it
    /// alongside the output, for inspection and debugging.
    pub fn run_with_table(&self) -> (P::Output, DpTable<P::Cell>) {
        let mut state = self.fresh_state();
        let table = match self.fill_full(|_| Ok::<(), Infallible>(()), &mut state) {
            Ok(table) => table,
            Err(never) => match never {},
        };
        (self.problem.finish(state.best), table)
    }

    fn fresh_state(&self) -> ScanState<P::Cell, P::Score> {
        ScanState {
            best_score: self.problem.baseline(),
            best: None,
        }
    }

    /// Scan the table, calling `before_row` ahead of every row; an error
    /// from it stops the scan.
    fn scan<E, F>(&self, mut before_row: F) -> std::result::Result<Option<BestCell<P::Cell>>, E>
    where
        F: FnMut(usize) -> std::result::Result<(), E>,
    {
        let rows = self.problem.rows();
        let cols = self.problem.cols();
        let span = tracing::debug_span!("table_scan", rows, cols, storage = ?self.storage);
        let _enter = span.enter();

        let mut state = self.fresh_state();
        if rows == 0 || cols == 0 {
            debug!("degenerate table, nothing to scan");
            return Ok(None);
        }

        match self.storage {
            Storage::Full => {
                self.fill_full(before_row, &mut state)?;
            }
            Storage::Rolling => {
                let mut prev = vec![P::Cell::default(); cols];
                let mut current = vec![P::Cell::default(); cols];
                for row in 0..rows {
                    before_row(row)?;
                    let above = if row == 0 { None } else { Some(prev.as_slice()) };
                    self.fill_row(row, above, &mut current, &mut state);
                    std::mem::swap(&mut prev, &mut current);
                }
            }
        }

        debug!(best = ?state.best.as_ref().map(|b| (b.row, b.col)), score = ?state.best_score, "scan complete");
        Ok(state.best)
    }

    fn fill_full<E, F>(
        &self,
        mut before_row: F,
        state: &mut ScanState<P::Cell, P::Score>,
    ) -> std::result::Result<DpTable<P::Cell>, E>
    where
        F: FnMut(usize) -> std::result::Result<(), E>,
    {
        let rows = self.problem.rows();
        let cols = self.problem.cols();
        let mut table = DpTable::new(rows, cols, P::Cell::default());
        for row in 0..rows {
            before_row(row)?;
            let (above, current) = table.split_rows(row);
            self.fill_row(row, above, current, state);
        }
        Ok(table)
    }

    fn fill_row(
        &self,
        row: usize,
        above: Option<&[P::Cell]>,
        current: &mut [P::Cell],
        state: &mut ScanState<P::Cell, P::Score>,
    ) {
        for col in 0..current.len() {
            let neighbors = Neighbors {
                diag: if col > 0 { above.map(|r| r[col - 1]) } else { None },
                up: above.map(|r| r[col]),
                left: if col > 0 { Some(current[col - 1]) } else { None },
            };
            let cell = self.problem.fill_cell(row, col, neighbors);
            current[col] = cell;

            let score = self.problem.score(&cell);
            if score > state.best_score {
                trace!(row, col, score = ?score, "new maximum");
                state.best_score = score;
                state.best = Some(BestCell { row, col, cell });
            }
        }
    }
}

#[inline]
fn check_cancel(cancel: &AtomicBool, row: usize) -> Result<()> {
    if cancel.load(Ordering::Relaxed) {
        Err(DpError::Cancelled { row })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts cells; each cell scores its own row-major index modulo 3, so
    /// the maximum 2 is reached first at (0, 2) and repeated later.
    struct Ramp {
        rows: usize,
        cols: usize,
    }

    impl TableProblem for Ramp {
        type Cell = u32;
        type Score = u32;
        type Output = Option<(usize, usize)>;

        fn rows(&self) -> usize {
            self.rows
        }
        fn cols(&self) -> usize {
            self.cols
        }
        fn fill_cell(&self, row: usize, col: usize, _n: Neighbors<u32>) -> u32 {
            ((row * self.cols + col) % 3) as u32
        }
        fn score(&self, cell: &u32) -> u32 {
            *cell
        }
        fn baseline(&self) -> u32 {
            0
        }
        fn finish(&self, best: Option<BestCell<u32>>) -> Self::Output {
            best.map(|b| (b.row, b.col))
        }
    }

    /// Each cell is the sum of its neighbours plus one.
    struct NeighborSum;

    impl TableProblem for NeighborSum {
        type Cell = u64;
        type Score = u64;
        type Output = u64;

        fn rows(&self) -> usize {
            4
        }
        fn cols(&self) -> usize {
            5
        }
        fn fill_cell(&self, _row: usize, _col: usize, n: Neighbors<u64>) -> u64 {
            1 + n.diag.unwrap_or(0) + n.up.unwrap_or(0) + n.left.unwrap_or(0)
        }
        fn score(&self, cell: &u64) -> u64 {
            *cell
        }
        fn baseline(&self) -> u64 {
            0
        }
        fn finish(&self, best: Option<BestCell<u64>>) -> u64 {
            best.map(|b| b.cell).unwrap_or(0)
        }
    }

    #[test]
    fn first_occurrence_wins_ties() {
        let engine = TableEngine::new(Ramp { rows: 4, cols: 4 });
        assert_eq!(engine.run(), Some((0, 2)));
    }

    #[test]
    fn degenerate_tables_yield_none() {
        assert_eq!(TableEngine::new(Ramp { rows: 0, cols: 4 }).run(), None);
        assert_eq!(TableEngine::new(Ramp { rows: 4, cols: 0 }).run(), None);
    }

    #[test]
    fn storage_modes_agree() {
        let full = TableEngine::with_storage(NeighborSum, Storage::Full).run();
        let rolling = TableEngine::with_storage(NeighborSum, Storage::Rolling).run();
        assert_eq!(full, rolling);
        let (out, table) = TableEngine::new(NeighborSum).run_with_table();
        assert_eq!(table.get(3, 4), Some(out));
    }

    #[test]
    fn boundary_neighbors_are_none() {
        let (_, table) = TableEngine::new(NeighborSum).run_with_table();
        assert_eq!(table.row(0), Some(&[1u64, 2, 3, 4, 5][..]));
        assert_eq!(table.get(1, 0), Some(2));
        assert_eq!(table.get(1, 1), Some(1 + 1 + 2 + 2));
    }

    #[test]
    fn cancellation_stops_before_first_row() {
        let flag = AtomicBool::new(true);
        let engine = TableEngine::with_storage(NeighborSum, Storage::Rolling);
        assert_eq!(
            engine.run_cancellable(&flag),
            Err(DpError::Cancelled { row: 0 })
        );
        flag.store(false, Ordering::Relaxed);
        assert_eq!(engine.run_cancellable(&flag), Ok(engine.run()));
    }
}
