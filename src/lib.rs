//! Table-filling dynamic programs over 2-D grids.
//!
//! Two independent problems share one engine:
//!
//! - the largest all-empty square sub-matrix of a binary grid, and
//! - the best-scoring pair of equal-length substrings of two strings under
//!   per-symbol match weights and a flat mismatch penalty.
//!
//! ## Core idea
//! 1. Describe the recurrence as a [`TableProblem`]: each cell depends only
//!    on its diagonal, upper, and left neighbours.
//! 2. Let [`TableEngine`] fill the table in row-major order, keeping the
//!    first cell whose score strictly beats everything before it.
//! 3. The problem turns that cell into a result (a square, or a pair of
//!    substrings).
//!
//! ## Quick start
//! ```
//! use grid_dp::{find_best_substring, find_largest_zero_square, Grid, WeightTable};
//!
//! let grid = Grid::from_rows(&[[1u8, 0, 0], [0, 0, 0], [0, 0, 1]]).unwrap();
//! let square = find_largest_zero_square(&grid);
//! assert_eq!((square.size, square.position), (2, Some((0, 1))));
//!
//! let best = find_best_substring("ABCAABCAA", "ABBCAACCBBBBBB", &WeightTable::latin_uniform(), 5.0)
//!     .unwrap();
//! assert_eq!((best.score, best.length, best.text1.as_str()), (4.0, 4, "BCAA"));
//! ```
//!
//! Besides the engines, the crate carries what the `dp_experiments` binary
//! needs: seeded input generation ([`generate`]), brute-force oracles
//! ([`verify`]), timed trials ([`trials`]), and text rendering ([`report`]).

pub mod builder;
pub mod engine;
pub mod error;
pub mod generate;
pub mod grid;
pub mod problems;
pub mod report;
pub mod table;
pub mod traits;
pub mod trials;
pub mod utils;
pub mod verify;
pub mod weights;

pub use crate::builder::TableEngineBuilder;
pub use crate::engine::{Storage, TableEngine};
pub use crate::error::{DpError, Result};
pub use crate::grid::Grid;
pub use crate::problems::weighted_substring::{
    find_best_substring, SubstringResult, WeightedSubstringMatcher,
};
pub use crate::problems::zero_square::{find_largest_zero_square, SquareResult, ZeroSquareFinder};
pub use crate::traits::TableProblem;
pub use crate::weights::{Scoring, WeightScenario, WeightTable};
