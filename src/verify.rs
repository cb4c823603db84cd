//! Brute-force oracles for both engines.
//!
//! These are exhaustive and meant for test-sized inputs: the square check is
//! O(m*n*k^2) and the substring check is O(m*n*min(m, n)).

use thiserror::Error;

use crate::grid::Grid;
use crate::problems::weighted_substring::SubstringResult;
use crate::problems::zero_square::SquareResult;
use crate::weights::Scoring;

const SCORE_EPS: f64 = 1e-9;

/// A way in which a reported result disagrees with the brute-force oracle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("result of size {size} has inconsistent position {position:?}")]
    Inconsistent {
        size: usize,
        position: Option<(usize, usize)>,
    },

    #[error("square of side {size} at ({row}, {col}) leaves the grid")]
    OutOfBounds { size: usize, row: usize, col: usize },

    #[error("cell ({row}, {col}) inside the reported square is blocked")]
    BlockedCell { row: usize, col: usize },

    #[error("an all-empty square of side {size} exists at ({row}, {col})")]
    LargerSquare { size: usize, row: usize, col: usize },

    #[error("reported text does not match the input at the reported offsets")]
    TextMismatch,

    #[error("symbol {0:?} cannot be scored")]
    Unscorable(char),

    #[error("reported score {reported} but the substrings score {recomputed}")]
    ScoreMismatch { reported: f64, recomputed: f64 },

    #[error("a substring pair scores {better}, above the reported {reported}")]
    BetterSubstring { reported: f64, better: f64 },
}

/// Whether the `size x size` square at `(row, col)` is entirely empty.
pub fn all_empty(grid: &Grid, row: usize, col: usize, size: usize) -> bool {
    (row..row + size).all(|r| (col..col + size).all(|c| grid.is_empty_cell(r, c)))
}

/// First all-empty square of side `size` in row-major order.
pub fn find_square_of_size(grid: &Grid, size: usize) -> Option<(usize, usize)> {
    let (rows, cols) = grid.dims();
    if size == 0 || size > rows || size > cols {
        return None;
    }
    (0..=rows - size)
        .flat_map(|r| (0..=cols - size).map(move |c| (r, c)))
        .find(|&(r, c)| all_empty(grid, r, c, size))
}

/// Check that the reported square is all-empty and that no larger one exists.
pub fn verify_square(grid: &Grid, result: &SquareResult) -> Result<(), Violation> {
    let size = result.size;
    match (size, result.position) {
        (0, None) => {}
        (0, Some(_)) | (_, None) => {
            return Err(Violation::Inconsistent {
                size,
                position: result.position,
            })
        }
        (_, Some((row, col))) => {
            if row + size > grid.rows() || col + size > grid.cols() {
                return Err(Violation::OutOfBounds { size, row, col });
            }
            for r in row..row + size {
                for c in col..col + size {
                    if !grid.is_empty_cell(r, c) {
                        return Err(Violation::BlockedCell { row: r, col: c });
                    }
                }
            }
        }
    }

    // Any larger square contains one of side size + 1.
    match find_square_of_size(grid, size + 1) {
        Some((row, col)) => Err(Violation::LargerSquare {
            size: size + 1,
            row,
            col,
        }),
        None => Ok(()),
    }
}

/// Score of aligning `text1` with `text2` position by position.
///
/// Returns `None` if the lengths differ.
pub fn run_score(text1: &str, text2: &str, scoring: &Scoring) -> Result<Option<f64>, Violation> {
    if text1.chars().count() != text2.chars().count() {
        return Ok(None);
    }
    let mut total = 0.0;
    for (a, b) in text1.chars().zip(text2.chars()) {
        total += scoring.delta(a, b).ok_or(Violation::Unscorable(a))?;
    }
    Ok(Some(total))
}

/// Highest score over every pair of equal-length substrings, including the
/// empty pair.
pub fn brute_force_best_score(s1: &str, s2: &str, scoring: &Scoring) -> Result<f64, Violation> {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let mut best = 0.0f64;
    for i in 0..a.len() {
        for j in 0..b.len() {
            let mut total = 0.0;
            for (&x, &y) in a[i..].iter().zip(&b[j..]) {
                total += scoring.delta(x, y).ok_or(Violation::Unscorable(x))?;
                best = best.max(total);
            }
        }
    }
    Ok(best)
}

/// Check that the reported run is where it claims, scores what it claims,
/// and that nothing scores higher.
pub fn verify_substring(
    s1: &str,
    s2: &str,
    scoring: &Scoring,
    result: &SubstringResult,
) -> Result<(), Violation> {
    match result.starts {
        None if result.length == 0 && result.text1.is_empty() && result.text2.is_empty() => {
            if result.score != 0.0 {
                return Err(Violation::ScoreMismatch {
                    reported: result.score,
                    recomputed: 0.0,
                });
            }
        }
        None => {
            return Err(Violation::Inconsistent {
                size: result.length,
                position: None,
            })
        }
        Some((start1, start2)) => {
            let expect1: String = s1.chars().skip(start1).take(result.length).collect();
            let expect2: String = s2.chars().skip(start2).take(result.length).collect();
            if expect1 != result.text1
                || expect2 != result.text2
                || expect1.chars().count() != result.length
                || expect2.chars().count() != result.length
            {
                return Err(Violation::TextMismatch);
            }
            let recomputed =
                run_score(&result.text1, &result.text2, scoring)?.ok_or(Violation::TextMismatch)?;
            if (recomputed - result.score).abs() > SCORE_EPS * recomputed.abs().max(1.0) {
                return Err(Violation::ScoreMismatch {
                    reported: result.score,
                    recomputed,
                });
            }
        }
    }

    let better = brute_force_best_score(s1, s2, scoring)?;
    if better > result.score + SCORE_EPS * better.abs().max(1.0) {
        return Err(Violation::BetterSubstring {
            reported: result.score,
            better,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::zero_square::find_largest_zero_square;
    use crate::weights::WeightTable;

    fn grid() -> Grid {
        Grid::from_rows(&[[0u8, 0, 1], [0, 0, 1], [1, 1, 1]]).unwrap()
    }

    #[test]
    fn accepts_engine_result() {
        let g = grid();
        assert_eq!(verify_square(&g, &find_largest_zero_square(&g)), Ok(()));
    }

    #[test]
    fn detects_undersized_report() {
        let r = SquareResult {
            size: 1,
            position: Some((0, 0)),
        };
        assert_eq!(
            verify_square(&grid(), &r),
            Err(Violation::LargerSquare {
                size: 2,
                row: 0,
                col: 0
            })
        );
    }

    #[test]
    fn detects_blocked_cell_and_bounds() {
        let r = SquareResult {
            size: 2,
            position: Some((1, 1)),
        };
        assert_eq!(
            verify_square(&grid(), &r),
            Err(Violation::BlockedCell { row: 1, col: 2 })
        );
        let r = SquareResult {
            size: 2,
            position: Some((2, 2)),
        };
        assert!(matches!(
            verify_square(&grid(), &r),
            Err(Violation::OutOfBounds { .. })
        ));
    }

    #[test]
    fn detects_inconsistent_result() {
        let r = SquareResult {
            size: 0,
            position: Some((0, 0)),
        };
        assert!(matches!(
            verify_square(&grid(), &r),
            Err(Violation::Inconsistent { .. })
        ));
    }

    #[test]
    fn brute_force_reference_pair() {
        let scoring = Scoring::new(WeightTable::latin_uniform(), 5.0).unwrap();
        let best = brute_force_best_score("ABCAABCAA", "ABBCAACCBBBBBB", &scoring).unwrap();
        assert_eq!(best, 4.0);
    }

    #[test]
    fn run_score_sums_deltas() {
        let scoring = Scoring::new(WeightTable::latin_uniform(), 0.5).unwrap();
        assert_eq!(run_score("BCAABC", "BCAACC", &scoring), Ok(Some(4.5)));
        assert_eq!(run_score("AB", "A", &scoring), Ok(None));
        assert_eq!(run_score("A1", "A1", &scoring), Err(Violation::Unscorable('1')));
    }

    #[test]
    fn rejects_understated_substring() {
        let scoring = Scoring::new(WeightTable::latin_uniform(), 5.0).unwrap();
        let r = SubstringResult {
            score: 1.0,
            length: 1,
            starts: Some((0, 0)),
            text1: "A".into(),
            text2: "A".into(),
        };
        assert_eq!(
            verify_substring("ABCAABCAA", "ABBCAACCBBBBBB", &scoring, &r),
            Err(Violation::BetterSubstring {
                reported: 1.0,
                better: 4.0
            })
        );
    }
}
