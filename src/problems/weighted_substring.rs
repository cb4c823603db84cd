//! Weighted approximate common substring.
//!
//! Finds the pair of equal-length substrings, one from each input, whose
//! aligned characters score highest. Aligning two equal symbols (compared
//! case-insensitively) earns that symbol's weight; any other pair costs the
//! flat penalty. Runs only ever extend along the diagonal, so there are no
//! gaps, and a run whose score would drop to zero or below is abandoned.
//!
//! Table cell `(i, j)` describes the best run ending at `s1[i]` aligned with
//! `s2[j]`: its score and its length. Out-of-table diagonals count as an
//! empty run.

use std::fmt;
use std::sync::atomic::AtomicBool;

use serde::Serialize;

use crate::engine::{Storage, TableEngine};
use crate::error::{DpError, Result, SequenceId};
use crate::traits::{BestCell, Neighbors, TableProblem};
use crate::utils::fold_case;
use crate::weights::{Scoring, WeightScenario, WeightTable};

/// Best run found by the matcher.
///
/// `starts` is `None` for the empty run (score 0, length 0). Otherwise
/// `text1 == s1[start1..start1 + length]` and likewise for `text2`, counted
/// in chars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstringResult {
    pub score: f64,
    pub length: usize,
    pub starts: Option<(usize, usize)>,
    pub text1: String,
    pub text2: String,
}

impl SubstringResult {
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            length: 0,
            starts: None,
            text1: String::new(),
            text2: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn start1(&self) -> Option<usize> {
        self.starts.map(|(a, _)| a)
    }

    pub fn start2(&self) -> Option<usize> {
        self.starts.map(|(_, b)| b)
    }
}

impl fmt::Display for SubstringResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = |p: Option<usize>| p.map_or_else(|| "-".to_string(), |v| v.to_string());
        writeln!(f, "Score: {:.2}", self.score)?;
        writeln!(f, "Position in string1: {}", pos(self.start1()))?;
        writeln!(f, "Position in string2: {}", pos(self.start2()))?;
        writeln!(f, "Length: {}", self.length)?;
        writeln!(f, "Substring1: {}", self.text1)?;
        write!(f, "Substring2: {}", self.text2)
    }
}

/// Score and length of the run ending at a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunCell {
    pub score: f64,
    pub len: u32,
}

/// One validated string pair ready for the engine.
#[derive(Debug, Clone)]
pub struct SubstringProblem {
    s1: Vec<char>,
    s2: Vec<char>,
    keys1: Vec<char>,
    keys2: Vec<char>,
    weights1: Vec<f64>,
    penalty: f64,
}

impl SubstringProblem {
    /// Validate both sequences against the weight table.
    ///
    /// Fails with [`DpError::UnknownSymbol`] on the first symbol (s1 first,
    /// then s2) that the table does not cover.
    pub fn new(s1: &str, s2: &str, scoring: &Scoring) -> Result<Self> {
        let weights = scoring.weights();
        let s1: Vec<char> = s1.chars().collect();
        let s2: Vec<char> = s2.chars().collect();

        let mut weights1 = Vec::with_capacity(s1.len());
        for (position, &symbol) in s1.iter().enumerate() {
            let w = weights.weight(symbol).ok_or(DpError::UnknownSymbol {
                symbol,
                sequence: SequenceId::First,
                position,
            })?;
            weights1.push(w);
        }
        let missing = s2.iter().enumerate().find(|&(_, &c)| !weights.contains(c));
        if let Some((position, &symbol)) = missing {
            return Err(DpError::UnknownSymbol {
                symbol,
                sequence: SequenceId::Second,
                position,
            });
        }

        Ok(Self {
            keys1: s1.iter().copied().map(fold_case).collect(),
            keys2: s2.iter().copied().map(fold_case).collect(),
            s1,
            s2,
            weights1,
            penalty: scoring.penalty(),
        })
    }

    fn slice(chars: &[char], start: usize, len: usize) -> String {
        chars[start..start + len].iter().collect()
    }
}

impl TableProblem for SubstringProblem {
    type Cell = RunCell;
    type Score = f64;
    type Output = SubstringResult;

    fn rows(&self) -> usize {
        self.s1.len()
    }

    fn cols(&self) -> usize {
        self.s2.len()
    }

    fn fill_cell(&self, row: usize, col: usize, n: Neighbors<RunCell>) -> RunCell {
        let prev = n.diag.unwrap_or_default();
        let delta = if self.keys1[row] == self.keys2[col] {
            self.weights1[row]
        } else {
            -self.penalty
        };
        let extended = prev.score + delta;
        if extended > 0.0 {
            RunCell {
                score: extended,
                len: prev.len + 1,
            }
        } else {
            RunCell::default()
        }
    }

    fn score(&self, cell: &RunCell) -> f64 {
        cell.score
    }

    fn baseline(&self) -> f64 {
        0.0
    }

    fn finish(&self, best: Option<BestCell<RunCell>>) -> SubstringResult {
        let Some(BestCell { row, col, cell }) = best else {
            return SubstringResult::empty();
        };
        let length = cell.len as usize;
        let start1 = row + 1 - length;
        let start2 = col + 1 - length;
        SubstringResult {
            score: cell.score,
            length,
            starts: Some((start1, start2)),
            text1: Self::slice(&self.s1, start1, length),
            text2: Self::slice(&self.s2, start2, length),
        }
    }
}

/// Reusable matcher holding a validated [`Scoring`].
#[derive(Debug, Clone)]
pub struct WeightedSubstringMatcher {
    scoring: Scoring,
    storage: Storage,
}

impl WeightedSubstringMatcher {
    pub fn new(scoring: Scoring) -> Self {
        Self {
            scoring,
            storage: Storage::default(),
        }
    }

    pub fn from_scenario(scenario: WeightScenario, penalty: f64) -> Result<Self> {
        Ok(Self::new(Scoring::from_scenario(scenario, penalty)?))
    }

    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }

    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    pub fn find(&self, s1: &str, s2: &str) -> Result<SubstringResult> {
        let problem = SubstringProblem::new(s1, s2, &self.scoring)?;
        Ok(TableEngine::with_storage(problem, self.storage).run())
    }

    /// Checks `cancel` once per character of `s1`.
    pub fn find_cancellable(
        &self,
        s1: &str,
        s2: &str,
        cancel: &AtomicBool,
    ) -> Result<SubstringResult> {
        let problem = SubstringProblem::new(s1, s2, &self.scoring)?;
        TableEngine::with_storage(problem, self.storage).run_cancellable(cancel)
    }
}

/// Best weighted substring pair of `s1` and `s2`.
pub fn find_best_substring(
    s1: &str,
    s2: &str,
    weights: &WeightTable,
    penalty: f64,
) -> Result<SubstringResult> {
    WeightedSubstringMatcher::new(Scoring::new(weights.clone(), penalty)?).find(s1, s2)
}
