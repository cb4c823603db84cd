//! Timed repetition of independent DP calls.
//!
//! Each trial owns its input and touches no shared mutable state, so with
//! the `parallel` feature the trials are spread over the rayon pool. Timings
//! are taken inside each trial either way.

use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Output of one trial and the wall time its computation took.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome<T> {
    pub value: T,
    pub elapsed: Duration,
}

/// Run `compute` once per input, timing each call.
///
/// Outcomes come back in input order.
#[cfg(not(feature = "parallel"))]
pub fn run_trials<I, T, F>(inputs: &[I], compute: F) -> Vec<TrialOutcome<T>>
where
    F: Fn(&I) -> T,
{
    inputs.iter().map(|input| timed(|| compute(input))).collect()
}

/// Run `compute` once per input, timing each call.
///
/// Outcomes come back in input order.
#[cfg(feature = "parallel")]
pub fn run_trials<I, T, F>(inputs: &[I], compute: F) -> Vec<TrialOutcome<T>>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> T + Sync,
{
    inputs
        .par_iter()
        .map(|input| timed(|| compute(input)))
        .collect()
}

pub fn timed<T>(compute: impl FnOnce() -> T) -> TrialOutcome<T> {
    let start = Instant::now();
    let value = compute();
    TrialOutcome {
        value,
        elapsed: start.elapsed(),
    }
}

/// Mean wall time in milliseconds; zero for no trials.
pub fn mean_millis<T>(outcomes: &[TrialOutcome<T>]) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    let total: f64 = outcomes.iter().map(|o| o.elapsed.as_secs_f64()).sum();
    total * 1_000.0 / outcomes.len() as f64
}

/// Mean of a per-outcome quantity; zero for no trials.
pub fn mean_of<T>(outcomes: &[TrialOutcome<T>], f: impl Fn(&T) -> f64) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    outcomes.iter().map(|o| f(&o.value)).sum::<f64>() / outcomes.len() as f64
}
