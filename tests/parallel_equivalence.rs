#![cfg(feature = "parallel")]

use grid_dp::generate::{random_grid, random_letters, seeded_rng};
use grid_dp::trials::run_trials;
use grid_dp::{find_largest_zero_square, WeightScenario, WeightedSubstringMatcher};

#[test]
fn parallel_trials_match_sequential_calls() {
    let mut rng = seeded_rng(9);
    let grids: Vec<_> = (0..16)
        .map(|i| random_grid(10 + i, 30 - i, 0.75, &mut rng).unwrap())
        .collect();
    let outcomes = run_trials(&grids, find_largest_zero_square);
    for (grid, outcome) in grids.iter().zip(&outcomes) {
        assert_eq!(outcome.value, find_largest_zero_square(grid));
    }
}

#[test]
fn parallel_substring_trials_match_sequential_calls() {
    let mut rng = seeded_rng(10);
    let pairs: Vec<(String, String)> = (0..12)
        .map(|_| (random_letters(80, &mut rng), random_letters(60, &mut rng)))
        .collect();
    let matcher = WeightedSubstringMatcher::from_scenario(WeightScenario::Uniform, 1.0).unwrap();
    let outcomes = run_trials(&pairs, |(a, b)| matcher.find(a, b).unwrap());
    for ((a, b), outcome) in pairs.iter().zip(&outcomes) {
        assert_eq!(outcome.value, matcher.find(a, b).unwrap());
    }
}
