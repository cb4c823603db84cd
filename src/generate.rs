//! Seeded synthetic inputs for experiments, benches, and tests.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::{DpError, Result};
use crate::grid::Grid;

/// Deterministic RNG for reproducible runs.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random `rows x cols` grid where each cell is empty with probability
/// `empty_probability`.
pub fn random_grid<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    empty_probability: f64,
    rng: &mut R,
) -> Result<Grid> {
    if !(0.0..=1.0).contains(&empty_probability) {
        return Err(DpError::config(format!(
            "empty probability must lie in [0, 1], got {empty_probability}"
        )));
    }
    let cells = (0..rows * cols)
        .map(|_| u8::from(rng.gen::<f64>() >= empty_probability))
        .collect();
    Grid::new(rows, cols, cells)
}

/// Random string of `len` upper-case letters `A..=Z`.
pub fn random_letters<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    (0..len)
        .map(|_| char::from(b'A' + rng.gen_range(0..26u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_grid() {
        let a = random_grid(8, 9, 0.7, &mut seeded_rng(42)).unwrap();
        let b = random_grid(8, 9, 0.7, &mut seeded_rng(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.dims(), (8, 9));
    }

    #[test]
    fn probability_extremes() {
        let mut rng = seeded_rng(1);
        assert_eq!(random_grid(5, 5, 1.0, &mut rng).unwrap().count_empty(), 25);
        assert_eq!(random_grid(5, 5, 0.0, &mut rng).unwrap().count_empty(), 0);
        assert!(random_grid(5, 5, 1.5, &mut rng).is_err());
        assert!(random_grid(5, 5, f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn letters_are_upper_latin() {
        let s = random_letters(200, &mut seeded_rng(7));
        assert_eq!(s.len(), 200);
        assert!(s.chars().all(|c| c.is_ascii_uppercase()));
    }
}
