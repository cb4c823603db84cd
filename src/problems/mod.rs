//! Concrete dynamic programs run by the [`TableEngine`](crate::engine::TableEngine).
//!
//! - [`zero_square`]        : largest all-empty square in a binary grid.
//! - [`weighted_substring`] : best-scoring equal-length substring pair under
//!   per-symbol match weights and a flat mismatch penalty.

pub mod weighted_substring;
pub mod zero_square;
