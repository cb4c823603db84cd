//! Per-symbol match weights and the mismatch penalty.
//!
//! A [`WeightTable`] maps case-folded symbols to strictly positive, finite
//! weights. Everything is validated when the table is built so that the
//! substring DP never meets a bad weight mid-scan; the only lookup failure
//! left is a symbol missing from the table, which the matcher reports before
//! it starts filling.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DpError, Result};
use crate::utils::fold_case;

/// Approximate relative frequency (percent) of `A..=Z` in English text.
pub const ENGLISH_FREQUENCY: [f64; 26] = [
    8.167, 1.492, 2.782, 4.253, 12.702, 2.228, 2.015, 6.094, 6.966, 0.153, 0.772, 4.025, 2.406,
    6.749, 7.507, 1.929, 0.095, 5.987, 6.327, 9.056, 2.758, 0.978, 2.360, 0.150, 1.974, 0.074,
];

/// Default range used by the frequency-proportional scenario.
pub const DEFAULT_MIN_WEIGHT: f64 = 1.0;
pub const DEFAULT_MAX_WEIGHT: f64 = 10.0;

/// How to derive weights for the Latin alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightScenario {
    /// Every letter weighs 1.0.
    Uniform,
    /// Weights scale linearly with English letter frequency, mapped onto
    /// `[min_weight, max_weight]`.
    EnglishFrequency { min_weight: f64, max_weight: f64 },
}

impl WeightScenario {
    /// Resolve a numeric scenario selector: `1` is uniform, `2` is
    /// frequency-proportional over `[min_weight, max_weight]`.
    pub fn from_selector(selector: u8, min_weight: f64, max_weight: f64) -> Result<Self> {
        match selector {
            1 => Ok(WeightScenario::Uniform),
            2 => Ok(WeightScenario::EnglishFrequency {
                min_weight,
                max_weight,
            }),
            other => Err(DpError::config(format!(
                "unknown weight scenario {other}, expected 1 or 2"
            ))),
        }
    }
}

/// Mapping from case-folded symbol to positive weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightTable {
    weights: BTreeMap<char, f64>,
}

impl WeightTable {
    /// Build a table from `(symbol, weight)` pairs.
    ///
    /// Symbols are case-folded; two pairs that fold to the same symbol must
    /// agree on the weight.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, f64)>,
    {
        let mut weights = BTreeMap::new();
        for (symbol, weight) in pairs {
            check_weight(symbol, weight)?;
            let key = fold_case(symbol);
            if let Some(&existing) = weights.get(&key) {
                if existing != weight {
                    return Err(DpError::config(format!(
                        "conflicting weights for {key:?}: {existing} and {weight}"
                    )));
                }
            }
            weights.insert(key, weight);
        }
        debug!(symbols = weights.len(), "weight table built");
        Ok(Self { weights })
    }

    /// Same weight for every symbol of `alphabet`.
    pub fn uniform<I>(alphabet: I, weight: f64) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        Self::from_pairs(alphabet.into_iter().map(|c| (c, weight)))
    }

    /// Weight 1.0 for each of `A..=Z`.
    pub fn latin_uniform() -> Self {
        Self {
            weights: ('A'..='Z').map(|c| (c, 1.0)).collect(),
        }
    }

    /// `A..=Z` weighted by English frequency, normalised onto
    /// `[min_weight, max_weight]`.
    pub fn english_frequency(min_weight: f64, max_weight: f64) -> Result<Self> {
        check_range(min_weight, max_weight)?;
        let (min_freq, max_freq) = ENGLISH_FREQUENCY
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &f| {
                (lo.min(f), hi.max(f))
            });
        let span = max_freq - min_freq;
        let weights = ('A'..='Z')
            .zip(ENGLISH_FREQUENCY)
            .map(|(c, freq)| {
                let w = min_weight + (freq - min_freq) * (max_weight - min_weight) / span;
                (c, w)
            })
            .collect();
        debug!(min_weight, max_weight, "english frequency weights built");
        Ok(Self { weights })
    }

    pub fn from_scenario(scenario: WeightScenario) -> Result<Self> {
        match scenario {
            WeightScenario::Uniform => Ok(Self::latin_uniform()),
            WeightScenario::EnglishFrequency {
                min_weight,
                max_weight,
            } => Self::english_frequency(min_weight, max_weight),
        }
    }

    /// Weight for `symbol`, compared case-insensitively.
    #[inline]
    pub fn weight(&self, symbol: char) -> Option<f64> {
        self.weights.get(&fold_case(symbol)).copied()
    }

    #[inline]
    pub fn contains(&self, symbol: char) -> bool {
        self.weight(symbol).is_some()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Entries in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.weights.iter().map(|(&c, &w)| (c, w))
    }
}

/// Weights plus the flat mismatch penalty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scoring {
    weights: WeightTable,
    penalty: f64,
}

impl Scoring {
    pub fn new(weights: WeightTable, penalty: f64) -> Result<Self> {
        if !penalty.is_finite() || penalty < 0.0 {
            return Err(DpError::config(format!(
                "penalty must be finite and >= 0, got {penalty}"
            )));
        }
        Ok(Self { weights, penalty })
    }

    pub fn from_scenario(scenario: WeightScenario, penalty: f64) -> Result<Self> {
        Self::new(WeightTable::from_scenario(scenario)?, penalty)
    }

    #[inline]
    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    #[inline]
    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    /// Score contribution of aligning `a` with `b`, or `None` if a matched
    /// symbol has no weight.
    pub fn delta(&self, a: char, b: char) -> Option<f64> {
        if fold_case(a) == fold_case(b) {
            self.weights.weight(a)
        } else {
            Some(-self.penalty)
        }
    }
}

fn check_weight(symbol: char, weight: f64) -> Result<()> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(DpError::config(format!(
            "weight for {symbol:?} must be finite and > 0, got {weight}"
        )))
    }
}

fn check_range(min_weight: f64, max_weight: f64) -> Result<()> {
    if !(min_weight.is_finite() && max_weight.is_finite()) {
        return Err(DpError::config("weight range bounds must be finite"));
    }
    if min_weight <= 0.0 || max_weight <= 0.0 {
        return Err(DpError::config(format!(
            "weight range bounds must be > 0, got [{min_weight}, {max_weight}]"
        )));
    }
    if max_weight < min_weight {
        return Err(DpError::config(format!(
            "weight range is inverted: [{min_weight}, {max_weight}]"
        )));
    }
    Ok(())
}
