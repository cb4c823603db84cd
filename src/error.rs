//! Error types shared by the DP engines and their configuration.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DpError>;

/// Which input sequence a symbol came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceId {
    First,
    Second,
}

impl std::fmt::Display for SequenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceId::First => f.write_str("s1"),
            SequenceId::Second => f.write_str("s2"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DpError {
    #[error("symbol {symbol:?} at {sequence}[{position}] has no entry in the weight table")]
    UnknownSymbol {
        symbol: char,
        sequence: SequenceId,
        position: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("ragged grid: row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("scan cancelled before row {row}")]
    Cancelled { row: usize },
}

impl DpError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        DpError::InvalidConfiguration(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_symbol_message_names_location() {
        let err = DpError::UnknownSymbol {
            symbol: '#',
            sequence: SequenceId::Second,
            position: 4,
        };
        assert_eq!(
            err.to_string(),
            "symbol '#' at s2[4] has no entry in the weight table"
        );
    }

    #[test]
    fn config_helper_wraps_message() {
        let err = DpError::config("penalty must be >= 0");
        assert_eq!(err, DpError::InvalidConfiguration("penalty must be >= 0".into()));
    }
}
