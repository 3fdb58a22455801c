//! Unified error types and result handling.

use thiserror::Error;

/// Every failure the estimate crate can report.
///
/// Numeric parsing is deliberately absent: malformed numbers degrade to zero
/// and never reach this type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// A row list is already at its ceiling
    #[error("Maximum {max} {kind} allowed to fit on one page")]
    RowLimit {
        /// Which list refused the row
        kind: RowKind,
        /// The configured ceiling
        max: usize,
    },

    /// An edit referenced a row that does not exist
    #[error("No {kind} with id {id}")]
    RowNotFound {
        /// Which list was searched
        kind: RowKind,
        /// The identifier that was not found
        id: u64,
    },

    /// A saved draft could not be read or parsed
    #[error("Draft error: {message}")]
    Draft {
        /// Human-readable description
        message: String,
    },

    /// A stored sequence value is not a valid counter
    #[error("Sequence '{key}' holds invalid value {value}")]
    InvalidSequenceValue {
        /// Sequence name
        key: String,
        /// Offending stored value
        value: i64,
    },

    /// The sequence store failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// The two row lists of an estimate form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Items being sold
    Sale,
    /// Old items accepted against the sale
    TradeIn,
}

impl std::fmt::Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sale => f.write_str("items"),
            Self::TradeIn => f.write_str("old items"),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
