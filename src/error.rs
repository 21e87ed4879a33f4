//! Error types for the ledger processor.
//!
//! Processing itself never fails: per-transaction problems are reported as
//! rejections. `LedgerError` only covers the I/O surface of the binary.

use thiserror::Error;

/// Result type alias for operations that touch the outside world.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors raised while loading a snapshot or writing a result.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not well-formed JSON, or the result could not be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: ledger-processor <snapshot.json>")]
    MissingArgument,
}

/// Why a value could not be read as a finite number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    #[error("booleans are not numeric")]
    Boolean,

    #[error("value is null or missing")]
    Null,

    #[error("value is an empty string")]
    EmptyString,

    #[error("arrays and objects are not numeric")]
    NotScalar,

    #[error("'{0}' is not a finite number")]
    Unparseable(String),
}
