//! Error types for storemeta wire values.

use thiserror::Error;

/// Errors raised while interpreting wire values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Unknown localization field name
    #[error("unknown localization field: {0}")]
    UnknownField(String),
}
