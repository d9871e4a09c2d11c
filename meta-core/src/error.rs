//! Error types for storemeta core logic.

use storemeta_types::LocalizationField;
use thiserror::Error;

/// Errors raised by local edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No record is loaded for the locale.
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    /// No primary locale is loaded yet.
    #[error("no primary locale loaded")]
    NoPrimaryLocale,

    /// The primary locale was named as a translation target.
    #[error("{0} is the primary locale")]
    PrimaryTarget(String),

    /// A record for the locale already exists.
    #[error("duplicate locale: {0}")]
    DuplicateLocale(String),

    /// A value exceeds the field's character limit.
    #[error("{field} is {len} characters, limit is {limit}")]
    FieldTooLong {
        /// Field being edited.
        field: LocalizationField,
        /// Maximum length in characters.
        limit: usize,
        /// Actual length in characters.
        len: usize,
    },
}
