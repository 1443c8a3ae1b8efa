//! Error types for circdesk-core.

use thiserror::Error;

/// Result type alias for circdesk-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Integrity errors raised by circulation operations.
///
/// Refused checkouts are not errors; see [`crate::CheckoutOutcome`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// An item was returned that has no active borrowing.
    #[error("item {0} is not checked out")]
    NotCheckedOut(String),

    /// A category value outside Book, Audio and Video.
    #[error("unknown item category: {0}")]
    UnknownCategory(String),

    /// Date text not in `YYYY-MM-DD` form.
    #[error("invalid date string \"{0}\"")]
    InvalidDate(String),

    /// A date was supplied as something other than a date or a string.
    #[error("date must be a string or a date, got {0}")]
    InvalidDateType(String),
}
