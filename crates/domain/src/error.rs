//! Error types for the domain crate.

use thiserror::Error;

/// Errors raised while interpreting backend values for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The name does not start with a 14-digit `YYYYMMDDhhmmss` prefix.
    #[error("missing timestamp prefix in `{0}`")]
    MissingTimestamp(String),

    /// The 14-digit prefix is not a valid calendar date and time.
    #[error("invalid timestamp prefix `{0}`")]
    InvalidTimestamp(String),

    /// The value is not valid base64.
    #[error("invalid base64 value `{0}`")]
    InvalidBase64(String),
}
