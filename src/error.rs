//! Unified error handling for the talon crate
//!
//! Domain-specific errors ([`ValidationError`], [`FetchError`],
//! [`ExtractError`]) are kept separate so components can expose precise
//! signatures, while the [`Error`] enum wraps them all for use across
//! module boundaries.

use std::io;
use thiserror::Error;

/// Errors from validating the patient identity at startup
///
/// These are fatal: a misconfigured patient is never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A name field did not match the required `Xxxx...` shape
    #[error("{field} must match the format \"Xxxx...\"")]
    InvalidName {
        /// Which patient field failed
        field: &'static str,
    },

    /// Birthday string could not be parsed as `dd.mm.yyyy`
    #[error("birthday date must match dd.mm.yyyy, got {0:?}")]
    InvalidBirthday(String),
}

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server error with status code
    #[error("server error: {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("request timeout")]
    Timeout,

    /// Maximum retry attempts exceeded
    #[error("maximum retry attempts exceeded")]
    MaxRetriesExceeded,

    /// Content decoding error
    #[error("decoding error: {0}")]
    Decode(String),
}

/// Errors raised when a confirmation page violates the expected structure
///
/// The remote contract for a claim response is a result `<body>` holding an
/// alert block with a status paragraph followed by a reason element. Any
/// missing piece is reported distinctly.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// Confirmation page has no result block
    #[error("confirmation page has no result block")]
    ResultBlockMissing,

    /// Result block has no alert section
    #[error("result block has no alert section")]
    AlertMissing,

    /// Alert section has no status paragraph
    #[error("alert section has no status paragraph")]
    StatusMissing,

    /// Status paragraph has no following reason element
    #[error("status paragraph has no reason element after it")]
    ReasonMissing,
}

/// Errors from one claim attempt against a specific slot
#[derive(Error, Debug)]
pub enum ClaimError {
    /// The claim request itself failed
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The confirmation page could not be read back
    #[error("malformed confirmation page: {0}")]
    Malformed(#[from] ExtractError),
}

/// Unified error type for the talon crate
#[derive(Error, Debug)]
pub enum Error {
    /// Patient identity validation failure
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP fetch failure
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Response structure violation
    #[error("extract error: {0}")]
    Extract(#[from] ExtractError),

    /// I/O errors (ticket log, config file)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<ClaimError> for Error {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::Fetch(e) => Self::Fetch(e),
            ClaimError::Malformed(e) => Self::Extract(e),
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
