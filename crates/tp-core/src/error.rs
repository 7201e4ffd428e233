//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors produced while parsing or validating `tp-core` values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown traverse mode {0:?}")]
    UnknownMode(String),

    #[error("unknown street traversal permission {0:?}")]
    UnknownPermission(String),

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Shorthand result type for `tp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
