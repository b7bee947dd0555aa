//! Error handling for RotaryMill core types
//!
//! Errors raised while turning logical moves into motion commands.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Motion error type
///
/// Represents a move request the writer refuses to emit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The feed rate class is neither `standard` nor `rapid`
    #[error("Feed rate '{0}' not implemented")]
    UnknownFeedRate(String),

    /// A move without any axis
    #[error("Move must specify at least one of X, Y or Z")]
    EmptyPosition,
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
