//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for toolpath generation
//! and the motion commands it drives.

use rotarymill_core::CoreError;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CamToolError {
    /// The motion writer refused a move.
    #[error("Motion error: {0}")]
    Motion(#[from] CoreError),

    /// Invalid parameters were provided to a CAM tool.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A step of a program script could not be emitted.
    #[error("Script step {index} failed: {source}")]
    ScriptStep {
        /// Zero-based position of the step in the script.
        index: usize,
        /// The motion error raised by the step.
        source: CoreError,
    },
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
