//! # Error Types
//!
//! Structured error types for wb_core. Every variant carries enough context
//! for a caller (CLI, print boundary, or a JSON consumer) to report the
//! problem without re-deriving it.
//!
//! ## Example
//!
//! ```rust
//! use wb_core::errors::{WbError, WbResult};
//!
//! fn validate_count(count: usize) -> WbResult<()> {
//!     if count == 0 {
//!         return Err(WbError::InvalidInput {
//!             field: "count_per_type".to_string(),
//!             value: count.to_string(),
//!             reason: "At least one question per type is required".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wb_core operations
pub type WbResult<T> = Result<T, WbError>;

/// Structured error type for weight & balance operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum WbError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A formula was asked to divide by zero (zero weight, ballast arm at target CG)
    #[error("Degenerate division in {operation}: {reason}")]
    DegenerateDivision { operation: String, reason: String },

    /// A question type name could not be parsed
    #[error("Unknown question type: {name}")]
    UnknownQuestionType { name: String },

    /// The randomizer could not produce a usable scenario within its attempt budget
    #[error("No usable {question_type} scenario after {attempts} attempts")]
    ScenarioExhausted { question_type: String, attempts: u32 },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl WbError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        WbError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DegenerateDivision error
    pub fn degenerate_division(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        WbError::DegenerateDivision {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownQuestionType error
    pub fn unknown_question_type(name: impl Into<String>) -> Self {
        WbError::UnknownQuestionType { name: name.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        WbError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if retrying the same call can succeed (fresh randomness)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, WbError::ScenarioExhausted { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            WbError::InvalidInput { .. } => "INVALID_INPUT",
            WbError::DegenerateDivision { .. } => "DEGENERATE_DIVISION",
            WbError::UnknownQuestionType { .. } => "UNKNOWN_QUESTION_TYPE",
            WbError::ScenarioExhausted { .. } => "SCENARIO_EXHAUSTED",
            WbError::FileError { .. } => "FILE_ERROR",
            WbError::SerializationError { .. } => "SERIALIZATION_ERROR",
            WbError::VersionMismatch { .. } => "VERSION_MISMATCH",
            WbError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
