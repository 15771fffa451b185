//! # Error Types
//!
//! Structured error types for drive_core. Binding failures are surfaced at
//! construction time so callers must handle a missing element instead of
//! carrying an inert binding around. Chart lookup misses are *not* errors:
//! they come back as sentinel results (see [`crate::charts`]).
//!
//! ## Example
//!
//! ```rust
//! use drive_core::errors::{CalcError, CalcResult};
//!
//! fn require_positive(field: &str, value: f64) -> CalcResult<()> {
//!     if value <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             field,
//!             value.to_string(),
//!             "must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for drive_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for binding and recompute operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A form field could not be bound (no element with the given name/id)
    #[error("Binding failed for '{name}': {reason}")]
    BindingFailed { name: String, reason: String },

    /// The engine dereferenced an input or output name that was never wired up
    #[error("Missing bound field: {name}")]
    MissingInput { name: String },

    /// An input value is invalid (wrong shape, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },
}

impl CalcError {
    /// Create a BindingFailed error
    pub fn binding_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::BindingFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingInput error
    pub fn missing_input(name: impl Into<String>) -> Self {
        CalcError::MissingInput { name: name.into() }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::BindingFailed { .. } => "BINDING_FAILED",
            CalcError::MissingInput { .. } => "MISSING_INPUT",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::binding_failed("motor-rpm", "no element with this name");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::missing_input("iex").error_code(),
            "MISSING_INPUT"
        );
        assert_eq!(
            CalcError::invalid_input("op-cycle", "abc", "not numeric").error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_error_display() {
        let error = CalcError::missing_input("t2n");
        assert_eq!(error.to_string(), "Missing bound field: t2n");
    }
}
