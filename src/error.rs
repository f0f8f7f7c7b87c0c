//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while managing employees and
//! computing pay.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Every engine operation returns this error type. None of the variants are
/// fatal: callers may re-prompt, retry or abandon the operation.
///
/// # Example
///
/// ```
/// use paysphere::error::EngineError;
///
/// let error = EngineError::NotFound {
///     id: "IT-F-0001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: IT-F-0001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A field failed validation.
    #[error("Invalid value for '{field}': {reason}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        reason: String,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {id}")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// An identifier collides with one that was already issued.
    #[error("Duplicate employee identifier: {id}")]
    DuplicateIdentifier {
        /// The colliding identifier.
        id: String,
    },

    /// A payslip input was negative.
    #[error("Invalid input for '{field}': value cannot be negative")]
    InvalidInput {
        /// The payslip input that was rejected.
        field: String,
    },

    /// A computed amount exceeded the representable decimal range.
    #[error("Amount out of range while computing '{field}'")]
    AmountOverflow {
        /// The amount that could not be computed.
        field: String,
    },

    /// All four-digit sequence numbers have been issued.
    #[error("Identifier sequence exhausted: no sequence numbers left below 10000")]
    IdentifierExhausted,

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::Validation`] for `field`.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Builds a [`EngineError::AmountOverflow`] for `field`.
    pub fn overflow(field: impl Into<String>) -> Self {
        Self::AmountOverflow {
            field: field.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
