//! Error types for the Severance Settlement Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing a settlement.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single problem found with one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// The name of the offending field (e.g. `contract_end`).
    pub field: String,
    /// A description of what is wrong with the field.
    pub message: String,
}

impl FieldIssue {
    /// Creates a new field issue.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.field, self.message)
    }
}

/// Rejected input, carrying every offending field found in one pass.
///
/// # Example
///
/// ```
/// use severance_engine::error::{FieldIssue, ValidationError};
///
/// let error = ValidationError::new(vec![
///     FieldIssue::new("gross_monthly_salary", "must not be negative"),
/// ]);
/// assert_eq!(
///     error.to_string(),
///     "Invalid input: 'gross_monthly_salary': must not be negative"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The issues found, in field order.
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Creates a validation error from a list of issues.
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    /// Returns true if the given field was reported.
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    /// Returns the names of all reported fields.
    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid input: ")?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The main error type for the Severance Settlement Engine.
///
/// # Example
///
/// ```
/// use severance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/statute.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/statute.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The termination input was malformed or out of range.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An internal invariant failed despite valid input.
    #[error("Computation error: {message}")]
    Computation {
        /// A description of the violated invariant.
        message: String,
    },

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

    /// Configuration parsed but holds inconsistent statutory values.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Computation`] error.
    pub fn computation(message: impl Into<String>) -> Self {
        EngineError::Computation {
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::InvalidConfig`] error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        EngineError::InvalidConfig {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
