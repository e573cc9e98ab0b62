//! Error types for the filter submitter.
//!
//! # Design
//!
//! - Constant messages; context lives in structured fields so callers can log them as-is.
//! - Absent forms and absent controls are not errors and never reach this type.

use thiserror::Error;

use crate::submitter::SubmitPath;

/// Result alias for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors raised while configuring or driving the filter form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A configuration override was rejected.
    #[error("invalid filter configuration")]
    InvalidConfig {
        /// Configuration field the override targeted.
        field: &'static str,
        /// Offending value when available.
        value: Option<String>,
        /// Machine-readable reason for the rejection.
        reason: &'static str,
    },
    /// The host rejected the submission primitive.
    #[error("form submission failed")]
    Submit {
        /// Submission path that was attempted.
        path: SubmitPath,
        /// Host-provided failure detail.
        detail: String,
    },
    /// A host call other than submission failed.
    #[error("form host operation failed")]
    Host {
        /// Host operation that failed.
        operation: &'static str,
        /// Host-provided failure detail.
        detail: String,
    },
}

impl FilterError {
    /// Build an [`FilterError::InvalidConfig`] for a rejected override.
    #[must_use]
    pub fn invalid_config(field: &'static str, value: Option<&str>, reason: &'static str) -> Self {
        Self::InvalidConfig {
            field,
            value: value.map(str::to_string),
            reason,
        }
    }

    /// Build a [`FilterError::Submit`] from a host failure.
    #[must_use]
    pub fn submit(path: SubmitPath, detail: impl Into<String>) -> Self {
        Self::Submit {
            path,
            detail: detail.into(),
        }
    }

    /// Build a [`FilterError::Host`] from a host failure.
    #[must_use]
    pub fn host(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::Host {
            operation,
            detail: detail.into(),
        }
    }
}
