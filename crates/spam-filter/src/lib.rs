// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Provider-neutral spam filter traits and comment types
//!
//! This crate describes what a comment spam filter does without tying callers
//! to a particular service.
//!
//! # Core Abstractions
//!
//! - **`SpamFilter` Trait**: classify a comment and report misclassifications
//! - **Comment Model**: [`Comment`] with required submitter fields, optional metadata and pass-through extras
//! - **Verdicts**: [`Verdict`] and [`Feedback`]
//! - **Health**: [`HealthStatus`] with `Up`, `Degraded` and `Down`
//! - **Error Handling**: [`FilterError`] shared by every implementation

use thiserror::Error;

pub mod comment;
pub mod health;
pub mod verdict;

pub use comment::{Comment, CommentType, UserRole};
pub use health::HealthStatus;
pub use verdict::{Feedback, Verdict};

/// Common interface for comment spam filters
///
/// Implementations hold no per-call state, so one instance can serve
/// concurrent callers.
pub trait SpamFilter: Send + Sync {
    /// Check that the filter is reachable and its credentials are accepted
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached
    fn health_check(&self) -> impl Future<Output = Result<HealthStatus, FilterError>> + Send;

    /// Classify a comment
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if the comment is spam
    /// * `Ok(false)` if the comment is legitimate
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service answers outside
    /// its documented vocabulary
    fn comment_check(
        &self,
        comment: &Comment,
    ) -> impl Future<Output = Result<bool, FilterError>> + Send;

    /// Report a comment the filter missed as spam
    ///
    /// This trains the remote model. Retrying after an ambiguous failure may
    /// submit the same comment twice.
    fn submit_spam(&self, comment: &Comment)
    -> impl Future<Output = Result<bool, FilterError>> + Send;

    /// Report a comment the filter wrongly flagged as legitimate
    ///
    /// Same retry caveat as [`SpamFilter::submit_spam`].
    fn submit_ham(&self, comment: &Comment)
    -> impl Future<Output = Result<bool, FilterError>> + Send;

    /// Get the name/identifier of this filter
    fn name(&self) -> &'static str;
}

/// Common errors that can occur when working with spam filters
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum FilterError {
    /// Filter could not be configured
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Credentials were rejected
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Response body outside the documented vocabulary
    #[error("Unexpected response: {message}")]
    Protocol { message: String },

    /// Request never produced a response
    #[error("HTTP request failed: {message}")]
    Http { message: String },
}

impl FilterError {
    /// Check if this error signals a broken service contract
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, FilterError::Protocol { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_protocol_errors_are_protocol_errors() {
        let errors = [
            FilterError::Configuration {
                message: "missing key".to_string(),
            },
            FilterError::Authentication {
                message: "rejected".to_string(),
            },
            FilterError::Protocol {
                message: "unexpected body".to_string(),
            },
            FilterError::Http {
                message: "connection refused".to_string(),
            },
        ];

        for error in &errors {
            let expected = match error {
                FilterError::Protocol { .. } => true,
                FilterError::Configuration { .. }
                | FilterError::Authentication { .. }
                | FilterError::Http { .. } => false,
            };
            assert_eq!(error.is_protocol_error(), expected, "{error}");
        }
    }

    #[test]
    fn error_display() {
        let error = FilterError::Authentication {
            message: "key rejected".to_string(),
        };
        assert_eq!(error.to_string(), "Authentication failed: key rejected");
    }
}
