// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for Akismet operations
//!
//! Configuration and key errors surface while building a client, before any
//! classification traffic is sent. Protocol errors surface at the call that
//! received the unexpected body. Transport errors are reqwest's own and are
//! passed through untouched.

use spam_filter::FilterError;
use thiserror::Error;

use crate::endpoints::Operation;

/// Result type alias for Akismet operations
pub type AkismetResult<T> = Result<T, AkismetError>;

/// Errors raised by the Akismet client
#[derive(Debug, Error)]
pub enum AkismetError {
    /// Credentials are missing from every configured source, or a setting is invalid
    #[error("Configuration error: {message}")]
    Configuration {
        /// What was missing or invalid
        message: String,
    },

    /// Credentials were found but the service rejected the API key
    #[error("API key rejected: {message}")]
    ApiKey {
        /// Which key/site pair was rejected
        message: String,
    },

    /// Response body outside the documented vocabulary for the operation
    #[error("Unexpected {operation} response (HTTP {status}): {body:?}")]
    Protocol {
        /// Operation that received the body
        operation: Operation,
        /// HTTP status of the response
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Request failed before a response body was read
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl AkismetError {
    /// Create a configuration error
    pub fn config<T: ToString>(message: T) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }

    /// Create an API key error
    pub fn api_key<T: ToString>(message: T) -> Self {
        Self::ApiKey {
            message: message.to_string(),
        }
    }

    /// Create a protocol error
    pub fn protocol(operation: Operation, status: u16, body: impl Into<String>) -> Self {
        Self::Protocol {
            operation,
            status,
            body: body.into(),
        }
    }

    /// Check if credentials were missing or settings invalid
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Check if the API key was rejected
    pub fn is_api_key_error(&self) -> bool {
        matches!(self, Self::ApiKey { .. })
    }

    /// Check if the service answered outside its documented vocabulary
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::Protocol { .. })
    }

    /// Check if the request failed at the transport layer
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<config::ConfigError> for AkismetError {
    fn from(error: config::ConfigError) -> Self {
        Self::config(format!("invalid client settings: {error}"))
    }
}

impl From<AkismetError> for FilterError {
    fn from(value: AkismetError) -> Self {
        match value {
            AkismetError::Configuration { message } => FilterError::Configuration { message },
            AkismetError::ApiKey { message } => FilterError::Authentication { message },
            protocol @ AkismetError::Protocol { .. } => FilterError::Protocol {
                message: protocol.to_string(),
            },
            AkismetError::Transport(error) => FilterError::Http {
                message: error.to_string(),
            },
        }
    }
}
