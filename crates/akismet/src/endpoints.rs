// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Service endpoints
//!
//! Endpoint roots are templates that may contain [`API_KEY_PLACEHOLDER`].
//! The public service puts the key in the host name for every operation
//! except verify-key.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AkismetError, AkismetResult};

/// Placeholder replaced by the account key when rendering an endpoint
pub const API_KEY_PLACEHOLDER: &str = "{api_key}";

const DEFAULT_VERIFY_ROOT: &str = "https://rest.akismet.com/1.1";
const DEFAULT_KEYED_ROOT: &str = "https://{api_key}.rest.akismet.com/1.1";
const API_VERSION: &str = "1.1";

/// Remote operations offered by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Check that a key is registered and active
    VerifyKey,
    /// Classify a comment
    CommentCheck,
    /// Report missed spam
    SubmitSpam,
    /// Report a false positive
    SubmitHam,
}

impl Operation {
    /// Path segment of the operation's endpoint
    pub fn path(&self) -> &'static str {
        match self {
            Operation::VerifyKey => "verify-key",
            Operation::CommentCheck => "comment-check",
            Operation::SubmitSpam => "submit-spam",
            Operation::SubmitHam => "submit-ham",
        }
    }

    /// Whether the endpoint URL is templated with the account key
    pub fn is_keyed(&self) -> bool {
        !matches!(self, Operation::VerifyKey)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Endpoint roots for the four operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    verify_root: String,
    keyed_root: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_VERIFY_ROOT, DEFAULT_KEYED_ROOT)
    }
}

impl Endpoints {
    /// Create endpoints from explicit root templates
    pub fn new(verify_root: impl Into<String>, keyed_root: impl Into<String>) -> Self {
        Self {
            verify_root: verify_root.into(),
            keyed_root: keyed_root.into(),
        }
    }

    /// Root every endpoint below `base`, with the key as a path segment
    ///
    /// `http://localhost:8080` gives `http://localhost:8080/1.1/verify-key`
    /// and `http://localhost:8080/{api_key}/1.1/comment-check`.
    pub fn under(base: &str) -> AkismetResult<Self> {
        let base = Url::parse(base)
            .map_err(|e| AkismetError::config(format!("invalid service root {base:?}: {e}")))?;
        let root = base.as_str().trim_end_matches('/');

        Ok(Self::new(
            format!("{root}/{API_VERSION}"),
            format!("{root}/{API_KEY_PLACEHOLDER}/{API_VERSION}"),
        ))
    }

    /// Render the URL of `operation` for the given key
    ///
    /// Keys are limited to ASCII letters, digits and `-` so a key can only
    /// ever fill a single host label or path segment.
    pub fn url(&self, operation: Operation, api_key: &str) -> AkismetResult<Url> {
        let root = if operation.is_keyed() {
            if !is_label(api_key) {
                return Err(AkismetError::config(format!(
                    "cannot build {operation} endpoint: API key must be ASCII letters, digits \
                     or '-'"
                )));
            }
            &self.keyed_root
        } else {
            &self.verify_root
        };
        let rendered = format!(
            "{}/{}",
            root.replace(API_KEY_PLACEHOLDER, api_key)
                .trim_end_matches('/'),
            operation.path()
        );

        Url::parse(&rendered).map_err(|e| {
            AkismetError::config(format!("cannot build {operation} endpoint: {e}"))
        })
    }
}

fn is_label(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}
