// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client for the Akismet comment spam detection service
//!
//! This crate authenticates an Akismet account, submits comment metadata for
//! classification and reports misclassifications back to the service.
//!
//! # Architecture
//!
//! - [`credentials`]: ordered credential sources, explicit arguments before the environment
//! - [`settings`]: transport settings layered with the `config` crate
//! - [`endpoints`]: endpoint templates for the four remote operations
//! - [`transport`]: form-encoded POSTs over a shared reqwest client
//! - [`protocol`]: per-operation tables mapping response bodies to results
//! - [`client`]: the verified [`Akismet`] client and its builder
//! - [`error`]: configuration, API key, protocol and transport errors
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use akismet::{Akismet, Comment};
//!
//! # async fn example() -> Result<(), akismet::AkismetError> {
//! // Falls back to AKISMET_API_KEY / AKISMET_SITE_URL when arguments are absent
//! let akismet = Akismet::new(Some("abc123def456"), Some("https://example.com")).await?;
//!
//! let comment = Comment::new("203.0.113.7", "Mozilla/5.0")
//!     .author("viagra-test-123")
//!     .content("Buy now!")
//!     .test();
//!
//! if akismet.comment_check(&comment).await? {
//!     akismet.submit_spam(&comment).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod non_empty_string;
pub mod protocol;
pub mod settings;
pub mod transport;

pub use client::{ACCOUNT_FIELD, Akismet, AkismetBuilder, CheckOutcome};
pub use credentials::{
    API_KEY_VAR, CredentialResolver, CredentialSource, Credentials, EnvironmentCredentials,
    ExplicitCredentials, ProcessEnv, SITE_URL_VAR, VariableLookup,
};
pub use endpoints::{Endpoints, Operation};
pub use error::{AkismetError, AkismetResult};
pub use non_empty_string::NonEmptyString;
pub use protocol::SUBMIT_ACKNOWLEDGEMENT;
pub use settings::{ClientSettings, TimeoutSeconds};
pub use spam_filter::{
    Comment, CommentType, Feedback, FilterError, HealthStatus, SpamFilter, UserRole, Verdict,
};
pub use transport::{HttpTransport, RUSTC_VERSION, ServiceResponse, user_agent};
