// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Akismet API client
//!
//! An [`Akismet`] value only exists once its credentials have been resolved
//! and the service has confirmed the key, so every classification call runs
//! against a verified account.

use std::{collections::BTreeMap, time::Instant};

use spam_filter::{Comment, Feedback, FilterError, HealthStatus, SpamFilter, Verdict};
use tracing::{debug, info, instrument, warn};

use crate::{
    credentials::{
        CredentialResolver, Credentials, EnvironmentCredentials, ExplicitCredentials,
        VariableLookup,
    },
    endpoints::{Endpoints, Operation},
    error::{AkismetError, AkismetResult},
    protocol::{self, COMMENT_CHECK, VERIFY_KEY},
    settings::ClientSettings,
    transport::HttpTransport,
};

/// Wire name of the field identifying the account's site
pub const ACCOUNT_FIELD: &str = "blog";

/// Pro-tip value the service sends for spam that needs no review
const DISCARD_PRO_TIP: &str = "discard";

/// Detailed result of a comment check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Classification of the comment
    pub verdict: Verdict,
    /// Explanation sent by the service, if any
    pub debug_help: Option<String>,
}

/// Builder that resolves credentials and verifies the key
#[derive(Debug, Default)]
pub struct AkismetBuilder {
    explicit: ExplicitCredentials,
    environment: Option<EnvironmentCredentials>,
    settings: ClientSettings,
    endpoints: Option<Endpoints>,
}

impl AkismetBuilder {
    /// Start with no explicit credentials, the process environment and default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Use explicit credentials; both must be non-blank to take precedence
    #[must_use]
    pub fn credentials(mut self, api_key: Option<String>, site_url: Option<String>) -> Self {
        self.explicit = ExplicitCredentials::new(api_key, site_url);
        self
    }

    /// Read fallback credentials through `lookup` instead of the process environment
    #[must_use]
    pub fn environment(mut self, lookup: impl VariableLookup + 'static) -> Self {
        self.environment = Some(EnvironmentCredentials::new(lookup));
        self
    }

    /// Use the given transport settings
    #[must_use]
    pub fn settings(mut self, settings: ClientSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Use explicit endpoints, overriding any service root in the settings
    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Resolve credentials, verify the key and return a ready client
    ///
    /// # Errors
    ///
    /// - [`AkismetError::Configuration`] if no source supplies a complete
    ///   key/site pair or the settings are invalid
    /// - [`AkismetError::ApiKey`] if the service reports the key invalid
    /// - [`AkismetError::Protocol`] if verification answers outside `valid`/`invalid`
    /// - [`AkismetError::Transport`] if the verification request fails
    pub async fn build(self) -> AkismetResult<Akismet> {
        let credentials = CredentialResolver::standard(
            self.explicit,
            self.environment.unwrap_or_else(EnvironmentCredentials::process),
        )
        .resolve()?;

        let endpoints = match (self.endpoints, &self.settings.service_root) {
            (Some(endpoints), _) => endpoints,
            (None, Some(root)) => Endpoints::under(root)?,
            (None, None) => Endpoints::default(),
        };
        let transport = HttpTransport::new(endpoints, self.settings.timeout_seconds.value())?;

        let valid =
            Akismet::verify_key_with(&transport, credentials.api_key(), credentials.site_url())
                .await?;
        if !valid {
            warn!(site_url = credentials.site_url(), "Akismet rejected the API key");
            return Err(AkismetError::api_key(format!(
                "the service reports the key for {} as invalid",
                credentials.site_url()
            )));
        }

        info!(site_url = credentials.site_url(), "Akismet client ready");

        Ok(Akismet {
            credentials,
            transport,
        })
    }
}

/// Client for a verified Akismet account
#[derive(Debug, Clone)]
pub struct Akismet {
    credentials: Credentials,
    transport: HttpTransport,
}

impl Akismet {
    /// Create a client from explicit values, falling back to the process environment
    ///
    /// Transport settings are read from `AKISMET_*` variables, see
    /// [`ClientSettings::load`].
    pub async fn new(api_key: Option<&str>, site_url: Option<&str>) -> AkismetResult<Self> {
        Self::builder()
            .credentials(api_key.map(str::to_string), site_url.map(str::to_string))
            .settings(ClientSettings::load()?)
            .build()
            .await
    }

    /// Start building a client
    pub fn builder() -> AkismetBuilder {
        AkismetBuilder::new()
    }

    /// The verified API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// The registered site URL sent with every request
    pub fn site_url(&self) -> &str {
        self.credentials.site_url()
    }

    /// User-Agent header sent with every request
    pub fn user_agent(&self) -> &str {
        self.transport.user_agent()
    }

    /// Ask the service whether a key is registered for a site
    ///
    /// # Returns
    ///
    /// * `Ok(true)` for `valid`
    /// * `Ok(false)` for `invalid`
    ///
    /// # Errors
    ///
    /// Returns [`AkismetError::Protocol`] for any other body
    pub async fn verify_key(&self, api_key: &str, site_url: &str) -> AkismetResult<bool> {
        Self::verify_key_with(&self.transport, api_key, site_url).await
    }

    /// [`Akismet::verify_key`] without a verified client
    #[instrument(skip(transport, api_key))]
    pub async fn verify_key_with(
        transport: &HttpTransport,
        api_key: &str,
        site_url: &str,
    ) -> AkismetResult<bool> {
        let fields = BTreeMap::from([
            ("key".to_string(), api_key.to_string()),
            (ACCOUNT_FIELD.to_string(), site_url.to_string()),
        ]);

        let response = transport.post(Operation::VerifyKey, api_key, &fields).await?;
        let valid = VERIFY_KEY
            .classify(response.status.as_u16(), &response.body)
            .inspect_err(|e| {
                warn!(error = %e, debug_help = ?response.debug_help, "unexpected verify-key response");
            })?;

        debug!(valid, "verified Akismet key");
        Ok(valid)
    }

    /// Fields sent for `comment`, with the account's site URL forced in
    pub fn request_fields(&self, comment: &Comment) -> BTreeMap<String, String> {
        let mut fields = comment.to_fields();
        fields.insert(ACCOUNT_FIELD.to_string(), self.site_url().to_string());
        fields
    }

    /// Classify a comment
    ///
    /// Set [`Comment::is_test`] while testing so the service does not learn
    /// from the request.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if the body is `true` (spam)
    /// * `Ok(false)` if the body is `false`
    ///
    /// # Errors
    ///
    /// Returns [`AkismetError::Protocol`] for any other body
    pub async fn comment_check(&self, comment: &Comment) -> AkismetResult<bool> {
        Ok(self.comment_check_verdict(comment).await?.verdict.is_spam())
    }

    /// Classify a comment, keeping the service's discard advice and debug help
    #[instrument(skip(self, comment), fields(is_test = comment.is_test))]
    pub async fn comment_check_verdict(&self, comment: &Comment) -> AkismetResult<CheckOutcome> {
        let response = self
            .transport
            .post(Operation::CommentCheck, self.api_key(), &self.request_fields(comment))
            .await?;

        let is_spam = COMMENT_CHECK
            .classify(response.status.as_u16(), &response.body)
            .inspect_err(|e| {
                warn!(error = %e, debug_help = ?response.debug_help, "unexpected comment-check response");
            })?;

        let verdict = match (is_spam, response.pro_tip.as_deref()) {
            (true, Some(DISCARD_PRO_TIP)) => Verdict::BlatantSpam,
            (is_spam, _) => Verdict::from(is_spam),
        };

        debug!(?verdict, "classified comment");
        Ok(CheckOutcome {
            verdict,
            debug_help: response.debug_help,
        })
    }

    /// Report a comment the service missed as spam
    ///
    /// This trains the service. Blind retries may train it twice on the
    /// same comment.
    ///
    /// # Errors
    ///
    /// Returns [`AkismetError::Protocol`] unless the body is the acknowledgement
    pub async fn submit_spam(&self, comment: &Comment) -> AkismetResult<bool> {
        self.submit(Feedback::Spam, comment).await
    }

    /// Report a comment the service wrongly flagged
    ///
    /// Same training caveat as [`Akismet::submit_spam`].
    ///
    /// # Errors
    ///
    /// Returns [`AkismetError::Protocol`] unless the body is the acknowledgement
    pub async fn submit_ham(&self, comment: &Comment) -> AkismetResult<bool> {
        self.submit(Feedback::Ham, comment).await
    }

    #[instrument(skip(self, comment), fields(is_test = comment.is_test))]
    async fn submit(&self, feedback: Feedback, comment: &Comment) -> AkismetResult<bool> {
        let table = protocol::feedback_table(feedback);
        let response = self
            .transport
            .post(table.operation(), self.api_key(), &self.request_fields(comment))
            .await?;

        let acknowledged = table
            .classify(response.status.as_u16(), &response.body)
            .inspect_err(|e| warn!(error = %e, "unexpected submission response"))?;

        info!(?feedback, "submitted feedback to Akismet");
        Ok(acknowledged)
    }

    /// Re-verify the configured key
    ///
    /// `valid` is `Up`, `invalid` is `Down`, and any other body is
    /// `Degraded`. Transport failures are returned as errors.
    pub async fn health(&self) -> AkismetResult<HealthStatus> {
        let start_time = Instant::now();
        let status = match self.verify_key(self.api_key(), self.site_url()).await {
            Ok(true) => HealthStatus::Up,
            Ok(false) => HealthStatus::Down {
                reason: "API key no longer accepted".to_string(),
            },
            Err(error @ AkismetError::Protocol { .. }) => HealthStatus::Degraded {
                reason: error.to_string(),
            },
            Err(error) => return Err(error),
        };

        info!(
            status = status.description(),
            elapsed_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Akismet health check finished"
        );
        Ok(status)
    }
}

impl SpamFilter for Akismet {
    async fn health_check(&self) -> Result<HealthStatus, FilterError> {
        Ok(self.health().await?)
    }

    async fn comment_check(&self, comment: &Comment) -> Result<bool, FilterError> {
        Ok(Akismet::comment_check(self, comment).await?)
    }

    async fn submit_spam(&self, comment: &Comment) -> Result<bool, FilterError> {
        Ok(Akismet::submit_spam(self, comment).await?)
    }

    async fn submit_ham(&self, comment: &Comment) -> Result<bool, FilterError> {
        Ok(Akismet::submit_ham(self, comment).await?)
    }

    fn name(&self) -> &'static str {
        "akismet"
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[tokio::test]
    async fn missing_credentials_fail_before_any_request() {
        // Nothing listens on the discard port; reaching it would be a transport error.
        let error = Akismet::builder()
            .environment(HashMap::new())
            .endpoints(Endpoints::under("http://127.0.0.1:9").unwrap())
            .build()
            .await
            .unwrap_err();

        assert!(error.is_configuration_error());
    }

    #[tokio::test]
    async fn invalid_service_root_is_configuration_error() {
        let error = Akismet::builder()
            .credentials(Some("key".to_string()), Some("http://example.com".to_string()))
            .environment(HashMap::new())
            .settings(ClientSettings::default().with_service_root("::not a url::"))
            .build()
            .await
            .unwrap_err();

        assert!(error.is_configuration_error());
    }
}
