// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Credential resolution
//!
//! A [`CredentialResolver`] walks an ordered list of [`CredentialSource`]s and
//! takes the first one that yields a complete key/site pair. The standard
//! order is explicit arguments, then the environment.
//!
//! Environment access goes through [`VariableLookup`] so callers and tests can
//! supply their own variables instead of touching the process environment.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

use tracing::debug;

use crate::{
    error::{AkismetError, AkismetResult},
    non_empty_string::NonEmptyString,
};

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "AKISMET_API_KEY";

/// Environment variable holding the registered site URL
pub const SITE_URL_VAR: &str = "AKISMET_SITE_URL";

/// A complete API key and site URL pair
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: NonEmptyString,
    site_url: NonEmptyString,
}

impl Credentials {
    /// Create credentials from values already known to be non-empty
    pub fn new(api_key: NonEmptyString, site_url: NonEmptyString) -> Self {
        Self { api_key, site_url }
    }

    /// Build credentials from raw optional values
    ///
    /// Returns `None` unless both values are present and non-blank.
    pub fn from_parts(
        api_key: Option<impl Into<String>>,
        site_url: Option<impl Into<String>>,
    ) -> Option<Self> {
        Some(Self {
            api_key: NonEmptyString::from_optional(api_key)?,
            site_url: NonEmptyString::from_optional(site_url)?,
        })
    }

    /// The API key
    pub fn api_key(&self) -> &str {
        self.api_key.as_str()
    }

    /// The registered site URL
    pub fn site_url(&self) -> &str {
        self.site_url.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("site_url", &self.site_url)
            .finish()
    }
}

/// Name to value lookups for configuration variables
pub trait VariableLookup: Send + Sync {
    /// Get the value of a variable, if set
    fn var(&self, name: &str) -> Option<String>;
}

/// Looks variables up in the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VariableLookup for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl VariableLookup for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl VariableLookup for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// A place credentials may come from
pub trait CredentialSource: fmt::Debug + Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &'static str;

    /// A complete pair, or `None` if this source cannot supply one
    fn credentials(&self) -> Option<Credentials>;
}

/// Credentials passed directly by the caller
#[derive(Clone, Default)]
pub struct ExplicitCredentials {
    api_key: Option<String>,
    site_url: Option<String>,
}

impl ExplicitCredentials {
    /// Create a source from optional caller-supplied values
    pub fn new(api_key: Option<String>, site_url: Option<String>) -> Self {
        Self { api_key, site_url }
    }
}

impl fmt::Debug for ExplicitCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplicitCredentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("site_url", &self.site_url)
            .finish()
    }
}

impl CredentialSource for ExplicitCredentials {
    fn name(&self) -> &'static str {
        "explicit arguments"
    }

    fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(self.api_key.clone(), self.site_url.clone())
    }
}

/// Credentials read from `AKISMET_API_KEY` and `AKISMET_SITE_URL`
pub struct EnvironmentCredentials {
    lookup: Box<dyn VariableLookup>,
}

impl EnvironmentCredentials {
    /// Read credentials through the given lookup
    pub fn new(lookup: impl VariableLookup + 'static) -> Self {
        Self {
            lookup: Box::new(lookup),
        }
    }

    /// Read credentials from the process environment
    pub fn process() -> Self {
        Self::new(ProcessEnv)
    }
}

impl fmt::Debug for EnvironmentCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentCredentials")
            .field("variables", &[API_KEY_VAR, SITE_URL_VAR])
            .finish_non_exhaustive()
    }
}

impl CredentialSource for EnvironmentCredentials {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(self.lookup.var(API_KEY_VAR), self.lookup.var(SITE_URL_VAR))
    }
}

/// Ordered list of credential sources, first complete pair wins
#[derive(Debug, Default)]
pub struct CredentialResolver {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialResolver {
    /// Create a resolver with no sources
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit values first, then the environment
    pub fn standard(explicit: ExplicitCredentials, environment: EnvironmentCredentials) -> Self {
        Self::new().with_source(explicit).with_source(environment)
    }

    /// Append a source with lower precedence than those already added
    #[must_use]
    pub fn with_source(mut self, source: impl CredentialSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Take credentials from the first source that supplies a complete pair
    ///
    /// # Errors
    ///
    /// Returns [`AkismetError::Configuration`] if no source does
    pub fn resolve(&self) -> AkismetResult<Credentials> {
        for source in &self.sources {
            if let Some(credentials) = source.credentials() {
                debug!(source = source.name(), "resolved Akismet credentials");
                return Ok(credentials);
            }
            debug!(source = source.name(), "no complete credentials");
        }

        let tried = self
            .sources
            .iter()
            .map(|source| source.name())
            .collect::<Vec<_>>()
            .join(", ");

        Err(AkismetError::config(format!(
            "no API key and site URL found (tried: {tried}); pass both explicitly or set \
             {API_KEY_VAR} and {SITE_URL_VAR}"
        )))
    }
}
