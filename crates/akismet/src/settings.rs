// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client settings
//!
//! Transport settings are layered with the `config` crate: serde defaults
//! first, then `AKISMET_`-prefixed variables. Credentials are resolved
//! separately, see [`crate::credentials`].

use std::time::Duration;

use config::{Config, Environment};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::{AkismetError, AkismetResult};

/// Prefix for settings variables, e.g. `AKISMET_TIMEOUT_SECONDS`
pub const SETTINGS_PREFIX: &str = "AKISMET";

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const MAX_TIMEOUT_SECONDS: u64 = 300;

/// A request timeout between 1 and 300 seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeoutSeconds(u64);

impl TimeoutSeconds {
    /// Create a new `TimeoutSeconds`, ensuring the value is within bounds
    pub fn new(seconds: u64) -> AkismetResult<Self> {
        if seconds == 0 {
            return Err(AkismetError::config("timeout must be greater than 0"));
        }
        if seconds > MAX_TIMEOUT_SECONDS {
            return Err(AkismetError::config(format!(
                "timeout cannot exceed {MAX_TIMEOUT_SECONDS}"
            )));
        }
        Ok(Self(seconds))
    }

    /// Get the timeout as a duration
    pub fn value(&self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for TimeoutSeconds {
    fn default() -> Self {
        Self(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl<'de> Deserialize<'de> for TimeoutSeconds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = u64::deserialize(deserializer)?;
        Self::new(seconds).map_err(|e| de::Error::custom(e.to_string()))
    }
}

/// Settings for the HTTP transport
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Per-request timeout
    #[serde(default)]
    pub timeout_seconds: TimeoutSeconds,
    /// Base URL to root every endpoint under, instead of the public service
    #[serde(default)]
    pub service_root: Option<String>,
}

impl ClientSettings {
    /// Load settings from `AKISMET_*` process environment variables
    pub fn load() -> AkismetResult<Self> {
        Self::build(Environment::with_prefix(SETTINGS_PREFIX))
    }

    /// Load settings from the given `AKISMET_*` variables only
    pub fn from_variables<K, V>(variables: impl IntoIterator<Item = (K, V)>) -> AkismetResult<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let variables = variables
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        Self::build(Environment::with_prefix(SETTINGS_PREFIX).source(Some(variables)))
    }

    fn build(environment: Environment) -> AkismetResult<Self> {
        let settings = Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Override the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: TimeoutSeconds) -> Self {
        self.timeout_seconds = timeout;
        self
    }

    /// Root every endpoint under `base`
    #[must_use]
    pub fn with_service_root(mut self, base: impl Into<String>) -> Self {
        self.service_root = Some(base.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_validation() {
        assert!(TimeoutSeconds::new(0).is_err());
        assert!(TimeoutSeconds::new(301).is_err());

        assert!(TimeoutSeconds::new(1).is_ok());
        assert!(TimeoutSeconds::new(300).is_ok());
        assert_eq!(TimeoutSeconds::default().value(), Duration::from_secs(10));
    }

    #[test]
    fn defaults_without_variables() {
        let settings = ClientSettings::from_variables(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn variables_override_defaults() {
        let settings = ClientSettings::from_variables([
            ("AKISMET_TIMEOUT_SECONDS", "25"),
            ("AKISMET_SERVICE_ROOT", "http://127.0.0.1:8080"),
            ("AKISMET_API_KEY", "ignored-here"),
        ])
        .unwrap();

        assert_eq!(settings.timeout_seconds.value(), Duration::from_secs(25));
        assert_eq!(
            settings.service_root.as_deref(),
            Some("http://127.0.0.1:8080")
        );
    }

    #[test]
    fn out_of_range_timeout_rejected() {
        let error = ClientSettings::from_variables([("AKISMET_TIMEOUT_SECONDS", "0")]).unwrap_err();
        assert!(error.is_configuration_error());

        let error =
            ClientSettings::from_variables([("AKISMET_TIMEOUT_SECONDS", "900")]).unwrap_err();
        assert!(error.is_configuration_error());
    }

    #[test]
    fn unprefixed_variables_ignored() {
        let settings = ClientSettings::from_variables([("TIMEOUT_SECONDS", "99")]).unwrap();
        assert_eq!(settings.timeout_seconds, TimeoutSeconds::default());
    }
}
