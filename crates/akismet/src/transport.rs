// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport
//!
//! Every operation is a form-encoded POST with the same headers. The
//! transport only moves bytes: it reports the status, body and the service's
//! advisory headers, and leaves interpretation to [`crate::protocol`].
//! Transport failures are returned as reqwest errors without retrying.

use std::{collections::BTreeMap, time::Duration};

use reqwest::{
    Client, ClientBuilder, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use tracing::{debug, instrument, warn};

use crate::{
    endpoints::{Endpoints, Operation},
    error::AkismetResult,
};

/// Header carrying the service's advice on a spam verdict
pub const PRO_TIP_HEADER: &str = "x-akismet-pro-tip";

/// Header carrying a human-readable explanation of an unexpected answer
pub const DEBUG_HELP_HEADER: &str = "x-akismet-debug-help";

/// Version of the compiler that built this crate
pub const RUSTC_VERSION: &str = env!("AKISMET_RUSTC_VERSION");

/// User-Agent sent with every request: `Rust/<rustc-version> | akismet/<version>`
pub fn user_agent() -> String {
    format!("Rust/{RUSTC_VERSION} | akismet/{}", env!("CARGO_PKG_VERSION"))
}

/// Raw answer to one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Body text, untrimmed
    pub body: String,
    /// Value of `X-akismet-pro-tip`, if sent
    pub pro_tip: Option<String>,
    /// Value of `X-akismet-debug-help`, if sent
    pub debug_help: Option<String>,
}

/// Shared HTTP client and endpoint templates
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoints: Endpoints,
    user_agent: String,
}

impl HttpTransport {
    /// Build a transport with the given endpoints and per-request timeout
    pub fn new(endpoints: Endpoints, timeout: Duration) -> AkismetResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/plain"));

        let user_agent = user_agent();
        let client = ClientBuilder::new()
            .timeout(timeout)
            .default_headers(headers)
            .user_agent(user_agent.clone())
            .build()?;

        debug!(
            timeout_secs = timeout.as_secs(),
            user_agent = %user_agent,
            "created Akismet HTTP transport"
        );

        Ok(Self {
            client,
            endpoints,
            user_agent,
        })
    }

    /// User-Agent header value
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Endpoint templates in use
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// POST `fields` to the endpoint of `operation`
    #[instrument(skip(self, api_key, fields), fields(operation = %operation))]
    pub async fn post(
        &self,
        operation: Operation,
        api_key: &str,
        fields: &BTreeMap<String, String>,
    ) -> AkismetResult<ServiceResponse> {
        let url = self.endpoints.url(operation, api_key)?;

        debug!(field_count = fields.len(), "sending Akismet request");

        let response = self.client.post(url).form(fields).send().await?;

        let status = response.status();
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let pro_tip = header(PRO_TIP_HEADER);
        let debug_help = header(DEBUG_HELP_HEADER);

        let body = response.text().await?;

        if status.is_success() {
            debug!(
                status = status.as_u16(),
                body_length = body.len(),
                "received Akismet response"
            );
        } else {
            warn!(status = status.as_u16(), "Akismet answered with non-success status");
        }

        Ok(ServiceResponse {
            status,
            body,
            pro_tip,
            debug_help,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_names_runtime_and_library() {
        let agent = user_agent();
        assert_eq!(
            agent,
            format!("Rust/{RUSTC_VERSION} | akismet/{}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn rustc_version_is_the_building_compiler() {
        let mut parts = RUSTC_VERSION.split(['.', '-']);
        let major = parts.next().unwrap();
        let minor = parts.next().unwrap();
        assert_eq!(major, "1");
        assert!(minor.parse::<u32>().unwrap() >= 89);
        assert!(parts.next().unwrap().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn transport_creation() {
        let transport =
            HttpTransport::new(Endpoints::default(), Duration::from_secs(5)).unwrap();
        assert_eq!(transport.user_agent(), user_agent());
        assert_eq!(transport.endpoints(), &Endpoints::default());
    }
}
