// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs, dead_code)]

//! Akismet test fixtures
//!
//! Mock responses modelled on the service's documented test signatures:
//! the author `viagra-test-123` is always spam and the role `administrator`
//! is always ham.

use std::collections::HashMap;

use akismet::{Akismet, Comment, Endpoints, SUBMIT_ACKNOWLEDGEMENT};
use url::form_urlencoded;
use wiremock::{
    Match, Mock, MockServer, Request, ResponseTemplate,
    matchers::{body_string_contains, method, path},
};

pub const VALID_KEY: &str = "valid-key";
pub const SITE_URL: &str = "http://example.com";
pub const SPAM_AUTHOR: &str = "viagra-test-123";

/// Plain-text 200 response
pub fn text(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(body)
}

/// Path of a keyed endpoint under a mock server root
pub fn keyed_path(operation: &str) -> String {
    format!("/{VALID_KEY}/1.1/{operation}")
}

/// A comment carrying the guaranteed-spam signature
pub fn spam_comment() -> Comment {
    Comment::new("127.0.0.1", "Mozilla").author(SPAM_AUTHOR).test()
}

/// A comment carrying the guaranteed-ham signature
pub fn ham_comment() -> Comment {
    Comment::new("127.0.0.1", "Mozilla")
        .user_role("administrator")
        .test()
}

/// Matches when a form field occurs exactly once with the given value
#[derive(Debug)]
pub struct FormField {
    name: String,
    value: String,
}

impl FormField {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

impl Match for FormField {
    fn matches(&self, request: &Request) -> bool {
        let values = form_urlencoded::parse(&request.body)
            .filter(|(name, _)| *name == self.name)
            .map(|(_, value)| value.into_owned())
            .collect::<Vec<_>>();
        values == [self.value.clone()]
    }
}

/// Mock Akismet service
#[derive(Debug)]
pub struct AkismetFixture;

impl AkismetFixture {
    /// Start a server answering every operation the way the real service does
    pub async fn start() -> MockServer {
        let mock_server = MockServer::start().await;
        Self::mount_verify_key(&mock_server).await;
        Self::mount_comment_check(&mock_server).await;
        Self::mount_submissions(&mock_server).await;
        mock_server
    }

    /// `valid` for [`VALID_KEY`], `invalid` for anything else
    pub async fn mount_verify_key(mock_server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/1.1/verify-key"))
            .and(FormField::new("key", VALID_KEY))
            .respond_with(text("valid"))
            .mount(mock_server)
            .await;

        // Catch-all must be last
        Mock::given(method("POST"))
            .and(path("/1.1/verify-key"))
            .respond_with(text("invalid"))
            .mount(mock_server)
            .await;
    }

    /// `true` for the spam signature, `false` for the ham signature
    pub async fn mount_comment_check(mock_server: &MockServer) {
        Mock::given(method("POST"))
            .and(path(keyed_path("comment-check")))
            .and(body_string_contains(format!("comment_author={SPAM_AUTHOR}")))
            .respond_with(text("true"))
            .mount(mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path(keyed_path("comment-check")))
            .and(body_string_contains("user_role=administrator"))
            .respond_with(text("false"))
            .mount(mock_server)
            .await;
    }

    /// Acknowledge every submission
    pub async fn mount_submissions(mock_server: &MockServer) {
        for operation in ["submit-spam", "submit-ham"] {
            Mock::given(method("POST"))
                .and(path(keyed_path(operation)))
                .respond_with(text(SUBMIT_ACKNOWLEDGEMENT))
                .mount(mock_server)
                .await;
        }
    }

    /// Build a verified client against `mock_server`
    pub async fn client(mock_server: &MockServer) -> Akismet {
        Akismet::builder()
            .credentials(Some(VALID_KEY.to_string()), Some(SITE_URL.to_string()))
            .environment(HashMap::new())
            .endpoints(Endpoints::under(&mock_server.uri()).unwrap())
            .build()
            .await
            .unwrap()
    }
}
