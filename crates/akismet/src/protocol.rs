// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Response vocabularies
//!
//! Each operation answers with a plain-text body drawn from a small fixed
//! vocabulary. A [`ResponseTable`] maps each expected literal to its result.
//! Bodies are trimmed and then matched exactly; anything else is a
//! [`AkismetError::Protocol`] and is never coerced into a result.

use spam_filter::Feedback;

use crate::{
    endpoints::Operation,
    error::{AkismetError, AkismetResult},
};

/// Body returned by the submit endpoints on success
pub const SUBMIT_ACKNOWLEDGEMENT: &str = "Thanks for making the web a better place.";

/// Literal to result mapping for one operation
#[derive(Debug)]
pub struct ResponseTable<T: 'static> {
    operation: Operation,
    arms: &'static [(&'static str, T)],
}

/// `valid` or `invalid`
pub const VERIFY_KEY: ResponseTable<bool> = ResponseTable {
    operation: Operation::VerifyKey,
    arms: &[("valid", true), ("invalid", false)],
};

/// `true` (spam) or `false` (ham)
pub const COMMENT_CHECK: ResponseTable<bool> = ResponseTable {
    operation: Operation::CommentCheck,
    arms: &[("true", true), ("false", false)],
};

/// Acknowledgement only
pub const SUBMIT_SPAM: ResponseTable<bool> = ResponseTable {
    operation: Operation::SubmitSpam,
    arms: &[(SUBMIT_ACKNOWLEDGEMENT, true)],
};

/// Acknowledgement only
pub const SUBMIT_HAM: ResponseTable<bool> = ResponseTable {
    operation: Operation::SubmitHam,
    arms: &[(SUBMIT_ACKNOWLEDGEMENT, true)],
};

impl<T: Copy> ResponseTable<T> {
    /// Operation this table belongs to
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Expected literals, in table order
    pub fn literals(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.arms.iter().map(|(literal, _)| *literal)
    }

    /// Map a response body to its result
    ///
    /// # Errors
    ///
    /// Returns [`AkismetError::Protocol`] when the trimmed body is not one
    /// of the expected literals
    pub fn classify(&self, status: u16, body: &str) -> AkismetResult<T> {
        let trimmed = body.trim();
        self.arms
            .iter()
            .find(|(literal, _)| *literal == trimmed)
            .map(|(_, result)| *result)
            .ok_or_else(|| AkismetError::protocol(self.operation, status, body))
    }
}

/// Table for a feedback submission
pub fn feedback_table(feedback: Feedback) -> &'static ResponseTable<bool> {
    match feedback {
        Feedback::Spam => &SUBMIT_SPAM,
        Feedback::Ham => &SUBMIT_HAM,
    }
}
