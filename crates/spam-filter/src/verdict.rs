// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Classification verdict types

use serde::{Deserialize, Serialize};

/// Outcome of classifying a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Legitimate content
    Ham,
    /// Spam
    Spam,
    /// Spam so obvious the filter advises discarding it without review
    BlatantSpam,
}

impl Verdict {
    /// Check if the verdict represents spam of any kind
    pub fn is_spam(&self) -> bool {
        matches!(self, Verdict::Spam | Verdict::BlatantSpam)
    }

    /// Check if the content can be dropped without moderation
    pub fn should_discard(&self) -> bool {
        matches!(self, Verdict::BlatantSpam)
    }
}

impl From<bool> for Verdict {
    fn from(is_spam: bool) -> Self {
        if is_spam { Verdict::Spam } else { Verdict::Ham }
    }
}

/// Feedback submitted to train a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    /// The content was spam the filter missed
    Spam,
    /// The content was legitimate but flagged
    Ham,
}
