// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Strings that are known to hold at least one non-whitespace character
//!
//! Credentials are stored as [`NonEmptyString`] so a resolved key or site URL
//! can never be blank.
//!
//! ```rust
//! use akismet::NonEmptyString;
//!
//! let key = NonEmptyString::new("abc123def456").expect("non-empty key");
//! assert_eq!(key.as_str(), "abc123def456");
//!
//! assert!(NonEmptyString::new("").is_err());
//! assert!(NonEmptyString::new(" \t\n").is_err());
//! ```

use core::fmt;
use std::str::FromStr;

/// A string with at least one non-whitespace character
///
/// The value is kept exactly as given, surrounding whitespace included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyString(Box<str>);

impl NonEmptyString {
    /// Wrap a string, rejecting empty and whitespace-only input
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.trim().is_empty() {
            Err("String cannot be empty or whitespace-only".to_string())
        } else {
            Ok(NonEmptyString(s.into_boxed_str()))
        }
    }

    /// Wrap an optional string, treating blank input as absent
    pub fn from_optional(s: Option<impl Into<String>>) -> Option<Self> {
        s.and_then(|s| Self::new(s).ok())
    }

    /// Get a string slice of the contained value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NonEmptyString {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_value_verbatim() {
        let value = NonEmptyString::new(" padded ").unwrap();
        assert_eq!(value.as_str(), " padded ");
        assert_eq!(value.to_string(), " padded ");
    }

    #[test]
    fn optional_blank_is_absent() {
        assert!(NonEmptyString::from_optional(None::<String>).is_none());
        assert!(NonEmptyString::from_optional(Some("")).is_none());
        assert!(NonEmptyString::from_optional(Some("   ")).is_none());
        assert_eq!(
            NonEmptyString::from_optional(Some("key")).map(|s| s.to_string()),
            Some("key".to_string())
        );
    }

    #[test]
    fn parse() {
        let parsed: NonEmptyString = "http://example.com".parse().unwrap();
        assert_eq!(parsed.as_ref(), "http://example.com");
        assert!("".parse::<NonEmptyString>().is_err());
    }
}
