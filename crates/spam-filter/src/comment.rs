// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Comment submission data sent to spam filters
//!
//! A [`Comment`] carries the two fields every classification request needs
//! (the submitter's IP address and user agent) plus the optional metadata a
//! filter can use to improve accuracy. Fields a filter does not know about yet
//! can be attached with [`Comment::extra`] and are forwarded verbatim.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Kind of content being classified
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CommentType {
    /// A blog comment
    Comment,
    /// A top-level forum post
    ForumPost,
    /// A reply to a forum post or comment
    Reply,
    /// A blog post
    BlogPost,
    /// A contact form or feedback submission
    ContactForm,
    /// An account signup
    Signup,
    /// A message sent between users
    Message,
    /// Any other value, sent as given
    Other(String),
}

impl CommentType {
    /// Wire representation of this comment type
    pub fn as_str(&self) -> &str {
        match self {
            CommentType::Comment => "comment",
            CommentType::ForumPost => "forum-post",
            CommentType::Reply => "reply",
            CommentType::BlogPost => "blog-post",
            CommentType::ContactForm => "contact-form",
            CommentType::Signup => "signup",
            CommentType::Message => "message",
            CommentType::Other(value) => value,
        }
    }
}

impl From<String> for CommentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "comment" => CommentType::Comment,
            "forum-post" => CommentType::ForumPost,
            "reply" => CommentType::Reply,
            "blog-post" => CommentType::BlogPost,
            "contact-form" => CommentType::ContactForm,
            "signup" => CommentType::Signup,
            "message" => CommentType::Message,
            _ => CommentType::Other(value),
        }
    }
}

impl From<&str> for CommentType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<CommentType> for String {
    fn from(value: CommentType) -> Self {
        match value {
            CommentType::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CommentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of the submitting user on the site
///
/// Filters treat `administrator` as trusted and never classify it as spam.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    /// Site administrator
    Administrator,
    /// Any other role, sent as given
    Other(String),
}

impl UserRole {
    /// Wire representation of this role
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::Administrator => "administrator",
            UserRole::Other(value) => value,
        }
    }
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        if value == "administrator" {
            UserRole::Administrator
        } else {
            UserRole::Other(value)
        }
    }
}

impl From<&str> for UserRole {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<UserRole> for String {
    fn from(value: UserRole) -> Self {
        match value {
            UserRole::Administrator => "administrator".to_string(),
            UserRole::Other(value) => value,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of user-submitted content to classify or report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// IP address of the submitter
    pub user_ip: String,
    /// User agent string of the submitter's client
    pub user_agent: String,
    /// Referrer header sent with the submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    /// Full URL of the page the content was posted to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    /// Kind of content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_type: Option<CommentType>,
    /// Name supplied by the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_author: Option<String>,
    /// Email address supplied by the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_author_email: Option<String>,
    /// URL supplied by the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_author_url: Option<String>,
    /// Body of the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_content: Option<String>,
    /// When the content was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_date_gmt: Option<DateTime<Utc>>,
    /// When the post being commented on was last modified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_post_modified_gmt: Option<DateTime<Utc>>,
    /// Language(s) of the site, e.g. `en, fr_ca`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_lang: Option<String>,
    /// Character encoding of the submitted form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_charset: Option<String>,
    /// Role of the submitting user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<UserRole>,
    /// Marks the request as a test so the filter does not learn from it
    #[serde(default)]
    pub is_test: bool,
    /// Additional fields forwarded verbatim
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Comment {
    /// Create a comment with only the required fields set
    pub fn new(user_ip: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            user_ip: user_ip.into(),
            user_agent: user_agent.into(),
            referrer: None,
            permalink: None,
            comment_type: None,
            comment_author: None,
            comment_author_email: None,
            comment_author_url: None,
            comment_content: None,
            comment_date_gmt: None,
            comment_post_modified_gmt: None,
            blog_lang: None,
            blog_charset: None,
            user_role: None,
            is_test: false,
            extra: BTreeMap::new(),
        }
    }

    /// Set the referrer
    #[must_use]
    pub fn referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    /// Set the permalink
    #[must_use]
    pub fn permalink(mut self, permalink: impl Into<String>) -> Self {
        self.permalink = Some(permalink.into());
        self
    }

    /// Set the comment type
    #[must_use]
    pub fn comment_type(mut self, comment_type: impl Into<CommentType>) -> Self {
        self.comment_type = Some(comment_type.into());
        self
    }

    /// Set the author name
    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.comment_author = Some(author.into());
        self
    }

    /// Set the author email
    #[must_use]
    pub fn author_email(mut self, email: impl Into<String>) -> Self {
        self.comment_author_email = Some(email.into());
        self
    }

    /// Set the author URL
    #[must_use]
    pub fn author_url(mut self, url: impl Into<String>) -> Self {
        self.comment_author_url = Some(url.into());
        self
    }

    /// Set the content body
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.comment_content = Some(content.into());
        self
    }

    /// Set the creation timestamp
    #[must_use]
    pub fn date_gmt(mut self, date: DateTime<Utc>) -> Self {
        self.comment_date_gmt = Some(date);
        self
    }

    /// Set the last-modified timestamp of the parent post
    #[must_use]
    pub fn post_modified_gmt(mut self, date: DateTime<Utc>) -> Self {
        self.comment_post_modified_gmt = Some(date);
        self
    }

    /// Set the site language(s)
    #[must_use]
    pub fn blog_lang(mut self, lang: impl Into<String>) -> Self {
        self.blog_lang = Some(lang.into());
        self
    }

    /// Set the form character encoding
    #[must_use]
    pub fn blog_charset(mut self, charset: impl Into<String>) -> Self {
        self.blog_charset = Some(charset.into());
        self
    }

    /// Set the user role
    #[must_use]
    pub fn user_role(mut self, role: impl Into<UserRole>) -> Self {
        self.user_role = Some(role.into());
        self
    }

    /// Mark this comment as a test query
    #[must_use]
    pub fn test(mut self) -> Self {
        self.is_test = true;
        self
    }

    /// Attach an arbitrary field that is forwarded verbatim
    #[must_use]
    pub fn extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Flatten this comment into wire field names and values
    ///
    /// Extras are written first so a named field always wins over an extra
    /// with the same name. Unset optional fields are omitted, timestamps are
    /// RFC 3339 and `is_test` is sent as `1` only when set.
    pub fn to_fields(&self) -> BTreeMap<String, String> {
        let mut fields = self.extra.clone();

        let mut put = |name: &str, value: Option<&str>| {
            if let Some(value) = value {
                fields.insert(name.to_string(), value.to_string());
            }
        };

        let date_gmt = self.comment_date_gmt.map(rfc3339);
        let post_modified_gmt = self.comment_post_modified_gmt.map(rfc3339);

        put("user_ip", Some(self.user_ip.as_str()));
        put("user_agent", Some(self.user_agent.as_str()));
        put("referrer", self.referrer.as_deref());
        put("permalink", self.permalink.as_deref());
        put("comment_type", self.comment_type.as_ref().map(CommentType::as_str));
        put("comment_author", self.comment_author.as_deref());
        put("comment_author_email", self.comment_author_email.as_deref());
        put("comment_author_url", self.comment_author_url.as_deref());
        put("comment_content", self.comment_content.as_deref());
        put("comment_date_gmt", date_gmt.as_deref());
        put("comment_post_modified_gmt", post_modified_gmt.as_deref());
        put("blog_lang", self.blog_lang.as_deref());
        put("blog_charset", self.blog_charset.as_deref());
        put("user_role", self.user_role.as_ref().map(UserRole::as_str));
        put("is_test", self.is_test.then_some("1"));

        fields
    }
}

fn rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn required_fields_only() {
        let fields = Comment::new("127.0.0.1", "Mozilla").to_fields();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields["user_ip"], "127.0.0.1");
        assert_eq!(fields["user_agent"], "Mozilla");
        assert!(!fields.contains_key("is_test"));
    }

    #[test]
    fn optional_fields_flattened() {
        let posted = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let modified = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 30).unwrap();

        let fields = Comment::new("127.0.0.1", "Mozilla")
            .referrer("http://www.example.com/")
            .permalink("http://www.example.com/#comment123")
            .comment_type(CommentType::Comment)
            .author("Legitimate Author")
            .author_email("email@example.com")
            .author_url("http://www.example.com/")
            .content("This is a fine comment.")
            .date_gmt(posted)
            .post_modified_gmt(modified)
            .blog_lang("en_us")
            .blog_charset("utf-8")
            .user_role(UserRole::Administrator)
            .test()
            .to_fields();

        assert_eq!(fields.len(), 15);
        assert_eq!(fields["comment_type"], "comment");
        assert_eq!(fields["comment_date_gmt"], "2024-05-01T12:30:00Z");
        assert_eq!(fields["comment_post_modified_gmt"], "2024-05-01T12:30:30Z");
        assert_eq!(fields["user_role"], "administrator");
        assert_eq!(fields["is_test"], "1");
    }

    #[test]
    fn named_fields_win_over_extras() {
        let fields = Comment::new("127.0.0.1", "Mozilla")
            .extra("user_ip", "10.0.0.1")
            .extra("honeypot_field_name", "hidden")
            .to_fields();

        assert_eq!(fields["user_ip"], "127.0.0.1");
        assert_eq!(fields["honeypot_field_name"], "hidden");
    }

    #[test]
    fn unknown_vocabulary_passes_through() {
        let comment = Comment::new("127.0.0.1", "Mozilla")
            .comment_type("trackback")
            .user_role("editor");

        assert_eq!(
            comment.comment_type,
            Some(CommentType::Other("trackback".to_string()))
        );
        let fields = comment.to_fields();
        assert_eq!(fields["comment_type"], "trackback");
        assert_eq!(fields["user_role"], "editor");
    }

    #[test]
    fn known_vocabulary_parsed() {
        assert_eq!(CommentType::from("forum-post"), CommentType::ForumPost);
        assert_eq!(CommentType::from("contact-form"), CommentType::ContactForm);
        assert_eq!(UserRole::from("administrator"), UserRole::Administrator);
        assert_eq!(String::from(CommentType::BlogPost), "blog-post");
    }

    #[test]
    fn json_representation() {
        let comment = Comment::new("127.0.0.1", "Mozilla")
            .comment_type(CommentType::Signup)
            .user_role(UserRole::Administrator)
            .test();

        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["comment_type"], "signup");
        assert_eq!(json["user_role"], "administrator");
        assert!(json.get("referrer").is_none());

        let parsed: Comment =
            serde_json::from_str(r#"{"user_ip":"127.0.0.1","user_agent":"Mozilla"}"#).unwrap();
        assert_eq!(parsed, Comment::new("127.0.0.1", "Mozilla"));
    }
}
