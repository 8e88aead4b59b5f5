use std::fmt;

use nutype::nutype;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::email_address::EmailAddress;

/// The fields of the contact form, as entered by the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: ContactFormName,
    pub email: EmailAddress,
    pub message: ContactFormMessage,
}

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactFormName(String);

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactFormMessage(String);

/// Outcome of the last submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Success,
    Failure,
}

/// The status message shown to the visitor after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionNotice {
    pub status: SubmissionStatus,
    pub text: String,
}

impl SubmissionNotice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            status: SubmissionStatus::Success,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            status: SubmissionStatus::Failure,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SubmissionStatus::Success
    }
}

impl fmt::Display for SubmissionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A social or direct contact link listed next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLink {
    pub kind: ContactLinkKind,
    pub label: String,
    pub href: Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactLinkKind {
    Email,
    Linkedin,
    Github,
    Website,
    Other,
}

impl ContactLink {
    /// The text a reader would copy: the address for `mailto:` links, the
    /// full URL otherwise.
    pub fn target(&self) -> &str {
        match self.href.scheme() {
            "mailto" => self.href.path(),
            _ => self.href.as_str(),
        }
    }
}
