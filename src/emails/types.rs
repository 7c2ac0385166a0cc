//! Wire shapes for the email endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::lenient;

/// Variables substituted into a template at render time.
pub type TemplateModel = serde_json::Map<String, serde_json::Value>;

/// Fields common to every outgoing email.
///
/// Empty fields are left off the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Envelope {
    /// Sender address; must belong to a confirmed sender signature.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub from: String,
    /// Comma-separated recipients.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub to: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cc: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bcc: String,
    /// Free-form tag used to group messages in statistics.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reply_to: String,
    /// Custom headers, in wire order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Header>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub track_opens: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// A custom email header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    /// Creates a header from a name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A file attached to an email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Attachment {
    /// File name shown to the recipient.
    pub name: String,
    /// Base64-encoded file content.
    pub content: String,
    /// MIME type, e.g. `application/pdf`.
    pub content_type: String,
}

/// An email with inline content.
///
/// The service requires at least one of `html_body` and `text_body`;
/// this is not checked locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Email {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub subject: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub html_body: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text_body: String,
}

/// An email rendered server-side from a stored template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EmailWithTemplate {
    #[serde(flatten)]
    pub envelope: Envelope,
    /// Template identifier. Numeric everywhere else, but sent as a string here.
    pub template_id: String,
    pub template_model: TemplateModel,
    /// Inline the template's CSS into the HTML body before sending.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub inline_css: bool,
}

/// Result of a send call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EmailResponse {
    /// Recipient echo.
    pub to: String,
    #[serde(with = "lenient")]
    pub submitted_at: DateTime<Utc>,
    #[serde(rename = "MessageID")]
    pub message_id: String,
    /// Provider error code; zero on success.
    pub error_code: i64,
    pub message: String,
    /// HTTP status of the response. Not part of the wire shape.
    #[serde(skip)]
    pub status_code: u16,
}
