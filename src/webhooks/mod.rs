//! Payloads the provider posts to your webhook endpoints.
//!
//! These are plain data shapes for decoding notifications with
//! `serde_json`; receiving the HTTP call is up to the application.
//!
//! ```
//! use postmark::webhooks::BounceWebhook;
//!
//! let bounce: BounceWebhook =
//!     serde_json::from_str(r#"{"ID": 42, "Type": "HardBounce", "Inactive": true}"#).unwrap();
//! assert_eq!(bounce.id, 42);
//! assert!(bounce.inactive);
//! ```


use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::lenient;

/// Sent after an email bounced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BounceWebhook {
    /// Bounce identifier, usable with the bounce API.
    #[serde(rename = "ID")]
    pub id: i64,
    /// Bounce classification, e.g. `HardBounce`.
    #[serde(rename = "Type")]
    pub kind: String,
    pub type_code: i64,
    pub name: String,
    pub tag: String,
    #[serde(rename = "MessageID")]
    pub message_id: String,
    pub description: String,
    pub details: String,
    /// Address that bounced.
    pub email: String,
    #[serde(with = "lenient")]
    pub bounced_at: DateTime<Utc>,
    pub dump_available: bool,
    /// Whether the bounce deactivated the address.
    pub inactive: bool,
    /// Whether the address can be reactivated.
    pub can_activate: bool,
    pub subject: String,
}

/// Sent when an inbound email is processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InboundWebhook {
    pub from_name: String,
    pub from: String,
    pub from_full: InboundEntity,
    pub to: String,
    pub to_full: Vec<InboundEntity>,
    pub cc: String,
    pub cc_full: Vec<InboundEntity>,
    pub bcc: String,
    pub bcc_full: Vec<InboundEntity>,
    pub original_recipient: String,
    pub subject: String,
    #[serde(rename = "MessageID")]
    pub message_id: String,
    pub reply_to: String,
    pub mailbox_hash: String,
    /// RFC 2822 date as sent by the originating server.
    pub date: String,
    pub text_body: String,
    pub html_body: String,
    /// Reply text with the quoted thread removed.
    pub stripped_text_reply: String,
    pub tag: String,
    pub headers: Vec<InboundHeader>,
    pub attachments: Vec<InboundAttachment>,
}

/// A sender or recipient of an inbound email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InboundEntity {
    pub email: String,
    pub name: String,
    pub mailbox_hash: String,
}

/// A raw header of an inbound email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InboundHeader {
    pub name: String,
    pub value: String,
}

/// An attachment of an inbound email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InboundAttachment {
    pub name: String,
    /// Base64-encoded content.
    pub content: String,
    pub content_type: String,
    pub content_length: i64,
}

/// Sent when a tracked email is opened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OpenWebhook {
    /// Whether this is the first recorded open.
    pub first_open: bool,
    pub client: OpenContext,
    #[serde(rename = "OS")]
    pub os: OpenContext,
    pub platform: String,
    pub user_agent: String,
    pub read_seconds: f64,
    pub geo: OpenGeolocation,
    #[serde(rename = "MessageID")]
    pub message_id: String,
    #[serde(with = "lenient")]
    pub received_at: DateTime<Utc>,
    pub tag: String,
    pub recipient: String,
}

/// Email client or operating system an open came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OpenContext {
    pub name: String,
    pub company: String,
    pub family: String,
}

/// Where an open came from, resolved from the reader's IP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OpenGeolocation {
    #[serde(rename = "CountryISOCode")]
    pub country_iso_code: String,
    pub country: String,
    #[serde(rename = "RegionISOCode")]
    pub region_iso_code: String,
    pub region: String,
    pub city: String,
    pub zip: String,
    /// `latitude,longitude`.
    pub coords: String,
    #[serde(rename = "IP")]
    pub ip: String,
}
