//! Postmark: typed client for the Postmark transactional email API.
//!
//! A library for sending one-off and templated emails, managing the
//! template catalog, and decoding webhook notifications.
//!
//! - [`Postmark`] is the root client; [`Postmark::emails`] and
//!   [`Postmark::templates`] return the resource facades.
//! - [`Emails`] and [`Templates`] are the facade contracts, implemented
//!   both by the live client and by the in-memory [`mock::MockPostmark`].
//! - [`webhooks`] holds the inbound notification shapes.
//! - [`config`] backs the `postmark` command-line tool.

pub mod client;
pub mod codes;
pub mod config;
pub mod emails;
pub mod error;
pub mod mock;
pub mod templates;
pub mod time;
pub mod transport;
pub mod webhooks;

#[cfg(test)]
mod test_fixtures;

pub use client::{DEFAULT_BASE_URL, Postmark, Request};
pub use emails::{
    Attachment, Email, EmailResponse, EmailWithTemplate, Emails, EmailsApi, Envelope, Header,
    TemplateModel,
};
pub use error::{ApiError, Error};
pub use templates::{
    Template, TemplateList, TemplateResponse, TemplateValidation, TemplateValidationError,
    TemplateValidationResponse, Templates, TemplatesApi,
};
pub use tokio_util::sync::CancellationToken;
