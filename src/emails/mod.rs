//! Sending single emails, with inline content or a stored template.

mod api;
mod types;


pub use api::{EMAIL_PATH, EMAIL_WITH_TEMPLATE_PATH, Emails, EmailsApi};
pub use types::{
    Attachment, Email, EmailResponse, EmailWithTemplate, Envelope, Header, TemplateModel,
};
