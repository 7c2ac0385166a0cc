//! Deterministic in-memory stand-in for the API.
//!
//! [`MockPostmark`] implements the same [`Emails`] and [`Templates`]
//! contracts as the real client, against a local catalog seeded with five
//! templates (identifiers 1 to 5). Templated sends are checked the way the
//! service checks them, so consumer tests see the same error codes:
//!
//! | Condition                              | Code   |
//! |----------------------------------------|--------|
//! | template id absent                     | `1101` |
//! | empty model                            | `1109` |
//! | model lacks an expected key            | `1120` |
//! | model carries a key the template lacks | `1123` |
//!
//! Raw sends are not faked: they go to the real transport with the
//! provider's test token, which accepts and discards the message.

mod registry;

#[cfg(test)]
mod mock_tests;

use std::sync::{Arc, Mutex, PoisonError};

use http::StatusCode;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::client::Postmark;
use crate::codes;
use crate::emails::{Email, EmailResponse, EmailWithTemplate, Emails};
use crate::error::{ApiError, Error};
use crate::templates::{
    Template, TemplateList, TemplateResponse, TemplateValidation, TemplateValidationError,
    TemplateValidationResponse, Templates,
};
use crate::time::{Clock, SystemClock};
use crate::transport::{HttpClient, ReqwestClient};

use registry::Registry;

pub use registry::LIST_CEILING;

/// Server token the service accepts for test sends that are never delivered.
pub const TEST_SERVER_TOKEN: &str = "POSTMARK_API_TEST";

/// Status attached to errors the fake reports.
const REJECTED_STATUS: StatusCode = StatusCode::UNPROCESSABLE_ENTITY;

/// In-memory fake of the Postmark client.
///
/// [`MockPostmark::new`] owns a private catalog, so parallel tests do not
/// interfere. [`MockPostmark::shared`] binds to one process-wide catalog
/// instead; callers mutating it must serialize among themselves or
/// [`reset`](Self::reset) before relying on its contents.
///
/// # Example
///
/// ```
/// use postmark::mock::MockPostmark;
/// use postmark::{EmailWithTemplate, Envelope, Templates};
/// use serde_json::json;
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mock = MockPostmark::new();
/// let email = EmailWithTemplate {
///     envelope: Envelope { to: "r@x".into(), ..Envelope::default() },
///     template_id: "1".into(),
///     template_model: json!({"val1": "a", "val2": "b", "val3": "c"})
///         .as_object()
///         .cloned()
///         .unwrap(),
///     ..EmailWithTemplate::default()
/// };
///
/// let sent = mock.templates().email(&CancellationToken::new(), &email).await.unwrap();
/// assert_eq!(sent.message, "OK");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockPostmark<H = ReqwestClient, C = SystemClock> {
    parent: Postmark<H>,
    registry: Arc<Mutex<Registry>>,
    clock: C,
}

impl MockPostmark {
    /// Creates a fake with its own freshly seeded catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(Arc::new(Mutex::new(Registry::seeded())))
    }

    /// Creates a fake bound to the process-wide catalog.
    #[must_use]
    pub fn shared() -> Self {
        Self::with_registry(Arc::clone(&registry::SHARED))
    }

    fn with_registry(registry: Arc<Mutex<Registry>>) -> Self {
        Self {
            parent: Postmark::new(TEST_SERVER_TOKEN, ""),
            registry,
            clock: SystemClock,
        }
    }
}

impl Default for MockPostmark {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, C> MockPostmark<H, C> {
    /// Replaces the HTTP client used for raw sends.
    #[must_use]
    pub fn with_client<H2>(self, client: H2) -> MockPostmark<H2, C> {
        MockPostmark {
            parent: self.parent.with_client(client),
            registry: self.registry,
            clock: self.clock,
        }
    }

    /// Replaces the clock that stamps `SubmittedAt`.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> MockPostmark<H, C2> {
        MockPostmark {
            parent: self.parent,
            registry: self.registry,
            clock,
        }
    }

    /// The real client raw sends are delegated to.
    #[must_use]
    pub const fn parent(&self) -> &Postmark<H> {
        &self.parent
    }

    /// Restores the five seeded templates and the identifier counter.
    pub fn reset(&self) {
        self.update(|registry| *registry = Registry::seeded());
    }

    /// Model keys the template under `id` expects; empty if unknown.
    #[must_use]
    pub fn template_keys(&self, id: i64) -> Vec<String> {
        self.update(|registry| {
            registry
                .get(id)
                .map(|entry| entry.keys.clone())
                .unwrap_or_default()
        })
    }

    /// Fake email facade.
    #[must_use]
    pub const fn emails(&self) -> MockEmails<'_, H, C> {
        MockEmails { mock: self }
    }

    /// Fake template facade.
    #[must_use]
    pub const fn templates(&self) -> MockTemplates<'_, H, C> {
        MockTemplates { mock: self }
    }

    /// Runs `f` with the catalog locked.
    ///
    /// A poisoned lock is recovered: the catalog holds plain data and every
    /// mutation leaves it consistent.
    fn update<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        let mut guard = self
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

fn ensure_live(cancel: &CancellationToken) -> Result<(), Error> {
    if cancel.is_cancelled() {
        Err(Error::Cancelled)
    } else {
        Ok(())
    }
}

fn rejected(code: i64) -> Error {
    debug!(code, "Fake rejected request");
    Error::Api(ApiError::from_code(code, REJECTED_STATUS))
}

fn accepted(template: &Template) -> TemplateResponse {
    TemplateResponse {
        template_id: template.template_id,
        name: template.name.clone(),
        active: template.active,
        error_code: 0,
        message: "OK".to_string(),
    }
}

/// Fake email facade. See [`MockPostmark`].
#[derive(Debug)]
pub struct MockEmails<'a, H, C> {
    mock: &'a MockPostmark<H, C>,
}

impl<H, C: Clock> MockEmails<'_, H, C> {
    /// Checks a templated send against the catalog and stamps a response.
    fn check_templated(&self, email: &EmailWithTemplate) -> Result<EmailResponse, Error> {
        let id: i64 = email
            .template_id
            .parse()
            .map_err(|source| Error::InvalidTemplateId {
                value: email.template_id.clone(),
                source,
            })?;

        let keys = self
            .mock
            .update(|registry| registry.get(id).map(|entry| entry.keys.clone()))
            .ok_or_else(|| rejected(codes::TEMPLATE_NOT_FOUND))?;

        let model = &email.template_model;
        if model.is_empty() {
            return Err(rejected(codes::EMPTY_TEMPLATE_MODEL));
        }
        if keys.iter().any(|key| !model.contains_key(key)) {
            return Err(rejected(codes::MISSING_REQUIRED_VARIABLE));
        }
        if model.keys().any(|key| !keys.contains(key)) {
            return Err(rejected(codes::UNKNOWN_VARIABLE));
        }

        Ok(EmailResponse {
            to: email.envelope.to.clone(),
            submitted_at: self.mock.clock.now(),
            message_id: Uuid::new_v4().to_string(),
            error_code: 0,
            message: "OK".to_string(),
            status_code: StatusCode::OK.as_u16(),
        })
    }
}

impl<H: HttpClient, C: Clock> Emails for MockEmails<'_, H, C> {
    async fn email(
        &self,
        cancel: &CancellationToken,
        email: &Email,
    ) -> Result<EmailResponse, Error> {
        self.mock.parent.emails().email(cancel, email).await
    }

    async fn email_with_template(
        &self,
        cancel: &CancellationToken,
        email: &EmailWithTemplate,
    ) -> Result<EmailResponse, Error> {
        ensure_live(cancel)?;
        self.check_templated(email)
    }
}

/// Fake template facade. See [`MockPostmark`].
#[derive(Debug)]
pub struct MockTemplates<'a, H, C> {
    mock: &'a MockPostmark<H, C>,
}

impl<H, C> MockTemplates<'_, H, C> {
    fn edit_in_place(&self, id: i64, template: &Template) -> Result<TemplateResponse, Error> {
        self.mock.update(|registry| {
            // The path identifier wins; a payload identifier must also exist.
            let payload_id = template.template_id;
            if payload_id != 0 && payload_id != id && !registry.contains(payload_id) {
                return Err(rejected(codes::TEMPLATE_NOT_FOUND));
            }
            registry
                .replace(id, template.clone())
                .map(|stored| accepted(&stored))
                .ok_or_else(|| rejected(codes::TEMPLATE_NOT_FOUND))
        })
    }
}

impl<H: HttpClient, C: Clock> Templates for MockTemplates<'_, H, C> {
    async fn get(&self, cancel: &CancellationToken, id: i64) -> Result<Template, Error> {
        ensure_live(cancel)?;
        self.mock
            .update(|registry| registry.get(id).map(|entry| entry.template.clone()))
            .ok_or_else(|| rejected(codes::TEMPLATE_NOT_FOUND))
    }

    async fn create(
        &self,
        cancel: &CancellationToken,
        template: &Template,
    ) -> Result<TemplateResponse, Error> {
        ensure_live(cancel)?;
        let stored = self
            .mock
            .update(|registry| registry.insert_new(template.clone()));
        Ok(accepted(&stored))
    }

    async fn edit(
        &self,
        cancel: &CancellationToken,
        id: i64,
        template: &Template,
    ) -> Result<TemplateResponse, Error> {
        ensure_live(cancel)?;
        self.edit_in_place(id, template)
    }

    async fn list(
        &self,
        cancel: &CancellationToken,
        count: u32,
        offset: u32,
    ) -> Result<TemplateList, Error> {
        ensure_live(cancel)?;
        Ok(self.mock.update(|registry| registry.page(count, offset)))
    }

    async fn delete(
        &self,
        cancel: &CancellationToken,
        id: i64,
    ) -> Result<TemplateResponse, Error> {
        ensure_live(cancel)?;
        self.mock.update(|registry| registry.remove(id));
        Ok(TemplateResponse {
            message: format!("Template {id} removed"),
            ..TemplateResponse::default()
        })
    }

    async fn validate(
        &self,
        cancel: &CancellationToken,
        _validation: &TemplateValidation,
    ) -> Result<TemplateValidationResponse, Error> {
        ensure_live(cancel)?;
        let response = TemplateValidationResponse {
            validation_errors: vec![TemplateValidationError {
                message: "Template validation is not supported by the in-memory fake.".to_string(),
                ..TemplateValidationError::default()
            }],
            ..TemplateValidationResponse::default()
        };
        Err(Error::ValidationUnsupported(Box::new(response)))
    }

    async fn email(
        &self,
        cancel: &CancellationToken,
        email: &EmailWithTemplate,
    ) -> Result<EmailResponse, Error> {
        self.mock.emails().email_with_template(cancel, email).await
    }
}
