//! Email facade trait and its implementation over the request engine.

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::{Email, EmailResponse, EmailWithTemplate};
use crate::client::{Postmark, Request, decode_target};
use crate::error::Error;
use crate::transport::HttpClient;

/// Path for sending an email with inline content.
pub const EMAIL_PATH: &str = "email";

/// Path for sending an email rendered from a template.
pub const EMAIL_WITH_TEMPLATE_PATH: &str = "email/withTemplate";

/// Operations of the email resource.
///
/// Implemented by [`EmailsApi`] against the live service and by
/// [`MockEmails`](crate::mock::MockEmails) against an in-memory catalog,
/// so code under test can accept either.
pub trait Emails: Send + Sync {
    /// Sends a single email with inline content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the provider rejects the message, or a
    /// local [`Error`] variant when the call could not be completed.
    fn email(
        &self,
        cancel: &CancellationToken,
        email: &Email,
    ) -> impl std::future::Future<Output = Result<EmailResponse, Error>> + Send;

    /// Sends a single email rendered from a stored template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the template is missing or the model
    /// does not match it, or a local [`Error`] variant.
    fn email_with_template(
        &self,
        cancel: &CancellationToken,
        email: &EmailWithTemplate,
    ) -> impl std::future::Future<Output = Result<EmailResponse, Error>> + Send;
}

/// Email facade bound to a [`Postmark`] client. Uses the server token.
#[derive(Debug)]
pub struct EmailsApi<'a, H> {
    client: &'a Postmark<H>,
}

impl<'a, H> EmailsApi<'a, H> {
    pub(crate) const fn new(client: &'a Postmark<H>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> EmailsApi<'_, H> {
    async fn send<P: Serialize + Send>(
        &self,
        cancel: &CancellationToken,
        request: Request<P>,
    ) -> Result<EmailResponse, Error> {
        let response = self.client.execute(cancel, request).await?;
        let mut sent: EmailResponse = decode_target(&response)?;
        sent.status_code = response.status.as_u16();
        Ok(sent)
    }
}

impl<H: HttpClient> Emails for EmailsApi<'_, H> {
    async fn email(
        &self,
        cancel: &CancellationToken,
        email: &Email,
    ) -> Result<EmailResponse, Error> {
        self.send(cancel, Request::post(EMAIL_PATH).with_payload(email))
            .await
    }

    async fn email_with_template(
        &self,
        cancel: &CancellationToken,
        email: &EmailWithTemplate,
    ) -> Result<EmailResponse, Error> {
        self.send(
            cancel,
            Request::post(EMAIL_WITH_TEMPLATE_PATH).with_payload(email),
        )
        .await
    }
}
