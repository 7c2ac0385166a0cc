//! Template facade trait and its implementation over the request engine.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::{
    Template, TemplateList, TemplateResponse, TemplateValidation, TemplateValidationResponse,
};
use crate::client::{Postmark, Request};
use crate::emails::{EmailResponse, EmailWithTemplate, Emails};
use crate::error::Error;
use crate::transport::HttpClient;

/// Path of the template collection.
pub const TEMPLATES_PATH: &str = "templates";

/// Path of the validation endpoint.
pub const TEMPLATES_VALIDATE_PATH: &str = "templates/validate";

/// Operations of the template resource.
///
/// Implemented by [`TemplatesApi`] against the live service and by
/// [`MockTemplates`](crate::mock::MockTemplates) against an in-memory catalog.
///
/// # Errors
///
/// Every operation returns [`Error::Api`] when the provider rejects the
/// call (code 1101 for an unknown template), or a local [`Error`] variant
/// when the call could not be completed.
pub trait Templates: Send + Sync {
    /// Retrieves a single template.
    fn get(
        &self,
        cancel: &CancellationToken,
        id: i64,
    ) -> impl Future<Output = Result<Template, Error>> + Send;

    /// Creates a template.
    fn create(
        &self,
        cancel: &CancellationToken,
        template: &Template,
    ) -> impl Future<Output = Result<TemplateResponse, Error>> + Send;

    /// Replaces the template stored under `id`.
    fn edit(
        &self,
        cancel: &CancellationToken,
        id: i64,
        template: &Template,
    ) -> impl Future<Output = Result<TemplateResponse, Error>> + Send;

    /// Lists up to `count` templates, skipping the first `offset`.
    fn list(
        &self,
        cancel: &CancellationToken,
        count: u32,
        offset: u32,
    ) -> impl Future<Output = Result<TemplateList, Error>> + Send;

    /// Permanently deletes a template.
    fn delete(
        &self,
        cancel: &CancellationToken,
        id: i64,
    ) -> impl Future<Output = Result<TemplateResponse, Error>> + Send;

    /// Checks template content without storing it.
    fn validate(
        &self,
        cancel: &CancellationToken,
        validation: &TemplateValidation,
    ) -> impl Future<Output = Result<TemplateValidationResponse, Error>> + Send;

    /// Sends an email rendered from a template.
    ///
    /// Same as [`Emails::email_with_template`]; it lives here too because
    /// the service documents it under templates.
    fn email(
        &self,
        cancel: &CancellationToken,
        email: &EmailWithTemplate,
    ) -> impl Future<Output = Result<EmailResponse, Error>> + Send;
}

/// Template facade bound to a [`Postmark`] client. Uses the server token.
#[derive(Debug)]
pub struct TemplatesApi<'a, H> {
    client: &'a Postmark<H>,
}

impl<'a, H> TemplatesApi<'a, H> {
    pub(crate) const fn new(client: &'a Postmark<H>) -> Self {
        Self { client }
    }
}

fn template_path(id: i64) -> String {
    format!("{TEMPLATES_PATH}/{id}")
}

impl<H: HttpClient> Templates for TemplatesApi<'_, H> {
    async fn get(&self, cancel: &CancellationToken, id: i64) -> Result<Template, Error> {
        self.client
            .execute_json(cancel, Request::get(template_path(id)))
            .await
    }

    async fn create(
        &self,
        cancel: &CancellationToken,
        template: &Template,
    ) -> Result<TemplateResponse, Error> {
        self.client
            .execute_json(cancel, Request::post(TEMPLATES_PATH).with_payload(template))
            .await
    }

    async fn edit(
        &self,
        cancel: &CancellationToken,
        id: i64,
        template: &Template,
    ) -> Result<TemplateResponse, Error> {
        self.client
            .execute_json(
                cancel,
                Request::put(template_path(id)).with_payload(template),
            )
            .await
    }

    async fn list(
        &self,
        cancel: &CancellationToken,
        count: u32,
        offset: u32,
    ) -> Result<TemplateList, Error> {
        let request = Request::get(TEMPLATES_PATH)
            .with_param("count", count)
            .with_param("offset", offset);
        self.client.execute_json(cancel, request).await
    }

    async fn delete(
        &self,
        cancel: &CancellationToken,
        id: i64,
    ) -> Result<TemplateResponse, Error> {
        self.client
            .execute_json(cancel, Request::delete(template_path(id)))
            .await
    }

    async fn validate(
        &self,
        cancel: &CancellationToken,
        validation: &TemplateValidation,
    ) -> Result<TemplateValidationResponse, Error> {
        self.client
            .execute_json(
                cancel,
                Request::post(TEMPLATES_VALIDATE_PATH).with_payload(validation),
            )
            .await
    }

    async fn email(
        &self,
        cancel: &CancellationToken,
        email: &EmailWithTemplate,
    ) -> Result<EmailResponse, Error> {
        self.client.emails().email_with_template(cancel, email).await
    }
}
