//! Root client and request engine.
//!
//! [`Postmark`] owns the credentials, the base URL and the pluggable HTTP
//! client. Every facade operation funnels through [`Postmark::execute`],
//! which performs exactly one HTTP round-trip and classifies the outcome.

mod request;


use std::fmt;

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::emails::EmailsApi;
use crate::error::{ApiError, Error};
use crate::templates::TemplatesApi;
use crate::transport::{HttpClient, HttpRequest, HttpResponse, ReqwestClient};

pub use request::Request;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.postmarkapp.com";

/// Header carrying the server token.
pub const SERVER_TOKEN_HEADER: &str = "X-Postmark-Server-Token";

/// Header carrying the account token.
pub const ACCOUNT_TOKEN_HEADER: &str = "X-Postmark-Account-Token";

const APPLICATION_JSON: &str = "application/json";

/// Client for the Postmark API.
///
/// Holds a server token (send and template operations) and an account
/// token (account-wide operations); each call authenticates with exactly
/// one of them. Both are fixed at construction.
///
/// Sharing one client across tasks is safe whenever `H` is.
///
/// # Example
///
/// ```no_run
/// use postmark::{Emails, Email, Envelope, Postmark};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), postmark::Error> {
/// let client = Postmark::new("server-token", "account-token");
/// let email = Email {
///     envelope: Envelope {
///         from: "sender@example.com".into(),
///         to: "receiver@example.com".into(),
///         ..Envelope::default()
///     },
///     subject: "Hello".into(),
///     text_body: "Hi there".into(),
///     ..Email::default()
/// };
/// let sent = client.emails().email(&CancellationToken::new(), &email).await?;
/// println!("{}", sent.message_id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Postmark<H = ReqwestClient> {
    server_token: String,
    account_token: String,
    base_url: String,
    client: H,
}

impl Postmark<ReqwestClient> {
    /// Creates a client that talks to the production host through the
    /// process-wide default HTTP client.
    #[must_use]
    pub fn new(server_token: impl Into<String>, account_token: impl Into<String>) -> Self {
        Self {
            server_token: server_token.into(),
            account_token: account_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: ReqwestClient::shared(),
        }
    }
}

impl<H> Postmark<H> {
    /// Replaces the HTTP client, keeping credentials and base URL.
    #[must_use]
    pub fn with_client<H2>(self, client: H2) -> Postmark<H2> {
        Postmark {
            server_token: self.server_token,
            account_token: self.account_token,
            base_url: self.base_url,
            client,
        }
    }

    /// Overrides the scheme and host requests are sent to.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    /// Facade for sending emails.
    #[must_use]
    pub const fn emails(&self) -> EmailsApi<'_, H> {
        EmailsApi::new(self)
    }

    /// Facade for managing templates.
    #[must_use]
    pub const fn templates(&self) -> TemplatesApi<'_, H> {
        TemplatesApi::new(self)
    }

    /// Builds the absolute URL for a path fragment and query parameters.
    ///
    /// The fragment may start with `/` or not. No `?` is appended when
    /// `params` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the result does not parse.
    pub fn endpoint(&self, path: &str, params: &[(String, String)]) -> Result<Url, Error> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|source| Error::InvalidUrl {
            url: raw.clone(),
            source,
        })?;

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }

    /// Turns a request descriptor into a ready-to-send HTTP request.
    fn build_request<P: Serialize>(&self, request: Request<P>) -> Result<HttpRequest, Error> {
        let parts = request.into_parts();
        let url = self.endpoint(&parts.path, &parts.params)?;

        let (auth_name, auth_key, token) = if parts.account_auth {
            (
                ACCOUNT_TOKEN_HEADER,
                "x-postmark-account-token",
                &self.account_token,
            )
        } else {
            (
                SERVER_TOKEN_HEADER,
                "x-postmark-server-token",
                &self.server_token,
            )
        };
        let mut auth_value =
            HeaderValue::from_str(token).map_err(|_| Error::InvalidHeader { name: auth_name })?;
        auth_value.set_sensitive(true);

        let mut http_request = HttpRequest::new(parts.method, url)
            .with_header(ACCEPT, HeaderValue::from_static(APPLICATION_JSON))
            .with_header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))
            .with_header(HeaderName::from_static(auth_key), auth_value);

        if let Some(payload) = parts.payload {
            http_request = http_request.with_body(serde_json::to_vec(&payload)?);
        }

        Ok(http_request)
    }
}

impl<H: HttpClient> Postmark<H> {
    /// Dispatches one request and classifies the response.
    ///
    /// Returns the raw response on 2xx. Non-2xx responses become
    /// [`Error::Api`] when the body carries a non-zero provider code,
    /// [`Error::UnexpectedResponse`] when the body is not JSON, and
    /// [`Error::Status`] otherwise.
    ///
    /// A token that is already cancelled fails with [`Error::Cancelled`]
    /// before any I/O; cancellation during dispatch abandons the request.
    ///
    /// # Errors
    ///
    /// See [`Error`] for the full taxonomy.
    pub async fn execute<P: Serialize + Send>(
        &self,
        cancel: &CancellationToken,
        request: Request<P>,
    ) -> Result<HttpResponse, Error> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let scope = if request.uses_account_auth() {
            "account"
        } else {
            "server"
        };
        let http_request = self.build_request(request)?;
        debug!(method = %http_request.method, url = %http_request.url, scope, "Dispatching API request");

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("API request cancelled");
                return Err(Error::Cancelled);
            }
            result = self.client.request(http_request) => result?,
        };
        debug!(status = %response.status, "Received API response");

        classify(response)
    }

    /// Dispatches one request and decodes a 2xx body into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`execute`](Self::execute) returns, plus [`Error::Api`]
    /// when a 2xx body reports a non-zero code and [`Error::Json`] when the
    /// body does not decode as `T`.
    pub async fn execute_json<T, P>(
        &self,
        cancel: &CancellationToken,
        request: Request<P>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        P: Serialize + Send,
    {
        let response = self.execute(cancel, request).await?;
        decode_target(&response)
    }
}

impl<H> fmt::Debug for Postmark<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Postmark")
            .field("server_token", &"<redacted>")
            .field("account_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Maps a non-2xx response onto the error taxonomy.
fn classify(response: HttpResponse) -> Result<HttpResponse, Error> {
    if response.is_success() {
        return Ok(response);
    }

    let status = response.status;
    if !response.content_type_is_json() {
        let body = String::from_utf8_lossy(&response.body).into_owned();
        warn!(%status, "API call failed with a non-JSON body");
        return Err(Error::UnexpectedResponse { status, body });
    }

    let mut reported: ApiError = serde_json::from_slice(&response.body)?;
    if reported.is_error() {
        reported.status = status;
        warn!(%status, code = reported.error_code, message = %reported.message, "API call rejected");
        return Err(Error::Api(reported));
    }

    warn!(%status, "API call failed without an error code");
    Err(Error::Status(status))
}

/// Decodes a 2xx body, surfacing any non-zero provider code it carries.
pub(crate) fn decode_target<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, Error> {
    if let Ok(mut reported) = serde_json::from_slice::<ApiError>(&response.body) {
        if reported.is_error() {
            reported.status = response.status;
            warn!(status = %response.status, code = reported.error_code, "API reported an error under a success status");
            return Err(Error::Api(reported));
        }
    }

    Ok(serde_json::from_slice(&response.body)?)
}
