//! [`HttpClient`] over `reqwest`.

use std::sync::LazyLock;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Process-wide default client, shared by every [`ReqwestClient::shared`] handle.
static SHARED: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// Network-backed [`HttpClient`].
///
/// Clones share one connection pool. To bound request time, build a
/// `reqwest::Client` with a timeout and wrap it:
///
/// ```
/// use std::time::Duration;
/// use postmark::Postmark;
/// use postmark::transport::ReqwestClient;
///
/// let http = reqwest::Client::builder()
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// let client = Postmark::new("server-token", "").with_client(ReqwestClient::from_client(http));
/// # let _ = client;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Client with a private connection pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Handle to the process-wide default client used by
    /// [`Postmark::new`](crate::Postmark::new).
    #[must_use]
    pub fn shared() -> Self {
        Self {
            inner: SHARED.clone(),
        }
    }

    /// Wraps a preconfigured client (timeouts, TLS, proxies).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::shared()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = req;

        let mut call = self.inner.request(method, url).headers(headers);
        if let Some(body) = body {
            call = call.body(body);
        }

        let response = call.send().await.map_err(transport_error)?;
        let status = response.status();
        let headers = response.headers().clone();
        // Draining the body hands the connection back to the pool.
        let body = response.bytes().await.map_err(transport_error)?;

        Ok(HttpResponse::new(status, headers, body.into()))
    }
}

fn transport_error(error: reqwest::Error) -> HttpError {
    match error {
        e if e.is_timeout() => HttpError::Timeout,
        e if e.is_builder() => HttpError::InvalidUrl(e.to_string()),
        e => HttpError::Connection(Box::new(e)),
    }
}
