//! Buffered request and response values plus the [`HttpClient`] seam.

use super::HttpError;

/// One outgoing call, fully assembled by the engine.
///
/// The engine sets every header (auth token included) before handing the
/// request to an [`HttpClient`]; implementations send it as-is.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: http::Method,
    /// Absolute URL, query string included.
    pub url: url::Url,
    pub headers: http::HeaderMap,
    /// JSON payload, absent for bodiless calls.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Starts a request with no headers and no body.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Shorthand for a `GET`.
    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::new(http::Method::GET, url)
    }

    /// Shorthand for a `POST`.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self::new(http::Method::POST, url)
    }

    /// Attaches a serialized payload.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header, replacing any previous value under the same name.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A completed exchange: status, headers and the whole body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: http::StatusCode,
    /// Consulted for `Content-Type` when classifying failures.
    pub headers: http::HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Creates a response carrying a JSON body and a matching `Content-Type`.
    #[must_use]
    pub fn json(status: http::StatusCode, body: impl Into<Vec<u8>>) -> Self {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json; charset=utf-8"),
        );
        Self::new(status, headers, body.into())
    }

    /// `2xx`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as text; `None` unless it is valid UTF-8.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Returns true if the `Content-Type` header declares a JSON body.
    ///
    /// A missing header counts as non-JSON.
    #[must_use]
    pub fn content_type_is_json(&self) -> bool {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.to_ascii_lowercase().contains("json"))
    }
}

/// The pluggable client behind [`Postmark`](crate::Postmark).
///
/// [`ReqwestClient`](super::ReqwestClient) talks to the network; anything
/// else implementing this trait can stand in for it, which is how the
/// engine is exercised without a live account.
///
/// # Example
///
/// ```
/// use http::StatusCode;
/// use postmark::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// /// Accepts every send without touching the network.
/// struct AcceptAll;
///
/// impl HttpClient for AcceptAll {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::json(StatusCode::OK, r#"{"ErrorCode":0,"Message":"OK"}"#))
///     }
/// }
///
/// let client = postmark::Postmark::new("token", "").with_client(AcceptAll);
/// assert_eq!(client.base_url(), postmark::DEFAULT_BASE_URL);
/// ```
pub trait HttpClient: Send + Sync {
    /// Performs one round-trip. Any status, 4xx and 5xx included, is a
    /// successful exchange here; classification happens in the engine.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] only when no response was obtained.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: HttpClient> HttpClient for std::sync::Arc<T> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}
