//! Descriptor for a single outbound API call.

use http::Method;

/// One outbound API call, before it is turned into an HTTP request.
///
/// The payload type starts out as `()` (no body) and is replaced by
/// [`with_payload`](Self::with_payload).
///
/// # Example
///
/// ```
/// use postmark::Request;
///
/// let req = Request::get("templates")
///     .with_param("count", 10)
///     .with_param("offset", 0);
///
/// assert_eq!(req.path(), "templates");
/// assert_eq!(req.params().len(), 2);
/// assert!(!req.uses_account_auth());
/// ```
#[derive(Debug, Clone)]
pub struct Request<P = ()> {
    method: Method,
    path: String,
    params: Vec<(String, String)>,
    payload: Option<P>,
    account_auth: bool,
}

impl Request<()> {
    /// Creates a request without a payload.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            payload: None,
            account_auth: false,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }
}

impl<P> Request<P> {
    /// Attaches a payload to be serialized as the JSON body.
    #[must_use]
    pub fn with_payload<Q>(self, payload: Q) -> Request<Q> {
        Request {
            method: self.method,
            path: self.path,
            params: self.params,
            payload: Some(payload),
            account_auth: self.account_auth,
        }
    }

    /// Appends a query parameter. Order is preserved on the wire.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Authenticates with the account token instead of the server token.
    #[must_use]
    pub const fn with_account_auth(mut self) -> Self {
        self.account_auth = true;
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Path fragment relative to the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters in insertion order.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Payload, if one was attached.
    #[must_use]
    pub const fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Whether the account token authenticates this call.
    #[must_use]
    pub const fn uses_account_auth(&self) -> bool {
        self.account_auth
    }

    pub(crate) fn into_parts(self) -> RequestParts<P> {
        RequestParts {
            method: self.method,
            path: self.path,
            params: self.params,
            payload: self.payload,
            account_auth: self.account_auth,
        }
    }
}

pub(crate) struct RequestParts<P> {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub payload: Option<P>,
    pub account_auth: bool,
}
