//! Shared test fixtures for exercising the engine and facades.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::client::Postmark;
use crate::time::Clock;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Base URL used by engine tests; never resolved.
pub const TEST_BASE_URL: &str = "https://api.test.invalid";

/// HTTP client that records every request and replays queued responses.
///
/// Once the queue is empty it answers `200 {}`.
#[derive(Debug, Default)]
pub struct RecordingClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Client answering once with a JSON body.
    pub fn json(status: http::StatusCode, body: &str) -> Arc<Self> {
        Self::new(vec![Ok(HttpResponse::json(status, body))])
    }

    /// Client answering once with an arbitrary content type.
    pub fn typed(status: http::StatusCode, content_type: &'static str, body: &str) -> Arc<Self> {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static(content_type),
        );
        Self::new(vec![Ok(HttpResponse::new(
            status,
            headers,
            body.as_bytes().to_vec(),
        ))])
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The single request sent so far.
    pub fn only_request(&self) -> HttpRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }

    /// Body of the single request, parsed as JSON.
    pub fn only_body(&self) -> serde_json::Value {
        let body = self.only_request().body.expect("request has a body");
        serde_json::from_slice(&body).unwrap()
    }
}

impl HttpClient for RecordingClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(HttpResponse::json(http::StatusCode::OK, "{}")))
    }
}

/// HTTP client that never answers.
#[derive(Debug, Default)]
pub struct HangingClient;

impl HttpClient for HangingClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        std::future::pending().await
    }
}

/// Root client with fixed tokens pointed at [`TEST_BASE_URL`].
pub fn postmark<H>(client: H) -> Postmark<H> {
    Postmark::new("server-token", "account-token")
        .with_base_url(TEST_BASE_URL)
        .with_client(client)
}

/// Clock held at a given UNIX timestamp until advanced.
#[derive(Debug)]
pub struct FixedClock {
    secs: AtomicI64,
}

impl FixedClock {
    pub fn at(secs: i64) -> Self {
        Self {
            secs: AtomicI64::new(secs),
        }
    }

    pub fn advance(&self, secs: i64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.secs.load(Ordering::SeqCst), 0)
            .unwrap()
    }
}

/// Builds a template model from a JSON object literal.
pub fn model(value: serde_json::Value) -> crate::emails::TemplateModel {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("model must be a JSON object, got {other}"),
    }
}
