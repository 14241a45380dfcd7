//! HTTP request executor
//!
//! One [`ApiClient`] per suite context issues every request. The error
//! contract is deliberately asymmetric: a 4xx/5xx status is logged and
//! returned as a normal [`ApiResponse`] so the test can assert on the
//! expected failure code, while timeouts, connection failures, and other
//! transport errors are logged and propagated as fatal. Do not flatten
//! the two sides into one.

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::error;

use crate::error::{ApiError, ApiResult};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A single request to the backend under test
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    endpoint: String,
    headers: Vec<(String, String)>,
    body: Option<RequestBody>,
    timeout: Duration,
}

#[derive(Debug, Clone)]
enum RequestBody {
    Json(Value),
    Text(String),
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            headers: Vec::new(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach `Authorization: Bearer <token>`
    pub fn bearer(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// JSON payload; reqwest sets the content type when none is given
    pub fn json(mut self, payload: Value) -> Self {
        self.body = Some(RequestBody::Json(payload));
        self
    }

    /// Raw text payload, for malformed-body scenarios where the bytes
    /// must go out verbatim under a JSON content type
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A completed exchange: status, headers, latency, and the raw body
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    elapsed: Duration,
    body: String,
}

impl ApiResponse {
    /// Assemble a response without a transport exchange (unit tests)
    pub fn from_parts(
        status: StatusCode,
        headers: HeaderMap,
        elapsed: Duration,
        body: impl Into<String>,
    ) -> Self {
        Self {
            status,
            headers,
            elapsed,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Header value as a string, when present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Wall-clock time from dispatch until response headers arrived
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON
    pub fn json(&self) -> ApiResult<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// HTTP client bound to the configured base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(ApiError::from_transport)?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Full request target for an endpoint path
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request, exactly once at the transport layer.
    ///
    /// An error *status* comes back as `Ok`; only transport failures
    /// come back as `Err`.
    pub async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = self.url(&request.endpoint);

        let mut builder = self
            .http
            .request(request.method.clone(), url.as_str())
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = match &request.body {
            Some(RequestBody::Json(payload)) => builder.json(payload),
            Some(RequestBody::Text(text)) => builder.body(text.clone()),
            None => builder,
        };

        let started = Instant::now();
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                let err = ApiError::from_transport(err);
                error!("{} {} failed: {}", request.method, url, err);
                return Err(err);
            }
        };
        let elapsed = started.elapsed();

        let status = response.status();
        let headers = response.headers().clone();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                let err = ApiError::from_transport(err);
                error!("{} {} body read failed: {}", request.method, url, err);
                return Err(err);
            }
        };

        if status.is_client_error() || status.is_server_error() {
            // Returned to the caller regardless; tests assert on it.
            error!("HTTP error {} from {} {}", status, request.method, url);
        }

        Ok(ApiResponse {
            status,
            headers,
            elapsed,
            body,
        })
    }
}
