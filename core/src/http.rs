//! HTTP transport types and the blocking ureq transport.
//!
//! # Design
//! Requests and responses are plain data. `RestAdapter` builds an
//! `HttpRequest`, hands it to a `Transport`, and interprets the
//! `HttpResponse` it gets back. The transport is the only place that touches
//! the network, so everything above it can be driven by an in-memory
//! transport in tests.
//!
//! A transport reports non-2xx statuses as ordinary responses. Only failures
//! that leave no response to interpret (connect errors, timeouts, bodies over
//! the read limit) come back as `Err`. Bodies are handed up as raw bytes;
//! decoding them is the adapter's job.

use std::fmt;

/// Boxed cause of a failed round-trip, preserved as the source of
/// `Error::Transport`.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Largest response body `UreqTransport` reads by default. The full
/// `variants` dump runs to tens of megabytes.
pub const DEFAULT_BODY_LIMIT: u64 = 256 * 1024 * 1024;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the response body should be decoded. Also decides the `Accept`
/// header sent with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Text,
}

impl ResponseFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ResponseFormat::Json => "application/json",
            ResponseFormat::Text => "text/plain",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase for `status`, empty when the status has none.
    pub reason: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Executes one HTTP round-trip.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// Status codes are never turned into errors by the agent. No request
/// timeout is configured beyond ureq's own defaults.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    verify_tls: bool,
    body_limit: u64,
}

impl UreqTransport {
    /// Build a transport. `verify_tls = false` accepts any server
    /// certificate.
    pub fn new(verify_tls: bool) -> Self {
        let tls = ureq::tls::TlsConfig::builder()
            .disable_verification(!verify_tls)
            .build();
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .tls_config(tls)
            .build()
            .new_agent();
        Self {
            agent,
            verify_tls,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Cap on response body size in bytes. A longer body fails the request.
    pub fn with_body_limit(mut self, limit: u64) -> Self {
        self.body_limit = limit;
        self
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    pub fn body_limit(&self) -> u64 {
        self.body_limit
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("verify_tls", &self.verify_tls)
            .field("body_limit", &self.body_limit)
            .finish_non_exhaustive()
    }
}

fn prepare<B>(builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
    let builder = request
        .headers
        .iter()
        .fold(builder, |b, (key, value)| b.header(key.as_str(), value.as_str()));
    request
        .query
        .iter()
        .fold(builder, |b, (key, value)| b.query(key, value))
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let body = request.body.as_deref();

        let mut response = match (request.method, body) {
            (HttpMethod::Get, _) => prepare(self.agent.get(url), request).call(),
            (HttpMethod::Delete, _) => prepare(self.agent.delete(url), request).call(),
            (HttpMethod::Post, Some(body)) => prepare(self.agent.post(url), request).send(body.as_bytes()),
            (HttpMethod::Post, None) => prepare(self.agent.post(url), request).send_empty(),
            (HttpMethod::Put, Some(body)) => prepare(self.agent.put(url), request).send(body.as_bytes()),
            (HttpMethod::Put, None) => prepare(self.agent.put(url), request).send_empty(),
        }?;

        let status = response.status();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.body_limit)
            .read_to_vec()?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
