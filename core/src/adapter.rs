//! Low-level request dispatch against the PharmVar API service.
//!
//! # Design
//! `RestAdapter` owns immutable configuration and a `Transport`. A call is
//! split the same way on every path: `build_request` produces an
//! `HttpRequest`, the transport executes it, and `parse_response` turns the
//! `HttpResponse` into an `ApiResult` or an `Error`. Each stage can be
//! exercised on its own.
//!
//! A 2xx response with an empty body is a `NoData` error, not an empty
//! result. Callers treating "nothing found" as a normal outcome have to match
//! on `Error::NoData`.

use std::fmt;

use serde_json::Value;
use tracing::{debug, error, Dispatch};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, ResponseFormat, Transport, TransportError, UreqTransport};

/// Decoded body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Empty text, `null`, `false`, `0`, `""`, `[]` and `{}` all count as
    /// empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Text(text) => text.is_empty(),
            Payload::Json(value) => match value {
                Value::Null => true,
                Value::Bool(b) => !b,
                Value::Number(n) => n.as_f64() == Some(0.0),
                Value::String(s) => s.is_empty(),
                Value::Array(items) => items.is_empty(),
                Value::Object(map) => map.is_empty(),
            },
        }
    }
}

/// Result envelope of one successful round-trip.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult {
    pub status_code: u16,
    /// Reason phrase of the response status.
    pub message: String,
    pub data: Payload,
}

impl ApiResult {
    /// Interpret the payload as a JSON array of records.
    pub fn into_records(self, endpoint: &str) -> Result<Vec<Value>> {
        let decoded = match self.data {
            Payload::Json(value) => serde_json::from_value(value),
            Payload::Text(text) => serde_json::from_str(&text),
        };
        decoded.map_err(|source| Error::BadResponseBody {
            endpoint: endpoint.to_string(),
            source: source.into(),
        })
    }

    /// The payload as text. JSON payloads are re-encoded.
    pub fn into_text(self) -> String {
        match self.data {
            Payload::Text(text) => text,
            Payload::Json(value) => value.to_string(),
        }
    }
}

/// Issues single requests against `https://{host}/` through a `Transport`.
pub struct RestAdapter<T = UreqTransport> {
    base_url: String,
    api_key: String,
    version: String,
    logger: Dispatch,
    transport: T,
}

impl RestAdapter<UreqTransport> {
    /// Adapter with a ureq transport honouring `config.verify_tls`.
    pub fn from_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.verify_tls);
        Self::new(config, transport)
    }
}

impl<T: Transport> RestAdapter<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        let base_url = format!("https://{}/", normalize_host(&config.host));
        if !config.verify_tls {
            tracing::dispatcher::with_default(&config.logger, || {
                debug!(base_url = %base_url, "TLS certificate verification disabled");
            });
        }
        Self {
            base_url,
            api_key: config.api_key,
            version: config.version,
            logger: config.logger,
            transport,
        }
    }

    /// Base URL every endpoint path is appended to, with a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured API key. Not sent with requests.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Describe a request without sending it.
    pub fn build_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &[(&str, &str)],
        body: Option<&str>,
        format: ResponseFormat,
    ) -> HttpRequest {
        let mut headers = vec![("Accept".to_string(), format.mime().to_string())];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url: format!("{}{}", self.base_url, endpoint.trim_start_matches('/')),
            headers,
            query: params
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            body: body.map(str::to_string),
        }
    }

    /// Send one request and interpret the response.
    pub fn execute(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &[(&str, &str)],
        body: Option<&str>,
        format: ResponseFormat,
    ) -> Result<ApiResult> {
        tracing::dispatcher::with_default(&self.logger, || {
            let request = self.build_request(method, endpoint, params, body, format);
            debug!(method = %method, url = %request.url, params = ?params, "sending request");

            let response = self.transport.execute(&request).map_err(|source| {
                error!(method = %method, url = %request.url, error = %source, "request failed");
                Error::Transport {
                    method,
                    url: request.url.clone(),
                    source,
                }
            })?;

            self.parse_response(endpoint, format, response)
        })
    }

    /// GET a JSON resource.
    pub fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<ApiResult> {
        self.execute(HttpMethod::Get, endpoint, params, None, ResponseFormat::Json)
    }

    /// Interpret a response to a request for `endpoint`.
    pub fn parse_response(
        &self,
        endpoint: &str,
        format: ResponseFormat,
        response: HttpResponse,
    ) -> Result<ApiResult> {
        tracing::dispatcher::with_default(&self.logger, || interpret(endpoint, format, response))
    }
}

fn interpret(endpoint: &str, format: ResponseFormat, response: HttpResponse) -> Result<ApiResult> {
    let status = response.status;
    let reason = if response.reason.is_empty() {
        "Unknown".to_string()
    } else {
        response.reason.clone()
    };

    if !response.is_success() {
        // Error bodies are JSON whatever the requested format.
        let message = error_message(&response.body).unwrap_or(reason);
        error!(endpoint, success = false, status_code = status, message = %message, "request failed");
        return Err(Error::Api { status, message });
    }

    let payload = match decode(response.body, format) {
        Ok(payload) => payload,
        Err(source) => {
            error!(endpoint, success = false, status_code = status, error = %source, "bad response body");
            return Err(Error::BadResponseBody {
                endpoint: endpoint.to_string(),
                source,
            });
        }
    };

    match payload {
        Some(data) if !data.is_empty() => {
            debug!(endpoint, success = true, status_code = status, message = %reason, "request succeeded");
            Ok(ApiResult {
                status_code: status,
                message: reason,
                data,
            })
        }
        _ => {
            error!(endpoint, status_code = status, "no data found");
            Err(Error::NoData {
                endpoint: endpoint.to_string(),
            })
        }
    }
}

/// `errorMessage` of a JSON object body.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("errorMessage")?.as_str().map(str::to_string)
}

/// `Ok(None)` for a JSON response with a blank body.
fn decode(body: Vec<u8>, format: ResponseFormat) -> std::result::Result<Option<Payload>, TransportError> {
    match format {
        ResponseFormat::Text => Ok(Some(Payload::Text(String::from_utf8(body)?))),
        ResponseFormat::Json if body.iter().all(u8::is_ascii_whitespace) => Ok(None),
        ResponseFormat::Json => Ok(Some(Payload::Json(serde_json::from_slice(&body)?))),
    }
}

fn normalize_host(host: &str) -> &str {
    let host = host.trim();
    let host = host
        .strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host);
    host.trim_matches('/')
}

impl<T: fmt::Debug> fmt::Debug for RestAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestAdapter")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("version", &self.version)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}
