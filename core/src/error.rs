//! Error types for the PharmVar client.
//!
//! # Design
//! Callers mostly care about three kinds of failure: they passed bad
//! arguments, the service could not be reached or answered badly, or the
//! service answered successfully with nothing in it. `Error` keeps the
//! detail of each failure while `ErrorKind` collapses the variants into those
//! three groups.

use thiserror::Error;

use crate::http::{HttpMethod, TransportError};

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by `RestAdapter` and `PharmVarClient`.
#[derive(Debug, Error)]
pub enum Error {
    /// Contradictory or missing inputs. Raised before any request is sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request never produced a response: connection failure, timeout,
    /// malformed response, or a body over the transport's read limit.
    #[error("request failed: {method} {url}")]
    Transport {
        method: HttpMethod,
        url: String,
        #[source]
        source: TransportError,
    },

    /// A 2xx response whose body is not valid JSON or UTF-8 text, or does
    /// not have the expected shape.
    #[error("bad response body from endpoint: {endpoint}")]
    BadResponseBody {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// The service answered with a status outside 200-299.
    #[error("Request failed with status code {status}: {message}")]
    Api { status: u16, message: String },

    /// The service answered 2xx with an empty body.
    #[error("No data found for endpoint: {endpoint}")]
    NoData { endpoint: String },
}

/// Coarse classification of an `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Transport,
    NoData,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::Transport { .. } | Error::BadResponseBody { .. } | Error::Api { .. } => {
                ErrorKind::Transport
            }
            Error::NoData { .. } => ErrorKind::NoData,
        }
    }

    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
