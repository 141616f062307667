//! Synchronous client for the PharmVar pharmacogenomics API.
//!
//! # Overview
//! Fills fixed endpoint templates, sends one blocking HTTPS request per
//! call, and decodes the responses into typed variant records.
//!
//! # Design
//! - `VariantEndpoint` is the only way to form a request path.
//! - `RestAdapter` turns an endpoint into an `HttpRequest`, runs it through
//!   a `Transport` and interprets the `HttpResponse`. `UreqTransport` is the
//!   default transport; tests plug in their own.
//! - `PharmVarClient` exposes one method per query and never keeps state
//!   between calls.
//! - Logging goes through the `tracing::Dispatch` on `ClientConfig`, which
//!   is a no-op unless one is supplied.

pub mod adapter;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod types;

pub use adapter::{ApiResult, Payload, RestAdapter};
pub use client::{PharmVarClient, VariantLocator};
pub use config::ClientConfig;
pub use endpoints::VariantEndpoint;
pub use error::{Error, ErrorKind, Result};
pub use http::{
    HttpMethod, HttpRequest, HttpResponse, ResponseFormat, Transport, TransportError, UreqTransport, DEFAULT_BODY_LIMIT,
};
pub use types::{Variant, VariantCollection};
