//! Programmable HTTP transport interceptor
//!
//! `httpi` stands in for the transport layer of an HTTP client so tests and
//! development harnesses can run without real network calls. An
//! [`Interceptor`] lets a caller:
//!
//! - **validate** requests before they are "sent", rejecting them with an error
//! - **produce** a synthetic response in place of network I/O
//!
//! When no producer is set the interceptor hands the request to a real
//! fallback transport ([`HttpTransport`] unless another was injected).

#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! # Usage
//!
//! ```rust
//! use httpi::{HttpResponse, TransportError, with_request_validator, with_response_producer};
//!
//! # async fn example() -> httpi::Result<()> {
//! let client = httpi::new_client([
//!     with_response_producer(|_| Ok(HttpResponse::with_status(201, "test body"))),
//!     with_request_validator(|req| match req.scheme().as_deref() {
//!         Some("https") => Ok(()),
//!         _ => Err(TransportError::Validation("https only".into())),
//!     }),
//! ]);
//!
//! let response = client.get("https://example.com").await?;
//! assert_eq!(response.status, 201);
//! assert!(client.get("http://example.com").await.is_err());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod options;
pub mod traits;

// Re-export commonly used types
pub use client::{HttpClient, new_client, set_request_validator, set_response_producer};
pub use error::{Result, TransportError};
pub use http::{HttpTransport, HttpTransportConfig};
pub use interceptor::{
    DEFAULT_RESPONSE_BODY, Interceptor, RequestValidator, ResponseProducer, Restore,
    default_request_validator, default_response_producer, new_transport,
};
pub use options::{
    InterceptorOption, with_fallback_transport, with_request_validator, with_response_producer,
};
pub use traits::{HttpRequest, HttpResponse, Transport};
