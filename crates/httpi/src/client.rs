//! Generic HTTP client over a pluggable [`Transport`].
//!
//! [`new_client`] returns a client with an [`Interceptor`] already installed,
//! and [`set_response_producer`] / [`set_request_validator`] reach through a
//! client handle to that interceptor.

use crate::error::Result;
use crate::interceptor::{Interceptor, RequestValidator, ResponseProducer, Restore};
use crate::options::InterceptorOption;
use crate::traits::{HttpRequest, HttpResponse, Transport};
use std::fmt;
use std::sync::Arc;

/// Cheap-to-clone client that sends every request through its transport.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    /// Create a client backed by `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// The transport this client sends through.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// The installed interceptor, if the transport is one.
    pub fn interceptor(&self) -> Option<&Interceptor> {
        self.transport.as_any().downcast_ref::<Interceptor>()
    }

    /// Send a request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`](crate::TransportError::InvalidUrl)
    /// without reaching the transport when the URL does not parse; otherwise
    /// whatever the transport returns.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        request.parsed_url()?;
        self.transport.execute(request).await
    }

    /// Send a `GET` request to `url`.
    pub async fn get(&self, url: impl Into<String>) -> Result<HttpResponse> {
        self.send(HttpRequest::new("GET", url)).await
    }

    /// Send a `POST` request to `url` with `body`.
    pub async fn post(
        &self,
        url: impl Into<String>,
        body: impl Into<Vec<u8>>,
    ) -> Result<HttpResponse> {
        self.send(HttpRequest::new("POST", url).with_body(body.into()))
            .await
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("intercepted", &self.interceptor().is_some())
            .finish()
    }
}

/// Build a client whose transport is a new [`Interceptor`] configured with `options`.
pub fn new_client(options: impl IntoIterator<Item = InterceptorOption>) -> HttpClient {
    HttpClient::new(Arc::new(Interceptor::new(options)))
}

fn expect_interceptor(client: &HttpClient) -> &Interceptor {
    client
        .interceptor()
        .expect("client transport is not an Interceptor; build it with httpi::new_client")
}

/// Replace the response producer of the interceptor behind `client`.
///
/// # Panics
///
/// Panics if the client's transport is not an [`Interceptor`].
pub fn set_response_producer<F>(client: &HttpClient, f: F) -> Restore<ResponseProducer>
where
    F: Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync + 'static,
{
    expect_interceptor(client).set_response_producer_fn(f)
}

/// Replace the request validator of the interceptor behind `client`.
///
/// # Panics
///
/// Panics if the client's transport is not an [`Interceptor`].
pub fn set_request_validator<F>(client: &HttpClient, f: F) -> Restore<RequestValidator>
where
    F: Fn(&HttpRequest) -> Result<()> + Send + Sync + 'static,
{
    expect_interceptor(client).set_request_validator_fn(f)
}
