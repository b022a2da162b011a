//! Construction-time configuration for [`Interceptor`](crate::Interceptor).
//!
//! Options are plain values applied in order; when two options touch the same
//! field, the later one wins.

use crate::error::Result;
use crate::interceptor::{
    RequestValidator, ResponseProducer, default_request_validator, default_response_producer,
};
use crate::traits::{HttpRequest, HttpResponse, Transport};
use std::fmt;
use std::sync::Arc;

/// Transient record the options are applied to.
pub(crate) struct Options {
    pub(crate) response_producer: Option<ResponseProducer>,
    pub(crate) request_validator: Option<RequestValidator>,
    pub(crate) fallback: Option<Arc<dyn Transport>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            response_producer: Some(default_response_producer()),
            request_validator: Some(default_request_validator()),
            fallback: None,
        }
    }
}

impl FromIterator<InterceptorOption> for Options {
    fn from_iter<I: IntoIterator<Item = InterceptorOption>>(iter: I) -> Self {
        let mut options = Self::default();
        for option in iter {
            option.apply(&mut options);
        }
        options
    }
}

#[derive(Clone)]
enum Modifier {
    ResponseProducer(Option<ResponseProducer>),
    RequestValidator(Option<RequestValidator>),
    FallbackTransport(Arc<dyn Transport>),
}

/// A single configuration modifier for [`Interceptor::new`](crate::Interceptor::new).
#[derive(Clone)]
pub struct InterceptorOption(Modifier);

impl InterceptorOption {
    /// Set the response producer. `None` means "delegate to the fallback transport".
    pub fn response_producer(producer: Option<ResponseProducer>) -> Self {
        Self(Modifier::ResponseProducer(producer))
    }

    /// Set the request validator. `None` means "skip validation".
    pub fn request_validator(validator: Option<RequestValidator>) -> Self {
        Self(Modifier::RequestValidator(validator))
    }

    fn apply(self, options: &mut Options) {
        match self.0 {
            Modifier::ResponseProducer(producer) => options.response_producer = producer,
            Modifier::RequestValidator(validator) => options.request_validator = validator,
            Modifier::FallbackTransport(transport) => options.fallback = Some(transport),
        }
    }
}

impl fmt::Debug for InterceptorOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Modifier::ResponseProducer(p) => f
                .debug_tuple("ResponseProducer")
                .field(&p.is_some())
                .finish(),
            Modifier::RequestValidator(v) => f
                .debug_tuple("RequestValidator")
                .field(&v.is_some())
                .finish(),
            Modifier::FallbackTransport(_) => f.write_str("FallbackTransport"),
        }
    }
}

/// Use `f` to produce the response for every exchange.
pub fn with_response_producer<F>(f: F) -> InterceptorOption
where
    F: Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync + 'static,
{
    let producer: ResponseProducer = Arc::new(f);
    InterceptorOption::response_producer(Some(producer))
}

/// Run `f` on every request before a response is produced.
pub fn with_request_validator<F>(f: F) -> InterceptorOption
where
    F: Fn(&HttpRequest) -> Result<()> + Send + Sync + 'static,
{
    let validator: RequestValidator = Arc::new(f);
    InterceptorOption::request_validator(Some(validator))
}

/// Transport used when no response producer is set.
///
/// Without this option the interceptor lazily builds an
/// [`HttpTransport`](crate::HttpTransport) on first use.
pub fn with_fallback_transport(transport: Arc<dyn Transport>) -> InterceptorOption {
    InterceptorOption(Modifier::FallbackTransport(transport))
}
