//! The interceptor transport
//!
//! An [`Interceptor`] holds two replaceable behaviours, a response producer
//! and a request validator, and routes every exchange through them instead of
//! the network. When the producer is unset the exchange is delegated to a real
//! fallback transport.

use crate::error::{Result, TransportError};
use crate::http::HttpTransport;
use crate::options::{InterceptorOption, Options};
use crate::traits::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use ::http::StatusCode;
use std::any::Any;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::OnceCell;

/// Decides what response (or error) an exchange yields.
pub type ResponseProducer = Arc<dyn Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync>;

/// Decides whether a request is rejected before production.
pub type RequestValidator = Arc<dyn Fn(&HttpRequest) -> Result<()> + Send + Sync>;

/// Body returned by the default response producer.
pub const DEFAULT_RESPONSE_BODY: &str = "Hello from the interceptor!";

type Slot<T> = Arc<RwLock<Option<T>>>;

fn default_produce(_request: &HttpRequest) -> Result<HttpResponse> {
    Ok(HttpResponse::with_status(
        StatusCode::OK.as_u16(),
        DEFAULT_RESPONSE_BODY,
    ))
}

fn default_validate(_request: &HttpRequest) -> Result<()> {
    Ok(())
}

/// Producer used when none is configured: `200` with [`DEFAULT_RESPONSE_BODY`].
pub fn default_response_producer() -> ResponseProducer {
    Arc::new(default_produce)
}

/// Validator used when none is configured: every request passes.
pub fn default_request_validator() -> RequestValidator {
    Arc::new(default_validate)
}

fn read_slot<T: Clone>(slot: &Slot<T>) -> Option<T> {
    slot.read().unwrap_or_else(PoisonError::into_inner).clone()
}

fn replace_slot<T>(slot: &Slot<T>, value: Option<T>) -> Option<T> {
    let mut guard = slot.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *guard, value)
}

/// Handle returned by the interceptor's setters.
///
/// Holds the value a slot had immediately before the setter ran. Calling
/// [`Restore::restore`] puts that value back, which makes scoped overrides in
/// tests straightforward:
///
/// ```rust
/// # use httpi::{Interceptor, HttpResponse};
/// let interceptor = Interceptor::default();
/// let reset = interceptor.set_response_producer_fn(|_| Ok(HttpResponse::with_status(404, "")));
/// // ... exercise code under test ...
/// reset.restore();
/// ```
pub struct Restore<T> {
    slot: Slot<T>,
    previous: Option<T>,
}

impl<T> Restore<T> {
    /// Put back the value held before the setter call.
    pub fn restore(self) {
        replace_slot(&self.slot, self.previous);
    }

    /// Whether a value was set before the setter call.
    pub fn had_previous(&self) -> bool {
        self.previous.is_some()
    }
}

impl<T> fmt::Debug for Restore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Restore")
            .field("had_previous", &self.previous.is_some())
            .finish()
    }
}

/// A [`Transport`] that answers requests from configurable functions.
///
/// Validation always runs before production; a validation error ends the
/// exchange and the producer is never called. Both slots are guarded by
/// their own lock, so setters may be called while other tasks execute
/// requests; an in-flight exchange keeps using the functions it already read.
///
/// ```rust
/// use httpi::{Interceptor, HttpClient, with_request_validator, TransportError};
/// use std::sync::Arc;
///
/// let interceptor = Interceptor::new([with_request_validator(|req| {
///     match req.scheme().as_deref() {
///         Some("https") => Ok(()),
///         _ => Err(TransportError::Validation("https only".into())),
///     }
/// })]);
/// let client = HttpClient::new(Arc::new(interceptor));
/// ```
pub struct Interceptor {
    response_producer: Slot<ResponseProducer>,
    request_validator: Slot<RequestValidator>,
    fallback: OnceCell<Arc<dyn Transport>>,
}

impl Interceptor {
    /// Build an interceptor from zero or more options, applied in order.
    ///
    /// Fields not touched by any option keep the defaults
    /// ([`default_response_producer`], [`default_request_validator`]).
    pub fn new(options: impl IntoIterator<Item = InterceptorOption>) -> Self {
        Self::from_options(Options::from_iter(options))
    }

    pub(crate) fn from_options(options: Options) -> Self {
        Self {
            response_producer: Arc::new(RwLock::new(options.response_producer)),
            request_validator: Arc::new(RwLock::new(options.request_validator)),
            fallback: OnceCell::new_with(options.fallback),
        }
    }

    /// Replace the response producer.
    ///
    /// `None` sends subsequent exchanges to the fallback transport.
    pub fn set_response_producer(
        &self,
        producer: Option<ResponseProducer>,
    ) -> Restore<ResponseProducer> {
        tracing::trace!(set = producer.is_some(), "replacing response producer");
        let previous = replace_slot(&self.response_producer, producer);
        Restore {
            slot: Arc::clone(&self.response_producer),
            previous,
        }
    }

    /// Replace the response producer with a closure.
    pub fn set_response_producer_fn<F>(&self, f: F) -> Restore<ResponseProducer>
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync + 'static,
    {
        let producer: ResponseProducer = Arc::new(f);
        self.set_response_producer(Some(producer))
    }

    /// Replace the request validator.
    ///
    /// `None` skips validation entirely.
    pub fn set_request_validator(
        &self,
        validator: Option<RequestValidator>,
    ) -> Restore<RequestValidator> {
        tracing::trace!(set = validator.is_some(), "replacing request validator");
        let previous = replace_slot(&self.request_validator, validator);
        Restore {
            slot: Arc::clone(&self.request_validator),
            previous,
        }
    }

    /// Replace the request validator with a closure.
    pub fn set_request_validator_fn<F>(&self, f: F) -> Restore<RequestValidator>
    where
        F: Fn(&HttpRequest) -> Result<()> + Send + Sync + 'static,
    {
        let validator: RequestValidator = Arc::new(f);
        self.set_request_validator(Some(validator))
    }

    /// Whether a response producer is currently set.
    pub fn has_response_producer(&self) -> bool {
        read_slot(&self.response_producer).is_some()
    }

    /// Whether a request validator is currently set.
    pub fn has_request_validator(&self) -> bool {
        read_slot(&self.request_validator).is_some()
    }

    async fn fallback(&self) -> Result<&Arc<dyn Transport>> {
        self.fallback
            .get_or_try_init(|| async {
                tracing::debug!("building default network transport for fallback");
                let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new()?);
                Ok::<_, TransportError>(transport)
            })
            .await
    }
}

impl Default for Interceptor {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("response_producer", &self.has_response_producer())
            .field("request_validator", &self.has_request_validator())
            .field("fallback_ready", &self.fallback.initialized())
            .finish()
    }
}

#[async_trait]
impl Transport for Interceptor {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        if let Some(validate) = read_slot(&self.request_validator) {
            if let Err(err) = validate(&request) {
                tracing::debug!(method = %request.method, url = %request.url, error = %err, "request rejected by validator");
                return Err(err);
            }
        }

        if let Some(produce) = read_slot(&self.response_producer) {
            tracing::trace!(method = %request.method, url = %request.url, "producing synthetic response");
            return produce(&request);
        }

        tracing::debug!(method = %request.method, url = %request.url, "no response producer set, delegating to fallback transport");
        self.fallback().await?.execute(request).await
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Alias for [`Interceptor::new`].
pub fn new_transport(options: impl IntoIterator<Item = InterceptorOption>) -> Interceptor {
    Interceptor::new(options)
}
