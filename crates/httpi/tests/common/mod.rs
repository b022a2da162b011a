//! Common test utilities and helpers

use async_trait::async_trait;
use httpi::{HttpRequest, HttpResponse, Transport, TransportError};
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Body used by the custom producers in these tests
#[allow(dead_code)]
pub const TEST_BODY: &str = "test body";

/// Error returned by the custom validators and producers in these tests
#[allow(dead_code)]
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("test error")]
pub struct TestError;

/// Install a tracing subscriber once; honours `RUST_LOG`.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Validator that only lets `https` requests through
#[allow(dead_code)]
pub fn https_only(request: &HttpRequest) -> httpi::Result<()> {
    match request.scheme().as_deref() {
        Some("https") => Ok(()),
        _ => Err(TransportError::custom(TestError)),
    }
}

/// Transport stub that records every request it sees
#[allow(dead_code)]
pub struct RecordingTransport {
    status: u16,
    body: &'static str,
    seen: Mutex<Vec<HttpRequest>>,
}

#[allow(dead_code)]
impl RecordingTransport {
    pub fn new(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: HttpRequest) -> httpi::Result<HttpResponse> {
        self.seen.lock().unwrap().push(request);
        Ok(HttpResponse::with_status(self.status, self.body))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Counts how many times a closure was invoked
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

#[allow(dead_code)]
impl CallCounter {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
