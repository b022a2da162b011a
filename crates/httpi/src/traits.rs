//! Transport trait and exchange types
//!
//! Defines the [`Transport`] capability ("take a request, return a response or
//! an error") that [`HttpClient`](crate::HttpClient) delegates to instead of
//! performing network I/O directly.

use crate::error::{Result, TransportError};
use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;

/// HTTP request specification
///
/// Represents an HTTP request to be sent via the Transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,

    /// Request URL, including scheme and host
    pub url: String,

    /// Request headers
    pub headers: HashMap<String, String>,

    /// Request body (optional)
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Create a new HTTP request
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header to the request
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the request body from string
    pub fn with_text_body(mut self, text: impl Into<String>) -> Self {
        self.body = Some(text.into().into_bytes());
        self
    }

    /// Serialize `value` as the JSON body and set `Content-Type` accordingly.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Serialization`] if `value` cannot be serialized.
    pub fn with_json_body<T: serde::Serialize>(self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)?;
        Ok(self
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }

    /// Parse the request URL.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] if the URL is not absolute or malformed.
    pub fn parsed_url(&self) -> Result<url::Url> {
        url::Url::parse(&self.url).map_err(|e| TransportError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })
    }

    /// URL scheme (`"https"`, `"http"`, ...), or `None` if the URL does not parse.
    pub fn scheme(&self) -> Option<String> {
        self.parsed_url().ok().map(|u| u.scheme().to_string())
    }

    /// URL host, or `None` if the URL does not parse or has no host.
    pub fn host(&self) -> Option<String> {
        self.parsed_url()
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }
}

/// HTTP response
///
/// Either produced synthetically by an [`Interceptor`](crate::Interceptor)
/// or received from a real server through [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new HTTP response
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a response with no headers
    pub fn with_status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, HashMap::new(), body.into())
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Check if response is an error (4xx or 5xx)
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// Get the response body as a string
    pub fn text(&self) -> std::result::Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.clone())
    }

    /// Parse response body as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the response body cannot be parsed as valid JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(TransportError::from)
    }

    /// Get a header value by name (case-insensitive)
    pub fn get_header(&self, name: &str) -> Option<&str> {
        let name_lower = name.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == name_lower)
            .map(|(_, v)| v.as_str())
    }
}

/// The pluggable exchange capability behind an [`HttpClient`](crate::HttpClient).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Exchange a request for a response or an error.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Cast to `std::any::Any` for downcasting to concrete transports.
    fn as_any(&self) -> &dyn Any;
}
