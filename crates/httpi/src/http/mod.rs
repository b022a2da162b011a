//! Real HTTP transport
//!
//! The network-backed [`Transport`](crate::Transport) used on the
//! interceptor's fallback path.

pub mod client;

pub use client::{HttpTransport, HttpTransportConfig};
