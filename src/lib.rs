//! Minimal Rust client construction for the PowerDNS HTTP API.
#![cfg_attr(docsrs, feature(doc_cfg))]

use std::time::Duration;

/// Default User-Agent header value.
pub const DEFAULT_USER_AGENT: &str = concat!("pdns-rust/", env!("CARGO_PKG_VERSION"));

/// Default maximum number of idle pooled connections.
pub const DEFAULT_TRANSPORT_IDLE_CONNS: usize = 10;

/// Default lifetime of an idle pooled connection (15 seconds).
pub const DEFAULT_IDLE_CONN_TIMEOUT: Duration = Duration::from_secs(15);

/// Default connect timeout of the transport (15 seconds).
pub const DEFAULT_TRANSPORT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP header name PowerDNS reads the API key from.
pub const API_KEY_HEADER: &str = "X-API-Key";

mod client;
mod errors;
mod host;
mod transport;

#[cfg(feature = "blocking")]
mod blocking;

pub use client::{Client, Config};
pub use errors::{Error, InvalidHostError, Result, TransportError, ValidationError};
pub use host::{join_host_port, validate_host};
pub use transport::{default_transport, Transport};

#[cfg(feature = "blocking")]
pub use blocking::BlockingClient;
