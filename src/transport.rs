//! Connection-pool settings for the underlying HTTP client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{Result, TransportError},
    DEFAULT_IDLE_CONN_TIMEOUT, DEFAULT_TRANSPORT_IDLE_CONNS, DEFAULT_TRANSPORT_TIMEOUT,
};

/// Transport configuration (defaults: 10 idle connections, 15s idle timeout,
/// compression disabled).
///
/// Every `Transport` is an independent value; tune it before handing it to
/// [`Client::with_transport`](crate::Client::with_transport).
///
/// ```
/// use std::time::Duration;
///
/// let transport = pdns::default_transport()
///     .with_idle_connection_timeout(Duration::from_secs(200));
/// let client = pdns::Client::with_transport(
///     "foobar.org",
///     "8080",
///     "changeme",
///     "my-user-agent",
///     transport,
/// )?;
/// # Ok::<(), pdns::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transport {
    /// Maximum idle connections kept in the pool.
    pub max_idle_connections: usize,
    /// How long an idle connection is kept before it is closed.
    pub idle_connection_timeout: Duration,
    /// Do not advertise or decode compressed responses.
    pub disable_compression: bool,
    /// Timeout for establishing a connection.
    pub connect_timeout: Option<Duration>,
    /// Overall per-request timeout; unset means no limit.
    pub timeout: Option<Duration>,
}

/// Returns the default transport settings as a fresh value.
pub fn default_transport() -> Transport {
    Transport {
        max_idle_connections: DEFAULT_TRANSPORT_IDLE_CONNS,
        idle_connection_timeout: DEFAULT_IDLE_CONN_TIMEOUT,
        disable_compression: true,
        connect_timeout: Some(DEFAULT_TRANSPORT_TIMEOUT),
        timeout: None,
    }
}

impl Default for Transport {
    fn default() -> Self {
        default_transport()
    }
}

impl Transport {
    /// Parse a (possibly partial) JSON document; missing fields take the defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Override the maximum number of idle pooled connections.
    pub fn with_max_idle_connections(mut self, max: usize) -> Self {
        self.max_idle_connections = max;
        self
    }

    /// Override how long an idle connection stays in the pool.
    pub fn with_idle_connection_timeout(mut self, timeout: Duration) -> Self {
        self.idle_connection_timeout = timeout;
        self
    }

    /// Enable or disable response compression (gzip, brotli, deflate).
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.disable_compression = !enabled;
        self
    }

    /// Override the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Override the overall request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the pooled async HTTP client.
    ///
    /// The client talks to a single host, so the per-host idle limit is the
    /// pool-wide limit.
    pub(crate) fn build_http(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(self.max_idle_connections)
            .pool_idle_timeout(self.idle_connection_timeout);
        if self.disable_compression {
            builder = builder.no_gzip().no_brotli().no_deflate();
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(|err| build_error(err).into())
    }

    #[cfg(feature = "blocking")]
    pub(crate) fn build_blocking(&self) -> Result<reqwest::blocking::Client> {
        let mut builder = reqwest::blocking::Client::builder()
            .pool_max_idle_per_host(self.max_idle_connections)
            .pool_idle_timeout(self.idle_connection_timeout)
            .timeout(self.timeout);
        if self.disable_compression {
            builder = builder.no_gzip().no_brotli().no_deflate();
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        builder.build().map_err(|err| build_error(err).into())
    }
}

fn build_error(err: reqwest::Error) -> TransportError {
    TransportError {
        message: "failed to build http client".to_string(),
        source: Some(err),
    }
}
