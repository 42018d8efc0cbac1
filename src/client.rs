use std::{fmt, sync::Arc};

use reqwest::{header::USER_AGENT, Method, Url};

use crate::{
    errors::{Result, ValidationError},
    host::base_url,
    transport::{default_transport, Transport},
    API_KEY_HEADER, DEFAULT_USER_AGENT,
};

/// Client construction options.
#[derive(Clone, Default)]
pub struct Config {
    pub hostname: String,
    pub port: String,
    /// Sent verbatim as `X-API-Key`; never validated locally.
    pub api_key: String,
    /// Defaults to [`DEFAULT_USER_AGENT`]. A supplied value, empty or not, is kept as is.
    pub user_agent: Option<String>,
    /// Defaults to [`default_transport`].
    pub transport: Option<Transport>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("api_key", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("transport", &self.transport)
            .finish()
    }
}

/// A configured PowerDNS API client.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    host: String,
    base_url: Url,
    api_key: String,
    user_agent: String,
    transport: Transport,
    http: reqwest::Client,
}

impl Client {
    pub fn new(cfg: Config) -> Result<Self> {
        let (host, base_url) = base_url(&cfg.hostname, &cfg.port)?;
        let transport = cfg.transport.unwrap_or_else(default_transport);
        let user_agent = cfg
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let http = transport.build_http()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            host = %host,
            max_idle_connections = transport.max_idle_connections,
            idle_timeout_ms = transport.idle_connection_timeout.as_millis() as u64,
            compression = !transport.disable_compression,
            "powerdns client ready"
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                host,
                base_url,
                api_key: cfg.api_key,
                user_agent,
                transport,
                http,
            }),
        })
    }

    /// Client with a caller-supplied transport and user agent.
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// let transport = pdns::Transport {
    ///     idle_connection_timeout: Duration::from_secs(200),
    ///     ..Default::default()
    /// };
    /// let client = pdns::Client::with_transport(
    ///     "foobar.org",
    ///     "8080",
    ///     "changeme",
    ///     "my-user-agent",
    ///     transport,
    /// )?;
    /// assert_eq!(client.host(), "http://foobar.org:8080/");
    /// # Ok::<(), pdns::Error>(())
    /// ```
    pub fn with_transport(
        hostname: impl Into<String>,
        port: impl Into<String>,
        api_key: impl Into<String>,
        user_agent: impl Into<String>,
        transport: Transport,
    ) -> Result<Self> {
        Self::new(Config {
            hostname: hostname.into(),
            port: port.into(),
            api_key: api_key.into(),
            user_agent: Some(user_agent.into()),
            transport: Some(transport),
        })
    }

    /// Client with the default transport and [`DEFAULT_USER_AGENT`].
    pub fn with_defaults(
        hostname: impl Into<String>,
        port: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        Self::new(Config {
            hostname: hostname.into(),
            port: port.into(),
            api_key: api_key.into(),
            ..Default::default()
        })
    }

    /// Canonical base URL, e.g. `http://foo.org:8081/`.
    pub fn host(&self) -> &str {
        &self.inner.host
    }

    pub fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    pub fn user_agent(&self) -> &str {
        &self.inner.user_agent
    }

    /// Transport settings the connection pool was built with.
    pub fn transport(&self) -> &Transport {
        &self.inner.transport
    }

    /// The pooled HTTP client, for requests not covered by [`Client::request`].
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Prepare a request for `path` relative to the base URL, carrying the
    /// API key and user agent. Nothing is sent.
    pub fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder> {
        let url = resolve(&self.inner.base_url, path)?;
        Ok(self
            .inner
            .http
            .request(method, url)
            .header(API_KEY_HEADER, self.inner.api_key.as_str())
            .header(USER_AGENT, self.inner.user_agent.as_str()))
    }

    pub fn get(&self, path: &str) -> Result<reqwest::RequestBuilder> {
        self.request(Method::GET, path)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("host", &self.inner.host)
            .field("api_key", &"<redacted>")
            .field("user_agent", &self.inner.user_agent)
            .field("transport", &self.inner.transport)
            .finish()
    }
}

/// Join `path` onto the base URL, refusing anything that leaves the server.
pub(crate) fn resolve(base: &Url, path: &str) -> Result<Url> {
    let url = base.join(path.trim_start_matches('/')).map_err(|err| {
        ValidationError::new(format!("invalid path {path:?}: {err}")).with_field("path")
    })?;
    if url.origin() != base.origin() {
        return Err(ValidationError::new(format!(
            "path {path:?} points outside {}",
            base.as_str()
        ))
        .with_field("path")
        .into());
    }
    Ok(url)
}
