use std::{fmt, sync::Arc};

use reqwest::{
    blocking::{Client as HttpClient, RequestBuilder},
    header::USER_AGENT,
    Method, Url,
};

use crate::{
    client::{resolve, Config},
    errors::Result,
    host::base_url,
    transport::{default_transport, Transport},
    API_KEY_HEADER, DEFAULT_USER_AGENT,
};

/// Blocking counterpart of [`Client`](crate::Client), backed by
/// `reqwest::blocking`. Same construction rules; must not be built or
/// dropped inside an async runtime.
#[derive(Clone)]
pub struct BlockingClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    host: String,
    base_url: Url,
    api_key: String,
    user_agent: String,
    transport: Transport,
    http: HttpClient,
}

impl BlockingClient {
    pub fn new(cfg: Config) -> Result<Self> {
        let (host, base_url) = base_url(&cfg.hostname, &cfg.port)?;
        let transport = cfg.transport.unwrap_or_else(default_transport);
        let user_agent = cfg
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let http = transport.build_blocking()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(host = %host, "blocking powerdns client ready");

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

    pub fn host(&self) -> &str {
        &self.inner.host
    }

    pub fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    pub fn user_agent(&self) -> &str {
        &self.inner.user_agent
    }

    pub fn transport(&self) -> &Transport {
        &self.inner.transport
    }

    pub fn http(&self) -> &HttpClient {
        &self.inner.http
    }

    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = resolve(&self.inner.base_url, path)?;
        Ok(self
            .inner
            .http
            .request(method, url)
            .header(API_KEY_HEADER, self.inner.api_key.as_str())
            .header(USER_AGENT, self.inner.user_agent.as_str()))
    }

    pub fn get(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::GET, path)
    }
}

impl fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingClient")
            .field("host", &self.inner.host)
            .field("api_key", &"<redacted>")
            .field("user_agent", &self.inner.user_agent)
            .field("transport", &self.inner.transport)
            .finish()
    }
}
