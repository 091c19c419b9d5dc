//! HTTP transport: one GET round trip per call, no retries.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, StatusCode};
use url::Url;

use crate::error::{CmcError, Result};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default maximum idle connections per host.
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Default idle timeout in seconds.
pub const DEFAULT_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Header names to values, applied to the outgoing request as given.
pub type Headers = BTreeMap<String, String>;

/// A GET request ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct GetRequest {
    pub url: Url,
    pub headers: Headers,
}

impl GetRequest {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            headers: Headers::new(),
        }
    }

    pub fn with_headers(mut self, headers: &Headers) -> Self {
        self.headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Status and fully read body of a response.
///
/// Any status code is returned as is; interpreting it is left to the caller.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Shorthand for a 200 response, handy in tests and fakes.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

/// Capability to execute a GET request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: GetRequest) -> Result<RawResponse>;
}

/// Configuration for building an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Timeout for the whole request/response cycle.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_max_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

impl HttpClientConfig {
    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connect timeout.
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the transport.
    pub fn build(self) -> Result<HttpTransport> {
        let mut builder = HttpClient::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .pool_idle_timeout(self.pool_idle_timeout);
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.as_str());
        }
        let client = builder
            .build()
            .map_err(|e| CmcError::request(format!("cannot build HTTP client: {e}")))?;
        Ok(HttpTransport { client })
    }
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: HttpClient,
}

impl HttpTransport {
    /// Builds a transport with the default 30 second timeout.
    pub fn new() -> Result<Self> {
        HttpClientConfig::default().build()
    }

    fn header_map(headers: &Headers) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| CmcError::request(format!("invalid header name {name:?}: {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| CmcError::request(format!("invalid value for header {name}: {e}")))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: GetRequest) -> Result<RawResponse> {
        let scheme = request.url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(CmcError::request(format!(
                "unsupported URL scheme {scheme:?} in {}",
                request.url
            )));
        }

        let headers = Self::header_map(&request.headers)?;
        let req = self
            .client
            .get(request.url)
            .headers(headers)
            .build()
            .map_err(|e| CmcError::request(e.to_string()))?;

        log::debug!("http.get url={}", req.url());
        let response = self.client.execute(req).await.map_err(CmcError::transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(CmcError::transport)?;
        log::debug!("http.response status={} bytes={}", status.as_u16(), body.len());

        Ok(RawResponse { status, body })
    }
}
