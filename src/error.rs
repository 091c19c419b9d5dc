//! Error types for the CoinMarketCap data client.
//!
//! Every stage of the request pipeline (query building, transport, decoding,
//! client orchestration) reports failures through [`CmcError`]. Errors travel
//! up unchanged; [`CmcError::stage`] tells which stage raised them.

/// Boxed source error for transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for the CoinMarketCap client.
#[derive(Debug, thiserror::Error)]
pub enum CmcError {
    /// Base URL could not be parsed.
    #[error("malformed URL {url:?}: {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request could not be formed (bad scheme, header, or parameter).
    #[error("cannot construct request: {0}")]
    RequestConstruction(String),

    /// Connection, DNS, timeout or body read failure.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Response body did not match the expected JSON shape.
    #[error("failed to decode response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The API reported an error in its status envelope.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    /// Symbol lookup succeeded but returned no candidates.
    #[error("no coin matches symbol {symbol:?}")]
    NoMatchFound { symbol: String },

    /// A listing record carried no quotes.
    #[error("{symbol} has no quotes")]
    MissingQuote { symbol: String },

    /// The call was cancelled through its context.
    #[error("call cancelled")]
    Cancelled,

    /// The context deadline elapsed before the call completed.
    #[error("call deadline exceeded")]
    DeadlineExceeded,
}

/// A specialized Result type for client operations.
pub type Result<T> = std::result::Result<T, CmcError>;

impl CmcError {
    /// Creates a transport error from any error source.
    pub fn transport<E: Into<BoxError>>(err: E) -> Self {
        Self::Transport(err.into())
    }

    /// Creates a request construction error.
    pub fn request<S: Into<String>>(msg: S) -> Self {
        Self::RequestConstruction(msg.into())
    }

    /// Name of the pipeline stage that raised this error.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::MalformedUrl { .. } => "query",
            Self::RequestConstruction(_) | Self::Transport(_) => "transport",
            Self::Decode { .. } | Self::Api { .. } => "decode",
            Self::NoMatchFound { .. } | Self::Cancelled | Self::DeadlineExceeded => "client",
            Self::MissingQuote { .. } => "presentation",
        }
    }

    /// True when the transport gave up because the request timed out.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(source) => source
                .downcast_ref::<reqwest::Error>()
                .is_some_and(reqwest::Error::is_timeout),
            _ => false,
        }
    }
}
