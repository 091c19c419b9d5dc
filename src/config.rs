use std::env;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::endpoint::{ApiHosts, DEFAULT_V1_BASE_URL, DEFAULT_V3_BASE_URL};
use crate::client::http::{HttpClientConfig, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};

fn default_user_agent() -> String {
    format!("cmc-cli/{}", env!("CARGO_PKG_VERSION"))
}

/// Reads settings from a key lookup, treating blank values as unset.
struct Lookup<F> {
    source: F,
}

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.source)(key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn get_u64(&self, key: &str, default: u64) -> Result<u64> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => Ok(v
                .parse::<u64>()
                .map_err(|e| anyhow!("{key} invalid int: {e}"))?),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // Network
    pub api_v1_base_url: String,
    pub api_v3_base_url: String,
    pub http_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_v1_base_url: DEFAULT_V1_BASE_URL.to_string(),
            api_v3_base_url: DEFAULT_V3_BASE_URL.to_string(),
            http_timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

impl Settings {
    /// Loads settings from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads settings from any key lookup.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Lookup { source: get };
        let s = Self {
            api_v1_base_url: vars.get_string("CMC_API_V1_BASE_URL", DEFAULT_V1_BASE_URL),
            api_v3_base_url: vars.get_string("CMC_API_V3_BASE_URL", DEFAULT_V3_BASE_URL),
            http_timeout_secs: vars.get_u64("CMC_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            connect_timeout_secs: vars.get_u64("CMC_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
            user_agent: vars.get_string("CMC_USER_AGENT", &default_user_agent()),
        };

        s.validate()?;
        Ok(s)
    }

    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("CMC_API_V1_BASE_URL", &self.api_v1_base_url),
            ("CMC_API_V3_BASE_URL", &self.api_v3_base_url),
        ] {
            let url = Url::parse(value).map_err(|e| anyhow!("{key} invalid URL {value:?}: {e}"))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(anyhow!("{key} must be an http(s) URL (got {value})"));
            }
        }
        if self.http_timeout_secs < 1 {
            return Err(anyhow!(
                "CMC_HTTP_TIMEOUT_SECS must be >= 1 (got {})",
                self.http_timeout_secs
            ));
        }
        if self.connect_timeout_secs < 1 || self.connect_timeout_secs > self.http_timeout_secs {
            return Err(anyhow!(
                "CMC_CONNECT_TIMEOUT_SECS must be between 1 and CMC_HTTP_TIMEOUT_SECS \
                 (connect_timeout_secs={} http_timeout_secs={})",
                self.connect_timeout_secs,
                self.http_timeout_secs
            ));
        }
        Ok(())
    }

    pub fn api_hosts(&self) -> ApiHosts {
        ApiHosts::new(&self.api_v1_base_url, &self.api_v3_base_url)
    }

    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::default()
            .with_timeout(Duration::from_secs(self.http_timeout_secs))
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .with_user_agent(&self.user_agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = load(&[]).unwrap();
        assert_eq!(s.api_v1_base_url, DEFAULT_V1_BASE_URL);
        assert_eq!(s.api_v3_base_url, DEFAULT_V3_BASE_URL);
        assert_eq!(s.http_timeout_secs, 30);
        assert_eq!(s.connect_timeout_secs, 10);
        assert!(s.user_agent.starts_with("cmc-cli/"));
    }

    #[test]
    fn test_overrides_and_blank_values() {
        let s = load(&[
            ("CMC_API_V1_BASE_URL", " http://127.0.0.1:8080/v1 "),
            ("CMC_API_V3_BASE_URL", "   "),
            ("CMC_HTTP_TIMEOUT_SECS", "45"),
        ])
        .unwrap();
        assert_eq!(s.api_v1_base_url, "http://127.0.0.1:8080/v1");
        assert_eq!(s.api_v3_base_url, DEFAULT_V3_BASE_URL);
        assert_eq!(s.http_config().timeout, Duration::from_secs(45));
        assert_eq!(s.api_hosts().v1, "http://127.0.0.1:8080/v1");
    }

    #[test]
    fn test_invalid_int() {
        let err = load(&[("CMC_HTTP_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("CMC_HTTP_TIMEOUT_SECS invalid int"));
    }

    #[test]
    fn test_rejects_non_http_base() {
        let err = load(&[("CMC_API_V3_BASE_URL", "ftp://example.com")]).unwrap_err();
        assert!(err.to_string().contains("CMC_API_V3_BASE_URL must be an http(s) URL"));

        let err = load(&[("CMC_API_V1_BASE_URL", "nope")]).unwrap_err();
        assert!(err.to_string().contains("CMC_API_V1_BASE_URL invalid URL"));
    }

    #[test]
    fn test_rejects_bad_timeouts() {
        assert!(load(&[("CMC_HTTP_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("CMC_HTTP_TIMEOUT_SECS", "5"), ("CMC_CONNECT_TIMEOUT_SECS", "10")]).is_err());
        assert!(load(&[("CMC_HTTP_TIMEOUT_SECS", "5"), ("CMC_CONNECT_TIMEOUT_SECS", "5")]).is_ok());
    }
}
