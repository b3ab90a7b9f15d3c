//! Runtime configuration
//!
//! Only the endpoint URL can be changed from outside, through
//! `STORE_SEARCH_ENDPOINT`. Everything else is fixed.

use std::time::Duration;
use anyhow::{Context, Result};
use url::Url;

pub const ENDPOINT_ENV: &str = "STORE_SEARCH_ENDPOINT";
pub const DEFAULT_ENDPOINT: &str = "https://itunes.apple.com/search";
pub const PAGE_LIMIT: u32 = 200;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub endpoint: Url,
    pub page_limit: u32,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::with_endpoint(std::env::var(ENDPOINT_ENV).ok().as_deref())
    }

    /// Build a config from an optional endpoint override.
    ///
    /// Blank overrides are treated as absent.
    pub fn with_endpoint(endpoint: Option<&str>) -> Result<Self> {
        let raw = endpoint
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT);

        let endpoint = Url::parse(raw)
            .with_context(|| format!("{} is not a valid URL: {:?}", ENDPOINT_ENV, raw))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            anyhow::bail!("{} must be an http(s) URL, got {:?}", ENDPOINT_ENV, raw);
        }

        Ok(Self {
            endpoint,
            page_limit: PAGE_LIMIT,
            request_timeout: REQUEST_TIMEOUT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_override() {
        let config = AppConfig::with_endpoint(None).unwrap();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.page_limit, 200);

        let blank = AppConfig::with_endpoint(Some("  ")).unwrap();
        assert_eq!(blank.endpoint.as_str(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn override_is_used() {
        let config = AppConfig::with_endpoint(Some("http://localhost:8080/search")).unwrap();
        assert_eq!(config.endpoint.as_str(), "http://localhost:8080/search");
    }

    #[test]
    fn bad_override_is_rejected() {
        assert!(AppConfig::with_endpoint(Some("not a url")).is_err());
        assert!(AppConfig::with_endpoint(Some("ftp://example.com/search")).is_err());
    }
}
