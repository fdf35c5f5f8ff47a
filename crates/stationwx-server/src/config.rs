//! Server configuration, read from the environment.

use anyhow::{Context, Result};
use url::Url;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_UPSTREAM_BASE_URL: &str = "https://sfc.windbornesystems.com";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Base URL of the upstream surface API.
    pub upstream_base_url: String,
}

impl ServerConfig {
    /// Load configuration from `STATIONWX_BIND_ADDR` and
    /// `STATIONWX_UPSTREAM_URL`, falling back to defaults.
    ///
    /// # Errors
    /// Fails when the upstream URL is not a valid http(s) URL.
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("STATIONWX_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let upstream_base_url = std::env::var("STATIONWX_UPSTREAM_URL")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_BASE_URL.to_string());

        let parsed = Url::parse(&upstream_base_url)
            .with_context(|| format!("invalid upstream URL: {upstream_base_url}"))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            anyhow::bail!("upstream URL must use http or https, got: {}", parsed.scheme());
        }

        Ok(Self { bind_addr, upstream_base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_env().ok();
        assert!(config.is_some());
    }

    #[test]
    fn test_default_upstream_is_valid() {
        assert!(Url::parse(DEFAULT_UPSTREAM_BASE_URL).is_ok());
    }
}
