//! Client configuration
//!
//! The backend base URL is the only setting. It is supplied once, at the
//! application boundary, and never defaulted inside the client.

use crate::error::ConfigError;
use reqwest::Url;

/// Environment variable holding the backend base URL
pub const BASE_URL_ENV: &str = "API_BASE";

/// Configuration for [`RouterApiClient`](crate::RouterApiClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// Build a configuration from an explicit base URL
    ///
    /// # Arguments
    /// * `base_url` - Backend base URL including the API prefix
    ///   (e.g., "http://localhost:5000/api/v1")
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = base_url.into();
        let trimmed = raw.trim().trim_end_matches('/');

        if trimmed.is_empty() {
            return Err(ConfigError::Missing(BASE_URL_ENV));
        }

        let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw.clone(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }

        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Load configuration from the process environment (`API_BASE`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_ENV).ok_or(ConfigError::Missing(BASE_URL_ENV))?;
        Self::new(base_url)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let config = ClientConfig::new("http://localhost:5000/api/v1/").unwrap();
        assert_eq!(config.base_url(), "http://localhost:5000/api/v1");
    }

    #[test]
    fn lookup_reads_api_base() {
        let config = ClientConfig::from_lookup(|key| {
            (key == "API_BASE").then(|| "https://routers.example/api/v1".to_string())
        })
        .unwrap();
        assert_eq!(config.base_url(), "https://routers.example/api/v1");
    }

    #[test]
    fn missing_variable_is_reported() {
        let err = ClientConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("API_BASE")));
    }

    #[test]
    fn empty_value_is_missing() {
        let err = ClientConfig::from_lookup(|_| Some("  ".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            ClientConfig::new("ftp://localhost/api/v1"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("localhost:5000"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }
}
