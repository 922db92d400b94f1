pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_BASE_URL: &str = "https://order.dominos.com";
pub const DEFAULT_LANG: &str = "en";

/// Connection settings for the ordering API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_lang")]
    pub lang: String,

    /// No timeout when unset; a stalled request then blocks until the peer gives up.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    #[serde(default = "default_headers")]
    pub headers: HashMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

fn default_headers() -> HashMap<String, String> {
    HashMap::from([
        (
            "Referer".to_string(),
            "https://order.dominos.com/en/pages/order/".to_string(),
        ),
        (
            "Accept".to_string(),
            "application/json, text/javascript, */*; q=0.01".to_string(),
        ),
    ])
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            lang: default_lang(),
            timeout_seconds: None,
            headers: default_headers(),
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_non_empty_string("lang", &self.lang)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, 600)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "https://order.dominos.com");
        assert_eq!(config.lang, "en");
        assert!(config.timeout_seconds.is_none());
        assert!(config.headers.contains_key("Referer"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let config = ApiConfig {
            timeout_seconds: Some(0),
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ApiConfig::with_base_url("ftp://order.dominos.com");
        assert!(config.validate().is_err());
    }
}
