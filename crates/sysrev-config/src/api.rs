//! Remote API configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    String::from("https://www.sysrev.com")
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Bearer token sent with every request.
    #[serde(default)]
    pub api_key: String,

    /// Server root, without the `/api-json` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Return the API key or a [`ConfigError::NotConfigured`] naming the section.
    ///
    /// # Errors
    ///
    /// Fails when no API key is set.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        if self.is_configured() {
            Ok(&self.api_key)
        } else {
            Err(ConfigError::NotConfigured {
                section: "api".into(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = ApiConfig::default();
        assert!(!config.is_configured());
        assert!(config.require_api_key().is_err());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn configured_when_key_set() {
        let config = ApiConfig {
            api_key: "key".into(),
            ..ApiConfig::default()
        };
        assert_eq!(config.require_api_key().unwrap(), "key");
    }
}
