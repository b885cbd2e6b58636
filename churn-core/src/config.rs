//! Configuration module

use std::time::Duration;

use crate::constants;
use crate::error::ConfigError;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Inference service base address (no trailing slash)
    pub api_base: String,

    /// Hard bound for the connectivity probe
    pub probe_timeout_ms: u64,

    /// Bound for train/predict/explain round trips
    pub request_timeout_secs: u64,

    /// Delay LOCAL responses to mimic a network round trip
    pub simulated_latency: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: constants::DEFAULT_API_BASE.to_string(),
            probe_timeout_ms: constants::DEFAULT_PROBE_TIMEOUT_MS,
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT_SECS,
            simulated_latency: true,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            api_base: constants::get_api_base(),
            probe_timeout_ms: constants::get_probe_timeout_ms(),
            request_timeout_secs: constants::get_request_timeout_secs(),
            simulated_latency: constants::is_simulated_latency_enabled(),
        }
    }

    /// Configuration pointed at an explicit base address
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Reject base addresses reqwest cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base.starts_with("http://") || self.api_base.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidBaseAddress(self.api_base.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "http://127.0.0.1:8000");
        assert_eq!(config.probe_timeout(), Duration::from_millis(3000));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.simulated_latency);
    }

    #[test]
    fn test_with_api_base_strips_trailing_slash() {
        let config = ClientConfig::with_api_base("http://localhost:9000/");
        assert_eq!(config.api_base, "http://localhost:9000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bare_host() {
        let config = ClientConfig::with_api_base("localhost:8000");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBaseAddress(_))));
    }
}
