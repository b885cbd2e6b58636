//! Connectivity Prober
//!
//! Bounded-time reachability check against `GET /health`. The bound is the
//! per-request timeout of the HTTP client, which aborts the in-flight
//! request when it fires.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ConfigError;

/// Result of one probe. Never an error: every failure is `reachable = false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeOutcome {
    pub reachable: bool,
    pub elapsed_ms: u64,
    /// Why the service was considered unreachable (logging only)
    pub reason: Option<String>,
}

impl ProbeOutcome {
    pub fn reachable() -> Self {
        Self { reachable: true, elapsed_ms: 0, reason: None }
    }

    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self { reachable: false, elapsed_ms: 0, reason: Some(reason.into()) }
    }
}

/// Health-endpoint prober
#[derive(Debug, Clone)]
pub struct ConnectivityProber {
    health_url: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl ConnectivityProber {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            health_url: format!("{}/health", config.api_base.trim_end_matches('/')),
            timeout: config.probe_timeout(),
            http_client,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe the service. Resolves within `timeout` (plus scheduling slack).
    pub async fn probe(&self) -> ProbeOutcome {
        let started = Instant::now();

        let result = self
            .http_client
            .get(&self.health_url)
            .timeout(self.timeout)
            .send()
            .await;

        let mut outcome = match result {
            Ok(response) if response.status().is_success() => ProbeOutcome::reachable(),
            Ok(response) => {
                ProbeOutcome::unreachable(format!("health returned {}", response.status()))
            }
            Err(e) if e.is_timeout() => {
                ProbeOutcome::unreachable(format!("no answer within {:?}", self.timeout))
            }
            Err(e) => ProbeOutcome::unreachable(e.to_string()),
        };
        outcome.elapsed_ms = started.elapsed().as_millis() as u64;

        match &outcome.reason {
            None => tracing::info!("Inference service reachable ({} ms)", outcome.elapsed_ms),
            Some(reason) => tracing::info!("Inference service unreachable: {}", reason),
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prober_uses_configured_timeout() {
        let mut config = ClientConfig::with_api_base("http://127.0.0.1:8000");
        config.probe_timeout_ms = 250;

        let prober = ConnectivityProber::new(&config).unwrap();
        assert_eq!(prober.timeout(), Duration::from_millis(250));
        assert_eq!(prober.health_url, "http://127.0.0.1:8000/health");
    }

    #[test]
    fn test_default_bound_is_three_seconds() {
        let prober = ConnectivityProber::new(&ClientConfig::default()).unwrap();
        assert_eq!(prober.timeout(), Duration::from_millis(3000));
    }
}
