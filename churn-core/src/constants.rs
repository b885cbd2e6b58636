//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default inference service, only edit this file.

/// Default inference service base address
///
/// This is the fallback when `CHURN_API_BASE` is not set.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Hard upper bound for the connectivity probe (milliseconds)
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3000;

/// Request timeout for train/predict/explain calls (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Number of features shown by presentation layers
pub const DEFAULT_TOP_FEATURES: usize = 8;

/// Illustrative local latencies (milliseconds)
pub const LOCAL_TRAIN_LATENCY_MS: u64 = 1000;
pub const LOCAL_PREDICT_LATENCY_MS: u64 = 800;
pub const LOCAL_EXPLAIN_LATENCY_MS: u64 = 600;

/// Method id reported by the local explanation generator
pub const LOCAL_EXPLAIN_METHOD: &str = "demo_logreg_coefficients";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get inference service URL from environment or use default
pub fn get_api_base() -> String {
    std::env::var("CHURN_API_BASE")
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
}

/// Get probe timeout from environment or use default
pub fn get_probe_timeout_ms() -> u64 {
    std::env::var("CHURN_PROBE_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PROBE_TIMEOUT_MS)
}

/// Get request timeout from environment or use default
pub fn get_request_timeout_secs() -> u64 {
    std::env::var("CHURN_REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
}

/// Check if local responses should be artificially delayed
pub fn is_simulated_latency_enabled() -> bool {
    std::env::var("CHURN_SIMULATED_LATENCY")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}
