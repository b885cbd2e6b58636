//! Remote Inference Client
//!
//! HTTP client for the churn inference service. One round trip per call,
//! no retries. This is the only place where transport failures are turned
//! into [`InferenceError`] values.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::{ConfigError, InferenceError, InferenceResult};
use crate::logic::explain::ExplanationResult;
use crate::logic::model::{
    ConfusionMatrix, CustomerRecord, HealthReport, PredictionResult, Source, TrainReport,
    VersionInfo,
};

/// Remote inference API client
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    http_client: reqwest::Client,
}

// Request/Response types

#[derive(Debug, Serialize)]
pub struct TrainRequest<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub test_size: f64,
}

#[derive(Debug, Deserialize)]
struct TrainResponse {
    metrics: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    rows: Option<u64>,
    #[serde(default)]
    trained_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub records: &'a [CustomerRecord],
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    predictions: Vec<PredictionResult>,
}

#[derive(Debug, Default, Deserialize)]
struct HealthBody {
    #[serde(default)]
    status: Option<String>,
}

/// Error body. FastAPI puts the message in `detail`, other servers in `error`.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

impl RemoteClient {
    /// Create new client
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: config.api_base.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /health. Success iff 2xx; the body is informational only.
    pub async fn health(&self) -> InferenceResult<HealthReport> {
        let (status, body) = self.execute(self.http_client.get(self.url("/health"))).await?;
        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        let parsed: HealthBody = serde_json::from_slice(&body).unwrap_or_default();
        Ok(HealthReport {
            status: parsed.status.unwrap_or_else(|| "ok".to_string()),
            source: Source::Remote,
        })
    }

    /// GET /version
    pub async fn version(&self) -> InferenceResult<VersionInfo> {
        self.send(self.http_client.get(self.url("/version"))).await
    }

    /// POST /train
    pub async fn train(
        &self,
        source: &str,
        target: &str,
        test_size: f64,
    ) -> InferenceResult<TrainReport> {
        let request = TrainRequest { source, target, test_size };

        tracing::info!("Training remote model (source={}, target={})", source, target);

        let response: TrainResponse = self
            .send(self.http_client.post(self.url("/train")).json(&request))
            .await?;

        Ok(response.into_report())
    }

    /// POST /predict. Returns one result per record, in input order.
    pub async fn predict(
        &self,
        records: &[CustomerRecord],
    ) -> InferenceResult<Vec<PredictionResult>> {
        let request = PredictRequest { records };

        let response: PredictResponse = self
            .send(self.http_client.post(self.url("/predict")).json(&request))
            .await?;

        if response.predictions.len() != records.len() {
            return Err(InferenceError::malformed(
                StatusCode::OK.as_u16(),
                format!(
                    "expected {} predictions, got {}",
                    records.len(),
                    response.predictions.len()
                ),
            ));
        }

        Ok(response.predictions)
    }

    /// GET /explain
    pub async fn explain(&self) -> InferenceResult<ExplanationResult> {
        self.send(self.http_client.get(self.url("/explain"))).await
    }

    /// Send and decode a JSON body, mapping every failure into the taxonomy
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> InferenceResult<T> {
        let (status, body) = self.execute(request).await?;

        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        serde_json::from_slice(&body).map_err(|e| InferenceError::malformed(status.as_u16(), e))
    }

    async fn execute(&self, request: RequestBuilder) -> InferenceResult<(StatusCode, Vec<u8>)> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("Inference service request failed: {}", e);
            InferenceError::from(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(InferenceError::from)?;

        if !status.is_success() {
            tracing::warn!("Inference service returned {}", status);
        }

        Ok((status, body.to_vec()))
    }
}

impl TrainResponse {
    fn into_report(self) -> TrainReport {
        let mut metrics = BTreeMap::new();
        let mut confusion_matrix = None;

        for (name, value) in self.metrics {
            match value {
                serde_json::Value::Number(n) => {
                    if let Some(v) = n.as_f64() {
                        metrics.insert(name, v);
                    }
                }
                serde_json::Value::Object(_) if name == "confusion_matrix" => {
                    confusion_matrix = serde_json::from_value::<ConfusionMatrix>(value).ok();
                }
                // null roc_auc and anything nested we don't model
                _ => {}
            }
        }

        TrainReport {
            status: self.status,
            target: self.target,
            rows: self.rows,
            metrics,
            confusion_matrix,
            trained_at: self.trained_at.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Accepts RFC 3339 and naive ISO-8601 timestamps (assumed UTC)
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Convert a non-2xx response, preferring the server's own message
fn rejection(status: StatusCode, body: &[u8]) -> InferenceError {
    let message = serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .and_then(|err| match err.detail {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => Some(detail),
            _ => err.error.filter(|e| !e.is_empty()),
        });

    match message {
        Some(message) => InferenceError::RemoteRejected {
            status: Some(status.as_u16()),
            message,
        },
        None => InferenceError::rejected(status.as_u16()),
    }
}
