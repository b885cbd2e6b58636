//! Orchestrator - Dual-path dispatch
//!
//! Routes every operation to the remote service or the local model,
//! depending on the session's operating mode.
//!
//! ```text
//!   train / predict / explain / health / version
//!                    │
//!          read mode once (ModeSelector)
//!            ┌───────┴────────┐
//!         REMOTE            LOCAL
//!            │                │
//!      RemoteClient    InferenceEngine / Explainer
//!     (errors as-is)   (+ SimulatedLatency)
//! ```
//!
//! The mode is never changed here on failure; only [`Orchestrator::reconnect`]
//! can move the session from LOCAL to REMOTE.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use uuid::Uuid;

use super::explain::{ExplanationResult, Explainer};
use super::latency::{Operation, SimulatedLatency};
use super::mode::{ModeSelector, ModeTransition, OperatingMode};
use super::model::{
    CoefficientTable, CustomerRecord, HealthReport, InferenceEngine, PredictionResult, Source,
    TrainReport, VersionInfo,
};
use super::remote::{ConnectivityProber, ProbeOutcome, RemoteClient};
use crate::config::ClientConfig;
use crate::constants;
use crate::error::{ConfigError, InferenceResult};

/// Canned metrics returned by a LOCAL train
pub const LOCAL_TRAIN_METRICS: [(&str, f64); 5] = [
    ("accuracy", 0.8750),
    ("precision", 0.8600),
    ("recall", 0.8900),
    ("f1", 0.8745),
    ("roc_auc", 0.9200),
];

/// One inference session
pub struct Orchestrator {
    session_id: Uuid,
    selector: ModeSelector,
    prober: ConnectivityProber,
    remote: RemoteClient,
    engine: InferenceEngine,
    explainer: Explainer,
    latency: SimulatedLatency,
}

impl Orchestrator {
    /// Probe the service and start in the mode the probe decides
    pub async fn connect(config: &ClientConfig) -> Result<Self, ConfigError> {
        let prober = ConnectivityProber::new(config)?;
        let outcome = prober.probe().await;
        Self::build(config, prober, ModeSelector::from_probe(&outcome))
    }

    /// Start in a fixed mode without probing
    pub fn with_mode(config: &ClientConfig, mode: OperatingMode) -> Result<Self, ConfigError> {
        let prober = ConnectivityProber::new(config)?;
        Self::build(config, prober, ModeSelector::with_mode(mode))
    }

    fn build(
        config: &ClientConfig,
        prober: ConnectivityProber,
        selector: ModeSelector,
    ) -> Result<Self, ConfigError> {
        let table = CoefficientTable::shared();
        let session_id = Uuid::new_v4();

        tracing::debug!("Session {} started in {} mode", session_id, selector.current());

        Ok(Self {
            session_id,
            selector,
            prober,
            remote: RemoteClient::new(config)?,
            engine: InferenceEngine::new(Arc::clone(&table)),
            explainer: Explainer::new(table),
            latency: SimulatedLatency::enabled(config.simulated_latency),
        })
    }

    /// Replace the LOCAL delay profile
    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    /// Replace the coefficient table used by the local path
    pub fn with_table(mut self, table: Arc<CoefficientTable>) -> Self {
        self.engine = InferenceEngine::new(Arc::clone(&table));
        self.explainer = Explainer::new(table);
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn mode(&self) -> OperatingMode {
        self.selector.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<OperatingMode> {
        self.selector.subscribe()
    }

    pub fn remote(&self) -> &RemoteClient {
        &self.remote
    }

    /// Explicit reconnect: re-probe while LOCAL, go REMOTE iff reachable
    pub async fn reconnect(&self) -> ModeTransition {
        tracing::info!("Session {}: reconnect requested", self.session_id);
        self.selector.reconnect(|| self.prober.probe()).await
    }

    /// Run a probe without touching the mode
    pub async fn probe(&self) -> ProbeOutcome {
        self.prober.probe().await
    }

    pub async fn health(&self) -> InferenceResult<HealthReport> {
        match self.dispatch_mode("health") {
            OperatingMode::Remote => self.remote.health().await,
            OperatingMode::Local => Ok(HealthReport {
                status: "local".to_string(),
                source: Source::Local,
            }),
        }
    }

    pub async fn version(&self) -> InferenceResult<VersionInfo> {
        match self.dispatch_mode("version") {
            OperatingMode::Remote => self.remote.version().await,
            OperatingMode::Local => Ok(VersionInfo {
                name: constants::APP_NAME.to_string(),
                version: constants::APP_VERSION.to_string(),
            }),
        }
    }

    pub async fn train(
        &self,
        source: &str,
        target: &str,
        test_size: f64,
    ) -> InferenceResult<TrainReport> {
        match self.dispatch_mode("train") {
            OperatingMode::Remote => self.remote.train(source, target, test_size).await,
            OperatingMode::Local => {
                self.latency.delay(Operation::Train).await;
                Ok(local_train_report(target))
            }
        }
    }

    pub async fn predict(
        &self,
        records: &[CustomerRecord],
    ) -> InferenceResult<Vec<PredictionResult>> {
        match self.dispatch_mode("predict") {
            OperatingMode::Remote => self.remote.predict(records).await,
            OperatingMode::Local => {
                self.latency.delay(Operation::Predict).await;
                Ok(self.engine.predict_batch(records))
            }
        }
    }

    pub async fn explain(&self) -> InferenceResult<ExplanationResult> {
        match self.dispatch_mode("explain") {
            OperatingMode::Remote => self.remote.explain().await,
            OperatingMode::Local => {
                self.latency.delay(Operation::Explain).await;
                Ok(self.explainer.explain())
            }
        }
    }

    /// Read the mode once for this dispatch
    fn dispatch_mode(&self, op: &str) -> OperatingMode {
        let mode = self.selector.current();
        tracing::debug!("Session {}: {} -> {}", self.session_id, op, mode);
        mode
    }
}

fn local_train_report(target: &str) -> TrainReport {
    TrainReport {
        status: Some("trained".to_string()),
        target: Some(target.to_string()),
        rows: None,
        metrics: LOCAL_TRAIN_METRICS
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect::<BTreeMap<_, _>>(),
        confusion_matrix: None,
        trained_at: Some(Utc::now()),
    }
}
