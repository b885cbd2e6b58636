//! Commands - Presentation-facing operations
//!
//! Thin wrappers over [`Orchestrator`] returning serializable views and
//! string errors, ready to hand to a frontend.

use serde::Serialize;

use crate::constants::DEFAULT_TOP_FEATURES;
use crate::logic::explain::ExplanationResult;
use crate::logic::mode::{ModeTransition, OperatingMode};
use crate::logic::model::{CustomerRecord, PredictionResult, TrainReport};
use crate::logic::orchestrator::Orchestrator;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Session snapshot for status bars
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub session_id: String,
    pub mode: OperatingMode,
    pub api_base: String,
}

/// Reconnect answer. `discard_local_results` tells the UI to clear
/// everything it produced while LOCAL.
#[derive(Debug, Clone, Serialize)]
pub struct ReconnectOutcome {
    pub transition: ModeTransition,
    pub mode: OperatingMode,
    pub discard_local_results: bool,
}

/// Prediction row as shown to users
#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub label: u8,
    pub probability: f64,
    pub churn: bool,
    /// Probability as a percentage, one decimal
    pub percent: String,
}

impl From<PredictionResult> for PredictionView {
    fn from(result: PredictionResult) -> Self {
        Self {
            label: result.label,
            probability: result.probability,
            churn: result.label == 1,
            percent: format!("{:.1}%", result.probability * 100.0),
        }
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

pub fn get_session_status(session: &Orchestrator) -> SessionStatus {
    SessionStatus {
        session_id: session.session_id().to_string(),
        mode: session.mode(),
        api_base: session.remote().base_url().to_string(),
    }
}

pub async fn reconnect(session: &Orchestrator) -> ReconnectOutcome {
    let transition = session.reconnect().await;
    ReconnectOutcome {
        transition,
        mode: session.mode(),
        discard_local_results: transition.discards_local_results(),
    }
}

pub async fn train_model(
    session: &Orchestrator,
    source: &str,
    target: &str,
    test_size: f64,
) -> Result<TrainReport, String> {
    session
        .train(source, target, test_size)
        .await
        .map_err(|e| e.to_string())
}

pub async fn run_prediction(
    session: &Orchestrator,
    records: &[CustomerRecord],
) -> Result<Vec<PredictionView>, String> {
    let results = session.predict(records).await.map_err(|e| e.to_string())?;
    Ok(results.into_iter().map(PredictionView::from).collect())
}

/// Explanation truncated to `top_n` features (default 8)
pub async fn get_explanation(
    session: &Orchestrator,
    top_n: Option<usize>,
) -> Result<ExplanationResult, String> {
    let explanation = session.explain().await.map_err(|e| e.to_string())?;
    Ok(explanation.truncated(top_n.unwrap_or(DEFAULT_TOP_FEATURES)))
}
