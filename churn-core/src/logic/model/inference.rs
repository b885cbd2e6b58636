//! Local Inference Engine
//!
//! Deterministic logistic scorer over the shared coefficient table.
//! No state, no randomness: the same record always yields the same bits.

use std::sync::Arc;

use super::coefficients::CoefficientTable;
use super::types::{CustomerRecord, PredictionResult};

/// Logistic function
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Local churn scorer
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    table: Arc<CoefficientTable>,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new(CoefficientTable::shared())
    }
}

impl InferenceEngine {
    pub fn new(table: Arc<CoefficientTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Arc<CoefficientTable> {
        &self.table
    }

    /// Pre-sigmoid linear score
    pub fn logit(&self, record: &CustomerRecord) -> f64 {
        self.table
            .entries()
            .iter()
            .fold(self.table.intercept(), |acc, c| acc + c.contribution(record))
    }

    pub fn predict(&self, record: &CustomerRecord) -> PredictionResult {
        PredictionResult::from_probability(sigmoid(self.logit(record)))
    }

    /// One result per record, same order
    pub fn predict_batch(&self, records: &[CustomerRecord]) -> Vec<PredictionResult> {
        records.iter().map(|r| self.predict(r)).collect()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
