use std::sync::Arc;

use super::types::{ExplanationResult, FeatureWeight};
use crate::constants::LOCAL_EXPLAIN_METHOD;
use crate::logic::model::CoefficientTable;

/// Ranks the curated coefficients of the local model
#[derive(Debug, Clone)]
pub struct Explainer {
    table: Arc<CoefficientTable>,
}

impl Default for Explainer {
    fn default() -> Self {
        Self::new(CoefficientTable::shared())
    }
}

impl Explainer {
    pub fn new(table: Arc<CoefficientTable>) -> Self {
        Self { table }
    }

    /// Full ranked list. Truncation is left to the caller.
    pub fn explain(&self) -> ExplanationResult {
        let features = self
            .table
            .entries()
            .iter()
            .filter(|c| c.explained)
            .map(|c| FeatureWeight {
                feature: c.name.to_string(),
                weight: c.weight,
            })
            .collect();

        ExplanationResult {
            method: LOCAL_EXPLAIN_METHOD.to_string(),
            top_features: rank_by_magnitude(features),
        }
    }
}

/// Sort by |weight| DESC. `sort_by` is stable, so ties keep input order.
pub fn rank_by_magnitude(mut features: Vec<FeatureWeight>) -> Vec<FeatureWeight> {
    features.sort_by(|a, b| b.weight.abs().total_cmp(&a.weight.abs()));
    features
}
