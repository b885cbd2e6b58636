use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeight {
    pub feature: String,
    pub weight: f64, // signed
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationResult {
    pub method: String,
    /// Sorted by |weight| DESC, ties in source order
    pub top_features: Vec<FeatureWeight>,
}

impl ExplanationResult {
    /// Copy holding only the first `n` features
    pub fn truncated(&self, n: usize) -> Self {
        Self {
            method: self.method.clone(),
            top_features: self.top_features.iter().take(n).cloned().collect(),
        }
    }
}
