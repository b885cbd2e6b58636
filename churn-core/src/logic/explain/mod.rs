//! Explain Module - Feature importance for the local model

pub mod engine;
pub mod types;

pub use engine::{rank_by_magnitude, Explainer};
pub use types::{ExplanationResult, FeatureWeight};
