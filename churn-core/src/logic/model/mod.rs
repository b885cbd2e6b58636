//! Model Module - Local churn approximation
//!
//! Coefficient table, scorer and the shared record/result types.
//! Used whenever the remote inference service is unreachable.

pub mod coefficients;
pub mod inference;
pub mod types;

// Re-export common types
pub use coefficients::{Coefficient, CoefficientTable, ContinuousFeature, Term};
pub use inference::{sigmoid, InferenceEngine};
pub use types::{
    ConfusionMatrix, CustomerRecord, HealthReport, Plan, PredictionResult, Region, Source,
    TrainReport, VersionInfo,
};
