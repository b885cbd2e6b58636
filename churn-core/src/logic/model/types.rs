//! Shared data types for churn inference.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORICAL ATTRIBUTES
// ============================================================================

/// Subscription plan. Unrecognized wire values are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Plan {
    Basic,
    Pro,
    Enterprise,
    Other(String),
}

impl Plan {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic => "basic",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Plan {
    fn from(value: String) -> Self {
        match value.as_str() {
            "basic" => Self::Basic,
            "pro" => Self::Pro,
            "enterprise" => Self::Enterprise,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Plan {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Plan> for String {
    fn from(plan: Plan) -> Self {
        match plan {
            Plan::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer region. Unrecognized wire values are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Region {
    Latam,
    Na,
    Eu,
    Other(String),
}

impl Region {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Latam => "latam",
            Self::Na => "na",
            Self::Eu => "eu",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Region {
    fn from(value: String) -> Self {
        match value.as_str() {
            "latam" => Self::Latam,
            "na" => Self::Na,
            "eu" => Self::Eu,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Region {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        match region {
            Region::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RECORDS & RESULTS
// ============================================================================

/// One customer to score. Field names match the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub age: u32,
    pub tenure_months: u32,
    pub monthly_spend: f64,
    pub support_tickets_last_90d: u32,
    pub plan: Plan,
    pub region: Region,
}

/// Prediction for a single record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: u8,        // 1 = churn
    pub probability: f64, // 0.0 - 1.0
}

impl PredictionResult {
    /// Build from a probability, deriving the label at the 0.5 cut
    pub fn from_probability(probability: f64) -> Self {
        Self {
            label: u8::from(probability > 0.5),
            probability,
        }
    }
}

/// 2x2 confusion matrix reported by the remote trainer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    pub true_positives: u64,
}

/// Outcome of a training run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainReport {
    pub status: Option<String>,
    pub target: Option<String>,
    pub rows: Option<u64>,
    /// Metric name -> value (accuracy, precision, recall, f1, roc_auc)
    pub metrics: BTreeMap<String, f64>,
    pub confusion_matrix: Option<ConfusionMatrix>,
    pub trained_at: Option<DateTime<Utc>>,
}

impl TrainReport {
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

/// Which path answered an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Remote,
    Local,
}

/// Health answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: String,
    pub source: Source,
}

/// Service name and version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub name: String,
    pub version: String,
}
