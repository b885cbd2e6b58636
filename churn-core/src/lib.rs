//! Churn Core
//!
//! Churn predictions and feature-importance explanations from a remote
//! inference service, with a deterministic local approximation used
//! whenever the service cannot be reached.
//!
//! ```no_run
//! use churn_core::{ClientConfig, CustomerRecord, Orchestrator, Plan, Region};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Orchestrator::connect(&ClientConfig::from_env()).await?;
//! let record = CustomerRecord {
//!     age: 52,
//!     tenure_months: 3,
//!     monthly_spend: 49.0,
//!     support_tickets_last_90d: 8,
//!     plan: Plan::Basic,
//!     region: Region::Latam,
//! };
//! let predictions = session.predict(&[record]).await?;
//! println!("{} -> {:?}", session.mode(), predictions);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

pub use config::ClientConfig;
pub use error::{ConfigError, InferenceError, InferenceResult};
pub use logic::explain::{ExplanationResult, FeatureWeight};
pub use logic::latency::SimulatedLatency;
pub use logic::mode::{ModeSelector, ModeTransition, OperatingMode};
pub use logic::model::{CustomerRecord, Plan, PredictionResult, Region, TrainReport};
pub use logic::orchestrator::Orchestrator;
pub use logic::remote::{ConnectivityProber, ProbeOutcome, RemoteClient};
