//! CLI module for churn-core
//!
//! Every command prints JSON to stdout.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Churn Core - churn predictions with offline fallback
#[derive(Parser, Debug)]
#[command(name = "churn-core")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    CHURN_API_BASE               Inference service (default: http://127.0.0.1:8000)
    CHURN_PROBE_TIMEOUT_MS       Startup probe bound (default: 3000)
    CHURN_REQUEST_TIMEOUT_SECS   Remote call bound (default: 30)
    CHURN_SIMULATED_LATENCY      Delay local answers (default: true)
    RUST_LOG                     Log filter (default: churn_core=info)
"#)]
pub struct Cli {
    /// Override the inference service base address
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Answer immediately in LOCAL mode
    #[arg(long, global = true)]
    pub no_latency: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe the service and show the session mode
    Status,
    /// Service name and version
    Version,
    /// Train a model
    Train {
        #[arg(long, default_value = "demo")]
        source: String,
        #[arg(long, default_value = "churn")]
        target: String,
        #[arg(long, default_value_t = 0.2)]
        test_size: f64,
    },
    /// Score one customer, or every record in a JSON file
    Predict {
        /// JSON array of records (wire format)
        #[arg(
            long,
            conflicts_with_all = ["age", "tenure_months", "monthly_spend", "tickets", "plan", "region"]
        )]
        file: Option<PathBuf>,
        #[arg(long, required_unless_present = "file")]
        age: Option<u32>,
        #[arg(long, required_unless_present = "file")]
        tenure_months: Option<u32>,
        #[arg(long, required_unless_present = "file")]
        monthly_spend: Option<f64>,
        #[arg(long, required_unless_present = "file")]
        tickets: Option<u32>,
        /// basic | pro | enterprise
        #[arg(long, required_unless_present = "file")]
        plan: Option<String>,
        /// latam | na | eu
        #[arg(long, required_unless_present = "file")]
        region: Option<String>,
    },
    /// Feature importance
    Explain {
        /// Number of features to show
        #[arg(long, default_value_t = churn_core::constants::DEFAULT_TOP_FEATURES)]
        top: usize,
    },
}
