//! Churn Core - Command line entry point

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use churn_core::api::commands;
use churn_core::{ClientConfig, CustomerRecord, Orchestrator, Plan, Region};
use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "churn_core=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base.trim_end_matches('/').to_string();
    }
    if cli.no_latency {
        config.simulated_latency = false;
    }

    tracing::info!("Churn Core v{} starting...", churn_core::constants::APP_VERSION);
    tracing::info!("Inference service: {}", config.api_base);

    let session = Orchestrator::connect(&config)
        .await
        .context("Invalid configuration")?;

    match cli.command {
        Commands::Status => print(&commands::get_session_status(&session)),
        Commands::Version => print(&session.version().await?),
        Commands::Train { source, target, test_size } => {
            let report = commands::train_model(&session, &source, &target, test_size)
                .await
                .map_err(anyhow::Error::msg)?;
            print(&report)
        }
        Commands::Predict { file, age, tenure_months, monthly_spend, tickets, plan, region } => {
            let records = match file {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    serde_json::from_str::<Vec<CustomerRecord>>(&raw)
                        .with_context(|| format!("Failed to parse records in {}", path.display()))?
                }
                None => vec![CustomerRecord {
                    age: age.context("--age is required")?,
                    tenure_months: tenure_months.context("--tenure-months is required")?,
                    monthly_spend: monthly_spend.context("--monthly-spend is required")?,
                    support_tickets_last_90d: tickets.context("--tickets is required")?,
                    plan: Plan::from(plan.context("--plan is required")?.to_lowercase()),
                    region: Region::from(region.context("--region is required")?.to_lowercase()),
                }],
            };

            let predictions = commands::run_prediction(&session, &records)
                .await
                .map_err(anyhow::Error::msg)?;
            print(&predictions)
        }
        Commands::Explain { top } => {
            let explanation = commands::get_explanation(&session, Some(top))
                .await
                .map_err(anyhow::Error::msg)?;
            print(&explanation)
        }
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
