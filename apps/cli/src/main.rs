mod config;
mod main_lib;

use config::Config;
use folioscope_core::portfolio::risk::{RiskServiceTrait, StatisticsOutcome};
use main_lib::{build_state, import_snapshot, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_format);
    let state = build_state(&config).await?;

    if let Some(path) = &config.import_path {
        import_snapshot(&state, path, &config.owner_id).await?;
    }

    let report = state
        .risk_service
        .compute_report(&config.owner_id, config.as_of)
        .await
        .map_err(|e| {
            tracing::error!("Risk report failed for {}: {}", config.owner_id, e);
            e
        })?;

    match &report.statistics {
        StatisticsOutcome::Computed {
            persistence_warning: Some(warning),
            ..
        } => tracing::warn!("Statistics computed but not fully persisted: {}", warning),
        StatisticsOutcome::Computed { .. } => {}
        StatisticsOutcome::InsufficientHistory { valid_returns } => tracing::info!(
            "Not enough valuation history yet ({} daily returns)",
            valid_returns
        ),
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
