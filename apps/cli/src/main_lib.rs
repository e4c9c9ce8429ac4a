use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use folioscope_core::portfolio::risk::{PortfolioSnapshot, RiskService};
use folioscope_core::portfolio::transactions::TransactionRepositoryTrait;
use folioscope_core::portfolio::valuation::ValuationRepositoryTrait;
use folioscope_core::settings::RiskSettings;
use folioscope_storage_sqlite::{
    db, StatisticsRepository, TransactionRepository, ValuationRepository,
};

pub struct AppState {
    pub risk_service: RiskService,
    pub valuation_repository: Arc<ValuationRepository>,
    pub transaction_repository: Arc<TransactionRepository>,
}

/// Installs the global subscriber. `log` records from the library crates are
/// forwarded through the `tracing-log` bridge.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn risk_settings(config: &Config) -> anyhow::Result<RiskSettings> {
    let mut settings = RiskSettings::default();
    if let Some(tz) = config.timezone {
        settings.valuation_timezone = tz;
    }
    if let Some(threshold) = config.large_flow_threshold {
        settings.large_cash_flow_threshold = threshold;
    }
    settings.validate()?;
    Ok(settings)
}

pub async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(&pool)?;

    let valuation_repository = Arc::new(ValuationRepository::new(pool.clone(), writer.clone()));
    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let statistics_repository = Arc::new(StatisticsRepository::new(pool.clone(), writer));

    let risk_service = RiskService::new(
        valuation_repository.clone(),
        transaction_repository.clone(),
        statistics_repository,
        risk_settings(config)?,
    )?;

    Ok(AppState {
        risk_service,
        valuation_repository,
        transaction_repository,
    })
}

/// Loads a JSON snapshot and stores its ledgers under `owner_id`.
pub async fn import_snapshot(state: &AppState, path: &Path, owner_id: &str) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut snapshot: PortfolioSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    for valuation in &mut snapshot.valuations {
        valuation.owner_id = owner_id.to_string();
    }
    for transaction in &mut snapshot.transactions {
        transaction.owner_id = owner_id.to_string();
    }

    state
        .valuation_repository
        .save_valuations(&snapshot.valuations)
        .await?;
    state
        .transaction_repository
        .save_transactions(&snapshot.transactions)
        .await?;

    tracing::info!(
        "Imported {} valuations and {} transactions for {}",
        snapshot.valuations.len(),
        snapshot.transactions.len(),
        owner_id
    );
    Ok(())
}
