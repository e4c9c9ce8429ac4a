//! Risk report service: ledgers in, statistics, TWR and comparison table out.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::Arc;

use super::reconciler::reconcile_metrics;
use super::risk_model::{
    HistoricalStatisticRow, PortfolioAnalysis, PortfolioSnapshot, RiskReport, StatisticsOutcome,
};
use super::risk_traits::{RiskServiceTrait, StatisticsRepositoryTrait};
use super::statistics_calculator::compute_statistics;
use crate::errors::{Error, Result};
use crate::portfolio::performance::{calculate_twr, TwrSummary};
use crate::portfolio::transactions::{
    aggregate_cash_flows, calculate_open_positions, total_cost_basis, Transaction,
    TransactionRepositoryTrait,
};
use crate::portfolio::valuation::{sanitize_history, RawValuation, ValuationRepositoryTrait};
use crate::settings::RiskSettings;
use crate::utils::valuation_date_today;

/// Service computing risk reports for one owner at a time.
pub struct RiskService {
    valuation_repository: Arc<dyn ValuationRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    statistics_repository: Arc<dyn StatisticsRepositoryTrait>,
    settings: RiskSettings,
}

impl RiskService {
    /// Fails with `Error::InvalidConfigValue` when `settings` do not validate.
    pub fn new(
        valuation_repository: Arc<dyn ValuationRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        statistics_repository: Arc<dyn StatisticsRepositoryTrait>,
        settings: RiskSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            valuation_repository,
            transaction_repository,
            statistics_repository,
            settings,
        })
    }

    /// Runs the engine on a snapshot. No I/O.
    ///
    /// Valuations and transactions dated after `as_of` are left out.
    pub fn analyze(
        snapshot: &PortfolioSnapshot,
        as_of: NaiveDate,
        settings: &RiskSettings,
    ) -> PortfolioAnalysis {
        let valuations: Vec<RawValuation> = snapshot
            .valuations
            .iter()
            .filter(|v| v.valuation_date <= as_of)
            .cloned()
            .collect();
        let transactions: Vec<Transaction> = snapshot
            .transactions
            .iter()
            .filter(|t| t.txn_date <= as_of)
            .cloned()
            .collect();

        let sanitized = sanitize_history(&valuations);
        let statistics = compute_statistics(&sanitized, settings);

        let flows = aggregate_cash_flows(&transactions);
        let twr_rows = calculate_twr(
            &sanitized.history,
            &flows,
            settings.large_cash_flow_threshold,
        );
        let twr_summary = TwrSummary::from_rows(&twr_rows);

        let positions = calculate_open_positions(&transactions);
        let total_cost_basis = total_cost_basis(&positions);

        PortfolioAnalysis {
            statistics,
            valid_returns: sanitized.daily_returns.len(),
            twr_rows,
            twr_summary,
            positions,
            total_cost_basis,
        }
    }

    /// Stores today's metrics, then reads the metric history back.
    ///
    /// Failures here never fail the report; they are returned as warnings and
    /// the comparison falls back to an empty history.
    async fn persist_and_load_history(
        &self,
        owner_id: &str,
        as_of: NaiveDate,
        analysis: &PortfolioAnalysis,
    ) -> (Vec<HistoricalStatisticRow>, Vec<String>) {
        let mut warnings = Vec::new();

        if let Some(statistics) = &analysis.statistics {
            if let Err(e) = self
                .statistics_repository
                .upsert_statistics(owner_id, as_of, &statistics.metrics)
                .await
            {
                warn!(
                    "Failed to persist statistics for owner {} on {}: {}",
                    owner_id, as_of, e
                );
                warnings.push(format!("Failed to persist statistics: {}", e));
            }
        }

        let history = match self.statistics_repository.get_statistic_history(owner_id).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(
                    "Failed to read statistics history for owner {}: {}",
                    owner_id, e
                );
                warnings.push(format!("Failed to read statistics history: {}", e));
                Vec::new()
            }
        };

        (history, warnings)
    }
}

#[async_trait]
impl RiskServiceTrait for RiskService {
    async fn load_snapshot(&self, owner_id: &str) -> Result<PortfolioSnapshot> {
        let valuations = async {
            self.valuation_repository
                .get_valuation_history(owner_id)
                .await
                .map_err(|e| Error::upstream("valuations", e))
        };
        let transactions = async {
            self.transaction_repository
                .get_transactions(owner_id)
                .await
                .map_err(|e| Error::upstream("transactions", e))
        };
        let (valuations, transactions) = futures::try_join!(valuations, transactions)?;

        debug!(
            "Loaded {} valuations and {} transactions for owner {}",
            valuations.len(),
            transactions.len(),
            owner_id
        );

        Ok(PortfolioSnapshot {
            owner_id: owner_id.to_string(),
            valuations,
            transactions,
        })
    }

    async fn compute_report(&self, owner_id: &str, as_of: Option<NaiveDate>) -> Result<RiskReport> {
        let as_of = as_of.unwrap_or_else(|| valuation_date_today(self.settings.valuation_timezone));
        let snapshot = self.load_snapshot(owner_id).await?;
        self.report_from_snapshot(&snapshot, as_of).await
    }

    async fn report_from_snapshot(
        &self,
        snapshot: &PortfolioSnapshot,
        as_of: NaiveDate,
    ) -> Result<RiskReport> {
        let owner_id = snapshot.owner_id.as_str();
        let analysis = Self::analyze(snapshot, as_of, &self.settings);

        let (statistics, comparison) = match analysis.statistics.clone() {
            Some(statistics) => {
                let (history, warnings) =
                    self.persist_and_load_history(owner_id, as_of, &analysis).await;
                let comparison = reconcile_metrics(&statistics.metrics, &history, as_of);
                let persistence_warning = (!warnings.is_empty()).then(|| warnings.join("; "));
                (
                    StatisticsOutcome::Computed {
                        statistics,
                        persistence_warning,
                    },
                    comparison,
                )
            }
            None => {
                info!(
                    "Insufficient valuation history for owner {}: {} valid daily returns",
                    owner_id, analysis.valid_returns
                );
                (
                    StatisticsOutcome::InsufficientHistory {
                        valid_returns: analysis.valid_returns,
                    },
                    Vec::new(),
                )
            }
        };

        Ok(RiskReport {
            owner_id: owner_id.to_string(),
            as_of_date: as_of,
            currency: self.settings.reporting_currency.clone(),
            statistics,
            comparison,
            twr_rows: analysis.twr_rows,
            twr_summary: analysis.twr_summary,
            positions: analysis.positions,
            total_cost_basis: analysis.total_cost_basis,
        })
    }
}
