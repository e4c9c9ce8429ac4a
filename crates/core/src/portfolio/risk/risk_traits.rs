//! Risk statistics repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::risk_model::{HistoricalStatisticRow, PortfolioSnapshot, RiskReport, StatisticMetric};
use crate::errors::Result;

/// Repository trait for the per-day metric history.
#[async_trait]
pub trait StatisticsRepositoryTrait: Send + Sync {
    /// Upsert one row per metric, keyed by (owner, as-of date, metric key).
    ///
    /// Writing the same metrics twice leaves a single row per key holding the
    /// latest value.
    async fn upsert_statistics(
        &self,
        owner_id: &str,
        as_of_date: NaiveDate,
        metrics: &[StatisticMetric],
    ) -> Result<()>;

    /// Get every persisted metric row of an owner, ordered by as-of date ascending.
    async fn get_statistic_history(&self, owner_id: &str) -> Result<Vec<HistoricalStatisticRow>>;
}

/// Trait defining the contract for the risk report service.
#[async_trait]
pub trait RiskServiceTrait: Send + Sync {
    /// Fetch the valuation and transaction ledgers of an owner.
    ///
    /// Either fetch failing is a hard failure reported as `Error::UpstreamFetch`.
    async fn load_snapshot(&self, owner_id: &str) -> Result<PortfolioSnapshot>;

    /// Load the ledgers and build the full report as of `as_of`
    /// (today in the valuation timezone when `None`).
    async fn compute_report(&self, owner_id: &str, as_of: Option<NaiveDate>) -> Result<RiskReport>;

    /// Build the report from a snapshot the caller already holds.
    ///
    /// Only the metric history is read and written; the ledgers are not fetched again.
    async fn report_from_snapshot(
        &self,
        snapshot: &PortfolioSnapshot,
        as_of: NaiveDate,
    ) -> Result<RiskReport>;
}
