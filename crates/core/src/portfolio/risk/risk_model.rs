//! Risk statistics domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, ValidationError};
use crate::portfolio::performance::{TwrRow, TwrSummary};
use crate::portfolio::transactions::{OpenPosition, Transaction};
use crate::portfolio::valuation::RawValuation;

/// Stable identifiers of the seven reported statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKey {
    #[serde(rename = "max_drawdown")]
    MaxDrawdown,
    #[serde(rename = "variance_1y")]
    Variance1y,
    #[serde(rename = "std_1y")]
    Std1y,
    #[serde(rename = "var_3m_95")]
    Var3m95,
    #[serde(rename = "cvar_3m_95_eur")]
    Cvar3m95Eur,
    #[serde(rename = "var_6m_95")]
    Var6m95,
    #[serde(rename = "cvar_6m_95_eur")]
    Cvar6m95Eur,
}

impl MetricKey {
    /// Every key, in reporting order.
    pub const ALL: [MetricKey; 7] = [
        MetricKey::MaxDrawdown,
        MetricKey::Variance1y,
        MetricKey::Std1y,
        MetricKey::Var3m95,
        MetricKey::Cvar3m95Eur,
        MetricKey::Var6m95,
        MetricKey::Cvar6m95Eur,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::MaxDrawdown => "max_drawdown",
            MetricKey::Variance1y => "variance_1y",
            MetricKey::Std1y => "std_1y",
            MetricKey::Var3m95 => "var_3m_95",
            MetricKey::Cvar3m95Eur => "cvar_3m_95_eur",
            MetricKey::Var6m95 => "var_6m_95",
            MetricKey::Cvar6m95Eur => "cvar_6m_95_eur",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::MaxDrawdown => "Max drawdown",
            MetricKey::Variance1y => "Variance (1y)",
            MetricKey::Std1y => "Volatility (1y)",
            MetricKey::Var3m95 => "VaR 95% (3m)",
            MetricKey::Cvar3m95Eur => "CVaR 95% (3m)",
            MetricKey::Var6m95 => "VaR 95% (6m)",
            MetricKey::Cvar6m95Eur => "CVaR 95% (6m)",
        }
    }

    pub fn unit(&self) -> MetricUnit {
        match self {
            MetricKey::Variance1y => MetricUnit::ReturnSquared,
            MetricKey::Cvar3m95Eur | MetricKey::Cvar6m95Eur => MetricUnit::Eur,
            _ => MetricUnit::Percent,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Unknown metric key '{}'",
                    s
                )))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricUnit {
    #[serde(rename = "percent")]
    Percent,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "return-squared")]
    ReturnSquared,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatisticMetric {
    pub key: MetricKey,
    pub label: String,
    pub value: Option<f64>,
    pub unit: MetricUnit,
}

impl StatisticMetric {
    pub fn new(key: MetricKey, value: Option<f64>) -> Self {
        Self {
            key,
            label: key.label().to_string(),
            value,
            unit: key.unit(),
        }
    }
}

/// Historical-simulation VaR/CVaR over one horizon.
///
/// Percentages are loss fractions (0.08 = 8% loss); amounts are in the
/// reporting currency. Everything is `None` when the history is not longer
/// than the window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HorizonRisk {
    pub window: usize,
    pub samples: usize,
    pub var_pct: Option<f64>,
    pub cvar_pct: Option<f64>,
    pub var_amount: Option<f64>,
    pub cvar_amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskStatistics {
    pub metrics: Vec<StatisticMetric>,
    pub short_horizon: HorizonRisk,
    pub long_horizon: HorizonRisk,
    pub valid_returns: usize,
    pub current_value: f64,
}

impl RiskStatistics {
    pub fn metric(&self, key: MetricKey) -> Option<&StatisticMetric> {
        self.metrics.iter().find(|m| m.key == key)
    }

    pub fn value(&self, key: MetricKey) -> Option<f64> {
        self.metric(key).and_then(|m| m.value)
    }
}

/// Result of a statistics run, as seen by the caller.
///
/// Hard failures are reported through `Err`; this enum covers the two
/// non-failure states.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum StatisticsOutcome {
    /// Metrics were computed. `persistence_warning` is set when storing or
    /// re-reading the metric history failed.
    #[serde(rename_all = "camelCase")]
    Computed {
        statistics: RiskStatistics,
        persistence_warning: Option<String>,
    },
    /// Fewer than two usable daily returns.
    #[serde(rename_all = "camelCase")]
    InsufficientHistory { valid_returns: usize },
}

impl StatisticsOutcome {
    pub fn statistics(&self) -> Option<&RiskStatistics> {
        match self {
            StatisticsOutcome::Computed { statistics, .. } => Some(statistics),
            StatisticsOutcome::InsufficientHistory { .. } => None,
        }
    }

    pub fn persistence_warning(&self) -> Option<&str> {
        match self {
            StatisticsOutcome::Computed {
                persistence_warning,
                ..
            } => persistence_warning.as_deref(),
            StatisticsOutcome::InsufficientHistory { .. } => None,
        }
    }
}

/// A persisted metric value, unique per (owner, as-of date, metric key).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalStatisticRow {
    pub owner_id: String,
    pub metric_key: String,
    pub as_of_date: NaiveDate,
    pub value: Option<f64>,
    pub updated_at: NaiveDateTime,
}

/// Display row comparing today's value with the one of the preceding Friday.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledMetric {
    pub key: MetricKey,
    pub label: String,
    pub unit: MetricUnit,
    pub today_value: Option<f64>,
    pub preceding_friday: NaiveDate,
    pub preceding_friday_value: Option<f64>,
}

/// Immutable input of one computation, owned by the caller.
///
/// A caller that already holds a snapshot can run the engine again on it
/// without going back to the repositories.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub owner_id: String,
    pub valuations: Vec<RawValuation>,
    pub transactions: Vec<Transaction>,
}

/// Everything the engine derives from a snapshot, before any persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalysis {
    pub statistics: Option<RiskStatistics>,
    pub valid_returns: usize,
    pub twr_rows: Vec<TwrRow>,
    pub twr_summary: TwrSummary,
    pub positions: Vec<OpenPosition>,
    pub total_cost_basis: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub owner_id: String,
    pub as_of_date: NaiveDate,
    pub currency: String,
    pub statistics: StatisticsOutcome,
    pub comparison: Vec<ReconciledMetric>,
    pub twr_rows: Vec<TwrRow>,
    pub twr_summary: TwrSummary,
    pub positions: Vec<OpenPosition>,
    pub total_cost_basis: Decimal,
}
