use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the time-weighted return series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TwrRow {
    pub date: NaiveDate,
    pub market_value: f64,
    /// Net external flow booked on `date`, positive for money entering the portfolio
    pub net_external_flow: f64,
    /// Flow large enough that the end-of-day flow approximation is unreliable
    pub is_large_cash_flow: bool,
    pub daily_return_pct: f64,
    pub cumulative_return_pct: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TwrSummary {
    pub days: usize,
    pub large_cash_flow_days: usize,
    pub cumulative_return_pct: Option<f64>,
}

impl TwrSummary {
    pub fn from_rows(rows: &[TwrRow]) -> Self {
        Self {
            days: rows.len(),
            large_cash_flow_days: rows.iter().filter(|r| r.is_large_cash_flow).count(),
            cumulative_return_pct: rows.last().map(|r| r.cumulative_return_pct),
        }
    }
}
