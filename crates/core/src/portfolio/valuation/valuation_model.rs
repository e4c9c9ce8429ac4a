//! Portfolio valuation domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A valuation row as produced upstream.
///
/// `value` is `None` when the stored value is missing or could not be parsed.
/// Negative and zero values are kept here; they are removed by the sanitizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawValuation {
    pub owner_id: String,
    pub valuation_date: NaiveDate,
    pub value: Option<Decimal>,
}

/// A sanitized valuation: finite and strictly positive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Simple return between two consecutive sanitized valuations, dated on the later one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyReturn {
    pub date: NaiveDate,
    pub r: f64,
}

/// Output of the history sanitizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedHistory {
    pub history: Vec<ValuationPoint>,
    pub daily_returns: Vec<DailyReturn>,
}

impl SanitizedHistory {
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Latest value of the cleaned history.
    pub fn current_value(&self) -> Option<f64> {
        self.history.last().map(|p| p.value)
    }
}
