//! Engine configuration.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_REPORTING_CURRENCY, LARGE_CASH_FLOW_THRESHOLD, LONG_HORIZON_DAYS, SHORT_HORIZON_DAYS,
    TRADING_DAYS_PER_YEAR, VAR_CONFIDENCE,
};
use crate::errors::{Error, Result};
use crate::utils::DEFAULT_VALUATION_TZ;

/// Parameters of the risk and performance engine.
///
/// `RiskSettings::default()` is the fixed reporting policy: a 252-day trailing
/// variance window, 63/126-day horizons at 95% confidence, and a 15% large-flow flag.
/// Metric keys do not change with these values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskSettings {
    pub trailing_window: usize,
    pub short_horizon: usize,
    pub long_horizon: usize,
    pub confidence: f64,
    pub large_cash_flow_threshold: f64,
    pub reporting_currency: String,
    pub valuation_timezone: Tz,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            trailing_window: TRADING_DAYS_PER_YEAR,
            short_horizon: SHORT_HORIZON_DAYS,
            long_horizon: LONG_HORIZON_DAYS,
            confidence: VAR_CONFIDENCE,
            large_cash_flow_threshold: LARGE_CASH_FLOW_THRESHOLD,
            reporting_currency: DEFAULT_REPORTING_CURRENCY.to_string(),
            valuation_timezone: DEFAULT_VALUATION_TZ,
        }
    }
}

impl RiskSettings {
    pub fn validate(&self) -> Result<()> {
        if self.trailing_window < 2 {
            return Err(Error::InvalidConfigValue(format!(
                "trailing window must be at least 2 days, got {}",
                self.trailing_window
            )));
        }
        if self.short_horizon == 0 || self.long_horizon == 0 {
            return Err(Error::InvalidConfigValue(
                "horizon windows must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(Error::InvalidConfigValue(format!(
                "confidence must be within [0, 1], got {}",
                self.confidence
            )));
        }
        if !self.large_cash_flow_threshold.is_finite() || self.large_cash_flow_threshold < 0.0 {
            return Err(Error::InvalidConfigValue(format!(
                "large cash flow threshold must be a non-negative number, got {}",
                self.large_cash_flow_threshold
            )));
        }
        Ok(())
    }
}
