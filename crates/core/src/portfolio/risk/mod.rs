//! Risk statistics over the valuation ledger.
//!
//! Max drawdown, trailing variance and volatility, historical-simulation VaR and
//! CVaR over two horizons, and the today vs preceding-Friday comparison of the
//! persisted metric history. [`RiskService`] ties them to the repositories and
//! adds the time-weighted return and average-cost positions to the report.

mod quantile;
mod reconciler;
mod risk_model;
mod risk_service;
mod risk_traits;
mod statistics_calculator;

pub use quantile::quantile_sorted;
pub use reconciler::{reconcile_metrics, value_on_or_before};
pub use risk_model::*;
pub use risk_service::*;
pub use risk_traits::*;
pub use statistics_calculator::{
    compute_statistics, horizon_risk, max_drawdown, trailing_variance, MIN_DAILY_RETURNS,
};
