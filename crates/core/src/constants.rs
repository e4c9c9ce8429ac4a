use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Trading days used for the trailing variance window (~1 year)
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Horizon windows, in trading days
pub const SHORT_HORIZON_DAYS: usize = 63;
pub const LONG_HORIZON_DAYS: usize = 126;

/// Confidence level for historical-simulation VaR/CVaR
pub const VAR_CONFIDENCE: f64 = 0.95;

/// A day's external flow is flagged when |flow| >= this share of the prior-day value
pub const LARGE_CASH_FLOW_THRESHOLD: f64 = 0.15;

/// Default reporting currency of valuations and transaction prices
pub const DEFAULT_REPORTING_CURRENCY: &str = "EUR";

/// Quantity threshold under which a position is considered closed
pub const QUANTITY_THRESHOLD: Decimal = dec!(0.000000000001);

/// Decimal precision for cost basis amounts
pub const DECIMAL_PRECISION: u32 = 6;
