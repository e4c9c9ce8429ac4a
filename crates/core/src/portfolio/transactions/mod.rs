//! Buy/sell transaction ledger.
//!
//! The ledger feeds two calculations: the per-date external cash flow map used by
//! the time-weighted return, and the average-cost open positions.

mod cash_flow_aggregator;
mod cost_basis;
mod transaction_model;
mod transaction_traits;

pub use cash_flow_aggregator::aggregate_cash_flows;
pub use cost_basis::{calculate_open_positions, total_cost_basis};
pub use transaction_model::*;
pub use transaction_traits::TransactionRepositoryTrait;
