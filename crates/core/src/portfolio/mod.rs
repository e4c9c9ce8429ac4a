//! Portfolio ledgers and the calculations built on them.

pub mod performance;
pub mod risk;
pub mod transactions;
pub mod valuation;
