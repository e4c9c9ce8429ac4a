//! Valuation ledger: domain models, repository trait, and history sanitizing.

mod history_sanitizer;
mod valuation_model;
mod valuation_traits;

pub use history_sanitizer::{daily_returns, sanitize_history};
pub use valuation_model::*;
pub use valuation_traits::ValuationRepositoryTrait;
