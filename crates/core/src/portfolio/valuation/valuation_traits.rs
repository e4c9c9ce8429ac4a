//! Repository traits for portfolio valuations.

use async_trait::async_trait;

use super::RawValuation;
use crate::errors::Result;

/// Repository trait for the daily valuation ledger.
#[async_trait]
pub trait ValuationRepositoryTrait: Send + Sync {
    /// Save valuation rows, replacing any existing row for the same (owner, date).
    async fn save_valuations(&self, valuation_records: &[RawValuation]) -> Result<()>;

    /// Get the full valuation history of an owner, ordered by date ascending.
    async fn get_valuation_history(&self, owner_id: &str) -> Result<Vec<RawValuation>>;
}
