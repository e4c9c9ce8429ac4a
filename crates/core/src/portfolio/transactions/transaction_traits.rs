//! Repository traits for the transaction ledger.

use async_trait::async_trait;

use super::Transaction;
use crate::errors::Result;

/// Repository trait for buy/sell transactions.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Save transactions, replacing any existing row with the same id.
    async fn save_transactions(&self, transactions: &[Transaction]) -> Result<()>;

    /// Get all transactions of an owner, in no particular order.
    async fn get_transactions(&self, owner_id: &str) -> Result<Vec<Transaction>>;
}
