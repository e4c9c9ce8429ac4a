//! SQLite storage implementation for the buy/sell ledger.

mod model;
mod repository;

pub use model::PortfolioTransactionDB;
pub use repository::TransactionRepository;

// Re-export trait from core for convenience
pub use folioscope_core::portfolio::transactions::TransactionRepositoryTrait;
