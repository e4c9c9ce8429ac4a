//! SQLite storage implementation for the valuation ledger.

mod model;
mod repository;

pub use model::PortfolioValuationDB;
pub use repository::ValuationRepository;

// Re-export trait from core for convenience
pub use folioscope_core::portfolio::valuation::ValuationRepositoryTrait;
