//! SQLite storage implementation for the per-day metric history.

mod model;
mod repository;

pub use model::PortfolioStatisticDB;
pub use repository::StatisticsRepository;

// Re-export trait from core for convenience
pub use folioscope_core::portfolio::risk::StatisticsRepositoryTrait;
