pub mod statistics;
pub mod transactions;
pub mod valuation;

pub use statistics::StatisticsRepository;
pub use transactions::TransactionRepository;
pub use valuation::ValuationRepository;
