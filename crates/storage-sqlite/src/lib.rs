//! SQLite storage implementation for Folioscope.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `folioscope-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for the valuation, transaction and statistics ledgers
//!
//! ```text
//!   core (domain, traits)
//!          │
//!          ▼
//!   storage-sqlite (this crate)
//!          │
//!          ▼
//!       SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod portfolio;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use portfolio::{StatisticsRepository, TransactionRepository, ValuationRepository};

// Re-export from folioscope-core for convenience
pub use folioscope_core::errors::{DatabaseError, Error, Result};
