use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use log::warn;
use std::sync::Arc;

use super::model::PortfolioTransactionDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::portfolio_transactions;
use crate::schema::portfolio_transactions::dsl::*;
use folioscope_core::errors::Result;
use folioscope_core::portfolio::transactions::{Transaction, TransactionRepositoryTrait};

pub struct TransactionRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        if transactions.is_empty() {
            return Ok(());
        }

        let rows: Vec<PortfolioTransactionDB> = transactions
            .iter()
            .cloned()
            .map(PortfolioTransactionDB::from)
            .collect();

        self.writer
            .exec(move |conn| {
                for chunk in rows.chunks(1000) {
                    diesel::replace_into(portfolio_transactions::table)
                        .values(chunk)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(())
            })
            .await
    }

    async fn get_transactions(&self, input_owner_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = portfolio_transactions::table
            .filter(owner_id.eq(input_owner_id))
            .order((txn_date.asc(), id.asc()))
            .select(PortfolioTransactionDB::as_select())
            .load::<PortfolioTransactionDB>(&mut conn)
            .into_core()?;

        // A corrupt row is skipped rather than failing the whole ledger.
        let transactions = rows
            .into_iter()
            .filter_map(|row| {
                let row_id = row.id.clone();
                Transaction::try_from(row)
                    .map_err(|e| warn!("Skipping transaction {}: {}", row_id, e))
                    .ok()
            })
            .collect();

        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (
        TransactionRepository,
        Arc<Pool<ConnectionManager<SqliteConnection>>>,
        tempfile::TempDir,
    ) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer(&pool).expect("Failed to spawn writer");

        (
            TransactionRepository::new(Arc::clone(&pool), writer),
            pool,
            temp_dir,
        )
    }

    fn txn(txn_id: &str, day: u32) -> Transaction {
        Transaction {
            id: txn_id.to_string(),
            owner_id: "owner-1".to_string(),
            symbol: "ETF".to_string(),
            side: "BUY".to_string(),
            quantity: dec!(2.5),
            price: dec!(80.10),
            txn_date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_round_trips_decimal_text() {
        let (repo, _pool, _dir) = create_test_repository().await;

        repo.save_transactions(&[txn("b", 5), txn("a", 2)]).await.unwrap();

        let ledger = repo.get_transactions("owner-1").await.unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].id, "a");
        assert_eq!(ledger[0].quantity, dec!(2.5));
        assert_eq!(ledger[0].price, dec!(80.10));
    }

    #[tokio::test]
    async fn test_corrupt_row_is_skipped() {
        let (repo, pool, _dir) = create_test_repository().await;
        repo.save_transactions(&[txn("good", 1)]).await.unwrap();

        let mut conn = get_connection(&pool).expect("Failed to get connection");
        diesel::sql_query(
            "INSERT INTO portfolio_transactions (id, owner_id, symbol, side, quantity, price, txn_date) \
             VALUES ('bad', 'owner-1', 'ETF', 'BUY', 'lots', '10', '2024-04-03')",
        )
        .execute(&mut conn)
        .expect("Failed to insert corrupt row");

        let ledger = repo.get_transactions("owner-1").await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].id, "good");
    }
}
