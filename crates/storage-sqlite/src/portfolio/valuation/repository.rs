use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use super::model::PortfolioValuationDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::portfolio_valuations;
use crate::schema::portfolio_valuations::dsl::*;
use folioscope_core::errors::Result;
use folioscope_core::portfolio::valuation::{RawValuation, ValuationRepositoryTrait};

pub struct ValuationRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ValuationRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ValuationRepositoryTrait for ValuationRepository {
    async fn save_valuations(&self, valuation_records: &[RawValuation]) -> Result<()> {
        if valuation_records.is_empty() {
            return Ok(());
        }

        let records_to_save: Vec<PortfolioValuationDB> = valuation_records
            .iter()
            .cloned()
            .map(PortfolioValuationDB::from)
            .collect();

        self.writer
            .exec(move |conn| {
                for chunk in records_to_save.chunks(1000) {
                    diesel::replace_into(portfolio_valuations::table)
                        .values(chunk)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(())
            })
            .await
    }

    async fn get_valuation_history(&self, input_owner_id: &str) -> Result<Vec<RawValuation>> {
        let mut conn = get_connection(&self.pool)?;

        let history_dbs = portfolio_valuations::table
            .filter(owner_id.eq(input_owner_id))
            .order(valuation_date.asc())
            .select(PortfolioValuationDB::as_select())
            .load::<PortfolioValuationDB>(&mut conn)
            .into_core()?;

        Ok(history_dbs.into_iter().map(RawValuation::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (ValuationRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer(&pool).expect("Failed to spawn writer");

        (ValuationRepository::new(pool, writer), temp_dir)
    }

    fn row(day: u32, amount: Option<rust_decimal::Decimal>) -> RawValuation {
        RawValuation {
            owner_id: "owner-1".to_string(),
            valuation_date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
            value: amount,
        }
    }

    #[tokio::test]
    async fn test_save_replaces_same_date_and_orders_history() {
        let (repo, _dir) = create_test_repository().await;

        repo.save_valuations(&[row(3, Some(dec!(1020))), row(1, Some(dec!(1000))), row(2, None)])
            .await
            .unwrap();
        repo.save_valuations(&[row(3, Some(dec!(1030.5)))]).await.unwrap();

        let history = repo.get_valuation_history("owner-1").await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].value, Some(dec!(1000)));
        assert_eq!(history[1].value, None);
        assert_eq!(history[2].value, Some(dec!(1030.5)));
        assert!(repo.get_valuation_history("owner-2").await.unwrap().is_empty());
    }
}
