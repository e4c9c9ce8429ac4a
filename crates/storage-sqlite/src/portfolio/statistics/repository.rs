use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use super::model::PortfolioStatisticDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::portfolio_statistics;
use crate::schema::portfolio_statistics::dsl::*;
use folioscope_core::errors::Result;
use folioscope_core::portfolio::risk::{
    HistoricalStatisticRow, StatisticMetric, StatisticsRepositoryTrait,
};

pub struct StatisticsRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl StatisticsRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl StatisticsRepositoryTrait for StatisticsRepository {
    async fn upsert_statistics(
        &self,
        input_owner_id: &str,
        input_as_of_date: NaiveDate,
        metrics: &[StatisticMetric],
    ) -> Result<()> {
        if metrics.is_empty() {
            return Ok(());
        }

        let now = Utc::now().naive_utc();
        let rows: Vec<PortfolioStatisticDB> = metrics
            .iter()
            .map(|metric| {
                PortfolioStatisticDB::from_metric(input_owner_id, input_as_of_date, metric, now)
            })
            .collect();

        self.writer
            .exec(move |conn| {
                diesel::replace_into(portfolio_statistics::table)
                    .values(&rows)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    async fn get_statistic_history(
        &self,
        input_owner_id: &str,
    ) -> Result<Vec<HistoricalStatisticRow>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = portfolio_statistics::table
            .filter(owner_id.eq(input_owner_id))
            .order((as_of_date.asc(), metric_key.asc()))
            .select(PortfolioStatisticDB::as_select())
            .load::<PortfolioStatisticDB>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(HistoricalStatisticRow::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use folioscope_core::portfolio::risk::MetricKey;
    use tempfile::tempdir;

    async fn create_test_repository() -> (StatisticsRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer(&pool).expect("Failed to spawn writer");

        (StatisticsRepository::new(pool, writer), temp_dir)
    }

    fn d(date: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_upsert_keeps_one_row_per_key() {
        let (repo, _dir) = create_test_repository().await;
        let first = vec![
            StatisticMetric::new(MetricKey::MaxDrawdown, Some(-4.0)),
            StatisticMetric::new(MetricKey::Std1y, Some(12.0)),
        ];
        let second = vec![
            StatisticMetric::new(MetricKey::MaxDrawdown, Some(-4.5)),
            StatisticMetric::new(MetricKey::Std1y, None),
        ];

        repo.upsert_statistics("owner-1", d("2024-05-08"), &first)
            .await
            .unwrap();
        repo.upsert_statistics("owner-1", d("2024-05-08"), &second)
            .await
            .unwrap();

        let rows = repo.get_statistic_history("owner-1").await.unwrap();
        assert_eq!(rows.len(), 2);
        let drawdown = rows
            .iter()
            .find(|r| r.metric_key == "max_drawdown")
            .unwrap();
        assert_eq!(drawdown.value, Some(-4.5));
        let std = rows.iter().find(|r| r.metric_key == "std_1y").unwrap();
        assert_eq!(std.value, None);
    }

    #[tokio::test]
    async fn test_history_is_ordered_and_scoped_to_owner() {
        let (repo, _dir) = create_test_repository().await;
        let metrics = vec![StatisticMetric::new(MetricKey::Var3m95, Some(3.0))];

        repo.upsert_statistics("owner-1", d("2024-05-10"), &metrics)
            .await
            .unwrap();
        repo.upsert_statistics("owner-1", d("2024-05-03"), &metrics)
            .await
            .unwrap();
        repo.upsert_statistics("owner-2", d("2024-05-06"), &metrics)
            .await
            .unwrap();

        let rows = repo.get_statistic_history("owner-1").await.unwrap();
        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.as_of_date).collect();
        assert_eq!(dates, vec![d("2024-05-03"), d("2024-05-10")]);
    }
}
