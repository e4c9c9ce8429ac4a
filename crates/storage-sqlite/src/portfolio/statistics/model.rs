use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use folioscope_core::portfolio::risk::{HistoricalStatisticRow, StatisticMetric};

#[derive(
    Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::portfolio_statistics)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStatisticDB {
    pub owner_id: String,
    pub as_of_date: NaiveDate,
    pub metric_key: String,
    pub value: Option<f64>,
    pub updated_at: NaiveDateTime,
}

impl PortfolioStatisticDB {
    pub fn from_metric(
        owner_id: &str,
        as_of_date: NaiveDate,
        metric: &StatisticMetric,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            as_of_date,
            metric_key: metric.key.as_str().to_string(),
            value: metric.value,
            updated_at,
        }
    }
}

impl From<PortfolioStatisticDB> for HistoricalStatisticRow {
    fn from(db: PortfolioStatisticDB) -> Self {
        Self {
            owner_id: db.owner_id,
            metric_key: db.metric_key,
            as_of_date: db.as_of_date,
            value: db.value,
            updated_at: db.updated_at,
        }
    }
}
