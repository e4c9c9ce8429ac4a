//! Database model for daily portfolio valuations.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use folioscope_core::portfolio::valuation::RawValuation;

#[derive(
    Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::portfolio_valuations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuationDB {
    pub owner_id: String,
    pub valuation_date: NaiveDate,
    pub value: Option<String>,
}

// Conversion from DB model to Domain model
impl From<PortfolioValuationDB> for RawValuation {
    fn from(db: PortfolioValuationDB) -> Self {
        // Unparsable text is surfaced as a missing value and dropped by the sanitizer.
        let value = db.value.as_deref().and_then(|raw| {
            Decimal::from_str(raw.trim())
                .map_err(|e| {
                    log::debug!(
                        "Unparsable valuation '{}' for {} on {}: {}",
                        raw,
                        db.owner_id,
                        db.valuation_date,
                        e
                    )
                })
                .ok()
        });
        Self {
            owner_id: db.owner_id,
            valuation_date: db.valuation_date,
            value,
        }
    }
}

// Conversion from Domain model to DB model
impl From<RawValuation> for PortfolioValuationDB {
    fn from(domain: RawValuation) -> Self {
        Self {
            owner_id: domain.owner_id,
            valuation_date: domain.valuation_date,
            value: domain.value.map(|v| v.to_string()),
        }
    }
}
