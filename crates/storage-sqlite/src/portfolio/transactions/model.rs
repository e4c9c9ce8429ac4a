//! Database model for ledger transactions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use folioscope_core::errors::{Error, Result, ValidationError};
use folioscope_core::portfolio::transactions::Transaction;

/// Quantity and price are stored as decimal text.
#[derive(
    Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::portfolio_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTransactionDB {
    pub id: String,
    pub owner_id: String,
    pub symbol: String,
    pub side: String,
    pub quantity: String,
    pub price: String,
    pub txn_date: NaiveDate,
    pub created_at: Option<NaiveDateTime>,
}

fn parse_decimal(field: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|e| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "Invalid {} '{}': {}",
            field, raw, e
        )))
    })
}

impl TryFrom<PortfolioTransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: PortfolioTransactionDB) -> Result<Self> {
        let quantity = parse_decimal("quantity", &db.quantity)?;
        let price = parse_decimal("price", &db.price)?;
        Ok(Self {
            id: db.id,
            owner_id: db.owner_id,
            symbol: db.symbol,
            side: db.side,
            quantity,
            price,
            txn_date: db.txn_date,
            created_at: db.created_at,
        })
    }
}

impl From<Transaction> for PortfolioTransactionDB {
    fn from(domain: Transaction) -> Self {
        Self {
            id: domain.id,
            owner_id: domain.owner_id,
            symbol: domain.symbol,
            side: domain.side,
            quantity: domain.quantity.to_string(),
            price: domain.price.to_string(),
            txn_date: domain.txn_date,
            created_at: domain.created_at,
        }
    }
}
