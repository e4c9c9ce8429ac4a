//! Transaction ledger domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, ValidationError};

pub const TRANSACTION_SIDE_BUY: &str = "BUY";
pub const TRANSACTION_SIDE_SELL: &str = "SELL";

/// Net external cash flow per date. Dates without transactions are absent.
pub type CashFlowMap = BTreeMap<NaiveDate, Decimal>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionSide {
    Buy,
    Sell,
}

impl TransactionSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionSide::Buy => TRANSACTION_SIDE_BUY,
            TransactionSide::Sell => TRANSACTION_SIDE_SELL,
        }
    }
}

impl fmt::Display for TransactionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionSide {
    type Err = Error;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            TRANSACTION_SIDE_BUY => Ok(TransactionSide::Buy),
            TRANSACTION_SIDE_SELL => Ok(TransactionSide::Sell),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown transaction side '{}'",
                other
            )))),
        }
    }
}

/// A row of the buy/sell ledger as stored.
///
/// `side` keeps the stored spelling; prices are unit prices already converted
/// to the reporting currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub owner_id: String,
    pub symbol: String,
    pub side: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub txn_date: NaiveDate,
    pub created_at: Option<NaiveDateTime>,
}

/// A ledger row that passed normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub symbol: String,
    pub side: TransactionSide,
    pub quantity: Decimal,
    pub price: Decimal,
    /// `quantity * price`, known to fit in a `Decimal`.
    pub gross: Decimal,
    pub date: NaiveDate,
    pub created_at: Option<NaiveDateTime>,
}

impl LedgerEntry {
    /// Signed external flow: BUY adds `quantity * price`, SELL removes it.
    pub fn signed_flow(&self) -> Decimal {
        match self.side {
            TransactionSide::Buy => self.gross,
            TransactionSide::Sell => -self.gross,
        }
    }
}

impl Transaction {
    /// Normalizes the row, or returns `None` when the side is unknown, the
    /// quantity or price is not strictly positive, or `quantity * price`
    /// overflows.
    pub fn to_ledger_entry(&self) -> Option<LedgerEntry> {
        let side = self.side.parse::<TransactionSide>().ok()?;
        if self.quantity <= Decimal::ZERO || self.price <= Decimal::ZERO {
            return None;
        }
        let gross = self.quantity.checked_mul(self.price)?;
        Some(LedgerEntry {
            symbol: self.symbol.trim().to_uppercase(),
            side,
            quantity: self.quantity,
            price: self.price,
            gross,
            date: self.txn_date,
            created_at: self.created_at,
        })
    }
}

/// Average-cost position still open after replaying the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenPosition {
    pub symbol: String,
    pub quantity: Decimal,
    pub cost_basis: Decimal,
    pub average_cost: Decimal,
}
