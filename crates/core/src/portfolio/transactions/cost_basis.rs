//! Average-cost replay of the ledger.

use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::transaction_model::{LedgerEntry, OpenPosition, Transaction, TransactionSide};
use crate::constants::{DECIMAL_PRECISION, QUANTITY_THRESHOLD};

#[derive(Debug, Default)]
struct PositionState {
    quantity: Decimal,
    cost_basis: Decimal,
}

/// Replays valid ledger rows ordered by (date, created_at, symbol) and returns the
/// positions that remain open, sorted by symbol.
///
/// A BUY adds its quantity and `quantity * price` to the position. A SELL removes
/// at most the held quantity at the current average cost; a SELL on a closed
/// position is ignored. A row whose position arithmetic overflows is skipped.
pub fn calculate_open_positions(transactions: &[Transaction]) -> Vec<OpenPosition> {
    let mut entries: Vec<LedgerEntry> = transactions
        .iter()
        .filter_map(Transaction::to_ledger_entry)
        .filter(|entry| !entry.symbol.is_empty())
        .collect();
    entries.sort_by(|a, b| {
        (a.date, a.created_at, &a.symbol).cmp(&(b.date, b.created_at, &b.symbol))
    });

    let mut positions: BTreeMap<String, PositionState> = BTreeMap::new();
    for entry in entries {
        let state = positions.entry(entry.symbol.clone()).or_default();
        let next = match entry.side {
            TransactionSide::Buy => buy(state, &entry),
            TransactionSide::Sell => {
                if state.quantity <= QUANTITY_THRESHOLD {
                    debug!(
                        "Ignoring SELL of {} {} on {}: no open quantity",
                        entry.quantity, entry.symbol, entry.date
                    );
                    continue;
                }
                sell(state, &entry)
            }
        };
        match next {
            Some(next) => *state = next,
            None => debug!(
                "Skipping {} of {} {} on {}: position arithmetic overflows",
                entry.side, entry.quantity, entry.symbol, entry.date
            ),
        }
    }

    positions
        .into_iter()
        .filter(|(_, state)| state.quantity.abs() > QUANTITY_THRESHOLD)
        .filter_map(|(symbol, state)| {
            let average_cost = state.cost_basis.checked_div(state.quantity)?;
            Some(OpenPosition {
                average_cost: average_cost.round_dp(DECIMAL_PRECISION),
                cost_basis: state.cost_basis.round_dp(DECIMAL_PRECISION),
                quantity: state.quantity,
                symbol,
            })
        })
        .collect()
}

fn buy(state: &PositionState, entry: &LedgerEntry) -> Option<PositionState> {
    Some(PositionState {
        quantity: state.quantity.checked_add(entry.quantity)?,
        cost_basis: state.cost_basis.checked_add(entry.gross)?,
    })
}

fn sell(state: &PositionState, entry: &LedgerEntry) -> Option<PositionState> {
    let average_cost = state.cost_basis.checked_div(state.quantity)?;
    let sell_quantity = entry.quantity.min(state.quantity);
    Some(PositionState {
        quantity: state.quantity - sell_quantity,
        cost_basis: state
            .cost_basis
            .checked_sub(average_cost.checked_mul(sell_quantity)?)?,
    })
}

/// Sum of the cost basis of `positions`, saturating at `Decimal::MAX`.
pub fn total_cost_basis(positions: &[OpenPosition]) -> Decimal {
    positions
        .iter()
        .fold(Decimal::ZERO, |total, p| total.saturating_add(p.cost_basis))
}
