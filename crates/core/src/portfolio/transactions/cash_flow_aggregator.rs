//! Per-date net external cash flows from the buy/sell ledger.

use log::debug;

use super::transaction_model::{CashFlowMap, Transaction};

/// Sums the signed flow of every valid transaction by date.
///
/// Addition on `Decimal` is exact, so the result does not depend on the
/// order of `transactions`. Invalid rows are skipped, as is a row whose flow
/// would overflow its date's running total.
pub fn aggregate_cash_flows(transactions: &[Transaction]) -> CashFlowMap {
    let mut flows = CashFlowMap::new();
    for txn in transactions {
        let Some(entry) = txn.to_ledger_entry() else {
            debug!(
                "Skipping ledger row {} ({} {} @ {})",
                txn.id, txn.side, txn.quantity, txn.price
            );
            continue;
        };
        let total = flows.entry(entry.date).or_default();
        match total.checked_add(entry.signed_flow()) {
            Some(sum) => *total = sum,
            None => debug!(
                "Skipping ledger row {} ({} {} @ {}): daily flow overflows",
                txn.id, txn.side, txn.quantity, txn.price
            ),
        }
    }
    flows
}
