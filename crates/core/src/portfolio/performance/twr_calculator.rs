//! Daily time-weighted return with end-of-day external flows.
//!
//! The whole day's flow is assumed to arrive at the close, so it is backed out of
//! the ending value before the period return is taken:
//!
//! ```text
//! r[i] = (V[i] - F[i]) / V[i-1] - 1
//! ```
//!
//! Days whose flow is at least `large_cash_flow_threshold` of the prior value are
//! flagged for the caller; the formula is the same for them.

use num_traits::ToPrimitive;

use super::performance_model::TwrRow;
use crate::portfolio::transactions::CashFlowMap;
use crate::portfolio::valuation::ValuationPoint;

/// Builds one row per consecutive pair of `history`, compounding the cumulative
/// return from 1 at the start of the call. Pairs whose predecessor is not
/// positive produce no row.
pub fn calculate_twr(
    history: &[ValuationPoint],
    flows: &CashFlowMap,
    large_cash_flow_threshold: f64,
) -> Vec<TwrRow> {
    let (_, rows) = history.windows(2).fold(
        (1.0_f64, Vec::with_capacity(history.len().saturating_sub(1))),
        |(cumulative, mut rows), pair| {
            let (prev, curr) = (pair[0], pair[1]);
            if prev.value <= 0.0 {
                return (cumulative, rows);
            }

            let flow = flows
                .get(&curr.date)
                .and_then(|amount| amount.to_f64())
                .unwrap_or(0.0);
            let daily_return = (curr.value - flow) / prev.value - 1.0;
            let cumulative = cumulative * (1.0 + daily_return);

            rows.push(TwrRow {
                date: curr.date,
                market_value: curr.value,
                net_external_flow: flow,
                is_large_cash_flow: flow.abs() >= large_cash_flow_threshold * prev.value,
                daily_return_pct: daily_return * 100.0,
                cumulative_return_pct: (cumulative - 1.0) * 100.0,
            });
            (cumulative, rows)
        },
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::LARGE_CASH_FLOW_THRESHOLD;
    use crate::portfolio::performance::TwrSummary;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn point(day: u32, value: f64) -> ValuationPoint {
        ValuationPoint {
            date: d(day),
            value,
        }
    }

    #[test]
    fn test_buy_flow_is_backed_out_and_flagged() {
        let history = vec![point(3, 1000.0), point(4, 1260.0)];
        let mut flows = CashFlowMap::new();
        flows.insert(d(4), dec!(200));

        let rows = calculate_twr(&history, &flows, LARGE_CASH_FLOW_THRESHOLD);

        assert_eq!(rows.len(), 1);
        let row = rows[0];
        assert_eq!(row.date, d(4));
        assert_eq!(row.market_value, 1260.0);
        assert_eq!(row.net_external_flow, 200.0);
        assert!(row.is_large_cash_flow);
        assert!((row.daily_return_pct - 6.0).abs() < 1e-9);
        assert!((row.cumulative_return_pct - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_flag_threshold_is_inclusive() {
        let history = vec![point(3, 1000.0), point(4, 1000.0), point(5, 1000.0)];
        let mut flows = CashFlowMap::new();
        flows.insert(d(4), dec!(-150));
        flows.insert(d(5), dec!(149.99));

        let rows = calculate_twr(&history, &flows, LARGE_CASH_FLOW_THRESHOLD);

        assert!(rows[0].is_large_cash_flow);
        assert!(!rows[1].is_large_cash_flow);
    }

    #[test]
    fn test_cumulative_compounds_geometrically() {
        let history = vec![point(3, 100.0), point(4, 110.0), point(5, 99.0)];

        let rows = calculate_twr(&history, &CashFlowMap::new(), LARGE_CASH_FLOW_THRESHOLD);

        assert_eq!(rows.len(), 2);
        assert!((rows[0].daily_return_pct - 10.0).abs() < 1e-9);
        assert!((rows[1].daily_return_pct + 10.0).abs() < 1e-9);
        // 1.1 * 0.9 - 1 = -1%
        assert!((rows[1].cumulative_return_pct + 1.0).abs() < 1e-9);
        assert!(rows.iter().all(|r| r.net_external_flow == 0.0));

        let summary = TwrSummary::from_rows(&rows);
        assert_eq!(summary.days, 2);
        assert_eq!(summary.large_cash_flow_days, 0);
        assert_eq!(summary.cumulative_return_pct, Some(rows[1].cumulative_return_pct));
    }

    #[test]
    fn test_fewer_than_two_points_yield_no_rows() {
        assert!(calculate_twr(&[], &CashFlowMap::new(), 0.15).is_empty());
        assert!(calculate_twr(&[point(3, 100.0)], &CashFlowMap::new(), 0.15).is_empty());
    }

    #[test]
    fn test_non_positive_predecessor_is_skipped() {
        let history = vec![point(3, 0.0), point(4, 100.0), point(5, 105.0)];

        let rows = calculate_twr(&history, &CashFlowMap::new(), 0.15);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, d(5));
        assert!((rows[0].cumulative_return_pct - 5.0).abs() < 1e-9);
    }
}
