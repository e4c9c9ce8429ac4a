//! Cleans a raw valuation series into an ordered sequence of positive values.

use log::debug;
use num_traits::ToPrimitive;

use super::valuation_model::{DailyReturn, RawValuation, SanitizedHistory, ValuationPoint};

/// Sorts, filters and differentiates a raw valuation series.
///
/// Points whose value is missing, non-finite or not strictly positive are dropped.
/// When a date appears more than once the last valid point for it wins, so the
/// resulting history is strictly increasing in date.
pub fn sanitize_history(raw: &[RawValuation]) -> SanitizedHistory {
    let mut points: Vec<ValuationPoint> = raw
        .iter()
        .filter_map(|row| {
            let value = row.value.as_ref().and_then(|v| v.to_f64())?;
            (value.is_finite() && value > 0.0).then_some(ValuationPoint {
                date: row.valuation_date,
                value,
            })
        })
        .collect();

    // Stable sort keeps input order among equal dates.
    points.sort_by_key(|p| p.date);

    let mut history: Vec<ValuationPoint> = Vec::with_capacity(points.len());
    for point in points {
        match history.last_mut() {
            Some(last) if last.date == point.date => *last = point,
            _ => history.push(point),
        }
    }

    let dropped = raw.len() - history.len();
    if dropped > 0 {
        debug!(
            "History sanitizer dropped {} of {} valuation points",
            dropped,
            raw.len()
        );
    }

    let daily_returns = daily_returns(&history);

    SanitizedHistory {
        history,
        daily_returns,
    }
}

/// Simple returns over consecutive pairs whose predecessor is positive.
pub fn daily_returns(history: &[ValuationPoint]) -> Vec<DailyReturn> {
    history
        .windows(2)
        .filter(|pair| pair[0].value > 0.0)
        .map(|pair| DailyReturn {
            date: pair[1].date,
            r: (pair[1].value - pair[0].value) / pair[0].value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn raw(date: &str, value: Option<Decimal>) -> RawValuation {
        RawValuation {
            owner_id: "owner-1".to_string(),
            valuation_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            value,
        }
    }

    #[test]
    fn test_sorts_by_date() {
        let rows = vec![
            raw("2024-01-03", Some(dec!(121))),
            raw("2024-01-01", Some(dec!(100))),
            raw("2024-01-02", Some(dec!(110))),
        ];

        let sanitized = sanitize_history(&rows);

        let values: Vec<f64> = sanitized.history.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![100.0, 110.0, 121.0]);
        assert_eq!(sanitized.daily_returns.len(), 2);
        assert!((sanitized.daily_returns[0].r - 0.10).abs() < 1e-12);
        assert!((sanitized.daily_returns[1].r - 0.10).abs() < 1e-12);
        assert_eq!(
            sanitized.daily_returns[1].date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_drops_missing_zero_and_negative_values() {
        let rows = vec![
            raw("2024-01-01", Some(dec!(100))),
            raw("2024-01-02", None),
            raw("2024-01-03", Some(dec!(0))),
            raw("2024-01-04", Some(dec!(-5))),
            raw("2024-01-05", Some(dec!(105))),
        ];

        let sanitized = sanitize_history(&rows);

        assert_eq!(sanitized.history.len(), 2);
        assert_eq!(sanitized.daily_returns.len(), 1);
        // The return bridges the dropped points.
        assert!((sanitized.daily_returns[0].r - 0.05).abs() < 1e-12);
        assert_eq!(sanitized.current_value(), Some(105.0));
    }

    #[test]
    fn test_duplicate_dates_keep_last_valid_point() {
        let rows = vec![
            raw("2024-01-01", Some(dec!(100))),
            raw("2024-01-02", Some(dec!(90))),
            raw("2024-01-02", Some(dec!(95))),
            raw("2024-01-02", None),
        ];

        let sanitized = sanitize_history(&rows);

        assert_eq!(sanitized.history.len(), 2);
        assert_eq!(sanitized.history[1].value, 95.0);
    }

    #[test]
    fn test_empty_input() {
        let sanitized = sanitize_history(&[]);
        assert!(sanitized.is_empty());
        assert!(sanitized.daily_returns.is_empty());
        assert_eq!(sanitized.current_value(), None);
    }
}
