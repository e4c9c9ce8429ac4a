//! Today vs preceding-Friday comparison of metric values.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use super::risk_model::{HistoricalStatisticRow, MetricKey, ReconciledMetric, StatisticMetric};
use crate::utils::preceding_friday;

type MetricHistory = HashMap<MetricKey, BTreeMap<NaiveDate, f64>>;

/// Builds one comparison row per fresh metric.
///
/// Today's value is the persisted value for `today` when there is one, else the
/// fresh value. The comparison value is the persisted value of the preceding
/// Friday, or failing that the latest persisted value dated before it.
/// Persisted rows with a null value or an unknown key are ignored.
pub fn reconcile_metrics(
    fresh: &[StatisticMetric],
    persisted: &[HistoricalStatisticRow],
    today: NaiveDate,
) -> Vec<ReconciledMetric> {
    let by_metric = group_by_metric(persisted);
    let friday = preceding_friday(today);

    fresh
        .iter()
        .map(|metric| {
            let dates = by_metric.get(&metric.key);
            let today_value = dates
                .and_then(|d| d.get(&today).copied())
                .or(metric.value);
            let preceding_friday_value = dates.and_then(|d| value_on_or_before(d, friday));

            ReconciledMetric {
                key: metric.key,
                label: metric.label.clone(),
                unit: metric.unit,
                today_value,
                preceding_friday: friday,
                preceding_friday_value,
            }
        })
        .collect()
}

/// Exact match on `target`, else the latest value dated before it.
pub fn value_on_or_before(dates: &BTreeMap<NaiveDate, f64>, target: NaiveDate) -> Option<f64> {
    dates
        .get(&target)
        .or_else(|| dates.range(..target).next_back().map(|(_, v)| v))
        .copied()
}

fn group_by_metric(rows: &[HistoricalStatisticRow]) -> MetricHistory {
    rows.iter().fold(MetricHistory::new(), |mut grouped, row| {
        if let (Ok(key), Some(value)) = (row.metric_key.parse::<MetricKey>(), row.value) {
            grouped.entry(key).or_default().insert(row.as_of_date, value);
        }
        grouped
    })
}
