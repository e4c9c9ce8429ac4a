//! Drawdown, trailing variance and historical-simulation VaR/CVaR.

use super::quantile::quantile_sorted;
use super::risk_model::{HorizonRisk, MetricKey, RiskStatistics, StatisticMetric};
use crate::portfolio::valuation::{DailyReturn, SanitizedHistory, ValuationPoint};
use crate::settings::RiskSettings;

/// Minimum number of daily returns needed for a statistics run.
pub const MIN_DAILY_RETURNS: usize = 2;

/// Computes the seven reported metrics.
///
/// Returns `None` when the history is empty or holds fewer than two daily
/// returns. Metrics whose arithmetic is not finite are reported as `None`.
pub fn compute_statistics(
    sanitized: &SanitizedHistory,
    settings: &RiskSettings,
) -> Option<RiskStatistics> {
    let current_value = sanitized.current_value()?;
    if sanitized.daily_returns.len() < MIN_DAILY_RETURNS {
        return None;
    }
    let history = &sanitized.history;

    let max_drawdown = max_drawdown(history);
    let variance = trailing_variance(&sanitized.daily_returns, settings.trailing_window);
    let std = variance.map(f64::sqrt).and_then(finite);
    let short_horizon = horizon_risk(
        history,
        settings.short_horizon,
        settings.confidence,
        current_value,
    );
    let long_horizon = horizon_risk(
        history,
        settings.long_horizon,
        settings.confidence,
        current_value,
    );

    let metrics = vec![
        StatisticMetric::new(MetricKey::MaxDrawdown, percent(max_drawdown)),
        StatisticMetric::new(MetricKey::Variance1y, variance),
        StatisticMetric::new(MetricKey::Std1y, percent(std)),
        StatisticMetric::new(MetricKey::Var3m95, percent(short_horizon.var_pct)),
        StatisticMetric::new(MetricKey::Cvar3m95Eur, short_horizon.cvar_amount),
        StatisticMetric::new(MetricKey::Var6m95, percent(long_horizon.var_pct)),
        StatisticMetric::new(MetricKey::Cvar6m95Eur, long_horizon.cvar_amount),
    ];

    Some(RiskStatistics {
        metrics,
        short_horizon,
        long_horizon,
        valid_returns: sanitized.daily_returns.len(),
        current_value,
    })
}

/// Deepest decline from the running peak, as a fraction (<= 0).
///
/// The peak starts at the first value of `history`.
pub fn max_drawdown(history: &[ValuationPoint]) -> Option<f64> {
    let first = history.first()?.value;
    let (_, deepest) = history
        .iter()
        .fold((first, 0.0_f64), |(peak, deepest), point| {
            let peak = peak.max(point.value);
            (peak, deepest.min(point.value / peak - 1.0))
        });
    finite(deepest)
}

/// Sample variance of the last `window` daily returns (divisor `n - 1`, at least 1).
pub fn trailing_variance(returns: &[DailyReturn], window: usize) -> Option<f64> {
    let used = &returns[returns.len().saturating_sub(window)..];
    if used.is_empty() {
        return None;
    }
    let n = used.len() as f64;
    let mean = used.iter().map(|r| r.r).sum::<f64>() / n;
    let squares = used.iter().map(|r| (r.r - mean).powi(2)).sum::<f64>();
    finite(squares / (n - 1.0).max(1.0))
}

/// Historical-simulation VaR and CVaR of the `window`-day loss distribution.
///
/// Every overlapping window of the history contributes one loss
/// `-(now / base - 1)`. VaR is the `confidence` quantile of the losses and CVaR
/// the mean of the losses at or above VaR.
pub fn horizon_risk(
    history: &[ValuationPoint],
    window: usize,
    confidence: f64,
    current_value: f64,
) -> HorizonRisk {
    let mut risk = HorizonRisk {
        window,
        samples: 0,
        var_pct: None,
        cvar_pct: None,
        var_amount: None,
        cvar_amount: None,
    };
    if window == 0 || history.len() <= window {
        return risk;
    }

    let mut losses: Vec<f64> = history
        .iter()
        .zip(&history[window..])
        .map(|(base, now)| -(now.value / base.value - 1.0))
        .collect();
    losses.sort_by(f64::total_cmp);
    risk.samples = losses.len();

    let var = quantile_sorted(&losses, confidence).and_then(finite);
    let cvar = var.and_then(|var| {
        // Inclusive tail: losses tied with VaR belong to it.
        let tail: Vec<f64> = losses.iter().copied().filter(|loss| *loss >= var).collect();
        if tail.is_empty() {
            return None;
        }
        finite(tail.iter().sum::<f64>() / tail.len() as f64)
    });

    risk.var_pct = var;
    risk.cvar_pct = cvar;
    risk.var_amount = var.map(|v| v * current_value).and_then(finite);
    risk.cvar_amount = cvar.map(|c| c * current_value).and_then(finite);
    risk
}

fn percent(fraction: Option<f64>) -> Option<f64> {
    fraction.map(|f| f * 100.0).and_then(finite)
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
