//! Instrument metrics — pure functions from a price column to scalars.
//!
//! Every metric drops missing cells first and returns `None` when the
//! remaining observations cannot support the calculation. No metric
//! panics or fabricates a value for degenerate input; absent-value
//! propagation is the only failure signal.

use serde::{Deserialize, Serialize};

/// Trading days per year, used to annualize volatility.
pub const TRADING_DAYS: f64 = 252.0;

/// Per-instrument return, volatility, and drawdown.
///
/// `None` means the price column had too few valid observations (or a
/// zero base price) to compute that metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub return_pct: Option<f64>,
    pub vol_pct: Option<f64>,
    pub max_drawdown_pct: Option<f64>,
}

impl MetricsRecord {
    /// Compute all three metrics from one instrument's price column.
    pub fn compute(prices: &[Option<f64>]) -> Self {
        Self {
            return_pct: return_pct(prices),
            vol_pct: vol_pct(prices),
            max_drawdown_pct: max_drawdown_pct(prices),
        }
    }

    /// True if any of the three metrics is absent.
    pub fn has_missing(&self) -> bool {
        self.return_pct.is_none() || self.vol_pct.is_none() || self.max_drawdown_pct.is_none()
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Total period return in percent: `(last − first) / first × 100`.
///
/// `None` with fewer than 2 valid prices, or when the first valid price
/// is exactly zero (no fabricated value for a division by zero).
pub fn return_pct(prices: &[Option<f64>]) -> Option<f64> {
    let valid = drop_missing(prices);
    if valid.len() < 2 {
        return None;
    }
    let first = valid[0];
    let last = valid[valid.len() - 1];
    if first == 0.0 {
        return None;
    }
    Some((last - first) / first * 100.0)
}

/// Annualized volatility in percent.
///
/// Sample standard deviation (divisor n−1) of log returns between
/// consecutive valid prices, scaled by √252 and expressed as a percent.
/// `None` with fewer than 2 valid prices or fewer than 2 log returns.
pub fn vol_pct(prices: &[Option<f64>]) -> Option<f64> {
    let valid = drop_missing(prices);
    if valid.len() < 2 {
        return None;
    }
    let log_returns: Vec<f64> = valid.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    if log_returns.len() < 2 {
        return None;
    }
    Some(sample_std_dev(&log_returns) * TRADING_DAYS.sqrt() * 100.0)
}

/// Maximum drawdown in percent: most negative `price / running_max − 1`,
/// times 100. Always ≤ 0 when present.
pub fn max_drawdown_pct(prices: &[Option<f64>]) -> Option<f64> {
    let valid = drop_missing(prices);
    if valid.len() < 2 {
        return None;
    }
    let mut peak = valid[0];
    let mut worst = 0.0_f64;
    for &price in &valid {
        if price > peak {
            peak = price;
        }
        let dd = price / peak - 1.0;
        // NaN (zero peak) fails the comparison and is skipped.
        if dd < worst {
            worst = dd;
        }
    }
    Some(worst * 100.0)
}

// ─── Helpers ────────────────────────────────────────────────────────

/// Valid observations only. A `Some(NaN)` cell counts as missing — the
/// table contract is `None` for missing, but a NaN arriving through the
/// API must not poison the arithmetic.
fn drop_missing(prices: &[Option<f64>]) -> Vec<f64> {
    prices
        .iter()
        .filter_map(|p| p.filter(|v| !v.is_nan()))
        .collect()
}

/// Bessel-corrected standard deviation. Callers guarantee `len >= 2`.
pub(crate) fn sample_std_dev(values: &[f64]) -> f64 {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
