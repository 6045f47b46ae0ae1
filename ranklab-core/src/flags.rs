//! Quality flags — diagnostics derived beside the score, never feeding it.

use serde::{Deserialize, Serialize};

use crate::metrics::MetricsRecord;

/// Per-instrument data-quality booleans, carried through to the output
/// for downstream traceability. Scoring never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityFlags {
    /// Any cell in the raw price column was missing.
    pub has_na_prices: bool,
    /// Any of the three computed metrics is absent.
    pub has_na_metrics: bool,
    /// Drawdown came out positive. The metric is constructed ≤ 0, so a
    /// true here can only come from a malformed record upstream.
    pub drawdown_positive: bool,
}

impl QualityFlags {
    /// Derive the flags from one instrument's raw prices and metrics.
    pub fn derive(prices: &[Option<f64>], metrics: &MetricsRecord) -> Self {
        Self {
            has_na_prices: prices.iter().any(|p| p.map_or(true, f64::is_nan)),
            has_na_metrics: metrics.has_missing(),
            drawdown_positive: metrics.max_drawdown_pct.is_some_and(|d| d > 0.0),
        }
    }

    /// True if any flag is raised.
    pub fn any(&self) -> bool {
        self.has_na_prices || self.has_na_metrics || self.drawdown_positive
    }
}
