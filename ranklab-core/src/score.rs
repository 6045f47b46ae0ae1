//! Weighted scoring with unconditional hard-stop overrides.
//!
//! The three normalized metric columns are combined into a weighted raw
//! score, mapped to the configured integer range, and then overridden by
//! the hard-stop rules. Every instrument gets a well-defined integer
//! score, including those with wholly absent metrics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics::MetricsRecord;
use crate::normalize::min_max_normalize;

/// Structurally unusable scoring parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("score_min ({min}) must be less than score_max ({max})")]
    InvalidScoreRange { min: i32, max: i32 },
}

/// Immutable scoring parameters, passed by value into each stage so two
/// concurrent runs with different configurations cannot interfere.
///
/// The weights are expected to sum to 1.0 but this is not enforced:
/// callers passing weights with a different sum get scores scaled
/// accordingly. `weights_sum` exists so callers can surface the gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub w_return: f64,
    pub w_vol: f64,
    pub w_dd: f64,

    /// Hard stop: `return_pct` strictly below this forces `score_min`.
    pub hardstop_return_lt: f64,
    /// Hard stop: `vol_pct` strictly above this forces `score_min`.
    pub hardstop_vol_gt: f64,
    /// Hard stop: `|max_drawdown_pct|` strictly above this forces `score_min`.
    pub hardstop_dd_gt: f64,

    pub score_min: i32,
    pub score_max: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            w_return: 0.50,
            w_vol: 0.30,
            w_dd: 0.20,
            hardstop_return_lt: 0.0,
            hardstop_vol_gt: 50.0,
            hardstop_dd_gt: 40.0,
            score_min: 1,
            score_max: 10,
        }
    }
}

impl ScoringConfig {
    /// Reject unusable score bounds. Weight sums are deliberately not
    /// validated here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.score_min >= self.score_max {
            return Err(ConfigError::InvalidScoreRange {
                min: self.score_min,
                max: self.score_max,
            });
        }
        Ok(())
    }

    /// Sum of the three weights, for callers that want to warn when it
    /// drifts from 1.0.
    pub fn weights_sum(&self) -> f64 {
        self.w_return + self.w_vol + self.w_dd
    }

    /// True if this record trips any hard-stop rule. An absent metric
    /// never trips a stop.
    pub fn is_hard_stopped(&self, metrics: &MetricsRecord) -> bool {
        metrics
            .return_pct
            .is_some_and(|r| r < self.hardstop_return_lt)
            || metrics.vol_pct.is_some_and(|v| v > self.hardstop_vol_gt)
            || metrics
                .max_drawdown_pct
                .is_some_and(|d| d.abs() > self.hardstop_dd_gt)
    }
}

/// A metrics record with its final integer score attached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub metrics: MetricsRecord,
    pub score: i32,
}

/// Score a whole universe. Output is parallel to `metrics`.
///
/// Normalization directions: return higher-is-better, volatility
/// lower-is-better, drawdown higher-is-better (closer to zero is safer).
/// The weighted raw score is absent whenever any normalized input is
/// absent; absent raw scores and hard-stopped rows both collapse to
/// `score_min`. Callers must have validated `config` first.
pub fn score_universe(metrics: &[MetricsRecord], config: &ScoringConfig) -> Vec<ScoredRecord> {
    let returns: Vec<Option<f64>> = metrics.iter().map(|m| m.return_pct).collect();
    let vols: Vec<Option<f64>> = metrics.iter().map(|m| m.vol_pct).collect();
    let drawdowns: Vec<Option<f64>> = metrics.iter().map(|m| m.max_drawdown_pct).collect();

    let r_norm = min_max_normalize(&returns, true);
    let v_norm = min_max_normalize(&vols, false);
    let d_norm = min_max_normalize(&drawdowns, true);

    metrics
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let score = if config.is_hard_stopped(m) {
                config.score_min
            } else {
                match weighted_raw(r_norm[i], v_norm[i], d_norm[i], config) {
                    Some(raw) => {
                        let span = (config.score_max - config.score_min) as f64;
                        (config.score_min as f64 + raw * span).round() as i32
                    }
                    None => config.score_min,
                }
            };
            ScoredRecord {
                metrics: *m,
                score,
            }
        })
        .collect()
}

/// Weighted combination of the normalized metrics. Absent if any input
/// is absent, mirroring missing-value propagation through the sum.
fn weighted_raw(
    r: Option<f64>,
    v: Option<f64>,
    d: Option<f64>,
    config: &ScoringConfig,
) -> Option<f64> {
    Some(config.w_return * r? + config.w_vol * v? + config.w_dd * d?)
}
