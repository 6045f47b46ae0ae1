//! Stable multi-key ranking of the joined per-instrument table.
//!
//! Sort key, in order: score descending, return descending, volatility
//! ascending, drawdown descending. Absent values order after present
//! ones within each key. The sort is stable, so rows tied on all four
//! keys keep the price table's column order — downstream reporting
//! depends on that tie order being reproducible.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::flags::QualityFlags;
use crate::score::ScoredRecord;

/// One row of the final output: metrics, score, flags, and dense rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedRow {
    pub instrument: String,
    pub return_pct: Option<f64>,
    pub vol_pct: Option<f64>,
    pub max_drawdown_pct: Option<f64>,
    pub score: i32,
    pub has_na_prices: bool,
    pub has_na_metrics: bool,
    pub drawdown_positive: bool,
    pub rank: u32,
}

impl RankedRow {
    fn from_parts(instrument: String, scored: &ScoredRecord, flags: &QualityFlags) -> Self {
        Self {
            instrument,
            return_pct: scored.metrics.return_pct,
            vol_pct: scored.metrics.vol_pct,
            max_drawdown_pct: scored.metrics.max_drawdown_pct,
            score: scored.score,
            has_na_prices: flags.has_na_prices,
            has_na_metrics: flags.has_na_metrics,
            drawdown_positive: flags.drawdown_positive,
            rank: 0,
        }
    }
}

/// The final ranked table, rows in rank order (rank 1 first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedTable {
    rows: Vec<RankedRow>,
}

impl RankedTable {
    pub fn rows(&self) -> &[RankedRow] {
        &self.rows
    }

    /// Look up a row by instrument identifier.
    pub fn get(&self, instrument: &str) -> Option<&RankedRow> {
        self.rows.iter().find(|r| r.instrument == instrument)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Join per-instrument results, stable-sort, and assign ranks 1..N.
///
/// `instruments`, `scored`, and `flags` are parallel slices in the price
/// table's column order.
pub fn rank_universe(
    instruments: &[String],
    scored: &[ScoredRecord],
    flags: &[QualityFlags],
) -> RankedTable {
    let mut rows: Vec<RankedRow> = instruments
        .iter()
        .zip(scored.iter().zip(flags.iter()))
        .map(|(instrument, (s, f))| RankedRow::from_parts(instrument.clone(), s, f))
        .collect();

    // slice::sort_by is stable; ties fall back to input order.
    rows.sort_by(compare_rows);

    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = (i + 1) as u32;
    }

    RankedTable { rows }
}

fn compare_rows(a: &RankedRow, b: &RankedRow) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| cmp_desc(a.return_pct, b.return_pct))
        .then_with(|| cmp_asc(a.vol_pct, b.vol_pct))
        .then_with(|| cmp_desc(a.max_drawdown_pct, b.max_drawdown_pct))
}

/// Present values descending, absent last.
fn cmp_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (sort_key(a), sort_key(b)) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Present values ascending, absent last.
fn cmp_asc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (sort_key(a), sort_key(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sort_key(v: Option<f64>) -> Option<f64> {
    v.filter(|x| !x.is_nan())
}
