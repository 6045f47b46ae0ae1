//! End-to-end deterministic pipeline: prices → metrics → scores → flags → rank.
//!
//! Per-instrument metric computation has no cross-instrument dependency
//! and fans out across the universe; normalization (inside scoring) and
//! ranking need the whole population and run as reduction steps after
//! the fan-out completes. Every stage is pure; output carries no
//! aliasing back to the input.

use rayon::prelude::*;
use thiserror::Error;

use crate::flags::QualityFlags;
use crate::metrics::MetricsRecord;
use crate::rank::{rank_universe, RankedTable};
use crate::score::{score_universe, ConfigError, ScoringConfig};
use crate::table::PriceTable;

/// Failures that abort a run before any row of output is produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Run the full ranking pipeline over an immutable price table.
///
/// Numeric edge cases (too few observations, zero base price,
/// zero-variance universe, wholly missing instruments) degrade locally
/// to absent metrics or minimum scores; only a structurally invalid
/// configuration aborts the run.
pub fn run_pipeline(
    table: &PriceTable,
    config: &ScoringConfig,
) -> Result<RankedTable, PipelineError> {
    config.validate()?;

    let metrics: Vec<MetricsRecord> = table
        .columns()
        .par_iter()
        .map(|column| MetricsRecord::compute(column))
        .collect();

    let scored = score_universe(&metrics, config);

    let flags: Vec<QualityFlags> = table
        .columns()
        .iter()
        .zip(metrics.iter())
        .map(|(column, m)| QualityFlags::derive(column, m))
        .collect();

    Ok(rank_universe(table.instruments(), &scored, &flags))
}
