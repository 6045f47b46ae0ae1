//! End-to-end run orchestration: load → pipeline → enrich → fingerprint.

use std::path::PathBuf;

use thiserror::Error;

use ranklab_core::{run_pipeline, PipelineError, ScoringConfig};

use crate::config::{load_scoring_config, ConfigFileError};
use crate::data_loader::{compute_dataset_hash, load_prices_csv, LoadError};
use crate::sectors::{enrich_with_sectors, EnrichedRow, SectorError, SectorMap};

/// Everything a ranking run needs from the caller.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Wide price CSV (`Date` column plus one column per instrument).
    pub input: PathBuf,
    /// Optional TOML scoring config; defaults apply when `None`.
    pub config: Option<PathBuf>,
    /// Optional ticker→sector CSV for enrichment.
    pub sectors: Option<PathBuf>,
    /// Provenance URL recorded beside joined sectors.
    pub sector_source_url: String,
}

/// Errors from any layer of a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("data loading failed: {0}")]
    Load(#[from] LoadError),

    #[error("configuration failed: {0}")]
    Config(#[from] ConfigFileError),

    #[error("pipeline failed: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("sector enrichment failed: {0}")]
    Sector(#[from] SectorError),
}

/// The completed run: ranked rows in rank order plus audit context.
#[derive(Debug)]
pub struct RankingRun {
    pub rows: Vec<EnrichedRow>,
    pub config: ScoringConfig,
    pub dataset_hash: String,
    pub instrument_count: usize,
    pub row_count: usize,
}

/// Execute a full ranking run.
///
/// Fails before producing any output on structural violations (bad date
/// index, unusable score bounds, unreadable files); numeric edge cases
/// degrade per instrument inside the pipeline instead.
pub fn run_ranking(opts: &RunOptions) -> Result<RankingRun, RunError> {
    let config = load_scoring_config(opts.config.as_deref())?;
    let table = load_prices_csv(&opts.input)?;
    let dataset_hash = compute_dataset_hash(&table);

    let ranked = run_pipeline(&table, &config)?;

    let sector_map = match &opts.sectors {
        Some(path) => Some(SectorMap::from_csv(path, &opts.sector_source_url)?),
        None => None,
    };
    let rows = enrich_with_sectors(ranked.rows(), sector_map.as_ref());

    Ok(RankingRun {
        instrument_count: table.num_instruments(),
        row_count: table.len(),
        rows,
        config,
        dataset_hash,
    })
}
