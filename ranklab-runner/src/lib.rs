//! RankLab Runner — run orchestration around the core pipeline.
//!
//! This crate builds on `ranklab-core` to provide:
//! - Wide price-CSV loading with strict missing-value handling
//! - TOML scoring-config loading with reference defaults
//! - Deterministic BLAKE3 dataset fingerprinting
//! - Optional ticker→sector enrichment (left join, order preserving)
//! - CSV/JSON export and markdown report generation
//! - The end-to-end `run_ranking` entry point

pub mod config;
pub mod data_loader;
pub mod export;
pub mod report;
pub mod runner;
pub mod sectors;

pub use config::{load_scoring_config, ConfigFileError};
pub use data_loader::{
    compute_dataset_hash, generate_synthetic_prices, load_prices_csv, LoadError,
};
pub use export::{write_prices_csv, write_ranked_csv, write_ranked_json};
pub use report::MarkdownReportGenerator;
pub use runner::{run_ranking, RankingRun, RunError, RunOptions};
pub use sectors::{enrich_with_sectors, EnrichedRow, SectorError, SectorMap, DEFAULT_SOURCE_URL};
