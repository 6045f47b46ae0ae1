//! Sector lookup — optional local enrichment joined onto the ranked table.
//!
//! The sector file is a small CSV mapping ticker → sector. Column
//! detection is forgiving: `ticker`/`symbol` (any case) or the first
//! column for the identifier; a `sector` column is required. Enrichment
//! is a left join: row order and existing columns are never touched, and
//! unknown tickers simply get no sector.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use ranklab_core::RankedRow;

/// Default provenance URL recorded beside each joined sector.
pub const DEFAULT_SOURCE_URL: &str = "https://www.bolsasymercados.es/";

#[derive(Debug, Error)]
pub enum SectorError {
    #[error("failed to open sector file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read sector file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("sector file {path} has no sector column")]
    MissingSectorColumn { path: String },
}

/// Ticker → sector map with source provenance.
#[derive(Debug, Clone)]
pub struct SectorMap {
    sectors: HashMap<String, String>,
    source_url: String,
}

impl SectorMap {
    /// Load the map from a CSV file.
    pub fn from_csv(path: &Path, source_url: &str) -> Result<Self, SectorError> {
        let display = path.display().to_string();
        let mut reader = csv::Reader::from_path(path).map_err(|source| SectorError::Open {
            path: display.clone(),
            source,
        })?;

        let headers = reader
            .headers()
            .map_err(|source| SectorError::Read {
                path: display.clone(),
                source,
            })?
            .clone();

        let ticker_idx = headers
            .iter()
            .position(|h| {
                let h = h.to_lowercase();
                h == "ticker" || h == "symbol"
            })
            .unwrap_or(0);

        let sector_idx = headers
            .iter()
            .position(|h| h.to_lowercase().starts_with("sector"))
            .ok_or_else(|| SectorError::MissingSectorColumn {
                path: display.clone(),
            })?;

        let mut sectors = HashMap::new();
        for record in reader.records() {
            let record = record.map_err(|source| SectorError::Read {
                path: display.clone(),
                source,
            })?;
            let ticker = record.get(ticker_idx).unwrap_or("").trim();
            let sector = record.get(sector_idx).unwrap_or("").trim();
            if !ticker.is_empty() && !sector.is_empty() {
                sectors.insert(ticker.to_string(), sector.to_string());
            }
        }

        Ok(Self {
            sectors,
            source_url: source_url.to_string(),
        })
    }

    pub fn get(&self, ticker: &str) -> Option<&str> {
        self.sectors.get(ticker).map(String::as_str)
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}

/// A ranked row plus its (optional) sector columns.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedRow {
    #[serde(flatten)]
    pub row: RankedRow,
    pub sector: Option<String>,
    pub sector_source_url: Option<String>,
}

/// Left-join sectors onto ranked rows. With no map, every sector column
/// is empty; either way the rows come back in their original order.
pub fn enrich_with_sectors(rows: &[RankedRow], sectors: Option<&SectorMap>) -> Vec<EnrichedRow> {
    rows.iter()
        .map(|row| {
            let sector = sectors
                .and_then(|map| map.get(&row.instrument))
                .map(str::to_string);
            let sector_source_url = match (&sector, sectors) {
                (Some(_), Some(map)) => Some(map.source_url().to_string()),
                _ => None,
            };
            EnrichedRow {
                row: row.clone(),
                sector,
                sector_source_url,
            }
        })
        .collect()
}
