//! Validated price table — the immutable input to the ranking pipeline.
//!
//! A `PriceTable` is a date-indexed matrix: one row per trading day, one
//! column per instrument. Missing or non-numeric prices are explicit
//! `None` cells (strict missing, no forward-fill, no sentinel values),
//! so they can never leak into a min/max scan or an average.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural violations the caller must fix before re-running.
///
/// These are the only hard failures in the core: everything numeric is
/// handled per instrument with absent-value propagation instead.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("date index must be strictly increasing: row {row} has {date} after {prev}")]
    NonMonotonicDates {
        row: usize,
        prev: NaiveDate,
        date: NaiveDate,
    },

    #[error("column '{instrument}' has {actual} cells, expected {expected} (one per date)")]
    ColumnLengthMismatch {
        instrument: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate instrument column '{0}'")]
    DuplicateInstrument(String),
}

/// Date-indexed price matrix, one column per instrument.
///
/// Constructed once per run and never mutated afterwards. Column order is
/// preserved from construction — the ranker uses it as the deterministic
/// tie-break order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    instruments: Vec<String>,
    columns: Vec<Vec<Option<f64>>>,
}

impl PriceTable {
    /// Build a table from a date axis and named price columns.
    ///
    /// Validates that dates are strictly increasing (no duplicates), that
    /// every column has one cell per date, and that instrument names are
    /// unique.
    pub fn new(
        dates: Vec<NaiveDate>,
        columns: Vec<(String, Vec<Option<f64>>)>,
    ) -> Result<Self, TableError> {
        for (row, pair) in dates.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(TableError::NonMonotonicDates {
                    row: row + 1,
                    prev: pair[0],
                    date: pair[1],
                });
            }
        }

        let mut instruments = Vec::with_capacity(columns.len());
        let mut cells = Vec::with_capacity(columns.len());
        for (instrument, column) in columns {
            if instruments.contains(&instrument) {
                return Err(TableError::DuplicateInstrument(instrument));
            }
            if column.len() != dates.len() {
                return Err(TableError::ColumnLengthMismatch {
                    instrument,
                    expected: dates.len(),
                    actual: column.len(),
                });
            }
            instruments.push(instrument);
            cells.push(column);
        }

        Ok(Self {
            dates,
            instruments,
            columns: cells,
        })
    }

    /// The date axis, strictly increasing.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Instrument identifiers in construction (column) order.
    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    /// All price columns, parallel to `instruments()`.
    pub fn columns(&self) -> &[Vec<Option<f64>>] {
        &self.columns
    }

    /// Price column for one instrument, if present.
    pub fn column(&self, instrument: &str) -> Option<&[Option<f64>]> {
        self.instruments
            .iter()
            .position(|i| i == instrument)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// Number of rows (dates).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of instrument columns.
    pub fn num_instruments(&self) -> usize {
        self.instruments.len()
    }
}
