//! Price CSV loading, dataset fingerprinting, and synthetic data.
//!
//! Input format: wide CSV with a `Date` header column (`YYYY-MM-DD`) and
//! one column per instrument. Rows whose date fails to parse are
//! dropped; rows are sorted by date before the table is built. Price
//! cells that are empty or non-numeric become explicit missing values —
//! nothing is ever fabricated. Duplicate dates survive the sort and are
//! rejected by the table constructor.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use ranklab_core::{PriceTable, TableError};

/// Errors from the price-loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open price file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read price file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("price file {path} has no 'Date' column")]
    MissingDateColumn { path: String },

    #[error("price file {path} has no instrument columns")]
    NoInstruments { path: String },

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Load a wide price CSV into a validated `PriceTable`.
pub fn load_prices_csv(path: &Path) -> Result<PriceTable, LoadError> {
    let display = path.display().to_string();
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Open {
        path: display.clone(),
        source,
    })?;

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Read {
            path: display.clone(),
            source,
        })?
        .clone();

    let date_idx = headers
        .iter()
        .position(|h| h == "Date")
        .ok_or_else(|| LoadError::MissingDateColumn {
            path: display.clone(),
        })?;

    let instruments: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date_idx)
        .map(|(i, h)| (i, h.trim().to_string()))
        .collect();
    if instruments.is_empty() {
        return Err(LoadError::NoInstruments { path: display });
    }

    let mut rows: Vec<(NaiveDate, Vec<Option<f64>>)> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| LoadError::Read {
            path: display.clone(),
            source,
        })?;

        // Unparseable dates drop the whole row.
        let date = match record
            .get(date_idx)
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        {
            Some(date) => date,
            None => continue,
        };

        let cells = instruments
            .iter()
            .map(|(i, _)| parse_price(record.get(*i).unwrap_or("")))
            .collect();
        rows.push((date, cells));
    }

    // Stable sort: equal dates keep file order and then fail validation.
    rows.sort_by_key(|(date, _)| *date);

    let dates: Vec<NaiveDate> = rows.iter().map(|(d, _)| *d).collect();
    let columns = instruments
        .iter()
        .enumerate()
        .map(|(col, (_, name))| {
            let cells = rows.iter().map(|(_, r)| r[col]).collect();
            (name.clone(), cells)
        })
        .collect();

    Ok(PriceTable::new(dates, columns)?)
}

/// Parse one price cell. Empty, non-numeric, and NaN inputs are missing.
fn parse_price(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Deterministic BLAKE3 fingerprint of a price table, for run audit.
///
/// Covers the date axis, instrument names, and every cell in column
/// order. A missing cell hashes as a distinct marker so `None` can never
/// collide with a numeric value.
pub fn compute_dataset_hash(table: &PriceTable) -> String {
    let mut hasher = blake3::Hasher::new();

    for date in table.dates() {
        hasher.update(date.to_string().as_bytes());
    }
    for (instrument, column) in table.instruments().iter().zip(table.columns()) {
        hasher.update(instrument.as_bytes());
        for cell in column {
            match cell {
                Some(price) => {
                    hasher.update(&[1u8]);
                    hasher.update(&price.to_le_bytes());
                }
                None => {
                    hasher.update(&[0u8]);
                }
            }
        }
    }

    hasher.finalize().to_hex().to_string()
}

/// Generate a deterministic synthetic price table for smoke testing.
///
/// Each instrument is a random walk from 100.0, seeded from a BLAKE3
/// hash of its identifier, over weekdays starting at `start`. Clearly
/// fake data for the `sample` command and tests — never a silent
/// substitute for real input.
pub fn generate_synthetic_prices(
    instruments: &[String],
    start: NaiveDate,
    days: usize,
) -> PriceTable {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut dates = Vec::with_capacity(days);
    let mut current = start;
    while dates.len() < days {
        let weekday = current.weekday();
        if weekday != chrono::Weekday::Sat && weekday != chrono::Weekday::Sun {
            dates.push(current);
        }
        current += chrono::Duration::days(1);
    }

    let columns = instruments
        .iter()
        .map(|instrument| {
            let seed: [u8; 32] = *blake3::hash(instrument.as_bytes()).as_bytes();
            let mut rng = StdRng::from_seed(seed);
            let mut price = 100.0_f64;
            let cells = (0..days)
                .map(|_| {
                    let daily_return: f64 = rng.gen_range(-0.03..0.03);
                    price *= 1.0 + daily_return;
                    Some(price)
                })
                .collect();
            (instrument.clone(), cells)
        })
        .collect();

    // Weekday dates are strictly increasing, so this cannot fail.
    PriceTable::new(dates, columns).expect("synthetic dates are strictly increasing")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_wide_csv() {
        let file = write_csv(
            "Date,SAN,ITX\n\
             2025-01-02,4.10,49.80\n\
             2025-01-03,4.15,50.10\n",
        );
        let table = load_prices_csv(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.instruments(), &["SAN", "ITX"]);
        assert_eq!(table.column("SAN").unwrap(), &[Some(4.10), Some(4.15)]);
    }

    #[test]
    fn non_numeric_cells_become_missing() {
        let file = write_csv(
            "Date,SAN\n\
             2025-01-02,n/a\n\
             2025-01-03,4.15\n\
             2025-01-06,\n",
        );
        let table = load_prices_csv(file.path()).unwrap();
        assert_eq!(table.column("SAN").unwrap(), &[None, Some(4.15), None]);
    }

    #[test]
    fn unsorted_rows_are_sorted_by_date() {
        let file = write_csv(
            "Date,SAN\n\
             2025-01-03,4.15\n\
             2025-01-02,4.10\n",
        );
        let table = load_prices_csv(file.path()).unwrap();
        assert_eq!(table.column("SAN").unwrap(), &[Some(4.10), Some(4.15)]);
    }

    #[test]
    fn bad_date_rows_are_dropped() {
        let file = write_csv(
            "Date,SAN\n\
             not-a-date,9.99\n\
             2025-01-02,4.10\n",
        );
        let table = load_prices_csv(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.column("SAN").unwrap(), &[Some(4.10)]);
    }

    #[test]
    fn duplicate_dates_are_a_hard_error() {
        let file = write_csv(
            "Date,SAN\n\
             2025-01-02,4.10\n\
             2025-01-02,4.20\n",
        );
        assert!(matches!(
            load_prices_csv(file.path()).unwrap_err(),
            LoadError::Table(TableError::NonMonotonicDates { .. })
        ));
    }

    #[test]
    fn missing_date_column_is_rejected() {
        let file = write_csv("Fecha,SAN\n2025-01-02,4.10\n");
        assert!(matches!(
            load_prices_csv(file.path()).unwrap_err(),
            LoadError::MissingDateColumn { .. }
        ));
    }

    #[test]
    fn date_only_file_is_rejected() {
        let file = write_csv("Date\n2025-01-02\n");
        assert!(matches!(
            load_prices_csv(file.path()).unwrap_err(),
            LoadError::NoInstruments { .. }
        ));
    }

    // ── Dataset hash ──

    #[test]
    fn dataset_hash_is_deterministic() {
        let table = generate_synthetic_prices(
            &["SAN".into(), "ITX".into()],
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            20,
        );
        assert_eq!(compute_dataset_hash(&table), compute_dataset_hash(&table));
    }

    #[test]
    fn dataset_hash_distinguishes_missing_from_zero() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
        ];
        let with_none =
            PriceTable::new(dates.clone(), vec![("SAN".into(), vec![Some(1.0), None])]).unwrap();
        let with_zero =
            PriceTable::new(dates, vec![("SAN".into(), vec![Some(1.0), Some(0.0)])]).unwrap();
        assert_ne!(
            compute_dataset_hash(&with_none),
            compute_dataset_hash(&with_zero)
        );
    }

    // ── Synthetic data ──

    #[test]
    fn synthetic_prices_are_deterministic_per_instrument() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let a = generate_synthetic_prices(&["SAN".into()], start, 30);
        let b = generate_synthetic_prices(&["SAN".into()], start, 30);
        assert_eq!(a.column("SAN").unwrap(), b.column("SAN").unwrap());
    }

    #[test]
    fn different_instruments_get_different_walks() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let table = generate_synthetic_prices(&["SAN".into(), "ITX".into()], start, 10);
        assert_ne!(table.column("SAN").unwrap(), table.column("ITX").unwrap());
    }

    #[test]
    fn synthetic_dates_skip_weekends() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let table = generate_synthetic_prices(&["SAN".into()], start, 15);
        for date in table.dates() {
            assert_ne!(date.weekday(), chrono::Weekday::Sat);
            assert_ne!(date.weekday(), chrono::Weekday::Sun);
        }
    }
}
