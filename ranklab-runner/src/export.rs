//! Ranked table and price table export (CSV/JSON).

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use ranklab_core::PriceTable;

use crate::sectors::EnrichedRow;

/// Write the ranked (optionally enriched) table as CSV.
///
/// Absent metrics serialize as empty fields. Rows are written in rank
/// order exactly as given; downstream joins rely on that order.
pub fn write_ranked_csv(path: &Path, rows: &[EnrichedRow]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create ranking CSV {}", path.display()))?;

    writeln!(
        file,
        "instrument,rank,score,return_pct,vol_pct,max_drawdown_pct,\
         has_na_prices,has_na_metrics,drawdown_positive,sector,sector_source_url"
    )?;

    for entry in rows {
        let row = &entry.row;
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{},{},{}",
            row.instrument,
            row.rank,
            row.score,
            fmt_opt(row.return_pct),
            fmt_opt(row.vol_pct),
            fmt_opt(row.max_drawdown_pct),
            row.has_na_prices,
            row.has_na_metrics,
            row.drawdown_positive,
            entry.sector.as_deref().unwrap_or(""),
            entry.sector_source_url.as_deref().unwrap_or(""),
        )?;
    }

    Ok(())
}

/// Write the ranked table as pretty JSON (absent metrics become null).
pub fn write_ranked_json(path: &Path, rows: &[EnrichedRow]) -> Result<()> {
    let json = serde_json::to_string_pretty(rows).context("Failed to serialize ranking")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write ranking JSON {}", path.display()))?;
    Ok(())
}

/// Write a price table as a wide CSV, the same shape the loader reads.
pub fn write_prices_csv(path: &Path, table: &PriceTable) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create price CSV {}", path.display()))?;

    write!(file, "Date")?;
    for instrument in table.instruments() {
        write!(file, ",{instrument}")?;
    }
    writeln!(file)?;

    for (i, date) in table.dates().iter().enumerate() {
        write!(file, "{date}")?;
        for column in table.columns() {
            match column[i] {
                Some(price) => write!(file, ",{price:.4}")?,
                None => write!(file, ",")?,
            }
        }
        writeln!(file)?;
    }

    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.4}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ranklab_core::RankedRow;

    fn enriched(instrument: &str, rank: u32, ret: Option<f64>) -> EnrichedRow {
        EnrichedRow {
            row: RankedRow {
                instrument: instrument.to_string(),
                return_pct: ret,
                vol_pct: Some(20.0),
                max_drawdown_pct: Some(-5.0),
                score: 7,
                has_na_prices: false,
                has_na_metrics: ret.is_none(),
                drawdown_positive: false,
                rank,
            },
            sector: Some("Banks".into()),
            sector_source_url: None,
        }
    }

    #[test]
    fn csv_round_trips_through_loader_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.csv");
        let rows = vec![enriched("SAN", 1, Some(12.5)), enriched("ITX", 2, None)];
        write_ranked_csv(&path, &rows).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert!(lines.next().unwrap().starts_with("instrument,rank,score"));
        assert_eq!(
            lines.next().unwrap(),
            "SAN,1,7,12.5000,20.0000,-5.0000,false,false,false,Banks,"
        );
        // Absent return serializes as an empty field, not a number.
        assert!(lines.next().unwrap().starts_with("ITX,2,7,,"));
    }

    #[test]
    fn json_serializes_absent_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.json");
        write_ranked_json(&path, &[enriched("ITX", 1, None)]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert!(parsed[0]["return_pct"].is_null());
        assert_eq!(parsed[0]["instrument"], "ITX");
    }

    #[test]
    fn price_csv_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        let dates = vec![
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
        ];
        let table = PriceTable::new(
            dates,
            vec![("SAN".into(), vec![Some(4.1), None])],
        )
        .unwrap();

        write_prices_csv(&path, &table).unwrap();
        let loaded = crate::data_loader::load_prices_csv(&path).unwrap();
        assert_eq!(loaded.instruments(), table.instruments());
        assert_eq!(loaded.column("SAN").unwrap(), &[Some(4.1), None]);
    }
}
