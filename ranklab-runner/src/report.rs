//! Markdown report generator.

use ranklab_core::MetricsRecord;

use crate::runner::RankingRun;

pub struct MarkdownReportGenerator;

impl MarkdownReportGenerator {
    /// Render a run as a markdown report. Pure string generation; the
    /// caller decides where it goes.
    pub fn generate(&self, run: &RankingRun, top: usize) -> String {
        let cfg = &run.config;
        let mut report = format!(
            "# Risk/Return Ranking Report\n\n\
             Dataset hash: `{}`\n\n\
             ## Summary\n\
             - Instruments: {}\n\
             - Price rows: {}\n\
             - Weights: return {:.2} / volatility {:.2} / drawdown {:.2}\n\
             - Hard stops: return < {:.1}%, volatility > {:.1}%, |drawdown| > {:.1}%\n\
             - Score range: {}..{}\n",
            run.dataset_hash,
            run.instrument_count,
            run.row_count,
            cfg.w_return,
            cfg.w_vol,
            cfg.w_dd,
            cfg.hardstop_return_lt,
            cfg.hardstop_vol_gt,
            cfg.hardstop_dd_gt,
            cfg.score_min,
            cfg.score_max,
        );

        report.push_str(&format!("\n## Top {top}\n\n"));
        report.push_str("| Rank | Instrument | Score | Return | Volatility | Max DD | Sector |\n");
        report.push_str("|------|------------|-------|--------|------------|--------|--------|\n");
        for entry in run.rows.iter().take(top) {
            let row = &entry.row;
            report.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                row.rank,
                row.instrument,
                row.score,
                fmt_pct(row.return_pct),
                fmt_pct(row.vol_pct),
                fmt_pct(row.max_drawdown_pct),
                entry.sector.as_deref().unwrap_or("-"),
            ));
        }

        let stopped: Vec<&str> = run
            .rows
            .iter()
            .filter(|entry| {
                cfg.is_hard_stopped(&MetricsRecord {
                    return_pct: entry.row.return_pct,
                    vol_pct: entry.row.vol_pct,
                    max_drawdown_pct: entry.row.max_drawdown_pct,
                })
            })
            .map(|entry| entry.row.instrument.as_str())
            .collect();
        if !stopped.is_empty() {
            report.push_str("\n## Hard Stops\n\n");
            report.push_str("Forced to the minimum score by a risk threshold:\n\n");
            for instrument in stopped {
                report.push_str(&format!("- {instrument}\n"));
            }
        }

        let flagged: Vec<&ranklab_core::RankedRow> = run
            .rows
            .iter()
            .map(|e| &e.row)
            .filter(|row| row.has_na_prices || row.has_na_metrics || row.drawdown_positive)
            .collect();
        if !flagged.is_empty() {
            report.push_str("\n## Quality Flags\n\n");
            report.push_str("| Instrument | Missing prices | Missing metrics | Positive drawdown |\n");
            report.push_str("|------------|----------------|-----------------|-------------------|\n");
            for row in flagged {
                report.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    row.instrument, row.has_na_prices, row.has_na_metrics, row.drawdown_positive,
                ));
            }
        }

        report.push_str(
            "\n## Notes\n\
             - Scores are deterministic: identical inputs reproduce this report exactly.\n\
             - Quality flags are informational and never alter a score.\n",
        );

        report
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:+.2}%"),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranklab_core::{RankedRow, ScoringConfig};

    use crate::sectors::EnrichedRow;

    fn entry(instrument: &str, rank: u32, ret: Option<f64>, score: i32) -> EnrichedRow {
        EnrichedRow {
            row: RankedRow {
                instrument: instrument.to_string(),
                return_pct: ret,
                vol_pct: Some(20.0),
                max_drawdown_pct: Some(-5.0),
                score,
                has_na_prices: false,
                has_na_metrics: ret.is_none(),
                drawdown_positive: false,
                rank,
            },
            sector: Some("Banks".into()),
            sector_source_url: None,
        }
    }

    fn run(rows: Vec<EnrichedRow>) -> RankingRun {
        RankingRun {
            instrument_count: rows.len(),
            row_count: 10,
            rows,
            config: ScoringConfig::default(),
            dataset_hash: "abc123".into(),
        }
    }

    #[test]
    fn report_contains_summary_and_table() {
        let report = MarkdownReportGenerator.generate(
            &run(vec![entry("SAN", 1, Some(12.0), 9), entry("ITX", 2, Some(5.0), 6)]),
            10,
        );
        assert!(report.contains("# Risk/Return Ranking Report"));
        assert!(report.contains("Dataset hash: `abc123`"));
        assert!(report.contains("| 1 | SAN | 9 | +12.00% |"));
        assert!(report.contains("| 2 | ITX | 6 |"));
    }

    #[test]
    fn top_limits_the_table() {
        let rows = (1..=5)
            .map(|i| entry(&format!("I{i}"), i, Some(1.0), 5))
            .collect();
        let report = MarkdownReportGenerator.generate(&run(rows), 2);
        assert!(report.contains("| 2 | I2 |"));
        assert!(!report.contains("| 3 | I3 |"));
    }

    #[test]
    fn hard_stopped_instruments_are_listed() {
        // Negative return trips the default hard stop.
        let report =
            MarkdownReportGenerator.generate(&run(vec![entry("BAD", 1, Some(-8.0), 1)]), 10);
        assert!(report.contains("## Hard Stops"));
        assert!(report.contains("- BAD"));
    }

    #[test]
    fn absent_metrics_render_as_na_and_flag_section_appears() {
        let report = MarkdownReportGenerator.generate(&run(vec![entry("GHOST", 1, None, 1)]), 10);
        assert!(report.contains("| 1 | GHOST | 1 | n/a |"));
        assert!(report.contains("## Quality Flags"));
        assert!(report.contains("| GHOST | false | true | false |"));
    }

    #[test]
    fn clean_run_has_no_flag_or_stop_sections() {
        let report =
            MarkdownReportGenerator.generate(&run(vec![entry("SAN", 1, Some(12.0), 9)]), 10);
        assert!(!report.contains("## Hard Stops"));
        assert!(!report.contains("## Quality Flags"));
    }
}
