//! RankLab CLI — ranking runs and sample-data generation.
//!
//! Commands:
//! - `run` — execute a ranking run over a price CSV, print the top of
//!   the table, and write CSV/JSON artifacts (plus a markdown report on
//!   request)
//! - `sample` — write a deterministic synthetic price CSV for smoke
//!   testing the pipeline without real data

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ranklab_runner::{
    generate_synthetic_prices, run_ranking, write_prices_csv, write_ranked_csv, write_ranked_json,
    MarkdownReportGenerator, RankingRun, RunOptions, DEFAULT_SOURCE_URL,
};

#[derive(Parser)]
#[command(
    name = "ranklab",
    about = "RankLab CLI — deterministic risk/return ranking"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a ranking run over a wide price CSV.
    Run {
        /// Price CSV: a Date column plus one column per instrument.
        #[arg(long)]
        input: PathBuf,

        /// Optional TOML scoring config; defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Optional ticker→sector CSV for enrichment.
        #[arg(long)]
        sectors: Option<PathBuf>,

        /// Provenance URL recorded beside joined sectors.
        #[arg(long, default_value = DEFAULT_SOURCE_URL)]
        sector_source_url: String,

        /// Output directory for ranking.csv / ranking.json.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// How many rows to print to stdout.
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Also write a markdown report next to the artifacts.
        #[arg(long, default_value_t = false)]
        report: bool,
    },
    /// Write a deterministic synthetic price CSV.
    Sample {
        /// Output path for the generated CSV.
        #[arg(long, default_value = "prices_sample.csv")]
        out: PathBuf,

        /// Instrument identifiers to generate (e.g. SAN ITX BBVA).
        #[arg(required = true)]
        instruments: Vec<String>,

        /// First date (YYYY-MM-DD).
        #[arg(long, default_value = "2025-01-02")]
        start: String,

        /// Number of trading days to generate.
        #[arg(long, default_value_t = 252)]
        days: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            config,
            sectors,
            sector_source_url,
            output_dir,
            top,
            report,
        } => cmd_run(input, config, sectors, sector_source_url, output_dir, top, report),
        Commands::Sample {
            out,
            instruments,
            start,
            days,
        } => cmd_sample(out, instruments, &start, days),
    }
}

fn cmd_run(
    input: PathBuf,
    config: Option<PathBuf>,
    sectors: Option<PathBuf>,
    sector_source_url: String,
    output_dir: PathBuf,
    top: usize,
    report: bool,
) -> Result<()> {
    let run = run_ranking(&RunOptions {
        input,
        config,
        sectors,
        sector_source_url,
    })
    .context("ranking run failed")?;

    print_top(&run, top);

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output dir {}", output_dir.display()))?;
    let csv_path = output_dir.join("ranking.csv");
    let json_path = output_dir.join("ranking.json");
    write_ranked_csv(&csv_path, &run.rows)?;
    write_ranked_json(&json_path, &run.rows)?;
    println!("\nWrote {}", csv_path.display());
    println!("Wrote {}", json_path.display());

    if report {
        let report_path = output_dir.join("report.md");
        let contents = MarkdownReportGenerator.generate(&run, top);
        std::fs::write(&report_path, contents)
            .with_context(|| format!("Failed to write report {}", report_path.display()))?;
        println!("Wrote {}", report_path.display());
    }

    Ok(())
}

fn print_top(run: &RankingRun, top: usize) {
    println!(
        "Ranked {} instruments over {} price rows (dataset {})",
        run.instrument_count,
        run.row_count,
        &run.dataset_hash[..12.min(run.dataset_hash.len())]
    );
    println!(
        "{:<5} | {:<10} | {:<5} | {:>9} | {:>10} | {:>9} | {}",
        "RANK", "TICKER", "SCORE", "RETURN", "VOLATILITY", "MAX DD", "SECTOR"
    );
    println!("{:-<75}", "");
    for entry in run.rows.iter().take(top) {
        let row = &entry.row;
        println!(
            "{:<5} | {:<10} | {:<5} | {:>9} | {:>10} | {:>9} | {}",
            row.rank,
            row.instrument,
            row.score,
            fmt_pct(row.return_pct),
            fmt_pct(row.vol_pct),
            fmt_pct(row.max_drawdown_pct),
            entry.sector.as_deref().unwrap_or("-"),
        );
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:+.2}%"),
        None => "n/a".to_string(),
    }
}

fn cmd_sample(out: PathBuf, instruments: Vec<String>, start: &str, days: usize) -> Result<()> {
    let start_date = NaiveDate::parse_from_str(start, "%Y-%m-%d")
        .with_context(|| format!("invalid start date '{start}' (expected YYYY-MM-DD)"))?;

    let table = generate_synthetic_prices(&instruments, start_date, days);
    write_prices_csv(&out, &table)?;
    println!(
        "Wrote {} ({} instruments × {} days, synthetic)",
        out.display(),
        table.num_instruments(),
        table.len()
    );
    Ok(())
}
