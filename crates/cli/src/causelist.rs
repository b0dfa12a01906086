//! causelist - Reconstruct cause list tables from page geometry
//!
//! Reads a JSON dump of positioned tokens and fill rectangles, rebuilds the
//! cause list records and writes them to SQLite, CSV and/or JSON.

use anyhow::{Context, Result, bail};
use causelist_core::params::{AssignAnchor, ParserParams};
use causelist_core::pipeline::{CauseListParser, ParseReport};
use causelist_core::sink::{CsvExporter, RecordSink, SqliteRepository, session_date};
use causelist_core::source::JsonPageSource;
use clap::{ArgAction, Parser, ValueEnum};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Token coordinate used for column assignment.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Anchor {
    /// Token left edge
    Start,
    /// Token horizontal midpoint
    Midpoint,
}

impl From<Anchor> for AssignAnchor {
    fn from(anchor: Anchor) -> Self {
        match anchor {
            Anchor::Start => AssignAnchor::Start,
            Anchor::Midpoint => AssignAnchor::Midpoint,
        }
    }
}

/// Rebuild cause list records from a page geometry dump.
#[derive(Parser, Debug)]
#[command(name = "causelist")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON page geometry dump
    input: PathBuf,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// JSON file with parser parameters
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    // === Parser overrides ===
    /// Token coordinate used to pick a column
    #[arg(long = "assign-anchor", value_enum)]
    assign_anchor: Option<Anchor>,

    /// Slack added on both sides of a column range
    #[arg(long = "assign-tolerance")]
    assign_tolerance: Option<f64>,

    /// Maximum x distance between the table-end marker and the first column
    #[arg(long = "table-end-tolerance")]
    table_end_tolerance: Option<f64>,

    // === Output options ===
    /// SQLite database to store records in
    #[arg(long)]
    db: Option<PathBuf>,

    /// Path to CSV export, or "-" for stdout
    #[arg(long)]
    csv: Option<String>,

    /// Path to JSON export of merged records
    #[arg(long)]
    json: Option<PathBuf>,
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Build ParserParams from the config file and command line overrides.
fn build_params(args: &Args) -> Result<ParserParams> {
    let mut params = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            ParserParams::from_json(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ParserParams::default(),
    };

    if let Some(anchor) = args.assign_anchor {
        params.assign_anchor = anchor.into();
    }
    if let Some(tolerance) = args.assign_tolerance {
        if tolerance < 0.0 {
            bail!("assign tolerance must be non-negative, got {tolerance}");
        }
        params.assign_tolerance = tolerance;
    }
    if let Some(tolerance) = args.table_end_tolerance {
        if tolerance < 0.0 {
            bail!("table end tolerance must be non-negative, got {tolerance}");
        }
        params.table_end_x_tolerance = tolerance;
    }
    Ok(params)
}

fn write_outputs(args: &Args, report: &ParseReport) -> Result<()> {
    if let Some(db) = &args.db {
        let date = session_date(&report.records)?;
        let mut repo = SqliteRepository::open(db)
            .with_context(|| format!("failed to open database {}", db.display()))?;
        repo.write(date, &report.records)
            .with_context(|| format!("failed to store records for {date}"))?;
    }

    if let Some(csv) = &args.csv {
        let out: Box<dyn Write> = if csv == "-" {
            Box::new(BufWriter::new(io::stdout()))
        } else {
            let file = File::create(csv).with_context(|| format!("failed to create {csv}"))?;
            Box::new(BufWriter::new(file))
        };
        let mut exporter = CsvExporter::new(out);
        exporter.export(&report.records)?;
        exporter.into_inner()?.flush()?;
    }

    if let Some(json) = &args.json {
        let file = File::create(json)
            .with_context(|| format!("failed to create {}", json.display()))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &report.records)?;
        out.flush()?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let params = build_params(&args)?;
    let parser = CauseListParser::new(params);

    let mut source = JsonPageSource::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    let report = parser
        .parse(&mut source)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;

    for missing in &report.missing_labels {
        warn!(
            page = missing.page,
            label = missing.column.label(),
            "header label not found"
        );
    }
    if report.dropped_tokens > 0 {
        warn!(
            dropped = report.dropped_tokens,
            "tokens fell outside every column"
        );
    }

    write_outputs(&args, &report)?;
    info!(records = report.records.len(), "done");
    Ok(())
}
