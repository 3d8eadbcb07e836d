//! CLI definition and handler

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

use crate::config::{CurveParams, DEFAULT_RECALL_STEP};
use crate::input::RecordReader;
use crate::pipeline::Pipeline;
use crate::reporters::{render_summary, SummaryFormat, TableWriter};

/// prauc - precision-recall tables and PR-AUC per program
#[derive(Parser, Debug)]
#[command(name = "prauc")]
#[command(
    version,
    about = "Compute interpolated precision-recall curves and PR-AUC per program from ranked TP/FP counts",
    long_about = "Reads a ranked count file (one header line, then `program _ tp fp` rows grouped by \
program and ordered from the most to the least permissive threshold), writes every \
precision-recall point to a tab-separated table and prints one AUC line per program.",
    after_help = "\
Examples:
  prauc 120 1000 results.roc pr.tsv               Text summary on stdout
  prauc 120 1000 results.roc pr.tsv --format json  One JSON object per program
  prauc 120 1000 results.roc pr.tsv --step 0.005   Finer interpolation"
)]
pub struct Cli {
    /// Total number of true instances in the dataset
    pub ntruth: u64,

    /// Total number of candidate instances (true + false)
    pub ntotal: u64,

    /// Ranked count file to read
    pub input: PathBuf,

    /// Precision-recall table to write
    pub output: PathBuf,

    /// Recall step between interpolated points
    #[arg(long, env = "PRAUC_STEP", default_value_t = DEFAULT_RECALL_STEP)]
    pub step: f64,

    /// Summary format: text, json
    #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

pub fn run(cli: Cli) -> Result<()> {
    let params = CurveParams::with_step(cli.ntruth, cli.ntotal, cli.step)?;
    let format: SummaryFormat = cli.format.parse()?;

    let input = File::open(&cli.input)
        .with_context(|| format!("Failed to open input {}", cli.input.display()))?;
    let output = File::create(&cli.output)
        .with_context(|| format!("Failed to create output {}", cli.output.display()))?;

    info!(
        "Evaluating {} (ntruth={}, ntotal={}, step={})",
        cli.input.display(),
        params.ntruth(),
        params.ntotal(),
        params.step()
    );

    let records = RecordReader::new(BufReader::new(input));
    let mut table = TableWriter::new(BufWriter::new(output));
    let mut stdout = std::io::stdout().lock();

    Pipeline::new(params).run(records, &mut table, |summary| {
        writeln!(stdout, "{}", render_summary(summary, format)?)?;
        Ok(())
    })?;

    let rows = table.rows();
    table
        .finish()
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    info!("Wrote {} rows to {}", rows, cli.output.display());
    Ok(())
}
