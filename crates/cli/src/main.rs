//! settlefield CLI - settlement fields for structural models

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use settlefield_algorithms::builder::{
    BatchOutcome, FieldConfig, MirrorPolicy, ProcessingMode, SettlementFieldBuilder,
};
use settlefield_algorithms::diagnostics::DiagnosticReport;
use settlefield_core::io::{read_load_cases, read_table, read_target_nodes, write_teddy_file};
use settlefield_core::points::retain_below_z;
use settlefield_core::{KnownPointLayout, LoadCaseId, SkipStats, TargetNode};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "settlefield")]
#[command(author, version, about = "Interpolate settlements onto structural nodes", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpolate every load case and write one SOFiSTiK Teddy file per load case
    Run {
        /// Load case table (id, title, method, columns)
        #[arg(long)]
        load_cases: PathBuf,
        /// Known-point table, one row per cross-section
        #[arg(long)]
        known: PathBuf,
        /// Node table (NR, X [m], Y [m], optional Z [m]); repeat to concatenate exports
        #[arg(long, required = true)]
        nodes: Vec<PathBuf>,
        /// Keep only nodes with Z [m] strictly below this elevation
        #[arg(long, allow_negative_numbers = true)]
        z_max: Option<f64>,
        /// Directory for the generated .dat files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
        /// Mirror 2D known points about the centerline (y -> -y)
        #[arg(long)]
        mirror: bool,
        /// Process load cases one after another
        #[arg(long)]
        sequential: bool,
        /// Write a JSON diagnostic report
        #[arg(long)]
        report: Option<PathBuf>,
        /// Chainage column of the known-point table
        #[arg(long, default_value = "X")]
        x_column: String,
        /// Offset columns of the known-point table, separated by ';' (empty for 1D-only tables)
        #[arg(long, default_value = "Y1;Y2;Y3;Y4;Y5")]
        y_columns: String,
    },
    /// Show shape and headers of a known-point table
    Inspect {
        /// Known-point table
        #[arg(long)]
        known: PathBuf,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set up logging")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn split_columns(list: &str) -> Vec<&str> {
    list.split(';').map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Read every node export in order and concatenate them
fn read_all_nodes(paths: &[PathBuf]) -> Result<(Vec<TargetNode>, SkipStats)> {
    let mut nodes = Vec::new();
    let mut skipped = SkipStats::default();
    for path in paths {
        let (part, part_skipped) = read_target_nodes(path)
            .with_context(|| format!("Failed to read nodes from {}", path.display()))?;
        info!("{} nodes from {}", part.len(), path.display());
        nodes.extend(part);
        skipped += part_skipped;
    }
    Ok((nodes, skipped))
}

/// One entry of the JSON report
#[derive(Serialize)]
struct ReportEntry<'a> {
    id: &'a LoadCaseId,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostics: Option<&'a DiagnosticReport>,
}

/// Write a `.dat` per successful load case and log every outcome
fn write_outputs<'a>(batch: &'a BatchOutcome, output_dir: &Path) -> Result<Vec<ReportEntry<'a>>> {
    let mut entries = Vec::with_capacity(batch.outcomes.len());

    for outcome in &batch.outcomes {
        let entry = match &outcome.result {
            Ok(field) => {
                let path = write_teddy_file(output_dir, field.spec(), field.values())
                    .with_context(|| format!("Failed to write Teddy file for LC{}", outcome.id))?;
                let report = field.report();
                if report.is_complete() {
                    info!("{}", report);
                } else {
                    warn!("{}", report);
                }
                ReportEntry {
                    id: &outcome.id,
                    title: &outcome.title,
                    output: Some(path),
                    error: None,
                    diagnostics: Some(report),
                }
            }
            Err(e) => {
                error!("LC{} ({}) failed: {}", outcome.id, outcome.title, e);
                ReportEntry {
                    id: &outcome.id,
                    title: &outcome.title,
                    output: None,
                    error: Some(e.to_string()),
                    diagnostics: None,
                }
            }
        };
        entries.push(entry);
    }

    Ok(entries)
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Run {
            load_cases,
            known,
            nodes,
            z_max,
            output_dir,
            mirror,
            sequential,
            report,
            x_column,
            y_columns,
        } => {
            let pb = spinner("Reading tables...");
            let table = read_table(&known)
                .with_context(|| format!("Failed to read known points from {}", known.display()))?;
            let (mut targets, skipped) = read_all_nodes(&nodes)?;
            let entries = read_load_cases(&load_cases)
                .with_context(|| format!("Failed to read load cases from {}", load_cases.display()))?;
            pb.finish_and_clear();

            if skipped.total() > 0 {
                warn!(
                    "Skipped {} node rows ({} missing id or X, {} malformed)",
                    skipped.total(),
                    skipped.missing,
                    skipped.malformed
                );
            }
            if let Some(max_z) = z_max {
                let (kept, dropped) = retain_below_z(targets, max_z);
                targets = kept;
                info!("Dropped {} nodes at or above Z = {} m (or without Z)", dropped, max_z);
            }
            info!(
                "{} load cases, {} known-point rows, {} nodes",
                entries.len(),
                table.n_rows(),
                targets.len()
            );

            let layout = KnownPointLayout::from_headers(&table, &x_column, &split_columns(&y_columns))
                .context("Known-point table does not match the column layout")?;

            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("Failed to create {}", output_dir.display()))?;

            let config = FieldConfig {
                mirror: if mirror {
                    MirrorPolicy::AboutCenterline
                } else {
                    MirrorPolicy::None
                },
                mode: if sequential {
                    ProcessingMode::Sequential
                } else {
                    ProcessingMode::Parallel
                },
            };

            let start = Instant::now();
            let pb = spinner("Interpolating load cases...");
            let batch = SettlementFieldBuilder::new(&table, layout, &targets)
                .with_config(config)
                .run(&entries);
            pb.finish_and_clear();
            let elapsed = start.elapsed();

            let report_entries = write_outputs(&batch, &output_dir)?;

            if let Some(path) = report {
                let json = serde_json::to_string_pretty(&report_entries)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
                println!("Diagnostic report saved to: {}", path.display());
            }

            println!(
                "{} of {} load cases written to: {}",
                batch.n_succeeded(),
                batch.outcomes.len(),
                output_dir.display()
            );
            println!("  Processing time: {:.2?}", elapsed);

            if batch.all_failed() {
                anyhow::bail!("All {} load cases failed", batch.outcomes.len());
            }
        }

        Commands::Inspect { known } => {
            let table = read_table(&known)
                .with_context(|| format!("Failed to read {}", known.display()))?;
            let numeric = table
                .rows()
                .iter()
                .flatten()
                .filter(|c| c.as_f64().is_some())
                .count();

            println!("File: {}", known.display());
            println!("Rows: {}", table.n_rows());
            println!("Columns: {}", table.n_cols());
            println!("Numeric cells: {}", numeric);
            println!("\nHeaders:");
            for (i, name) in table.headers().iter().enumerate() {
                println!("  {:>3}  {}", i, name);
            }
        }
    }

    Ok(())
}
