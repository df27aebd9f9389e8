use analytics::AnalyticsEngine;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{load_config, load_config_from};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::filter::TradeFilter;

pub mod filter;
pub mod render;

/// The main entry point for the Mindset journal analytics tool.
fn main() -> Result<()> {
    // Load environment variables from .env file, if there is one
    dotenvy::dotenv().ok();

    // Logs go to stderr so JSON output on stdout stays clean.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Analyze(args) => handle_analyze(args)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Emotion and discipline analytics for a trading journal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the emotions logged against a journal export.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// JSON file with the trades (an array, or an object with a `trades` array). Use `-` for stdin.
    #[arg(long, short)]
    input: PathBuf,

    /// Only include trades on or after this date (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Only include trades on or before this date (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Only include trades for this symbol (e.g., "AAPL").
    #[arg(long)]
    symbol: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Settings file. Defaults to `config.toml` in the working directory, if present.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

/// Loads the journal, narrows it down, and prints the psychology report.
fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    if let (Some(from), Some(to)) = (args.from, args.to) {
        anyhow::ensure!(from <= to, "--from ({from}) must not be after --to ({to})");
    }

    let config = match &args.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => load_config().context("Failed to load config.toml")?,
    };
    let engine = AnalyticsEngine::new(&config.analytics)?;

    let raw = read_input(&args.input)?;
    let trades = core_types::parse_trades(&raw)
        .with_context(|| format!("Failed to parse trades from {:?}", args.input))?;
    let total = trades.len();

    let filter = TradeFilter {
        from: args.from,
        to: args.to,
        symbol: args.symbol,
    };
    let trades = filter.apply(trades);
    tracing::info!(total, selected = trades.len(), "Loaded journal trades.");

    let report = engine.analyze(&trades);

    match args.format {
        OutputFormat::Table => print!("{}", render::report_tables(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read trades from stdin")?;
        return Ok(buf);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}
