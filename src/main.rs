use anyhow::{Context, Result};
use clap::Parser;
use payer_loader::{pipeline, ConsoleSink, DestinationMap, ParquetSink, Payer, Sink};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Multi-source payer loader
#[derive(Parser, Debug)]
#[command(name = "payer-loader", about = "Multi-Source Payer Loader Utility")]
struct Args {
    /// Path to the CSV file (not needed for `--payer manual`)
    #[arg(long)]
    source: Option<PathBuf>,

    /// Name of the payer
    #[arg(long, value_enum)]
    payer: Payer,

    /// YAML file mapping each payer to its destination table
    #[arg(long, env = "PAYER_LOADER_DESTINATIONS")]
    destinations: Option<PathBuf>,

    /// Write the table as Parquet under this directory instead of printing it
    #[arg(long)]
    parquet_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    // stdout carries the load report, so logs go to stderr
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(payer = %args.payer, "startup");

    // ─── 2) destination mapping ──────────────────────────────────────
    let destinations = match &args.destinations {
        Some(path) => DestinationMap::from_yaml_file(path)
            .with_context(|| format!("loading destinations from {}", path.display()))?,
        None => DestinationMap::default(),
    };

    // ─── 3) pick the sink ────────────────────────────────────────────
    let mut sink: Box<dyn Sink> = match args.parquet_dir {
        Some(dir) => Box::new(ParquetSink::new(destinations, dir)),
        None => Box::new(ConsoleSink::stdout(destinations)),
    };

    // ─── 4) build → transform → load ─────────────────────────────────
    let outcome = pipeline::run(args.payer, args.source.as_deref(), &mut *sink)
        .with_context(|| format!("loading claims for payer `{}`", args.payer))?;

    info!(
        destination = %outcome.destination,
        rows = outcome.table.num_rows(),
        "all done"
    );
    Ok(())
}
