use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use fairday::config::LoggingConfig;
use fairday::{
    FairdayConfig, FairdayError, HttpForecastSource, OutputTarget, Pipeline, PipelineOptions,
    write_results,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Find the city with the most favourable weather forecast
#[derive(Parser, Debug)]
#[command(name = "fairday", version, about)]
struct Cli {
    /// Names of the cities to analyse (case-insensitive)
    cities: Vec<String>,

    /// The output file or stream (specify '-' for the stdout)
    #[arg(short, long = "out", value_name = "PATH", default_value = "-")]
    out: OutputTarget,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(e) = err.downcast_ref::<FairdayError>() {
                eprintln!("{}", e.user_message());
            }
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.cities.is_empty() {
        println!("No cities were given. Exit.");
        return Ok(());
    }

    let config = FairdayConfig::load_from_path(cli.config.clone())?;
    init_tracing(&config.logging, cli.verbose)?;
    debug!(?config, "Loaded configuration");

    // fail before any network work if the destination is unusable
    let writer = cli
        .out
        .open()
        .with_context(|| format!("Cannot open the output destination {:?}", cli.out))?;

    let source = HttpForecastSource::new(&config.source)?;
    let pipeline = Pipeline::new(Arc::new(source), PipelineOptions::from_config(&config));
    info!(options = ?pipeline.options(), "Starting analysis");

    let report = pipeline.run(&cli.cities).await;

    write_results(&report.results, writer).context("Failed to write the results")?;
    println!("{}", report.selection());
    Ok(())
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("warn,fairday=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("warn,fairday={}", logging.level)))
    };

    // stdout may carry the JSON artifact, so logs go to stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let initialised = if logging.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    initialised.map_err(|e| anyhow!("Failed to initialise logging: {e}"))
}
