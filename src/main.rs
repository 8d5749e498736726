//! CLI entry point for the radio parity report.
//!
//! Loads the personalities registry and the station grids, then prints the
//! gender-representation report to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use radio_parity::analyzers::parity::DEFAULT_ALPHA;
use radio_parity::config::{
    Config, DEFAULT_DATASET_DIR, DEFAULT_NETWORK, DEFAULT_PERSONALITIES, StationSource,
    default_stations,
};
use radio_parity::output::{print_pretty, write_report};
use radio_parity::pipeline;
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "radio_parity")]
#[command(about = "Gender representation on radio programming grids", long_about = None)]
struct Cli {
    /// Directory holding the CSV tables
    #[arg(short = 'd', long, default_value = DEFAULT_DATASET_DIR)]
    dataset_dir: PathBuf,

    /// Personalities registry, relative to the dataset directory
    #[arg(short, long, default_value = DEFAULT_PERSONALITIES)]
    personalities: PathBuf,

    /// Station grid as NAME=FILE; repeat for each station
    #[arg(short, long = "station", value_name = "NAME=FILE")]
    stations: Vec<StationSource>,

    /// Label used in the parity verdict
    #[arg(long, default_value = DEFAULT_NETWORK)]
    network: String,

    /// Significance level of the parity test
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    alpha: f64,

    /// Also run the parity test for each station
    #[arg(long, default_value_t = false)]
    per_station: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let stations = if cli.stations.is_empty() {
            default_stations()
        } else {
            cli.stations
        };

        Config {
            dataset_dir: cli.dataset_dir,
            personalities: cli.personalities,
            stations,
            network: cli.network,
            alpha: cli.alpha,
            per_station: cli.per_station,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/radio_parity.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("radio_parity.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let config = Config::from(Cli::parse());
    info!(
        dataset_dir = %config.dataset_dir.display(),
        stations = config.stations.len(),
        alpha = config.alpha,
        "Starting analysis"
    );

    let report = pipeline::run(&config).context("analysis failed")?;
    print_pretty(&report);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&report, &mut out).context("failed to write report")?;
    out.flush()?;

    info!(generated_at = %report.generated_at, "Report written");
    Ok(())
}
