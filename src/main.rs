//! CLI entry point for the MTA ridership recovery dashboard.
//!
//! Provides subcommands for serving the interactive dashboard and for
//! producing one-shot recovery reports from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mta_recovery::{
    aggregate::add_total_ridership,
    fetch::{BasicClient, load_source},
    output::{append_rows, print_json},
    parser::parse_table,
    recovery::compute_recovery,
    server,
    table::RidershipTable,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Published daily ridership CSV for the MTA, mirrored by Plotly.
const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/plotly/datasets/refs/heads/master/MTA_Ridership_by_DATA_NY_GOV.csv";

#[derive(Parser)]
#[command(name = "mta_recovery")]
#[command(about = "MTA post-pandemic ridership recovery dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the ridership dataset and serve the interactive dashboard
    Serve {
        /// URL or local path of the ridership CSV
        #[arg(short, long, default_value = DEFAULT_SOURCE)]
        source: String,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
    /// Compute a one-shot recovery report and log it
    Report {
        /// URL or local path of the ridership CSV
        #[arg(short, long, default_value = DEFAULT_SOURCE)]
        source: String,

        /// Metric to analyze
        #[arg(short, long, default_value = "Subways")]
        metric: String,

        /// Comma-separated transit modes; order is preserved in the output
        #[arg(long, default_value = "Subways,Buses,LIRR,Metro-North")]
        modes: String,

        /// CSV file to append comparative rows to
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/mta_recovery.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("mta_recovery.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { source, bind, port } => {
            let table = load_table(&source).await?;
            server::run(table, bind, port).await?;
        }
        Commands::Report {
            source,
            metric,
            modes,
            output,
        } => {
            let table = load_table(&source).await?;

            let modes: Vec<String> = modes
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from)
                .collect();

            let report = compute_recovery(&table, &metric, &modes);
            print_json(&report)?;

            if let Some(path) = output {
                append_rows(&path, &report.rows)?;
                info!(%path, rows = report.rows.len(), "Report rows appended");
            }
        }
    }

    Ok(())
}

/// Loads, parses, and aggregates the dataset. Any failure here is fatal:
/// the dashboard never starts on a partial dataset.
async fn load_table(source: &str) -> Result<RidershipTable> {
    let bytes = fetcher(source).await?;

    let table = parse_table(&bytes).context("parsing ridership CSV")?;
    let table = add_total_ridership(&table).context("deriving total ridership")?;

    info!(
        rows = table.len(),
        columns = table.columns().len(),
        "Ridership dataset ready"
    );

    Ok(table)
}

/// Loads source data from a local file path or fetches it over HTTP.
#[tracing::instrument(fields(source = %url))]
async fn fetcher(url: &str) -> Result<Vec<u8>> {
    load_source(&BasicClient::new(), url).await
}
