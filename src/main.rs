//! CLI entry point for the marks summary reporter.
//!
//! Provides a triggered mode that processes an upload notification against
//! S3 and a standalone local mode for manual testing against a file on disk.

use anyhow::Result;
use clap::{Parser, Subcommand};
use marks_reporter::{
    config::Settings,
    error::ReportError,
    event::parse_notification,
    generator::{DEFAULT_TOP_N, ReportGenerator, local_summary},
    store::S3ObjectStore,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "marks_reporter")]
#[command(about = "Generates summary reports from student marks tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process an upload notification end to end against S3
    Handle {
        /// Path to the notification JSON naming the uploaded object
        #[arg(value_name = "EVENT_FILE")]
        event: String,

        /// Number of top students to list in the report
        #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
    },
    /// Summarize a local marks table and print the result
    Local {
        /// Path to the CSV file to read
        #[arg(short, long, default_value = "marks.csv")]
        input: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/marks_reporter.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("marks_reporter.log"));

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
        Commands::Handle { event, top } => {
            if let Err(e) = handle_upload(&event, top).await {
                error!(error = %e, "Report generation failed");
                return Err(e);
            }
        }
        Commands::Local { input } => run_local(&input),
    }

    Ok(())
}

/// Triggered mode: one notification in, one report stored.
async fn handle_upload(event_path: &str, top_n: usize) -> Result<()> {
    // Destination must be configured before the source object is touched.
    let settings = Settings::from_env()?;

    let notification = std::fs::read(event_path)?;
    let source = parse_notification(&notification)?;
    info!(bucket = %source.bucket, key = %source.key, "Processing uploaded marks table");

    let config = aws_config::load_from_env().await;
    let store = S3ObjectStore::new(&config);

    let generator = ReportGenerator::new(store, settings);
    let report_key = generator.handle_upload(&source, top_n).await?;

    info!(report_key = %report_key, "Report generation complete");
    Ok(())
}

/// Standalone mode: prints the abbreviated summary, with the two
/// user-visible failure messages.
fn run_local(input: &str) {
    match local_summary(input) {
        Ok(text) => println!("{text}"),
        Err(ReportError::SourceNotFound(_)) => {
            eprintln!("ERROR: '{input}' not found. Make sure it's in the same folder.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("An error occurred: {e}");
            std::process::exit(1);
        }
    }
}
