//! Bookgrab main entry point
//!
//! Loads configuration from the environment, connects the Postgres pool,
//! runs the scraping pipeline, and prints a completion report. Missing
//! configuration is fatal; per-page and per-batch failures are logged and
//! counted but never change the exit code of a completed run.

use anyhow::Context;
use bookgrab::config::Config;
use bookgrab::crawler::build_http_client;
use bookgrab::pipeline;
use bookgrab::storage::PgBookRepo;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Bookgrab: a concurrent catalog-to-Postgres book scraper
#[derive(Parser, Debug)]
#[command(name = "bookgrab")]
#[command(about = "Scrape a paginated book catalog into Postgres", long_about = None)]
struct Cli {
    /// Path to a .env file (defaults to ./.env when present)
    #[arg(long, value_name = "FILE")]
    env_file: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
        }
        // A missing ./.env is fine; the environment may be populated already
        None => {
            let _ = dotenvy::dotenv();
        }
    }

    let config = Config::from_env().context("configuration error")?;
    tracing::info!(url = %config.target_url, concurrency = config.concurrency, "starting scrape");

    let repo = PgBookRepo::connect(&config.database.connection_url())
        .await
        .context("failed to connect to Postgres")?;

    let client = build_http_client().context("failed to build HTTP client")?;

    let start = Instant::now();
    let report = pipeline::run(
        &client,
        Arc::new(repo),
        &config.target_url,
        config.concurrency,
    )
    .await?;
    let elapsed = start.elapsed();

    tracing::info!(
        pages_total = report.pages_total,
        pages_failed = report.pages_failed,
        batches_committed = report.batches_committed,
        batches_failed = report.batches_failed,
        books_inserted = report.books_inserted,
        lenient_extractions = report.lenient_extractions,
        "scrape finished"
    );
    if report.pages_failed > 0 || report.batches_failed > 0 {
        tracing::warn!(
            pages_failed = report.pages_failed,
            batches_failed = report.batches_failed,
            "run completed with partial failures, see log for details"
        );
    }
    println!(
        "{} books from {} pages in {:.2?}",
        report.books_inserted, report.pages_total, elapsed
    );

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bookgrab=info,warn"),
            1 => EnvFilter::new("bookgrab=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
