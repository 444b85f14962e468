//! Pipeline orchestration
//!
//! Fans one fetch/parse/extract task out per discovered page, gated by a
//! fixed concurrency limit, and funnels each page's record batch through a
//! bounded hand-off channel into a single consumer that performs the batch
//! inserts. Page and batch failures are logged and tallied in the returned
//! [`PipelineReport`]; they never abort in-flight work.
//!
//! Termination is driven by channel closure: every worker holds a sender
//! clone, the orchestrator drops its own after spawning, and the consumer's
//! receive loop ends once the last worker finishes.

use crate::crawler::{discover_pages, fetch_page};
use crate::extract::{extract_page, PageBooks};
use crate::storage::BookStore;
use crate::{Result, ScrapeError};
use reqwest::Client;
use scraper::Html;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

/// Aggregated outcome of one pipeline run
///
/// A run that completes always yields a report, however many pages failed;
/// callers decide what partial failure means to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Pages the discoverer produced
    pub pages_total: usize,

    /// Pages that contributed no records (fetch or parse failure)
    pub pages_failed: usize,

    /// Batches committed to the store
    pub batches_committed: usize,

    /// Batches rolled back by the store
    pub batches_failed: usize,

    /// Records visible in the store after the run
    pub books_inserted: usize,

    /// Extraction leniency policies that fired across all pages
    pub lenient_extractions: usize,
}

/// One page's result, handed from a worker to the consumer
struct PageResult {
    url: String,
    outcome: std::result::Result<PageBooks, ScrapeError>,
}

/// Runs the full pipeline against `base_url`
///
/// Discovers the page set, scrapes every page with at most `concurrency`
/// fetches in flight, and inserts each page's batch through `store`.
pub async fn run(
    client: &Client,
    store: Arc<dyn BookStore>,
    base_url: &str,
    concurrency: usize,
) -> Result<PipelineReport> {
    let discovered = discover_pages(client, base_url).await;
    let pages_total = discovered.urls.len();
    tracing::info!(pages = pages_total, "discovered catalog pages");

    // Capacity 1: a hand-off, not a buffer. Producers park until the
    // consumer takes their batch, which bounds memory to roughly one page
    // of records per in-flight worker.
    let (tx, rx) = mpsc::channel::<PageResult>(1);

    let consumer = tokio::spawn(consume(rx, store, pages_total));

    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut workers = JoinSet::new();
    for url in discovered.urls {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        let tx = tx.clone();

        workers.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                // The semaphore is never closed
                Err(_) => return,
            };

            let outcome = scrape_page(&client, &url).await;
            // Send only fails if the consumer is gone, in which case the
            // run is already lost; the join below surfaces that.
            let _ = tx.send(PageResult { url, outcome }).await;
        });
    }
    drop(tx);

    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined {
            tracing::error!(error = %e, "page worker aborted");
        }
    }

    consumer.await.map_err(|e| ScrapeError::Task(e.to_string()))
}

/// Fetches, parses, and extracts one page
async fn scrape_page(
    client: &Client,
    url: &str,
) -> std::result::Result<PageBooks, ScrapeError> {
    let body = fetch_page(client, url).await?;
    let document = Html::parse_document(&body);
    let page = extract_page(&document)?;
    Ok(page)
}

/// Drains the hand-off channel and serializes the batch inserts
async fn consume(
    mut rx: mpsc::Receiver<PageResult>,
    store: Arc<dyn BookStore>,
    pages_total: usize,
) -> PipelineReport {
    let mut report = PipelineReport {
        pages_total,
        ..Default::default()
    };

    while let Some(PageResult { url, outcome }) = rx.recv().await {
        match outcome {
            Ok(page) => {
                report.lenient_extractions += page.notes.len();
                for note in &page.notes {
                    tracing::warn!(url = %url, note = ?note, "extraction leniency applied");
                }

                if page.books.is_empty() {
                    tracing::debug!(url = %url, "page produced no records");
                    continue;
                }

                match store.insert_batch(&page.books).await {
                    Ok(()) => {
                        report.batches_committed += 1;
                        report.books_inserted += page.books.len();
                        tracing::info!(url = %url, books = page.books.len(), "batch committed");
                    }
                    Err(e) => {
                        report.batches_failed += 1;
                        tracing::error!(url = %url, error = %e, "batch insert failed, rolled back");
                    }
                }
            }
            Err(e) => {
                report.pages_failed += 1;
                tracing::error!(url = %url, error = %e, "page contributed no records");
            }
        }
    }

    report
}
