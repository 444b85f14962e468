//! Bookgrab: a concurrent catalog-to-Postgres book scraper
//!
//! This crate crawls a paginated catalog website, extracts structured book
//! records (title, author, price, stock status) from each page's markup, and
//! persists each page's batch of records atomically to a relational store.

pub mod book;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod pipeline;
pub mod storage;

use thiserror::Error;

/// Main error type for Bookgrab operations
///
/// Only `Config` is fatal; fetch/parse errors are scoped to one page and
/// store errors to one batch. The pipeline logs and tallies those instead
/// of propagating them.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] crawler::FetchError),

    #[error(transparent)]
    Parse(#[from] extract::ParseError),

    #[error(transparent)]
    Store(#[from] storage::StoreError),

    #[error("pipeline task failed: {0}")]
    Task(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid target URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("invalid value '{value}' for {var}: {message}")]
    InvalidValue {
        var: &'static str,
        value: String,
        message: String,
    },
}

/// Result type alias for Bookgrab operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

// Re-export commonly used types
pub use book::Book;
pub use config::Config;
pub use pipeline::PipelineReport;
pub use storage::BookStore;
