//! Store trait and error types

use crate::book::Book;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("insert affected {affected} rows, expected exactly 1")]
    UnexpectedRowCount { affected: u64 },

    #[error("batch rejected: {0}")]
    BatchRejected(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A destination for extracted book records
///
/// The one guarantee implementations must uphold is per-batch atomicity:
/// a batch is persisted in full or not at all, and a failed batch leaves
/// previously committed batches untouched.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Inserts one page's batch of books as a unit
    async fn insert_batch(&self, books: &[Book]) -> StoreResult<()>;
}
