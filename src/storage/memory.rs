//! In-memory book store
//!
//! Implements the same all-or-nothing batch contract as the Postgres
//! repository against a plain `Vec`. Used by the pipeline tests and handy
//! for offline runs; a failure trigger can be injected to exercise the
//! failed-batch path.

use crate::book::Book;
use crate::storage::traits::{BookStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::sync::Mutex;

/// A [`BookStore`] backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    books: Mutex<Vec<Book>>,
    reject_title: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects any batch containing a book with this title,
    /// leaving the batch entirely unpersisted
    pub fn rejecting_title(title: impl Into<String>) -> Self {
        Self {
            books: Mutex::new(Vec::new()),
            reject_title: Some(title.into()),
        }
    }

    /// Snapshot of everything committed so far
    pub fn books(&self) -> Vec<Book> {
        self.books.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn insert_batch(&self, books: &[Book]) -> StoreResult<()> {
        if let Some(rejected) = &self.reject_title {
            if books.iter().any(|book| &book.title == rejected) {
                return Err(StoreError::BatchRejected(format!(
                    "injected failure on title {rejected:?}"
                )));
            }
        }

        self.books.lock().unwrap().extend_from_slice(books);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_commits_batches_independently() {
        let store = MemoryStore::new();
        store.insert_batch(&[Book::new("A", "a", 1)]).await.unwrap();
        store.insert_batch(&[Book::new("B", "b", 2)]).await.unwrap();
        assert_eq!(store.books().len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_batch_leaves_no_records() {
        let store = MemoryStore::rejecting_title("B");
        store.insert_batch(&[Book::new("A", "a", 1)]).await.unwrap();

        let failed = store
            .insert_batch(&[Book::new("ok", "x", 1), Book::new("B", "b", 2)])
            .await;
        assert!(failed.is_err());

        // The earlier batch survives; nothing from the failed batch does
        assert_eq!(store.books(), vec![Book::new("A", "a", 1)]);
    }
}
