//! Postgres book repository
//!
//! Wraps each batch in one transaction: one insert per record, row count
//! verified per insert, commit only if every insert succeeded. The `books`
//! table (`title` text, `author` text, `price` integer) is assumed to exist;
//! schema management is out of scope.

use crate::book::Book;
use crate::storage::traits::{BookStore, StoreError, StoreResult};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const INSERT_BOOK: &str = "INSERT INTO books (title, author, price) VALUES ($1, $2, $3)";

/// Postgres-backed [`BookStore`]
pub struct PgBookRepo {
    pool: PgPool,
}

impl PgBookRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool and wraps it in a repository
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl BookStore for PgBookRepo {
    async fn insert_batch(&self, books: &[Book]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        for book in books {
            let result = sqlx::query(INSERT_BOOK)
                .bind(&book.title)
                .bind(&book.author)
                .bind(book.price as i32)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() != 1 {
                // Returning here drops the transaction uncommitted, rolling
                // the whole batch back.
                return Err(StoreError::UnexpectedRowCount {
                    affected: result.rows_affected(),
                });
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
