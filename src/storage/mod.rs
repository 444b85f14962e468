//! Persistence layer: the `BookStore` trait and its backends

pub mod memory;
pub mod postgres;
pub mod traits;

pub use memory::MemoryStore;
pub use postgres::PgBookRepo;
pub use traits::{BookStore, StoreError, StoreResult};
