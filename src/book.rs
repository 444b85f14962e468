//! The canonical book record
//!
//! One `Book` is produced per product card by the extractor and consumed
//! exactly once by the repository's batch insert. The database assigns row
//! ids on insert; since the core never reads records back, no id field
//! exists here.

/// A single extracted book record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Book title; carries the out-of-stock marker when the item was
    /// unavailable at extraction time
    pub title: String,

    /// Book author, or the sentinel value for malformed author markup
    pub author: String,

    /// Price as listed in the markup; 0 when the item is out of stock
    pub price: u32,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, price: u32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            price,
        }
    }
}
