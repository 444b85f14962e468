//! HTML extraction: tree navigation and card-to-record mapping

pub mod cards;
pub mod navigator;

pub use cards::{
    extract_books, extract_page, ExtractionNote, PageBooks, ParseError, AUTHOR_SENTINEL,
    OUT_OF_STOCK_MARKER,
};
pub use navigator::{children_with_class, extract_text, find_by_class};
