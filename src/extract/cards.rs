//! Card extraction: mapping product-card markup to `Book` records
//!
//! Each catalog page carries one product grid; each grid child wraps one
//! card with title, author, and price sub-nodes identified by class markers.
//! Malformed markup is handled by explicit, named leniency policies rather
//! than hard errors: every policy that fires is recorded as an
//! [`ExtractionNote`] so callers and tests can tell "legitimately out of
//! stock" from "failed to parse".

use crate::book::Book;
use crate::extract::navigator::{children_with_class, extract_text, find_by_class};
use scraper::{ElementRef, Html};
use thiserror::Error;

/// Class marker of the product grid containing all cards on a page
pub const PRODUCT_GRID_CLASS: &str = "tg-productgrid";

/// Class marker of one product card
pub const CARD_CLASS: &str = "tg-postbook";

const TITLE_CLASS: &str = "tg-booktitle";
const AUTHOR_CLASS: &str = "tg-bookwriter";
const PRICE_CLASS: &str = "tg-bookprice";

/// Substituted when the author markup is missing or malformed
pub const AUTHOR_SENTINEL: &str = "not specified";

/// Appended to the title when the card has no price node
pub const OUT_OF_STOCK_MARKER: &str = " (OUT OF STOCK)";

const CURRENCY_SYMBOL: char = '₽';

/// Page-level extraction errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("product grid not found in page markup")]
    ProductGridMissing,
}

/// A leniency policy that fired during extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionNote {
    /// A price node was present but its text did not parse as an integer;
    /// the price was recorded as 0
    UnparsablePrice { title: String },

    /// The author node was missing, shorter than two characters, or carried
    /// a non-breaking space as its second character; the sentinel was
    /// substituted
    AuthorDefaulted { title: String },

    /// The card had no usable title node and was skipped entirely
    UntitledCard,
}

/// The books extracted from one page, plus the leniency notes that fired
#[derive(Debug, Default)]
pub struct PageBooks {
    pub books: Vec<Book>,
    pub notes: Vec<ExtractionNote>,
}

/// Extracts all book records from a parsed catalog page
///
/// Locates the product grid, isolates each card, and maps every card to a
/// `Book`. A page without a product grid is a parse failure; everything
/// below that is covered by the per-card leniency policies.
pub fn extract_page(document: &Html) -> Result<PageBooks, ParseError> {
    let grid = find_by_class(document.root_element(), PRODUCT_GRID_CLASS)
        .ok_or(ParseError::ProductGridMissing)?;

    let cards = children_with_class(grid, CARD_CLASS);
    Ok(extract_books(&cards))
}

/// Maps a sequence of card nodes to book records
pub fn extract_books(cards: &[ElementRef]) -> PageBooks {
    let mut page = PageBooks::default();
    for card in cards {
        extract_card(*card, &mut page);
    }
    page
}

fn extract_card(card: ElementRef, page: &mut PageBooks) {
    // A card without a title cannot satisfy the non-empty-title invariant,
    // so it is skipped rather than persisted with fabricated text.
    let title_text = match find_by_class(card, TITLE_CLASS) {
        Some(node) => trim_padding(&extract_text(node)).to_string(),
        None => String::new(),
    };
    if title_text.is_empty() {
        page.notes.push(ExtractionNote::UntitledCard);
        return;
    }

    let author_text = find_by_class(card, AUTHOR_CLASS).map(extract_text);
    let (author, author_defaulted) = resolve_author(author_text.as_deref());
    if author_defaulted {
        page.notes.push(ExtractionNote::AuthorDefaulted {
            title: title_text.clone(),
        });
    }

    let mut title = title_text;
    let price = match find_by_class(card, PRICE_CLASS) {
        Some(node) => match parse_price(&extract_text(node)) {
            Some(price) => price,
            None => {
                page.notes.push(ExtractionNote::UnparsablePrice {
                    title: title.clone(),
                });
                0
            }
        },
        // No price node means the item is out of stock
        None => {
            title.push_str(OUT_OF_STOCK_MARKER);
            0
        }
    };

    page.books.push(Book::new(title, author, price));
}

/// Applies the author sanitization policy
///
/// The catalog renders "author unspecified" as a near-empty string with a
/// stray non-breaking space in second position. Any author text shorter
/// than two characters after trimming is treated the same way.
fn resolve_author(raw: Option<&str>) -> (String, bool) {
    let trimmed = match raw {
        Some(text) => trim_padding(text),
        None => "",
    };

    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(_), Some(second)) if second != '\u{a0}' => (trimmed.to_string(), false),
        _ => (AUTHOR_SENTINEL.to_string(), true),
    }
}

/// Trims tab/space/newline padding; NBSP is significant and survives
fn trim_padding(text: &str) -> &str {
    text.trim_matches(|c| matches!(c, '\t' | ' ' | '\n'))
}

fn parse_price(raw: &str) -> Option<u32> {
    raw.trim_matches(|c: char| c == CURRENCY_SYMBOL || matches!(c, '\t' | ' ' | '\n'))
        .parse()
        .ok()
}
