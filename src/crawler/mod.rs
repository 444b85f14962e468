//! Page acquisition: HTTP fetching and pagination discovery

pub mod fetcher;
pub mod pages;

pub use fetcher::{build_http_client, fetch_page, FetchError};
pub use pages::{discover_pages, DiscoveredPages, PageCountSource};
