//! Pagination discovery
//!
//! Fetches the first catalog page, reads the page count off its pagination
//! control, and synthesizes the full list of page URLs. A missing or
//! unreadable control is not a failure: the site is treated as single-page,
//! an explicit default policy surfaced through [`PageCountSource`].

use crate::crawler::fetcher::fetch_page;
use crate::extract::navigator::{extract_text, find_by_class};
use reqwest::Client;
use scraper::{ElementRef, Html};

/// Class marker of the pagination control
pub const PAGINATION_CLASS: &str = "tg-pagination";

const ACTIVE_CLASS: &str = "active";
const PAGE_PARAM: &str = "pid";

/// How the page count was determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCountSource {
    /// Read off the pagination control
    Pagination(u32),

    /// No control, no usable page number, or the base page failed to fetch
    DefaultSinglePage,
}

/// The full set of page URLs for one catalog
///
/// The base URL always comes first; the order of the derived URLs is not
/// part of the contract.
#[derive(Debug)]
pub struct DiscoveredPages {
    pub urls: Vec<String>,
    pub source: PageCountSource,
}

/// Discovers all page URLs reachable from `base_url`
pub async fn discover_pages(client: &Client, base_url: &str) -> DiscoveredPages {
    let (count, source) = match page_count(client, base_url).await {
        Some(n) => (n, PageCountSource::Pagination(n)),
        None => {
            tracing::warn!(url = base_url, "no usable page count, assuming a single page");
            (1, PageCountSource::DefaultSinglePage)
        }
    };

    let mut urls = Vec::with_capacity(count as usize);
    urls.push(base_url.to_string());
    for index in 2..=count {
        urls.push(page_url(base_url, index));
    }

    DiscoveredPages { urls, source }
}

/// Reads the page count from the base page's pagination control
///
/// The count is the maximum integer found on the control's active entry and
/// the entries following it. Fetch failures are logged here and reported as
/// absence; the pipeline will surface the page-one fetch failure on its own.
async fn page_count(client: &Client, base_url: &str) -> Option<u32> {
    let body = match fetch_page(client, base_url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "base page fetch failed during discovery");
            return None;
        }
    };

    let document = Html::parse_document(&body);
    let pagination = find_by_class(document.root_element(), PAGINATION_CLASS)?;
    let active = find_by_class(pagination, ACTIVE_CLASS)?;
    max_page_number(active)
}

/// Maximum integer on the active entry and its following siblings
fn max_page_number(active: ElementRef) -> Option<u32> {
    std::iter::once(*active)
        .chain(active.next_siblings())
        .filter_map(ElementRef::wrap)
        .filter_map(|entry| {
            extract_text(entry)
                .trim_matches(|c| matches!(c, '\t' | ' ' | '\n'))
                .parse::<u32>()
                .ok()
        })
        .max()
}

/// Derives the URL of page `index` from the base URL
fn page_url(base_url: &str, index: u32) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}{PAGE_PARAM}={index}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::fetcher::build_http_client;
    use std::collections::HashSet;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn paginated_body(entries: &str) -> String {
        format!(
            r#"<html><body>
                <div class="tg-productgrid"></div>
                <ul class="tg-pagination">{}</ul>
            </body></html>"#,
            entries
        )
    }

    async fn serve(body: String) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/catalog"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn test_page_url_appends_query_parameter() {
        assert_eq!(
            page_url("http://example.com/catalog?cid=1", 3),
            "http://example.com/catalog?cid=1&pid=3"
        );
        assert_eq!(
            page_url("http://example.com/catalog", 2),
            "http://example.com/catalog?pid=2"
        );
    }

    #[tokio::test]
    async fn test_multi_page_site_yields_all_pages() {
        let body = paginated_body(
            r#"<li class="active">1</li><li>2</li><li>3</li><li>4</li>"#,
        );
        let server = serve(body).await;
        let base = format!("{}/catalog", server.uri());

        let client = build_http_client().unwrap();
        let discovered = discover_pages(&client, &base).await;

        assert_eq!(discovered.source, PageCountSource::Pagination(4));
        assert_eq!(discovered.urls.len(), 4);
        assert_eq!(discovered.urls[0], base);

        let derived: HashSet<_> = discovered.urls[1..].iter().cloned().collect();
        let expected: HashSet<_> = (2..=4).map(|i| format!("{base}?pid={i}")).collect();
        assert_eq!(derived, expected);
    }

    #[tokio::test]
    async fn test_entries_before_active_are_ignored() {
        let body = paginated_body(
            r#"<li>9</li><li class="active">2</li><li>3</li>"#,
        );
        let server = serve(body).await;
        let base = format!("{}/catalog", server.uri());

        let client = build_http_client().unwrap();
        let discovered = discover_pages(&client, &base).await;

        assert_eq!(discovered.source, PageCountSource::Pagination(3));
        assert_eq!(discovered.urls.len(), 3);
    }

    #[tokio::test]
    async fn test_no_pagination_control_defaults_to_single_page() {
        let body = r#"<html><body><div class="tg-productgrid"></div></body></html>"#;
        let server = serve(body.to_string()).await;
        let base = format!("{}/catalog", server.uri());

        let client = build_http_client().unwrap();
        let discovered = discover_pages(&client, &base).await;

        assert_eq!(discovered.source, PageCountSource::DefaultSinglePage);
        assert_eq!(discovered.urls, vec![base]);
    }

    #[tokio::test]
    async fn test_no_numeric_entries_defaults_to_single_page() {
        let body = paginated_body(r#"<li class="active">current</li><li>next</li>"#);
        let server = serve(body).await;
        let base = format!("{}/catalog", server.uri());

        let client = build_http_client().unwrap();
        let discovered = discover_pages(&client, &base).await;

        assert_eq!(discovered.source, PageCountSource::DefaultSinglePage);
        assert_eq!(discovered.urls, vec![base]);
    }

    #[tokio::test]
    async fn test_failed_base_fetch_defaults_to_single_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let base = format!("{}/catalog", server.uri());

        let client = build_http_client().unwrap();
        let discovered = discover_pages(&client, &base).await;

        assert_eq!(discovered.source, PageCountSource::DefaultSinglePage);
        assert_eq!(discovered.urls, vec![base]);
    }
}
