//! HTTP fetcher
//!
//! One GET per page, no retries. Any response status at or above 300 is a
//! failure surfaced to the caller; redirects below that threshold are
//! handled by the transport's default policy before we ever see them.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("bookgrab/", env!("CARGO_PKG_VERSION"));

/// Errors surfaced by a page fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("fetch of {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// DNS, connection, timeout, or body-read failure
    #[error("fetch of {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Builds the HTTP client shared by all page fetches
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page and returns its decoded body
///
/// # Errors
///
/// * `FetchError::Status` for any response status >= 300
/// * `FetchError::Transport` for network-level failures
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if status.as_u16() >= 300 {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
}
