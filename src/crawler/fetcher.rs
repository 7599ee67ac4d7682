//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent
//! - Per-request timeouts
//! - Same-host redirect handling
//! - Classifying responses into success or a skippable failure

use crate::config::CrawlerConfig;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Maximum number of redirect hops followed for a single fetch
pub const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the document
    Success {
        /// HTTP status code
        status_code: u16,
        /// Document body
        body: String,
    },

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body decode failure, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Retrieves documents for the crawl engine
///
/// Implementations must never panic or return a fatal error: every failure is a
/// per-URL outcome the engine logs and skips.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetches a single document
    async fn fetch(&self, url: &Url) -> FetchResult;
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed only while they stay on the same host, up to
/// [`MAX_REDIRECTS`] hops. A redirect to another host is not followed; its 3xx
/// response surfaces as an [`FetchResult::HttpError`].
///
/// # Example
///
/// ```no_run
/// use ngram_spider::config::DEFAULT_USER_AGENT;
/// use ngram_spider::crawler::build_http_client;
///
/// let client = build_http_client(DEFAULT_USER_AGENT).unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    let redirect_policy = Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }

        let same_host = attempt
            .previous()
            .first()
            .map_or(true, |origin| origin.host_str() == attempt.url().host_str());

        if same_host {
            attempt.follow()
        } else {
            attempt.stop()
        }
    });

    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(10))
        .redirect(redirect_policy)
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed [`DocumentFetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(&config.user_agent)?,
            timeout: config.timeout,
        })
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        fetch_url(&self.client, url, self.timeout).await
    }
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | Success with the body |
/// | any other status | HttpError |
/// | timeout / connect / body error | NetworkError |
///
/// Nothing is retried.
pub async fn fetch_url(client: &Client, url: &Url, timeout: Duration) -> FetchResult {
    let response = match client.get(url.clone()).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            status_code: status.as_u16(),
            body,
        },
        Err(e) => classify_error(e),
    }
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_redirect() {
        format!("Redirect error: {}", e)
    } else {
        e.to_string()
    };

    FetchResult::NetworkError { error }
}
