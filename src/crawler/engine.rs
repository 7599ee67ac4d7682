//! Depth-limited, host-scoped crawl traversal
//!
//! The engine walks the link graph depth-first from a single seed. Instead of
//! recursing it keeps an explicit stack of [`CrawlTask`]s, so a pathological link
//! graph can not exhaust the call stack. Visit order is the same as a recursive
//! pre-order walk: a page's text is emitted before anything reached through its
//! links, and the first link's subtree is finished before the second link is tried.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{DocumentFetcher, FetchResult};
use crate::crawler::parser::parse_html;
use crate::pipeline::{FetchSignal, TextSender, TextUnit};
use crate::url::{extract_domain, in_scope};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// A URL waiting to be crawled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    /// The URL to fetch
    pub url: Url,

    /// Fetch generations left, counting this one; links are followed only above 1
    pub remaining_depth: u32,

    /// Whether this task came from a link (and so waits out the delay and the scope check)
    from_link: bool,
}

impl CrawlTask {
    fn seed(url: Url, depth: u32) -> Self {
        Self {
            url,
            remaining_depth: depth,
            from_link: false,
        }
    }

    fn link(url: Url, depth: u32) -> Self {
        Self {
            url,
            remaining_depth: depth,
            from_link: true,
        }
    }
}

/// URLs already claimed by this crawl
///
/// A URL is inserted before it is fetched and never removed, so a failed or slow
/// fetch is never retried or counted twice.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a URL visited; returns false if it already was
    pub fn insert(&mut self, url: &Url) -> bool {
        if self.urls.contains(url.as_str()) {
            return false;
        }
        self.urls.insert(url.as_str().to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Outcome counters for one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Documents fetched and scraped
    pub fetched: u64,

    /// URLs whose fetch failed or returned a non-2xx status
    pub failed: u64,

    /// Links dropped because their host differs from the seed's
    pub out_of_scope: u64,

    /// Distinct URLs claimed (fetched or failed)
    pub visited: usize,
}

/// Crawl engine; owns the visited set for the duration of one crawl
pub struct CrawlEngine<F> {
    fetcher: F,
    max_depth: u32,
    delay: Duration,
    visited: VisitedSet,
}

impl<F: DocumentFetcher> CrawlEngine<F> {
    /// Creates an engine using the depth and delay from the configuration
    pub fn new(fetcher: F, config: &CrawlerConfig) -> Self {
        Self::with_limits(fetcher, config.max_depth, config.delay)
    }

    /// Creates an engine with explicit limits
    pub fn with_limits(fetcher: F, max_depth: u32, delay: Duration) -> Self {
        Self {
            fetcher,
            max_depth,
            delay,
            visited: VisitedSet::new(),
        }
    }

    /// Crawls from `seed`, emitting one fetch event and one [`TextUnit`] per document
    ///
    /// # Algorithm
    ///
    /// For each task popped from the stack:
    /// 1. Link tasks first sleep for the configured delay, then are dropped if their
    ///    host is not exactly the seed's host
    /// 2. Already-visited URLs are dropped; otherwise the URL is marked visited
    /// 3. The document is fetched; any failure is logged and skipped
    /// 4. A fetch event and the document text are emitted
    /// 5. If more than one generation remains, the document's links are pushed
    ///    (in reverse, so the first link is crawled first) with one generation less
    ///
    /// Per-URL failures never escape this method. The crawl ends early only if the
    /// text pipeline's consumer has gone away.
    pub async fn run(mut self, seed: Url, texts: &TextSender, signal: &FetchSignal) -> CrawlReport {
        let mut report = CrawlReport::default();
        let scope = extract_domain(&seed).unwrap_or_default().to_string();

        tracing::info!(
            "Crawling {} (scope: {}, depth: {}, delay: {:?})",
            seed,
            scope,
            self.max_depth,
            self.delay
        );

        let mut stack = vec![CrawlTask::seed(seed, self.max_depth)];

        while let Some(task) = stack.pop() {
            if task.from_link {
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }

                if !in_scope(&scope, &task.url) {
                    tracing::trace!("Skipping out-of-scope link {}", task.url);
                    report.out_of_scope += 1;
                    continue;
                }
            }

            if !self.visited.insert(&task.url) {
                continue;
            }

            let body = match self.fetcher.fetch(&task.url).await {
                FetchResult::Success { body, .. } => body,
                FetchResult::HttpError { status_code } => {
                    tracing::debug!("Skipping {}: HTTP {}", task.url, status_code);
                    report.failed += 1;
                    continue;
                }
                FetchResult::NetworkError { error } => {
                    tracing::warn!("Error fetching URL {}: {}", task.url, error);
                    report.failed += 1;
                    continue;
                }
            };

            let page = parse_html(&body, &task.url);
            report.fetched += 1;
            signal.record();

            tracing::debug!(
                "Fetched {} ({} bytes of text, {} links)",
                task.url,
                page.text.len(),
                page.links.len()
            );

            if texts.send(TextUnit::from(page.text)).await.is_err() {
                tracing::warn!("Text pipeline closed, stopping crawl");
                break;
            }

            if task.remaining_depth > 1 {
                let next_depth = task.remaining_depth - 1;
                stack.extend(
                    page.links
                        .into_iter()
                        .rev()
                        .map(|url| CrawlTask::link(url, next_depth)),
                );
            }
        }

        report.visited = self.visited.len();

        tracing::info!(
            "Crawl finished: {} fetched, {} failed, {} visited",
            report.fetched,
            report.failed,
            report.visited
        );

        report
    }
}
