//! Crawler module for document fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`DocumentFetcher`] seam
//! - Link and visible-text extraction from HTML
//! - The depth-limited, host-scoped, deduplicating traversal

mod engine;
mod fetcher;
mod parser;

pub use engine::{CrawlEngine, CrawlReport, CrawlTask, VisitedSet};
pub use fetcher::{
    build_http_client, fetch_url, DocumentFetcher, FetchResult, HttpFetcher, MAX_REDIRECTS,
};
pub use parser::{
    extract_links, extract_text, is_crawl_candidate, parse_html, ParsedPage, CONTENT_SUFFIXES,
};
