//! Configuration module for Ngram-Spider
//!
//! Settings come from an optional TOML file layered under command-line flags.
//! Both layers are merged into a [`RawConfig`] and validated once into an
//! immutable [`Config`] that the rest of the crate borrows.
//!
//! # Example
//!
//! ```no_run
//! use ngram_spider::config::{build_config, RawConfig};
//! use std::path::Path;
//!
//! let (config, _hash) = build_config(Some(Path::new("spider.toml")), RawConfig::default()).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, NgramConfig, NgramRange, OutputConfig, RawConfig, RawCrawlerConfig,
    RawNgramConfig, RawOutputConfig, Source, DEFAULT_PIPELINE_CAPACITY, DEFAULT_USER_AGENT,
    MAX_CRAWL_DEPTH, MAX_DELAY_MS, MAX_NGRAM_LEN, MAX_PIPELINE_CAPACITY, MIN_CRAWL_DEPTH,
};

// Re-export parser functions
pub use parser::{build_config, compute_config_hash, load_config, load_config_with_hash};
pub use validation::{parse_ngram_range, validate};
