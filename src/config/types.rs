use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Shallowest allowed crawl (the seed only)
pub const MIN_CRAWL_DEPTH: u32 = 1;

/// Deepest allowed crawl
pub const MAX_CRAWL_DEPTH: u32 = 100;

/// Upper bound for the delay between link requests (milliseconds)
pub const MAX_DELAY_MS: u64 = 60_000;

/// Longest n-gram that may be requested
pub const MAX_NGRAM_LEN: usize = 20;

/// Default capacity of the text pipeline (documents in flight)
pub const DEFAULT_PIPELINE_CAPACITY: usize = 1024;

/// Largest text pipeline capacity accepted
pub const MAX_PIPELINE_CAPACITY: usize = 1 << 20;

/// Client identification sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Validated runtime configuration, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub source: Source,
    pub crawler: CrawlerConfig,
    pub ngram: NgramConfig,
    pub output: OutputConfig,
}

/// Where the text comes from; crawling and file reading are mutually exclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Crawl the site rooted at this seed URL
    Url(Url),
    /// Read a single local document
    File(PathBuf),
}

/// Crawler behavior configuration
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Number of fetch generations, counting the seed itself
    pub max_depth: u32,

    /// Pause before following each extracted link
    pub delay: Duration,

    /// Timeout applied to each individual fetch
    pub timeout: Duration,

    /// User-Agent header value
    pub user_agent: String,

    /// Capacity of the bounded text pipeline
    pub pipeline_capacity: usize,
}

/// N-gram generation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NgramConfig {
    pub range: NgramRange,
}

/// Inclusive range of n-gram lengths, `1 <= min <= max <= 20`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NgramRange {
    pub min: usize,
    pub max: usize,
}

impl NgramRange {
    /// A range producing n-grams of exactly one length
    pub fn single(n: usize) -> Self {
        Self { min: n, max: n }
    }
}

impl std::fmt::Display for NgramRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Path of the wordlist file
    pub path: PathBuf,

    /// Rank lines by descending frequency
    pub sort: bool,
}

/// Unvalidated settings as they appear in a TOML file or on the command line
///
/// Every field is optional so that a config file and CLI flags can be layered
/// with [`RawConfig::merge`] before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    /// Seed URL to crawl
    pub url: Option<String>,

    /// Local file to read instead of crawling
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub crawler: RawCrawlerConfig,

    #[serde(default)]
    pub ngram: RawNgramConfig,

    #[serde(default)]
    pub output: RawOutputConfig,
}

/// `[crawler]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCrawlerConfig {
    #[serde(rename = "max-depth")]
    pub max_depth: Option<u32>,

    #[serde(rename = "delay-ms")]
    pub delay_ms: Option<u64>,

    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,

    #[serde(rename = "pipeline-capacity")]
    pub pipeline_capacity: Option<usize>,
}

/// `[ngram]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNgramConfig {
    /// Length, `"N"` or `"N-M"`
    pub length: Option<String>,
}

/// `[output]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOutputConfig {
    pub path: Option<PathBuf>,
    pub sort: Option<bool>,
}

impl RawConfig {
    /// Layers `overrides` on top of `self`; any value set in `overrides` wins
    pub fn merge(self, overrides: RawConfig) -> RawConfig {
        RawConfig {
            url: overrides.url.or(self.url),
            file: overrides.file.or(self.file),
            crawler: RawCrawlerConfig {
                max_depth: overrides.crawler.max_depth.or(self.crawler.max_depth),
                delay_ms: overrides.crawler.delay_ms.or(self.crawler.delay_ms),
                timeout_secs: overrides.crawler.timeout_secs.or(self.crawler.timeout_secs),
                user_agent: overrides.crawler.user_agent.or(self.crawler.user_agent),
                pipeline_capacity: overrides
                    .crawler
                    .pipeline_capacity
                    .or(self.crawler.pipeline_capacity),
            },
            ngram: RawNgramConfig {
                length: overrides.ngram.length.or(self.ngram.length),
            },
            output: RawOutputConfig {
                path: overrides.output.path.or(self.output.path),
                sort: overrides.output.sort.or(self.output.sort),
            },
        }
    }
}
