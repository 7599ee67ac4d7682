//! Ngram-Spider main entry point
//!
//! This is the command-line interface for the Ngram-Spider wordlist builder.

use anyhow::Context;
use clap::Parser;
use ngram_spider::config::{
    build_config, Config, RawConfig, RawCrawlerConfig, RawNgramConfig, RawOutputConfig, Source,
};
use ngram_spider::output::print_summary;
use ngram_spider::run_session;
use ngram_spider::url::extract_domain;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ngram-Spider: build n-gram wordlists from a website or a file
///
/// Ngram-Spider crawls a single site to a fixed depth (or reads one local
/// file), splits the text into whitespace-delimited words and writes every
/// n-gram in the requested length range to a wordlist, one per line.
#[derive(Parser, Debug)]
#[command(name = "ngram-spider")]
#[command(version)]
#[command(about = "Build n-gram wordlists from a website or a file", long_about = None)]
struct Cli {
    /// URL to scrape
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// File to read instead of crawling
    #[arg(long)]
    file: Option<PathBuf>,

    /// N-gram length: a single value or a range like 1-3 (each 1-20)
    #[arg(long, value_name = "LEN")]
    ngram: Option<String>,

    /// Output file (default: <host>_spider.txt or <file stem>_spider.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Depth of links to crawl (1-100)
    #[arg(long, value_name = "DEPTH")]
    crawl: Option<u32>,

    /// Delay in ms between requests (0-60000)
    #[arg(long, value_name = "MS")]
    delay: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Sort output by frequency
    #[arg(long)]
    sort: bool,

    /// Path to TOML configuration file; flags override its values
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output, including progress bars
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate settings and show what would be done without doing it
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Flag values as the top configuration layer
    fn overrides(&self) -> RawConfig {
        RawConfig {
            url: self.url.clone(),
            file: self.file.clone(),
            crawler: RawCrawlerConfig {
                max_depth: self.crawl,
                delay_ms: self.delay,
                timeout_secs: self.timeout,
                ..Default::default()
            },
            ngram: RawNgramConfig {
                length: self.ngram.clone(),
            },
            output: RawOutputConfig {
                path: self.output.clone(),
                sort: self.sort.then_some(true),
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let (config, config_hash) = match build_config(cli.config.as_deref(), cli.overrides()) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };
    if let Some(hash) = config_hash {
        tracing::info!("Configuration loaded successfully (hash: {})", hash);
    }

    print_banner(&config);

    if cli.dry_run {
        eprintln!("\n✓ Configuration is valid");
        return Ok(());
    }

    let summary = run_session(&config, !cli.quiet)
        .await
        .context("Run failed")?;

    if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ngram_spider=info,warn"),
            1 => EnvFilter::new("ngram_spider=debug,info"),
            2 => EnvFilter::new("ngram_spider=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prints the effective settings to stderr
fn print_banner(config: &Config) {
    match &config.source {
        Source::File(path) => {
            eprintln!("Reading file:\t{}", path.display());
            eprintln!("ngram len:\t{}", config.ngram.range);
        }
        Source::Url(seed) => {
            eprintln!("Crawling URL:\t{}", seed);
            eprintln!("Base domain:\t{}", extract_domain(seed).unwrap_or_default());
            eprintln!("Crawl depth:\t{}", config.crawler.max_depth);
            eprintln!("ngram len:\t{}", config.ngram.range);
            eprintln!(
                "Crawl delay:\t{}ms (increase this to avoid rate limiting)",
                config.crawler.delay.as_millis()
            );
            eprintln!("Timeout:\t{} sec", config.crawler.timeout.as_secs());
        }
    }
    eprintln!("Output file:\t{}", config.output.path.display());
    if config.output.sort {
        eprintln!("Sort:\t\tby frequency");
    }
}
