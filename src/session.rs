//! One end-to-end run
//!
//! A session wires a single producer (the crawl, or a file read) to the n-gram
//! engine through the text pipeline, writes the result file, and reports what it
//! did. Monitors run alongside and only observe.

use crate::config::{Config, Source};
use crate::crawler::{CrawlEngine, CrawlReport, HttpFetcher};
use crate::monitor::{spawn_crawl_status, ProgressMonitor, ResourceMonitor, RESOURCE_INTERVAL};
use crate::ngram::{CountMode, NgramEngine};
use crate::output::{write_results, RunSummary};
use crate::pipeline::{fetch_signal, spawn_crawl, spawn_file_source, text_channel};
use crate::Result;
use chrono::Utc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// The task filling the text pipeline
enum Producer {
    Crawl {
        crawl: JoinHandle<CrawlReport>,
        status: JoinHandle<u64>,
    },
    File(JoinHandle<Result<()>>),
}

impl Producer {
    /// Waits for the producer; returns the crawl count for URL sources
    async fn finish(self) -> Result<Option<u64>> {
        match self {
            Producer::Crawl { crawl, status } => {
                let report = crawl.await?;
                let crawled = status.await?;
                tracing::debug!(
                    "{} out-of-scope links skipped, {} fetch events reported",
                    report.out_of_scope,
                    crawled
                );
                Ok(Some(crawled))
            }
            Producer::File(read) => {
                read.await??;
                Ok(None)
            }
        }
    }
}

/// Runs a full session for `config`
///
/// Progress bars and counters are drawn on stderr only when `visible`.
/// Per-URL crawl failures are absorbed by the crawl; an unreadable source file
/// or any failure on the result file ends the session with an error.
pub async fn run_session(config: &Config, visible: bool) -> Result<RunSummary> {
    let started_at = Utc::now();
    let clock = Instant::now();
    let resources = ResourceMonitor::spawn(RESOURCE_INTERVAL);

    let (texts, receiver) = text_channel(config.crawler.pipeline_capacity);
    let producer = match &config.source {
        Source::Url(seed) => {
            let fetcher = HttpFetcher::new(&config.crawler)?;
            let engine = CrawlEngine::new(fetcher, &config.crawler);
            let (signal, events) = fetch_signal();
            let status = spawn_crawl_status(events, visible);
            let crawl = spawn_crawl(engine, seed.clone(), texts, signal);
            Producer::Crawl { crawl, status }
        }
        Source::File(path) => {
            tracing::info!("Reading file {}", path.display());
            Producer::File(spawn_file_source(path.clone(), texts))
        }
    };

    let units = receiver.drain().await;
    let urls_crawled = producer.finish().await?;

    let mode = CountMode::for_output(config.output.sort);
    let mut engine = NgramEngine::new(config.ngram.range, mode);
    tracing::info!(
        "Generating {} n-grams from {} documents",
        config.ngram.range,
        units.len()
    );

    let (progress, monitor) = ProgressMonitor::spawn("Processing", visible);
    let (engine, progress) = tokio::task::spawn_blocking(move || {
        engine.ingest_all(&units, &progress);
        (engine, progress)
    })
    .await?;
    monitor.finish(progress).await;
    tracing::debug!(
        "Ingested {} documents into {} distinct n-grams",
        engine.units(),
        engine.unique_ngrams()
    );

    let unique_words = engine.unique_words();
    let unique_ngrams = engine.unique_ngrams();
    let table = engine.into_table();

    let output_path = config.output.path.clone();
    let sorted = config.output.sort;
    let (progress, monitor) = ProgressMonitor::spawn("Writing", visible);
    let (written, progress) = {
        let path = output_path.clone();
        tokio::task::spawn_blocking(move || {
            let written = write_results(&table, &path, sorted, &progress);
            (written, progress)
        })
        .await?
    };
    monitor.finish(progress).await;
    let written = written?;
    tracing::debug!("{} lines written", written);

    let peak_memory_bytes = resources.stop().await;

    Ok(RunSummary {
        started_at,
        runtime: clock.elapsed(),
        unique_words,
        unique_ngrams,
        urls_crawled,
        output_path,
        peak_memory_bytes,
    })
}
