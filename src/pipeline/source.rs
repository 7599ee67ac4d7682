//! Producer tasks feeding the text pipeline
//!
//! Each producer owns the [`TextSender`] and drops it when it finishes, which is
//! the only completion signal the consumer sees.

use crate::crawler::{CrawlEngine, CrawlReport, DocumentFetcher};
use crate::pipeline::{FetchSignal, TextSender, TextUnit};
use crate::SpiderError;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use url::Url;

/// Runs a crawl in its own task
///
/// The pipeline closes once the whole traversal has returned.
pub fn spawn_crawl<F>(
    engine: CrawlEngine<F>,
    seed: Url,
    texts: TextSender,
    signal: FetchSignal,
) -> JoinHandle<CrawlReport>
where
    F: DocumentFetcher + 'static,
{
    tokio::spawn(async move {
        let report = engine.run(seed, &texts, &signal).await;
        drop(texts);
        report
    })
}

/// Reads one whole file into a single [`TextUnit`] in its own task
///
/// A read failure is returned through the join handle and is fatal to the run.
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn spawn_file_source(path: PathBuf, texts: TextSender) -> JoinHandle<Result<(), SpiderError>> {
    tokio::spawn(async move {
        let data = tokio::fs::read(&path)
            .await
            .map_err(|source| SpiderError::SourceRead {
                path: path.display().to_string(),
                source,
            })?;

        tracing::debug!("Read {} bytes from {}", data.len(), path.display());

        let text = String::from_utf8_lossy(&data).into_owned();
        if texts.send(TextUnit::from(text)).await.is_err() {
            tracing::warn!("Text pipeline closed before {} was delivered", path.display());
        }

        Ok(())
    })
}
