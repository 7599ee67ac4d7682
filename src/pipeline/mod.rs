//! Text pipeline between the producer and the n-gram stage
//!
//! Exactly one producer (the crawl, or a single file read) hands [`TextUnit`]s
//! to exactly one consumer over a bounded channel. The bound keeps a deep or wide
//! crawl from piling up undelivered text; the default capacity is large enough
//! that the network-bound producer does not wait on the CPU-bound consumer.
//!
//! The consumer stops when the producer drops its [`TextSender`], never on a
//! count or a timeout. Fetch counts travel on a separate, display-only conduit.

mod source;

pub use source::{spawn_crawl, spawn_file_source};

use thiserror::Error;
use tokio::sync::{mpsc, watch};

/// One document's extracted text
///
/// Immutable once produced; ownership moves from the producer to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    text: String,
}

impl TextUnit {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

}

impl From<String> for TextUnit {
    fn from(text: String) -> Self {
        Self { text }
    }
}

/// The consumer side of the pipeline went away before the producer finished
#[derive(Debug, Error)]
#[error("text pipeline closed by consumer")]
pub struct PipelineClosed;

/// Creates a bounded text pipeline
///
/// # Panics
///
/// Panics if `capacity` is zero; configuration validation rejects that earlier.
pub fn text_channel(capacity: usize) -> (TextSender, TextReceiver) {
    let (tx, rx) = mpsc::channel(capacity);
    (TextSender { tx }, TextReceiver { rx })
}

/// Producer handle; dropping it closes the pipeline
#[derive(Debug)]
pub struct TextSender {
    tx: mpsc::Sender<TextUnit>,
}

impl TextSender {
    /// Hands a unit to the consumer, waiting only if the pipeline is full
    pub async fn send(&self, unit: TextUnit) -> Result<(), PipelineClosed> {
        self.tx.send(unit).await.map_err(|_| PipelineClosed)
    }

    /// Maximum number of undelivered units
    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}

/// Consumer handle
#[derive(Debug)]
pub struct TextReceiver {
    rx: mpsc::Receiver<TextUnit>,
}

impl TextReceiver {
    /// Waits for the next unit; `None` once the producer has closed the pipeline
    pub async fn recv(&mut self) -> Option<TextUnit> {
        self.rx.recv().await
    }

    /// Collects every unit until the producer closes the pipeline
    pub async fn drain(mut self) -> Vec<TextUnit> {
        let mut units = Vec::new();
        while let Some(unit) = self.rx.recv().await {
            units.push(unit);
        }
        tracing::debug!("Text pipeline drained: {} documents", units.len());
        units
    }
}

/// Creates the fetch-count conduit
///
/// The conduit is a single overwritten slot holding the running total, so
/// recording a fetch never waits and never queues.
pub fn fetch_signal() -> (FetchSignal, FetchEvents) {
    let (tx, rx) = watch::channel(0);
    (FetchSignal { tx }, FetchEvents { rx })
}

/// Producer side of the fetch-count conduit
#[derive(Debug)]
pub struct FetchSignal {
    tx: watch::Sender<u64>,
}

impl FetchSignal {
    /// Records one successful fetch; a missing reporter is ignored
    pub fn record(&self) {
        self.tx.send_modify(|fetched| *fetched += 1);
    }
}

/// Reporter side of the fetch-count conduit
#[derive(Debug)]
pub struct FetchEvents {
    rx: watch::Receiver<u64>,
}

impl FetchEvents {
    /// Waits until the total moves and returns it; `None` once the [`FetchSignal`] is dropped
    pub async fn changed(&mut self) -> Option<u64> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    /// The newest total, including fetches recorded just before the signal was dropped
    pub fn total(&self) -> u64 {
        *self.rx.borrow()
    }
}
