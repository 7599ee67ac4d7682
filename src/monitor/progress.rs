//! Progress bars and the crawl status counter
//!
//! Producers publish into a [`tokio::sync::watch`] slot, which always holds
//! only the newest value. Publishing never waits and the ticker only ever reads,
//! so a slow terminal can not hold back ingestion or writing.

use crate::pipeline::FetchEvents;
use std::io::Write;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Redraw interval for progress bars
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Redraw interval for the crawl status counter
pub const STATUS_INTERVAL: Duration = Duration::from_millis(50);

/// Number of cells in a rendered bar
pub const BAR_WIDTH: usize = 20;

/// Snapshot of a batch operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub processed: u64,
    pub total: u64,
}

impl Progress {
    /// Completion in percent; `None` while the total is unknown
    pub fn percentage(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.processed as f64 / self.total as f64 * 100.0)
    }
}

/// Renders one frame, e.g. `"\rWriting...\t[==========          ] 50.00%"`
///
/// Returns `None` when the total is zero.
pub fn render_bar(action: &str, progress: Progress) -> Option<String> {
    let percentage = progress.percentage()?;
    let filled = ((percentage / 5.0) as usize).min(BAR_WIDTH);

    Some(format!(
        "\r{}...\t[{}{}] {:.2}%",
        action,
        "=".repeat(filled),
        " ".repeat(BAR_WIDTH - filled),
        percentage
    ))
}

fn draw(frame: &str) {
    let mut stderr = std::io::stderr().lock();
    let _ = stderr.write_all(frame.as_bytes());
    let _ = stderr.flush();
}

/// Publishing side of a progress slot
#[derive(Debug)]
pub struct ProgressHandle {
    tx: watch::Sender<Progress>,
}

impl ProgressHandle {
    /// A handle whose slot is read directly instead of by a monitor task
    pub fn detached() -> (Self, watch::Receiver<Progress>) {
        let (tx, rx) = watch::channel(Progress::default());
        (Self { tx }, rx)
    }

    /// Starts a new batch of `total` items
    pub fn reset(&self, total: u64) {
        self.tx.send_replace(Progress {
            processed: 0,
            total,
        });
    }

    /// Marks `processed` items as done
    pub fn advance_to(&self, processed: u64) {
        self.tx.send_modify(|progress| progress.processed = processed);
    }

    pub fn current(&self) -> Progress {
        *self.tx.borrow()
    }
}

/// Ticker task redrawing one progress bar
#[derive(Debug)]
pub struct ProgressMonitor {
    handle: JoinHandle<Progress>,
}

impl ProgressMonitor {
    /// Spawns a bar labelled `action`; nothing is drawn unless `visible`
    pub fn spawn(action: &'static str, visible: bool) -> (ProgressHandle, Self) {
        let (progress, rx) = ProgressHandle::detached();
        let handle = tokio::spawn(run_progress(action, rx, visible));
        (progress, Self { handle })
    }

    /// Closes the slot, waits for the final frame and returns the last snapshot
    pub async fn finish(self, progress: ProgressHandle) -> Progress {
        let last = progress.current();
        drop(progress);

        match self.handle.await {
            Ok(progress) => progress,
            Err(e) => {
                tracing::debug!("Progress monitor ended abnormally: {}", e);
                last
            }
        }
    }
}

async fn run_progress(
    action: &'static str,
    mut rx: watch::Receiver<Progress>,
    visible: bool,
) -> Progress {
    let mut ticker = interval(PROGRESS_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        match rx.has_changed() {
            Ok(true) => {
                let progress = *rx.borrow_and_update();
                if let (true, Some(frame)) = (visible, render_bar(action, progress)) {
                    draw(&frame);
                }
            }
            Ok(false) => {}
            Err(_) => break,
        }
    }

    let last = *rx.borrow();
    if visible {
        if let Some(frame) = render_bar(action, last) {
            draw(&frame);
            draw("\n");
        }
    }
    last
}

/// Spawns the `URLs crawled` counter
///
/// The newest total is picked up whenever it moves and redrawn on the next tick
/// that has something new to show. The task ends when the crawl drops its signal
/// and returns the final count.
pub fn spawn_crawl_status(mut events: FetchEvents, visible: bool) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut ticker = interval(STATUS_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut crawled: u64 = 0;
        let mut drawn: Option<u64> = None;

        loop {
            tokio::select! {
                total = events.changed() => match total {
                    Some(total) => crawled = total,
                    None => break,
                },
                _ = ticker.tick() => {
                    if visible && drawn != Some(crawled) {
                        draw(&format!("\rURLs crawled:\t{}", crawled));
                        drawn = Some(crawled);
                    }
                }
            }
        }
        crawled = events.total();

        if visible {
            draw(&format!("\rURLs crawled:\t{}\n", crawled));
        }
        tracing::debug!("Crawl status reporter finished: {} URLs", crawled);
        crawled
    })
}
