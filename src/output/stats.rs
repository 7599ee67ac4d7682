//! End-of-run summary

use crate::monitor::format_bytes;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// What a finished session produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// When the session started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the session
    pub runtime: Duration,

    /// Distinct whitespace-delimited tokens across all text
    pub unique_words: usize,

    /// Distinct n-grams written to the result file
    pub unique_ngrams: usize,

    /// Documents fetched and scraped; `None` for a local file source
    pub urls_crawled: Option<u64>,

    /// Result file location
    pub output_path: PathBuf,

    /// Peak resident memory observed during the run
    pub peak_memory_bytes: u64,
}

impl RunSummary {
    /// Renders the summary as tab-aligned `label:\tvalue` lines
    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("Unique words:\t{}", self.unique_words),
            format!("Unique ngrams:\t{}", self.unique_ngrams),
        ];
        if let Some(crawled) = self.urls_crawled {
            lines.push(format!("URLs crawled:\t{}", crawled));
        }
        lines.push(format!("Output file:\t{}", self.output_path.display()));
        lines.push(format!(
            "RAM used:\t{}",
            format_bytes(self.peak_memory_bytes)
        ));
        lines.push(format!(
            "Started:\t{}",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        lines.push(format!("Runtime:\t{:.3}s", self.runtime.as_secs_f64()));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Prints the summary to stderr, keeping stdout free
pub fn print_summary(summary: &RunSummary) {
    eprint!("{}", summary.render());
}
