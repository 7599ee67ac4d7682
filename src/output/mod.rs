//! Output module for the n-gram result file and the run summary
//!
//! This module handles:
//! - Writing the n-gram table through a large buffer, ranked or in native order
//! - Summarising a finished run on stderr

pub mod stats;
mod writer;

pub use stats::{print_summary, RunSummary};
pub use writer::{rank_by_frequency, write_results, WRITE_BUFFER_SIZE};

use std::path::PathBuf;
use thiserror::Error;

/// Errors writing the result file; all of them end the run
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to output file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to flush output file {}: {source}", path.display())]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;
