//! Best-effort observers
//!
//! Monitors report on the run through side channels only. They never own or
//! borrow the visited set, the n-gram tables or the output writer.

mod progress;
mod resource;

pub use progress::{
    render_bar, spawn_crawl_status, Progress, ProgressHandle, ProgressMonitor, BAR_WIDTH,
    PROGRESS_INTERVAL, STATUS_INTERVAL,
};
pub use resource::{format_bytes, ResourceMonitor, RESOURCE_INTERVAL};
