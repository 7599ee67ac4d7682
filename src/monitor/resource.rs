//! Peak memory sampling for the current process

use std::time::Duration;
use sysinfo::{get_current_pid, Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Default sampling interval
pub const RESOURCE_INTERVAL: Duration = Duration::from_millis(100);

/// Reads this process's resident memory
struct MemorySampler {
    system: System,
    pid: Option<Pid>,
}

impl MemorySampler {
    fn new() -> Self {
        let pid = match get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!("Memory sampling unavailable: {}", e);
                None
            }
        };
        Self {
            system: System::new(),
            pid,
        }
    }

    /// Resident memory in bytes, or `None` when the platform can not report it
    fn sample(&mut self) -> Option<u64> {
        let pid = self.pid?;
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        self.system.process(pid).map(|process| process.memory())
    }
}

/// Background sampler keeping the running maximum of process memory
///
/// Sampling only reads OS counters; nothing it does touches the crawl,
/// the n-gram tables or the output file.
#[derive(Debug)]
pub struct ResourceMonitor {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<u64>,
}

impl ResourceMonitor {
    pub fn spawn(every: Duration) -> Self {
        let (stop, mut stopped) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let mut sampler = MemorySampler::new();
            let mut peak = 0u64;
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = ticker.tick() => {
                        if let Some(bytes) = sampler.sample() {
                            peak = peak.max(bytes);
                        }
                    }
                }
            }

            if let Some(bytes) = sampler.sample() {
                peak = peak.max(bytes);
            }
            peak
        });

        Self { stop, handle }
    }

    /// Stops sampling and returns the peak in bytes (0 if never sampled)
    pub async fn stop(self) -> u64 {
        let _ = self.stop.send(());
        match self.handle.await {
            Ok(peak) => peak,
            Err(e) => {
                tracing::debug!("Resource monitor ended abnormally: {}", e);
                0
            }
        }
    }
}

/// Formats a byte count with a binary unit, e.g. `"1.50 MiB"`
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}
