//! CPU usage sampling from `/proc/stat`.
//!
//! A sample reads the counters twice, [`CPU_READ_INTERVAL_MS`] apart, and
//! reports for each cpu line the share of elapsed jiffies spent working:
//!
//! ```text
//! usage = (work_end - work_start) / (total_end - total_start) * 100
//! work  = user + nice + system
//! total = sum of all ten counters
//! ```
//!
//! The aggregate line comes first and is labelled `overall`; per-core lines
//! follow as `core 1`, `core 2`, and so on.
//!
//! [`CPU_READ_INTERVAL_MS`]: crate::config::CPU_READ_INTERVAL_MS

mod source;

pub use source::{MockStatSource, ProcStatSource, StatSource, PROC_STAT_PATH};

use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

use crate::error::SampleError;
use crate::models::Usages;

/// Fields on a cpu line: the label plus ten counters.
const CPU_STAT_FIELDS: usize = 11;

/// Work and total jiffies of one cpu line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTimes {
    pub work: u64,
    pub total: u64,
}

/// Parse all cpu lines of a `/proc/stat` document, in file order.
///
/// Lines without exactly eleven fields, or whose first field does not
/// contain `cpu`, are skipped.
pub fn parse_proc_stat(text: &str) -> Result<Vec<CpuTimes>, SampleError> {
    let mut results = Vec::new();

    for line in text.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != CPU_STAT_FIELDS || !fields[0].contains("cpu") {
            continue;
        }

        let mut counters = [0u64; CPU_STAT_FIELDS - 1];
        for (slot, field) in counters.iter_mut().zip(&fields[1..]) {
            *slot = field.parse().map_err(|_| SampleError::Parse {
                line: line.to_string(),
                value: field.to_string(),
            })?;
        }

        let overflow = || SampleError::Overflow {
            line: line.to_string(),
        };
        let work = checked_sum(&counters[..3]).ok_or_else(overflow)?;
        let total = checked_sum(&counters).ok_or_else(overflow)?;
        results.push(CpuTimes { work, total });
    }

    if results.is_empty() {
        return Err(SampleError::NoCpuLines);
    }
    Ok(results)
}

fn checked_sum(counters: &[u64]) -> Option<u64> {
    counters
        .iter()
        .try_fold(0u64, |acc, &counter| acc.checked_add(counter))
}

/// Percentage of the interval between two readings spent working.
///
/// Zero elapsed jiffies (or counters that went backwards) give 0.0.
pub fn usage_percent(start: CpuTimes, end: CpuTimes) -> f64 {
    let total = end.total.saturating_sub(start.total);
    if total == 0 {
        return 0.0;
    }
    let work = end.work.saturating_sub(start.work);
    work as f64 / total as f64 * 100.0
}

/// Label of the n-th cpu line.
pub fn cpu_label(index: usize) -> String {
    if index == 0 {
        "overall".to_string()
    } else {
        format!("core {}", index)
    }
}

/// Usages between two parsed readings.
///
/// If the line count changed in between (cpu hotplug), only the lines
/// present in both are reported.
pub fn usages_between(start: &[CpuTimes], end: &[CpuTimes]) -> Usages {
    start
        .iter()
        .zip(end)
        .enumerate()
        .map(|(index, (s, e))| (cpu_label(index), usage_percent(*s, *e)))
        .collect()
}

/// Takes timed pairs of readings from a [`StatSource`].
#[derive(Clone)]
pub struct CpuSampler {
    source: Arc<dyn StatSource>,
    read_interval: Duration,
}

impl CpuSampler {
    pub fn new(source: Arc<dyn StatSource>, read_interval: Duration) -> Self {
        Self {
            source,
            read_interval,
        }
    }

    /// Sampler over the real `/proc/stat`.
    pub fn proc(read_interval: Duration) -> Self {
        Self::new(Arc::new(ProcStatSource::default()), read_interval)
    }

    fn read(&self) -> Result<Vec<CpuTimes>, SampleError> {
        let text = self.source.read_stat()?;
        parse_proc_stat(&text)
    }

    /// Read, wait the read interval, read again, and compute usages.
    pub async fn sample(&self) -> Result<Usages, SampleError> {
        let start = self.read()?;
        tokio::time::sleep(self.read_interval).await;
        let end = self.read()?;

        let usages = usages_between(&start, &end);
        trace!(lines = usages.len(), "CPU sample taken");
        Ok(usages)
    }
}
