//! Local resource usage collection.
//!
//! CPU usage is computed from the delta of `/proc/stat` jiffy counters
//! between two samples, memory from `/proc/meminfo`, and disk from a
//! `statvfs` call on the configured mount point. All values are percentages
//! in [0, 100].

use std::io;

/// Error type for collection failures.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// A `/proc` file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: &'static str,
        #[source]
        source: io::Error,
    },

    /// A `/proc` file did not have the expected shape.
    #[error("Unexpected format in {0}")]
    Format(&'static str),

    /// The `statvfs` syscall failed.
    #[error("statvfs failed for {0}")]
    Statvfs(String),
}

// ---------------------------------------------------------------------------
// CPU
// ---------------------------------------------------------------------------

/// Aggregate CPU jiffy counters from one `/proc/stat` sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTimes {
    /// Time spent doing work (user, nice, system, irq, softirq, steal).
    pub busy: u64,
    /// Time spent idle (idle + iowait).
    pub idle: u64,
}

impl CpuTimes {
    /// Read the current counters from `/proc/stat`.
    pub fn sample() -> Result<Self, CollectError> {
        let content = std::fs::read_to_string("/proc/stat").map_err(|source| {
            CollectError::Read {
                path: "/proc/stat",
                source,
            }
        })?;
        parse_proc_stat(&content).ok_or(CollectError::Format("/proc/stat"))
    }
}

/// Parse the aggregate `cpu` line of `/proc/stat`.
///
/// The line is `cpu user nice system idle iowait irq softirq steal ...`;
/// fields past `idle` may be absent on old kernels.
pub fn parse_proc_stat(content: &str) -> Option<CpuTimes> {
    let line = content.lines().find(|l| {
        l.starts_with("cpu ") || l.starts_with("cpu\t")
    })?;
    let fields: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .map_while(|f| f.parse().ok())
        .collect();
    if fields.len() < 4 {
        return None;
    }

    let idle = fields[3] + fields.get(4).copied().unwrap_or(0);
    let busy = fields
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 3 && *i != 4)
        .map(|(_, v)| v)
        .sum();

    Some(CpuTimes { busy, idle })
}

/// CPU usage percentage over the interval between two samples.
///
/// Returns 0 when the counters did not advance (first tick, or a counter
/// wrap after reboot).
pub fn cpu_percent(prev: CpuTimes, curr: CpuTimes) -> f64 {
    let busy_delta = curr.busy.saturating_sub(prev.busy);
    let idle_delta = curr.idle.saturating_sub(prev.idle);
    let total = busy_delta + idle_delta;
    if total == 0 {
        return 0.0;
    }
    busy_delta as f64 / total as f64 * 100.0
}

// ---------------------------------------------------------------------------
// Memory
// ---------------------------------------------------------------------------

/// Read current memory usage from `/proc/meminfo`.
pub fn memory_usage() -> Result<f64, CollectError> {
    let content =
        std::fs::read_to_string("/proc/meminfo").map_err(|source| CollectError::Read {
            path: "/proc/meminfo",
            source,
        })?;
    parse_meminfo(&content).ok_or(CollectError::Format("/proc/meminfo"))
}

/// Parse `/proc/meminfo` into a used-memory percentage.
///
/// Uses `MemAvailable` rather than `MemFree` so reclaimable page cache does
/// not count as used.
pub fn parse_meminfo(content: &str) -> Option<f64> {
    let mut total_kb: Option<f64> = None;
    let mut available_kb: Option<f64> = None;

    for line in content.lines() {
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            total_kb = rest.split_whitespace().next()?.parse().ok();
        } else if let Some(rest) = line.strip_prefix("MemAvailable:") {
            available_kb = rest.split_whitespace().next()?.parse().ok();
        }
        if total_kb.is_some() && available_kb.is_some() {
            break;
        }
    }

    let total = total_kb?;
    let available = available_kb?;
    if total <= 0.0 {
        return None;
    }
    Some(((total - available) / total * 100.0).clamp(0.0, 100.0))
}

// ---------------------------------------------------------------------------
// Disk
// ---------------------------------------------------------------------------

/// Read disk usage for the given mount point via `statvfs`.
pub fn disk_usage(path: &str) -> Result<f64, CollectError> {
    use std::ffi::CString;
    use std::mem::MaybeUninit;

    let c_path =
        CString::new(path).map_err(|_| CollectError::Statvfs(path.to_string()))?;
    let mut stat = MaybeUninit::<libc::statvfs>::uninit();

    // Safety: libc::statvfs is well-defined for valid paths.
    let ret = unsafe { libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) };
    if ret != 0 {
        return Err(CollectError::Statvfs(path.to_string()));
    }

    let stat = unsafe { stat.assume_init() };
    let block_size = stat.f_frsize as u64;
    let total = stat.f_blocks as u64 * block_size;
    let free = stat.f_bavail as u64 * block_size;
    if total == 0 {
        return Err(CollectError::Statvfs(path.to_string()));
    }
    let used = total.saturating_sub(free);
    Ok(used as f64 / total as f64 * 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const STAT_SAMPLE: &str = "\
cpu  10000 200 3000 50000 1000 0 300 0 0 0
cpu0 5000 100 1500 25000 500 0 150 0 0 0
intr 12345
";

    #[test]
    fn parses_aggregate_cpu_line() {
        let times = parse_proc_stat(STAT_SAMPLE).unwrap();
        // busy = 10000 + 200 + 3000 + 0 + 300 = 13500
        assert_eq!(times.busy, 13_500);
        // idle = 50000 + 1000
        assert_eq!(times.idle, 51_000);
    }

    #[test]
    fn parse_proc_stat_handles_short_line() {
        // Minimal 4-field line from a very old kernel.
        let times = parse_proc_stat("cpu 100 0 50 850\n").unwrap();
        assert_eq!(times.busy, 150);
        assert_eq!(times.idle, 850);
    }

    #[test]
    fn parse_proc_stat_rejects_garbage() {
        assert!(parse_proc_stat("intr 12345\n").is_none());
        assert!(parse_proc_stat("cpu a b c\n").is_none());
    }

    #[test]
    fn cpu_percent_from_delta() {
        let prev = CpuTimes { busy: 1000, idle: 9000 };
        let curr = CpuTimes {
            busy: 1500,
            idle: 9500,
        };
        // 500 busy out of 1000 total.
        let pct = cpu_percent(prev, curr);
        assert!((pct - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn cpu_percent_zero_when_counters_static() {
        let times = CpuTimes { busy: 100, idle: 900 };
        assert_eq!(cpu_percent(times, times), 0.0);
    }

    #[test]
    fn parses_meminfo() {
        let content = "\
MemTotal:       16000000 kB
MemFree:         2000000 kB
MemAvailable:    4000000 kB
Buffers:          500000 kB
";
        let pct = parse_meminfo(content).unwrap();
        // (16000000 - 4000000) / 16000000 = 75%
        assert!((pct - 75.0).abs() < 1e-9);
    }

    #[test]
    fn parse_meminfo_requires_both_fields() {
        assert!(parse_meminfo("MemTotal: 16000000 kB\n").is_none());
        assert!(parse_meminfo("MemAvailable: 4000000 kB\n").is_none());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn disk_usage_of_root_is_a_percentage() {
        let pct = disk_usage("/").unwrap();
        assert!((0.0..=100.0).contains(&pct));
    }
}
