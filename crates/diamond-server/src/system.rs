//! Host resource snapshot for the detailed health check.

use std::path::Path;

use serde::Serialize;
use sysinfo::{Disks, MINIMUM_CPU_UPDATE_INTERVAL, System};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SystemSnapshot {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub memory_available_mb: f64,
    pub disk_percent: f64,
    pub disk_free_gb: f64,
}

/// Sample CPU, memory, and root-disk usage.
///
/// CPU usage needs two refreshes spaced by sysinfo's minimum interval, so
/// this takes at least that long.
pub async fn snapshot() -> SystemSnapshot {
    let mut sys = System::new();
    sys.refresh_cpu();
    tokio::time::sleep(MINIMUM_CPU_UPDATE_INTERVAL).await;
    sys.refresh_cpu();
    sys.refresh_memory();

    let total_memory = sys.total_memory();
    let available_memory = sys.available_memory();

    let disks = Disks::new_with_refreshed_list();
    let root = disks
        .list()
        .iter()
        .find(|d| d.mount_point() == Path::new("/"))
        .or_else(|| disks.list().iter().max_by_key(|d| d.total_space()));
    let (disk_total, disk_free) = root
        .map(|d| (d.total_space(), d.available_space()))
        .unwrap_or((0, 0));

    SystemSnapshot {
        cpu_percent: f64::from(sys.global_cpu_info().cpu_usage()),
        memory_percent: used_percent(total_memory, available_memory),
        memory_available_mb: available_memory as f64 / BYTES_PER_MB,
        disk_percent: used_percent(disk_total, disk_free),
        disk_free_gb: disk_free as f64 / BYTES_PER_GB,
    }
}

/// Percentage of `total` not covered by `free`, rounded to one decimal.
fn used_percent(total: u64, free: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let used = total.saturating_sub(free) as f64;
    (used / total as f64 * 1000.0).round() / 10.0
}
