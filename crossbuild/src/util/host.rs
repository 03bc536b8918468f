use std::fs;

const MEMINFO: &str = "/proc/meminfo";

pub fn cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(1)
}

/// Total RAM in GiB, or `None` where `/proc/meminfo` is unavailable.
pub fn total_memory_gib() -> Option<f64> {
    let content = fs::read_to_string(MEMINFO).ok()?;
    parse_mem_total_gib(&content)
}

fn parse_mem_total_gib(meminfo: &str) -> Option<f64> {
    let line = meminfo.lines().find(|l| l.starts_with("MemTotal:"))?;
    let kib: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kib as f64 / (1024.0 * 1024.0))
}
