use govclock_core::types::BlockDuration;

/// Compact English rendering, e.g. `"1d 2h 30m"`. Zero components are skipped.
pub fn format_duration(d: &BlockDuration) -> String {
    let mut parts = Vec::with_capacity(3);
    if d.days > 0 {
        parts.push(format!("{}d", d.days));
    }
    if d.hours > 0 {
        parts.push(format!("{}h", d.hours));
    }
    if d.minutes > 0 {
        parts.push(format!("{}m", d.minutes));
    }
    if parts.is_empty() {
        return "0m".to_string();
    }
    parts.join(" ")
}
