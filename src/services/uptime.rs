//! Host uptime sampling

use sysinfo::System;

use crate::error::UptimeError;

/// Sample the host's continuous uptime in seconds.
///
/// A zero reading means the platform did not expose uptime; callers skip
/// the tick and retry on the next interval.
pub fn sample_uptime() -> Result<u64, UptimeError> {
    let uptime = System::uptime();
    if uptime == 0 {
        return Err(UptimeError::Unavailable);
    }
    Ok(uptime)
}

/// Format an uptime in seconds as a short human-readable string.
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / (24 * 3600);
    let hours = (seconds % (24 * 3600)) / 3600;
    let minutes = (seconds % 3600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_only() {
        assert_eq!(format_uptime(0), "0m");
        assert_eq!(format_uptime(59), "0m");
        assert_eq!(format_uptime(600), "10m");
    }

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(format_uptime(3600), "1h 0m");
        assert_eq!(format_uptime(3700), "1h 1m");
    }

    #[test]
    fn formats_days() {
        assert_eq!(format_uptime(86_400), "1d 0h 0m");
        assert_eq!(format_uptime(90_061), "1d 1h 1m");
        assert_eq!(format_uptime(200_000), "2d 7h 33m");
    }
}
