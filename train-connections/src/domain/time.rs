//! Time-of-day handling for schedule listings.
//!
//! Listings carry departure and arrival times as bare "HH:MM" strings with no
//! date attached. Everything downstream works in minutes since midnight, and
//! day-boundary handling is done arithmetically by the connection resolver.

use std::sync::OnceLock;

use regex::Regex;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Convert an "HH:MM" time to minutes since midnight.
///
/// This is deliberately permissive: anything that is not exactly two
/// colon-separated unsigned integers yields 0, which is indistinguishable
/// from midnight. Hours and minutes are not range checked, so "25:00" is
/// 1500. A minus sign is rejected, so "-1:30" is 0 rather than -30.
///
/// # Examples
///
/// ```
/// use train_connections::domain::parse_time;
///
/// assert_eq!(parse_time("14:30"), 870);
/// assert_eq!(parse_time("23:59"), 1439);
/// assert_eq!(parse_time("invalid"), 0);
/// assert_eq!(parse_time(""), 0);
/// ```
pub fn parse_time(s: &str) -> u32 {
    let mut parts = s.split(':');
    let (Some(hours), Some(minutes), None) = (parts.next(), parts.next(), parts.next()) else {
        return 0;
    };

    match (hours.parse::<u32>(), minutes.parse::<u32>()) {
        (Ok(h), Ok(m)) => h.checked_mul(60).and_then(|h| h.checked_add(m)).unwrap_or(0),
        _ => 0,
    }
}

/// Format a minute count as "<H>h <M>m".
///
/// ```
/// use train_connections::domain::format_duration;
///
/// assert_eq!(format_duration(120), "2h 0m");
/// assert_eq!(format_duration(1012), "16h 52m");
/// ```
pub fn format_duration(minutes: i64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-9]+)h\s*([0-9]+)m").unwrap())
}

/// Check whether a "<H>h <M>m" duration is under 19 hours.
///
/// Text that doesn't contain a duration is never under the limit.
///
/// ```
/// use train_connections::domain::is_under_19_hours;
///
/// assert!(is_under_19_hours("16h 52m"));
/// assert!(!is_under_19_hours("19h 0m"));
/// assert!(!is_under_19_hours(""));
/// ```
pub fn is_under_19_hours(s: &str) -> bool {
    duration_pattern()
        .captures(s)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .is_some_and(|hours| hours < 19)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        assert_eq!(parse_time("14:30"), 870);
        assert_eq!(parse_time("00:00"), 0);
        assert_eq!(parse_time("23:59"), 1439);
        assert_eq!(parse_time("9:05"), 545);
    }

    #[test]
    fn parse_degrades_to_zero() {
        assert_eq!(parse_time("invalid"), 0);
        assert_eq!(parse_time(""), 0);
        assert_eq!(parse_time("10"), 0);
        assert_eq!(parse_time("10:30:00"), 0);
        assert_eq!(parse_time("ab:30"), 0);
        assert_eq!(parse_time("10:xx"), 0);
        assert_eq!(parse_time("99999999999:00"), 0);
    }

    #[test]
    fn minus_sign_is_rejected() {
        assert_eq!(parse_time("-1:30"), 0);
        assert_eq!(parse_time("10:-5"), 0);
        assert_eq!(parse_time("+9:00"), 540);
    }

    #[test]
    fn parse_does_not_range_check() {
        assert_eq!(parse_time("25:00"), 1500);
        assert_eq!(parse_time("10:75"), 675);
    }

    #[test]
    fn format_durations() {
        assert_eq!(format_duration(0), "0h 0m");
        assert_eq!(format_duration(59), "0h 59m");
        assert_eq!(format_duration(120), "2h 0m");
        assert_eq!(format_duration(1140), "19h 0m");
    }

    #[test]
    fn under_19_hours() {
        assert!(is_under_19_hours("16h 52m"));
        assert!(is_under_19_hours("18h 59m"));
        assert!(is_under_19_hours("0h 0m"));
        assert!(is_under_19_hours("3h5m"));
        assert!(!is_under_19_hours("19h 0m"));
        assert!(!is_under_19_hours("20h 30m"));
        assert!(!is_under_19_hours("16 hours"));
        assert!(!is_under_19_hours(""));
    }
}
