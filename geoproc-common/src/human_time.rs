//! Human-readable duration formatting
//!
//! Uptime fields in the service APIs are rendered in the compact unit-suffixed
//! style clients already parse (`1h2m3.5s`, `750ms`, `0s`).

use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Format a duration as a compact, unit-suffixed string.
///
/// Sub-second durations use the largest unit that keeps the integer part
/// non-zero (`ns`, `µs`, `ms`). Longer durations are written as hours,
/// minutes and fractional seconds, omitting leading zero units. Fractional
/// digits never carry trailing zeros.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use geoproc_common::human_time::format_duration;
///
/// assert_eq!(format_duration(Duration::ZERO), "0s");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
/// assert_eq!(format_duration(Duration::from_secs(3600)), "1h0m0s");
/// assert_eq!(format_duration(Duration::from_micros(2500)), "2.5ms");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{}ns", nanos);
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", with_fraction(nanos, NANOS_PER_MICRO, 3));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", with_fraction(nanos, NANOS_PER_MILLI, 6));
    }

    let total_secs = nanos / NANOS_PER_SEC;
    let sub_sec_nanos = nanos % NANOS_PER_SEC;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if total_secs >= 60 {
        out.push_str(&format!("{}m", minutes));
    }
    let secs_nanos = secs * NANOS_PER_SEC + sub_sec_nanos;
    out.push_str(&with_fraction(secs_nanos, NANOS_PER_SEC, 9));
    out.push('s');
    out
}

/// Render `value / unit` with up to `digits` fractional digits, trailing
/// zeros trimmed.
fn with_fraction(value: u128, unit: u128, digits: usize) -> String {
    let whole = value / unit;
    let rem = value % unit;
    if rem == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", rem, width = digits);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
    }

    #[test]
    fn test_sub_second_units() {
        assert_eq!(format_duration(Duration::from_nanos(999)), "999ns");
        assert_eq!(format_duration(Duration::from_nanos(1_500)), "1.5µs");
        assert_eq!(format_duration(Duration::from_micros(250)), "250µs");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_nanos(1_234_567)), "1.234567ms");
    }

    #[test]
    fn test_seconds_with_fraction() {
        assert_eq!(format_duration(Duration::from_secs(1)), "1s");
        assert_eq!(format_duration(Duration::from_millis(2_250)), "2.25s");
        assert_eq!(format_duration(Duration::new(2, 1)), "2.000000001s");
        assert_eq!(format_duration(Duration::from_secs(59)), "59s");
    }

    #[test]
    fn test_minutes_and_hours() {
        assert_eq!(format_duration(Duration::from_secs(60)), "1m0s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h1m1s");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h0m0s");
        assert_eq!(format_duration(Duration::from_millis(7_384_500)), "2h3m4.5s");
    }

    #[test]
    fn test_long_uptime() {
        // Hours are not rolled up into days
        assert_eq!(format_duration(Duration::from_secs(90_000)), "25h0m0s");
    }
}
