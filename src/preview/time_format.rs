// SPDX-License-Identifier: MPL-2.0
//! Timestamp formatting for scrub bars and position readouts.

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3600;
const TEN_MINUTES: f64 = 600.0;
const ONE_HOUR: f64 = 3600.0;

/// Formats `seconds` with a layout chosen from the media `duration`.
///
/// - `H:MM:SS` when the duration is at least one hour
/// - `MM:SS` when the duration is at least ten minutes
/// - `M:SS` otherwise
///
/// Using the duration keeps the width stable while the position advances.
/// Non-finite positions render as `--:--`; negative ones clamp to zero.
///
/// # Examples
///
/// ```
/// use preview_coord::preview::format_timestamp;
///
/// assert_eq!(format_timestamp(65.0, 120.0), "1:05");
/// assert_eq!(format_timestamp(65.0, 900.0), "01:05");
/// assert_eq!(format_timestamp(65.0, 7200.0), "0:01:05");
/// ```
#[must_use]
pub fn format_timestamp(seconds: f64, duration: f64) -> String {
    if !seconds.is_finite() {
        return "--:--".to_string();
    }

    let total_secs = seconds.max(0.0) as u64;
    let hours = total_secs / SECS_PER_HOUR;
    let minutes = (total_secs % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let secs = total_secs % SECS_PER_MINUTE;

    if duration >= ONE_HOUR || hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else if duration >= TEN_MINUTES {
        format!("{:02}:{:02}", minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_media_uses_single_digit_minutes() {
        assert_eq!(format_timestamp(0.0, 30.0), "0:00");
        assert_eq!(format_timestamp(45.4, 59.0), "0:45");
        assert_eq!(format_timestamp(125.0, 300.0), "2:05");
    }

    #[test]
    fn medium_media_pads_minutes() {
        assert_eq!(format_timestamp(5.0, 600.0), "00:05");
        assert_eq!(format_timestamp(599.0, 1800.0), "09:59");
    }

    #[test]
    fn long_media_shows_hours() {
        assert_eq!(format_timestamp(3665.0, 3600.0), "1:01:05");
        assert_eq!(format_timestamp(0.0, 5400.0), "0:00:00");
    }

    #[test]
    fn position_past_an_hour_shows_hours_even_with_unknown_duration() {
        assert_eq!(format_timestamp(3661.0, f64::NAN), "1:01:01");
    }

    #[test]
    fn handles_negative_and_non_finite() {
        // Negative time should be clamped to 0
        assert_eq!(format_timestamp(-10.0, 60.0), "0:00");
        assert_eq!(format_timestamp(f64::NAN, 60.0), "--:--");
        assert_eq!(format_timestamp(f64::INFINITY, 60.0), "--:--");
    }
}
