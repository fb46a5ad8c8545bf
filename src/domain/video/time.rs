// SPDX-License-Identifier: MPL-2.0
//! Millisecond time helpers shared by the transport and its display.

use crate::config::defaults::MAX_DISPLAY_HOURS;

/// Microseconds per millisecond.
const MICROS_PER_MILLI: i64 = 1_000;

/// Formats a position as `MM:SS`, or `HH:MM:SS` from one hour on.
///
/// Negative input is shown as zero and hours stop at 99.
///
/// # Examples
///
/// ```
/// use reelplay::domain::video::format_time_ms;
///
/// assert_eq!(format_time_ms(61_000), "01:01");
/// assert_eq!(format_time_ms(3_661_000), "01:01:01");
/// ```
#[must_use]
pub fn format_time_ms(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = (total_secs / 3600).min(MAX_DISPLAY_HOURS);

    if hours > 0 {
        format!("{hours:02}:{mins:02}:{secs:02}")
    } else {
        format!("{mins:02}:{secs:02}")
    }
}

/// Converts a container duration in `AV_TIME_BASE` units (microseconds) to
/// milliseconds, mapping unknown or negative values to 0.
#[must_use]
pub fn duration_ms_from_micros(micros: i64) -> i64 {
    if micros > 0 {
        micros / MICROS_PER_MILLI
    } else {
        0
    }
}

/// Clamps a position into `[0, duration_ms]`, or to `[0, ∞)` when the
/// duration is unknown (zero).
#[must_use]
pub fn clamp_position_ms(position_ms: i64, duration_ms: i64) -> i64 {
    let position = position_ms.max(0);
    if duration_ms > 0 {
        position.min(duration_ms)
    } else {
        position
    }
}
