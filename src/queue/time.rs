/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Local-day arithmetic over caller-supplied millisecond timestamps.

use super::types::Timestamp;
use chrono::{DateTime, FixedOffset, NaiveTime, Offset, TimeZone, Utc};

/// Milliseconds in one calendar day.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Largest accepted distance from UTC, in minutes.
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Builds a fixed UTC offset from minutes east of Greenwich.
///
/// Returns `None` outside ±14h.
#[must_use]
pub fn utc_offset(offset_minutes: i32) -> Option<FixedOffset> {
    if offset_minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES.unsigned_abs() {
        return None;
    }
    FixedOffset::east_opt(offset_minutes * 60)
}

/// Returns the instant of local midnight that starts the day containing `now`.
///
/// # Examples
///
/// ```
/// use turnqueue::queue::time::start_of_day;
///
/// // 1970-01-02T10:00:00Z
/// let now = 86_400_000 + 10 * 3_600_000;
/// assert_eq!(start_of_day(now, 0), 86_400_000);
/// // Same instant seen from UTC-03:00 is still 07:00 on the same local day.
/// assert_eq!(start_of_day(now, -180), 86_400_000 + 3 * 3_600_000);
/// ```
#[must_use]
pub fn start_of_day(now: Timestamp, offset_minutes: i32) -> Timestamp {
    let local_midnight = utc_offset(offset_minutes).and_then(|offset| {
        let instant = DateTime::from_timestamp_millis(now)?.with_timezone(&offset);
        let midnight = instant.date_naive().and_time(NaiveTime::MIN);
        offset
            .from_local_datetime(&midnight)
            .single()
            .map(|dt| dt.timestamp_millis())
    });

    // Out-of-range inputs fall back to the UTC day boundary.
    local_midnight.unwrap_or_else(|| now.saturating_sub(now.rem_euclid(MILLIS_PER_DAY)))
}

/// Renders a timestamp as `HH:MM:SS - DD/MM/YYYY` in the given offset.
///
/// # Examples
///
/// ```
/// use turnqueue::queue::time::format_timestamp;
///
/// assert_eq!(format_timestamp(0, 0), "00:00:00 - 01/01/1970");
/// assert_eq!(format_timestamp(0, 60), "01:00:00 - 01/01/1970");
/// ```
#[must_use]
pub fn format_timestamp(ts: Timestamp, offset_minutes: i32) -> String {
    let offset = utc_offset(offset_minutes).unwrap_or_else(|| Utc.fix());
    match DateTime::from_timestamp_millis(ts) {
        Some(dt) => dt
            .with_timezone(&offset)
            .format("%H:%M:%S - %d/%m/%Y")
            .to_string(),
        None => ts.to_string(),
    }
}
