//! Local calendar day boundaries for arbitrary IANA timezones.
//!
//! All instants are UTC; a "day" is the `[00:00:00.000, 23:59:59.999]` window
//! of a calendar date as observed in a given timezone. Summaries and
//! projections clip against these windows, so they must come from real
//! timezone-aware conversion, never fixed-offset arithmetic.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Offset from local midnight to the last millisecond of the same date.
///
/// The window spans a fixed 24 hours regardless of DST, so on a 23- or
/// 25-hour transition day the end lands up to an hour off the true next
/// midnight.
const DAY_END_OFFSET_MS: i64 = 86_399_999;

/// Time and timezone errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// The timezone identifier was not a known IANA name.
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// Parses an IANA timezone identifier.
///
/// Callers that get user- or environment-supplied names should fall back to
/// `Tz::UTC` on error rather than failing the operation.
pub fn resolve_timezone(name: &str) -> Result<Tz, TimeError> {
    name.parse()
        .map_err(|_| TimeError::InvalidTimezone(name.to_string()))
}

/// Converts a calendar date at local midnight in `tz` to the UTC instant.
///
/// DST ambiguity (fall-back crossing midnight) resolves to the earlier
/// instant; a spring-forward gap at midnight falls forward to the first
/// hour that exists on that date.
fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => tz
            .from_local_datetime(&(midnight + Duration::hours(1)))
            .earliest()
            .map_or_else(|| midnight.and_utc(), |dt| dt.with_timezone(&Utc)),
    }
}

/// The instant of `00:00:00.000` of the calendar date that `instant` falls
/// on as observed in `tz`.
pub fn start_of_local_day(instant: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    local_midnight(instant.with_timezone(&tz).date_naive(), tz)
}

/// The last millisecond of the calendar date that `instant` falls on as
/// observed in `tz`.
pub fn end_of_local_day(instant: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    start_of_local_day(instant, tz) + Duration::milliseconds(DAY_END_OFFSET_MS)
}

/// The local-midnight instant for an explicit calendar date in `tz`.
///
/// Used by collaborators that take a `YYYY-MM-DD` argument and need an
/// instant inside that day.
pub fn midnight_instant(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    local_midnight(date, tz)
}

/// One local calendar day expressed as an inclusive instant range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// The window of the day that `instant` falls on in `tz`.
    pub fn containing(instant: DateTime<Utc>, tz: Tz) -> Self {
        let start = start_of_local_day(instant, tz);
        Self {
            start,
            end: start + Duration::milliseconds(DAY_END_OFFSET_MS),
        }
    }

    /// Whether `instant` lies inside the window, both ends inclusive.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn resolves_known_timezones() {
        assert!(resolve_timezone("Asia/Tokyo").is_ok());
        assert!(resolve_timezone("UTC").is_ok());
        assert_eq!(
            resolve_timezone("Not/AZone"),
            Err(TimeError::InvalidTimezone("Not/AZone".to_string()))
        );
    }

    #[test]
    fn utc_day_boundaries() {
        let t = utc("2025-06-01T12:34:56Z");
        assert_eq!(start_of_local_day(t, Tz::UTC), utc("2025-06-01T00:00:00Z"));
        assert_eq!(
            end_of_local_day(t, Tz::UTC),
            utc("2025-06-01T23:59:59.999Z")
        );
    }

    #[test]
    fn positive_offset_shifts_the_date() {
        // 20:00 UTC is already Jan 16 in Tokyo (UTC+9).
        let tz = resolve_timezone("Asia/Tokyo").unwrap();
        let t = utc("2025-01-15T20:00:00Z");
        assert_eq!(start_of_local_day(t, tz), utc("2025-01-15T15:00:00Z"));
    }

    #[test]
    fn non_hour_offset_is_exact() {
        // Kathmandu is UTC+5:45.
        let tz = resolve_timezone("Asia/Kathmandu").unwrap();
        let t = utc("2025-01-15T12:00:00Z");
        assert_eq!(start_of_local_day(t, tz), utc("2025-01-14T18:15:00Z"));
    }

    #[test]
    fn ambiguous_midnight_picks_earlier_instant() {
        // Havana falls back at 01:00 on 2024-11-03, so local midnight
        // occurs twice: 04:00Z (CDT) and 05:00Z (CST).
        let tz = resolve_timezone("America/Havana").unwrap();
        let t = utc("2024-11-03T15:00:00Z");
        assert_eq!(start_of_local_day(t, tz), utc("2024-11-03T04:00:00Z"));
    }

    #[test]
    fn missing_midnight_falls_forward() {
        // Santiago springs forward at midnight on 2024-09-08; the day
        // starts at 01:00 local instead.
        let tz = resolve_timezone("America/Santiago").unwrap();
        let t = utc("2024-09-08T12:00:00Z");
        assert_eq!(start_of_local_day(t, tz), utc("2024-09-08T04:00:00Z"));
    }

    #[test]
    fn window_always_contains_the_instant() {
        let zones = ["UTC", "Asia/Tokyo", "America/New_York", "Pacific/Kiritimati"];
        let instants = [
            utc("2025-01-15T00:00:00Z"),
            utc("2025-03-09T18:00:00Z"), // US spring-forward day
            utc("2025-11-02T06:30:00Z"), // US fall-back day
            utc("2025-12-31T23:59:59.999Z"),
        ];
        for zone in zones {
            let tz = resolve_timezone(zone).unwrap();
            for t in instants {
                let window = DayWindow::containing(t, tz);
                assert!(window.contains(t), "{zone} window must contain {t}");
                assert_eq!(
                    (window.end - window.start).num_milliseconds(),
                    86_399_999,
                    "{zone} window must span a fixed day"
                );
            }
        }
    }

    #[test]
    fn window_edges_are_inclusive() {
        let window = DayWindow::containing(utc("2025-06-01T12:00:00Z"), Tz::UTC);
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(window.end + Duration::milliseconds(1)));
        assert!(!window.contains(window.start - Duration::milliseconds(1)));
    }

    #[test]
    fn midnight_instant_matches_start_of_day() {
        let tz = resolve_timezone("Asia/Tokyo").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();
        let midnight = midnight_instant(date, tz);
        assert_eq!(midnight, utc("2025-01-15T15:00:00Z"));
        assert_eq!(start_of_local_day(midnight, tz), midnight);
    }
}
