//! Shared helpers for CLI commands.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use bb_core::midnight_instant;

/// The instant anchoring the requested day: local midnight in `tz` for an
/// explicit date, the current moment otherwise.
pub fn target_instant(date: Option<NaiveDate>, tz: Tz) -> DateTime<Utc> {
    date.map_or_else(Utc::now, |date| midnight_instant(date, tz))
}

/// Renders a day header date like `Saturday, Mar 1, 2025`.
pub fn format_day(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format("%A, %b %-d, %Y")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_date_maps_to_local_midnight() {
        let tz: Tz = "Asia/Tokyo".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let instant = target_instant(Some(date), tz);
        let expected: DateTime<Utc> = "2025-02-28T15:00:00Z".parse().unwrap();
        assert_eq!(instant, expected);
    }

    #[test]
    fn no_date_means_now() {
        let before = Utc::now();
        let instant = target_instant(None, Tz::UTC);
        assert!(instant >= before && instant <= Utc::now());
    }

    #[test]
    fn day_header_renders_in_the_target_zone() {
        let tz: Tz = "Asia/Tokyo".parse().unwrap();
        // 20:00 UTC is already the next day in Tokyo.
        let instant: DateTime<Utc> = "2025-02-28T20:00:00Z".parse().unwrap();
        assert_eq!(format_day(instant, tz), "Saturday, Mar 1, 2025");
    }
}
