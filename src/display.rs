//! Formatting helpers for match listings.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};

/// Long kickoff format, e.g. `Saturday, June 14th, 21:00`.
#[must_use]
pub fn calendar(when: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = when.with_timezone(&offset);
    format!(
        "{}, {} {}{}, {}",
        local.format("%A"),
        local.format("%B"),
        local.day(),
        ordinal_suffix(local.day()),
        local.format("%-H:%M")
    )
}

/// Short kickoff format, e.g. `Jun 14, 21:00`.
#[must_use]
pub fn calendar_short(when: DateTime<Utc>, offset: FixedOffset) -> String {
    when.with_timezone(&offset)
        .format("%b %-d, %-H:%M")
        .to_string()
}

/// Whether betting on a match has closed.
#[must_use]
pub fn expired(kickoff: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= kickoff
}

#[must_use]
pub fn to_fixed1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Builds the display offset from minutes east of UTC, falling back to UTC.
#[must_use]
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc() -> FixedOffset {
        offset_from_minutes(0)
    }

    #[test]
    fn test_calendar() {
        let when = Utc.with_ymd_and_hms(2024, 6, 14, 21, 0, 0).unwrap();
        assert_eq!(calendar(when, utc()), "Friday, June 14th, 21:00");

        let when = Utc.with_ymd_and_hms(2024, 6, 1, 9, 5, 0).unwrap();
        assert_eq!(calendar(when, utc()), "Saturday, June 1st, 9:05");
    }

    #[test]
    fn test_calendar_applies_offset() {
        let when = Utc.with_ymd_and_hms(2024, 6, 14, 23, 30, 0).unwrap();
        let cest = offset_from_minutes(120);
        assert_eq!(calendar(when, cest), "Saturday, June 15th, 1:30");
    }

    #[test]
    fn test_calendar_short() {
        let when = Utc.with_ymd_and_hms(2024, 7, 3, 18, 0, 0).unwrap();
        assert_eq!(calendar_short(when, utc()), "Jul 3, 18:00");
    }

    #[test]
    fn test_ordinal_suffix() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (30, "th"),
            (31, "st"),
        ];
        for (day, suffix) in cases {
            assert_eq!(ordinal_suffix(day), suffix, "day {day}");
        }
    }

    #[test]
    fn test_expired() {
        let kickoff = Utc.with_ymd_and_hms(2024, 6, 14, 21, 0, 0).unwrap();
        assert!(!expired(kickoff, kickoff - chrono::Duration::seconds(1)));
        assert!(expired(kickoff, kickoff));
        assert!(expired(kickoff, kickoff + chrono::Duration::minutes(5)));
    }

    #[test]
    fn test_to_fixed1() {
        assert!((to_fixed1(1.25) - 1.3).abs() < f64::EPSILON);
        assert!((to_fixed1(2.0 / 3.0) - 0.7).abs() < f64::EPSILON);
        assert!((to_fixed1(0.0)).abs() < f64::EPSILON);
    }
}
