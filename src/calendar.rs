//! Pure calendar arithmetic used by the day-of-month/day-of-week matching
//! logic in [`crate::pattern::CronPattern`] and by the temporal search
//! engine in [`crate::Cron`].
//!
//! Every function here is a pure function of `(year, month, day)` integers;
//! none of them touch the clock or consult a time zone.

use chrono::{Datelike, Duration, NaiveDate};

/// Returns `true` if `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in `(year, month)`, `month` in `1..=12`.
///
/// Implemented as "first day of next month minus one day" so the leap-year
/// rule for February only has to live in [`is_leap_year`].
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("month is in 1..=12 after normalization");
    let last_of_this = first_of_next - Duration::days(1);
    last_of_this.day()
}

/// Day of week for `(year, month, day)`, `Mon = 1 .. Sun = 7`.
///
/// Returns `None` if the date doesn't exist (e.g. February 30th).
pub fn day_of_week(year: i32, month: u32, day: u32) -> Option<u32> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.weekday().number_from_monday())
}

/// The weekday (`Mon = 1 .. Sun = 7`) nearest `day` within `(year, month)`,
/// implementing the cron `W` modifier.
///
/// The search never leaves the month: if `day` is a Saturday, the
/// preceding Friday is preferred unless that would leave the month, in
/// which case the following Monday is used instead (and symmetrically for
/// Sunday). `day` itself is clamped to the last day of the month before the
/// rule is applied, so `31W` behaves correctly in a 30-day month.
pub fn nearest_workday(year: i32, month: u32, day: u32) -> u32 {
    let last_day = days_in_month(year, month);
    let day = day.min(last_day);
    let weekday = day_of_week(year, month, day).expect("day clamped into the month");

    match weekday {
        6 => {
            // Saturday: prefer the previous day, unless that's day 0.
            if day > 1 {
                day - 1
            } else {
                (day + 2).min(last_day)
            }
        }
        7 => {
            // Sunday: prefer the next day, unless that would leave the month.
            if day < last_day {
                day + 1
            } else {
                day - 2
            }
        }
        _ => day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn days_in_month_matches_calendar() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn day_of_week_monday_is_one() {
        // 2024-01-01 is a Monday.
        assert_eq!(day_of_week(2024, 1, 1), Some(1));
        // 2024-01-07 is a Sunday.
        assert_eq!(day_of_week(2024, 1, 7), Some(7));
    }

    #[test]
    fn nearest_workday_weekday_is_itself() {
        // 2024-01-03 is a Wednesday.
        assert_eq!(nearest_workday(2024, 1, 3), 3);
    }

    #[test]
    fn nearest_workday_saturday_moves_back() {
        // 2013-03-02 is a Saturday; nearest workday within March is the 1st.
        assert_eq!(nearest_workday(2013, 3, 2), 1);
    }

    #[test]
    fn nearest_workday_does_not_cross_month_start() {
        // If the 1st of a month is a Saturday, moving back would leave the
        // month, so the rule must move forward to the Monday instead.
        // 2022-01-01 is a Saturday.
        assert_eq!(nearest_workday(2022, 1, 1), 3);
    }

    #[test]
    fn nearest_workday_does_not_cross_month_end() {
        // If the last day of the month is a Sunday, moving forward would
        // leave the month, so the rule must move back to the Friday.
        // 2023-10-01 is a Sunday... use a month whose LAST day is Sunday:
        // 2023-10-29 is a Sunday but not month end. Use 2024-09-29 (Sunday,
        // month end is the 30th though); pick a genuine case: 2023-12-31 is
        // a Sunday and is the last day of December.
        assert_eq!(nearest_workday(2023, 12, 31), 29);
    }

    #[test]
    fn nearest_workday_clips_past_end_of_month() {
        // April has 30 days; asking for the workday nearest the 31st should
        // clamp to the 30th first.
        assert_eq!(nearest_workday(2023, 4, 31), nearest_workday(2023, 4, 30));
    }
}
