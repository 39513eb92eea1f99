//! # Cronstead
//!
//! Cronstead is a fully-featured, lightweight, and efficient Rust library designed for parsing and evaluating cron patterns.
//!
//! ## Features
//! - Parses a wide range of cron expressions, including extended formats.
//! - Evaluates cron patterns to calculate upcoming and previous execution times.
//! - Supports time zone-aware scheduling.
//! - Offers granularity up to seconds for precise task scheduling.
//! - An optional trailing year field for bounding a schedule to a fixed range of calendar years.
//! - Compatible with the `chrono` library for dealing with date and time in Rust.
//!
//! ## Crate Features
//! - `serde`: Enables [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html) and
//!   [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) implementations for
//!   [`Cron`](struct.Cron.html). This feature is disabled by default.
//!
//! ## Example
//! The following example demonstrates how to use Cronstead to parse a cron expression and find the next and previous occurrences.
//!
//! ```rust
//! use chrono::Utc;
//! use cronstead::Cron;
//!
//! // Parse a cron expression to find occurrences at 00:00 on Friday
//! let cron = Cron::new("0 0 * * FRI").parse().expect("Successful parsing");
//! let now = Utc::now();
//!
//! // Get the next occurrence from the current time
//! let next = cron.find_next_occurrence(&now, false).unwrap();
//!
//! // Get the previous occurrence from the current time
//! let previous = cron.find_previous_occurrence(&now, false).unwrap();
//!
//! println!(
//!     "Pattern \"{}\" will match next at {}",
//!     cron.pattern.to_string(),
//!     next
//! );
//!
//! println!(
//!     "Pattern \"{}\" matched previously at {}",
//!     cron.pattern.to_string(),
//!     previous
//! );
//! ```
//!
//! In this example, `Cron::new("0 0 * * FRI")` creates a new Cron instance for the pattern that represents every Friday at midnight. The `find_next_occurrence` method calculates the next time this pattern will be true from the current moment.
//!
//! The `false` argument in `find_next_occurrence` specifies that the current time is not included in the calculation, ensuring that only future occurrences are considered.
//!
//! ## Getting Started
//! To start using Cronstead, add it to your project's `Cargo.toml` and follow the examples to integrate cron pattern parsing and scheduling into your application.
//!
//! ## Pattern
//!
//! The expressions used by Cronstead are very similar to those of Vixie Cron, but with
//! a few additions as outlined below:
//!
//! ```javascript
//! // ┌──────────────── (optional) second (0 - 59)
//! // │ ┌────────────── minute (0 - 59)
//! // │ │ ┌──────────── hour (0 - 23)
//! // │ │ │ ┌────────── day of month (1 - 31)
//! // │ │ │ │ ┌──────── month (1 - 12, JAN-DEC)
//! // │ │ │ │ │ ┌────── day of week (0 - 6, SUN-Mon)
//! // │ │ │ │ │ │       (0 to 6 are Sunday to Saturday; 7 is Sunday, the same as 0)
//! // │ │ │ │ │ │ ┌──── (optional) year (1970 - 5000)
//! // │ │ │ │ │ │ │
//! // * * * * * * *
//! ```
//!
//! | Field        | Required | Allowed values    | Allowed special characters | Remarks                                                                                         |
//! |--------------|----------|-------------------|----------------------------|-------------------------------------------------------------------------------------------------|
//! | Seconds      | Optional | 0-59              | * , - / ?                  |                                                                                                 |
//! | Minutes      | Yes      | 0-59              | * , - / ?                  |                                                                                                 |
//! | Hours        | Yes      | 0-23              | * , - / ?                  |                                                                                                 |
//! | Day of Month | Yes      | 1-31              | * , - / ? L W              |                                                                                                 |
//! | Month        | Yes      | 1-12 or JAN-DEC   | * , - / ?                  |                                                                                                 |
//! | Day of Week  | Yes      | 0-7 or SUN-MON    | * , - / ? # L              | 0 to 6 are Sunday to Saturday, 7 is Sunday, the same as 0. '#' is used to specify the nth weekday |
//! | Year         | Optional | 1970-5000         | * , - /                    |                                                                                                 |
//!
//! For more information, refer to the full [README](https://github.com/hexagon/cronstead-rust).

pub mod errors;
pub mod parser;

mod calendar;
mod component;
mod iterator;
mod pattern;
mod year;

// Enum to specify the direction of time search, defined locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}
#[derive(PartialEq, Eq, Ord, PartialOrd, Hash, Clone, Copy, Debug)]
pub enum TimeComponent {
    Second = 1,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}
use errors::CronError;
pub use iterator::CronIterator;
use parser::CronParser;
use pattern::{CronPattern, Seconds, Years};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike};

#[cfg(feature = "serde")]
use core::fmt;
#[cfg(feature = "serde")]
use serde::{
    de::{self, Visitor},
    Deserialize, Serialize, Serializer,
};

// The Cron struct represents a cron schedule and provides methods to parse cron strings,
// check if a datetime matches the cron pattern, and find the next occurrence.
//
// `seconds`/`years`/`dom_and_dow`/`alternative_weekdays` are pending configuration, set by
// the `with_*` builder methods before `parse()` is called; once compiled they only matter
// to a subsequent re-parse, so equality/ordering/hashing is delegated entirely to `pattern`.
#[derive(Debug, Clone)]
pub struct Cron {
    pub pattern: CronPattern, // Parsed cron pattern
    seconds: Seconds,
    years: Years,
    dom_and_dow: bool,
    alternative_weekdays: bool,
}

impl Cron {
    // Constructor to create a new instance of Cron with default settings
    pub fn new(cron_string: &str) -> Self {
        Self {
            pattern: CronPattern::placeholder(cron_string),
            seconds: Seconds::default(),
            years: Years::default(),
            dom_and_dow: false,
            alternative_weekdays: false,
        }
    }

    /// Constructs a `Cron` directly from an already-compiled pattern, with no pending
    /// configuration left to apply. Used by [`CronParser::parse`] so both entry points
    /// return the same kind of value.
    pub(crate) fn from_pattern(pattern: CronPattern) -> Self {
        Cron {
            pattern,
            seconds: Seconds::default(),
            years: Years::default(),
            dom_and_dow: false,
            alternative_weekdays: false,
        }
    }

    // Tries to parse a given cron string into a Cron instance.
    pub fn parse(&mut self) -> Result<Cron, CronError> {
        let compiled = pattern::compile(
            self.pattern.raw(),
            self.seconds,
            self.years,
            self.dom_and_dow,
            self.alternative_weekdays,
        )?;
        self.pattern = compiled;
        Ok(self.clone())
    }

    /// Parses a cron string with the default [`CronParser`], panicking with the
    /// [`CronError`]'s message on failure.
    ///
    /// # Panics
    ///
    /// Panics if `cron_string` is not a valid cron pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use cronstead::Cron;
    ///
    /// let cron = Cron::must_parse("0 0 * * FRI");
    /// assert_eq!(cron.to_string(), "0 0 * * 5");
    /// ```
    pub fn must_parse(cron_string: &str) -> Cron {
        match CronParser::new().parse(cron_string) {
            Ok(cron) => cron,
            Err(err) => panic!("{err}"),
        }
    }

    /// Evaluates if a given `DateTime` matches the cron pattern.
    ///
    /// The function checks each cron field (seconds, minutes, hours, day of month, month) against
    /// the provided `DateTime` to determine if it aligns with the cron pattern. Each field is
    /// checked for a match, and all fields must match for the entire pattern to be considered
    /// a match.
    ///
    /// # Parameters
    ///
    /// - `time`: A reference to the `DateTime<Tz>` to be checked against the cron pattern.
    ///
    /// # Returns
    ///
    /// - `Ok(bool)`: `true` if `time` matches the cron pattern, `false` otherwise.
    /// - `Err(CronError)`: An error if there is a problem checking any of the pattern fields
    ///   against the provided `DateTime`.
    ///
    /// # Errors
    ///
    /// This method may return `CronError` if an error occurs during the evaluation of the
    /// cron pattern fields. Errors can occur due to invalid bit operations or invalid dates.
    ///
    /// # Examples
    ///
    /// ```
    /// use cronstead::Cron;
    /// use chrono::Utc;
    ///
    /// // Parse cron expression
    /// let cron: Cron = Cron::new("* * * * *").parse().expect("Couldn't parse cron string");
    ///
    /// // Compare to time now
    /// let time = Utc::now();
    /// let matches_all = cron.is_time_matching(&time).unwrap();
    ///
    /// // Output results
    /// println!("Time is: {}", time);
    /// println!(
    ///     "Pattern \"{}\" does {} time {}",
    ///     cron.pattern.to_string(),
    ///     if matches_all { "match" } else { "not match" },
    ///     time
    /// );
    /// ```
    pub fn is_time_matching<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> Result<bool, CronError> {
        let naive_time = time.naive_local();
        Ok(self.pattern.second_match(naive_time.second())?
            && self.pattern.minute_match(naive_time.minute())?
            && self.pattern.hour_match(naive_time.hour())?
            && self
                .pattern
                .day_match(naive_time.year(), naive_time.month(), naive_time.day())?
            && self.pattern.month_match(naive_time.month())?
            && self.pattern.year_match(naive_time.year()))
    }

    /// Finds the next occurrence of a scheduled time that matches the cron pattern.
    /// starting from a given `start_time`. If `inclusive` is `true`, the search includes the
    /// `start_time`; otherwise, it starts from the next second.
    ///
    /// This method performs a search through time, beginning at `start_time`, to find the
    /// next date and time that aligns with the cron pattern defined within the `Cron` instance.
    /// The search respects cron fields (seconds, minutes, hours, day of month, month, day of week,
    /// year) and iterates through time until a match is found or an error occurs.
    ///
    /// # Parameters
    ///
    /// - `start_time`: A reference to a `DateTime<Tz>` indicating the start time for the search.
    /// - `inclusive`: A `bool` that specifies whether the search should include `start_time` itself.
    ///
    /// # Returns
    ///
    /// - `Ok(DateTime<Tz>)`: The next occurrence that matches the cron pattern.
    /// - `Err(CronError)`: An error if the next occurrence cannot be found within a reasonable
    ///   limit, if any of the date/time manipulations result in an invalid date, or if the
    ///   cron pattern match fails.
    ///
    /// # Errors
    ///
    /// - `CronError::InvalidTime`: If the start time provided is invalid or adjustments to the
    ///   time result in an invalid date/time.
    /// - `CronError::TimeSearchLimitExceeded`: If the search exceeds a reasonable time limit.
    ///   This prevents infinite loops in case of patterns that cannot be matched.
    /// - Other errors as defined by the `CronError` enum may occur if the pattern match fails
    ///   at any stage of the search.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use cronstead::Cron;
    ///
    /// // Parse cron expression
    /// let cron: Cron = Cron::new("0 18 * * * 5").with_seconds_required().parse().expect("Success");
    ///
    /// // Get next match
    /// let time = Utc::now();
    /// let next = cron.find_next_occurrence(&time, false).unwrap();
    ///
    /// println!(
    ///     "Pattern \"{}\" will match next time at {}",
    ///     cron.pattern.to_string(),
    ///     next
    /// );
    /// ```
    pub fn find_next_occurrence<Tz: TimeZone>(
        &self,
        start_time: &DateTime<Tz>,
        inclusive: bool,
    ) -> Result<DateTime<Tz>, CronError> {
        self.find_occurrence(start_time, inclusive, Direction::Forward)
    }

    /// Finds the previous occurrence of a scheduled time that matches the cron pattern.
    pub fn find_previous_occurrence<Tz: TimeZone>(
        &self,
        start_time: &DateTime<Tz>,
        inclusive: bool,
    ) -> Result<DateTime<Tz>, CronError> {
        self.find_occurrence(start_time, inclusive, Direction::Backward)
    }

    /// Collects up to `n` occurrences strictly after `start_time`, in chronological order.
    ///
    /// Stops early, returning a shorter `Vec`, if the pattern's year bound is exhausted
    /// before `n` matches are found. `n == 0` returns an empty vector without searching.
    pub fn next_n<Tz: TimeZone>(&self, start_time: &DateTime<Tz>, n: usize) -> Vec<DateTime<Tz>> {
        if n == 0 {
            return Vec::new();
        }
        self.iter_after(start_time.clone()).take(n).collect()
    }

    /// Collects up to `n` occurrences strictly before `start_time`, in reverse
    /// chronological order (most recent first).
    ///
    /// Stops early, returning a shorter `Vec`, if the pattern's year bound is exhausted
    /// before `n` matches are found. `n == 0` returns an empty vector without searching.
    pub fn last_n<Tz: TimeZone>(&self, start_time: &DateTime<Tz>, n: usize) -> Vec<DateTime<Tz>> {
        if n == 0 {
            return Vec::new();
        }
        self.iter_before(start_time.clone()).take(n).collect()
    }

    /// The main generic search function.
    pub(crate) fn find_occurrence<Tz: TimeZone>(
        &self,
        start_time: &DateTime<Tz>,
        inclusive: bool,
        direction: Direction,
    ) -> Result<DateTime<Tz>, CronError> {
        let mut naive_time = start_time.naive_local();
        let timezone = start_time.timezone();

        if !inclusive {
            let adjustment = match direction {
                Direction::Forward => Duration::seconds(1),
                Direction::Backward => Duration::seconds(-1),
            };
            naive_time = naive_time
                .checked_add_signed(adjustment)
                .ok_or(CronError::InvalidTime)?;
        }

        loop {
            let mut updated = false;
            updated |= self.find_matching_year_component(&mut naive_time, direction)?;
            updated |= self.find_matching_date_component(
                &mut naive_time,
                direction,
                TimeComponent::Month,
            )?;
            updated |=
                self.find_matching_date_component(&mut naive_time, direction, TimeComponent::Day)?;
            updated |= self.find_matching_granular_component(
                &mut naive_time,
                direction,
                TimeComponent::Hour,
            )?;
            updated |= self.find_matching_granular_component(
                &mut naive_time,
                direction,
                TimeComponent::Minute,
            )?;
            updated |= self.find_matching_granular_component(
                &mut naive_time,
                direction,
                TimeComponent::Second,
            )?;

            if updated {
                continue;
            }

            let (tz_datetime, was_adjusted) = from_naive(naive_time, &timezone)?;
            if self.is_time_matching(&tz_datetime)? || was_adjusted {
                return Ok(tz_datetime);
            } else {
                return Err(CronError::TimeSearchLimitExceeded);
            }
        }
    }

    /// Creates a `CronIterator` starting from the specified time.
    ///
    /// The search can be performed forwards or backwards in time.
    ///
    /// # Arguments
    ///
    /// * `start_from` - A `DateTime<Tz>` that represents the starting point for the iterator.
    /// * `direction` - A `Direction` to specify the search direction.
    ///
    /// # Returns
    ///
    /// Returns a `CronIterator<Tz>` that can be used to iterate over scheduled times.
    pub fn iter_from<Tz: TimeZone>(
        &self,
        start_from: DateTime<Tz>,
        direction: Direction,
    ) -> CronIterator<Tz> {
        CronIterator::new(self.clone(), start_from, true, direction)
    }

    /// Creates a `CronIterator` starting after the specified time, in forward direction.
    ///
    /// # Arguments
    ///
    /// * `start_after` - A `DateTime<Tz>` that represents the starting point for the iterator.
    ///
    /// # Returns
    ///
    /// Returns a `CronIterator<Tz>` that can be used to iterate over scheduled times.
    pub fn iter_after<Tz: TimeZone>(&self, start_after: DateTime<Tz>) -> CronIterator<Tz> {
        CronIterator::new(self.clone(), start_after, false, Direction::Forward)
    }

    /// Creates a `CronIterator` starting before the specified time, in backwards direction.
    ///
    /// # Arguments
    ///
    /// * `start_before` - A `DateTime<Tz>` that represents the starting point for the iterator.
    ///
    /// # Returns
    ///
    /// Returns a `CronIterator<Tz>` that can be used to iterate over scheduled times.
    pub fn iter_before<Tz: TimeZone>(&self, start_before: DateTime<Tz>) -> CronIterator<Tz> {
        CronIterator::new(self.clone(), start_before, false, Direction::Backward)
    }

    // TIME MANIPULATION FUNCTIONS

    /// Sets a time component and resets lower-order ones based on direction.
    fn set_time_component(
        current_time: &mut NaiveDateTime,
        component: TimeComponent,
        value: u32,
        direction: Direction,
    ) -> Result<(), CronError> {
        let mut new_time = *current_time;

        new_time = match component {
            TimeComponent::Second => new_time.with_second(value).ok_or(CronError::InvalidTime)?,
            TimeComponent::Minute => new_time.with_minute(value).ok_or(CronError::InvalidTime)?,
            TimeComponent::Hour => new_time.with_hour(value).ok_or(CronError::InvalidTime)?,
            _ => return Err(CronError::InvalidTime),
        };

        match direction {
            Direction::Forward => {
                if component >= TimeComponent::Hour {
                    new_time = new_time.with_minute(0).unwrap();
                }
                if component >= TimeComponent::Minute {
                    new_time = new_time.with_second(0).unwrap();
                }
            }
            Direction::Backward => {
                if component >= TimeComponent::Hour {
                    new_time = new_time.with_minute(59).unwrap();
                }
                if component >= TimeComponent::Minute {
                    new_time = new_time.with_second(59).unwrap();
                }
            }
        }

        *current_time = new_time;
        Ok(())
    }

    /// Adjusts a time component up or down, resetting lower-order ones.
    fn adjust_time_component(
        current_time: &mut NaiveDateTime,
        component: TimeComponent,
        direction: Direction,
    ) -> Result<(), CronError> {
        let limit = match direction {
            Direction::Forward => pattern::YEAR_UPPER_LIMIT,
            Direction::Backward => pattern::YEAR_LOWER_LIMIT,
        };

        if current_time.year() == limit {
            return Err(CronError::TimeSearchLimitExceeded);
        }

        match direction {
            Direction::Forward => {
                let duration = match component {
                    TimeComponent::Minute => Duration::minutes(1),
                    TimeComponent::Hour => Duration::hours(1),
                    TimeComponent::Day => Duration::days(1),
                    TimeComponent::Month => {
                        let mut year = current_time.year();
                        let mut month = current_time.month() + 1;
                        if month > 12 {
                            year += 1;
                            month = 1;
                        }
                        *current_time = NaiveDate::from_ymd_opt(year, month, 1)
                            .ok_or(CronError::InvalidDate)?
                            .and_hms_opt(0, 0, 0)
                            .ok_or(CronError::InvalidTime)?;
                        return Ok(());
                    }
                    _ => return Err(CronError::InvalidTime),
                };
                *current_time = current_time
                    .checked_add_signed(duration)
                    .ok_or(CronError::InvalidTime)?;
                if component >= TimeComponent::Day {
                    *current_time = current_time.with_hour(0).unwrap();
                }
                if component >= TimeComponent::Hour {
                    *current_time = current_time.with_minute(0).unwrap();
                }
                if component >= TimeComponent::Minute {
                    *current_time = current_time.with_second(0).unwrap();
                }
            }
            Direction::Backward => {
                let duration = match component {
                    TimeComponent::Minute => Duration::minutes(1),
                    TimeComponent::Hour => Duration::hours(1),
                    TimeComponent::Day => Duration::days(1),
                    TimeComponent::Month => {
                        let next_month_first_day = NaiveDate::from_ymd_opt(
                            current_time.year(),
                            current_time.month(),
                            1,
                        )
                        .ok_or(CronError::InvalidDate)?;
                        *current_time = (next_month_first_day - Duration::days(1))
                            .and_hms_opt(23, 59, 59)
                            .ok_or(CronError::InvalidTime)?;
                        return Ok(());
                    }
                    _ => return Err(CronError::InvalidTime),
                };
                *current_time = current_time
                    .checked_sub_signed(duration)
                    .ok_or(CronError::InvalidTime)?;
                if component >= TimeComponent::Day {
                    *current_time = current_time.with_hour(23).unwrap();
                }
                if component >= TimeComponent::Hour {
                    *current_time = current_time.with_minute(59).unwrap();
                }
                if component >= TimeComponent::Minute {
                    *current_time = current_time.with_second(59).unwrap();
                }
            }
        }
        Ok(())
    }

    /// Carries `current_time` to the nearest year (in `direction`) that the pattern's
    /// year field allows, jumping straight to that year's first/last instant. The
    /// year field's domain (`pattern::YEAR_LOWER_LIMIT..=pattern::YEAR_UPPER_LIMIT`) is
    /// the ultimate horizon: exhausting it is this search's only way to fail.
    fn find_matching_year_component(
        &self,
        current_time: &mut NaiveDateTime,
        direction: Direction,
    ) -> Result<bool, CronError> {
        let year = current_time.year();
        if self.pattern.year_match(year) {
            return Ok(false);
        }

        let candidate = match direction {
            Direction::Forward => self.pattern.years.succ(year),
            Direction::Backward => self.pattern.years.pred(year),
        }
        .ok_or(CronError::TimeSearchLimitExceeded)?;

        *current_time = match direction {
            Direction::Forward => NaiveDate::from_ymd_opt(candidate, 1, 1)
                .ok_or(CronError::InvalidDate)?
                .and_hms_opt(0, 0, 0)
                .ok_or(CronError::InvalidTime)?,
            Direction::Backward => NaiveDate::from_ymd_opt(candidate, 12, 31)
                .ok_or(CronError::InvalidDate)?
                .and_hms_opt(23, 59, 59)
                .ok_or(CronError::InvalidTime)?,
        };
        Ok(true)
    }

    fn find_matching_date_component(
        &self,
        current_time: &mut NaiveDateTime,
        direction: Direction,
        component: TimeComponent,
    ) -> Result<bool, CronError> {
        let mut changed = false;
        // Loop until the component matches the pattern
        while !(match component {
            TimeComponent::Month => self.pattern.month_match(current_time.month()),
            TimeComponent::Day => self.pattern.day_match(
                current_time.year(),
                current_time.month(),
                current_time.day(),
            ),
            _ => Ok(true), // Should not happen for other components, but this is safe
        })? {
            Self::adjust_time_component(current_time, component, direction)?;
            changed = true;
        }
        Ok(changed)
    }

    /// Consolidated helper for time-based components (Hour, Minute, Second).
    fn find_matching_granular_component(
        &self,
        current_time: &mut NaiveDateTime,
        direction: Direction,
        component: TimeComponent,
    ) -> Result<bool, CronError> {
        let mut changed = false;
        let (current_value, next_larger_component) = match component {
            TimeComponent::Hour => (current_time.hour(), TimeComponent::Day),
            TimeComponent::Minute => (current_time.minute(), TimeComponent::Hour),
            TimeComponent::Second => (current_time.second(), TimeComponent::Minute),
            _ => return Err(CronError::InvalidTime),
        };

        let match_result = self
            .pattern
            .find_match_in_component(current_value, component, direction)?;

        match match_result {
            Some(match_value) => {
                if match_value != current_value {
                    Self::set_time_component(current_time, component, match_value, direction)?;
                }
            }
            None => {
                Self::adjust_time_component(current_time, next_larger_component, direction)?;
                changed = true;
            }
        }
        Ok(changed)
    }

    pub fn with_dom_and_dow(&mut self) -> &mut Self {
        self.dom_and_dow = true;
        self
    }

    pub fn with_seconds_optional(&mut self) -> &mut Self {
        self.seconds = Seconds::Optional;
        self
    }

    pub fn with_seconds_required(&mut self) -> &mut Self {
        self.seconds = Seconds::Required;
        self
    }

    pub fn with_alternative_weekdays(&mut self) -> &mut Self {
        self.alternative_weekdays = true;
        self
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl std::fmt::Display for Cron {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

/// Equality ignores pending (not-yet-applied) configuration: two `Cron`s are equal when
/// their compiled patterns match exactly the same set of datetimes.
impl PartialEq for Cron {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}
impl Eq for Cron {}

impl PartialOrd for Cron {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.pattern.partial_cmp(&other.pattern)
    }
}

impl Hash for Cron {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern.hash(state);
    }
}

// Enables creating a Cron instance from a string slice, returning a CronError if parsing fails.
impl FromStr for Cron {
    type Err = CronError;

    fn from_str(cron_string: &str) -> Result<Cron, CronError> {
        Cron::new(cron_string).parse()
    }
}

#[cfg(feature = "serde")]
impl Serialize for Cron {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.pattern.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Cron {
    fn deserialize<D>(deserializer: D) -> Result<Cron, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct CronVisitor;

        impl Visitor<'_> for CronVisitor {
            type Value = Cron;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid cron pattern")
            }

            fn visit_str<E>(self, value: &str) -> Result<Cron, E>
            where
                E: de::Error,
            {
                Cron::new(value).parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(CronVisitor)
    }
}

// Convert `NaiveDateTime` back to `DateTime<Tz>`
pub fn from_naive<Tz: TimeZone>(
    naive_time: NaiveDateTime,
    timezone: &Tz,
) -> Result<(DateTime<Tz>, bool), CronError> {
    match timezone.from_local_datetime(&naive_time) {
        chrono::LocalResult::Single(dt) => Ok((dt, false)),
        chrono::LocalResult::Ambiguous(dt1, _) => Ok((dt1, false)),
        chrono::LocalResult::None => {
            // Handle DST gap by searching nearby
            for i in 0..3600 {
                let adjusted = naive_time + Duration::seconds(i + 1);
                if let chrono::LocalResult::Single(dt) = timezone.from_local_datetime(&adjusted) {
                    return Ok((dt, true));
                }
            }
            Err(CronError::InvalidTime)
        }
    }
}
