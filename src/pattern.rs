//! Compiled representation of a cron pattern.
//!
//! [`CronPattern`] owns one matcher per field (seconds/minutes/hours are
//! plain [`CronComponent`]s, day-of-month/month/day-of-week add the
//! calendar modifiers, the year field is a [`YearField`]) plus the flags
//! that govern how day-of-month and day-of-week combine. [`compile`] is
//! the single place that turns pattern text into this representation; both
//! [`crate::Cron::parse`] and [`crate::parser::CronParser::parse`] call
//! through it so the two entry points can never drift apart.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use strum::EnumIs;

use crate::calendar;
use crate::component::{
    CronComponent, ALL_BIT, CLOSEST_WEEKDAY_BIT, LAST_BIT, NONE_BIT, NTH_1ST_BIT, NTH_2ND_BIT,
    NTH_3RD_BIT, NTH_4TH_BIT, NTH_5TH_BIT, NTH_ALL, POSITIONAL_LAST_BIT,
};
use crate::errors::CronError;
use crate::year::YearField;
use crate::{Direction, TimeComponent};

/// Earliest year a compiled pattern's year field or carry search will consider.
pub(crate) const YEAR_LOWER_LIMIT: i32 = 1970;
/// Latest year a compiled pattern's year field or carry search will consider.
pub(crate) const YEAR_UPPER_LIMIT: i32 = 5000;

const DOW_ALIAS_BITS: [u64; 7] = [
    ALL_BIT,
    POSITIONAL_LAST_BIT,
    NTH_1ST_BIT,
    NTH_2ND_BIT,
    NTH_3RD_BIT,
    NTH_4TH_BIT,
    NTH_5TH_BIT,
];

/// Whether a pattern's (optional) seconds field must, may, or must not appear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, EnumIs)]
pub enum Seconds {
    Optional,
    Required,
    #[default]
    Disallowed,
}

/// Whether a pattern's (optional) trailing year field must, may, or must not appear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, EnumIs)]
pub enum Years {
    Optional,
    Required,
    #[default]
    Disallowed,
}

/// A fully parsed cron pattern.
#[derive(Debug, Clone)]
pub struct CronPattern {
    pattern: String,
    pub seconds: CronComponent,
    pub minutes: CronComponent,
    pub hours: CronComponent,
    pub days: CronComponent,
    pub months: CronComponent,
    pub days_of_week: CronComponent,
    pub years: YearField,
    pub star_dom: bool,
    pub star_dow: bool,
    pub dom_and_dow: bool,
    alternative_weekdays: bool,
}

impl CronPattern {
    /// A not-yet-compiled placeholder holding only the raw text a caller
    /// passed to [`crate::Cron::new`]. [`crate::Cron::parse`] replaces this
    /// with the result of [`compile`].
    pub(crate) fn placeholder(raw: &str) -> Self {
        CronPattern {
            pattern: raw.to_string(),
            seconds: CronComponent::new(0, 0, NONE_BIT),
            minutes: CronComponent::new(0, 0, NONE_BIT),
            hours: CronComponent::new(0, 0, NONE_BIT),
            days: CronComponent::new(1, 1, NONE_BIT),
            months: CronComponent::new(1, 1, NONE_BIT),
            days_of_week: CronComponent::new(0, 0, NONE_BIT),
            years: YearField::new(YEAR_LOWER_LIMIT, YEAR_UPPER_LIMIT),
            star_dom: false,
            star_dow: false,
            dom_and_dow: false,
            alternative_weekdays: false,
        }
    }

    pub(crate) fn raw(&self) -> &str {
        &self.pattern
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// `true` if `second` is a legal value of the seconds field.
    pub fn second_match(&self, second: u32) -> Result<bool, CronError> {
        Ok(self.seconds.is_bit_set(second as u8, ALL_BIT)?)
    }

    pub fn minute_match(&self, minute: u32) -> Result<bool, CronError> {
        Ok(self.minutes.is_bit_set(minute as u8, ALL_BIT)?)
    }

    pub fn hour_match(&self, hour: u32) -> Result<bool, CronError> {
        Ok(self.hours.is_bit_set(hour as u8, ALL_BIT)?)
    }

    pub fn month_match(&self, month: u32) -> Result<bool, CronError> {
        Ok(self.months.is_bit_set(month as u8, ALL_BIT)?)
    }

    pub fn year_match(&self, year: i32) -> bool {
        self.years.contains(year)
    }

    /// Converts a calendar weekday (`Mon = 1 .. Sun = 7`) into this
    /// pattern's day-of-week field numbering.
    fn component_weekday(&self, calendar_dow: u32, alternative_weekdays: bool) -> u8 {
        if alternative_weekdays {
            if calendar_dow == 7 {
                0
            } else {
                calendar_dow as u8
            }
        } else if calendar_dow == 7 {
            7
        } else {
            calendar_dow as u8
        }
    }

    fn day_of_month_match(&self, year: i32, month: u32, day: u32) -> Result<bool, CronError> {
        if self.days.is_bit_set(day as u8, ALL_BIT)? {
            return Ok(true);
        }

        let last_day = calendar::days_in_month(year, month);

        if self.days.is_last_of_domain() && day == last_day {
            return Ok(true);
        }

        if self.days.is_last_weekday_of_domain()
            && day == calendar::nearest_workday(year, month, last_day)
        {
            return Ok(true);
        }

        if self.days.has_nearest_workday() {
            for anchor in self.days.nearest_workday_values() {
                if day == calendar::nearest_workday(year, month, anchor as u32) {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    fn day_of_week_match(
        &self,
        year: i32,
        month: u32,
        day: u32,
        alternative_weekdays: bool,
    ) -> Result<bool, CronError> {
        let calendar_dow = calendar::day_of_week(year, month, day).ok_or(CronError::InvalidDate)?;
        let dow = self.component_weekday(calendar_dow, alternative_weekdays);

        if self.days_of_week.is_bit_set(dow, ALL_BIT)? {
            return Ok(true);
        }

        let last_day = calendar::days_in_month(year, month);

        if self.days_of_week.has_positional_last()
            && self.days_of_week.positional_last_values().contains(&dow)
            && day + 7 > last_day
        {
            return Ok(true);
        }

        if self.days_of_week.has_nth() {
            let occurrence = ((day - 1) / 7 + 1) as u8;
            for n in 1..=5u8 {
                if self.days_of_week.nth_values(n).contains(&dow) && occurrence == n {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// Whether `(year, month, day)` satisfies the day-of-month/day-of-week
    /// pair, honoring the restricted-field disjunction rule.
    pub fn day_match(&self, year: i32, month: u32, day: u32) -> Result<bool, CronError> {
        self.day_match_with_mode(year, month, day, self.alternative_weekdays)
    }

    fn day_match_with_mode(
        &self,
        year: i32,
        month: u32,
        day: u32,
        alternative_weekdays: bool,
    ) -> Result<bool, CronError> {
        if self.star_dom && self.star_dow {
            return Ok(true);
        }

        if self.star_dow {
            return self.day_of_month_match(year, month, day);
        }

        if self.star_dom {
            return self.day_of_week_match(year, month, day, alternative_weekdays);
        }

        let dom = self.day_of_month_match(year, month, day)?;
        let dow = self.day_of_week_match(year, month, day, alternative_weekdays)?;

        Ok(if self.dom_and_dow { dom && dow } else { dom || dow })
    }

    /// Smallest/largest legal value of a granular field (second/minute/hour)
    /// relative to `current`, in `direction`. Returns `None` when the
    /// search must carry into the next larger component.
    pub fn find_match_in_component(
        &self,
        current: u32,
        component: TimeComponent,
        direction: Direction,
    ) -> Result<Option<u32>, CronError> {
        let values = match component {
            TimeComponent::Second => self.seconds.values(),
            TimeComponent::Minute => self.minutes.values(),
            TimeComponent::Hour => self.hours.values(),
            _ => return Err(CronError::InvalidTime),
        };

        Ok(match direction {
            Direction::Forward => values
                .iter()
                .copied()
                .find(|&v| v as u32 >= current)
                .map(|v| v as u32),
            Direction::Backward => values
                .iter()
                .rev()
                .copied()
                .find(|&v| v as u32 <= current)
                .map(|v| v as u32),
        })
    }
}

impl std::fmt::Display for CronPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

/// Equality ignores display text and pending configuration flags: two
/// patterns are equal when they match exactly the same set of datetimes,
/// regardless of the syntax used to express that set.
impl PartialEq for CronPattern {
    fn eq(&self, other: &Self) -> bool {
        self.seconds == other.seconds
            && self.minutes == other.minutes
            && self.hours == other.hours
            && self.days == other.days
            && self.months == other.months
            && self.days_of_week == other.days_of_week
            && self.years == other.years
            && self.star_dom == other.star_dom
            && self.star_dow == other.star_dow
            && self.dom_and_dow == other.dom_and_dow
            && self.alternative_weekdays == other.alternative_weekdays
    }
}
impl Eq for CronPattern {}

impl Hash for CronPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.seconds.hash(state);
        self.minutes.hash(state);
        self.hours.hash(state);
        self.days.hash(state);
        self.months.hash(state);
        self.days_of_week.hash(state);
        self.years.hash(state);
        self.star_dom.hash(state);
        self.star_dow.hash(state);
        self.dom_and_dow.hash(state);
        self.alternative_weekdays.hash(state);
    }
}

impl PartialOrd for CronPattern {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CronPattern {
    fn cmp(&self, other: &Self) -> Ordering {
        self.seconds
            .cmp(&other.seconds)
            .then_with(|| self.minutes.cmp(&other.minutes))
            .then_with(|| self.hours.cmp(&other.hours))
            .then_with(|| self.days.cmp(&other.days))
            .then_with(|| self.months.cmp(&other.months))
            .then_with(|| self.days_of_week.cmp(&other.days_of_week))
            .then_with(|| self.years.cmp(&other.years))
            .then_with(|| self.star_dom.cmp(&other.star_dom))
            .then_with(|| self.star_dow.cmp(&other.star_dow))
            .then_with(|| self.dom_and_dow.cmp(&other.dom_and_dow))
            .then_with(|| self.alternative_weekdays.cmp(&other.alternative_weekdays))
    }
}

/// Parses `raw_pattern` into a [`CronPattern`]. Shared by [`crate::Cron::parse`]
/// and [`crate::parser::CronParser::parse`].
pub(crate) fn compile(
    raw_pattern: &str,
    seconds_mode: Seconds,
    years_mode: Years,
    dom_and_dow: bool,
    alternative_weekdays: bool,
) -> Result<CronPattern, CronError> {
    let mut pattern = raw_pattern.to_uppercase().trim().to_string();
    if pattern.is_empty() {
        return Err(CronError::EmptyPattern);
    }

    if pattern.eq_ignore_ascii_case("@reboot") {
        return Err(CronError::UnknownMacro(
            "@reboot has no process-startup event to bind to in a pure schedule matcher"
                .to_string(),
        ));
    }

    if pattern.contains('@') {
        pattern = handle_nicknames(&pattern, seconds_mode.is_required())?;
    }

    pattern = replace_alpha_weekdays(&pattern, alternative_weekdays);
    pattern = replace_alpha_months(&pattern);

    let mut parts: Vec<&str> = pattern.split_whitespace().collect();

    let seconds_allowed = !seconds_mode.is_disallowed();
    let seconds_required = seconds_mode.is_required();
    let years_allowed = !years_mode.is_disallowed();
    let years_required = years_mode.is_required();

    const BASE_FIELDS: usize = 5;
    let len = parts.len();
    if len < BASE_FIELDS {
        return Err(CronError::InvalidPattern(
            "Pattern must consist of at least five fields (minute, hour, day of month, month, day of week).".to_string(),
        ));
    }
    let extra = len - BASE_FIELDS;
    let max_extra = seconds_allowed as usize + years_allowed as usize;
    let min_extra = seconds_required as usize + years_required as usize;
    if extra > max_extra || extra < min_extra {
        return Err(CronError::InvalidPattern(format!(
            "Pattern has {len} fields; with the configured seconds/year options it must have between {} and {} fields.",
            BASE_FIELDS + min_extra,
            BASE_FIELDS + max_extra
        )));
    }

    let (has_seconds, has_years) = match extra {
        0 => (false, false),
        1 => {
            if seconds_required && !years_required {
                (true, false)
            } else if years_required && !seconds_required {
                (false, true)
            } else if seconds_allowed {
                (true, false)
            } else {
                (false, true)
            }
        }
        2 => (true, true),
        _ => unreachable!("arity already validated above"),
    };

    let mut owned_parts: Vec<String> = parts.iter().map(|s| s.to_string()).collect();
    if !has_seconds {
        owned_parts.insert(0, "0".to_string());
    }
    if !has_years {
        owned_parts.push("*".to_string());
    }
    // Replace `?` with `*` in day-of-month (index 3) and day-of-week (index 5).
    owned_parts[3] = owned_parts[3].replace('?', "*");
    owned_parts[5] = owned_parts[5].replace('?', "*");
    parts = owned_parts.iter().map(|s| s.as_str()).collect();

    throw_at_illegal_characters(&parts)?;

    let star_dom = parts[3] == "*";
    let star_dow = parts[5] == "*";

    let mut seconds = CronComponent::new(0, 59, NONE_BIT);
    seconds.parse(parts[0])?;
    let mut minutes = CronComponent::new(0, 59, NONE_BIT);
    minutes.parse(parts[1])?;
    let mut hours = CronComponent::new(0, 23, NONE_BIT);
    hours.parse(parts[2])?;
    let mut days = CronComponent::new(1, 31, LAST_BIT | CLOSEST_WEEKDAY_BIT);
    days.parse(parts[3])?;
    let mut months = CronComponent::new(1, 12, NONE_BIT);
    months.parse(parts[4])?;
    let mut days_of_week = CronComponent::new(0, 7, POSITIONAL_LAST_BIT | NTH_ALL);
    days_of_week.parse(parts[5])?;

    // Fold the Sunday alias (`0` in the default ISO numbering, `7` in
    // alternative/Vixie numbering) onto its canonical value. Must run after
    // the whole field is parsed since a range can straddle both (e.g.
    // `FRI-SUN` == `5-7` in ISO mode, `5-0`-shaped input never legally
    // arises there since SUN already maps to `7`).
    let (alias_value, target_value) = if alternative_weekdays {
        (7u8, 0u8)
    } else {
        (0u8, 7u8)
    };
    for bit in DOW_ALIAS_BITS {
        if days_of_week.is_bit_set(alias_value, bit)? {
            days_of_week.unset_bit(alias_value, bit)?;
            days_of_week.set_bit(target_value, bit)?;
        }
    }

    let mut years = YearField::new(YEAR_LOWER_LIMIT, YEAR_UPPER_LIMIT);
    years.parse(parts[6])?;

    Ok(CronPattern {
        pattern,
        seconds,
        minutes,
        hours,
        days,
        months,
        days_of_week,
        years,
        star_dom,
        star_dow,
        dom_and_dow,
        alternative_weekdays,
    })
}

fn throw_at_illegal_characters(parts: &[&str]) -> Result<(), CronError> {
    let base_allowed_characters = [
        '*', '/', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ',', '-',
    ];
    let day_of_week_additional_characters = ['#', 'L'];
    let day_of_month_additional_characters = ['L', 'W'];

    for (i, part) in parts.iter().enumerate() {
        let allowed = match i {
            5 => [
                base_allowed_characters.as_ref(),
                day_of_week_additional_characters.as_ref(),
            ]
            .concat(),
            3 => [
                base_allowed_characters.as_ref(),
                day_of_month_additional_characters.as_ref(),
            ]
            .concat(),
            _ => base_allowed_characters.to_vec(),
        };

        for ch in part.chars() {
            if !allowed.contains(&ch) {
                return Err(CronError::IllegalCharacters(format!(
                    "CronPattern contains illegal character '{ch}' in part '{part}'"
                )));
            }
        }
    }

    Ok(())
}

fn handle_nicknames(pattern: &str, with_seconds_required: bool) -> Result<String, CronError> {
    let pattern = pattern.trim();
    let eq = |a: &str, b: &str| a.eq_ignore_ascii_case(b);

    let base_pattern = match pattern {
        p if eq(p, "@yearly") || eq(p, "@annually") => "0 0 1 1 *",
        p if eq(p, "@monthly") => "0 0 1 * *",
        p if eq(p, "@weekly") => "0 0 * * 0",
        p if eq(p, "@daily") || eq(p, "@midnight") => "0 0 * * *",
        p if eq(p, "@hourly") => "0 * * * *",
        p if p.starts_with('@') => {
            return Err(CronError::UnknownMacro(format!(
                "'{p}' is not a recognized macro"
            )))
        }
        _ => pattern,
    };

    Ok(if with_seconds_required {
        format!("0 {base_pattern}")
    } else {
        base_pattern.to_string()
    })
}

// Full names are listed before their 3-letter abbreviations so e.g.
// "FRIDAY" is consumed whole instead of leaving a dangling "DAY" behind
// after "FRI" is replaced out from under it.
fn replace_alpha_weekdays(pattern: &str, alternative_weekdays: bool) -> String {
    let nicknames: [(&str, &str); 16] = if alternative_weekdays {
        [
            ("-SUNDAY", "-7"),
            ("-SUN", "-7"),
            ("SUNDAY", "0"),
            ("SUN", "0"),
            ("MONDAY", "1"),
            ("MON", "1"),
            ("TUESDAY", "2"),
            ("TUE", "2"),
            ("WEDNESDAY", "3"),
            ("WED", "3"),
            ("THURSDAY", "4"),
            ("THU", "4"),
            ("FRIDAY", "5"),
            ("FRI", "5"),
            ("SATURDAY", "6"),
            ("SAT", "6"),
        ]
    } else {
        [
            ("SUNDAY", "7"),
            ("SUN", "7"),
            ("MONDAY", "1"),
            ("MON", "1"),
            ("TUESDAY", "2"),
            ("TUE", "2"),
            ("WEDNESDAY", "3"),
            ("WED", "3"),
            ("THURSDAY", "4"),
            ("THU", "4"),
            ("FRIDAY", "5"),
            ("FRI", "5"),
            ("SATURDAY", "6"),
            ("SAT", "6"),
            ("", ""),
            ("", ""),
        ]
    };

    let mut replaced = pattern.to_string();
    for &(nickname, value) in &nicknames {
        if nickname.is_empty() {
            continue;
        }
        replaced = replaced.replace(nickname, value);
    }
    replaced
}

fn replace_alpha_months(pattern: &str) -> String {
    let nicknames = [
        ("JANUARY", "1"),
        ("JAN", "1"),
        ("FEBRUARY", "2"),
        ("FEB", "2"),
        ("MARCH", "3"),
        ("MAR", "3"),
        ("APRIL", "4"),
        ("APR", "4"),
        ("MAY", "5"),
        ("JUNE", "6"),
        ("JUN", "6"),
        ("JULY", "7"),
        ("JUL", "7"),
        ("AUGUST", "8"),
        ("AUG", "8"),
        ("SEPTEMBER", "9"),
        ("SEP", "9"),
        ("OCTOBER", "10"),
        ("OCT", "10"),
        ("NOVEMBER", "11"),
        ("NOV", "11"),
        ("DECEMBER", "12"),
        ("DEC", "12"),
    ];

    let mut replaced = pattern.to_string();
    for &(nickname, value) in &nicknames {
        replaced = replaced.replace(nickname, value);
    }
    replaced
}
