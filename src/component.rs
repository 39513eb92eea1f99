//! Bitset-backed matcher for a single cron field.
//!
//! A [`CronComponent`] is a word-packed bitset keyed by `value - min`, plus
//! a handful of per-position bitsets for the calendar modifiers (`W`, `#n`,
//! positional `L`) and two component-level flags for the modifiers that
//! don't name a position (bare `L`, `LW`). Which modifiers a given
//! component honors is gated by the `features` bitmask passed to
//! [`CronComponent::new`], so a field descriptor that doesn't support `W`
//! (seconds, minutes, ...) rejects it as a parse error rather than silently
//! ignoring it.

use crate::errors::CronComponentError;

const BITS_PER_WORD: u32 = u64::BITS;

/// No special modifiers are honored.
pub const NONE_BIT: u64 = 0;
/// Plain membership in the field's value set (every component supports this).
pub const ALL_BIT: u64 = 1;
/// Bare `L` (last day of the domain) or bare `LW`/`WL` (last weekday of the
/// domain). Day-of-month-only: day-of-week has no standalone `L` atom, only
/// the positional `dL` gated by [`POSITIONAL_LAST_BIT`].
pub const LAST_BIT: u64 = 1 << 1;
/// `W` (as a day-of-month suffix: `dW`, or combined with `L` as `LW`).
pub const CLOSEST_WEEKDAY_BIT: u64 = 1 << 2;
pub const NTH_1ST_BIT: u64 = 1 << 3;
pub const NTH_2ND_BIT: u64 = 1 << 4;
pub const NTH_3RD_BIT: u64 = 1 << 5;
pub const NTH_4TH_BIT: u64 = 1 << 6;
pub const NTH_5TH_BIT: u64 = 1 << 7;
/// Union of all five `NTH_*_BIT` flags, for constructing a component that
/// honors `d#n`.
pub const NTH_ALL: u64 = NTH_1ST_BIT | NTH_2ND_BIT | NTH_3RD_BIT | NTH_4TH_BIT | NTH_5TH_BIT;
/// Positional `dL`/`d#L` (last occurrence of weekday `d` in the month).
/// Day-of-week-only: day-of-month has no such concept, only the bare
/// [`LAST_BIT`] (last day of month) and `dW`.
pub const POSITIONAL_LAST_BIT: u64 = 1 << 8;

const NTH_BITS: [u64; 5] = [
    NTH_1ST_BIT,
    NTH_2ND_BIT,
    NTH_3RD_BIT,
    NTH_4TH_BIT,
    NTH_5TH_BIT,
];

fn words_for(min: u8, max: u8) -> usize {
    let span = (max - min) as usize + 1;
    span.div_ceil(BITS_PER_WORD as usize)
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
struct BitSet(Vec<u64>);

impl BitSet {
    fn new(words: usize) -> Self {
        BitSet(vec![0u64; words])
    }

    fn set(&mut self, pos: usize) {
        self.0[pos / BITS_PER_WORD as usize] |= 1 << (pos as u32 % BITS_PER_WORD);
    }

    fn unset(&mut self, pos: usize) {
        self.0[pos / BITS_PER_WORD as usize] &= !(1 << (pos as u32 % BITS_PER_WORD));
    }

    fn is_set(&self, pos: usize) -> bool {
        self.0[pos / BITS_PER_WORD as usize] & (1 << (pos as u32 % BITS_PER_WORD)) != 0
    }

    fn any(&self) -> bool {
        self.0.iter().any(|w| *w != 0)
    }
}

/// A single compiled cron field: a bitset of legal values plus whichever
/// calendar modifiers its `features` mask allows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CronComponent {
    pub min: u8,
    pub max: u8,
    features: u64,
    all: BitSet,
    last_weekday: BitSet,         // positional `dL`
    nearest_workday: BitSet,      // positional `dW`
    nth: [BitSet; 5],             // positional `d#n`, n in 1..=5
    last_of_domain: bool,         // bare `L`
    last_weekday_of_domain: bool, // bare `LW` / `WL`
    from_wildcard: bool,
}

impl CronComponent {
    pub fn new(min: u8, max: u8, features: u64) -> Self {
        let words = words_for(min, max);
        CronComponent {
            min,
            max,
            features: features | ALL_BIT,
            all: BitSet::new(words),
            last_weekday: BitSet::new(words),
            nearest_workday: BitSet::new(words),
            nth: std::array::from_fn(|_| BitSet::new(words)),
            last_of_domain: false,
            last_weekday_of_domain: false,
            from_wildcard: false,
        }
    }

    fn supports(&self, flag: u64) -> bool {
        self.features & flag != 0
    }

    fn require(&self, flag: u64) -> Result<(), CronComponentError> {
        if self.supports(flag) {
            Ok(())
        } else {
            Err(CronComponentError::UnsupportedSpecialBit)
        }
    }

    fn index_of(&self, value: u8) -> Result<usize, CronComponentError> {
        if value < self.min || value > self.max {
            return Err(CronComponentError::OutOfBounds(format!(
                "value {value} is outside the range {}-{}",
                self.min, self.max
            )));
        }
        Ok((value - self.min) as usize)
    }

    pub fn set_bit(&mut self, value: u8, flag: u64) -> Result<(), CronComponentError> {
        self.require(flag)?;
        let idx = self.index_of(value)?;
        match flag {
            ALL_BIT => self.all.set(idx),
            POSITIONAL_LAST_BIT => self.last_weekday.set(idx),
            CLOSEST_WEEKDAY_BIT => self.nearest_workday.set(idx),
            f if NTH_BITS.contains(&f) => {
                let n = NTH_BITS.iter().position(|b| *b == f).unwrap();
                self.nth[n].set(idx);
            }
            _ => return Err(CronComponentError::UnsupportedSpecialBit),
        }
        Ok(())
    }

    pub fn unset_bit(&mut self, value: u8, flag: u64) -> Result<(), CronComponentError> {
        self.require(flag)?;
        let idx = self.index_of(value)?;
        match flag {
            ALL_BIT => self.all.unset(idx),
            POSITIONAL_LAST_BIT => self.last_weekday.unset(idx),
            CLOSEST_WEEKDAY_BIT => self.nearest_workday.unset(idx),
            f if NTH_BITS.contains(&f) => {
                let n = NTH_BITS.iter().position(|b| *b == f).unwrap();
                self.nth[n].unset(idx);
            }
            _ => return Err(CronComponentError::UnsupportedSpecialBit),
        }
        Ok(())
    }

    pub fn is_bit_set(&self, value: u8, flag: u64) -> Result<bool, CronComponentError> {
        if value < self.min || value > self.max {
            return Ok(false);
        }
        let idx = (value - self.min) as usize;
        Ok(match flag {
            ALL_BIT => self.all.is_set(idx),
            POSITIONAL_LAST_BIT => self.last_weekday.is_set(idx),
            CLOSEST_WEEKDAY_BIT => self.nearest_workday.is_set(idx),
            f if NTH_BITS.contains(&f) => {
                let n = NTH_BITS.iter().position(|b| *b == f).unwrap();
                self.nth[n].is_set(idx)
            }
            _ => return Err(CronComponentError::UnsupportedSpecialBit),
        })
    }

    /// `true` if the bare (non-positional) `L` atom was present.
    pub fn is_last_of_domain(&self) -> bool {
        self.last_of_domain
    }

    /// `true` if the bare `LW`/`WL` atom was present.
    pub fn is_last_weekday_of_domain(&self) -> bool {
        self.last_weekday_of_domain
    }

    /// `true` if any `n#m` atom was present, for any `n`.
    pub fn has_nth(&self) -> bool {
        self.nth.iter().any(|b| b.any())
    }

    /// `true` if any `nL` atom was present, for any `n`.
    pub fn has_positional_last(&self) -> bool {
        self.last_weekday.any()
    }

    /// `true` if any `nW` atom was present, for any `n`.
    pub fn has_nearest_workday(&self) -> bool {
        self.nearest_workday.any()
    }

    /// Values (in field-domain space) for which `n#nth` was recorded,
    /// `nth` in `1..=5`.
    pub fn nth_values(&self, nth: u8) -> Vec<u8> {
        let Some(set) = nth.checked_sub(1).and_then(|i| self.nth.get(i as usize)) else {
            return Vec::new();
        };
        (self.min..=self.max)
            .filter(|v| set.is_set((*v - self.min) as usize))
            .collect()
    }

    /// Values for which `nL` was recorded.
    pub fn positional_last_values(&self) -> Vec<u8> {
        (self.min..=self.max)
            .filter(|v| self.last_weekday.is_set((*v - self.min) as usize))
            .collect()
    }

    /// Values for which `nW` was recorded.
    pub fn nearest_workday_values(&self) -> Vec<u8> {
        (self.min..=self.max)
            .filter(|v| self.nearest_workday.is_set((*v - self.min) as usize))
            .collect()
    }

    /// Whether the field's text was a pure wildcard (`*` or `?`), i.e. the
    /// field is *not* "restricted" per the DOM/DOW disjunction rule.
    pub fn is_restricted(&self) -> bool {
        !self.from_wildcard
    }

    /// Sorted, deduplicated plain (non-modifier) value set. Used by the
    /// successor search for seconds/minutes/hours/months, and as the
    /// numeric half of day-of-month/day-of-week.
    pub fn values(&self) -> Vec<u8> {
        (self.min..=self.max)
            .filter(|v| self.all.is_set((*v - self.min) as usize))
            .collect()
    }

    /// Parses a comma-separated field (already alias-resolved and
    /// uppercased) into this component.
    pub fn parse(&mut self, field: &str) -> Result<(), CronComponentError> {
        let trimmed = field.trim();
        self.from_wildcard = trimmed == "*";

        if trimmed == "*" {
            for v in self.min..=self.max {
                self.all.set((v - self.min) as usize);
            }
            return Ok(());
        }

        for raw_atom in trimmed.split(',') {
            let atom = raw_atom.trim();
            if atom.is_empty() {
                continue;
            }
            self.parse_atom(atom)?;
        }

        Ok(())
    }

    fn parse_atom(&mut self, atom: &str) -> Result<(), CronComponentError> {
        let upper = atom.to_ascii_uppercase();

        // Bare `L` (last day of domain) — no digits at all.
        if upper == "L" {
            self.require(LAST_BIT)?;
            self.last_of_domain = true;
            return Ok(());
        }

        // Bare `LW` / `WL` (last weekday of domain).
        if upper == "LW" || upper == "WL" {
            self.require(LAST_BIT)?;
            self.require(CLOSEST_WEEKDAY_BIT)?;
            self.last_weekday_of_domain = true;
            return Ok(());
        }

        // `d#n` or `d#L` (nth / last occurrence of weekday d).
        if let Some(hash_pos) = upper.find('#') {
            let (day_part, nth_part) = (&upper[..hash_pos], &upper[hash_pos + 1..]);
            let day: u8 = day_part.parse().map_err(|_| {
                CronComponentError::InvalidSyntax(format!("invalid weekday in '{atom}'"))
            })?;
            if nth_part == "L" {
                self.require(POSITIONAL_LAST_BIT)?;
                self.set_bit(day, POSITIONAL_LAST_BIT)?;
            } else {
                let n: u8 = nth_part.parse().map_err(|_| {
                    CronComponentError::InvalidSyntax(format!(
                        "invalid occurrence index in '{atom}'"
                    ))
                })?;
                if !(1..=5).contains(&n) {
                    return Err(CronComponentError::OutOfBounds(format!(
                        "occurrence index {n} must be in 1..=5"
                    )));
                }
                self.require(NTH_BITS[(n - 1) as usize])?;
                self.set_bit(day, NTH_BITS[(n - 1) as usize])?;
            }
            return Ok(());
        }

        // `dL` (last occurrence of weekday d).
        if let Some(stripped) = upper.strip_suffix('L') {
            if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
                let day: u8 = stripped.parse().map_err(|_| {
                    CronComponentError::InvalidSyntax(format!("invalid weekday in '{atom}'"))
                })?;
                self.require(POSITIONAL_LAST_BIT)?;
                self.set_bit(day, POSITIONAL_LAST_BIT)?;
                return Ok(());
            }
        }

        // `dW` (nearest workday to day d).
        if let Some(stripped) = upper.strip_suffix('W') {
            if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
                let day: u8 = stripped.parse().map_err(|_| {
                    CronComponentError::InvalidSyntax(format!("invalid day in '{atom}'"))
                })?;
                self.require(CLOSEST_WEEKDAY_BIT)?;
                self.set_bit(day, CLOSEST_WEEKDAY_BIT)?;
                return Ok(());
            }
        }

        // Plain stepped/ranged/single numeric atom.
        self.parse_numeric_atom(atom)
    }

    fn parse_numeric_atom(&mut self, atom: &str) -> Result<(), CronComponentError> {
        if let Some((range_part, step_part)) = atom.split_once('/') {
            let step: u32 = step_part.parse().map_err(|_| {
                CronComponentError::InvalidSyntax(format!("invalid step in '{atom}'"))
            })?;
            if step == 0 {
                return Err(CronComponentError::StepError("step cannot be zero".to_string()));
            }
            let domain_size = self.max as u32 - self.min as u32 + 1;
            if step >= domain_size {
                return Err(CronComponentError::StepError(format!(
                    "step {step} must be smaller than the field's domain size ({domain_size})"
                )));
            }

            let (start, end) = if range_part == "*" {
                (self.min, self.max)
            } else if let Some((a, b)) = range_part.split_once('-') {
                let start = self.parse_value(a)?;
                let end = self.parse_value(b)?;
                if start > end {
                    return Err(CronComponentError::OutOfBounds(format!(
                        "range start {start} is greater than end {end}"
                    )));
                }
                (start, end)
            } else {
                (self.parse_value(range_part)?, self.max)
            };

            let mut v = start as u32;
            while v <= end as u32 {
                self.set_bit(v as u8, ALL_BIT)?;
                v += step;
            }
            return Ok(());
        }

        if let Some((a, b)) = atom.split_once('-') {
            let start = self.parse_value(a)?;
            let end = self.parse_value(b)?;
            if start > end {
                return Err(CronComponentError::OutOfBounds(format!(
                    "range start {start} is greater than end {end}"
                )));
            }
            for v in start..=end {
                self.set_bit(v, ALL_BIT)?;
            }
            return Ok(());
        }

        let value = self.parse_value(atom)?;
        self.set_bit(value, ALL_BIT)
    }

    fn parse_value(&self, text: &str) -> Result<u8, CronComponentError> {
        text.trim()
            .parse::<u8>()
            .map_err(|_| CronComponentError::InvalidSyntax(format!("'{text}' is not a number")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_fills_domain_and_is_unrestricted() {
        let mut c = CronComponent::new(0, 59, ALL_BIT);
        c.parse("*").unwrap();
        assert_eq!(c.values().len(), 60);
        assert!(!c.is_restricted());
    }

    #[test]
    fn single_value() {
        let mut c = CronComponent::new(0, 59, ALL_BIT);
        c.parse("30").unwrap();
        assert_eq!(c.values(), vec![30]);
        assert!(c.is_restricted());
    }

    #[test]
    fn range() {
        let mut c = CronComponent::new(0, 59, ALL_BIT);
        c.parse("5-10").unwrap();
        assert_eq!(c.values(), vec![5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn step_on_wildcard() {
        let mut c = CronComponent::new(0, 59, ALL_BIT);
        c.parse("*/15").unwrap();
        assert_eq!(c.values(), vec![0, 15, 30, 45]);
    }

    #[test]
    fn step_on_single_value() {
        let mut c = CronComponent::new(0, 59, ALL_BIT);
        c.parse("5/10").unwrap();
        assert_eq!(c.values(), vec![5, 15, 25, 35, 45, 55]);
    }

    #[test]
    fn list() {
        let mut c = CronComponent::new(0, 59, ALL_BIT);
        c.parse("0,10,20").unwrap();
        assert_eq!(c.values(), vec![0, 10, 20]);
    }

    #[test]
    fn step_equal_to_domain_size_is_rejected() {
        let mut c = CronComponent::new(0, 59, ALL_BIT);
        assert!(c.parse("*/60").is_err());
    }

    #[test]
    fn step_larger_than_domain_is_rejected() {
        let mut c = CronComponent::new(0, 59, ALL_BIT);
        assert!(c.parse("*/61").is_err());
        let mut c2 = CronComponent::new(0, 59, ALL_BIT);
        assert!(c2.parse("2-20/61").is_err());
    }

    #[test]
    fn zero_step_is_rejected() {
        let mut c = CronComponent::new(0, 59, ALL_BIT);
        assert!(c.parse("*/0").is_err());
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        let mut c = CronComponent::new(0, 59, ALL_BIT);
        assert!(c.parse("60").is_err());
    }

    #[test]
    fn reversed_range_is_rejected() {
        let mut c = CronComponent::new(0, 59, ALL_BIT);
        assert!(c.parse("10-5").is_err());
    }

    #[test]
    fn bare_last_requires_feature() {
        let mut unsupported = CronComponent::new(0, 59, ALL_BIT);
        assert!(unsupported.parse("L").is_err());

        let mut dom = CronComponent::new(1, 31, ALL_BIT | LAST_BIT | CLOSEST_WEEKDAY_BIT);
        dom.parse("L").unwrap();
        assert!(dom.is_last_of_domain());
    }

    #[test]
    fn last_weekday_of_domain_either_order() {
        let mut dom = CronComponent::new(1, 31, ALL_BIT | LAST_BIT | CLOSEST_WEEKDAY_BIT);
        dom.parse("LW").unwrap();
        assert!(dom.is_last_weekday_of_domain());

        let mut dom2 = CronComponent::new(1, 31, ALL_BIT | LAST_BIT | CLOSEST_WEEKDAY_BIT);
        dom2.parse("WL").unwrap();
        assert!(dom2.is_last_weekday_of_domain());
    }

    #[test]
    fn nearest_workday_positional() {
        let mut dom = CronComponent::new(1, 31, ALL_BIT | CLOSEST_WEEKDAY_BIT);
        dom.parse("15W").unwrap();
        assert_eq!(dom.nearest_workday_values(), vec![15]);
    }

    #[test]
    fn nth_weekday_positional() {
        let mut dow = CronComponent::new(1, 7, ALL_BIT | NTH_ALL);
        dow.parse("6#5").unwrap();
        assert_eq!(dow.nth_values(5), vec![6]);
    }

    #[test]
    fn positional_last_weekday() {
        let mut dow = CronComponent::new(1, 7, ALL_BIT | POSITIONAL_LAST_BIT);
        dow.parse("5L").unwrap();
        assert_eq!(dow.positional_last_values(), vec![5]);
    }

    #[test]
    fn positional_last_weekday_via_hash_l() {
        let mut dow = CronComponent::new(1, 7, ALL_BIT | POSITIONAL_LAST_BIT);
        dow.parse("5#L").unwrap();
        assert_eq!(dow.positional_last_values(), vec![5]);
    }

    #[test]
    fn modifier_in_unsupported_field_is_rejected() {
        let mut minute = CronComponent::new(0, 59, ALL_BIT);
        assert!(minute.parse("5W").is_err());
        assert!(minute.parse("5#2").is_err());
    }

    #[test]
    fn positional_last_weekday_rejected_on_day_of_month() {
        // Day-of-month honors bare `L`/`LW`/`dW` but not positional `dL`/`d#L` —
        // that's a day-of-week-only concept.
        let mut dom = CronComponent::new(1, 31, ALL_BIT | LAST_BIT | CLOSEST_WEEKDAY_BIT);
        assert!(dom.parse("5L").is_err());
        assert!(dom.parse("5#L").is_err());
    }
}
