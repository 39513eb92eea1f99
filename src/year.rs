//! Matcher for the optional year field.
//!
//! Years span a domain far wider than seconds/minutes/hours/day-of-month/
//! month/day-of-week (`YEAR_LOWER_LIMIT..=YEAR_UPPER_LIMIT` in [`crate`]),
//! so a word-packed bitset isn't a good fit. [`YearField`] instead keeps a
//! sorted, deduplicated `Vec<i32>` of legal years and does successor/
//! predecessor lookups with binary search. None of the day-of-month-style
//! modifiers (`L`, `W`, `#n`) apply to years, so the parser here is just
//! wildcard, single values, ranges and steps.

use crate::errors::CronComponentError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct YearField {
    pub min: i32,
    pub max: i32,
    values: Vec<i32>,
    from_wildcard: bool,
}

impl YearField {
    pub fn new(min: i32, max: i32) -> Self {
        YearField {
            min,
            max,
            values: Vec::new(),
            from_wildcard: false,
        }
    }

    pub fn parse(&mut self, field: &str) -> Result<(), CronComponentError> {
        let trimmed = field.trim();
        self.from_wildcard = trimmed == "*";

        if trimmed == "*" {
            self.values = (self.min..=self.max).collect();
            return Ok(());
        }

        let mut collected = Vec::new();
        for raw_atom in trimmed.split(',') {
            let atom = raw_atom.trim();
            if atom.is_empty() {
                continue;
            }
            self.parse_atom(atom, &mut collected)?;
        }
        collected.sort_unstable();
        collected.dedup();
        self.values = collected;
        Ok(())
    }

    fn parse_atom(&self, atom: &str, out: &mut Vec<i32>) -> Result<(), CronComponentError> {
        if let Some((range_part, step_part)) = atom.split_once('/') {
            let step: i64 = step_part.parse().map_err(|_| {
                CronComponentError::InvalidSyntax(format!("invalid step in '{atom}'"))
            })?;
            if step <= 0 {
                return Err(CronComponentError::StepError("step cannot be zero".to_string()));
            }
            let (start, end) = if range_part == "*" {
                (self.min, self.max)
            } else if let Some((a, b)) = range_part.split_once('-') {
                (self.parse_value(a)?, self.parse_value(b)?)
            } else {
                (self.parse_value(range_part)?, self.max)
            };
            if start > end {
                return Err(CronComponentError::OutOfBounds(format!(
                    "range start {start} is greater than end {end}"
                )));
            }
            let mut v = start as i64;
            while v <= end as i64 {
                out.push(v as i32);
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
            out.extend(start..=end);
            return Ok(());
        }

        out.push(self.parse_value(atom)?);
        Ok(())
    }

    fn parse_value(&self, text: &str) -> Result<i32, CronComponentError> {
        let value: i32 = text
            .trim()
            .parse()
            .map_err(|_| CronComponentError::InvalidSyntax(format!("'{text}' is not a number")))?;
        if value < self.min || value > self.max {
            return Err(CronComponentError::OutOfBounds(format!(
                "year {value} is outside the range {}-{}",
                self.min, self.max
            )));
        }
        Ok(value)
    }

    pub fn contains(&self, year: i32) -> bool {
        self.values.binary_search(&year).is_ok()
    }

    /// `true` if the field's text was a pure wildcard, i.e. every year in
    /// range matches and the field places no real restriction on a search.
    pub fn is_restricted(&self) -> bool {
        !self.from_wildcard
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Smallest matching year `>= year`, if any remain before `self.max`.
    pub fn succ(&self, year: i32) -> Option<i32> {
        match self.values.binary_search(&year) {
            Ok(_) => Some(year),
            Err(idx) => self.values.get(idx).copied(),
        }
    }

    /// Largest matching year `<= year`, if any remain after `self.min`.
    pub fn pred(&self, year: i32) -> Option<i32> {
        match self.values.binary_search(&year) {
            Ok(_) => Some(year),
            Err(idx) => idx.checked_sub(1).and_then(|i| self.values.get(i)).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_matches_whole_domain() {
        let mut f = YearField::new(1970, 2099);
        f.parse("*").unwrap();
        assert!(f.contains(1970));
        assert!(f.contains(2099));
        assert!(!f.is_restricted());
    }

    #[test]
    fn single_year() {
        let mut f = YearField::new(1970, 2099);
        f.parse("2025").unwrap();
        assert!(f.contains(2025));
        assert!(!f.contains(2024));
        assert!(f.is_restricted());
    }

    #[test]
    fn range_and_step() {
        let mut f = YearField::new(1970, 2099);
        f.parse("2020-2030/5").unwrap();
        assert_eq!(f.values(), &[2020, 2025, 2030]);
    }

    #[test]
    fn list() {
        let mut f = YearField::new(1970, 2099);
        f.parse("2020,2025,2030").unwrap();
        assert_eq!(f.values(), &[2020, 2025, 2030]);
    }

    #[test]
    fn out_of_bounds_year_is_rejected() {
        let mut f = YearField::new(1970, 2099);
        assert!(f.parse("1900").is_err());
    }

    #[test]
    fn succ_and_pred() {
        let mut f = YearField::new(1970, 2099);
        f.parse("2020,2025,2030").unwrap();
        assert_eq!(f.succ(2021), Some(2025));
        assert_eq!(f.succ(2020), Some(2020));
        assert_eq!(f.pred(2021), Some(2020));
        assert_eq!(f.pred(2030), Some(2030));
        assert_eq!(f.succ(2031), None);
        assert_eq!(f.pred(2019), None);
    }
}
