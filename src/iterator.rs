use crate::{Cron, Direction};
use chrono::{DateTime, Duration, TimeZone};

/// Lazily walks a [`Cron`] pattern's occurrences in one direction, starting
/// from a fixed point in time.
///
/// The first call to `next()` honors `inclusive` (whether `start_time`
/// itself may be returned); every call after that is inclusive of its own
/// starting point, since by then `current_time` has already been advanced
/// exactly one second past the previous match.
pub struct CronIterator<Tz>
where
    Tz: TimeZone,
{
    cron: Cron,
    current_time: DateTime<Tz>,
    inclusive: bool,
    direction: Direction,
}

impl<Tz> CronIterator<Tz>
where
    Tz: TimeZone,
{
    pub fn new(cron: Cron, start_time: DateTime<Tz>, inclusive: bool, direction: Direction) -> Self {
        CronIterator {
            cron,
            current_time: start_time,
            inclusive,
            direction,
        }
    }
}

impl<Tz> Iterator for CronIterator<Tz>
where
    Tz: TimeZone,
{
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let direction = self.direction;
        let result = self
            .cron
            .find_occurrence(&self.current_time, self.inclusive, direction);
        self.inclusive = true;

        match result {
            Ok(found) => {
                let step = match direction {
                    Direction::Forward => Duration::seconds(1),
                    Direction::Backward => Duration::seconds(-1),
                };
                self.current_time = found.clone().checked_add_signed(step)?;
                Some(found)
            }
            Err(_) => None,
        }
    }
}
