//! The simulation clock.

use banksim_core::Date;

/// A date clock stepping in fixed calendar-day increments.
#[derive(Debug, Clone, Copy)]
pub struct SimulationClock {
    start: Date,
    current: Date,
    step_days: i64,
}

impl SimulationClock {
    /// Creates a daily clock at `start`.
    #[must_use]
    pub fn new(start: Date) -> Self {
        Self {
            start,
            current: start,
            step_days: 1,
        }
    }

    /// Overrides the step size in calendar days.
    #[must_use]
    pub fn with_step_days(mut self, step_days: i64) -> Self {
        self.step_days = step_days.max(1);
        self
    }

    /// The clock's start date.
    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    /// The current simulation date.
    #[must_use]
    pub fn current(&self) -> Date {
        self.current
    }

    /// Calendar days elapsed since the start.
    #[must_use]
    pub fn elapsed_days(&self) -> i64 {
        self.start.days_between(&self.current)
    }

    /// The date the next step would land on, without committing it.
    #[must_use]
    pub fn next_date(&self) -> Date {
        self.current.add_days(self.step_days)
    }

    /// Steps the clock forward and returns the new date.
    pub fn advance(&mut self) -> Date {
        self.current = self.current.add_days(self.step_days);
        self.current
    }

    /// Rewinds to the start date.
    pub fn reset(&mut self) {
        self.current = self.start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_stepping() {
        let start = Date::from_ymd(2023, 3, 1).unwrap();
        let mut clock = SimulationClock::new(start);

        assert_eq!(clock.current(), start);
        assert_eq!(clock.next_date(), Date::from_ymd(2023, 3, 2).unwrap());
        assert_eq!(clock.advance(), Date::from_ymd(2023, 3, 2).unwrap());
        clock.advance();
        assert_eq!(clock.elapsed_days(), 2);

        clock.reset();
        assert_eq!(clock.current(), start);
        assert_eq!(clock.elapsed_days(), 0);
    }

    #[test]
    fn test_custom_step() {
        let start = Date::from_ymd(2023, 3, 1).unwrap();
        let mut clock = SimulationClock::new(start).with_step_days(7);
        assert_eq!(clock.advance(), Date::from_ymd(2023, 3, 8).unwrap());
    }
}
