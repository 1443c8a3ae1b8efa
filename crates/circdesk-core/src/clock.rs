//! Sources of "today".

use chrono::{Days, Local, NaiveDate};

/// Supplies the current date to circulation operations.
pub trait Clock {
    /// Today's date.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualClock {
    today: NaiveDate,
}

impl ManualClock {
    /// Create a clock fixed at `today`.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Override the current date.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// Move the clock forward by `days`. Saturates at the last representable date.
    pub fn advance_days(&mut self, days: u64) {
        self.today = self
            .today
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(SystemClock.today())
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut clock = ManualClock::new(start);
        assert_eq!(clock.today(), start);

        clock.advance_days(4);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

        clock.set_today(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn test_advance_saturates() {
        let mut clock = ManualClock::new(NaiveDate::MAX);
        clock.advance_days(1);
        assert_eq!(clock.today(), NaiveDate::MAX);
    }
}
