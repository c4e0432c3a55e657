use chrono::{Datelike, Local, Month};

/// The month/year a contribution is stamped with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthYear {
    /// Full English month name, e.g. "March".
    pub month: String,
    pub year: i32,
}

/// Source of the current month and year for new contributions.
pub trait Clock: Send + Sync {
    fn month_year(&self) -> MonthYear;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn month_year(&self) -> MonthYear {
        let now = Local::now();
        MonthYear {
            month: now.format("%B").to_string(),
            year: now.year(),
        }
    }
}

/// A clock frozen at one month, for tests and backfilling.
#[derive(Debug, Clone)]
pub struct FixedClock {
    month_year: MonthYear,
}

impl FixedClock {
    /// `month` is 1-based (1 = January). Returns `None` for an invalid month.
    pub fn new(year: i32, month: u8) -> Option<Self> {
        let month = Month::try_from(month).ok()?;
        Some(Self {
            month_year: MonthYear {
                month: month.name().to_string(),
                year,
            },
        })
    }
}

impl Clock for FixedClock {
    fn month_year(&self) -> MonthYear {
        self.month_year.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_month_name() {
        let clock = FixedClock::new(2024, 3).unwrap();
        assert_eq!(
            clock.month_year(),
            MonthYear {
                month: "March".into(),
                year: 2024
            }
        );
    }

    #[test]
    fn test_fixed_clock_rejects_invalid_month() {
        assert!(FixedClock::new(2024, 0).is_none());
        assert!(FixedClock::new(2024, 13).is_none());
    }

    #[test]
    fn test_system_clock_month_is_named() {
        let now = SystemClock.month_year();
        let names = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        assert!(names.contains(&now.month.as_str()));
    }
}
