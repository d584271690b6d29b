use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("month {0} is out of range (1-12)")]
    Month(u32),
    #[error("day {0} is out of range (1-31)")]
    Day(u32),
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    Format(String),
}

/// A month/day pair, independent of year.
///
/// Only checked against 1-12 and 1-31: `2-31` is accepted and simply looks up
/// a page that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDay {
    month: u32,
    day: u32,
}

impl CalendarDay {
    pub fn new(month: u32, day: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::Month(month));
        }
        if !(1..=31).contains(&day) {
            return Err(CalendarError::Day(day));
        }
        Ok(Self { month, day })
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn day(self) -> u32 {
        self.day
    }

    /// All 366 days of a leap year, January 1st first.
    pub fn all() -> Vec<CalendarDay> {
        let mut days = Vec::with_capacity(366);
        let Some(mut date) = chrono::NaiveDate::from_ymd_opt(2024, 1, 1) else {
            return days;
        };
        while date.year() == 2024 {
            days.push(CalendarDay {
                month: date.month(),
                day: date.day(),
            });
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        days
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// The date a discovery is asked for: a target year plus the calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDate {
    pub year: i32,
    pub day: CalendarDay,
}

impl QueryDate {
    pub fn today() -> Self {
        let now = chrono::Local::now().date_naive();
        Self {
            year: now.year(),
            day: CalendarDay {
                month: now.month(),
                day: now.day(),
            },
        }
    }
}

impl FromStr for QueryDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || CalendarError::Format(s.to_string());
        let mut parts = s.trim().splitn(3, '-');
        let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(bad());
        };
        if y.len() != 4 || m.len() != 2 || d.len() != 2 {
            return Err(bad());
        }
        let year = y.parse::<i32>().map_err(|_| bad())?;
        let month = m.parse::<u32>().map_err(|_| bad())?;
        let day = d.parse::<u32>().map_err(|_| bad())?;
        Ok(Self {
            year,
            day: CalendarDay::new(month, day)?,
        })
    }
}

impl fmt::Display for QueryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{}", self.year, self.day)
    }
}
