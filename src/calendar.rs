use chrono::{Datelike, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::errors::{CardError, Result};

/// reference "today" for a single query
///
/// Only the day-of-month and the length of the reference month matter to the
/// cycle calculators; the month and year are used to derive that length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCalendarContext")]
pub struct CalendarContext {
    reference_day: u32,
    days_in_month: u32,
}

impl CalendarContext {
    /// build from raw parts, rejecting impossible combinations
    pub fn new(reference_day: u32, days_in_month: u32) -> Result<Self> {
        if !(28..=31).contains(&days_in_month) {
            return Err(CardError::InvalidReferenceDate {
                message: format!("a month cannot have {} days", days_in_month),
            });
        }
        if reference_day == 0 || reference_day > days_in_month {
            return Err(CardError::InvalidReferenceDate {
                message: format!(
                    "day {} is outside a {}-day month",
                    reference_day, days_in_month
                ),
            });
        }

        Ok(Self {
            reference_day,
            days_in_month,
        })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            reference_day: date.day(),
            days_in_month: days_in_month(date.year(), date.month()),
        }
    }

    /// use the provider's current date (system clock or test clock)
    pub fn from_time_provider(time_provider: &SafeTimeProvider) -> Self {
        Self::from_date(time_provider.now().date_naive())
    }

    pub fn reference_day(&self) -> u32 {
        self.reference_day
    }

    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }
}

/// unchecked wire form; deserialization goes through `CalendarContext::new`
#[derive(Deserialize)]
struct RawCalendarContext {
    reference_day: u32,
    days_in_month: u32,
}

impl TryFrom<RawCalendarContext> for CalendarContext {
    type Error = CardError;

    fn try_from(raw: RawCalendarContext) -> Result<Self> {
        Self::new(raw.reference_day, raw.days_in_month)
    }
}

impl From<NaiveDate> for CalendarContext {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

/// days in month (1-based month, as chrono reports it)
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
