// Calendar date module
// Timezone-naive day value used for every grid cell and selection

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A single calendar day with no time component.
///
/// Two dates are equal iff their year, month and day are equal. Ordering is
/// chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Create a date from its components, rejecting impossible days.
    ///
    /// # Examples
    /// ```
    /// use calendar_picker::models::calendar_date::CalendarDate;
    ///
    /// let leap_day = CalendarDate::new(2024, 2, 29).unwrap();
    /// assert_eq!(leap_day.day(), 29);
    /// assert!(CalendarDate::new(2023, 2, 29).is_err());
    /// assert!(CalendarDate::new(2024, 3, 32).is_err());
    /// ```
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth { month });
        }

        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => Ok(Self(date)),
            None if day == 0 || day > 31 || NaiveDate::from_ymd_opt(year, month, 1).is_some() => {
                Err(ValidationError::InvalidDay { year, month, day })
            }
            None => Err(ValidationError::YearOutOfRange { year }),
        }
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The underlying chrono date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Format with a chrono format string, e.g. `"%B %Y"`.
    pub fn format(&self, pattern: &str) -> String {
        self.0.format(pattern).to_string()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = ValidationError;

    /// Parse an ISO `YYYY-MM-DD` string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ValidationError::Unparseable {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_new_valid_date() {
        let date = CalendarDate::new(2024, 3, 10).unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 3);
        assert_eq!(date.day(), 10);
    }

    #[test_case(2024, 0, 1 => ValidationError::InvalidMonth { month: 0 } ; "month zero")]
    #[test_case(2024, 13, 1 => ValidationError::InvalidMonth { month: 13 } ; "month thirteen")]
    #[test_case(2024, 3, 32 => ValidationError::InvalidDay { year: 2024, month: 3, day: 32 } ; "day thirty two")]
    #[test_case(2024, 4, 31 => ValidationError::InvalidDay { year: 2024, month: 4, day: 31 } ; "april has thirty days")]
    #[test_case(2023, 2, 29 => ValidationError::InvalidDay { year: 2023, month: 2, day: 29 } ; "non leap february")]
    #[test_case(2024, 6, 0 => ValidationError::InvalidDay { year: 2024, month: 6, day: 0 } ; "day zero")]
    fn test_new_rejects_malformed_input(year: i32, month: u32, day: u32) -> ValidationError {
        CalendarDate::new(year, month, day).unwrap_err()
    }

    #[test]
    fn test_new_rejects_unrepresentable_year() {
        let err = CalendarDate::new(i32::MAX, 1, 1).unwrap_err();
        assert_eq!(err, ValidationError::YearOutOfRange { year: i32::MAX });
    }

    #[test]
    fn test_equality_is_component_wise() {
        let a = CalendarDate::new(2024, 3, 10).unwrap();
        let b: CalendarDate = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap().into();
        assert_eq!(a, b);
        assert_ne!(a, CalendarDate::new(2024, 3, 11).unwrap());
        assert!(a < CalendarDate::new(2024, 3, 11).unwrap());
    }

    #[test]
    fn test_display_and_parse() {
        let date = CalendarDate::new(2024, 3, 1).unwrap();
        assert_eq!(date.to_string(), "2024-03-01");
        assert_eq!("2024-03-01".parse::<CalendarDate>().unwrap(), date);
        assert!("2024-02-30".parse::<CalendarDate>().is_err());
        assert!("March 1".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn test_format_month_label() {
        let date = CalendarDate::new(2024, 3, 17).unwrap();
        assert_eq!(date.format("%B %Y"), "March 2024");
    }
}
