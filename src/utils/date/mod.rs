// Date utility functions
// Pure calendar math over CalendarDate: no I/O, no clock

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, TimeZone};

use crate::models::calendar_date::CalendarDate;

/// Short weekday labels in grid column order (column 0 = Sunday).
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Values that can be reduced to the calendar day they fall on.
///
/// Timezone-aware instants truncate to the day in their own timezone.
pub trait DayTruncate {
    fn truncate_to_day(&self) -> CalendarDate;
}

impl<Tz: TimeZone> DayTruncate for DateTime<Tz> {
    fn truncate_to_day(&self) -> CalendarDate {
        self.date_naive().into()
    }
}

impl DayTruncate for NaiveDateTime {
    fn truncate_to_day(&self) -> CalendarDate {
        self.date().into()
    }
}

impl DayTruncate for NaiveDate {
    fn truncate_to_day(&self) -> CalendarDate {
        (*self).into()
    }
}

impl DayTruncate for CalendarDate {
    fn truncate_to_day(&self) -> CalendarDate {
        *self
    }
}

/// Strip the time of day from an instant. Idempotent.
pub fn truncate_to_day<T: DayTruncate + ?Sized>(instant: &T) -> CalendarDate {
    instant.truncate_to_day()
}

/// Weekday of `date` as a grid column: 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(date: CalendarDate) -> u32 {
    date.as_naive().weekday().num_days_from_sunday()
}

/// Number of days in the month containing `date` (28..=31).
pub fn days_in_month(date: CalendarDate) -> u32 {
    month_length(date.year(), date.month())
}

fn month_length(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// First day of the month containing `date`.
pub fn first_of_month(date: CalendarDate) -> CalendarDate {
    let offset = u64::from(date.day() - 1);
    (date.as_naive() - Days::new(offset)).into()
}

/// Shift `date` by `n` days in either direction.
///
/// Crosses month and year boundaries; saturates at the limits of the
/// representable calendar instead of panicking.
pub fn add_days(date: CalendarDate, n: i64) -> CalendarDate {
    let naive = date.as_naive();
    let shifted = if n >= 0 {
        naive
            .checked_add_days(Days::new(n.unsigned_abs()))
            .unwrap_or(NaiveDate::MAX)
    } else {
        naive
            .checked_sub_days(Days::new(n.unsigned_abs()))
            .unwrap_or(NaiveDate::MIN)
    };
    shifted.into()
}

/// The Sunday on or before `date`.
pub fn sunday_on_or_before(date: CalendarDate) -> CalendarDate {
    add_days(date, -i64::from(weekday_index(date)))
}
