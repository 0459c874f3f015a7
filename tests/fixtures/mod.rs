// Test fixtures - reusable test data
// Shared by the integration and property tests

#![allow(dead_code)]

use calendar_picker::services::clock::FixedClock;
use calendar_picker::services::layout::LayoutEngine;
use calendar_picker::{CalendarDate, CalendarPicker, EventCounts, GridMode};

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    /// Friday March 1, 2024
    pub fn march_1_2024() -> CalendarDate {
        ymd(2024, 3, 1)
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> CalendarDate {
        ymd(2024, 2, 29)
    }

    /// Jan 31, 2024 - next month must not skip February
    pub fn jan_31_2024() -> CalendarDate {
        ymd(2024, 1, 31)
    }

    /// Dec 31, 2025 (year boundary)
    pub fn new_years_eve_2025() -> CalendarDate {
        ymd(2025, 12, 31)
    }
}

/// Sample event counts
pub mod counts {
    use super::*;

    /// A busy week in March 2024, peaking at 8 on the 13th
    pub fn busy_week_march_2024() -> EventCounts {
        [(10, 1), (11, 2), (12, 4), (13, 8), (14, 12)]
            .into_iter()
            .map(|(day, count)| (dates::ymd(2024, 3, day), count))
            .collect()
    }
}

/// Picker pinned to `today` in Month mode with default settings.
pub fn picker_on(today: CalendarDate) -> CalendarPicker {
    CalendarPicker::new(LayoutEngine::default(), GridMode::Month, FixedClock(today))
}
