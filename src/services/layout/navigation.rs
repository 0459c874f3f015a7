//! Month-to-month anchor movement.
//!
//! Both directions land in the middle of the neighbouring month before
//! truncating to its first day, so month length never causes a skip or a
//! repeat.

use crate::models::calendar_date::CalendarDate;
use crate::utils::date::{add_days, days_in_month, first_of_month};

const MID_MONTH_OFFSET: i64 = 15;

/// First day of the month after the one containing `anchor`.
pub fn next_month(anchor: CalendarDate) -> CalendarDate {
    let first = first_of_month(anchor);
    let mid_next = add_days(first, i64::from(days_in_month(anchor)) + MID_MONTH_OFFSET);
    first_of_month(mid_next)
}

/// First day of the month before the one containing `anchor`.
pub fn previous_month(anchor: CalendarDate) -> CalendarDate {
    let mid_previous = add_days(first_of_month(anchor), -MID_MONTH_OFFSET);
    first_of_month(mid_previous)
}
