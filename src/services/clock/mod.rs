// Clock service
// Source of "today" for the picker, injectable so tests can pin the date

use chrono::{Local, Utc};
use chrono_tz::Tz;

use crate::error::ValidationError;
use crate::models::calendar_date::CalendarDate;
use crate::models::settings::PickerSettings;
use crate::utils::date::truncate_to_day;

pub trait Clock {
    fn today(&self) -> CalendarDate;
}

/// Wall-clock time in the local zone or a fixed IANA zone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SystemClock {
    timezone: Option<Tz>,
}

impl SystemClock {
    pub fn local() -> Self {
        Self { timezone: None }
    }

    pub fn in_timezone(timezone: Tz) -> Self {
        Self {
            timezone: Some(timezone),
        }
    }

    pub fn from_settings(settings: &PickerSettings) -> Result<Self, ValidationError> {
        Ok(Self {
            timezone: settings.timezone()?,
        })
    }
}

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        match self.timezone {
            Some(tz) => truncate_to_day(&Utc::now().with_timezone(&tz)),
            None => truncate_to_day(&Local::now()),
        }
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}
