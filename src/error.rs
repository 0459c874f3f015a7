//! Error types for the picker core.
//!
//! Date construction and configuration problems surface as
//! [`ValidationError`]; widget operations that can also fail on selection
//! return [`PickerError`].

use thiserror::Error;

use crate::models::calendar_date::CalendarDate;
use crate::models::grid::CellId;

/// Rejected input at the date arithmetic or configuration boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("month {month} is outside 1..=12")]
    InvalidMonth { month: u32 },

    #[error("day {day} does not exist in {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },

    #[error("year {year} is outside the supported calendar range")]
    YearOutOfRange { year: i32 },

    #[error("'{input}' is not a YYYY-MM-DD date")]
    Unparseable { input: String },

    #[error("sensitivity must be a finite number above zero, got {value}")]
    InvalidSensitivity { value: f32 },

    #[error("rolling week count must be at least 1")]
    ZeroWeekCount,

    #[error("marker scale must be within (0, 1], got {value}")]
    InvalidMarkerScale { value: f32 },

    #[error("'{value}' is not a #RRGGBB color")]
    InvalidColor { value: String },

    #[error("unknown timezone '{name}'")]
    UnknownTimezone { name: String },
}

/// Errors returned by widget operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PickerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("cell {id} does not exist in the current layout")]
    InvalidSelection { id: CellId },

    #[error("cell {id} is bound to {actual}, not {requested}")]
    SelectionDateMismatch {
        id: CellId,
        requested: CalendarDate,
        actual: CalendarDate,
    },

    #[error("{date} is not part of the current layout")]
    DateNotInLayout { date: CalendarDate },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_name_the_input() {
        let err = ValidationError::InvalidDay {
            year: 2023,
            month: 2,
            day: 29,
        };
        assert_eq!(err.to_string(), "day 29 does not exist in 2023-02");

        let err = ValidationError::Unparseable {
            input: "03/10/2024".to_string(),
        };
        assert!(err.to_string().contains("03/10/2024"));
    }

    #[test]
    fn test_picker_error_wraps_validation_transparently() {
        let inner = ValidationError::ZeroWeekCount;
        let err: PickerError = inner.clone().into();
        assert_eq!(err, PickerError::Validation(inner.clone()));
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn test_invalid_selection_message() {
        let err = PickerError::InvalidSelection { id: CellId(42) };
        assert_eq!(err.to_string(), "cell 42 does not exist in the current layout");
    }
}
