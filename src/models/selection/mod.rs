// Selection models

use crate::models::calendar_date::CalendarDate;
use crate::models::grid::CellId;

/// Current single-selection state of a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected { id: CellId, date: CalendarDate },
}

impl SelectionState {
    pub fn id(&self) -> Option<CellId> {
        match self {
            Self::Unselected => None,
            Self::Selected { id, .. } => Some(*id),
        }
    }

    pub fn date(&self) -> Option<CalendarDate> {
        match self {
            Self::Unselected => None,
            Self::Selected { date, .. } => Some(*date),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected { .. })
    }
}

/// Notification for the view adapter after a successful select.
///
/// `deselected` is the previously selected cell (if any) that must drop
/// its highlight; `selected` is the cell that gains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub deselected: Option<CellId>,
    pub selected: CellId,
    pub date: CalendarDate,
}
