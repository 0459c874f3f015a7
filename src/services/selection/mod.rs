//! Single-selection state machine.
//!
//! Tracks at most one selected cell. Selections are validated against the
//! layout they were made in and re-resolved by date after every rebuild.
//! A date that scrolls out of the grid is remembered and becomes selected
//! again once a later layout shows it.

use crate::error::PickerError;
use crate::models::calendar_date::CalendarDate;
use crate::models::grid::{CellId, LayoutResult};
use crate::models::selection::{SelectionChange, SelectionState};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionMachine {
    state: SelectionState,
    // Selected date currently outside the grid
    retained: Option<CalendarDate>,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn selected_id(&self) -> Option<CellId> {
        self.state.id()
    }

    pub fn selected_date(&self) -> Option<CalendarDate> {
        self.state.date()
    }

    pub fn is_selected(&self, id: CellId) -> bool {
        self.state.id() == Some(id)
    }

    /// Select cell `id`, which must be bound to `date` in `layout`.
    ///
    /// On error the state is left unchanged.
    pub fn select(
        &mut self,
        layout: &LayoutResult,
        id: CellId,
        date: CalendarDate,
    ) -> Result<SelectionChange, PickerError> {
        let cell = layout
            .cell(id)
            .ok_or(PickerError::InvalidSelection { id })?;

        if cell.date != date {
            return Err(PickerError::SelectionDateMismatch {
                id,
                requested: date,
                actual: cell.date,
            });
        }

        Ok(self.apply(id, date))
    }

    /// Select whichever cell is bound to `date` in `layout`.
    pub fn select_date(
        &mut self,
        layout: &LayoutResult,
        date: CalendarDate,
    ) -> Result<SelectionChange, PickerError> {
        let id = layout
            .find_date(date)
            .map(|cell| cell.id)
            .ok_or(PickerError::DateNotInLayout { date })?;

        Ok(self.apply(id, date))
    }

    /// Drop the selection; returns the cell that lost it.
    pub fn clear(&mut self) -> Option<CellId> {
        let previous = self.state.id();
        self.state = SelectionState::Unselected;
        self.retained = None;
        previous
    }

    /// Carry the selection over to a freshly built layout.
    ///
    /// The selected date keeps its selection under its new id if the layout
    /// shows it; otherwise the machine becomes unselected and remembers the
    /// date for a later rebuild.
    pub fn on_layout_rebuilt(&mut self, layout: &LayoutResult) -> SelectionState {
        let Some(date) = self.state.date().or(self.retained) else {
            return self.state;
        };

        match layout.find_date(date) {
            Some(cell) => {
                self.state = SelectionState::Selected { id: cell.id, date };
                self.retained = None;
            }
            None => {
                log::debug!("Selected date {} left the grid", date);
                self.state = SelectionState::Unselected;
                self.retained = Some(date);
            }
        }
        self.state
    }

    /// Date hidden by navigation that will be re-selected when visible again.
    pub fn retained_date(&self) -> Option<CalendarDate> {
        self.retained
    }

    fn apply(&mut self, id: CellId, date: CalendarDate) -> SelectionChange {
        let deselected = self.state.id();
        self.state = SelectionState::Selected { id, date };
        self.retained = None;
        SelectionChange {
            deselected,
            selected: id,
            date,
        }
    }
}
