// Grid models
// Output of one layout pass: cells bound to dates and grid coordinates

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::calendar_date::CalendarDate;

/// Sparse per-day event counts; a missing date means zero events.
pub type EventCounts = HashMap<CalendarDate, u32>;

/// Which window of days the grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridMode {
    /// The days of one calendar month, placed on Sunday-first weeks.
    #[default]
    Month,
    /// `weeks * 7` consecutive days starting at the Sunday on or before the anchor.
    RollingWeeks { weeks: NonZeroU32 },
}

impl GridMode {
    /// Rolling window of `weeks` weeks; zero is rejected.
    pub fn rolling_weeks(weeks: u32) -> Result<Self, ValidationError> {
        NonZeroU32::new(weeks)
            .map(|weeks| Self::RollingWeeks { weeks })
            .ok_or(ValidationError::ZeroWeekCount)
    }
}

/// How Month mode treats the blank slots before day 1 and after the last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaddingMode {
    /// Blank slots are not emitted at all.
    #[default]
    Absent,
    /// Blank slots are emitted as disabled placeholders (never selectable).
    Placeholder,
}

/// Index of a cell within one layout pass. Not stable across passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(pub usize);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One selectable day tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub id: CellId,
    pub date: CalendarDate,
    pub row: u32,
    /// 0 = Sunday .. 6 = Saturday
    pub col: u32,
    pub event_count: u32,
    /// Normalized shading weight in `[0, 1]`
    pub intensity: f32,
}

/// A padding slot in Month mode, bound to a neighbouring month's day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaceholderCell {
    pub date: CalendarDate,
    pub row: u32,
    pub col: u32,
}

/// Immutable result of a layout pass.
///
/// Cells are in reading order (row-major) and `cells()[i].id == CellId(i)`.
/// A new pass produces a new `LayoutResult`; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub anchor: CalendarDate,
    pub mode: GridMode,
    pub row_count: u32,
    pub month_label: String,
    cells: Vec<GridCell>,
    placeholders: Vec<PlaceholderCell>,
}

impl LayoutResult {
    pub(crate) fn new(
        anchor: CalendarDate,
        mode: GridMode,
        row_count: u32,
        month_label: String,
        cells: Vec<GridCell>,
        placeholders: Vec<PlaceholderCell>,
    ) -> Self {
        Self {
            anchor,
            mode,
            row_count,
            month_label,
            cells,
            placeholders,
        }
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn placeholders(&self) -> &[PlaceholderCell] {
        &self.placeholders
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Look up a day cell by id.
    pub fn cell(&self, id: CellId) -> Option<&GridCell> {
        self.cells.get(id.0)
    }

    /// The day cell bound to `date`, if it is in this layout.
    pub fn find_date(&self, date: CalendarDate) -> Option<&GridCell> {
        // Cells are sorted by date, so a binary search is enough
        self.cells
            .binary_search_by(|cell| cell.date.cmp(&date))
            .ok()
            .map(|index| &self.cells[index])
    }

    pub fn contains_date(&self, date: CalendarDate) -> bool {
        self.find_date(date).is_some()
    }

    /// The day cell at a grid coordinate; `None` for blanks and placeholders.
    pub fn cell_at(&self, row: u32, col: u32) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.row == row && cell.col == col)
    }

    /// Every date that has a day cell, in layout order.
    pub fn dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.cells.iter().map(|cell| cell.date)
    }
}
