//! Grid layout engine.
//!
//! Maps an anchor date and a [`GridMode`] to the cells of one grid pass.
//! Every call is pure and returns a fresh [`LayoutResult`].

use std::num::NonZeroU32;

use crate::models::calendar_date::CalendarDate;
use crate::models::grid::{
    CellId, EventCounts, GridCell, GridMode, LayoutResult, PaddingMode, PlaceholderCell,
};
use crate::services::density::DensityMapper;
use crate::utils::date::{
    add_days, days_in_month, first_of_month, sunday_on_or_before, weekday_index,
};

pub mod navigation;

pub use navigation::{next_month, previous_month};

const DAYS_PER_WEEK: u32 = 7;
const MONTH_LABEL_FORMAT: &str = "%B %Y";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutEngine {
    density: DensityMapper,
    padding: PaddingMode,
}

impl LayoutEngine {
    pub fn new(density: DensityMapper, padding: PaddingMode) -> Self {
        Self { density, padding }
    }

    pub fn density(&self) -> DensityMapper {
        self.density
    }

    pub fn padding(&self) -> PaddingMode {
        self.padding
    }

    /// Lay out the grid for `anchor` in `mode`.
    ///
    /// Dates missing from `event_counts` get a count of zero.
    pub fn layout(
        &self,
        anchor: CalendarDate,
        mode: GridMode,
        event_counts: &EventCounts,
    ) -> LayoutResult {
        let result = match mode {
            GridMode::Month => self.layout_month(anchor, event_counts),
            GridMode::RollingWeeks { weeks } => self.layout_rolling(anchor, weeks, event_counts),
        };

        log::debug!(
            "Layout pass: anchor={} mode={:?} cells={} rows={}",
            anchor,
            mode,
            result.len(),
            result.row_count
        );
        result
    }

    /// Every date the layout for `anchor`/`mode` binds to a day cell.
    pub fn visible_dates(&self, anchor: CalendarDate, mode: GridMode) -> Vec<CalendarDate> {
        let (start, count) = match mode {
            GridMode::Month => (first_of_month(anchor), days_in_month(anchor)),
            GridMode::RollingWeeks { weeks } => (
                sunday_on_or_before(anchor),
                weeks.get().saturating_mul(DAYS_PER_WEEK),
            ),
        };
        (0..count).map(|i| add_days(start, i64::from(i))).collect()
    }

    fn layout_month(&self, anchor: CalendarDate, event_counts: &EventCounts) -> LayoutResult {
        let first = first_of_month(anchor);
        let start_weekday = weekday_index(first);
        let len = days_in_month(anchor);
        let row_count = (start_weekday + len).div_ceil(DAYS_PER_WEEK);

        let cells = (0..len)
            .map(|i| {
                let date = add_days(first, i64::from(i));
                let grid_index = start_weekday + i;
                self.cell(
                    i as usize,
                    date,
                    grid_index / DAYS_PER_WEEK,
                    grid_index % DAYS_PER_WEEK,
                    event_counts,
                )
            })
            .collect();

        let placeholders = match self.padding {
            PaddingMode::Absent => Vec::new(),
            PaddingMode::Placeholder => {
                let leading = (0..start_weekday).map(|col| PlaceholderCell {
                    date: add_days(first, i64::from(col) - i64::from(start_weekday)),
                    row: 0,
                    col,
                });
                let trailing = (start_weekday + len..row_count * DAYS_PER_WEEK).map(|grid_index| {
                    PlaceholderCell {
                        date: add_days(first, i64::from(grid_index - start_weekday)),
                        row: grid_index / DAYS_PER_WEEK,
                        col: grid_index % DAYS_PER_WEEK,
                    }
                });
                leading.chain(trailing).collect()
            }
        };

        LayoutResult::new(
            anchor,
            GridMode::Month,
            row_count,
            first.format(MONTH_LABEL_FORMAT),
            cells,
            placeholders,
        )
    }

    fn layout_rolling(
        &self,
        anchor: CalendarDate,
        weeks: NonZeroU32,
        event_counts: &EventCounts,
    ) -> LayoutResult {
        let start = sunday_on_or_before(anchor);
        let total = weeks.get().saturating_mul(DAYS_PER_WEEK);

        let cells = (0..total)
            .map(|i| {
                self.cell(
                    i as usize,
                    add_days(start, i64::from(i)),
                    i / DAYS_PER_WEEK,
                    i % DAYS_PER_WEEK,
                    event_counts,
                )
            })
            .collect();

        LayoutResult::new(
            anchor,
            GridMode::RollingWeeks { weeks },
            weeks.get(),
            anchor.format(MONTH_LABEL_FORMAT),
            cells,
            Vec::new(),
        )
    }

    fn cell(
        &self,
        index: usize,
        date: CalendarDate,
        row: u32,
        col: u32,
        event_counts: &EventCounts,
    ) -> GridCell {
        let event_count = event_counts.get(&date).copied().unwrap_or(0);
        GridCell {
            id: CellId(index),
            date,
            row,
            col,
            event_count,
            intensity: self.density.intensity(i64::from(event_count)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    fn engine() -> LayoutEngine {
        LayoutEngine::new(DensityMapper::new(8.0).unwrap(), PaddingMode::Absent)
    }

    #[test]
    fn test_march_2024_month_layout() {
        let layout = engine().layout(ymd(2024, 3, 1), GridMode::Month, &EventCounts::new());

        assert_eq!(layout.row_count, 6);
        assert_eq!(layout.len(), 31);
        assert_eq!(layout.month_label, "March 2024");

        let first = layout.cell(CellId(0)).unwrap();
        assert_eq!((first.date, first.row, first.col), (ymd(2024, 3, 1), 0, 5));

        let last = layout.cell(CellId(30)).unwrap();
        assert_eq!((last.date, last.row, last.col), (ymd(2024, 3, 31), 5, 0));
        assert!(layout.placeholders().is_empty());
    }

    #[test]
    fn test_month_layout_ignores_anchor_day() {
        let from_first = engine().layout(ymd(2024, 3, 1), GridMode::Month, &EventCounts::new());
        let from_mid = engine().layout(ymd(2024, 3, 17), GridMode::Month, &EventCounts::new());
        assert_eq!(from_first.cells(), from_mid.cells());
        assert_eq!(from_mid.anchor, ymd(2024, 3, 17));
    }

    #[test]
    fn test_february_starting_sunday_fits_four_rows() {
        // February 2015 starts on a Sunday and has 28 days
        let layout = engine().layout(ymd(2015, 2, 10), GridMode::Month, &EventCounts::new());
        assert_eq!(layout.row_count, 4);
        assert_eq!(layout.len(), 28);
        assert_eq!(layout.cell(CellId(27)).map(|c| (c.row, c.col)), Some((3, 6)));
    }

    #[test]
    fn test_event_counts_drive_intensity() {
        let mut counts = EventCounts::new();
        counts.insert(ymd(2024, 3, 10), 4);
        counts.insert(ymd(2024, 4, 10), 99);

        let layout = engine().layout(ymd(2024, 3, 1), GridMode::Month, &counts);

        for cell in layout.cells() {
            if cell.date == ymd(2024, 3, 10) {
                assert_eq!(cell.event_count, 4);
                assert_eq!(cell.intensity, 0.5);
            } else {
                assert_eq!(cell.event_count, 0);
                assert_eq!(cell.intensity, 0.0);
            }
        }
    }

    #[test]
    fn test_ids_follow_reading_order() {
        let layout = engine().layout(ymd(2024, 7, 4), GridMode::Month, &EventCounts::new());
        for (index, cell) in layout.cells().iter().enumerate() {
            assert_eq!(cell.id, CellId(index));
        }
        let positions: Vec<(u32, u32)> = layout.cells().iter().map(|c| (c.row, c.col)).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_placeholder_padding_fills_blank_slots() {
        let engine = LayoutEngine::new(DensityMapper::default(), PaddingMode::Placeholder);
        let layout = engine.layout(ymd(2024, 3, 1), GridMode::Month, &EventCounts::new());

        // 5 leading (Feb 25..29) + 36..42 trailing (Apr 1..6)
        assert_eq!(layout.placeholders().len(), 5 + 6);
        assert_eq!(layout.len(), 31);

        let leading = layout.placeholders()[0];
        assert_eq!((leading.date, leading.row, leading.col), (ymd(2024, 2, 25), 0, 0));
        let last_leading = layout.placeholders()[4];
        assert_eq!((last_leading.date, last_leading.col), (ymd(2024, 2, 29), 4));

        let trailing = layout.placeholders()[5];
        assert_eq!((trailing.date, trailing.row, trailing.col), (ymd(2024, 4, 1), 5, 1));
        let last = layout.placeholders()[10];
        assert_eq!((last.date, last.row, last.col), (ymd(2024, 4, 6), 5, 6));

        // Placeholders never become selectable cells
        assert!(layout.cell_at(0, 0).is_none());
        assert!(!layout.contains_date(ymd(2024, 2, 29)));
    }

    #[test]
    fn test_rolling_weeks_layout() {
        let mode = GridMode::rolling_weeks(2).unwrap();
        let layout = engine().layout(ymd(2024, 3, 1), mode, &EventCounts::new());

        assert_eq!(layout.row_count, 2);
        assert_eq!(layout.len(), 14);
        assert_eq!(layout.mode, mode);
        assert_eq!(layout.cell(CellId(0)).map(|c| c.date), Some(ymd(2024, 2, 25)));
        assert_eq!(layout.cell(CellId(13)).map(|c| c.date), Some(ymd(2024, 3, 9)));
        assert_eq!(layout.cell(CellId(8)).map(|c| (c.row, c.col)), Some((1, 1)));
        assert_eq!(layout.month_label, "March 2024");
    }

    #[test]
    fn test_rolling_weeks_ignores_placeholder_padding() {
        let engine = LayoutEngine::new(DensityMapper::default(), PaddingMode::Placeholder);
        let mode = GridMode::rolling_weeks(1).unwrap();
        let layout = engine.layout(ymd(2024, 12, 31), mode, &EventCounts::new());
        assert!(layout.placeholders().is_empty());
        assert_eq!(layout.cell(CellId(6)).map(|c| c.date), Some(ymd(2025, 1, 4)));
    }

    #[test]
    fn test_visible_dates_match_layout() {
        let engine = engine();
        for mode in [GridMode::Month, GridMode::rolling_weeks(5).unwrap()] {
            let anchor = ymd(2024, 2, 14);
            let layout = engine.layout(anchor, mode, &EventCounts::new());
            assert_eq!(
                engine.visible_dates(anchor, mode),
                layout.dates().collect::<Vec<_>>()
            );
        }
    }
}
