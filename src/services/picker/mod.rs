//! Calendar picker widget state.
//!
//! [`CalendarPicker`] is what a host application holds: it owns the anchor,
//! the grid mode, the latest event counts, the current [`LayoutResult`] and
//! the selection. Every change to anchor, mode or counts rebuilds the layout
//! wholesale and carries the selection across by date.

use anyhow::Result;

use crate::error::PickerError;
use crate::models::calendar_date::CalendarDate;
use crate::models::grid::{CellId, EventCounts, GridMode, LayoutResult};
use crate::models::selection::{SelectionChange, SelectionState};
use crate::models::settings::PickerSettings;
use crate::services::clock::{Clock, SystemClock};
use crate::services::density::DensityMapper;
use crate::services::layout::{next_month, previous_month, LayoutEngine};
use crate::services::provider::CalendarDataProvider;
use crate::services::selection::SelectionMachine;

/// Receives the selected date after every successful selection.
pub trait DateChangeListener {
    fn date_changed(&mut self, date: CalendarDate);
}

impl<F: FnMut(CalendarDate)> DateChangeListener for F {
    fn date_changed(&mut self, date: CalendarDate) {
        self(date)
    }
}

/// Handle returned by [`CalendarPicker::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct CalendarPicker {
    engine: LayoutEngine,
    clock: Box<dyn Clock>,
    mode: GridMode,
    anchor: CalendarDate,
    event_counts: EventCounts,
    layout: LayoutResult,
    selection: SelectionMachine,
    listeners: Vec<(SubscriptionId, Box<dyn DateChangeListener>)>,
    next_subscription: u64,
}

impl CalendarPicker {
    /// Create a picker anchored on the clock's today, with nothing selected.
    pub fn new(engine: LayoutEngine, mode: GridMode, clock: impl Clock + 'static) -> Self {
        let anchor = clock.today();
        let event_counts = EventCounts::new();
        let layout = engine.layout(anchor, mode, &event_counts);

        Self {
            engine,
            clock: Box::new(clock),
            mode,
            anchor,
            event_counts,
            layout,
            selection: SelectionMachine::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Picker configured from settings with the system clock.
    pub fn from_settings(settings: &PickerSettings) -> Result<Self, PickerError> {
        let clock = SystemClock::from_settings(settings)?;
        Self::from_settings_with_clock(settings, clock)
    }

    pub fn from_settings_with_clock(
        settings: &PickerSettings,
        clock: impl Clock + 'static,
    ) -> Result<Self, PickerError> {
        settings.validate()?;
        let density = DensityMapper::new(settings.sensitivity)?;
        let engine = LayoutEngine::new(density, settings.padding);
        Ok(Self::new(engine, settings.grid_mode, clock))
    }

    pub fn anchor(&self) -> CalendarDate {
        self.anchor
    }

    pub fn mode(&self) -> GridMode {
        self.mode
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    pub fn event_counts(&self) -> &EventCounts {
        &self.event_counts
    }

    pub fn set_anchor_date(&mut self, date: CalendarDate) {
        self.anchor = date;
        self.rebuild();
    }

    pub fn set_grid_mode(&mut self, mode: GridMode) {
        self.mode = mode;
        self.rebuild();
    }

    pub fn navigate_next_month(&mut self) {
        self.anchor = next_month(self.anchor);
        log::info!("Navigated to {}", self.anchor.format("%B %Y"));
        self.rebuild();
    }

    pub fn navigate_previous_month(&mut self) {
        self.anchor = previous_month(self.anchor);
        log::info!("Navigated to {}", self.anchor.format("%B %Y"));
        self.rebuild();
    }

    pub fn go_to_today(&mut self) {
        self.set_anchor_date(self.today());
    }

    /// Dates the next layout will show for the current anchor and mode.
    pub fn visible_dates(&self) -> Vec<CalendarDate> {
        self.engine.visible_dates(self.anchor, self.mode)
    }

    /// Replace the event counts and relayout.
    pub fn set_event_counts(&mut self, counts: EventCounts) {
        self.event_counts = counts;
        self.rebuild();
    }

    /// Fetch counts for the visible window from `provider`.
    ///
    /// On failure the previous counts stay in place (missing days read as
    /// zero), the grid is still rebuilt, and the error is returned to the host.
    pub fn refresh_event_counts(&mut self, provider: &dyn CalendarDataProvider) -> Result<()> {
        let dates = self.visible_dates();
        let fetched = provider.event_counts(&dates);

        let outcome = match fetched {
            Ok(counts) => {
                self.event_counts = counts;
                Ok(())
            }
            Err(err) => {
                log::warn!("Event count fetch failed, keeping previous counts: {err:#}");
                Err(err)
            }
        };

        self.rebuild();
        outcome
    }

    pub fn selection(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn selected_date(&self) -> Option<CalendarDate> {
        self.selection.selected_date()
    }

    pub fn is_selected(&self, id: CellId) -> bool {
        self.selection.is_selected(id)
    }

    /// Select cell `id` of the current layout (the adapter's tap callback).
    pub fn select(&mut self, id: CellId, date: CalendarDate) -> Result<SelectionChange, PickerError> {
        let change = self.selection.select(&self.layout, id, date)?;
        self.announce(change);
        Ok(change)
    }

    /// Select the visible cell bound to `date`.
    pub fn select_date(&mut self, date: CalendarDate) -> Result<SelectionChange, PickerError> {
        let change = self.selection.select_date(&self.layout, date)?;
        self.announce(change);
        Ok(change)
    }

    pub fn clear_selection(&mut self) -> Option<CellId> {
        self.selection.clear()
    }

    pub fn subscribe(&mut self, listener: impl DateChangeListener + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn announce(&mut self, change: SelectionChange) {
        log::info!("Date changed to {} (cell {})", change.date, change.selected);
        for (_, listener) in self.listeners.iter_mut() {
            listener.date_changed(change.date);
        }
    }

    fn rebuild(&mut self) {
        self.layout = self.engine.layout(self.anchor, self.mode, &self.event_counts);
        self.selection.on_layout_rebuilt(&self.layout);
    }
}
