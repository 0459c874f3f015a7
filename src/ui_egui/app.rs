//! Demo host for the picker widget.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use anyhow::Result;
use egui::Color32;

use super::picker_view::PickerView;
use crate::models::calendar_date::CalendarDate;
use crate::models::grid::{EventCounts, GridMode};
use crate::models::settings::PickerSettings;
use crate::services::picker::CalendarPicker;
use crate::services::provider::{CalendarDataProvider, InMemoryProvider, SqliteEventStore};
use crate::utils::date::add_days;

const ROLLING_WEEKS: u32 = 6;
const SAMPLE_DAYS: i64 = 90;

pub struct PickerDemoApp {
    picker: CalendarPicker,
    view: PickerView,
    provider: Box<dyn CalendarDataProvider>,
    /// Pending answer to the provider's authorization request
    authorization_rx: Option<Receiver<bool>>,
    authorized: bool,
    last_selected: Rc<RefCell<Option<CalendarDate>>>,
    error_message: Option<String>,
}

impl PickerDemoApp {
    pub fn new(ctx: &egui::Context, settings: PickerSettings) -> Result<Self> {
        let mut picker = CalendarPicker::from_settings(&settings)?;
        let view = PickerView::from_settings(&settings, ctx.style().visuals.dark_mode);
        let provider = open_provider(&settings, picker.today());
        let authorization_rx = Some(provider.request_authorization());

        let last_selected = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&last_selected);
        picker.subscribe(move |date: CalendarDate| {
            log::info!("Selected {}", date.format("%A %-d %B %Y"));
            *sink.borrow_mut() = Some(date);
        });

        Ok(Self {
            picker,
            view,
            provider,
            authorization_rx,
            authorized: false,
            last_selected,
            error_message: None,
        })
    }

    fn poll_authorization(&mut self, ctx: &egui::Context) {
        if let Some(rx) = &self.authorization_rx {
            match rx.try_recv() {
                Ok(granted) => {
                    self.authorization_rx = None;
                    self.authorized = granted;
                    if granted {
                        self.refresh_counts();
                    } else {
                        log::warn!("Calendar access denied; tiles stay unshaded");
                        self.error_message = Some("Calendar access denied".to_string());
                    }
                }
                Err(TryRecvError::Empty) => {
                    ctx.request_repaint_after(Duration::from_millis(200));
                }
                Err(TryRecvError::Disconnected) => {
                    self.authorization_rx = None;
                    log::warn!("Calendar authorization request dropped");
                    self.error_message = Some("Calendar access request failed".to_string());
                }
            }
        }
    }

    fn refresh_counts(&mut self) {
        if !self.authorized {
            return;
        }
        match self.picker.refresh_event_counts(self.provider.as_ref()) {
            Ok(()) => self.error_message = None,
            Err(err) => self.error_message = Some(format!("Could not load events: {err}")),
        }
    }

    /// Anchor on `days` after today and select that day.
    fn jump_from_today(&mut self, days: i64) {
        let target = add_days(self.picker.today(), days);
        self.picker.set_anchor_date(target);
        self.refresh_counts();
        if let Err(err) = self.picker.select_date(target) {
            log::warn!("Could not select {}: {}", target, err);
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Today").clicked() {
                self.picker.go_to_today();
                self.refresh_counts();
            }
            if ui.button("+10 days").clicked() {
                self.jump_from_today(10);
            }
            if ui.button("+40 days").clicked() {
                self.jump_from_today(40);
            }
        });

        ui.horizontal(|ui| {
            let mode = self.picker.mode();
            let rolling = GridMode::rolling_weeks(ROLLING_WEEKS).unwrap_or_default();
            if ui
                .radio(matches!(mode, GridMode::Month), "Month")
                .clicked()
            {
                self.picker.set_grid_mode(GridMode::Month);
                self.refresh_counts();
            }
            if ui
                .radio(
                    matches!(mode, GridMode::RollingWeeks { .. }),
                    format!("{ROLLING_WEEKS} weeks"),
                )
                .clicked()
            {
                self.picker.set_grid_mode(rolling);
                self.refresh_counts();
            }
        });
    }
}

impl eframe::App for PickerDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_authorization(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let response = self.view.show(ui, &mut self.picker);
            if response.navigated {
                self.refresh_counts();
            }

            ui.separator();
            self.render_controls(ui);
            ui.add_space(6.0);

            let selected = match *self.last_selected.borrow() {
                Some(date) => date.format("%A %-d %B %Y"),
                None => "none".to_string(),
            };
            ui.label(format!("Selected: {selected}"));

            if let Some(message) = &self.error_message {
                ui.colored_label(Color32::LIGHT_RED, message);
            }
        });
    }
}

/// SQLite store from settings, else sample counts around `today`.
fn open_provider(settings: &PickerSettings, today: CalendarDate) -> Box<dyn CalendarDataProvider> {
    if let Some(path) = &settings.event_store {
        match SqliteEventStore::open(path) {
            Ok(store) => return Box::new(store),
            Err(err) => log::warn!("{err:#}; falling back to sample data"),
        }
    }
    Box::new(InMemoryProvider::new(sample_counts(today)))
}

fn sample_counts(today: CalendarDate) -> EventCounts {
    (-SAMPLE_DAYS..SAMPLE_DAYS)
        .map(|offset| {
            let date = add_days(today, offset);
            (date, (date.day() * 7 + date.month()) % 10)
        })
        .filter(|&(_, count)| count > 0)
        .collect()
}
