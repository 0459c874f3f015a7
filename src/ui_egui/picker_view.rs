//! Painter-based rendering of a [`CalendarPicker`].
//!
//! The view draws whatever the current [`LayoutResult`] says and turns clicks
//! into `select` calls; it keeps no grid state of its own.

use egui::{Align2, Color32, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use super::theme::PickerTheme;
use super::tile::{
    hit_test, marker_radius, marker_rect, pop_factor, scale_about_center, tile_rect, COLUMNS,
    MARKER_ANIMATION_SECS,
};
use crate::models::calendar_date::CalendarDate;
use crate::models::grid::{GridCell, LayoutResult};
use crate::models::settings::{MarkerStyle, PickerSettings};
use crate::services::picker::CalendarPicker;
use crate::utils::date::WEEKDAY_LABELS;

const HEADER_HEIGHT: f32 = 20.0;
const MAX_TILE_SIZE: f32 = 56.0;

/// What happened during one frame of the picker view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PickerResponse {
    /// The month changed through the header arrows
    pub navigated: bool,
    /// A tile was clicked and selected
    pub selected: Option<CalendarDate>,
}

pub struct PickerView {
    theme: PickerTheme,
    marker_style: MarkerStyle,
    marker_scale: f32,
}

impl PickerView {
    pub fn new(theme: PickerTheme, marker_style: MarkerStyle, marker_scale: f32) -> Self {
        Self {
            theme,
            marker_style,
            marker_scale,
        }
    }

    pub fn from_settings(settings: &PickerSettings, dark: bool) -> Self {
        Self::new(
            PickerTheme::from_settings(settings, dark),
            settings.marker_style,
            settings.marker_scale,
        )
    }

    pub fn theme(&self) -> &PickerTheme {
        &self.theme
    }

    pub fn show(&self, ui: &mut egui::Ui, picker: &mut CalendarPicker) -> PickerResponse {
        let mut response = PickerResponse::default();

        self.render_header(ui, picker, &mut response);
        ui.add_space(4.0);

        let width = ui.available_width().min(MAX_TILE_SIZE * COLUMNS as f32);
        let tile = width / COLUMNS as f32;
        self.render_weekday_labels(ui, width);

        let row_count = picker.layout().row_count;
        let (grid, grid_response) =
            ui.allocate_exact_size(Vec2::new(width, tile * row_count as f32), Sense::click());

        let today = picker.today();
        let selected = picker.selected_date();
        self.paint_grid(ui, grid, picker.layout(), today, selected);

        let hovered_cell = grid_response
            .hover_pos()
            .and_then(|pos| cell_under(picker.layout(), grid, pos));
        if hovered_cell.is_some() {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }

        if grid_response.clicked() {
            let clicked = grid_response
                .interact_pointer_pos()
                .and_then(|pos| cell_under(picker.layout(), grid, pos))
                .map(|cell| (cell.id, cell.date));

            if let Some((id, date)) = clicked {
                match picker.select(id, date) {
                    Ok(change) => response.selected = Some(change.date),
                    Err(err) => log::warn!("Tile click rejected: {}", err),
                }
            }
        }

        response
    }

    fn render_header(
        &self,
        ui: &mut egui::Ui,
        picker: &mut CalendarPicker,
        response: &mut PickerResponse,
    ) {
        ui.horizontal(|ui| {
            if ui
                .small_button("<")
                .on_hover_text("Previous month")
                .clicked()
            {
                picker.navigate_previous_month();
                response.navigated = true;
            }

            let label = picker.layout().month_label.clone();
            ui.label(egui::RichText::new(label).strong());

            if ui.small_button(">").on_hover_text("Next month").clicked() {
                picker.navigate_next_month();
                response.navigated = true;
            }
        });
    }

    fn render_weekday_labels(&self, ui: &mut egui::Ui, width: f32) {
        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, HEADER_HEIGHT), Sense::hover());
        let painter = ui.painter();
        let col_width = width / COLUMNS as f32;

        for (col, label) in WEEKDAY_LABELS.iter().enumerate() {
            let cell = Rect::from_min_size(
                Pos2::new(rect.left() + col as f32 * col_width, rect.top()),
                Vec2::new(col_width, HEADER_HEIGHT),
            );
            // Odd columns are striped
            if col % 2 == 1 {
                painter.rect_filled(cell, 0.0, self.theme.header_stripe);
            }
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                *label,
                FontId::proportional(11.0),
                self.theme.text,
            );
        }
    }

    fn paint_grid(
        &self,
        ui: &egui::Ui,
        grid: Rect,
        layout: &LayoutResult,
        today: CalendarDate,
        selected: Option<CalendarDate>,
    ) {
        let painter = ui.painter();

        for placeholder in layout.placeholders() {
            let rect = tile_rect(grid, placeholder.row, placeholder.col, layout.row_count);
            self.paint_day_number(painter, rect, placeholder.date, self.theme.placeholder_text);
        }

        for cell in layout.cells() {
            let rect = tile_rect(grid, cell.row, cell.col, layout.row_count);
            let is_selected = selected == Some(cell.date);

            if cell.intensity > 0.0 {
                painter.rect_filled(rect.shrink(1.0), 2.0, self.theme.shade_for(cell.intensity));
            }

            // Every visible tile registers its animation state so a later
            // selection animates from the unselected value.
            let progress = ui.ctx().animate_bool_with_time(
                egui::Id::new(("calendar_picker_marker", cell.date)),
                is_selected,
                MARKER_ANIMATION_SECS,
            );

            let marker = marker_rect(rect, self.marker_scale, self.marker_style);
            if is_selected {
                let marker = scale_about_center(marker, pop_factor(progress));
                painter.rect_filled(marker, marker_radius(marker), self.theme.highlight);
            } else if cell.date == today {
                painter.rect_stroke(
                    marker,
                    marker_radius(marker),
                    Stroke::new(1.5, self.theme.today_border),
                );
            }

            let text_color = if is_selected {
                self.theme.selected_text
            } else {
                self.theme.text
            };
            self.paint_day_number(painter, rect, cell.date, text_color);
        }
    }

    fn paint_day_number(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        date: CalendarDate,
        color: Color32,
    ) {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            date.day().to_string(),
            FontId::proportional(14.0),
            color,
        );
    }
}

fn cell_under(layout: &LayoutResult, grid: Rect, pos: Pos2) -> Option<&GridCell> {
    let (row, col) = hit_test(grid, pos, layout.row_count)?;
    layout.cell_at(row, col)
}
