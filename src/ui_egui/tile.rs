//! Pixel geometry for day tiles. Pure functions, no painting.

use egui::{Pos2, Rect, Vec2};

use crate::models::settings::MarkerStyle;

pub const COLUMNS: u32 = 7;

/// Marker size at the start of the select animation, relative to rest.
pub const MARKER_POP_SCALE: f32 = 1.2;
/// Seconds for the marker to settle from the pop size.
pub const MARKER_ANIMATION_SECS: f32 = 0.15;

/// Rectangle of the tile at (`row`, `col`) when `grid` is split into
/// seven columns and `row_count` rows.
pub fn tile_rect(grid: Rect, row: u32, col: u32, row_count: u32) -> Rect {
    let size = tile_size(grid, row_count);
    let min = grid.min + Vec2::new(col as f32 * size.x, row as f32 * size.y);
    Rect::from_min_size(min, size)
}

fn tile_size(grid: Rect, row_count: u32) -> Vec2 {
    let rows = row_count.max(1) as f32;
    Vec2::new(grid.width() / COLUMNS as f32, grid.height() / rows)
}

/// Row and column under `pos`, if it lies inside the grid.
pub fn hit_test(grid: Rect, pos: Pos2, row_count: u32) -> Option<(u32, u32)> {
    if row_count == 0 || !grid.contains(pos) {
        return None;
    }

    let size = tile_size(grid, row_count);
    let offset = pos - grid.min;
    let col = ((offset.x / size.x).floor() as u32).min(COLUMNS - 1);
    let row = ((offset.y / size.y).floor() as u32).min(row_count - 1);
    Some((row, col))
}

/// Selection marker inside `tile`.
///
/// The padding is `min(w, h) * (1 - scale) / 2`. `Inset` pulls every edge in
/// by the padding; `Scaled` places a `w * scale` by `h * scale` box at the
/// padded origin.
pub fn marker_rect(tile: Rect, scale: f32, style: MarkerStyle) -> Rect {
    let pad = tile.width().min(tile.height()) * (1.0 - scale) / 2.0;
    let origin = tile.min + Vec2::splat(pad);

    match style {
        MarkerStyle::Inset => Rect::from_min_max(origin, tile.max - Vec2::splat(pad)),
        MarkerStyle::Scaled => Rect::from_min_size(origin, tile.size() * scale),
    }
}

/// Corner radius that makes the marker round on its shorter side.
pub fn marker_radius(marker: Rect) -> f32 {
    marker.width().min(marker.height()) / 2.0
}

/// Grow or shrink `rect` about its center.
pub fn scale_about_center(rect: Rect, factor: f32) -> Rect {
    Rect::from_center_size(rect.center(), rect.size() * factor)
}

/// Marker scale factor for animation progress `t` in `0..=1`.
pub fn pop_factor(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    MARKER_POP_SCALE + (1.0 - MARKER_POP_SCALE) * t
}
