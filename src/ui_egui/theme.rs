//! Colors used by the picker view.
//!
//! Highlight and shade colors come from settings as `#RRGGBB`; everything
//! else follows the active egui visuals.

use egui::Color32;

use crate::models::settings::{PickerSettings, DEFAULT_HIGHLIGHT_COLOR, DEFAULT_SHADE_COLOR};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerTheme {
    /// Selection marker fill
    pub highlight: Color32,
    /// Base color for event-density shading
    pub shade: Color32,
    pub text: Color32,
    pub selected_text: Color32,
    pub placeholder_text: Color32,
    /// Background behind odd weekday header columns
    pub header_stripe: Color32,
    pub today_border: Color32,
}

impl PickerTheme {
    pub fn from_settings(settings: &PickerSettings, dark: bool) -> Self {
        let highlight = color_or_default(&settings.highlight_color, DEFAULT_HIGHLIGHT_COLOR);
        let shade = color_or_default(&settings.shade_color, DEFAULT_SHADE_COLOR);

        let (text, placeholder_text, header_stripe) = if dark {
            (
                Color32::from_rgb(240, 240, 240),
                Color32::from_rgb(110, 110, 110),
                Color32::from_rgb(48, 48, 52),
            )
        } else {
            (
                Color32::from_rgb(40, 40, 40),
                Color32::from_rgb(170, 170, 170),
                Color32::from_rgb(242, 242, 246),
            )
        };

        Self {
            highlight,
            shade,
            text,
            selected_text: Color32::WHITE,
            placeholder_text,
            header_stripe,
            today_border: highlight,
        }
    }

    /// Shade color with alpha equal to `intensity`; transparent at zero.
    pub fn shade_for(&self, intensity: f32) -> Color32 {
        let alpha = (intensity.clamp(0.0, 1.0) * 255.0).round() as u8;
        with_alpha(self.shade, alpha)
    }
}

impl Default for PickerTheme {
    fn default() -> Self {
        Self::from_settings(&PickerSettings::default(), false)
    }
}

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn color_or_default(value: &str, fallback: &str) -> Color32 {
    parse_color(value).unwrap_or_else(|| {
        log::warn!("Invalid color '{}', using {}", value, fallback);
        parse_color(fallback).unwrap_or(Color32::GRAY)
    })
}

/// Parse `#RRGGBB` (leading `#` optional).
pub fn parse_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}
