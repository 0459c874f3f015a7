// Settings module
// Picker configuration persisted as TOML

use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::grid::{GridMode, PaddingMode};
use crate::services::density::DEFAULT_SENSITIVITY;

pub const DEFAULT_MARKER_SCALE: f32 = 0.825;
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#E26F50";
pub const DEFAULT_SHADE_COLOR: &str = "#E1917C";

/// Geometry of the round selection marker drawn inside a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStyle {
    /// Shrink every side by the padding.
    #[default]
    Inset,
    /// Keep `width * scale` by `height * scale` at the padded origin.
    Scaled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerSettings {
    /// Event count that maps to full shading
    pub sensitivity: f32,
    pub padding: PaddingMode,
    pub marker_style: MarkerStyle,
    pub marker_scale: f32,
    pub highlight_color: String,
    pub shade_color: String,
    /// IANA timezone used for "today"; local time when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// SQLite file backing the event count provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_store: Option<PathBuf>,
    // Serialized as a TOML table, so it stays last
    pub grid_mode: GridMode,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            padding: PaddingMode::Absent,
            marker_style: MarkerStyle::Inset,
            marker_scale: DEFAULT_MARKER_SCALE,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            shade_color: DEFAULT_SHADE_COLOR.to_string(),
            timezone: None,
            event_store: None,
            grid_mode: GridMode::Month,
        }
    }
}

impl PickerSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.sensitivity.is_finite() && self.sensitivity > 0.0) {
            return Err(ValidationError::InvalidSensitivity {
                value: self.sensitivity,
            });
        }

        if !(self.marker_scale > 0.0 && self.marker_scale <= 1.0) {
            return Err(ValidationError::InvalidMarkerScale {
                value: self.marker_scale,
            });
        }

        for color in [&self.highlight_color, &self.shade_color] {
            if !is_hex_color(color) {
                return Err(ValidationError::InvalidColor {
                    value: color.clone(),
                });
            }
        }

        self.timezone()?;
        Ok(())
    }

    /// Parsed timezone, `None` meaning local time.
    pub fn timezone(&self) -> Result<Option<Tz>, ValidationError> {
        self.timezone
            .as_deref()
            .map(|name| {
                Tz::from_str(name).map_err(|_| ValidationError::UnknownTimezone {
                    name: name.to_string(),
                })
            })
            .transpose()
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
