// Calendar Picker Library
// Date grid layout, event-density shading and selection for a day picker

pub mod error;
pub mod models;
pub mod services;
pub mod ui_egui;
pub mod utils;

pub use error::{PickerError, ValidationError};
pub use models::calendar_date::CalendarDate;
pub use models::grid::{CellId, EventCounts, GridCell, GridMode, LayoutResult, PaddingMode};
pub use services::picker::CalendarPicker;
