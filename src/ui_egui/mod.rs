//! egui adapter: draws a `CalendarPicker` and forwards clicks into it.

mod app;
pub mod picker_view;
pub mod theme;
pub mod tile;

pub use app::PickerDemoApp;
pub use picker_view::{PickerResponse, PickerView};
pub use theme::PickerTheme;
