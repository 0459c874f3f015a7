// Module exports for models

pub mod calendar_date;
pub mod grid;
pub mod selection;
pub mod settings;
