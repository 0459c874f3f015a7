// Service module exports

pub mod clock;
pub mod density;
pub mod layout;
pub mod picker;
pub mod provider;
pub mod selection;
pub mod settings;
