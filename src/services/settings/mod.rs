// Settings service module
// Loads and saves picker configuration files

mod service;

pub use service::{SettingsService, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
