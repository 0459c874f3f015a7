use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::PickerSettings;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "CALENDAR_PICKER_CONFIG";
pub const CONFIG_FILE_NAME: &str = "picker.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Config file from `CALENDAR_PICKER_CONFIG`, else the platform config
    /// directory, else the working directory.
    pub fn from_env() -> Self {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::new(path);
        }

        match ProjectDirs::from("com", "Ken24T", "CalendarPicker") {
            Some(dirs) => Self::new(dirs.config_dir().join(CONFIG_FILE_NAME)),
            None => Self::new(CONFIG_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields defaults.
    pub fn load(&self) -> Result<PickerSettings> {
        if !self.path.exists() {
            log::info!("No config at {}, using defaults", self.path.display());
            return Ok(PickerSettings::default());
        }

        let contents = fs::read_to_string(&self.path)
            .context(format!("Failed to read config at {}", self.path.display()))?;
        let settings: PickerSettings = toml::from_str(&contents)
            .context(format!("Failed to parse config at {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error.
    pub fn load_or_default(&self) -> PickerSettings {
        match self.load() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings: {:#}, using defaults", e);
                PickerSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &PickerSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .context(format!("Failed to create config directory {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, contents)
            .context(format!("Failed to write config at {}", self.path.display()))?;

        log::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grid::{GridMode, PaddingMode};
    use crate::models::settings::MarkerStyle;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join("absent.toml"));
        assert_eq!(service.load().unwrap(), PickerSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join("nested").join(CONFIG_FILE_NAME));

        let settings = PickerSettings {
            sensitivity: 5.0,
            grid_mode: GridMode::rolling_weeks(3).unwrap(),
            padding: PaddingMode::Placeholder,
            marker_style: MarkerStyle::Scaled,
            timezone: Some("Europe/London".to_string()),
            ..Default::default()
        };
        service.save(&settings).unwrap();

        assert_eq!(service.load().unwrap(), settings);
    }

    #[test]
    fn test_save_rejects_invalid_settings() {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join(CONFIG_FILE_NAME));
        let settings = PickerSettings {
            sensitivity: 0.0,
            ..Default::default()
        };
        assert!(service.save(&settings).is_err());
        assert!(!service.path().exists());
    }

    #[test]
    fn test_invalid_file_errors_but_load_or_default_recovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "sensitivity = -3.0\n").unwrap();

        let service = SettingsService::new(&path);
        assert!(service.load().is_err());
        assert_eq!(service.load_or_default(), PickerSettings::default());

        fs::write(&path, "sensitivity = [not toml").unwrap();
        assert!(service.load().is_err());
    }

    #[test]
    #[serial]
    fn test_env_var_overrides_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("override.toml");
        std::env::set_var(CONFIG_ENV_VAR, &path);

        let service = SettingsService::from_env();
        std::env::remove_var(CONFIG_ENV_VAR);

        assert_eq!(service.path(), path.as_path());
    }

    #[test]
    #[serial]
    fn test_default_path_ends_with_file_name() {
        std::env::remove_var(CONFIG_ENV_VAR);
        let service = SettingsService::from_env();
        assert!(service.path().ends_with(CONFIG_FILE_NAME));
    }
}
