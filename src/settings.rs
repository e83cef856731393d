//! Game settings and preferences
//!
//! Persisted separately from the high score. In the browser they live in
//! LocalStorage; the native build reads a JSON file named by
//! `DINOVOX_SETTINGS`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::DEFAULT_SWIPE_THRESHOLD;
use crate::sim::PlayMode;
use crate::tuning::Tuning;

/// Environment variable naming the native settings file
pub const SETTINGS_ENV: &str = "DINOVOX_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings io: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which rule set to play
    pub mode: PlayMode,
    /// Minimum touch travel (CSS px) that counts as a swipe
    pub swipe_threshold_px: f32,
    /// Fixed run seed (None = fresh seed per run)
    pub seed: Option<u64>,
    /// Balance overrides
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: PlayMode::Classic,
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD,
            seed: None,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dinovox_settings";

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.tuning.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("Failed to save settings");
                    } else {
                        log::info!("Settings saved");
                    }
                }
                Err(e) => log::warn!("Failed to encode settings: {}", e),
            }
        }
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load from the file named by `DINOVOX_SETTINGS`, or defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.to_string_lossy());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.to_string_lossy(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"mode":"FreeRoam","tuning":{"gravity":40.0}}"#).unwrap();
        assert_eq!(settings.mode, PlayMode::FreeRoam);
        assert_eq!(settings.swipe_threshold_px, DEFAULT_SWIPE_THRESHOLD);
        assert_eq!(settings.tuning.gravity, 40.0);
        assert_eq!(settings.tuning.base_step, Tuning::default().base_step);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(Settings::from_json("{mode:"), Err(SettingsError::Parse(_))));
        assert!(matches!(
            Settings::from_json(r#"{"mode":"Sideways"}"#),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_loaded_tuning_is_sanitized() {
        let settings = Settings::from_json(r#"{"tuning":{"max_speed":0.1}}"#).unwrap();
        assert!(settings.tuning.max_speed >= settings.tuning.initial_speed);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("settings.json");
        let settings = Settings {
            mode: PlayMode::LanesOnly,
            seed: Some(99),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
        assert!(matches!(
            Settings::load_from(dir.path().join("missing.json")),
            Err(SettingsError::Io(_))
        ));
    }
}
