use std::{fs, path::Path, time::Duration};

use bevy::prelude::*;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const DEFAULT_SETTINGS_JSON: &str = include_str!("./content/menu_settings.json");

static DEFAULT_SETTINGS: Lazy<MenuSettings> = Lazy::new(|| {
    MenuSettings::from_json_str(DEFAULT_SETTINGS_JSON).unwrap_or_else(|error| {
        warn!("embedded menu settings failed to parse ({error}); using built-in values");
        MenuSettings::built_in()
    })
});

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "could not read menu settings: {error}"),
            Self::Parse(error) => write!(f, "menu settings are not valid JSON: {error}"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Key-repeat timings for held directional input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputTimings {
    pub initial_refire_ms: u64,
    pub refire_attrition_ms: u64,
    pub minimum_refire_ms: u64,
}

impl InputTimings {
    pub fn initial_refire(&self) -> Duration {
        Duration::from_millis(self.initial_refire_ms)
    }

    pub fn refire_attrition(&self) -> Duration {
        Duration::from_millis(self.refire_attrition_ms)
    }

    pub fn minimum_refire(&self) -> Duration {
        Duration::from_millis(self.minimum_refire_ms.min(self.initial_refire_ms))
    }
}

impl Default for InputTimings {
    fn default() -> Self {
        Self {
            initial_refire_ms: 250,
            refire_attrition_ms: 45,
            minimum_refire_ms: 100,
        }
    }
}

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    pub default_visible_items: usize,
    pub animate_descriptions: bool,
    pub max_width: f32,
    pub mouse_enabled: bool,
    pub scroll_only_on_hover: bool,
    pub input: InputTimings,
}

impl MenuSettings {
    fn built_in() -> Self {
        Self {
            default_visible_items: 12,
            animate_descriptions: true,
            max_width: 450.0,
            mouse_enabled: true,
            scroll_only_on_hover: false,
            input: InputTimings::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.default_visible_items = settings.default_visible_items.max(1);
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(SettingsError::Io)?;
        Self::from_json_str(&json).map_err(SettingsError::Parse)
    }

    /// Reads an override file, falling back to the embedded defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(settings) => settings,
            Err(error) => {
                warn!("{error} ({}); falling back to default menu settings", path.display());
                Self::default()
            }
        }
    }
}

impl Default for MenuSettings {
    fn default() -> Self {
        DEFAULT_SETTINGS.clone()
    }
}
