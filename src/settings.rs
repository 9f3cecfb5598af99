//! Game settings and preferences
//!
//! Persisted as JSON under `synx_settings`. The theme is also mirrored under
//! the plain `synx_theme` key, which older saves only have.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, storage_get, storage_set};
use crate::sim::Difficulty;

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub difficulty: Difficulty,
}

impl Settings {
    /// Storage key for the JSON settings
    pub const STORAGE_KEY: &'static str = "synx_settings";
    /// Plain theme key
    pub const THEME_KEY: &'static str = "synx_theme";

    /// Load persisted preferences, defaulting anything missing or unknown
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let json = storage_get(store, Self::STORAGE_KEY, "");
        if !json.is_empty() {
            match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!(
                        "Loaded settings (theme {}, {})",
                        settings.theme.as_str(),
                        settings.difficulty.as_str()
                    );
                    return settings;
                }
                Err(e) => log::warn!("Ignoring bad settings: {}", e),
            }
        }

        let raw = storage_get(store, Self::THEME_KEY, Theme::default().as_str());
        let theme = Theme::from_str(&raw).unwrap_or_else(|| {
            log::warn!("Unknown theme {:?}, using default", raw);
            Theme::default()
        });
        log::info!("Loaded settings (theme {})", theme.as_str());
        Self {
            theme,
            difficulty: Difficulty::default(),
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => storage_set(store, Self::STORAGE_KEY, &json),
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
        storage_set(store, Self::THEME_KEY, self.theme.as_str());
        log::info!("Settings saved");
    }
}
