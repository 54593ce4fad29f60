//! Application settings

use serde::{Deserialize, Serialize};

/// Colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The theme the menu offers to switch to
    pub fn next(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ru => "Русский",
        }
    }

    pub fn all() -> &'static [Language] {
        &[Language::En, Language::Ru]
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3001".into()
}

fn default_assets_dir() -> String {
    "assets".into()
}

/// All application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub language: Language,
    /// Backend base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Directory holding the mesh, decal and environment files
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    /// Session token from the last sign-in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: Language::default(),
            api_base_url: default_api_base_url(),
            assets_dir: default_assets_dir(),
            session_token: None,
        }
    }
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "stylecrop", "stylecrop") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    return settings;
                }
                tracing::warn!("Ignoring unreadable settings at {}", config_path.display());
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "stylecrop", "stylecrop") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    if let Err(e) = std::fs::write(&config_path, json) {
                        tracing::error!("Failed to save settings: {e}");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults_to_light_and_cycles() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Dark.next(), Theme::Light);
        assert_eq!(Theme::Light.next().id(), "dark");
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"theme":"light"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.api_base_url, "http://localhost:3001");
        assert_eq!(settings.assets_dir, "assets");
        assert_eq!(settings.session_token, None);
    }
}
