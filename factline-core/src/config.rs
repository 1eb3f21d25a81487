//! Configuration management
//!
//! Compatible with the desktop app settings.json format:
//! ```json
//! {
//!   "app": { "apiBaseUrl": "http://localhost:8080", "demoMode": false }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Backend used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    /// Sections owned by other front ends, preserved on save
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default = "default_api_base_url")]
    api_base_url: String,
    #[serde(default)]
    demo_mode: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            demo_mode: false,
            other: HashMap::new(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Factline configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub demo_mode: bool,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            demo_mode: false,
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the factline directory
    ///
    /// Overrides, in priority order:
    /// 1. Environment variables FACTLINE_API_URL / FACTLINE_DEMO_MODE (for CI/testing)
    /// 2. Settings file (fl demo on / off)
    pub fn load(factline_dir: &Path) -> Result<Self> {
        let settings_path = factline_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let api_base_url = match std::env::var("FACTLINE_API_URL").ok() {
            Some(url) if !url.trim().is_empty() => url,
            _ => raw.app.api_base_url.clone(),
        };

        let demo_mode = match std::env::var("FACTLINE_DEMO_MODE").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.demo_mode,
        };

        Ok(Self {
            api_base_url,
            demo_mode,
            _raw_settings: raw,
        })
    }

    /// Save config to the factline directory
    /// Preserves settings sections this client doesn't manage
    pub fn save(&self, factline_dir: &Path) -> Result<()> {
        let settings_path = factline_dir.join("settings.json");

        // Load existing settings to preserve fields we don't manage
        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        // Update only the fields we manage
        settings.app.api_base_url = self.api_base_url.clone();
        settings.app.demo_mode = self.demo_mode;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Enable demo mode
    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    /// Disable demo mode
    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(!config.demo_mode);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.api_base_url = "https://news.example.com".to_string();
        config.enable_demo_mode();
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.api_base_url, "https://news.example.com");
        assert!(loaded.demo_mode);
    }

    #[test]
    fn test_save_preserves_unmanaged_sections() {
        let dir = tempfile::tempdir().unwrap();
        let settings_path = dir.path().join("settings.json");
        std::fs::write(
            &settings_path,
            r#"{"app": {"demoMode": true}, "desktop": {"theme": "dark"}}"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert!(config.demo_mode);
        config.save(dir.path()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&settings_path).unwrap()).unwrap();
        assert_eq!(raw["desktop"]["theme"], "dark");
        assert_eq!(raw["app"]["demoMode"], true);
    }

    #[test]
    fn test_corrupt_settings_load_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
