use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_COIN_TICKER, DEFAULT_STATUS_REFRESH_SECS};

const SETTINGS_FILE: &str = "chainview_settings.json";

fn default_coin_ticker() -> String {
    DEFAULT_COIN_TICKER.to_string()
}

fn default_api_url_overrides() -> HashMap<String, String> {
    HashMap::new()
}

fn default_status_refresh_secs() -> u64 {
    DEFAULT_STATUS_REFRESH_SECS
}

/// User settings that persist between sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    /// Selected coin preset ticker
    #[serde(default = "default_coin_ticker")]
    pub coin_ticker: String,
    /// API base URL overrides per coin ticker
    #[serde(default = "default_api_url_overrides")]
    pub api_url_overrides: HashMap<String, String>,
    /// Status feed refresh interval (seconds)
    #[serde(default = "default_status_refresh_secs")]
    pub status_refresh_secs: u64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            coin_ticker: default_coin_ticker(),
            api_url_overrides: default_api_url_overrides(),
            status_refresh_secs: default_status_refresh_secs(),
        }
    }
}

impl UserSettings {
    /// Get the settings file path
    fn settings_path() -> PathBuf {
        // Try to use the app data directory, fall back to current directory
        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("chainview");
            if !app_dir.exists() {
                let _ = fs::create_dir_all(&app_dir);
            }
            app_dir.join(SETTINGS_FILE)
        } else {
            PathBuf::from(SETTINGS_FILE)
        }
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::settings_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(settings) => {
                        tracing::info!("Loaded settings from {:?}", path);
                        return settings;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse settings file: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read settings file: {}", e);
                }
            }
        }
        tracing::info!("Using default settings");
        Self::default()
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        tracing::info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Get the settings file path for display
    pub fn settings_path_display() -> String {
        Self::settings_path().display().to_string()
    }

    /// Get the API URL override for a coin, or None if using the preset default
    pub fn get_api_url_override(&self, ticker: &str) -> Option<&String> {
        self.api_url_overrides.get(ticker).filter(|s| !s.is_empty())
    }

    /// Set the API URL override for a coin (empty string removes the override)
    pub fn set_api_url_override(&mut self, ticker: &str, url: String) {
        if url.trim().is_empty() {
            self.api_url_overrides.remove(ticker);
        } else {
            self.api_url_overrides.insert(ticker.to_string(), url.trim().to_string());
        }
    }

    /// Apply these settings on top of an environment-derived config. A
    /// saved URL override wins; otherwise the environment URL survives
    /// unless the selected coin changed, in which case it belonged to the
    /// old coin and the preset default takes over.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(url) = self.get_api_url_override(&self.coin_ticker) {
            config.api_url = url.clone();
        } else if !config.coin_ticker.eq_ignore_ascii_case(&self.coin_ticker) {
            if let Some(coin) = crate::config::find_coin(&self.coin_ticker) {
                config.api_url = coin.default_api_url.to_string();
            }
        }
        config.coin_ticker = self.coin_ticker.clone();
        config.status_refresh_secs = self.status_refresh_secs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== defaults tests ====================

    #[test]
    fn test_user_settings_default_values() {
        let settings = UserSettings::default();
        assert_eq!(settings.coin_ticker, "TUX");
        assert!(settings.api_url_overrides.is_empty());
        assert_eq!(settings.status_refresh_secs, DEFAULT_STATUS_REFRESH_SECS);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: UserSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.coin_ticker, "TUX");
        assert_eq!(settings.status_refresh_secs, DEFAULT_STATUS_REFRESH_SECS);
    }

    #[test]
    fn test_roundtrip_preserves_overrides() {
        let mut settings = UserSettings::default();
        settings.set_api_url_override("TUX", "http://10.0.0.5:8000".to_string());
        settings.status_refresh_secs = 30;

        let json = serde_json::to_string(&settings).unwrap();
        let restored: UserSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(
            restored.get_api_url_override("TUX").map(String::as_str),
            Some("http://10.0.0.5:8000")
        );
        assert_eq!(restored.status_refresh_secs, 30);
    }

    // ==================== override tests ====================

    #[test]
    fn test_set_api_url_override_trims() {
        let mut settings = UserSettings::default();
        settings.set_api_url_override("TUX", "  http://host:8000  ".to_string());
        assert_eq!(
            settings.get_api_url_override("TUX").map(String::as_str),
            Some("http://host:8000")
        );
    }

    #[test]
    fn test_empty_override_removes_entry() {
        let mut settings = UserSettings::default();
        settings.set_api_url_override("TUX", "http://host:8000".to_string());
        settings.set_api_url_override("TUX", "   ".to_string());
        assert!(settings.get_api_url_override("TUX").is_none());
    }

    // ==================== apply_to tests ====================

    #[test]
    fn test_apply_to_uses_override_url() {
        let mut settings = UserSettings::default();
        settings.coin_ticker = "BTC".to_string();
        settings.set_api_url_override("BTC", "http://btc-node:8000".to_string());
        settings.status_refresh_secs = 15;

        let mut config = Config::default();
        settings.apply_to(&mut config);

        assert_eq!(config.coin_ticker, "BTC");
        assert_eq!(config.api_url, "http://btc-node:8000");
        assert_eq!(config.status_refresh_secs, 15);
    }

    #[test]
    fn test_apply_to_switches_coin_to_preset_url() {
        let mut settings = UserSettings::default();
        settings.coin_ticker = "BTC".to_string();

        let mut config = Config::default();
        settings.apply_to(&mut config);

        assert_eq!(config.api_url, "http://localhost:8000"); // Bitcoin preset default
    }

    #[test]
    fn test_apply_to_keeps_env_url_for_same_coin() {
        let settings = UserSettings::default();

        let mut config = Config::new("http://10.1.1.1:8000".to_string(), "TUX".to_string());
        settings.apply_to(&mut config);

        assert_eq!(config.api_url, "http://10.1.1.1:8000");
    }
}
