//! Settings persistence for the bedtime dial
//!
//! Loads and saves app settings as TOML under the platform config
//! directory. Only configuration options live here; the live sleep window
//! is never written back.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use shared::DialConfig;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Error type for settings operations
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to determine config directory
    NoConfigDir,
    /// IO error while reading/writing settings
    Io(io::Error),
    /// Failed to parse settings file
    Parse(toml::de::Error),
    /// Failed to serialize settings
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "Could not determine config directory"),
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Persisted application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Show the 24-hour tick marks and labels inside the ring
    pub show_clock_face: bool,
    /// Default bedtime as 24-hour "HH:MM"
    pub default_bedtime: String,
    /// Default wake time as 24-hour "HH:MM"
    pub default_wake: String,
    /// Drag controller tuning
    pub dial: DialConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            show_clock_face: true,
            default_bedtime: "23:00".to_string(),
            default_wake: "08:00".to_string(),
            dial: DialConfig::default(),
        }
    }
}

/// Get the settings file path
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "bedtime-dial", "bedtime_dial")
        .map(|dirs| dirs.config_dir().join("settings.toml"))
}

/// Load settings from disk
///
/// Returns `None` if no settings file exists yet. Returns an error if the
/// file exists but can't be parsed.
pub fn load_config() -> Result<Option<AppConfig>, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;

    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)?;
    let config: AppConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Save settings to disk
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(&path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("settings.toml"));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = AppConfig {
            show_clock_face: false,
            default_bedtime: "22:30".to_string(),
            default_wake: "06:45".to_string(),
            dial: DialConfig {
                tap_to_update: false,
                ..DialConfig::default()
            },
        };
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }
}
