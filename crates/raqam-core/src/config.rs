//! Configuration for raqam
//!
//! Stored in <config_dir>/raqam/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// raqam configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default governorate code for the generate form
    pub default_governorate: String,

    /// Default 3-digit serial for the generate form
    pub default_serial: String,

    /// Default gender digit (odd = male, even = female)
    pub default_gender_digit: u8,

    /// Compute the check digit by default
    pub compute_checksum: bool,

    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_governorate: "01".to_string(),
            default_serial: "001".to_string(),
            default_gender_digit: 1,
            compute_checksum: true,
            display: DisplayConfig::default(),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use colors in output
    pub colors: bool,

    /// Date format for displaying birth dates (strftime format)
    pub date_format: String,

    /// Show field hints next to form inputs
    pub show_hints: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            date_format: "%Y-%m-%d".to_string(),
            show_hints: true,
        }
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> crate::Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| crate::Error::Other("Could not determine config directory".into()))?;
        Ok(base.join("raqam").join("config.toml"))
    }

    /// Load config from a TOML file, falling back to defaults if absent
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Other(format!("Invalid config: {}", e)))?;
        Ok(config)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Other(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Generate a default config file with comments
    pub fn default_with_comments() -> String {
        r#"# raqam configuration

# Default governorate code for the generate form (see `raqam governorates`)
default_governorate = "01"

# Default 3-digit serial for the generate form
default_serial = "001"

# Default gender digit (odd = male, even = female)
default_gender_digit = 1

# Compute the check digit by default
compute_checksum = true

[display]
# Use colors in output
colors = true

# Date format for displaying birth dates (strftime format)
date_format = "%Y-%m-%d"

# Show field hints next to form inputs
show_hints = true
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_governorate, "01");
        assert_eq!(config.default_serial, "001");
        assert!(config.compute_checksum);
        assert!(config.display.colors);
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("raqam-test-no-such-config.toml");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_serial, "001");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir().join("raqam-test-config.toml");
        let mut config = Config::default();
        config.default_governorate = "21".to_string();
        config.compute_checksum = false;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.default_governorate, "21");
        assert!(!loaded.compute_checksum);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_commented_default_parses_to_default() {
        let parsed: Config = toml::from_str(&Config::default_with_comments()).unwrap();
        assert_eq!(parsed.default_governorate, Config::default().default_governorate);
        assert_eq!(parsed.compute_checksum, Config::default().compute_checksum);
    }
}
