//! Configuration management
//!
//! Initial policy settings for the choreographer, loadable from a TOML file
//! and validated before use. Applying a configuration is equivalent to
//! calling the corresponding setters in order; everything here stays
//! adjustable at runtime through those setters.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::topology::{DisplayId, DISPLAY_NONE};

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be parsed as TOML.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A display id other than the unassigned sentinel was negative.
    #[error("Invalid default mouse display id: {0}")]
    InvalidDisplayId(DisplayId),
}

/// Initial policy settings for the choreographer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoreographerConfig {
    /// Display hosting cursors for unassociated mice.
    pub default_mouse_display: DisplayId,

    /// Whether touch contacts draw spot indicators.
    pub show_touches: bool,

    /// Whether stylus hover draws a pointer icon.
    pub stylus_pointer_icon: bool,
}

impl Default for ChoreographerConfig {
    fn default() -> Self {
        Self {
            default_mouse_display: DISPLAY_NONE,
            show_touches: false,
            stylus_pointer_icon: false,
        }
    }
}

impl ChoreographerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> std::result::Result<Self, ConfigError> {
        let config: ChoreographerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the settings.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.default_mouse_display < 0 && self.default_mouse_display != DISPLAY_NONE {
            return Err(ConfigError::InvalidDisplayId(self.default_mouse_display));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ChoreographerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_mouse_display, DISPLAY_NONE);
        assert!(!config.show_touches);
        assert!(!config.stylus_pointer_icon);
    }

    #[test]
    fn test_parse_full_config() {
        let config = ChoreographerConfig::from_toml(
            r#"
            default_mouse_display = 5
            show_touches = true
            stylus_pointer_icon = true
            "#,
        )
        .unwrap();

        assert_eq!(config.default_mouse_display, 5);
        assert!(config.show_touches);
        assert!(config.stylus_pointer_icon);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = ChoreographerConfig::from_toml("show_touches = true").unwrap();

        assert_eq!(config.default_mouse_display, DISPLAY_NONE);
        assert!(config.show_touches);
        assert!(!config.stylus_pointer_icon);
    }

    #[test]
    fn test_rejects_invalid_display_id() {
        let err = ChoreographerConfig::from_toml("default_mouse_display = -7").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDisplayId(-7)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = ChoreographerConfig::from_toml("default_mouse_display = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = ChoreographerConfig {
            default_mouse_display: 10,
            show_touches: true,
            stylus_pointer_icon: false,
        };
        let serialized = toml::to_string(&config).unwrap();
        let parsed = ChoreographerConfig::from_toml(&serialized).unwrap();
        assert_eq!(parsed.default_mouse_display, 10);
        assert!(parsed.show_touches);
    }
}
