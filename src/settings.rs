//! Runtime settings for the template extensions

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Extension settings, usually loaded from a TOML file:
///
/// ```toml
/// [images]
/// placeholder_path = "/static/placeholders/"
///
/// [components]
/// prefix = "app-"
/// ```
///
/// Every table and key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub images: ImageSettings,
    #[serde(default)]
    pub components: ComponentSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageSettings {
    /// Base path under which lazy-loading placeholder assets live
    pub placeholder_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentSettings {
    /// Prefix prepended to every generated component id
    pub prefix: Option<String>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }
}
