//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! Manages the user-editable settings for the explorer core, including the
//! persisted theme selection. Loads and saves settings as TOML from the
//! proper cross-platform config path using the
//! [`directories`](https://docs.rs/directories) crate.
//!
//! ## Features
//! - XDG-compliant config discovery and writing (Linux, macOS, Windows)
//! - Robust defaulting if no config file exists
//! - Async load/save for smooth integration with Tokio

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

use tokio::fs as TokioFs;

/// App theme (color scheme) selector. Persisted by name so external
/// settings stores can round-trip it as a plain string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,

    Light,

    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    /// Unrecognized names fall back to `Default`, matching the behavior of
    /// reading a stale settings value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::Default,
        })
    }
}

/// Main configuration struct for the explorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Persisted theme selection.
    pub theme: Theme,

    /// Whether enumeration includes dot-prefixed entries.
    pub show_hidden: bool,

    /// Display format for item timestamps.
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Default,
            show_hidden: false,
            date_format: "%Y-%m-%d %H:%M".to_string(),
        }
    }
}

impl Config {
    /// Loads config from TOML file at the XDG-compliant app config dir, or
    /// returns defaults (writing them out so the file exists from then on).
    pub async fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            info!("Loading config from {}", path.display());
            let text = TokioFs::read_to_string(&path).await?;
            let cfg: Self = toml::from_str(&text)?;

            Ok(cfg)
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config = Self::default();
            default_config.save().await?;

            Ok(default_config)
        }
    }

    /// Saves config to TOML file at the XDG-compliant app config dir.
    pub async fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()?;

        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent).await?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(&path, toml_str).await?;

        Ok(())
    }

    /// Update the persisted theme and write the config back out.
    pub async fn set_theme(&mut self, theme: Theme) -> anyhow::Result<()> {
        self.theme = theme;
        self.save().await
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "example", "Explorer")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Returns the config directory (without filename).
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "example", "Explorer")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_round_trips_through_its_string_form() {
        for theme in [Theme::Default, Theme::Light, Theme::Dark] {
            let name = theme.to_string();
            let parsed = Theme::from_str(&name).unwrap();
            assert_eq!(parsed, theme);
        }
    }

    #[test]
    fn unknown_theme_name_falls_back_to_default() {
        assert_eq!(Theme::from_str("solarized").unwrap(), Theme::Default);
        assert_eq!(Theme::from_str("").unwrap(), Theme::Default);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config {
            theme: Theme::Dark,
            show_hidden: true,
            date_format: "%d/%m/%Y".to_string(),
        };

        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();

        assert_eq!(back.theme, Theme::Dark);
        assert!(back.show_hidden);
        assert_eq!(back.date_format, "%d/%m/%Y");
    }
}
