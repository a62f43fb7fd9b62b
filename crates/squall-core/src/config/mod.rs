//! Configuration management for Squall.
//!
//! Configuration is loaded from the platform config directory
//! (`~/.config/squall/config.toml` on Linux) with defaults for every field.
//! Nothing in the pipeline reads global state: the orchestrator receives a
//! `Config` and everything else is derived from it.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Squall.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Processing settings
    pub processing: ProcessingConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Effect generator parameters
    pub effects: EffectsConfig,

    /// Label pairing
    pub labels: LabelsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.squall.squall/config.toml
    /// - Linux: ~/.config/squall/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\squall\config\config.toml
    ///
    /// Falls back to ~/.squall/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "squall", "squall")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".squall").join("config.toml")
            })
    }

    /// Resolved label directory (with ~ expansion), if pairing is enabled.
    pub fn label_dir(&self) -> Option<PathBuf> {
        self.labels.source_dir.as_deref().map(expand_path)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectKind;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.processing.parallel_workers, 4);
        assert_eq!(config.processing.output_dir_name, "Augmented_Images");
        assert_eq!(config.processing.effects, EffectKind::ALL.to_vec());
        assert!(config.processing.seed.is_none());
        assert_eq!(config.effects.rain.min_streaks, 100);
        assert_eq!(config.effects.rain.max_streaks, 500);
        assert_eq!(config.effects.fog.blur_kernel_size, 15);
        assert_eq!(config.effects.low_light.max_scale, 0.6);
        assert!(config.labels.source_dir.is_none());
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[processing]"));
        assert!(toml.contains("[effects.rain]"));
        assert!(toml.contains("[effects.fog]"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [processing]
            seed = 1234
            effects = ["rain", "dark"]

            [effects.fog]
            max_intensity = 0.4
            "#,
        )
        .unwrap();

        assert_eq!(config.processing.seed, Some(1234));
        assert_eq!(
            config.processing.effects,
            vec![EffectKind::Rain, EffectKind::LowLight]
        );
        assert_eq!(config.effects.fog.max_intensity, 0.4);
        assert_eq!(config.effects.fog.min_intensity, 0.2);
        assert_eq!(config.processing.parallel_workers, 4);
    }

    #[test]
    fn test_invalid_toml_values_are_rejected() {
        let err = Config::from_toml("[effects.low_light]\nmin_scale = 0.9\n").unwrap_err();
        assert!(err.to_string().contains("low_light"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[limits]\nfile_timeout_ms = 500\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.limits.file_timeout_ms, 500);
    }

    #[test]
    fn test_expand_path_without_tilde_is_unchanged() {
        assert_eq!(
            expand_path(Path::new("/data/aerial")),
            PathBuf::from("/data/aerial")
        );
    }
}
