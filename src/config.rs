//! This module handles the configuration for the mmrl application.
//!
//! It provides functionality to read, parse, and initialize the configuration from a TOML file or
//! use default values when necessary.

use color_eyre::Result;
use color_eyre::{eyre::OptionExt, eyre::WrapErr};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::modules::manager::Platform;
use crate::modules::online::RepositoryMenu;

// -------------------------------------------------------------------------------------------------
// mmrl Config
// -------------------------------------------------------------------------------------------------

/// Representation of the mmrl configuration.
///
/// The file is expected to be found under `$XDG_CONFIG_HOME/mmrl/config.toml`.
///
/// # Defaults
///
/// - `platform`: `"magisk"` - Root solution used to resolve module requirements
/// - `show_icon`: true - Show module icons
/// - `show_cover`: true - Show module covers
/// - `logs_dir`: `"$XDG_DATA_HOME/mmrl/logs"` - Directory for log files
/// - `logs_max`: 15 - Maximum number of logs to retain
///
/// # Example Configuration
///
/// ```toml
/// platform = "kernelsu"
/// show_cover = false
/// logs_dir = "~/mmrl-logs"
/// ```
#[derive(Debug)]
pub(crate) struct MmrlConfig {
    /// Location of the config file, whether it exists or not.
    #[allow(dead_code)]
    pub(crate) config_file: PathBuf,
    /// Root solution used when resolving module requirements.
    pub(crate) platform: Platform,
    /// Display preferences for optional module affordances.
    pub(crate) menu: RepositoryMenu,
    /// Directory of the log files
    pub(crate) logs_dir: PathBuf,
    /// Maximum number of log files to retain
    pub(crate) logs_max: usize,
}

// -------------------------------------------------------------------------------------------------
// Config Builder
// -------------------------------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct MmrlConfigBuilderIntermediate {
    pub(crate) platform: Option<String>,
    pub(crate) show_icon: Option<bool>,
    pub(crate) show_cover: Option<bool>,
    pub(crate) logs_dir: Option<PathBuf>,
    pub(crate) logs_max: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(try_from = "MmrlConfigBuilderIntermediate")]
pub(crate) struct MmrlConfigBuilder {
    pub(crate) config_file: Option<PathBuf>,
    pub(crate) platform: Option<Platform>,
    pub(crate) show_icon: Option<bool>,
    pub(crate) show_cover: Option<bool>,
    pub(crate) logs_dir: Option<PathBuf>,
    pub(crate) logs_max: Option<usize>,
}

impl TryFrom<MmrlConfigBuilderIntermediate> for MmrlConfigBuilder {
    type Error = String;

    fn try_from(intermediate: MmrlConfigBuilderIntermediate) -> Result<Self, Self::Error> {
        Ok(Self {
            config_file: None,
            platform: intermediate
                .platform
                .map(|p| p.parse::<Platform>())
                .transpose()?,
            show_icon: intermediate.show_icon,
            show_cover: intermediate.show_cover,
            logs_dir: intermediate.logs_dir,
            logs_max: intermediate.logs_max,
        })
    }
}

impl MmrlConfigBuilder {
    // --
    // * Builders

    pub(crate) fn with_config_file(&mut self, config_file: Option<PathBuf>) -> &mut Self {
        let new = self;
        new.config_file = config_file;
        new
    }

    pub(crate) fn with_platform(&mut self, platform: Option<Platform>) -> &mut Self {
        let new = self;
        new.platform = platform;
        new
    }

    pub(crate) fn with_show_icon(&mut self, show_icon: Option<bool>) -> &mut Self {
        let new = self;
        new.show_icon = show_icon;
        new
    }

    pub(crate) fn with_show_cover(&mut self, show_cover: Option<bool>) -> &mut Self {
        let new = self;
        new.show_cover = show_cover;
        new
    }

    pub(crate) fn with_logs_dir(&mut self, logs_dir: Option<PathBuf>) -> &mut Self {
        let new = self;
        new.logs_dir = logs_dir;
        new
    }

    pub(crate) fn with_logs_max(&mut self, logs_max: Option<usize>) -> &mut Self {
        let new = self;
        new.logs_max = logs_max;
        new
    }

    /// Reads and returns the contents of a configuration file.
    fn read_config_file(&self, path: &Path) -> Result<String> {
        let config_file_content: String = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config from {}", path.display()))?;

        Ok(config_file_content)
    }

    /// Constructs the final configuration by merging defaults, file values, and runtime overrides
    ///
    /// Resolution order (highest priority last):
    /// 1. Default values
    /// 2. Config file values
    /// 3. Explicit builder overrides
    pub(crate) fn build(&self, verbosity: u8) -> Result<MmrlConfig> {
        let config_file_path = if let Some(ref path) = self.config_file {
            Clone::clone(path)
        } else {
            dirs::config_dir()
                .ok_or_eyre("Could not determine user's config directory")?
                .join("mmrl")
                .join("config.toml")
        };

        // Try to read config file, use empty string if not found
        let conf_string = match self.read_config_file(&config_file_path) {
            Ok(s) => s,
            Err(_) => {
                if verbosity > 0 {
                    eprintln!("No config file found in {}", &config_file_path.display());
                    eprintln!("Default config values will be used")
                }
                "".to_string()
            }
        };
        let parsed_data: MmrlConfigBuilder = toml::from_str(&conf_string).wrap_err_with(|| {
            format!("Failed to parse config file {}", config_file_path.display())
        })?;

        let logs_dir = match (&self.logs_dir, &parsed_data.logs_dir) {
            (Some(path), _) | (None, Some(path)) => {
                crate::utils::file_fs::expand_path::<&PathBuf, &str>(path, None)?
            }
            (None, None) => crate::logs::get_default_log_dir()?,
        };

        Ok(MmrlConfig {
            config_file: config_file_path,
            platform: self
                .platform
                .or(parsed_data.platform)
                .unwrap_or_default(),
            menu: RepositoryMenu {
                show_icon: self
                    .show_icon
                    .unwrap_or(parsed_data.show_icon.unwrap_or(true)),
                show_cover: self
                    .show_cover
                    .unwrap_or(parsed_data.show_cover.unwrap_or(true)),
            },
            logs_dir,
            logs_max: self
                .logs_max
                .unwrap_or(parsed_data.logs_max.unwrap_or(15)),
        })
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Helper function to create a config file in a temporary directory
    fn create_config_file(dir: &TempDir, content: &str) -> Result<PathBuf> {
        let config_dir = dir.path().join("mmrl");
        std::fs::create_dir_all(&config_dir)?;
        let config_file = config_dir.join("config.toml");
        std::fs::write(&config_file, content)?;
        Ok(config_file)
    }

    #[test]
    fn test_create_config_no_file() -> Result<()> {
        let temp_dir = TempDir::new()?;

        temp_env::with_var("XDG_DATA_HOME", Some(temp_dir.path()), || -> Result<()> {
            let test_config = MmrlConfigBuilder::default()
                .with_config_file(Some(temp_dir.path().join("missing.toml")))
                .build(0)?;

            assert_eq!(test_config.platform, Platform::Magisk);
            assert!(test_config.menu.show_icon, "show_icon should default to true");
            assert!(test_config.menu.show_cover, "show_cover should default to true");
            assert_eq!(test_config.logs_max, 15);
            assert_eq!(
                test_config.logs_dir,
                temp_dir.path().join("mmrl").join("logs"),
                "Default logs_dir should be $XDG_DATA_HOME/mmrl/logs"
            );
            Ok(())
        })?;

        Ok(())
    }

    #[test]
    fn test_create_config_with_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_file = create_config_file(
            &temp_dir,
            r#"
            platform = "KernelSU"
            show_cover = false
            logs_dir = "/tmp/mmrl-logs"
            logs_max = 3
            "#,
        )?;

        let test_config = MmrlConfigBuilder::default()
            .with_config_file(Some(config_file))
            .build(0)?;

        assert_eq!(test_config.platform, Platform::KernelSu);
        assert!(test_config.menu.show_icon);
        assert!(!test_config.menu.show_cover);
        assert_eq!(test_config.logs_dir, PathBuf::from("/tmp/mmrl-logs"));
        assert_eq!(test_config.logs_max, 3);

        Ok(())
    }

    #[test]
    fn test_cli_overrides_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_file = create_config_file(
            &temp_dir,
            r#"
            platform = "apatch"
            show_icon = false
            "#,
        )?;

        let test_config = MmrlConfigBuilder::default()
            .with_config_file(Some(config_file))
            .with_platform(Some(Platform::KernelSuNext))
            .with_show_icon(Some(true))
            .with_logs_dir(Some(PathBuf::from("/var/tmp/logs")))
            .build(0)?;

        assert_eq!(test_config.platform, Platform::KernelSuNext);
        assert!(test_config.menu.show_icon);
        assert_eq!(test_config.logs_dir, PathBuf::from("/var/tmp/logs"));

        Ok(())
    }

    #[test]
    fn test_invalid_config() -> Result<()> {
        let temp_dir = TempDir::new()?;

        let config_file = create_config_file(&temp_dir, r#"platform = "windows""#)?;
        assert!(
            MmrlConfigBuilder::default()
                .with_config_file(Some(config_file))
                .build(0)
                .is_err()
        );

        let config_file = create_config_file(&temp_dir, r#"unknown_key = true"#)?;
        assert!(
            MmrlConfigBuilder::default()
                .with_config_file(Some(config_file))
                .build(0)
                .is_err()
        );

        Ok(())
    }
}
