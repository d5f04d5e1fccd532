use std::{
    fs,
    path::{Path, PathBuf},
};

use backport_warden_core::config::{load_backport_config, parse_flag, BackportConfig};
use clap::Args;
use tracing::{debug, info};

use crate::errors::CliError;

/// Default configuration file, relative to the repository root
pub const DEFAULT_CONFIG_FILENAME: &str = ".github/backport-warden.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Settings that override the configuration file.
///
/// Each setting is read from its flag, or else from the environment variable
/// of the same name that the GitHub Action sets.
#[derive(Args, Debug, Default, Clone)]
pub struct SettingOverrides {
    /// Prefix in front of the version in branch and milestone names
    #[arg(long, env = "TAG_PREFIX")]
    pub tag_prefix: Option<String>,

    /// Prefix of backport label names
    #[arg(long, env = "LABEL_PREFIX")]
    pub label_prefix: Option<String>,

    /// Name of the no-backport label
    #[arg(long, env = "NO_BACKPORT")]
    pub no_backport: Option<String>,

    /// Check that the pull request has consistent backport labels (true/false)
    #[arg(long, env = "CHECK_BACKPORT_LABELS")]
    pub check_backport_labels: Option<String>,

    /// Set the milestone of the pull request (false/true/overwrite)
    #[arg(long, env = "SET_MILESTONE")]
    pub set_milestone: Option<String>,
}

impl SettingOverrides {
    /// Applies the overrides on top of `config` and validates the result.
    pub fn apply(&self, mut config: BackportConfig) -> Result<BackportConfig, CliError> {
        if let Some(tag_prefix) = &self.tag_prefix {
            config.tag_prefix = tag_prefix.clone();
        }

        if let Some(label_prefix) = &self.label_prefix {
            config.label_prefix = label_prefix.clone();
        }

        if let Some(no_backport) = &self.no_backport {
            config.no_backport = no_backport.clone();
        }

        if let Some(value) = &self.check_backport_labels {
            config.check_backport_labels = parse_flag("CHECK_BACKPORT_LABELS", value)?;
        }

        if let Some(value) = &self.set_milestone {
            config.set_milestone = value.parse()?;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Get the path to the configuration file
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}

/// Builds the configuration for a run.
///
/// An explicitly named configuration file must exist. Without one, the default
/// file is used when present, and the built-in defaults otherwise. The
/// overrides are applied last.
pub fn resolve_config(
    config_path: Option<&str>,
    overrides: &SettingOverrides,
) -> Result<BackportConfig, CliError> {
    let path = get_config_path(config_path);
    let base = if config_path.is_some() || path.exists() {
        debug!("Loading configuration from {:?}", path);
        load_backport_config(&path)?
    } else {
        debug!("No configuration file at {:?}, using defaults", path);
        BackportConfig::default()
    };

    overrides.apply(base)
}

/// Writes `config` to `path`, creating parent directories as needed.
pub fn save_config(config: &BackportConfig, path: &Path) -> Result<(), CliError> {
    debug!("Saving configuration to {:?}", path);

    let content = toml::to_string_pretty(config)
        .map_err(|e| CliError::ConfigError(format!("Failed to serialize configuration: {}", e)))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::ConfigError(format!("Failed to create directory: {}", e)))?;
    }

    fs::write(path, content).map_err(|e| {
        CliError::ConfigError(format!("Failed to write configuration file: {}", e))
    })?;

    info!("Configuration saved to {:?}", path);
    Ok(())
}
