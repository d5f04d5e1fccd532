//! Configuration settings for the Backport Warden core functionality.
//!
//! The configuration is captured once, at process start, into an immutable
//! [`BackportConfig`] that is passed explicitly to every check.
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::errors::{BackportWardenError, ConfigLoadError};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Prefix of the description the backport bot requires on backport labels
pub const BACKPORT_DESCRIPTION_PREFIX: &str = "on-merge: backport to ";

/// Default prefix of backport label names
pub const DEFAULT_LABEL_PREFIX: &str = "backport-";

/// Default name of the label marking a pull request as not needing a backport
pub const DEFAULT_NO_BACKPORT_LABEL: &str = "no-backport";

/// Default prefix in front of versions in branch and milestone names
pub const DEFAULT_TAG_PREFIX: &str = "";

lazy_static! {
    /// Pre-compiled regex for `<major>.<minor>.<patch>` and `<major>.<minor>.x` versions
    pub static ref VERSION_REGEX: Regex = Regex::new(
        r"^([0-9]+)\.([0-9]+)\.([0-9]+|x)$"
    ).expect("Failed to compile version regex");
}

/// How the resolved milestone is applied to the pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MilestoneMode {
    /// Milestones are neither resolved nor applied
    #[default]
    Off,

    /// Set the milestone when the pull request has none, fail when it has a
    /// different one
    Check,

    /// Always replace the milestone with the resolved one
    Overwrite,
}

impl MilestoneMode {
    pub fn is_enabled(&self) -> bool {
        *self != MilestoneMode::Off
    }
}

impl FromStr for MilestoneMode {
    type Err = BackportWardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "false" => Ok(MilestoneMode::Off),
            "true" => Ok(MilestoneMode::Check),
            "overwrite" => Ok(MilestoneMode::Overwrite),
            other => Err(BackportWardenError::ConfigError(format!(
                "Invalid value for SET_MILESTONE: '{}'. Expected one of: false, true, overwrite",
                other
            ))),
        }
    }
}

impl fmt::Display for MilestoneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MilestoneMode::Off => write!(f, "false"),
            MilestoneMode::Check => write!(f, "true"),
            MilestoneMode::Overwrite => write!(f, "overwrite"),
        }
    }
}

impl Serialize for MilestoneMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MilestoneMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(true) => Ok(MilestoneMode::Check),
            Raw::Flag(false) => Ok(MilestoneMode::Off),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Parses a `true`/`false` setting, ignoring case.
pub fn parse_flag(name: &str, value: &str) -> Result<bool, BackportWardenError> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(BackportWardenError::ConfigError(format!(
            "Invalid value for {}: '{}'. Expected one of: false, true",
            name, other
        ))),
    }
}

/// Settings for a single Backport Warden run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackportConfig {
    /// Prefix in front of the version in branch and milestone names, e.g. `v`
    pub tag_prefix: String,

    /// Prefix of backport label names
    pub label_prefix: String,

    /// Name of the label marking a pull request as not needing a backport
    pub no_backport: String,

    /// Whether to check that the backport labels on the pull request are consistent
    pub check_backport_labels: bool,

    /// Whether, and how, to set the milestone of the pull request
    pub set_milestone: MilestoneMode,
}

impl BackportConfig {
    /// Checks the settings that would make label classification meaningless.
    pub fn validate(&self) -> Result<(), BackportWardenError> {
        if self.label_prefix.is_empty() {
            return Err(BackportWardenError::ConfigError(
                "The backport label prefix must not be empty".to_string(),
            ));
        }

        if self.no_backport.is_empty() {
            return Err(BackportWardenError::ConfigError(
                "The no-backport label name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for BackportConfig {
    fn default() -> Self {
        Self {
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
            label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
            no_backport: DEFAULT_NO_BACKPORT_LABEL.to_string(),
            check_backport_labels: false,
            set_milestone: MilestoneMode::Off,
        }
    }
}

/// Loads a Backport Warden configuration file.
///
/// Keys missing from the file take their default values.
///
/// # Arguments
/// * `path` - Path to the TOML configuration file
///
/// # Returns
/// * `Ok(BackportConfig)` if loaded and valid
/// * `Err(ConfigLoadError)` if the file is missing, unreadable, malformed or invalid
pub fn load_backport_config<P: AsRef<Path>>(path: P) -> Result<BackportConfig, ConfigLoadError> {
    let path_ref = path.as_ref();
    let content = match fs::read_to_string(path_ref) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigLoadError::NotFound(path_ref.display().to_string()));
        }
        Err(e) => return Err(ConfigLoadError::Io(e)),
    };

    let config: BackportConfig = toml::from_str(&content)?;
    config
        .validate()
        .map_err(|e| ConfigLoadError::Invalid(e.to_string()))?;

    Ok(config)
}
