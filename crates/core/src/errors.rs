use backport_warden_developer_platforms::errors::Error as PlatformError;
use indoc::formatdoc;
use thiserror::Error;

use crate::labels::DescriptionMismatch;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

#[derive(Error, Debug)]
pub enum BackportWardenError {
    #[error("Cannot resolve a milestone: the pull request must have either the '{0}' label or backport labels, but not both")]
    AmbiguousBackportState(String),

    #[error("Backport labels '{0}' and '{1}' both target the {2} branch line")]
    AmbiguousLabelSet(String, String, String),

    #[error("Backport label '{0}' targets branch '{1}' which does not exist")]
    BackportBranchNotFound(String, String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Git provider error: {0}")]
    GitProviderError(#[from] PlatformError),

    #[error("Inconsistent backport labels: {0}")]
    InconsistentLabels(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("{}", describe_mismatches(.0))]
    LabelDescriptionMismatch(Vec<DescriptionMismatch>),

    #[error("Pull request already has milestone '{current}' but its labels resolve to '{resolved}'")]
    MilestoneMismatch { current: String, resolved: String },

    #[error("No open milestone found for {0}")]
    MilestoneNotFound(String),

    #[error("The '{0}' label is not defined on the repository")]
    NoBackportLabelNotFound(String),

    #[error("Failed to parse version '{input}': {reason}")]
    ParseError { input: String, reason: String },
}

impl BackportWardenError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        BackportWardenError::ParseError {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn describe_mismatches(mismatches: &[DescriptionMismatch]) -> String {
    let items = mismatches
        .iter()
        .map(|m| {
            format!(
                "- {}: expected '{}', found '{}'",
                m.label,
                m.expected,
                m.actual.as_deref().unwrap_or("<none>")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    formatdoc!(
        "{count} backport label(s) have an incorrect description:
        {items}",
        count = mismatches.len(),
    )
}
