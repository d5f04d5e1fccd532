//! # Labels
//!
//! Typed views over the labels of a repository and of a pull request.
//!
//! A backport label is named `<LABEL_PREFIX><branch>`, where the branch is a
//! branch version such as `1.2.x`, optionally behind the tag prefix
//! (`backport-v1.2.x`). The no-backport label marks a pull request that should
//! only land on the main line.

use backport_warden_developer_platforms::models::Label;
use tracing::debug;

use crate::config::{BackportConfig, BACKPORT_DESCRIPTION_PREFIX};
use crate::errors::BackportWardenError;
use crate::version::SemanticVersion;

#[cfg(test)]
#[path = "labels_tests.rs"]
mod tests;

/// A label that requests a backport to a maintenance branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackportLabel {
    /// The full label name, e.g. `backport-1.2.x`
    pub name: String,

    /// The branch the label targets, i.e. the name without the label prefix
    pub branch: String,

    /// The branch version, always with a wildcard patch
    pub version: SemanticVersion,
}

impl BackportLabel {
    /// Parses a backport label name.
    ///
    /// The tag prefix in front of the branch version is optional, so with a
    /// tag prefix of `v` both `backport-v1.2.x` and `backport-1.2.x` parse to
    /// the `1.2.x` branch version.
    ///
    /// # Errors
    ///
    /// Returns `BackportWardenError::ParseError` if the name does not start
    /// with the label prefix or the remainder is not a branch version.
    ///
    /// # Examples
    ///
    /// ```
    /// use backport_warden_core::config::BackportConfig;
    /// use backport_warden_core::labels::BackportLabel;
    ///
    /// let config = BackportConfig::default();
    /// let label = BackportLabel::parse("backport-1.2.x", &config).unwrap();
    ///
    /// assert_eq!(label.branch, "1.2.x");
    /// assert_eq!(label.required_description(), "on-merge: backport to 1.2.x");
    /// ```
    pub fn parse(name: &str, config: &BackportConfig) -> Result<Self, BackportWardenError> {
        let Some(branch) = name.strip_prefix(config.label_prefix.as_str()) else {
            return Err(BackportWardenError::parse(
                name,
                format!("expected the label prefix '{}'", config.label_prefix),
            ));
        };

        let version_text = branch
            .strip_prefix(config.tag_prefix.as_str())
            .unwrap_or(branch);
        let version = SemanticVersion::parse_branch(version_text, "").map_err(|_| {
            BackportWardenError::parse(
                name,
                format!("'{}' is not a branch version such as 1.2.x", branch),
            )
        })?;

        Ok(Self {
            name: name.to_string(),
            branch: branch.to_string(),
            version,
        })
    }

    /// The description the backport bot expects on this label.
    pub fn required_description(&self) -> String {
        format!("{}{}", BACKPORT_DESCRIPTION_PREFIX, self.branch)
    }
}

/// Returns `true` if `name` carries the backport label prefix and is not the
/// no-backport label.
pub fn is_backport_label_name(name: &str, config: &BackportConfig) -> bool {
    name != config.no_backport && name.starts_with(config.label_prefix.as_str())
}

/// A repository label whose description differs from the one the backport
/// bot requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionMismatch {
    pub label: String,
    pub expected: String,
    pub actual: Option<String>,
}

/// The backport-relevant labels of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestLabels {
    /// Whether the no-backport label is applied
    pub no_backport: bool,

    /// The backport labels, in the order they are applied
    pub backports: Vec<BackportLabel>,
}

impl PullRequestLabels {
    /// Partitions the labels of a pull request. Labels that are neither the
    /// no-backport label nor carry the backport prefix are ignored.
    ///
    /// # Errors
    ///
    /// Returns `BackportWardenError::ParseError` for a backport-prefixed label
    /// that does not name a branch version.
    pub fn classify(
        labels: &[Label],
        config: &BackportConfig,
    ) -> Result<Self, BackportWardenError> {
        let mut result = Self::default();
        for label in labels {
            if label.name == config.no_backport {
                result.no_backport = true;
            } else if is_backport_label_name(&label.name, config) {
                result
                    .backports
                    .push(BackportLabel::parse(&label.name, config)?);
            }
        }

        debug!(
            no_backport = result.no_backport,
            count = result.backports.len(),
            "Classified pull request labels"
        );

        Ok(result)
    }

    pub fn has_backports(&self) -> bool {
        !self.backports.is_empty()
    }
}
