//! # Models
//!
//! This module contains the data models exchanged with developer platforms.
//!
//! These models represent the entities that Backport Warden reads from the
//! platform (pull requests, labels and milestones). They are serializable to
//! allow them to be loaded from, and logged as, JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a label, either applied to a pull request or defined on a repository.
///
/// # Examples
///
/// ```
/// use backport_warden_developer_platforms::models::Label;
///
/// let label = Label {
///     name: "backport-1.2.x".to_string(),
///     description: Some("on-merge: backport to 1.2.x".to_string()),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The name of the label
    pub name: String,

    /// The description of the label, if any
    #[serde(default)]
    pub description: Option<String>,
}

/// Represents a milestone defined on a repository.
///
/// Milestones are identified by their `number`. Two milestones with the same
/// number are the same milestone, even when their titles were loaded at
/// different times.
///
/// # Examples
///
/// ```
/// use backport_warden_developer_platforms::models::{Milestone, MilestoneState};
///
/// let milestone = Milestone {
///     number: 7,
///     title: "1.2.3".to_string(),
///     state: MilestoneState::Open,
/// };
/// assert!(milestone.is_open());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// The repository scoped number of the milestone
    pub number: u64,

    /// The title of the milestone
    pub title: String,

    /// Whether the milestone is open or closed
    pub state: MilestoneState,
}

impl Milestone {
    /// Returns `true` if new work can still be assigned to the milestone.
    pub fn is_open(&self) -> bool {
        self.state == MilestoneState::Open
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.title, self.number)
    }
}

/// The state of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    Open,
    Closed,
}

/// Represents a pull request from a Git provider.
///
/// Only the metadata Backport Warden inspects is carried: the labels applied
/// to the pull request and the milestone it is assigned to.
///
/// # Examples
///
/// ```
/// use backport_warden_developer_platforms::models::{Label, PullRequest};
///
/// let pr = PullRequest {
///     number: 123,
///     labels: vec![Label {
///         name: "no-backport".to_string(),
///         description: None,
///     }],
///     milestone: None,
/// };
/// assert!(pr.has_label("no-backport"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// The pull request number
    pub number: u64,

    /// The labels applied to the pull request
    #[serde(default)]
    pub labels: Vec<Label>,

    /// The milestone the pull request is assigned to, if any
    #[serde(default)]
    pub milestone: Option<Milestone>,
}

impl PullRequest {
    /// Returns `true` if a label with exactly the given name is applied.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }
}

/// Identifies a repository by owner and name.
///
/// # Examples
///
/// ```
/// use backport_warden_developer_platforms::models::Repository;
///
/// let repo = Repository::from_full_name("octocat/hello-world").unwrap();
/// assert_eq!(repo.owner, "octocat");
/// assert_eq!(repo.name, "hello-world");
/// assert_eq!(repo.to_string(), "octocat/hello-world");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// The user or organization owning the repository
    pub owner: String,

    /// The name of the repository
    pub name: String,
}

impl Repository {
    /// Splits an `owner/name` string. Returns `None` unless there are exactly
    /// two non-empty parts.
    pub fn from_full_name(full_name: &str) -> Option<Self> {
        let (owner, name) = full_name.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }

        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
