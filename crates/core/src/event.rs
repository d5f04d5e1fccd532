//! # Pull Request Events
//!
//! Reads the pull request under evaluation from the event that triggered the
//! workflow run. GitHub Actions exposes the event name in `GITHUB_EVENT_NAME`
//! and writes the webhook payload to the file named by `GITHUB_EVENT_PATH`.

use std::fs;
use std::path::Path;

use backport_warden_developer_platforms::models::Repository;
use serde::Deserialize;
use tracing::debug;

use crate::errors::BackportWardenError;

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

/// Events that carry a pull request Backport Warden can check
pub const SUPPORTED_EVENTS: [&str; 2] = ["pull_request", "pull_request_target"];

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<EventPullRequest>,
}

#[derive(Debug, Deserialize)]
struct EventPullRequest {
    number: u64,
    base: EventBase,
}

#[derive(Debug, Deserialize)]
struct EventBase {
    repo: EventRepository,
}

#[derive(Debug, Deserialize)]
struct EventRepository {
    full_name: String,
}

/// The pull request a workflow run was triggered for.
///
/// The repository is the base repository of the pull request, which is the
/// repository that owns the labels, milestones and maintenance branches even
/// when the pull request comes from a fork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub repository: Repository,
    pub pr_number: u64,
}

impl PullRequestEvent {
    /// Parses an event payload.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEvent` if the event is not a pull request event or the
    /// payload does not describe a pull request.
    ///
    /// # Examples
    ///
    /// ```
    /// use backport_warden_core::event::PullRequestEvent;
    ///
    /// let payload = r#"{
    ///     "pull_request": { "number": 42, "base": { "repo": { "full_name": "octo/widgets" } } }
    /// }"#;
    ///
    /// let event = PullRequestEvent::from_payload("pull_request", payload).unwrap();
    /// assert_eq!(event.pr_number, 42);
    /// assert_eq!(event.repository.to_string(), "octo/widgets");
    /// ```
    pub fn from_payload(event_name: &str, payload: &str) -> Result<Self, BackportWardenError> {
        if !SUPPORTED_EVENTS.contains(&event_name) {
            return Err(BackportWardenError::InvalidEvent(format!(
                "'{}' is not a pull request event. Expected one of: {}",
                event_name,
                SUPPORTED_EVENTS.join(", ")
            )));
        }

        let payload: EventPayload = serde_json::from_str(payload).map_err(|e| {
            BackportWardenError::InvalidEvent(format!("Failed to parse the event payload: {}", e))
        })?;

        let Some(pull_request) = payload.pull_request else {
            return Err(BackportWardenError::InvalidEvent(
                "The event payload does not contain a pull request".to_string(),
            ));
        };

        let full_name = pull_request.base.repo.full_name;
        let repository = Repository::from_full_name(&full_name).ok_or_else(|| {
            BackportWardenError::InvalidEvent(format!(
                "'{}' is not a repository name of the form owner/name",
                full_name
            ))
        })?;

        debug!(
            repository_owner = repository.owner.as_str(),
            repository = repository.name.as_str(),
            pull_request = pull_request.number,
            "Read pull request event"
        );

        Ok(Self {
            repository,
            pr_number: pull_request.number,
        })
    }

    /// Reads and parses the event payload stored at `path`.
    pub fn load<P: AsRef<Path>>(event_name: &str, path: P) -> Result<Self, BackportWardenError> {
        let path_ref = path.as_ref();
        let payload = fs::read_to_string(path_ref).map_err(|e| {
            BackportWardenError::InvalidEvent(format!(
                "Failed to read the event payload '{}': {}",
                path_ref.display(),
                e
            ))
        })?;

        Self::from_payload(event_name, &payload)
    }
}
