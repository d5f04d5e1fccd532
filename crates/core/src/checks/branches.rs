//! # Branch Verification
//!
//! A backport label is only useful when the branch it names exists, and the
//! no-backport label is only useful when it can be applied.

use backport_warden_developer_platforms::models::Label;
use backport_warden_developer_platforms::PullRequestProvider;
use tracing::{debug, warn};

use crate::config::BackportConfig;
use crate::errors::BackportWardenError;
use crate::labels::BackportLabel;

#[cfg(test)]
#[path = "branches_tests.rs"]
mod tests;

/// Verifies that the configured no-backport label is defined on the repository.
///
/// # Errors
///
/// Returns `NoBackportLabelNotFound` if none of `labels` carries the
/// configured name.
pub fn verify_no_backport_label_defined(
    labels: &[Label],
    config: &BackportConfig,
) -> Result<(), BackportWardenError> {
    if labels.iter().any(|l| l.name == config.no_backport) {
        return Ok(());
    }

    warn!(
        label = config.no_backport.as_str(),
        "The no-backport label is not defined on the repository"
    );
    Err(BackportWardenError::NoBackportLabelNotFound(
        config.no_backport.clone(),
    ))
}

/// Verifies that the branch of every backport label exists.
///
/// Branches are looked up one at a time and the first missing branch fails the
/// check.
///
/// # Arguments
///
/// * `provider` - The platform to query
/// * `repo_owner` - The owner of the repository
/// * `repo_name` - The name of the repository
/// * `labels` - The backport labels defined on the repository
///
/// # Errors
///
/// * `BackportBranchNotFound` naming the label and its missing branch
/// * `GitProviderError` if a branch could not be looked up
pub async fn verify_backport_branches<P: PullRequestProvider + ?Sized>(
    provider: &P,
    repo_owner: &str,
    repo_name: &str,
    labels: &[BackportLabel],
) -> Result<(), BackportWardenError> {
    for label in labels {
        let exists = provider
            .branch_exists(repo_owner, repo_name, &label.branch)
            .await?;
        if !exists {
            warn!(
                repository_owner = repo_owner,
                repository = repo_name,
                label = label.name.as_str(),
                branch = label.branch.as_str(),
                "Backport label targets a branch that does not exist"
            );
            return Err(BackportWardenError::BackportBranchNotFound(
                label.name.clone(),
                label.branch.clone(),
            ));
        }

        debug!(
            repository_owner = repo_owner,
            repository = repo_name,
            branch = label.branch.as_str(),
            "Found backport branch"
        );
    }

    Ok(())
}
