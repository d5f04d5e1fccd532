//! # Backport Warden Core
//!
//! Core business logic for checking the backport labels and milestone of a
//! pull request.
//!
//! Backport Warden enforces a semantic-versioned backport workflow:
//! - Backport labels carry the description the backport bot requires
//! - Backport labels name maintenance branches that exist
//! - A pull request is either backported or explicitly marked as not backported
//! - A pull request is assigned to the milestone its labels resolve to
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use backport_warden_developer_platforms::PullRequestProvider;
//! use backport_warden_core::{BackportWarden, config::{BackportConfig, MilestoneMode}};
//! use anyhow::Result;
//!
//! async fn check_pr<P: PullRequestProvider + std::fmt::Debug>(provider: P) -> Result<()> {
//!     let config = BackportConfig {
//!         check_backport_labels: true,
//!         set_milestone: MilestoneMode::Check,
//!         ..BackportConfig::default()
//!     };
//!
//!     let warden = BackportWarden::with_config(provider, config);
//!     let result = warden.process_pull_request("owner", "repo", 123).await?;
//!
//!     if let Some(resolved) = result.resolved_milestone {
//!         println!("PR belongs to milestone {}", resolved.milestone);
//!     }
//!
//!     Ok(())
//! }
//! ```

use backport_warden_developer_platforms::PullRequestProvider;
use tracing::{debug, error, info, instrument};

pub mod checks;
pub mod config;
use config::BackportConfig;

pub mod errors;
use errors::BackportWardenError;

pub mod event;
pub mod labels;
use labels::PullRequestLabels;

pub mod milestones;
use milestones::{MilestoneAction, ResolvedMilestone};

pub mod version;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Result of checking a pull request with Backport Warden.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// The number of the pull request
    pub pr_number: u64,

    /// Names of the backport labels applied to the pull request
    pub backport_labels: Vec<String>,

    /// Whether the pull request carries the no-backport label
    pub no_backport: bool,

    /// The milestone the labels resolve to, if milestones are managed
    pub resolved_milestone: Option<ResolvedMilestone>,

    /// What was done with the resolved milestone
    pub milestone_action: MilestoneAction,
}

impl CheckResult {
    /// Returns `true` if the milestone of the pull request was changed.
    pub fn milestone_updated(&self) -> bool {
        matches!(self.milestone_action, MilestoneAction::Assign(_))
    }
}

/// Main struct for checking the backport metadata of pull requests.
///
/// `BackportWarden` runs every check in a fixed order and stops at the first
/// failure. The only change it ever makes is assigning a milestone.
///
/// # Examples
///
/// ```rust,no_run
/// use backport_warden_developer_platforms::PullRequestProvider;
/// use backport_warden_core::BackportWarden;
/// use anyhow::Result;
///
/// async fn example<P: PullRequestProvider + std::fmt::Debug>(provider: P) -> Result<()> {
///     // Only verifies label descriptions and branches
///     let warden = BackportWarden::new(provider);
///
///     let result = warden.process_pull_request("owner", "repo", 123).await?;
///
///     println!("Check result: {:?}", result);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct BackportWarden<P: PullRequestProvider + std::fmt::Debug> {
    provider: P,
    config: BackportConfig,
}

impl<P: PullRequestProvider + std::fmt::Debug> BackportWarden<P> {
    /// Creates a new `BackportWarden` instance with the default configuration.
    ///
    /// The default configuration verifies label descriptions and branches but
    /// neither checks label consistency nor manages milestones.
    ///
    /// # Arguments
    ///
    /// * `provider` - The Git provider implementation
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: BackportConfig::default(),
        }
    }

    /// Creates a new `BackportWarden` instance with a custom configuration.
    ///
    /// # Arguments
    ///
    /// * `provider` - The Git provider implementation
    /// * `config` - The configuration for this run
    pub fn with_config(provider: P, config: BackportConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &BackportConfig {
        &self.config
    }

    /// Checks a pull request and, if configured, sets its milestone.
    ///
    /// The steps are:
    /// 1. Verify the descriptions of all backport labels of the repository
    /// 2. Verify that the no-backport label and every backport branch exist
    /// 3. Check the consistency of the pull request labels, if enabled
    /// 4. Resolve the milestone and apply it, if enabled
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `pr_number` - The pull request number
    ///
    /// # Errors
    ///
    /// The first failing check, or a `GitProviderError` if the platform could
    /// not be queried or updated.
    #[instrument]
    pub async fn process_pull_request(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<CheckResult, BackportWardenError> {
        info!(
            repository_owner = repo_owner,
            repository = repo_name,
            pull_request = pr_number,
            "Processing pull request",
        );

        let pr = self
            .provider
            .get_pull_request(repo_owner, repo_name, pr_number)
            .await
            .inspect_err(|e| {
                error!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    pull_request = pr_number,
                    error = e.to_string(),
                    "Failed to find the pull request"
                )
            })?;

        let repo_labels = self
            .provider
            .list_available_labels(repo_owner, repo_name)
            .await?;
        debug!(
            repository_owner = repo_owner,
            repository = repo_name,
            count = repo_labels.len(),
            "Loaded repository labels",
        );

        let backports = checks::descriptions::verify_label_descriptions(&repo_labels, &self.config)?;
        checks::branches::verify_no_backport_label_defined(&repo_labels, &self.config)?;
        checks::branches::verify_backport_branches(
            &self.provider,
            repo_owner,
            repo_name,
            &backports,
        )
        .await?;

        let pr_labels = PullRequestLabels::classify(&pr.labels, &self.config)?;
        if self.config.check_backport_labels {
            checks::consistency::check_label_consistency(&pr_labels, &self.config)?;
        }

        let mut result = CheckResult {
            pr_number,
            backport_labels: pr_labels.backports.iter().map(|l| l.name.clone()).collect(),
            no_backport: pr_labels.no_backport,
            resolved_milestone: None,
            milestone_action: MilestoneAction::Skipped,
        };

        if !self.config.set_milestone.is_enabled() {
            info!(
                repository_owner = repo_owner,
                repository = repo_name,
                pull_request = pr_number,
                "Backport labels are valid. Milestones are not managed.",
            );
            return Ok(result);
        }

        let milestones = self
            .provider
            .list_open_milestones(repo_owner, repo_name)
            .await?;
        let resolved = milestones::resolve_milestone(&pr_labels, &milestones, &self.config)?;
        info!(
            repository_owner = repo_owner,
            repository = repo_name,
            pull_request = pr_number,
            milestone = resolved.milestone.title.as_str(),
            "Resolved milestone",
        );

        let action = milestones::plan_milestone_update(
            self.config.set_milestone,
            pr.milestone.as_ref(),
            &resolved.milestone,
        )?;
        milestones::apply_milestone_update(
            &self.provider,
            repo_owner,
            repo_name,
            pr_number,
            &action,
        )
        .await?;

        result.resolved_milestone = Some(resolved);
        result.milestone_action = action;
        Ok(result)
    }
}
