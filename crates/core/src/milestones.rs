//! # Milestones
//!
//! Resolves the milestone a pull request belongs to from its backport labels,
//! and decides whether that milestone should be written to the pull request.
//!
//! A pull request that is backported lands in the next release of the oldest
//! branch it is backported to: the open milestone with the highest patch number
//! in that branch's `major.minor` line. A pull request with the no-backport
//! label lands in the newest open release.

use std::cmp::Ordering;

use backport_warden_developer_platforms::models::Milestone;
use backport_warden_developer_platforms::PullRequestProvider;
use tracing::{debug, info};

use crate::config::{BackportConfig, MilestoneMode};
use crate::errors::BackportWardenError;
use crate::labels::{BackportLabel, PullRequestLabels};
use crate::version::{Bucket, SemanticVersion};

#[cfg(test)]
#[path = "milestones_tests.rs"]
mod tests;

/// What a resolved milestone was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionBasis {
    /// The earliest backport label, by name
    BackportLabel(String),

    /// The no-backport label
    NoBackport,
}

/// The milestone a pull request's labels resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMilestone {
    pub milestone: Milestone,
    pub version: SemanticVersion,
    pub basis: ResolutionBasis,
}

/// An open milestone whose title parsed as a version.
#[derive(Debug)]
struct Candidate<'a> {
    milestone: &'a Milestone,
    version: SemanticVersion,
}

/// Resolves the milestone for a pull request.
///
/// # Arguments
///
/// * `labels` - The classified labels of the pull request
/// * `milestones` - The milestones of the repository; closed milestones and
///   milestones whose title is not `<TAG_PREFIX>a.b.c` are ignored
/// * `config` - The run configuration
///
/// # Errors
///
/// * `AmbiguousBackportState` if the pull request has both or neither of
///   backport labels and the no-backport label
/// * `AmbiguousLabelSet` if two backport labels name the same branch line
/// * `MilestoneNotFound` if no open milestone matches
///
/// # Examples
///
/// ```
/// use backport_warden_developer_platforms::models::{Milestone, MilestoneState};
/// use backport_warden_core::config::BackportConfig;
/// use backport_warden_core::labels::PullRequestLabels;
/// use backport_warden_core::milestones::resolve_milestone;
///
/// let labels = PullRequestLabels {
///     no_backport: true,
///     backports: Vec::new(),
/// };
/// let milestones = vec![
///     Milestone { number: 1, title: "1.2.0".to_string(), state: MilestoneState::Open },
///     Milestone { number: 2, title: "2.0.0".to_string(), state: MilestoneState::Open },
/// ];
///
/// let resolved = resolve_milestone(&labels, &milestones, &BackportConfig::default()).unwrap();
/// assert_eq!(resolved.milestone.title, "2.0.0");
/// ```
pub fn resolve_milestone(
    labels: &PullRequestLabels,
    milestones: &[Milestone],
    config: &BackportConfig,
) -> Result<ResolvedMilestone, BackportWardenError> {
    match (labels.no_backport, labels.has_backports()) {
        (false, true) => resolve_for_backport_labels(&labels.backports, milestones, config),
        (true, false) => resolve_latest(milestones, config),
        _ => Err(BackportWardenError::AmbiguousBackportState(
            config.no_backport.clone(),
        )),
    }
}

/// Selects the backport label with the earliest branch line.
///
/// # Errors
///
/// * `AmbiguousLabelSet` if two differently spelled labels name the same
///   branch line, e.g. `backport-1.2.x` and `backport-v1.2.x`
/// * `AmbiguousBackportState` if `labels` is empty
pub fn earliest_backport_label<'a>(
    labels: &'a [BackportLabel],
    config: &BackportConfig,
) -> Result<&'a BackportLabel, BackportWardenError> {
    for (index, first) in labels.iter().enumerate() {
        let bucket = first.version.bucket();
        if let Some(second) = labels[index + 1..]
            .iter()
            .find(|other| other.version.bucket() == bucket && other.name != first.name)
        {
            return Err(BackportWardenError::AmbiguousLabelSet(
                first.name.clone(),
                second.name.clone(),
                bucket.to_string(),
            ));
        }
    }

    labels
        .iter()
        .min_by(|a, b| a.version.bucket().cmp(&b.version.bucket()))
        .ok_or_else(|| BackportWardenError::AmbiguousBackportState(config.no_backport.clone()))
}

/// Orders candidates by version, and equal versions so that the lowest
/// milestone number is the greatest.
fn compare_candidates(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    a.version
        .partial_cmp(&b.version)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.milestone.number.cmp(&a.milestone.number))
}

fn open_candidates<'a>(milestones: &'a [Milestone], config: &BackportConfig) -> Vec<Candidate<'a>> {
    milestones
        .iter()
        .filter(|m| m.is_open())
        .filter_map(
            |m| match SemanticVersion::parse_milestone(&m.title, &config.tag_prefix) {
                Ok(version) => Some(Candidate {
                    milestone: m,
                    version,
                }),
                Err(e) => {
                    debug!(
                        milestone = m.title.as_str(),
                        reason = e.to_string(),
                        "Ignoring milestone that is not a version"
                    );
                    None
                }
            },
        )
        .collect()
}

fn resolve_for_backport_labels(
    labels: &[BackportLabel],
    milestones: &[Milestone],
    config: &BackportConfig,
) -> Result<ResolvedMilestone, BackportWardenError> {
    let earliest = earliest_backport_label(labels, config)?;
    let target: Bucket = earliest.version.bucket();
    debug!(
        label = earliest.name.as_str(),
        bucket = target.to_string(),
        "Selected the earliest backport label"
    );

    let selected = open_candidates(milestones, config)
        .into_iter()
        .filter(|c| c.version.is_in(target))
        .max_by(compare_candidates)
        .ok_or_else(|| {
            BackportWardenError::MilestoneNotFound(format!("{}{}", config.tag_prefix, target))
        })?;

    Ok(ResolvedMilestone {
        milestone: selected.milestone.clone(),
        version: selected.version,
        basis: ResolutionBasis::BackportLabel(earliest.name.clone()),
    })
}

fn resolve_latest(
    milestones: &[Milestone],
    config: &BackportConfig,
) -> Result<ResolvedMilestone, BackportWardenError> {
    let selected = open_candidates(milestones, config)
        .into_iter()
        .max_by(compare_candidates)
        .ok_or_else(|| {
            BackportWardenError::MilestoneNotFound(format!(
                "{}<major>.<minor>.<patch>",
                config.tag_prefix
            ))
        })?;

    Ok(ResolvedMilestone {
        milestone: selected.milestone.clone(),
        version: selected.version,
        basis: ResolutionBasis::NoBackport,
    })
}

/// The change to make to the milestone of a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MilestoneAction {
    /// Milestones are not managed
    Skipped,

    /// The pull request already has the resolved milestone
    Unchanged,

    /// The resolved milestone must be assigned to the pull request
    Assign(Milestone),
}

/// Decides how the resolved milestone is applied, given the milestone the pull
/// request currently has. Milestones are compared by number.
///
/// | mode        | no current milestone | same milestone | other milestone     |
/// |-------------|----------------------|----------------|---------------------|
/// | `Off`       | skipped              | skipped        | skipped             |
/// | `Check`     | assign               | unchanged      | `MilestoneMismatch` |
/// | `Overwrite` | assign               | unchanged      | assign              |
pub fn plan_milestone_update(
    mode: MilestoneMode,
    current: Option<&Milestone>,
    resolved: &Milestone,
) -> Result<MilestoneAction, BackportWardenError> {
    if !mode.is_enabled() {
        return Ok(MilestoneAction::Skipped);
    }

    match current {
        None => Ok(MilestoneAction::Assign(resolved.clone())),
        Some(c) if c.number == resolved.number => Ok(MilestoneAction::Unchanged),
        Some(c) => match mode {
            MilestoneMode::Overwrite => Ok(MilestoneAction::Assign(resolved.clone())),
            _ => Err(BackportWardenError::MilestoneMismatch {
                current: c.title.clone(),
                resolved: resolved.title.clone(),
            }),
        },
    }
}

/// Carries out a planned milestone change. At most one write is made.
///
/// # Returns
///
/// `true` if the pull request was updated.
pub async fn apply_milestone_update<P: PullRequestProvider + ?Sized>(
    provider: &P,
    repo_owner: &str,
    repo_name: &str,
    pr_number: u64,
    action: &MilestoneAction,
) -> Result<bool, BackportWardenError> {
    let MilestoneAction::Assign(milestone) = action else {
        debug!(
            repository_owner = repo_owner,
            repository = repo_name,
            pull_request = pr_number,
            action = ?action,
            "Not updating the pull request milestone"
        );
        return Ok(false);
    };

    provider
        .update_pull_request_milestone(repo_owner, repo_name, pr_number, milestone.number)
        .await?;

    info!(
        repository_owner = repo_owner,
        repository = repo_name,
        pull_request = pr_number,
        milestone = milestone.title.as_str(),
        "Set the milestone of the pull request"
    );
    Ok(true)
}
