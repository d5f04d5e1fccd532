use crate::{
    config::{BackportConfig, MilestoneMode},
    errors::BackportWardenError,
    milestones::{MilestoneAction, ResolutionBasis},
    BackportWarden,
};
use async_trait::async_trait;
use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};
use tokio::test;

use backport_warden_developer_platforms::errors::Error;
use backport_warden_developer_platforms::models::{
    Label, Milestone, MilestoneState, PullRequest,
};
use backport_warden_developer_platforms::PullRequestProvider;

// Mock implementation of PullRequestProvider for testing
#[derive(Debug)]
struct MockGitProvider {
    pull_request: PullRequest,
    repo_labels: Vec<Label>,
    milestones: Vec<Milestone>,
    branches: HashSet<String>,
    error_on_get_pr: bool,
    error_on_update: bool,
    milestone_writes: Arc<Mutex<Vec<u64>>>,
}

impl MockGitProvider {
    fn new(pr_labels: &[&str]) -> Self {
        Self {
            pull_request: PullRequest {
                number: 42,
                labels: pr_labels.iter().map(|n| label(n)).collect(),
                milestone: None,
            },
            repo_labels: vec![
                label("bug"),
                label("no-backport"),
                label("backport-1.1.x"),
                label("backport-2.0.x"),
            ],
            milestones: vec![
                open(1, "1.1.1"),
                open(2, "1.1.2"),
                open(3, "2.0.0"),
                open(4, "2.1.0"),
            ],
            branches: ["1.1.x", "2.0.x"].iter().map(|b| b.to_string()).collect(),
            error_on_get_pr: false,
            error_on_update: false,
            milestone_writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn with_current_milestone(mut self, milestone: Milestone) -> Self {
        self.pull_request.milestone = Some(milestone);
        self
    }

    fn writes(&self) -> Arc<Mutex<Vec<u64>>> {
        Arc::clone(&self.milestone_writes)
    }
}

#[async_trait]
impl PullRequestProvider for MockGitProvider {
    async fn branch_exists(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
        branch: &str,
    ) -> Result<bool, Error> {
        Ok(self.branches.contains(branch))
    }

    async fn get_pull_request(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
        _pr_number: u64,
    ) -> Result<PullRequest, Error> {
        if self.error_on_get_pr {
            Err(Error::ApiError())
        } else {
            Ok(self.pull_request.clone())
        }
    }

    async fn list_available_labels(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
    ) -> Result<Vec<Label>, Error> {
        Ok(self.repo_labels.clone())
    }

    async fn list_open_milestones(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
    ) -> Result<Vec<Milestone>, Error> {
        Ok(self.milestones.clone())
    }

    async fn update_pull_request_milestone(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
        _pr_number: u64,
        milestone_number: u64,
    ) -> Result<(), Error> {
        if self.error_on_update {
            return Err(Error::FailedToUpdatePullRequest(
                "Failed to set milestone".to_string(),
            ));
        }

        self.milestone_writes
            .lock()
            .unwrap()
            .push(milestone_number);
        Ok(())
    }
}

fn label(name: &str) -> Label {
    let description = name
        .strip_prefix("backport-")
        .map(|branch| format!("on-merge: backport to {}", branch));
    Label {
        name: name.to_string(),
        description,
    }
}

fn open(number: u64, title: &str) -> Milestone {
    Milestone {
        number,
        title: title.to_string(),
        state: MilestoneState::Open,
    }
}

fn config(check_backport_labels: bool, set_milestone: MilestoneMode) -> BackportConfig {
    BackportConfig {
        check_backport_labels,
        set_milestone,
        ..BackportConfig::default()
    }
}

#[test]
async fn test_constructor_new() {
    let warden = BackportWarden::new(MockGitProvider::new(&[]));

    assert_eq!(warden.config(), &BackportConfig::default());
}

#[test]
async fn test_constructor_with_config() {
    let custom = config(true, MilestoneMode::Overwrite);

    let warden = BackportWarden::with_config(MockGitProvider::new(&[]), custom.clone());

    assert_eq!(warden.config(), &custom);
}

#[test]
async fn test_default_config_only_verifies_labels() {
    let provider = MockGitProvider::new(&[]);
    let writes = provider.writes();
    let warden = BackportWarden::new(provider);

    let result = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap();

    assert!(result.backport_labels.is_empty());
    assert!(result.resolved_milestone.is_none());
    assert_eq!(result.milestone_action, MilestoneAction::Skipped);
    assert!(writes.lock().unwrap().is_empty());
}

#[test]
async fn test_check_assigns_missing_milestone() {
    let provider = MockGitProvider::new(&["backport-1.1.x", "backport-2.0.x"]);
    let writes = provider.writes();
    let warden = BackportWarden::with_config(provider, config(true, MilestoneMode::Check));

    let result = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap();

    let resolved = result.resolved_milestone.clone().unwrap();
    assert_eq!(resolved.milestone.title, "1.1.2");
    assert_eq!(
        resolved.basis,
        ResolutionBasis::BackportLabel("backport-1.1.x".to_string())
    );
    assert!(result.milestone_updated());
    assert_eq!(*writes.lock().unwrap(), vec![2]);
}

#[test]
async fn test_check_with_other_milestone_fails_without_write() {
    let provider = MockGitProvider::new(&["backport-1.1.x"]).with_current_milestone(open(1, "1.1.1"));
    let writes = provider.writes();
    let warden = BackportWarden::with_config(provider, config(false, MilestoneMode::Check));

    let err = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap_err();

    assert!(matches!(err, BackportWardenError::MilestoneMismatch { .. }));
    assert!(writes.lock().unwrap().is_empty());
}

#[test]
async fn test_overwrite_replaces_other_milestone_once() {
    let provider = MockGitProvider::new(&["backport-1.1.x"]).with_current_milestone(open(1, "1.1.1"));
    let writes = provider.writes();
    let warden = BackportWarden::with_config(provider, config(false, MilestoneMode::Overwrite));

    let result = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap();

    assert!(result.milestone_updated());
    assert_eq!(*writes.lock().unwrap(), vec![2]);
}

#[test]
async fn test_matching_milestone_is_not_rewritten() {
    let provider = MockGitProvider::new(&["backport-1.1.x"]).with_current_milestone(open(2, "1.1.2"));
    let writes = provider.writes();
    let warden = BackportWarden::with_config(provider, config(false, MilestoneMode::Overwrite));

    let result = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap();

    assert_eq!(result.milestone_action, MilestoneAction::Unchanged);
    assert!(writes.lock().unwrap().is_empty());
}

#[test]
async fn test_no_backport_resolves_latest_milestone() {
    let provider = MockGitProvider::new(&["no-backport"]);
    let writes = provider.writes();
    let warden = BackportWarden::with_config(provider, config(true, MilestoneMode::Check));

    let result = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap();

    assert!(result.no_backport);
    assert_eq!(result.resolved_milestone.unwrap().milestone.title, "2.1.0");
    assert_eq!(*writes.lock().unwrap(), vec![4]);
}

#[test]
async fn test_consistency_check_rejects_pull_request_without_labels() {
    let warden = BackportWarden::with_config(
        MockGitProvider::new(&["bug"]),
        config(true, MilestoneMode::Off),
    );

    let err = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap_err();

    assert!(matches!(err, BackportWardenError::InconsistentLabels(_)));
}

#[test]
async fn test_consistency_check_rejects_mixed_labels() {
    let warden = BackportWarden::with_config(
        MockGitProvider::new(&["no-backport", "backport-1.1.x"]),
        config(true, MilestoneMode::Check),
    );

    let err = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap_err();

    assert!(matches!(err, BackportWardenError::InconsistentLabels(_)));
}

#[test]
async fn test_mixed_labels_without_consistency_check_are_ambiguous() {
    let warden = BackportWarden::with_config(
        MockGitProvider::new(&["no-backport", "backport-1.1.x"]),
        config(false, MilestoneMode::Check),
    );

    let err = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap_err();

    assert!(matches!(err, BackportWardenError::AmbiguousBackportState(_)));
}

#[test]
async fn test_wrong_label_description_fails_first() {
    let mut provider = MockGitProvider::new(&["backport-1.1.x"]);
    provider.repo_labels[2].description = Some("backport".to_string());
    let writes = provider.writes();
    let warden = BackportWarden::with_config(provider, config(true, MilestoneMode::Check));

    let err = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BackportWardenError::LabelDescriptionMismatch(m) if m.len() == 1
    ));
    assert!(writes.lock().unwrap().is_empty());
}

#[test]
async fn test_missing_backport_branch_fails() {
    let mut provider = MockGitProvider::new(&[]);
    provider.branches.remove("2.0.x");
    let warden = BackportWarden::new(provider);

    let err = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BackportWardenError::BackportBranchNotFound(label, branch)
            if label == "backport-2.0.x" && branch == "2.0.x"
    ));
}

#[test]
async fn test_missing_no_backport_label_fails() {
    let mut provider = MockGitProvider::new(&[]);
    provider.repo_labels.retain(|l| l.name != "no-backport");
    let warden = BackportWarden::new(provider);

    let err = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap_err();

    assert!(matches!(err, BackportWardenError::NoBackportLabelNotFound(_)));
}

#[test]
async fn test_missing_milestone_in_bucket_fails() {
    let mut provider = MockGitProvider::new(&["backport-1.1.x"]);
    provider.milestones = vec![open(5, "1.2.0")];
    let warden = BackportWarden::with_config(provider, config(false, MilestoneMode::Check));

    let err = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap_err();

    assert!(matches!(err, BackportWardenError::MilestoneNotFound(_)));
}

#[test]
async fn test_get_pull_request_error_propagates() {
    let mut provider = MockGitProvider::new(&[]);
    provider.error_on_get_pr = true;
    let warden = BackportWarden::new(provider);

    let err = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap_err();

    assert!(matches!(err, BackportWardenError::GitProviderError(_)));
}

#[test]
async fn test_update_error_propagates() {
    let mut provider = MockGitProvider::new(&["backport-2.0.x"]);
    provider.error_on_update = true;
    let warden = BackportWarden::with_config(provider, config(false, MilestoneMode::Check));

    let err = warden
        .process_pull_request("owner", "repo", 42)
        .await
        .unwrap_err();

    assert!(matches!(err, BackportWardenError::GitProviderError(_)));
}
