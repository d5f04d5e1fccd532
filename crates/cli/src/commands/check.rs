use std::path::{Path, PathBuf};

use backport_warden_core::event::PullRequestEvent;
use backport_warden_core::milestones::MilestoneAction;
use backport_warden_core::BackportWarden;
use backport_warden_developer_platforms::github::{create_token_client, GitHubProvider};
use backport_warden_developer_platforms::models::Repository;
use clap::Args;
use tracing::{debug, error, info, instrument};

use crate::config::{resolve_config, SettingOverrides};
use crate::errors::CliError;

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// GitHub token used to read and update the pull request
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub API, for GitHub Enterprise
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Name of the event that triggered the run
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    pub event_name: Option<String>,

    /// Path to the JSON payload of the event that triggered the run
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Repository to check, as owner/name. Overrides the event.
    #[arg(long)]
    pub repository: Option<String>,

    /// Pull request to check. Overrides the event.
    #[arg(long)]
    pub pr_number: Option<u64>,

    /// Alternate config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Settings overriding the config file
    #[command(flatten)]
    pub settings: SettingOverrides,
}

/// Determines the repository and pull request to check.
///
/// `--repository` and `--pr-number` take precedence. Whatever they leave open
/// is read from the event payload.
pub fn resolve_target(
    repository: Option<&str>,
    pr_number: Option<u64>,
    event_name: Option<&str>,
    event_path: Option<&Path>,
) -> Result<(Repository, u64), CliError> {
    let repository = repository
        .map(|name| {
            Repository::from_full_name(name).ok_or_else(|| {
                CliError::InvalidArguments(format!(
                    "'{}' is not a repository name of the form owner/name",
                    name
                ))
            })
        })
        .transpose()?;

    if let (Some(repository), Some(pr_number)) = (&repository, pr_number) {
        return Ok((repository.clone(), pr_number));
    }

    let (Some(event_name), Some(event_path)) = (event_name, event_path) else {
        return Err(CliError::InvalidArguments(
            "Provide --repository and --pr-number, or run from a workflow that sets GITHUB_EVENT_NAME and GITHUB_EVENT_PATH"
                .to_string(),
        ));
    };

    let event = PullRequestEvent::load(event_name, event_path)?;
    Ok((
        repository.unwrap_or(event.repository),
        pr_number.unwrap_or(event.pr_number),
    ))
}

/// Executes the `check` command.
///
/// Loads the configuration, determines the pull request from the arguments or
/// the workflow event, and runs every backport check against it.
///
/// # Errors
///
/// * `ConfigError` if the configuration or the event is invalid
/// * `AuthError` if no token is available or GitHub rejects it
/// * `NetworkError` if GitHub could not be queried or updated
/// * `ValidationFailed` if a backport check failed
#[instrument(skip(args))]
pub async fn execute(args: CheckArgs) -> Result<(), CliError> {
    let config = resolve_config(args.config.as_deref(), &args.settings)?;
    debug!(config = ?config, "Resolved configuration");

    let (repository, pr_number) = resolve_target(
        args.repository.as_deref(),
        args.pr_number,
        args.event_name.as_deref(),
        args.event_path.as_deref(),
    )?;

    let Some(token) = args.token.as_deref() else {
        return Err(CliError::AuthError(
            "No GitHub token. Set GITHUB_TOKEN or pass --token".to_string(),
        ));
    };
    let client = create_token_client(token, args.api_url.as_deref())?;
    let warden = BackportWarden::with_config(GitHubProvider::new(client), config);

    let result = warden
        .process_pull_request(&repository.owner, &repository.name, pr_number)
        .await
        .inspect_err(|e| {
            error!(
                repository_owner = repository.owner.as_str(),
                repository = repository.name.as_str(),
                pull_request = pr_number,
                error = e.to_string(),
                "Backport check failed"
            )
        })?;

    info!(
        repository_owner = repository.owner.as_str(),
        repository = repository.name.as_str(),
        pull_request = pr_number,
        "Backport check passed"
    );

    match (&result.resolved_milestone, &result.milestone_action) {
        (Some(resolved), MilestoneAction::Assign(_)) => {
            println!(
                "{}#{}: backport labels are valid, milestone set to {}",
                repository, pr_number, resolved.milestone
            );
        }
        (Some(resolved), _) => {
            println!(
                "{}#{}: backport labels are valid, milestone {} is up to date",
                repository, pr_number, resolved.milestone
            );
        }
        (None, _) => {
            println!("{}#{}: backport labels are valid", repository, pr_number);
        }
    }

    Ok(())
}
