use async_trait::async_trait;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    errors::Error,
    models::{Label, Milestone, MilestoneState, PullRequest},
    PullRequestProvider,
};

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;

/// Page size used for list endpoints. GitHub caps `per_page` at 100.
const PAGE_SIZE: u8 = 100;

#[derive(Debug, Deserialize)]
struct GitHubBranch {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GitHubLabel {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubMilestone {
    number: u64,
    title: String,
    state: String,
}

impl TryFrom<GitHubMilestone> for Milestone {
    type Error = Error;

    fn try_from(value: GitHubMilestone) -> Result<Self, Self::Error> {
        let state = match value.state.as_str() {
            "open" => MilestoneState::Open,
            "closed" => MilestoneState::Closed,
            other => {
                error!(
                    milestone = value.number,
                    state = other,
                    "Unknown milestone state"
                );
                return Err(Error::InvalidResponse);
            }
        };

        Ok(Milestone {
            number: value.number,
            title: value.title,
            state,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GitHubPullRequest {
    number: u64,
    #[serde(default)]
    labels: Vec<GitHubLabel>,
    #[serde(default)]
    milestone: Option<GitHubMilestone>,
}

#[derive(Debug, Serialize)]
struct MilestoneQuery<'a> {
    state: &'a str,
    per_page: u8,
    page: u32,
}

/// Creates an `Octocrab` client authenticated with a personal access token or the
/// `GITHUB_TOKEN` of a workflow run.
///
/// # Arguments
///
/// * `token` - The token used to authenticate every request
/// * `api_url` - Optional API base URL, e.g. the value of `GITHUB_API_URL` on
///   GitHub Enterprise Server. `None` uses `https://api.github.com`.
///
/// # Errors
///
/// Returns `Error::ApiError` if the base URL cannot be parsed or the client
/// cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use backport_warden_developer_platforms::github::{create_token_client, GitHubProvider};
///
/// # fn main() -> Result<(), backport_warden_developer_platforms::errors::Error> {
/// let client = create_token_client("ghp_example", None)?;
/// let provider = GitHubProvider::new(client);
/// # Ok(())
/// # }
/// ```
#[instrument(skip(token))]
pub fn create_token_client(token: &str, api_url: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder();
    if let Some(url) = api_url {
        builder = builder.base_uri(url).map_err(|e| {
            error!(
                api_url = url,
                error_message = e.to_string(),
                "Failed to parse the API base URL"
            );
            Error::ApiError()
        })?;
    }

    builder
        .personal_token(token.to_string())
        .build()
        .map_err(|_| Error::ApiError())
}

fn log_octocrab_error(message: &str, e: &octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, .. } => error!(
            error_message = source.message,
            status_code = source.status_code.as_u16(),
            "{}. Received an error from GitHub",
            message
        ),
        _ => error!(error_message = e.to_string(), "{}", message),
    };
}

/// Translates an octocrab error into a platform error, logging the details.
fn to_platform_error(message: &str, e: octocrab::Error) -> Error {
    log_octocrab_error(message, &e);

    match &e {
        octocrab::Error::GitHub { source, .. } => match source.status_code.as_u16() {
            401 => Error::AuthError(source.message.clone()),
            403 | 429 if source.message.to_lowercase().contains("rate limit") => {
                Error::RateLimitExceeded
            }
            404 => Error::NotFound(message.to_string()),
            _ => Error::InvalidResponse,
        },
        _ => Error::InvalidResponse,
    }
}

fn is_not_found(e: &octocrab::Error) -> bool {
    matches!(e, octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404)
}

#[derive(Debug)]
pub struct GitHubProvider {
    client: Octocrab,
}

impl GitHubProvider {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PullRequestProvider for GitHubProvider {
    #[instrument]
    async fn branch_exists(
        &self,
        repo_owner: &str,
        repo_name: &str,
        branch: &str,
    ) -> Result<bool, Error> {
        let route = format!(
            "/repos/{}/{}/branches/{}",
            repo_owner,
            repo_name,
            urlencoding::encode(branch)
        );

        match self.client.get::<GitHubBranch, _, ()>(route, None).await {
            Ok(b) => {
                debug!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    branch = b.name,
                    "Found branch"
                );
                Ok(true)
            }
            Err(e) if is_not_found(&e) => {
                warn!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    branch = branch,
                    "Branch does not exist"
                );
                Ok(false)
            }
            Err(e) => Err(to_platform_error("Failed to get branch information", e)),
        }
    }

    #[instrument]
    async fn get_pull_request(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<PullRequest, Error> {
        let route = format!("/repos/{}/{}/pulls/{}", repo_owner, repo_name, pr_number);

        let pr = self
            .client
            .get::<GitHubPullRequest, _, ()>(route, None)
            .await
            .map_err(|e| to_platform_error("Failed to get pull request information", e))?;

        let milestone = pr.milestone.map(Milestone::try_from).transpose()?;

        Ok(PullRequest {
            number: pr.number,
            labels: pr
                .labels
                .into_iter()
                .map(|l| Label {
                    name: l.name,
                    description: l.description,
                })
                .collect(),
            milestone,
        })
    }

    #[instrument]
    async fn list_available_labels(
        &self,
        repo_owner: &str,
        repo_name: &str,
    ) -> Result<Vec<Label>, Error> {
        let mut current_page = self
            .client
            .issues(repo_owner, repo_name)
            .list_labels_for_repo()
            .per_page(PAGE_SIZE)
            .send()
            .await
            .map_err(|e| to_platform_error("Failed to list the labels for the repository", e))?;

        let mut labels = current_page.take_items();
        while let Some(mut new_page) = self
            .client
            .get_page(&current_page.next)
            .await
            .map_err(|e| to_platform_error("Failed to list the labels for the repository", e))?
        {
            labels.extend(new_page.take_items());

            current_page = new_page;
        }

        let result: Vec<Label> = labels
            .into_iter()
            .map(|l| Label {
                name: l.name,
                description: l.description,
            })
            .collect();

        debug!(
            repository_owner = repo_owner,
            repository = repo_name,
            count = result.len(),
            "Listed repository labels",
        );

        Ok(result)
    }

    #[instrument]
    async fn list_open_milestones(
        &self,
        repo_owner: &str,
        repo_name: &str,
    ) -> Result<Vec<Milestone>, Error> {
        let route = format!("/repos/{}/{}/milestones", repo_owner, repo_name);

        let mut milestones = Vec::new();
        let mut page = 1;
        loop {
            let query = MilestoneQuery {
                state: "open",
                per_page: PAGE_SIZE,
                page,
            };
            let batch = self
                .client
                .get::<Vec<GitHubMilestone>, _, _>(&route, Some(&query))
                .await
                .map_err(|e| {
                    to_platform_error("Failed to list the milestones for the repository", e)
                })?;

            let count = batch.len();
            for m in batch {
                milestones.push(Milestone::try_from(m)?);
            }

            if count < PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }

        debug!(
            repository_owner = repo_owner,
            repository = repo_name,
            count = milestones.len(),
            "Listed open milestones",
        );

        Ok(milestones)
    }

    #[instrument]
    async fn update_pull_request_milestone(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        milestone_number: u64,
    ) -> Result<(), Error> {
        // Milestones live on the issue side of a pull request.
        let route = format!("/repos/{}/{}/issues/{}", repo_owner, repo_name, pr_number);
        let payload = json!({ "milestone": milestone_number });

        self.client
            .patch::<serde_json::Value, _, _>(route, Some(&payload))
            .await
            .map_err(|e| {
                log_octocrab_error("Failed to set the milestone of the pull request", &e);
                Error::FailedToUpdatePullRequest("Failed to set milestone".to_string())
            })?;

        info!(
            repository_owner = repo_owner,
            repository = repo_name,
            pull_request = pr_number,
            milestone = milestone_number,
            "Updated pull request milestone",
        );

        Ok(())
    }
}
