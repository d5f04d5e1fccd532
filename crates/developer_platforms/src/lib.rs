use async_trait::async_trait;

pub mod errors;

pub mod github;

pub mod models;
use errors::Error;
use models::{Label, Milestone, PullRequest};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Trait for interacting with developer platforms that host pull requests (e.g. GitHub).
///
/// Implementations provide read access to the pull request, the repository's label
/// definitions, milestones and branches, and a single write operation that assigns
/// a milestone to a pull request.
///
/// Methods are ordered alphabetically.
///
/// # Example Implementation
///
/// ```rust,no_run
/// use backport_warden_developer_platforms::{PullRequestProvider, errors::Error, models::{Label, Milestone, PullRequest}};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct GitHubProvider {
///     // Fields for authentication, etc.
///     token: String,
/// }
///
/// #[async_trait]
/// impl PullRequestProvider for GitHubProvider {
///     async fn get_pull_request(
///         &self,
///         repo_owner: &str,
///         repo_name: &str,
///         pr_number: u64,
///     ) -> Result<PullRequest, Error> {
///         // Implementation to fetch PR from GitHub API
///         // ...
///         # unimplemented!()
///     }
///
///     // Implement other required methods...
///     # async fn branch_exists(&self, _: &str, _: &str, _: &str) -> Result<bool, Error> { unimplemented!() }
///     # async fn list_available_labels(&self, _: &str, _: &str) -> Result<Vec<Label>, Error> { unimplemented!() }
///     # async fn list_open_milestones(&self, _: &str, _: &str) -> Result<Vec<Milestone>, Error> { unimplemented!() }
///     # async fn update_pull_request_milestone(&self, _: &str, _: &str, _: u64, _: u64) -> Result<(), Error> { unimplemented!() }
/// }
/// ```
#[async_trait]
pub trait PullRequestProvider {
    /// Checks whether a branch with the given name exists in the repository.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `branch` - The name of the branch, e.g. `1.2.x`
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the branch exists, `Ok(false)` if the platform reports that it
    /// does not, or an error if the platform could not be queried.
    async fn branch_exists(
        &self,
        repo_owner: &str,
        repo_name: &str,
        branch: &str,
    ) -> Result<bool, Error>;

    /// Retrieves a pull request, including its labels and milestone.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `pr_number` - The pull request number
    ///
    /// # Returns
    ///
    /// A `Result` containing the pull request information
    async fn get_pull_request(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<PullRequest, Error>;

    /// Lists all labels defined on the repository, with their descriptions.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    ///
    /// # Returns
    ///
    /// A `Result` containing every label of the repository, across all pages
    async fn list_available_labels(
        &self,
        repo_owner: &str,
        repo_name: &str,
    ) -> Result<Vec<Label>, Error>;

    /// Lists the open milestones of the repository.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    ///
    /// # Returns
    ///
    /// A `Result` containing every open milestone of the repository, across all pages
    async fn list_open_milestones(
        &self,
        repo_owner: &str,
        repo_name: &str,
    ) -> Result<Vec<Milestone>, Error>;

    /// Assigns a milestone to a pull request, replacing any existing milestone.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `pr_number` - The pull request number
    /// * `milestone_number` - The number of the milestone to assign
    ///
    /// # Returns
    ///
    /// A `Result` indicating success or failure
    async fn update_pull_request_milestone(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        milestone_number: u64,
    ) -> Result<(), Error>;
}
