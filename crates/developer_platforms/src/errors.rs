#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Error types for developer platform operations.
///
/// This enum represents all possible errors that can occur when interacting
/// with developer platforms like GitHub. Each variant provides specific context
/// about the type of failure encountered.
///
/// # Examples
///
/// ```rust
/// use backport_warden_developer_platforms::errors::Error;
///
/// // Authentication error
/// let auth_error = Error::AuthError("Invalid token".to_string());
/// println!("{}", auth_error);
///
/// // Rate limit error
/// let rate_limit = Error::RateLimitExceeded;
/// assert_eq!(rate_limit.to_string(), "Rate limit exceeded");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Generic API request failure.
    ///
    /// Used as a fallback when more specific error information is not available,
    /// for instance when the API client itself could not be constructed.
    #[error("API request failed")]
    ApiError(),

    /// Authentication failed with the platform.
    ///
    /// The provided token is invalid, expired, or lacks the permissions needed
    /// for the requested operation.
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Failed to update pull request.
    ///
    /// The platform rejected a change to the pull request metadata, e.g. setting
    /// its milestone. The string parameter describes the operation that failed.
    #[error("Failed to update the PR: {0}")]
    FailedToUpdatePullRequest(String),

    /// Invalid response format from platform API.
    ///
    /// The response was not in the expected format or the request failed in a
    /// way that does not map onto a more specific variant.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource does not exist on the platform.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Platform rate limit exceeded.
    ///
    /// GitHub allows 1000 requests per hour for the `GITHUB_TOKEN` of a workflow
    /// run. Nothing is retried, the run fails.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
