//! GitHub error types

use relnotes_core::{ProviderError, RelnotesError};
use thiserror::Error;

/// GitHub-related errors
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Repository identifier is not `owner/name`
    #[error("Invalid repository '{0}': expected owner/name")]
    InvalidRepository(String),

    /// No milestone with the requested title
    #[error("Milestone not found: {0}")]
    MilestoneNotFound(String),

    /// API error from GitHub
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, GitHubError>;

const PROVIDER: &str = "GitHub";

impl From<GitHubError> for ProviderError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::InvalidRepository(_) => ProviderError::Configuration(err.to_string()),
            GitHubError::MilestoneNotFound(version) => ProviderError::MilestoneNotFound(version),
            GitHubError::ApiError { status, message } => ProviderError::Api {
                provider: PROVIDER.to_string(),
                status,
                message,
            },
            GitHubError::Http(e) => ProviderError::Request {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            },
        }
    }
}

impl From<GitHubError> for RelnotesError {
    fn from(err: GitHubError) -> Self {
        RelnotesError::Provider(err.into())
    }
}
