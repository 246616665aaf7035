//! GitHub provider for relnotes
//!
//! Implements [`relnotes_changelog::ReleaseProvider`] on top of the GitHub
//! REST API:
//!
//! - **Milestones**: the open milestone whose title equals the release version
//!   supplies the changelog issues, and is closed after a release
//! - **Releases**: created with the version as both tag and name
//!
//! ## Usage
//!
//! ```ignore
//! use relnotes_changelog::Changelog;
//! use relnotes_github::{GitHubConfig, GitHubProvider};
//!
//! let config = GitHubConfig::new("acme/widgets")?.with_token(token);
//! let provider = GitHubProvider::new(config)?;
//! let mut changelog = Changelog::init("1.2.0", path, Box::new(provider))?;
//! changelog.find_version_issues().await?;
//! ```

pub mod error;
pub mod provider;
pub mod types;

pub use error::{GitHubError, Result};
pub use provider::{GitHubConfig, GitHubProvider, DEFAULT_API_URL};
pub use types::{GitHubItem, Issue, Label, Milestone, Release};
