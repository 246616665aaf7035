//! Issue tracker provider trait

use async_trait::async_trait;
use relnotes_core::Result;

use crate::types::Section;

/// Trait for issue trackers that hold milestones and publish releases
///
/// Implementations resolve a version string to a milestone by exact title
/// match, fill changelog sections with the milestone's issues and manage
/// the release lifecycle.
#[async_trait]
pub trait ReleaseProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Append the issues of the milestone titled `version` to every section
    /// whose labels they match.
    ///
    /// Fails with `ProviderError::MilestoneNotFound` when no open milestone
    /// carries that title.
    async fn find_version_issues(&self, version: &str, sections: &mut [Section]) -> Result<()>;

    /// Create a release named and tagged `version`
    async fn create_release(&self, version: &str, prerelease: bool, body: &str) -> Result<()>;

    /// Close the milestone titled `version`.
    ///
    /// Closing an already closed milestone is a no-op that only logs a
    /// warning.
    async fn close_version(&self, version: &str) -> Result<()>;
}
