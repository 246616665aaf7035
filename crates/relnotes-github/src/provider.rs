//! GitHub milestones and releases
//!
//! ## Authentication
//!
//! Requests carry `Authorization: Bearer <token>` when a token is configured.
//! Reading milestones of a public repository works without one; creating a
//! release or closing a milestone does not.
//!
//! ## Usage
//!
//! ```ignore
//! use relnotes_github::{GitHubConfig, GitHubProvider};
//!
//! let config = GitHubConfig::new("acme/widgets")?.with_token(token);
//! let provider = GitHubProvider::new(config)?;
//! provider.find_version_issues("1.2.0", &mut sections).await?;
//! ```

use async_trait::async_trait;
use relnotes_changelog::{assign_to_sections, ReleaseProvider, Section};
use relnotes_core::IssueStateFilter;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{GitHubError, Result};
use crate::types::{GitHubItem, Issue, Milestone, MilestoneUpdate, NewRelease, Release};

/// Default GitHub REST API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size requested from list endpoints
const PER_PAGE: &str = "100";

/// GitHub provider configuration
#[derive(Clone)]
pub struct GitHubConfig {
    /// API base URL (default: "https://api.github.com")
    pub api_url: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Access token
    pub token: Option<String>,
    /// Which milestone issues are listed
    pub issue_state: IssueStateFilter,
}

impl GitHubConfig {
    /// Create a configuration for an `owner/name` repository identifier
    pub fn new(repository: &str) -> Result<Self> {
        let (owner, repo) = repository
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
            .ok_or_else(|| GitHubError::InvalidRepository(repository.to_string()))?;

        Ok(Self {
            api_url: DEFAULT_API_URL.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: None,
            issue_state: IssueStateFilter::default(),
        })
    }

    /// Set API base URL (GitHub Enterprise or a test server)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set access token; an empty token is ignored
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    /// Set the issue state filter
    pub fn with_issue_state(mut self, state: IssueStateFilter) -> Self {
        self.issue_state = state;
        self
    }

    fn repo_path(&self) -> String {
        format!("/repos/{}/{}", self.owner, self.repo)
    }
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_url", &self.api_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("issue_state", &self.issue_state)
            .finish()
    }
}

/// GitHub issue tracker provider
#[derive(Debug)]
pub struct GitHubProvider {
    config: GitHubConfig,
    client: Client,
}

impl GitHubProvider {
    /// Create a new GitHub provider
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("relnotes/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    /// Provider configuration
    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    /// Make an API request and decode the JSON response
    async fn api_request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.config.api_url.trim_end_matches('/'), path);
        debug!("GitHub API request: {} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .query(query);

        if let Some(token) = &self.config.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GitHubError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        Ok(response.json().await?)
    }

    /// Find a milestone by exact title among milestones in `state`.
    ///
    /// An open milestone wins over closed ones sharing its title.
    async fn find_milestone(&self, title: &str, state: &str) -> Result<Option<Milestone>> {
        let path = format!("{}/milestones", self.config.repo_path());
        let milestones: Vec<Milestone> = self
            .api_request::<_, ()>(
                Method::GET,
                &path,
                &[("state", state), ("per_page", PER_PAGE)],
                None,
            )
            .await?;

        debug!(count = milestones.len(), state, "milestones listed");

        let mut closed = None;
        for milestone in milestones.into_iter().filter(|m| m.title == title) {
            if !milestone.is_closed() {
                return Ok(Some(milestone));
            }
            closed.get_or_insert(milestone);
        }
        Ok(closed)
    }

    /// List the issues of a milestone
    pub async fn list_milestone_issues(&self, milestone: &Milestone) -> Result<Vec<Issue>> {
        let path = format!("{}/issues", self.config.repo_path());
        let number = milestone.number.to_string();
        self.api_request::<_, ()>(
            Method::GET,
            &path,
            &[
                ("milestone", number.as_str()),
                ("state", self.config.issue_state.as_str()),
                ("per_page", PER_PAGE),
            ],
            None,
        )
        .await
    }

    /// Find the open milestone titled `version` and return its issues
    pub async fn version_issues(&self, version: &str) -> Result<Vec<Issue>> {
        let milestone = self
            .find_milestone(version, "open")
            .await?
            .ok_or_else(|| GitHubError::MilestoneNotFound(version.to_string()))?;
        info!(milestone = milestone.number, title = %milestone.title, "found milestone");

        let issues = self.list_milestone_issues(&milestone).await?;
        info!(
            milestone = milestone.number,
            count = issues.len(),
            state = %self.config.issue_state,
            "milestone issues listed"
        );
        Ok(issues)
    }
}

#[async_trait]
impl ReleaseProvider for GitHubProvider {
    fn name(&self) -> &str {
        "GitHub"
    }

    #[instrument(skip(self, sections), fields(repo = %self.config.repo_path()))]
    async fn find_version_issues(
        &self,
        version: &str,
        sections: &mut [Section],
    ) -> relnotes_core::Result<()> {
        let issues = self.version_issues(version).await?;

        for issue in issues {
            if issue.is_open() {
                warn!(number = issue.number, url = %issue.html_url, "milestone issue is still open");
            }

            let labels = issue.label_set();
            let number = issue.number;
            let assigned = assign_to_sections(&GitHubItem::new(issue), &labels, sections);
            if assigned == 0 {
                debug!(number, "issue matches no section");
            }
        }

        Ok(())
    }

    #[instrument(skip(self, body), fields(repo = %self.config.repo_path()))]
    async fn create_release(
        &self,
        version: &str,
        prerelease: bool,
        body: &str,
    ) -> relnotes_core::Result<()> {
        let path = format!("{}/releases", self.config.repo_path());
        let request = NewRelease {
            tag_name: version,
            name: version,
            body,
            prerelease,
            draft: false,
        };

        let release: Release = self
            .api_request(Method::POST, &path, &[], Some(&request))
            .await?;

        info!(
            id = release.id,
            tag = %release.tag_name,
            url = release.html_url.as_deref().unwrap_or_default(),
            "release created"
        );
        Ok(())
    }

    #[instrument(skip(self), fields(repo = %self.config.repo_path()))]
    async fn close_version(&self, version: &str) -> relnotes_core::Result<()> {
        let milestone = self
            .find_milestone(version, "all")
            .await?
            .ok_or_else(|| GitHubError::MilestoneNotFound(version.to_string()))?;

        if milestone.is_closed() {
            warn!(milestone = milestone.number, title = %milestone.title, "milestone is already closed");
            return Ok(());
        }

        let path = format!("{}/milestones/{}", self.config.repo_path(), milestone.number);
        let updated: Milestone = self
            .api_request(
                Method::PATCH,
                &path,
                &[],
                Some(&MilestoneUpdate { state: "closed" }),
            )
            .await?;

        info!(milestone = updated.number, state = %updated.state, "milestone closed");
        Ok(())
    }
}
