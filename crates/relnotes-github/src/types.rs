//! GitHub REST API records

use std::collections::HashSet;

use relnotes_changelog::Item;
use serde::{Deserialize, Serialize};

/// A repository milestone
#[derive(Debug, Clone, Deserialize)]
pub struct Milestone {
    /// Milestone number (used in issue queries and edits)
    pub number: u64,
    /// Milestone title, matched against the release version
    pub title: String,
    /// "open" or "closed"
    pub state: String,
    /// Web link
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Milestone {
    /// Check if the milestone is closed
    pub fn is_closed(&self) -> bool {
        self.state == "closed"
    }
}

/// An issue label
#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
}

/// An issue (or pull request) attached to a milestone
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Issue number
    pub number: u64,
    /// Issue title
    pub title: String,
    /// "open" or "closed"
    pub state: String,
    /// Web link
    pub html_url: String,
    /// Labels attached to the issue
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl Issue {
    /// Check if the issue is still open
    pub fn is_open(&self) -> bool {
        self.state == "open"
    }

    /// Set of label names
    pub fn label_set(&self) -> HashSet<String> {
        self.labels.iter().map(|l| l.name.clone()).collect()
    }
}

/// Request body for creating a release
#[derive(Debug, Serialize)]
pub(crate) struct NewRelease<'a> {
    pub tag_name: &'a str,
    pub name: &'a str,
    pub body: &'a str,
    pub prerelease: bool,
    pub draft: bool,
}

/// Request body for editing a milestone
#[derive(Debug, Serialize)]
pub(crate) struct MilestoneUpdate<'a> {
    pub state: &'a str,
}

/// A created release
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Changelog item backed by a GitHub issue
#[derive(Debug, Clone)]
pub struct GitHubItem {
    issue: Issue,
}

impl GitHubItem {
    /// Wrap an issue
    pub fn new(issue: Issue) -> Self {
        Self { issue }
    }

    /// The wrapped issue
    pub fn issue(&self) -> &Issue {
        &self.issue
    }
}

impl Item for GitHubItem {
    fn id(&self) -> String {
        self.issue.number.to_string()
    }

    fn url(&self) -> &str {
        &self.issue.html_url
    }

    fn title(&self) -> &str {
        &self.issue.title
    }
}
