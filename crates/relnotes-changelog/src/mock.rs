//! Test doubles for items and providers

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use relnotes_core::{ProviderError, Result};

use crate::provider::ReleaseProvider;
use crate::types::{assign_to_sections, Item, Section};

/// In-memory issue
#[derive(Debug, Clone)]
pub struct MockItem {
    pub number: u64,
    pub url: String,
    pub title: String,
    pub labels: Vec<String>,
}

impl MockItem {
    pub fn new(number: u64, title: &str, labels: &[&str]) -> Self {
        Self::with_url(number, &format!("https://tracker.test/issues/{}", number), title, labels)
    }

    pub fn with_url(number: u64, url: &str, title: &str, labels: &[&str]) -> Self {
        Self {
            number,
            url: url.to_string(),
            title: title.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl Item for MockItem {
    fn id(&self) -> String {
        self.number.to_string()
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// A provider call, recorded in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FindVersionIssues(String),
    CreateRelease {
        version: String,
        prerelease: bool,
        body: String,
    },
    CloseVersion(String),
}

/// In-memory milestone
#[derive(Debug, Clone)]
pub struct MockMilestone {
    pub title: String,
    pub open: bool,
    pub issues: Vec<MockItem>,
}

/// Provider backed by in-memory milestones
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    pub milestones: Arc<Mutex<Vec<MockMilestone>>>,
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_milestone(self, title: &str, open: bool, issues: Vec<MockItem>) -> Self {
        self.milestones.lock().unwrap().push(MockMilestone {
            title: title.to_string(),
            open,
            issues,
        });
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn is_open(&self, title: &str) -> Option<bool> {
        self.milestones
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.title == title)
            .map(|m| m.open)
    }
}

#[async_trait]
impl ReleaseProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn find_version_issues(&self, version: &str, sections: &mut [Section]) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::FindVersionIssues(version.to_string()));

        let milestones = self.milestones.lock().unwrap();
        let milestone = milestones
            .iter()
            .find(|m| m.open && m.title == version)
            .ok_or_else(|| ProviderError::MilestoneNotFound(version.to_string()))?;

        for issue in &milestone.issues {
            let labels: HashSet<String> = issue.labels.iter().cloned().collect();
            assign_to_sections(issue, &labels, sections);
        }
        Ok(())
    }

    async fn create_release(&self, version: &str, prerelease: bool, body: &str) -> Result<()> {
        self.calls.lock().unwrap().push(Call::CreateRelease {
            version: version.to_string(),
            prerelease,
            body: body.to_string(),
        });
        Ok(())
    }

    async fn close_version(&self, version: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::CloseVersion(version.to_string()));

        let mut milestones = self.milestones.lock().unwrap();
        let milestone = milestones
            .iter_mut()
            .find(|m| m.title == version)
            .ok_or_else(|| ProviderError::MilestoneNotFound(version.to_string()))?;
        milestone.open = false;
        Ok(())
    }
}
