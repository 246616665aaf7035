//! Configuration types

use serde::{Deserialize, Serialize};

use super::defaults::{DEFAULT_SECTION_LABELS, DEFAULT_SECTION_TITLE, DEFAULT_TEMPLATE};

/// Main configuration for relnotes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template used to render the release body
    pub template: String,

    /// Which milestone issues are fetched
    pub issues: IssueStateFilter,

    /// Changelog sections, rendered in this order
    #[serde(alias = "groups")]
    pub sections: Vec<SectionConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            issues: IssueStateFilter::default(),
            sections: vec![SectionConfig::default()],
        }
    }
}

impl Config {
    /// Replace empty fields with their built-in defaults.
    ///
    /// Runs after deserialization, so an explicit `template: ""` or
    /// `sections: []` behaves the same as leaving the key out.
    pub fn apply_defaults(&mut self) {
        if self.template.is_empty() {
            self.template = DEFAULT_TEMPLATE.to_string();
        }
        if self.sections.is_empty() {
            self.sections = vec![SectionConfig::default()];
        }
    }
}

/// A titled changelog section selected by issue labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Section heading
    pub title: String,

    /// Issue labels that select this section
    #[serde(default)]
    pub labels: Vec<String>,
}

impl SectionConfig {
    /// Create a new section configuration
    pub fn new<I, S>(title: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION_TITLE, DEFAULT_SECTION_LABELS.iter().copied())
    }
}

/// Issue state filter used when listing a milestone's issues
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStateFilter {
    /// Only closed issues
    #[default]
    Closed,
    /// Open and closed issues; open ones are reported as warnings
    All,
}

impl IssueStateFilter {
    /// Value sent to the issue tracker
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

impl std::fmt::Display for IssueStateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
