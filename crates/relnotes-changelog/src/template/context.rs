//! Data exposed to release body templates

use serde::Serialize;

use crate::types::{Item, Section};

/// Root template data: `.Version`, `.Prerelease`, `.Sections`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateContext<'a> {
    /// Version being released
    pub version: &'a str,
    /// Whether the version carries a pre-release component
    pub prerelease: bool,
    /// Sections in configuration order
    pub sections: Vec<SectionContext<'a>>,
}

/// One section: `.Title`, `.Labels`, `.Items`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectionContext<'a> {
    pub title: &'a str,
    pub labels: &'a [String],
    pub items: Vec<ItemContext<'a>>,
}

/// One item: `.ID`, `.URL`, `.Title`
#[derive(Debug, Clone, Serialize)]
pub struct ItemContext<'a> {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "URL")]
    pub url: &'a str,
    #[serde(rename = "Title")]
    pub title: &'a str,
}

impl<'a> TemplateContext<'a> {
    /// Build the template data from changelog state
    pub fn new(version: &'a str, prerelease: bool, sections: &'a [Section]) -> Self {
        Self {
            version,
            prerelease,
            sections: sections.iter().map(SectionContext::from).collect(),
        }
    }
}

impl<'a> From<&'a Section> for SectionContext<'a> {
    fn from(section: &'a Section) -> Self {
        Self {
            title: section.title(),
            labels: section.labels(),
            items: section
                .items
                .iter()
                .map(|item| ItemContext::from(item.as_ref()))
                .collect(),
        }
    }
}

impl<'a> From<&'a dyn Item> for ItemContext<'a> {
    fn from(item: &'a dyn Item) -> Self {
        Self {
            id: item.id(),
            url: item.url(),
            title: item.title(),
        }
    }
}
