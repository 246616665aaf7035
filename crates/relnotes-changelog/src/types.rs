//! Changelog types

use std::collections::HashSet;
use std::fmt;

use relnotes_core::SectionConfig;

/// A single changelog entry derived from one tracked issue
///
/// Each issue tracker provides its own implementation wrapping the raw
/// record it received.
pub trait Item: fmt::Debug + Send + Sync {
    /// Issue identifier as shown in the changelog (e.g. the issue number)
    fn id(&self) -> String;

    /// Link to the issue
    fn url(&self) -> &str;

    /// Issue title
    fn title(&self) -> &str;
}

/// A section in a changelog
#[derive(Debug)]
pub struct Section {
    /// Section configuration (title and selecting labels)
    pub config: SectionConfig,
    /// Items in this section, in the order the provider returned them
    pub items: Vec<Box<dyn Item>>,
}

impl Section {
    /// Create a new empty section
    pub fn new(config: SectionConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
        }
    }

    /// Section title
    pub fn title(&self) -> &str {
        &self.config.title
    }

    /// Labels selecting this section
    pub fn labels(&self) -> &[String] {
        &self.config.labels
    }

    /// Check if any configured label is present in the issue's label set
    pub fn contains_labels(&self, labels: &HashSet<String>) -> bool {
        self.config.labels.iter().any(|label| labels.contains(label))
    }

    /// Append an item to the section
    pub fn add_item(&mut self, item: Box<dyn Item>) {
        self.items.push(item);
    }

    /// Check if section is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items in the section
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Append `item` to every section whose labels intersect `labels`.
///
/// Returns how many sections received the item. An issue matching several
/// sections is added to each of them; it is never added twice to the same
/// section.
pub fn assign_to_sections<I>(item: &I, labels: &HashSet<String>, sections: &mut [Section]) -> usize
where
    I: Item + Clone + 'static,
{
    let mut assigned = 0;
    for section in sections.iter_mut() {
        if section.contains_labels(labels) {
            section.add_item(Box::new(item.clone()));
            assigned += 1;
        }
    }
    assigned
}
