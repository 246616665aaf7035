//! Configuration validation
//!
//! Nothing here is fatal. Questionable sections are logged and reported back
//! to the caller; the changelog still renders them.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::types::Config;

/// Validate configuration, returning one message per questionable section
pub fn validate_config(config: &Config) -> Vec<String> {
    debug!("validating configuration");
    let warnings = validate_sections(config);
    debug!(warnings = warnings.len(), "configuration validation finished");
    warnings
}

fn validate_sections(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut titles = HashSet::new();

    for (index, section) in config.sections.iter().enumerate() {
        if section.title.trim().is_empty() {
            warn!(index, "section has an empty title");
            warnings.push(format!("sections[{}].title is empty", index));
        }

        if section.labels.is_empty() {
            warn!(section = %section.title, "section has no labels and will stay empty");
            warnings.push(format!("sections[{}] has no labels", index));
        }

        if !titles.insert(section.title.as_str()) {
            warn!(section = %section.title, "duplicate section title");
            warnings.push(format!("sections[{}].title duplicates '{}'", index, section.title));
        }
    }

    warnings
}
