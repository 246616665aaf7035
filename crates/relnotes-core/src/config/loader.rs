//! Configuration loading

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ConfigError, Result};

use super::types::Config;
use super::validation::validate_config;

/// Load configuration from a file, falling back to defaults.
///
/// A missing file is not an error: the built-in defaults are returned. A file
/// that exists but cannot be parsed yields [`ConfigError::ParseError`].
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "configuration file does not exist, using defaults");
        return Ok(Config::default());
    }

    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config = parse_config(&content, format == "TOML").map_err(|message| {
        ConfigError::ParseError {
            path: path.to_path_buf(),
            message,
        }
    })?;

    config.apply_defaults();
    validate_config(&config);
    debug!(
        path = %path.display(),
        sections = config.sections.len(),
        issues = %config.issues,
        "config loaded and validated"
    );
    Ok(config)
}

fn parse_config(content: &str, toml: bool) -> std::result::Result<Config, String> {
    if toml {
        return toml::from_str(content).map_err(|e| e.to_string());
    }

    // An empty or comment-only YAML document deserializes to unit
    if content.lines().all(|l| {
        let l = l.trim();
        l.is_empty() || l.starts_with('#')
    }) {
        return Ok(Config::default());
    }

    serde_yaml::from_str(content).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IssueStateFilter, SectionConfig, DEFAULT_TEMPLATE};
    use crate::error::RelnotesError;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("changelog.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("changelog.yaml");
        std::fs::write(
            &config_path,
            "sections:\n  - title: Features\n    labels: [feature]\n  - title: Fixes\n    labels: [bug, regression]\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(
            config.sections,
            vec![
                SectionConfig::new("Features", ["feature"]),
                SectionConfig::new("Fixes", ["bug", "regression"]),
            ]
        );
        assert_eq!(config.template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_load_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("changelog.toml");
        std::fs::write(
            &config_path,
            "template = \"{{ .Version }}\"\nissues = \"all\"\n\n[[sections]]\ntitle = \"Fixes\"\nlabels = [\"bug\"]\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.template, "{{ .Version }}");
        assert_eq!(config.issues, IssueStateFilter::All);
        assert_eq!(config.sections, vec![SectionConfig::new("Fixes", ["bug"])]);
    }

    #[test]
    fn test_empty_fields_use_defaults() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("changelog.yaml");
        std::fs::write(&config_path, "template: \"\"\nsections: []\n").unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("changelog.yaml");
        std::fs::write(&config_path, "# nothing configured yet\n").unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_section_title_still_loads() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("changelog.yaml");
        std::fs::write(&config_path, "sections:\n  - title: \"\"\n    labels: [bug]\n").unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.sections, vec![SectionConfig::new("", ["bug"])]);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("changelog.yaml");
        std::fs::write(&config_path, "sections: [unclosed\n").unwrap();

        let err = load_config(&config_path).unwrap_err();
        assert!(matches!(
            err,
            RelnotesError::Config(ConfigError::ParseError { .. })
        ));
    }
}
