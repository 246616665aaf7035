//! Default configuration values

use crate::error::ConfigError;

use super::types::Config;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "changelog.yaml";

/// Title of the section used when none are configured
pub const DEFAULT_SECTION_TITLE: &str = "Complete changelog";

/// Labels of the section used when none are configured
pub const DEFAULT_SECTION_LABELS: &[&str] = &["bug", "enhancement"];

/// Built-in release body template.
///
/// Renders `### <title>` per section followed by one
/// `* [#<id>](<url>) - <title>` line per item, with a blank line after
/// each section. With more than one section this differs from templates
/// written for the older `Groups` naming, which end a section with a single
/// newline and so print sections back to back.
pub const DEFAULT_TEMPLATE: &str = "{{ range $section := .Sections }}### {{ $section.Title }}\
{{ range $item := $section.Items }}
* [#{{ $item.ID }}]({{ $item.URL }}) - {{ $item.Title }}{{ end }}

{{ end }}";

/// Starter configuration written by `relnotes init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# relnotes configuration
#
# Sections are rendered in the order listed here. An issue is added to every
# section that shares at least one label with it.
sections:
  - title: Complete changelog
    labels:
      - bug
      - enhancement

# Issues fetched from the milestone: "closed" (default) or "all".
# With "all", issues that are still open are reported as warnings.
issues: closed

# Leave empty to use the built-in template.
template: ""
"#;

/// Render the default configuration as TOML
pub fn default_config_toml() -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(&Config::default())?)
}
