//! Release body templates
//!
//! A small text template language modelled on Go's `text/template`:
//!
//! - `{{ .Field }}` and `{{ $var.Field }}` print values
//! - `{{ range $x := .List }} ... {{ else }} ... {{ end }}` iterates
//! - `{{ if .Field }} ... {{ else }} ... {{ end }}` branches, `not` negates
//! - `{{/* comment */}}` is dropped, `{{-` and `-}}` trim whitespace
//!
//! ## Example
//!
//! ```rust
//! use relnotes_changelog::template::Template;
//! use serde_json::json;
//!
//! let template = Template::parse("{{ range .Items }}* {{ . }}\n{{ end }}").unwrap();
//! let body = template.render(&json!({"Items": ["one", "two"]})).unwrap();
//! assert_eq!(body, "* one\n* two\n");
//! ```

mod context;
mod parser;
mod render;

pub use context::{ItemContext, SectionContext, TemplateContext};

use relnotes_core::TemplateError;
use serde::Serialize;
use tracing::{debug, instrument};

use parser::Node;
use render::Renderer;

/// A parsed template, ready to render
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template source
    #[instrument(skip(source), fields(len = source.len()))]
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let nodes = parser::parse(source)?;
        debug!(nodes = nodes.len(), "template parsed");
        Ok(Self { nodes })
    }

    /// Render the template against any serializable data
    pub fn render<T: Serialize>(&self, data: &T) -> Result<String, TemplateError> {
        let root = serde_json::to_value(data).map_err(|e| TemplateError::Render {
            line: 0,
            message: e.to_string(),
        })?;
        Renderer::new(root).render(&self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockItem;
    use crate::types::Section;
    use relnotes_core::config::DEFAULT_TEMPLATE;
    use relnotes_core::SectionConfig;

    fn section(title: &str, labels: &[&str], items: Vec<MockItem>) -> Section {
        let mut section = Section::new(SectionConfig::new(title, labels.iter().copied()));
        for item in items {
            section.add_item(Box::new(item));
        }
        section
    }

    fn render_default(sections: &[Section]) -> String {
        let template = Template::parse(DEFAULT_TEMPLATE).unwrap();
        template
            .render(&TemplateContext::new("1.0.0", false, sections))
            .unwrap()
    }

    #[test]
    fn test_default_template_single_item() {
        let sections = vec![section(
            "A",
            &["x"],
            vec![MockItem::with_url(5, "http://e/5", "Fix", &["x", "y"])],
        )];

        assert_eq!(render_default(&sections), "### A\n* [#5](http://e/5) - Fix\n\n");
    }

    #[test]
    fn test_default_template_multiple_sections() {
        let sections = vec![
            section(
                "Features",
                &["feature"],
                vec![
                    MockItem::with_url(2, "http://e/2", "Add export", &["feature"]),
                    MockItem::with_url(1, "http://e/1", "Add import", &["feature"]),
                ],
            ),
            section(
                "Fixes",
                &["bug"],
                vec![MockItem::with_url(3, "http://e/3", "Fix crash", &["bug"])],
            ),
        ];

        assert_eq!(
            render_default(&sections),
            "### Features\n* [#2](http://e/2) - Add export\n* [#1](http://e/1) - Add import\n\n\
             ### Fixes\n* [#3](http://e/3) - Fix crash\n\n"
        );
    }

    #[test]
    fn test_default_template_empty_section() {
        let sections = vec![section("Nothing", &["none"], Vec::new())];
        assert_eq!(render_default(&sections), "### Nothing\n\n");
    }

    #[test]
    fn test_getter_style_aliases() {
        let source = "{{ range $group := .Groups }}### {{ $group.GetTitle }}{{ range $item := $group.Items }}\n\
                      * [#{{ $item.GetID }}]({{ $item.GetURL }}) - {{ $item.GetTitle }}{{ end }}\n{{ end }}\n";
        let sections = vec![section(
            "A",
            &["x"],
            vec![MockItem::with_url(5, "http://e/5", "Fix", &["x"])],
        )];

        let template = Template::parse(source).unwrap();
        let body = template
            .render(&TemplateContext::new("1.0.0", false, &sections))
            .unwrap();
        assert_eq!(body, "### A\n* [#5](http://e/5) - Fix\n\n");
    }

    #[test]
    fn test_version_and_prerelease_fields() {
        let template =
            Template::parse("## {{ .Version }}{{ if .Prerelease }} (pre-release){{ end }}").unwrap();
        let body = template
            .render(&TemplateContext::new("2.0.0-rc.1", true, &[]))
            .unwrap();
        assert_eq!(body, "## 2.0.0-rc.1 (pre-release)");
    }

    #[test]
    fn test_render_is_deterministic() {
        let sections = vec![section(
            "A",
            &["x"],
            vec![MockItem::with_url(5, "http://e/5", "Fix", &["x"])],
        )];
        assert_eq!(render_default(&sections), render_default(&sections));
    }
}
