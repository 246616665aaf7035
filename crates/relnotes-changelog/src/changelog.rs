//! Changelog orchestration

use std::path::Path;

use relnotes_core::config::load_config;
use relnotes_core::{Config, Result, VersionError};
use semver::Version;
use tracing::{debug, info, instrument};

use crate::provider::ReleaseProvider;
use crate::template::{Template, TemplateContext};
use crate::types::Section;

/// Parse a release version as a semantic version.
///
/// A single leading `v` is accepted (`v1.2.3`).
pub fn parse_version(version: &str) -> Result<Version> {
    let trimmed = version.strip_prefix('v').unwrap_or(version);
    Version::parse(trimmed).map_err(|e| {
        VersionError::Invalid {
            version: version.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Release changelog for one version
///
/// Holds the configured sections, the provider that fills them and the
/// rendered body. Operations are meant to run once each, in order:
/// [`find_version_issues`](Self::find_version_issues),
/// [`generate_body`](Self::generate_body), then optionally
/// [`create_release`](Self::create_release) and
/// [`close_version`](Self::close_version).
pub struct Changelog {
    version: String,
    semver: Version,
    config: Config,
    sections: Vec<Section>,
    body: String,
    provider: Box<dyn ReleaseProvider>,
}

impl Changelog {
    /// Load configuration from `config_path` and create the changelog
    pub fn init(
        version: impl Into<String>,
        config_path: &Path,
        provider: Box<dyn ReleaseProvider>,
    ) -> Result<Self> {
        let config = load_config(config_path)?;
        Self::new(version, config, provider)
    }

    /// Create a changelog from an already loaded configuration
    pub fn new(
        version: impl Into<String>,
        config: Config,
        provider: Box<dyn ReleaseProvider>,
    ) -> Result<Self> {
        let version = version.into();
        let semver = parse_version(&version)?;
        let sections = config.sections.iter().cloned().map(Section::new).collect();

        debug!(
            version = %version,
            provider = provider.name(),
            sections = config.sections.len(),
            "changelog initialized"
        );

        Ok(Self {
            version,
            semver,
            config,
            sections,
            body: String::new(),
            provider,
        })
    }

    /// Version string as given
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Effective configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sections in configuration order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Rendered body, empty until [`generate_body`](Self::generate_body) runs
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns true if the version carries a pre-release component
    pub fn is_prerelease(&self) -> bool {
        !self.semver.pre.is_empty()
    }

    /// Data handed to the template
    pub fn context(&self) -> TemplateContext<'_> {
        TemplateContext::new(&self.version, self.is_prerelease(), &self.sections)
    }

    /// Fill the sections with the issues of the version's milestone
    #[instrument(skip(self), fields(version = %self.version))]
    pub async fn find_version_issues(&mut self) -> Result<()> {
        info!(provider = self.provider.name(), "finding issues for version");
        self.provider
            .find_version_issues(&self.version, &mut self.sections)
            .await?;

        debug!(
            items = self.sections.iter().map(Section::len).sum::<usize>(),
            "sections populated"
        );
        Ok(())
    }

    /// Render the configured template and store the result as the body
    #[instrument(skip(self), fields(version = %self.version))]
    pub fn generate_body(&mut self) -> Result<&str> {
        let template = Template::parse(&self.config.template)?;
        self.body = template.render(&self.context())?;
        debug!(body_len = self.body.len(), "release body generated");
        Ok(&self.body)
    }

    /// Publish a release with the generated body
    pub async fn create_release(&self) -> Result<()> {
        let prerelease = self.is_prerelease();
        info!(version = %self.version, prerelease, "creating release for version");
        self.provider
            .create_release(&self.version, prerelease, &self.body)
            .await
    }

    /// Close the version's milestone
    pub async fn close_version(&self) -> Result<()> {
        info!(version = %self.version, "closing version");
        self.provider.close_version(&self.version).await
    }
}

impl std::fmt::Debug for Changelog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Changelog")
            .field("version", &self.version)
            .field("provider", &self.provider.name())
            .field("sections", &self.sections)
            .field("body", &self.body)
            .finish()
    }
}
