//! Generate command

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::info;

use relnotes_changelog::Changelog;
use relnotes_core::config::{load_config, DEFAULT_CONFIG_FILE};
use relnotes_github::{GitHubConfig, GitHubProvider, DEFAULT_API_URL};

use crate::cli::output::{self, version_style};
use crate::cli::{Cli, OutputFormat};

/// Generate release notes from a milestone
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Repository as owner/name
    #[arg(short, long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// GitHub access token
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Release version, matched against the milestone title
    #[arg(long, env = "RELNOTES_VERSION")]
    pub release_version: String,

    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub file: PathBuf,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Create a release with the generated notes
    #[arg(long)]
    pub create_release: bool,

    /// Close the milestone afterwards
    #[arg(long)]
    pub close_milestone: bool,

    /// Print the generated notes
    #[arg(short, long)]
    pub print: bool,
}

/// JSON output of the generate command
#[derive(Debug, Serialize)]
struct GenerateOutput<'a> {
    version: &'a str,
    prerelease: bool,
    body: &'a str,
    release_created: bool,
    milestone_closed: bool,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            repository = %self.repository,
            version = %self.release_version,
            create_release = self.create_release,
            close_milestone = self.close_milestone,
            "executing generate command"
        );
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        let changelog = self.run(self.changelog()?).await?;
        print!("{}", self.report(cli, &changelog)?);
        Ok(())
    }

    /// Text written to stdout once the changelog has run
    fn report(&self, cli: &Cli, changelog: &Changelog) -> anyhow::Result<String> {
        let mut out = String::new();

        if cli.format == OutputFormat::Json {
            if self.print {
                let output = GenerateOutput {
                    version: changelog.version(),
                    prerelease: changelog.is_prerelease(),
                    body: changelog.body(),
                    release_created: self.create_release,
                    milestone_closed: self.close_milestone,
                };
                out.push_str(&serde_json::to_string_pretty(&output)?);
                out.push('\n');
            }
            return Ok(out);
        }

        if self.print {
            out.push_str(changelog.body());
        }

        if !cli.quiet {
            let version = version_style().apply_to(changelog.version());
            if self.create_release {
                out.push_str(&output::success_line(&format!("Created release {}", version)));
                out.push('\n');
            }
            if self.close_milestone {
                out.push_str(&output::success_line(&format!("Closed milestone {}", version)));
                out.push('\n');
            }
        }

        Ok(out)
    }

    /// Load the configuration and wire up the GitHub provider
    fn changelog(&self) -> anyhow::Result<Changelog> {
        let config = load_config(&self.file)?;

        let github = GitHubConfig::new(&self.repository)?
            .with_api_url(&self.api_url)
            .with_token(&self.token)
            .with_issue_state(config.issues);
        let provider = GitHubProvider::new(github)?;

        Ok(Changelog::new(&self.release_version, config, Box::new(provider))?)
    }

    /// Fetch issues, render the body and run the requested release actions
    async fn run(&self, mut changelog: Changelog) -> anyhow::Result<Changelog> {
        changelog.find_version_issues().await?;
        changelog.generate_body()?;

        if self.create_release {
            changelog.create_release().await?;
        }
        if self.close_milestone {
            changelog.close_version().await?;
        }

        Ok(changelog)
    }
}
