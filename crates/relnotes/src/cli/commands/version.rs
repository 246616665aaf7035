//! Version command

use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;

use crate::cli::output::version_style;
use crate::cli::Cli;

/// Show build information
#[derive(Debug, Args)]
pub struct VersionCommand {
    /// Print just the version number
    #[arg(short, long)]
    pub short: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub output: VersionOutput,
}

/// Build information output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VersionOutput {
    Json,
    Yaml,
}

/// Build information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub date: &'static str,
}

impl BuildInfo {
    /// Information baked in at compile time
    ///
    /// `RELNOTES_COMMIT` and `RELNOTES_BUILD_DATE` are read from the build
    /// environment when set.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("RELNOTES_COMMIT").unwrap_or("none"),
            date: option_env!("RELNOTES_BUILD_DATE").unwrap_or("unknown"),
        }
    }

    fn render(&self, output: VersionOutput) -> anyhow::Result<String> {
        Ok(match output {
            VersionOutput::Json => serde_json::to_string_pretty(self)?,
            VersionOutput::Yaml => serde_yaml::to_string(self)?,
        })
    }
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, _cli: &Cli) -> anyhow::Result<()> {
        info!(short = self.short, output = ?self.output, "executing version command");
        let build = BuildInfo::current();

        if self.short {
            println!("{}", version_style().apply_to(build.version));
        } else {
            println!("{}", build.render(self.output)?.trim_end());
        }

        Ok(())
    }
}
