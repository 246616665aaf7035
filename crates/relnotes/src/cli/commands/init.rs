//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use dialoguer::Confirm;
use tracing::info;

use relnotes_core::config::{default_config_toml, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TEMPLATE};

use crate::cli::output::{self, path_style};
use crate::cli::Cli;

/// Write a starter configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Never prompt; fail instead of asking to overwrite
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output file path (TOML when it ends in .toml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        // Check if config already exists
        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                output::warning("Aborted.");
                return Ok(());
            }
        }

        std::fs::write(&config_path, starter_config(&config_path)?)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                path_style().apply_to(config_path.display())
            ));
            println!();
            println!("Next steps:");
            println!("  1. Edit the sections to match your issue labels");
            println!(
                "  2. Run {} to preview the notes",
                path_style().apply_to("relnotes generate --print")
            );
        }

        Ok(())
    }
}

/// Starter configuration text for `path`, TOML or YAML by extension
fn starter_config(path: &Path) -> anyhow::Result<String> {
    if path.extension().is_some_and(|ext| ext == "toml") {
        Ok(default_config_toml()?)
    } else {
        Ok(DEFAULT_CONFIG_TEMPLATE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use relnotes_core::config::load_config;
    use relnotes_core::Config;
    use tempfile::TempDir;

    fn cli() -> Cli {
        Cli::try_parse_from(["relnotes", "--quiet", "version"]).unwrap()
    }

    #[test]
    fn test_init_writes_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("changelog.yaml");
        let cmd = InitCommand {
            force: false,
            yes: true,
            output: Some(path.clone()),
        };

        cmd.execute(&cli()).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_TEMPLATE);
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_writes_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("changelog.toml");
        let cmd = InitCommand {
            force: false,
            yes: true,
            output: Some(path.clone()),
        };

        cmd.execute(&cli()).unwrap();

        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("changelog.yaml");
        std::fs::write(&path, "sections: []\n").unwrap();

        let cmd = InitCommand {
            force: false,
            yes: true,
            output: Some(path.clone()),
        };
        assert!(cmd.execute(&cli()).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "sections: []\n");

        let cmd = InitCommand {
            force: true,
            yes: true,
            output: Some(path.clone()),
        };
        cmd.execute(&cli()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_TEMPLATE);
    }
}
