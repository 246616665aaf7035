//! Shell completions generation command

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use tracing::{debug, info};

use crate::cli::Cli;

/// Generate shell completions
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for (detected from $SHELL when omitted)
    #[arg(value_enum)]
    pub shell: Option<Shell>,

    /// Output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let shell = self.resolve_shell(Shell::from_env())?;
        info!(%shell, "executing completions command");

        match &self.output {
            Some(output_path) => {
                let mut file = std::fs::File::create(output_path)?;
                write_completions(shell, &mut file);

                if !cli.quiet {
                    println!("{} completions written to {}", shell, output_path.display());
                }
            }
            None => write_completions(shell, &mut std::io::stdout()),
        }

        Ok(())
    }

    /// The requested shell, or the detected one
    fn resolve_shell(&self, detected: Option<Shell>) -> anyhow::Result<Shell> {
        if let Some(shell) = self.shell {
            return Ok(shell);
        }

        debug!(?detected, "no shell given, using $SHELL");
        detected.ok_or_else(|| {
            anyhow::anyhow!("Could not detect the shell from $SHELL; pass one explicitly")
        })
    }
}

fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
}
