//! CLI commands

mod completions;
mod generate;
mod init;
mod version;

pub use completions::CompletionsCommand;
pub use generate::GenerateCommand;
pub use init::InitCommand;
pub use version::VersionCommand;
