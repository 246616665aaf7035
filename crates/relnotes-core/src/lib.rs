//! Relnotes Core - Core library for release note generation
//!
//! This crate provides the foundational error types and the configuration
//! system shared by the changelog builder, the provider clients and the CLI.

pub mod config;
pub mod error;

pub use config::{Config, IssueStateFilter, SectionConfig};
pub use error::{
    ConfigError, ProviderError, RelnotesError, Result, TemplateError, VersionError,
};
